use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::db::models::{BlockedDateRow, BusinessHoursRow};
use crate::scheduling::{BlockedDates, CalendarSnapshot};

pub struct CalendarRepository;

impl CalendarRepository {
    pub async fn load_business_hours(pool: &PgPool) -> Result<Vec<BusinessHoursRow>, sqlx::Error> {
        sqlx::query_as::<_, BusinessHoursRow>(
            "SELECT weekday, opens_at, closes_at, lunch_starts_at, lunch_ends_at
             FROM business_hours
             ORDER BY weekday",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn load_blocked_dates(pool: &PgPool) -> Result<Vec<BlockedDateRow>, sqlx::Error> {
        sqlx::query_as::<_, BlockedDateRow>(
            "SELECT blocked_date, reason FROM blocked_dates ORDER BY blocked_date",
        )
        .fetch_all(pool)
        .await
    }

    /// Loads the calendar configuration into the immutable snapshots shared
    /// by every evaluation. Called once at startup; refreshed only by
    /// restarting the service.
    pub async fn load_snapshot(pool: &PgPool) -> Result<(CalendarSnapshot, BlockedDates)> {
        let hours = Self::load_business_hours(pool)
            .await
            .context("Failed to load business hours")?
            .into_iter()
            .map(BusinessHoursRow::into_weekday_hours)
            .collect::<Result<Vec<_>>>()?;
        let calendar =
            CalendarSnapshot::from_hours(hours).context("Invalid business hours configuration")?;

        let blocked = BlockedDates::from_entries(
            Self::load_blocked_dates(pool)
                .await
                .context("Failed to load blocked dates")?
                .into_iter()
                .map(|row| (row.blocked_date, row.reason)),
        );

        Ok((calendar, blocked))
    }
}
