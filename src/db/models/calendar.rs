use anyhow::{bail, Result};
use time::{Date, Time};

use crate::scheduling::{LunchBreak, OperatingWindow, WeekdayHours};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusinessHoursRow {
    pub weekday: i16,
    pub opens_at: Time,
    pub closes_at: Time,
    pub lunch_starts_at: Option<Time>,
    pub lunch_ends_at: Option<Time>,
}

impl BusinessHoursRow {
    pub fn into_weekday_hours(self) -> Result<WeekdayHours> {
        let lunch = match (self.lunch_starts_at, self.lunch_ends_at) {
            (Some(starts_at), Some(ends_at)) => Some(LunchBreak { starts_at, ends_at }),
            (None, None) => None,
            _ => bail!(
                "business hours row for weekday {} has a half-specified lunch break",
                self.weekday
            ),
        };
        let weekday = u8::try_from(self.weekday)
            .map_err(|_| anyhow::anyhow!("business hours weekday {} is negative", self.weekday))?;
        Ok(WeekdayHours {
            weekday,
            window: OperatingWindow {
                opens_at: self.opens_at,
                closes_at: self.closes_at,
            },
            lunch,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlockedDateRow {
    pub blocked_date: Date,
    pub reason: String,
}
