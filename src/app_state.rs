use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::scheduling::{BlockedDates, BookingPolicy, CalendarSnapshot};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: Config,
    pub calendar: Arc<CalendarSnapshot>,
    pub blocked: Arc<BlockedDates>,
    pub policy: BookingPolicy,
}

impl AppState {
    pub fn new(
        db: PgPool,
        env: Config,
        calendar: Arc<CalendarSnapshot>,
        blocked: Arc<BlockedDates>,
    ) -> Self {
        let policy = BookingPolicy {
            slot_granularity_minutes: env.booking.slot_granularity_minutes,
            min_lead_time_minutes: env.booking.min_lead_time_minutes,
        };
        Self {
            db,
            env,
            calendar,
            blocked,
            policy,
        }
    }
}
