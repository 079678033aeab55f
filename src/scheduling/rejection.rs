use serde::Serialize;
use thiserror::Error;
use time::{Date, Time, Weekday};

/// Why a requested slot was declined. These are expected, caller-recoverable
/// outcomes; the messages are part of the API contract and are surfaced to
/// clients verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("appointment_date must be a valid date in format YYYY-MM-DD")]
    InvalidDateFormat,

    #[error("appointment_time must be a valid time in format HH:MM")]
    InvalidTimeFormat,

    #[error("appointment must start at least {lead_minutes} minutes in the future")]
    NotInFuture { lead_minutes: i64 },

    #[error("{date} is unavailable: {reason}")]
    DateUnavailable { date: Date, reason: String },

    #[error("{}", closed_message(.weekday, .opens_at))]
    ShopClosed {
        weekday: Weekday,
        // None when the shop does not open at all that day
        opens_at: Option<Time>,
    },

    #[error("the shop closes at {}; the appointment would run past closing time", fmt_hm(.closes_at))]
    ShopClosing { closes_at: Time },

    #[error("the requested time falls within the lunch break ({} to {})", fmt_hm(.starts_at), fmt_hm(.ends_at))]
    DuringLunch { starts_at: Time, ends_at: Time },

    #[error("appointment_time must fall on a {granularity_minutes}-minute boundary")]
    InvalidGranularity { granularity_minutes: i32 },

    #[error("the requested slot is unavailable; another appointment is already booked at that time")]
    SlotUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    InvalidDateFormat,
    InvalidTimeFormat,
    NotInFuture,
    DateUnavailable,
    ShopClosed,
    ShopClosing,
    DuringLunch,
    InvalidGranularity,
    SlotUnavailable,
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::InvalidDateFormat => RejectionKind::InvalidDateFormat,
            Rejection::InvalidTimeFormat => RejectionKind::InvalidTimeFormat,
            Rejection::NotInFuture { .. } => RejectionKind::NotInFuture,
            Rejection::DateUnavailable { .. } => RejectionKind::DateUnavailable,
            Rejection::ShopClosed { .. } => RejectionKind::ShopClosed,
            Rejection::ShopClosing { .. } => RejectionKind::ShopClosing,
            Rejection::DuringLunch { .. } => RejectionKind::DuringLunch,
            Rejection::InvalidGranularity { .. } => RejectionKind::InvalidGranularity,
            Rejection::SlotUnavailable => RejectionKind::SlotUnavailable,
        }
    }
}

fn fmt_hm(t: &Time) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

fn closed_message(weekday: &Weekday, opens_at: &Option<Time>) -> String {
    match opens_at {
        Some(opens) => format!(
            "the shop does not open until {} on {}",
            fmt_hm(opens),
            weekday
        ),
        None => format!("the shop is not open on {}", weekday),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn not_in_future_message_mentions_future() {
        let rejection = Rejection::NotInFuture { lead_minutes: 60 };
        assert!(rejection.to_string().contains("future"));
        assert_eq!(rejection.kind(), RejectionKind::NotInFuture);
    }

    #[test]
    fn closed_all_day_message_mentions_open() {
        let rejection = Rejection::ShopClosed {
            weekday: Weekday::Sunday,
            opens_at: None,
        };
        let message = rejection.to_string();
        assert!(message.contains("open"), "got: {message}");
        assert!(message.contains("Sunday"));
    }

    #[test]
    fn before_opening_message_names_the_opening_time() {
        let rejection = Rejection::ShopClosed {
            weekday: Weekday::Tuesday,
            opens_at: Some(time!(08:00)),
        };
        let message = rejection.to_string();
        assert!(message.contains("open"));
        assert!(message.contains("08:00"));
    }

    #[test]
    fn closing_message_mentions_closes() {
        let rejection = Rejection::ShopClosing {
            closes_at: time!(17:00),
        };
        let message = rejection.to_string();
        assert!(message.contains("closes"));
        assert!(message.contains("17:00"));
    }

    #[test]
    fn blocked_date_message_mentions_unavailable() {
        let rejection = Rejection::DateUnavailable {
            date: date!(2023 - 03 - 10),
            reason: "public holiday".to_string(),
        };
        let message = rejection.to_string();
        assert!(message.contains("unavailable"));
        assert!(message.contains("2023-03-10"));
        assert!(message.contains("public holiday"));
    }

    #[test]
    fn granularity_message_contains_the_increment() {
        let rejection = Rejection::InvalidGranularity {
            granularity_minutes: 30,
        };
        assert!(rejection.to_string().contains("30"));
    }

    #[test]
    fn slot_unavailable_message_mentions_unavailable() {
        assert!(Rejection::SlotUnavailable.to_string().contains("unavailable"));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&RejectionKind::ShopClosing).unwrap();
        assert_eq!(json, "\"shop_closing\"");
    }
}
