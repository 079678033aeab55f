use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, Weekday};

use super::rejection::Rejection;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// A requested slot after structural validation: one point in time in the
/// business's local offset, plus the decomposed pieces the eligibility rules
/// work with. Every rule reads from this value, so the whole evaluation uses
/// a single timezone reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSlot {
    pub date: Date,
    pub start_time: Time,
    pub weekday: Weekday,
    pub start_minutes: i32,
    pub starts_at: OffsetDateTime,
}

impl CanonicalSlot {
    pub fn end_time(&self, duration_minutes: i32) -> Time {
        (self.starts_at + time::Duration::minutes(i64::from(duration_minutes))).time()
    }
}

/// Parses a `YYYY-MM-DD` date and 24-hour `HH:MM` time into a [`CanonicalSlot`]
/// anchored at the business's UTC offset. Only structural failures are
/// reported here; business rules belong to the evaluator.
pub fn normalize_slot(
    date_str: &str,
    time_str: &str,
    business_offset: UtcOffset,
) -> Result<CanonicalSlot, Rejection> {
    let date = Date::parse(date_str, DATE_FORMAT).map_err(|_| Rejection::InvalidDateFormat)?;
    if date.year() < 1000 {
        return Err(Rejection::InvalidDateFormat);
    }
    let start_time = Time::parse(time_str, TIME_FORMAT).map_err(|_| Rejection::InvalidTimeFormat)?;

    let starts_at = PrimitiveDateTime::new(date, start_time).assume_offset(business_offset);

    Ok(CanonicalSlot {
        date,
        start_time,
        weekday: date.weekday(),
        start_minutes: minutes_since_midnight(start_time),
        starts_at,
    })
}

/// Parses a bare `YYYY-MM-DD` query-string date (list endpoints).
pub fn parse_date(date_str: &str) -> Result<Date, Rejection> {
    let date = Date::parse(date_str, DATE_FORMAT).map_err(|_| Rejection::InvalidDateFormat)?;
    if date.year() < 1000 {
        return Err(Rejection::InvalidDateFormat);
    }
    Ok(date)
}

pub fn minutes_since_midnight(t: Time) -> i32 {
    i32::from(t.hour()) * 60 + i32::from(t.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, offset, time};

    #[test]
    fn normalizes_a_valid_slot() {
        let slot = normalize_slot("2023-03-07", "10:30", UtcOffset::UTC).unwrap();
        assert_eq!(slot.date, date!(2023 - 03 - 07));
        assert_eq!(slot.start_time, time!(10:30));
        assert_eq!(slot.weekday, Weekday::Tuesday);
        assert_eq!(slot.start_minutes, 630);
        assert_eq!(slot.starts_at.offset(), UtcOffset::UTC);
    }

    #[test]
    fn canonical_instant_uses_the_business_offset() {
        let slot = normalize_slot("2023-03-07", "10:30", offset!(-5)).unwrap();
        assert_eq!(slot.starts_at.offset(), offset!(-5));
        // Same wall-clock time, different instant than the UTC reading.
        let utc = normalize_slot("2023-03-07", "10:30", UtcOffset::UTC).unwrap();
        assert_eq!(slot.starts_at - utc.starts_at, time::Duration::hours(5));
    }

    #[test]
    fn normalization_is_idempotent() {
        let a = normalize_slot("2026-12-30", "12:00", UtcOffset::UTC).unwrap();
        let b = normalize_slot("2026-12-30", "12:00", UtcOffset::UTC).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn accepts_leap_day_in_leap_year() {
        assert!(normalize_slot("2024-02-29", "09:00", UtcOffset::UTC).is_ok());
    }

    #[test]
    fn rejects_leap_day_in_common_year() {
        assert_eq!(
            normalize_slot("2023-02-29", "09:00", UtcOffset::UTC),
            Err(Rejection::InvalidDateFormat)
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in [
            "2023/03/07",
            "89-01-01",
            "0999-01-01",
            "2023-13-01",
            "2023-00-10",
            "2023-04-31",
            "2023-3-07",
            "2023-03-07T00:00",
            "notadate",
            "",
        ] {
            assert_eq!(
                normalize_slot(bad, "10:00", UtcOffset::UTC),
                Err(Rejection::InvalidDateFormat),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["24:00", "10:60", "9:30", "10:5", "10-30", "10:30:00", ""] {
            assert_eq!(
                normalize_slot("2023-03-07", bad, UtcOffset::UTC),
                Err(Rejection::InvalidTimeFormat),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn midnight_and_end_of_day_are_structurally_valid() {
        assert_eq!(
            normalize_slot("2023-03-07", "00:00", UtcOffset::UTC)
                .unwrap()
                .start_minutes,
            0
        );
        assert_eq!(
            normalize_slot("2023-03-07", "23:59", UtcOffset::UTC)
                .unwrap()
                .start_minutes,
            1439
        );
    }

    #[test]
    fn end_time_adds_the_duration() {
        let slot = normalize_slot("2023-03-08", "09:30", UtcOffset::UTC).unwrap();
        assert_eq!(slot.end_time(30), time!(10:00));
        assert_eq!(slot.end_time(90), time!(11:00));
    }

    #[test]
    fn parse_date_applies_the_same_rules() {
        assert_eq!(parse_date("2023-03-07"), Ok(date!(2023 - 03 - 07)));
        assert_eq!(parse_date("0999-01-01"), Err(Rejection::InvalidDateFormat));
        assert_eq!(parse_date("2023-02-30"), Err(Rejection::InvalidDateFormat));
    }
}
