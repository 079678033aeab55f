use std::collections::BTreeMap;

use anyhow::{ensure, Result};
use time::{Date, Time, Weekday};

/// The span of the day during which appointments may be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingWindow {
    pub opens_at: Time,
    pub closes_at: Time,
}

/// A mid-day pause nested inside the operating window; no appointment may
/// overlap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunchBreak {
    pub starts_at: Time,
    pub ends_at: Time,
}

/// One weekday's configuration as loaded from persistence. Weekdays are
/// numbered 0–6 with Sunday = 0, matching the stored representation.
#[derive(Debug, Clone)]
pub struct WeekdayHours {
    pub weekday: u8,
    pub window: OperatingWindow,
    pub lunch: Option<LunchBreak>,
}

#[derive(Debug, Clone)]
struct DaySchedule {
    window: OperatingWindow,
    lunch: Option<LunchBreak>,
}

/// Immutable weekly calendar, loaded once at startup and shared read-only
/// across all concurrent evaluations. A weekday with no entry is closed
/// all day.
#[derive(Debug, Clone, Default)]
pub struct CalendarSnapshot {
    days: [Option<DaySchedule>; 7],
}

impl CalendarSnapshot {
    pub fn from_hours(hours: Vec<WeekdayHours>) -> Result<Self> {
        let mut days: [Option<DaySchedule>; 7] = Default::default();
        for entry in hours {
            ensure!(
                entry.weekday <= 6,
                "business hours weekday {} out of range 0-6",
                entry.weekday
            );
            let window = entry.window;
            ensure!(
                window.opens_at < window.closes_at,
                "business hours for weekday {} open at {} but close at {}",
                entry.weekday,
                window.opens_at,
                window.closes_at
            );
            if let Some(lunch) = entry.lunch {
                ensure!(
                    lunch.starts_at < lunch.ends_at
                        && window.opens_at <= lunch.starts_at
                        && lunch.ends_at <= window.closes_at,
                    "lunch break for weekday {} does not fit inside the operating window",
                    entry.weekday
                );
            }
            let day = &mut days[entry.weekday as usize];
            ensure!(
                day.is_none(),
                "duplicate business hours for weekday {}",
                entry.weekday
            );
            *day = Some(DaySchedule {
                window,
                lunch: entry.lunch,
            });
        }
        Ok(Self { days })
    }

    pub fn window_for(&self, weekday: Weekday) -> Option<&OperatingWindow> {
        self.days[Self::index(weekday)]
            .as_ref()
            .map(|day| &day.window)
    }

    pub fn lunch_for(&self, weekday: Weekday) -> Option<&LunchBreak> {
        self.days[Self::index(weekday)]
            .as_ref()
            .and_then(|day| day.lunch.as_ref())
    }

    fn index(weekday: Weekday) -> usize {
        weekday.number_days_from_sunday() as usize
    }
}

/// Explicitly blocked calendar dates (holidays and the like). A date present
/// here is fully unavailable regardless of the operating window.
#[derive(Debug, Clone, Default)]
pub struct BlockedDates {
    dates: BTreeMap<Date, String>,
}

impl BlockedDates {
    pub fn from_entries(entries: impl IntoIterator<Item = (Date, String)>) -> Self {
        Self {
            dates: entries.into_iter().collect(),
        }
    }

    pub fn reason_for(&self, date: Date) -> Option<&str> {
        self.dates.get(&date).map(String::as_str)
    }

    pub fn is_blocked(&self, date: Date) -> bool {
        self.dates.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn hours(weekday: u8, opens: Time, closes: Time) -> WeekdayHours {
        WeekdayHours {
            weekday,
            window: OperatingWindow {
                opens_at: opens,
                closes_at: closes,
            },
            lunch: None,
        }
    }

    #[test]
    fn looks_up_windows_by_weekday() {
        let snapshot = CalendarSnapshot::from_hours(vec![
            hours(1, time!(08:00), time!(17:00)),
            hours(2, time!(09:00), time!(18:00)),
        ])
        .unwrap();

        let monday = snapshot.window_for(Weekday::Monday).unwrap();
        assert_eq!(monday.opens_at, time!(08:00));
        let tuesday = snapshot.window_for(Weekday::Tuesday).unwrap();
        assert_eq!(tuesday.closes_at, time!(18:00));
        assert!(snapshot.window_for(Weekday::Sunday).is_none());
    }

    #[test]
    fn lunch_is_optional_per_weekday() {
        let mut monday = hours(1, time!(08:00), time!(17:00));
        monday.lunch = Some(LunchBreak {
            starts_at: time!(12:00),
            ends_at: time!(13:00),
        });
        let snapshot =
            CalendarSnapshot::from_hours(vec![monday, hours(2, time!(08:00), time!(17:00))])
                .unwrap();

        assert!(snapshot.lunch_for(Weekday::Monday).is_some());
        assert!(snapshot.lunch_for(Weekday::Tuesday).is_none());
        assert!(snapshot.lunch_for(Weekday::Wednesday).is_none());
    }

    #[test]
    fn rejects_inverted_windows() {
        let result = CalendarSnapshot::from_hours(vec![hours(1, time!(17:00), time!(08:00))]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_lunch_outside_the_window() {
        let mut monday = hours(1, time!(08:00), time!(17:00));
        monday.lunch = Some(LunchBreak {
            starts_at: time!(07:00),
            ends_at: time!(08:30),
        });
        assert!(CalendarSnapshot::from_hours(vec![monday]).is_err());
    }

    #[test]
    fn rejects_out_of_range_and_duplicate_weekdays() {
        assert!(CalendarSnapshot::from_hours(vec![hours(7, time!(08:00), time!(17:00))]).is_err());
        assert!(CalendarSnapshot::from_hours(vec![
            hours(1, time!(08:00), time!(17:00)),
            hours(1, time!(09:00), time!(18:00)),
        ])
        .is_err());
    }

    #[test]
    fn blocked_dates_report_their_reason() {
        let blocked = BlockedDates::from_entries(vec![(
            date!(2023 - 03 - 10),
            "public holiday".to_string(),
        )]);
        assert!(blocked.is_blocked(date!(2023 - 03 - 10)));
        assert_eq!(
            blocked.reason_for(date!(2023 - 03 - 10)),
            Some("public holiday")
        );
        assert!(!blocked.is_blocked(date!(2023 - 03 - 11)));
        assert_eq!(blocked.len(), 1);
    }
}
