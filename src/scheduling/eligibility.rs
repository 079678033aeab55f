use time::{Duration, OffsetDateTime};

use super::calendar::{BlockedDates, CalendarSnapshot};
use super::rejection::Rejection;
use super::slot::{minutes_since_midnight, CanonicalSlot};

/// Fixed booking policy: slot alignment and how far ahead a booking must be.
#[derive(Debug, Clone, Copy)]
pub struct BookingPolicy {
    pub slot_granularity_minutes: i32,
    pub min_lead_time_minutes: i64,
}

/// Runs the ordered eligibility rules for a normalized slot. Pure: reads only
/// the injected snapshots and the supplied clock value, and short-circuits on
/// the first failing rule.
///
/// The order is load-bearing: later rules presuppose earlier ones (checking
/// the lunch break is meaningless on a day the shop never opens), so a slot
/// can only ever produce the rejection of its earliest violated rule.
pub struct EligibilityEvaluator<'a> {
    calendar: &'a CalendarSnapshot,
    blocked: &'a BlockedDates,
    policy: &'a BookingPolicy,
}

impl<'a> EligibilityEvaluator<'a> {
    pub fn new(
        calendar: &'a CalendarSnapshot,
        blocked: &'a BlockedDates,
        policy: &'a BookingPolicy,
    ) -> Self {
        Self {
            calendar,
            blocked,
            policy,
        }
    }

    pub fn evaluate(
        &self,
        slot: &CanonicalSlot,
        duration_minutes: i32,
        now: OffsetDateTime,
    ) -> Result<(), Rejection> {
        // Rule 1: strictly in the future.
        if slot.starts_at <= now {
            return Err(Rejection::NotInFuture {
                lead_minutes: self.policy.min_lead_time_minutes,
            });
        }

        // Rule 2: minimum lead time. Shares the NotInFuture category so the
        // caller sees one "future" message for both.
        if slot.starts_at - now < Duration::minutes(self.policy.min_lead_time_minutes) {
            return Err(Rejection::NotInFuture {
                lead_minutes: self.policy.min_lead_time_minutes,
            });
        }

        // Rule 3: blocked date.
        if let Some(reason) = self.blocked.reason_for(slot.date) {
            return Err(Rejection::DateUnavailable {
                date: slot.date,
                reason: reason.to_string(),
            });
        }

        // Rule 4: the shop must be open for the whole slot. A start exactly
        // at opening is allowed, as is one ending exactly at closing.
        let Some(window) = self.calendar.window_for(slot.weekday) else {
            return Err(Rejection::ShopClosed {
                weekday: slot.weekday,
                opens_at: None,
            });
        };
        let opens = minutes_since_midnight(window.opens_at);
        let closes = minutes_since_midnight(window.closes_at);
        if slot.start_minutes < opens {
            return Err(Rejection::ShopClosed {
                weekday: slot.weekday,
                opens_at: Some(window.opens_at),
            });
        }
        if slot.start_minutes > closes - duration_minutes {
            return Err(Rejection::ShopClosing {
                closes_at: window.closes_at,
            });
        }

        // Rule 5: lunch break, half-open on both sides: ending exactly when
        // lunch starts or starting exactly when it ends is allowed.
        if let Some(lunch) = self.calendar.lunch_for(slot.weekday) {
            let lunch_start = minutes_since_midnight(lunch.starts_at);
            let lunch_end = minutes_since_midnight(lunch.ends_at);
            let slot_end = slot.start_minutes + duration_minutes;
            if slot.start_minutes < lunch_end && lunch_start < slot_end {
                return Err(Rejection::DuringLunch {
                    starts_at: lunch.starts_at,
                    ends_at: lunch.ends_at,
                });
            }
        }

        // Rule 6: granularity alignment, measured from midnight.
        if slot.start_minutes % self.policy.slot_granularity_minutes != 0 {
            return Err(Rejection::InvalidGranularity {
                granularity_minutes: self.policy.slot_granularity_minutes,
            });
        }

        Ok(())
    }
}
