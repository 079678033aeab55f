/// An already-booked slot on the target date, reduced to the minutes the
/// overlap check needs. Only `booked` appointments are ever turned into
/// intervals; completed and cancelled rows do not occupy their slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedInterval {
    pub start_minutes: i32,
    pub duration_minutes: i32,
}

/// Half-open interval overlap: two slots conflict when each starts before
/// the other ends. Back-to-back slots therefore never conflict.
pub fn has_conflict(existing: &[BookedInterval], start_minutes: i32, duration_minutes: i32) -> bool {
    let requested_end = start_minutes + duration_minutes;
    existing.iter().any(|booked| {
        booked.start_minutes < requested_end
            && start_minutes < booked.start_minutes + booked.duration_minutes
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(start_minutes: i32, duration_minutes: i32) -> BookedInterval {
        BookedInterval {
            start_minutes,
            duration_minutes,
        }
    }

    #[test]
    fn no_bookings_means_no_conflict() {
        assert!(!has_conflict(&[], 720, 30));
    }

    #[test]
    fn identical_slots_conflict() {
        // Two requests for 12:00 with duration 30: the first books, the
        // second collides.
        let existing = [interval(720, 30)];
        assert!(has_conflict(&existing, 720, 30));
    }

    #[test]
    fn partial_overlaps_conflict_from_either_side() {
        let existing = [interval(720, 60)]; // 12:00-13:00
        assert!(has_conflict(&existing, 690, 60)); // 11:30-12:30
        assert!(has_conflict(&existing, 750, 60)); // 12:30-13:30
        assert!(has_conflict(&existing, 735, 15)); // fully inside
        assert!(has_conflict(&existing, 690, 120)); // fully covering
    }

    #[test]
    fn back_to_back_slots_do_not_conflict() {
        let existing = [interval(720, 30)]; // 12:00-12:30
        assert!(!has_conflict(&existing, 690, 30)); // ends at 12:00
        assert!(!has_conflict(&existing, 750, 30)); // starts at 12:30
    }

    #[test]
    fn non_overlapping_slots_on_the_same_date_both_fit() {
        let mut existing = Vec::new();
        assert!(!has_conflict(&existing, 600, 30));
        existing.push(interval(600, 30));
        assert!(!has_conflict(&existing, 660, 30));
        existing.push(interval(660, 30));
        // A third request overlapping either one is rejected.
        assert!(has_conflict(&existing, 615, 30));
        assert!(has_conflict(&existing, 660, 30));
    }

    #[test]
    fn scans_all_existing_bookings() {
        let existing = [interval(480, 30), interval(600, 60), interval(960, 30)];
        assert!(!has_conflict(&existing, 540, 30));
        assert!(has_conflict(&existing, 630, 30));
        assert!(has_conflict(&existing, 960, 15));
    }
}
