//! Scheduling predicates shared by the conflict rules

/// True unless one inclusive range ends strictly before the other begins.
pub fn dates_overlap<T: PartialOrd>(start1: T, end1: T, start2: T, end2: T) -> bool {
    !(end1 < start2 || end2 < start1)
}

/// Case-insensitive check for a fleet status of "maintenance".
pub fn is_in_maintenance(status: &str) -> bool {
    status.eq_ignore_ascii_case("maintenance")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        assert!(!dates_overlap(day(1), day(3), day(4), day(6)));
        assert!(!dates_overlap(day(4), day(6), day(1), day(3)));
    }

    #[test]
    fn test_touching_ranges_overlap() {
        assert!(dates_overlap(day(1), day(3), day(3), day(6)));
    }

    #[test]
    fn test_nested_and_partial_ranges_overlap() {
        assert!(dates_overlap(day(1), day(10), day(3), day(4)));
        assert!(dates_overlap(day(3), day(8), day(1), day(5)));
    }

    #[test]
    fn test_maintenance_status_ignores_case() {
        assert!(is_in_maintenance("Maintenance"));
        assert!(is_in_maintenance("MAINTENANCE"));
        assert!(!is_in_maintenance("Available"));
        assert!(!is_in_maintenance("In Maintenance"));
    }
}
