//! Time-slot interval math.
//!
//! All intervals are half-open: `[start, end)`. Back-to-back bookings where
//! one ends exactly when the next starts do not conflict.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Granularity of the available-slot walk.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// A half-open time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// `[s1, e1)` overlaps `[s2, e2)` iff `s1 < e2 && s2 < e1`.
pub fn overlaps(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

/// Free 30-minute slots inside `[window_start, window_end)` after removing
/// everything that overlaps one of the `busy` intervals.
pub fn free_slots(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    busy: &[(DateTime<Utc>, DateTime<Utc>)],
) -> Vec<SlotWindow> {
    let step = Duration::minutes(SLOT_STEP_MINUTES);
    let mut slots = Vec::new();
    let mut start = window_start;
    while start < window_end {
        let end = start + step;
        let blocked = busy.iter().any(|&(bs, be)| overlaps(start, end, bs, be));
        if !blocked {
            slots.push(SlotWindow {
                start_time: start,
                end_time: end,
            });
        }
        start = end;
    }
    slots
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, hour, min, 0).unwrap()
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (at(10, 0), at(15, 0), at(11, 0), at(13, 0)),
            (at(10, 0), at(12, 0), at(11, 0), at(14, 0)),
            (at(10, 0), at(12, 0), at(12, 0), at(14, 0)),
            (at(8, 0), at(9, 0), at(9, 30), at(10, 0)),
        ];
        for (s1, e1, s2, e2) in cases {
            assert_eq!(overlaps(s1, e1, s2, e2), overlaps(s2, e2, s1, e1));
        }
    }

    #[test]
    fn contained_interval_overlaps() {
        assert!(overlaps(at(11, 0), at(13, 0), at(10, 0), at(15, 0)));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!overlaps(at(10, 0), at(12, 0), at(12, 0), at(14, 0)));
        assert!(!overlaps(at(12, 0), at(14, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn identical_intervals_overlap() {
        assert!(overlaps(at(10, 0), at(12, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn free_slots_subtract_busy_windows() {
        // 09:00-12:00 working window, 10:00-11:00 busy.
        let slots = free_slots(at(9, 0), at(12, 0), &[(at(10, 0), at(11, 0))]);
        let starts: Vec<_> = slots.iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![at(9, 0), at(9, 30), at(11, 0), at(11, 30)]);
    }

    #[test]
    fn free_slots_empty_when_fully_booked() {
        let slots = free_slots(at(9, 0), at(11, 0), &[(at(8, 0), at(12, 0))]);
        assert!(slots.is_empty());
    }

    #[test]
    fn free_slots_full_window_when_no_bookings() {
        let slots = free_slots(at(9, 0), at(11, 0), &[]);
        assert_eq!(slots.len(), 4);
    }
}
