//! Calendar and wall-clock value types plus the pure interval arithmetic the
//! constraint engine and scheduler build on.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single calendar day. Wraps `chrono::NaiveDate` rather than reinventing
/// calendar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Monday = 0 .. Sunday = 6, matching the window's weekday classification.
    pub fn weekday_index(&self) -> u32 {
        self.0.weekday().num_days_from_monday()
    }

    pub fn is_weekday(&self) -> bool {
        !matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_friday(&self) -> bool {
        self.0.weekday() == Weekday::Fri
    }

    pub fn succ(&self) -> Self {
        Self(self.0.succ_opt().expect("calendar date overflow"))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A wall-clock time at one-minute resolution. Wraps `chrono::NaiveTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallClockTime(NaiveTime);

impl WallClockTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        Self(time)
    }

    pub fn naive(&self) -> NaiveTime {
        self.0
    }

    fn minutes_since_midnight(&self) -> i64 {
        i64::from(self.0.hour() * 60 + self.0.minute())
    }

    /// Adds `minutes` to this time. The result must stay within the same
    /// calendar day; the engine never schedules across midnight.
    pub fn add_minutes(&self, minutes: i64) -> Option<Self> {
        let total = self.minutes_since_midnight() + minutes;
        if !(0..24 * 60).contains(&total) {
            return None;
        }
        Self::from_hm((total / 60) as u32, (total % 60) as u32)
    }
}

impl fmt::Display for WallClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// A strictly positive span of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(u32);

impl Duration {
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes == 0 {
            None
        } else {
            Some(Self(minutes))
        }
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}

/// Half-open interval overlap: `a_start < b_end && b_start < a_end`.
pub fn overlaps(
    a_start: WallClockTime,
    a_end: WallClockTime,
    b_start: WallClockTime,
    b_end: WallClockTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Minutes between the end of one interval and the start of the next.
/// Returns 0 if the intervals overlap rather than a negative number.
pub fn gap_minutes(a_end: WallClockTime, b_start: WallClockTime) -> i64 {
    let a = a_end.minutes_since_midnight();
    let b = b_start.minutes_since_midnight();
    if b <= a {
        0
    } else {
        b - a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> WallClockTime {
        WallClockTime::from_hm(h, m).unwrap()
    }

    #[test]
    fn add_minutes_stays_within_day() {
        assert_eq!(t(9, 0).add_minutes(90), Some(t(10, 30)));
        assert_eq!(t(23, 45).add_minutes(30), None);
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(overlaps(t(9, 0), t(10, 0), t(9, 30), t(10, 30)));
        assert!(!overlaps(t(9, 0), t(10, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn gap_minutes_zero_when_overlapping() {
        assert_eq!(gap_minutes(t(10, 0), t(9, 30)), 0);
        assert_eq!(gap_minutes(t(10, 0), t(10, 15)), 15);
    }

    #[test]
    fn calendar_date_weekday_classification() {
        let monday = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        assert!(monday.is_weekday());
        assert_eq!(monday.weekday_index(), 0);
        let friday = CalendarDate::from_ymd(2024, 1, 19).unwrap();
        assert!(friday.is_friday());
        let saturday = CalendarDate::from_ymd(2024, 1, 20).unwrap();
        assert!(!saturday.is_weekday());
    }

    proptest::proptest! {
        /// `overlaps` must agree regardless of argument order (§8: the
        /// overlap check has no privileged side).
        #[test]
        fn prop_overlap_is_symmetric(
            a_start in 0u32..23, a_len in 1u32..120,
            b_start in 0u32..23, b_len in 1u32..120,
        ) {
            let a_start = t(a_start, 0);
            let a_end = a_start.add_minutes(a_len as i64).unwrap_or(a_start);
            let b_start = t(b_start, 0);
            let b_end = b_start.add_minutes(b_len as i64).unwrap_or(b_start);

            proptest::prop_assert_eq!(
                overlaps(a_start, a_end, b_start, b_end),
                overlaps(b_start, b_end, a_start, a_end)
            );
        }

        /// `gap_minutes` is never negative and is zero exactly when the
        /// intervals overlap or touch (§8: consecutive ranges on a shared
        /// room must show a non-negative gap).
        #[test]
        fn prop_gap_minutes_nonnegative_and_zero_on_overlap(
            a_end_h in 0u32..23, a_end_m in 0u32..59,
            b_start_h in 0u32..23, b_start_m in 0u32..59,
        ) {
            let a_end = t(a_end_h, a_end_m);
            let b_start = t(b_start_h, b_start_m);
            let gap = gap_minutes(a_end, b_start);

            proptest::prop_assert!(gap >= 0);
            if b_start <= a_end {
                proptest::prop_assert_eq!(gap, 0);
            }
        }
    }
}
