use chrono::NaiveTime;
use serde::Serialize;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::LazyLock,
};

/// One fixed 55-minute teaching period from the daily schedule, treated as a
/// closed-open interval `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

impl Period {
    /// Strict open overlap test. A range that only touches a period boundary
    /// does not cover that period.
    pub fn overlaps(&self, from: NaiveTime, to: NaiveTime) -> bool {
        self.from < to && self.to > from
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} to {}",
            self.from.format("%I:%M %p"),
            self.to.format("%I:%M %p")
        )
    }
}

// Hour/minute boundaries of the eight daily periods. The 5-minute breaks
// between periods belong to no period.
const PERIOD_BOUNDS: [((u32, u32), (u32, u32)); 8] = [
    ((9, 15), (10, 10)),
    ((10, 15), (11, 10)),
    ((11, 15), (12, 10)),
    ((12, 15), (13, 10)),
    ((13, 15), (14, 10)),
    ((14, 15), (15, 10)),
    ((15, 15), (16, 10)),
    ((16, 15), (17, 10)),
];

/// The institution's daily schedule, in chronological order.
pub static DAILY_PERIODS: LazyLock<[Period; 8]> = LazyLock::new(|| {
    PERIOD_BOUNDS.map(|((from_h, from_m), (to_h, to_m))| Period {
        from: NaiveTime::from_hms_opt(from_h, from_m, 0).unwrap(),
        to: NaiveTime::from_hms_opt(to_h, to_m, 0).unwrap(),
    })
});

/// Parses a wall-clock time in either 12-hour ("09:15 AM") or 24-hour
/// ("09:15") form. The published schedule uses the 12-hour form.
pub fn parse_clock_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();

    NaiveTime::parse_from_str(input, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .ok()
}

/// Returns the schedule periods a `[from, to)` range covers, in schedule
/// order. The returned boundaries are the periods' own, not the caller's.
pub fn overlapping_periods(from: NaiveTime, to: NaiveTime) -> Vec<Period> {
    if from >= to {
        return Vec::new();
    }

    DAILY_PERIODS
        .iter()
        .filter(|period| period.overlaps(from, to))
        .copied()
        .collect()
}

/// Counts the schedule periods a `[from, to)` range covers. An inverted or
/// empty range covers none.
pub fn count_overlapping_periods(from: NaiveTime, to: NaiveTime) -> usize {
    overlapping_periods(from, to).len()
}
