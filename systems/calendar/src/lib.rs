#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure calendar system that normalizes raw contribution calendars.
//!
//! The normalizer walks weeks in order (the week index becomes the record's
//! column) and days within each week (the day index, or the reported weekday
//! for partial edge weeks, becomes the row). Contract violations such as
//! negative counts are rejected instead of being coerced.

mod document;
pub mod mock;

use contrib_maze_core::{
    CalendarSummary, ContributionRecord, GridCoord, NormalizedCalendar, DAYS_PER_WEEK,
};
use thiserror::Error;

pub use document::{RawCalendar, RawDay, RawWeek};

/// Normalizes a calendar using the strict full-week policy.
pub fn normalize(calendar: &RawCalendar) -> Result<NormalizedCalendar, CalendarError> {
    Normalizer::strict().normalize(calendar)
}

/// How weeks with fewer than seven days are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum EdgeWeekPolicy {
    /// Every week must contain exactly seven days.
    #[default]
    Strict,
    /// The first and last week may contain between one and seven days.
    AllowPartial,
}

/// Converts raw calendars into leveled, coordinate-tagged records.
#[derive(Clone, Copy, Debug, Default)]
pub struct Normalizer {
    edge_weeks: EdgeWeekPolicy,
}

impl Normalizer {
    /// Creates a normalizer that requires seven days in every week.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            edge_weeks: EdgeWeekPolicy::Strict,
        }
    }

    /// Creates a normalizer that tolerates partial first and last weeks.
    ///
    /// Rows of such weeks are taken from each day's reported weekday so that
    /// a week starting mid-way still lands on the correct calendar rows.
    #[must_use]
    pub const fn with_partial_edge_weeks() -> Self {
        Self {
            edge_weeks: EdgeWeekPolicy::AllowPartial,
        }
    }

    /// Normalizes the calendar, producing records in week-major order.
    ///
    /// Either every day is accepted or an error describing the first
    /// violation is returned; no partial output is produced.
    pub fn normalize(&self, calendar: &RawCalendar) -> Result<NormalizedCalendar, CalendarError> {
        let week_total = calendar.weeks.len();
        let week_count = u32::try_from(week_total)
            .map_err(|_| CalendarError::TooManyWeeks { weeks: week_total })?;
        let mut records = Vec::with_capacity(week_total * DAYS_PER_WEEK as usize);

        for (week_index, week) in calendar.weeks.iter().enumerate() {
            let is_edge = week_index == 0 || week_index + 1 == week_total;
            self.check_day_count(week_index, week.contribution_days.len(), is_edge)?;

            let column = week_index as u32;
            let mut previous_row: Option<u32> = None;
            for (day_index, day) in week.contribution_days.iter().enumerate() {
                let count = checked_count(week_index, day_index, day.contribution_count)?;
                let row = self.resolve_row(week_index, day_index, day)?;
                if previous_row.is_some_and(|previous| row <= previous) {
                    return Err(CalendarError::DaysOutOfOrder {
                        week: week_index,
                        day: day_index,
                        row,
                    });
                }
                previous_row = Some(row);

                records.push(ContributionRecord::new(
                    day.date,
                    count,
                    GridCoord::new(column, row),
                    day.color.clone(),
                ));
            }
        }

        let summary = CalendarSummary::from_records(&records, week_count);
        Ok(NormalizedCalendar::new(records, summary))
    }

    fn check_day_count(
        &self,
        week: usize,
        days: usize,
        is_edge: bool,
    ) -> Result<(), CalendarError> {
        let full_week = DAYS_PER_WEEK as usize;
        let accepted = match self.edge_weeks {
            EdgeWeekPolicy::AllowPartial if is_edge => (1..=full_week).contains(&days),
            _ => days == full_week,
        };
        if accepted {
            Ok(())
        } else {
            Err(CalendarError::WrongDayCount { week, days })
        }
    }

    fn resolve_row(&self, week: usize, day: usize, raw: &RawDay) -> Result<u32, CalendarError> {
        let row = match (self.edge_weeks, raw.weekday) {
            (EdgeWeekPolicy::AllowPartial, Some(weekday)) => u32::from(weekday),
            _ => day as u32,
        };
        if row >= DAYS_PER_WEEK {
            return Err(CalendarError::InvalidWeekday { week, day, row });
        }
        Ok(row)
    }
}

fn checked_count(week: usize, day: usize, count: i64) -> Result<u32, CalendarError> {
    if count < 0 {
        return Err(CalendarError::NegativeCount { week, day, count });
    }
    u32::try_from(count).map_err(|_| CalendarError::CountOverflow { week, day, count })
}

/// Errors raised while reading or normalizing a calendar.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// A day reported a negative contribution count.
    #[error("week {week}, day {day}: contribution count {count} is negative")]
    NegativeCount {
        /// Zero-based week index.
        week: usize,
        /// Zero-based day index inside the week.
        day: usize,
        /// Offending count.
        count: i64,
    },
    /// A day reported a count that does not fit the record representation.
    #[error("week {week}, day {day}: contribution count {count} is too large")]
    CountOverflow {
        /// Zero-based week index.
        week: usize,
        /// Zero-based day index inside the week.
        day: usize,
        /// Offending count.
        count: i64,
    },
    /// A week did not contain the required number of days.
    #[error("week {week} contains {days} days")]
    WrongDayCount {
        /// Zero-based week index.
        week: usize,
        /// Number of days found.
        days: usize,
    },
    /// A day resolved to a row outside the week.
    #[error("week {week}, day {day}: weekday {row} is outside 0..=6")]
    InvalidWeekday {
        /// Zero-based week index.
        week: usize,
        /// Zero-based day index inside the week.
        day: usize,
        /// Offending row.
        row: u32,
    },
    /// Days of a week were not listed in ascending weekday order.
    #[error("week {week}, day {day}: weekday {row} is not after the previous day")]
    DaysOutOfOrder {
        /// Zero-based week index.
        week: usize,
        /// Zero-based day index inside the week.
        day: usize,
        /// Offending row.
        row: u32,
    },
    /// The calendar holds more weeks than a column index can address.
    #[error("calendar contains {weeks} weeks")]
    TooManyWeeks {
        /// Number of weeks found.
        weeks: usize,
    },
    /// The document could not be parsed as JSON.
    #[error("calendar document is not valid: {0}")]
    Json(#[from] serde_json::Error),
    /// The API response did not contain a user.
    #[error("calendar response does not contain a user{}", format_api_errors(.0))]
    MissingUser(Vec<String>),
    /// Mock generation parameters were rejected.
    #[error("invalid mock calendar parameters: {0}")]
    MockParameters(String),
    /// A generated date fell outside the supported calendar range.
    #[error("mock calendar date is out of range")]
    DateOutOfRange,
}

fn format_api_errors(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join("; "))
    }
}
