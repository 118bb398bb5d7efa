//! Synthetic calendars for previews and offline runs.
//!
//! Every day first draws whether it is active and then, for active days, a
//! geometric count so that most days carry a handful of contributions and
//! a few carry many.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Geometric};

use crate::{CalendarError, RawCalendar, RawDay, RawWeek};

/// Success probability of the geometric count distribution.
const COUNT_SUCCESS_PROBABILITY: f64 = 0.2;

/// Upper bound applied to generated counts.
const MAX_MOCK_COUNT: u64 = 40;

/// Weeks in a full contribution year.
pub const DEFAULT_MOCK_WEEKS: u32 = 53;

/// Probability that a generated day is active.
pub const DEFAULT_ACTIVITY: f64 = 0.6;

/// Parameters describing the calendar to synthesise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MockCalendarSpec {
    /// Number of full weeks to generate.
    pub weeks: u32,
    /// Date of the first day; callers usually pass a Sunday.
    pub start: NaiveDate,
    /// Probability in `0.0..=1.0` that a day has any activity.
    pub activity: f64,
}

impl MockCalendarSpec {
    /// Creates a spec using [`DEFAULT_ACTIVITY`].
    #[must_use]
    pub const fn new(weeks: u32, start: NaiveDate) -> Self {
        Self {
            weeks,
            start,
            activity: DEFAULT_ACTIVITY,
        }
    }
}

/// Generates a calendar of full weeks using the provided random source.
///
/// The output is deterministic for a deterministic `rng`.
pub fn generate<R>(rng: &mut R, spec: &MockCalendarSpec) -> Result<RawCalendar, CalendarError>
where
    R: Rng + ?Sized,
{
    let active = Bernoulli::new(spec.activity)
        .map_err(|error| CalendarError::MockParameters(error.to_string()))?;
    let extra = Geometric::new(COUNT_SUCCESS_PROBABILITY)
        .map_err(|error| CalendarError::MockParameters(error.to_string()))?;

    let mut weeks = Vec::with_capacity(spec.weeks as usize);
    let mut total = 0_u64;
    for week in 0..spec.weeks {
        let mut days = Vec::with_capacity(7);
        for weekday in 0..7_u8 {
            let offset = u64::from(week) * 7 + u64::from(weekday);
            let date = spec
                .start
                .checked_add_days(Days::new(offset))
                .ok_or(CalendarError::DateOutOfRange)?;
            let count = if active.sample(rng) {
                (1 + extra.sample(rng)).min(MAX_MOCK_COUNT)
            } else {
                0
            };
            total += count;
            days.push(RawDay {
                contribution_count: count as i64,
                date,
                weekday: Some(weekday),
                color: None,
            });
        }
        weeks.push(RawWeek {
            contribution_days: days,
        });
    }

    Ok(RawCalendar {
        total_contributions: Some(total),
        weeks,
    })
}
