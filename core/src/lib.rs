#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the contribution maze generator.
//!
//! This crate defines the data model that connects the pure systems and the
//! adapters. The calendar system produces [`ContributionRecord`] values and a
//! [`CalendarSummary`], the traversal system plans a path through those
//! records, and the rendering adapters turn everything into a scene using an
//! immutable [`RenderConfig`]. Nothing in this crate performs I/O or logs.

mod config;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::{
    AnimationSpeed, ConfigFallback, FallbackReason, MazeComplexity, Palette, RenderConfig,
    RenderOptions, ResolvedConfig, Theme, MAX_GHOSTS,
};

/// Number of day rows contained in a single calendar week.
pub const DAYS_PER_WEEK: u32 = 7;

/// Bucketed intensity class derived from a raw contribution count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContributionLevel(u8);

impl ContributionLevel {
    /// Highest level a record can reach.
    pub const MAX: Self = Self(4);

    /// Buckets a raw count: 0 maps to 0, 1–3 to 1, 4–6 to 2, 7–9 to 3 and
    /// anything from 10 upwards to 4.
    #[must_use]
    pub const fn from_count(count: u32) -> Self {
        let level = match count {
            0 => 0,
            1..=3 => 1,
            4..=6 => 2,
            7..=9 => 3,
            _ => 4,
        };
        Self(level)
    }

    /// Retrieves the numeric representation of the level.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Location of a calendar cell expressed as week column and weekday row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    column: u32,
    row: u32,
}

impl GridCoord {
    /// Creates a new calendar cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based week offset from the start of the calendar.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based day-of-week offset inside the week.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Single normalized calendar day.
///
/// Records are created by the calendar system and never mutated afterwards,
/// so every field is read through an accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContributionRecord {
    date: NaiveDate,
    count: u32,
    level: ContributionLevel,
    cell: GridCoord,
    color: Option<String>,
}

impl ContributionRecord {
    /// Creates a record, deriving its level from `count`.
    #[must_use]
    pub fn new(date: NaiveDate, count: u32, cell: GridCoord, color: Option<String>) -> Self {
        Self {
            date,
            count,
            level: ContributionLevel::from_count(count),
            cell,
            color,
        }
    }

    /// Calendar date of the record.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Raw activity count for the date.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Intensity bucket derived from the count.
    #[must_use]
    pub const fn level(&self) -> ContributionLevel {
        self.level
    }

    /// Calendar cell occupied by the record.
    #[must_use]
    pub const fn cell(&self) -> GridCoord {
        self.cell
    }

    /// Week column of the record, the `x` axis of the calendar.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.cell.column()
    }

    /// Weekday row of the record, the `y` axis of the calendar.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.cell.row()
    }

    /// Display color suggested by the source, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Reports whether the day carries any activity.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Aggregate statistics folded over a normalized calendar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalendarSummary {
    /// Sum of every record's count.
    pub total_contributions: u64,
    /// Largest single-day count, zero for empty or inactive calendars.
    pub max_count: u32,
    /// Number of week columns that were normalized.
    pub week_count: u32,
}

impl CalendarSummary {
    /// Folds the summary over the provided records.
    #[must_use]
    pub fn from_records(records: &[ContributionRecord], week_count: u32) -> Self {
        records.iter().fold(
            Self {
                total_contributions: 0,
                max_count: 0,
                week_count,
            },
            |summary, record| Self {
                total_contributions: summary.total_contributions + u64::from(record.count()),
                max_count: summary.max_count.max(record.count()),
                week_count,
            },
        )
    }
}

/// Normalized calendar produced by the calendar system.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedCalendar {
    records: Vec<ContributionRecord>,
    summary: CalendarSummary,
}

impl NormalizedCalendar {
    /// Bundles records with their summary.
    #[must_use]
    pub fn new(records: Vec<ContributionRecord>, summary: CalendarSummary) -> Self {
        Self { records, summary }
    }

    /// Records in week-major, day-minor order.
    #[must_use]
    pub fn records(&self) -> &[ContributionRecord] {
        &self.records
    }

    /// Summary statistics for the records.
    #[must_use]
    pub const fn summary(&self) -> &CalendarSummary {
        &self.summary
    }
}

/// Identity of the user whose calendar is rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl PlayerInfo {
    /// Creates player info for the provided handle.
    pub fn new(login: impl Into<String>) -> Result<Self, PlayerInfoError> {
        let login = login.into();
        if login.trim().is_empty() {
            return Err(PlayerInfoError::EmptyLogin);
        }
        Ok(Self {
            login,
            name: None,
            avatar_url: None,
        })
    }

    /// Attaches a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Re-checks the handle of a value obtained through deserialization.
    pub fn validate(self) -> Result<Self, PlayerInfoError> {
        if self.login.trim().is_empty() {
            return Err(PlayerInfoError::EmptyLogin);
        }
        Ok(self)
    }

    /// Handle of the user.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Optional display name of the user.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Optional avatar location of the user.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Name shown on the scoreboard: the display name when set, else the handle.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }
}

/// Errors raised when constructing [`PlayerInfo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlayerInfoError {
    /// The handle was empty or whitespace.
    #[error("player login must not be empty")]
    EmptyLogin,
}

/// Points and level displayed on the scoreboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Score {
    points: u64,
    level: u64,
}

impl Score {
    /// Points awarded for every eaten dot.
    pub const POINTS_PER_DOT: u64 = 10;

    /// Number of eaten dots required to advance one level.
    pub const DOTS_PER_LEVEL: u64 = 50;

    /// Derives the score from the number of consumed records.
    #[must_use]
    pub fn from_consumed(consumed: usize) -> Self {
        let consumed = consumed as u64;
        Self {
            points: consumed * Self::POINTS_PER_DOT,
            level: consumed / Self::DOTS_PER_LEVEL + 1,
        }
    }

    /// Total points.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    /// One-based level.
    #[must_use]
    pub const fn level(&self) -> u64 {
        self.level
    }
}
