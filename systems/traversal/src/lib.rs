#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic traversal system that plans the chomper's route.
//!
//! The route visits every active calendar cell in column-major order. Dots
//! are then "eaten" by replaying the route against every active record and
//! marking each record that lies within [`CONSUMPTION_TOLERANCE`] of a route
//! point. Both steps work in path space, which is independent from the
//! decoration grid used by the rendering adapters.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use contrib_maze_core::{ContributionRecord, GridCoord, Score};
use glam::Vec2;

/// Pixel position of calendar cell `(0, 0)` before centering.
pub const PATH_ORIGIN: Vec2 = Vec2::new(50.0, 50.0);

/// Distance in pixels between neighbouring cells in path space.
pub const PATH_PITCH: f32 = 12.0;

/// Offset from a cell's corner to its center in path space.
pub const PATH_CENTER_OFFSET: f32 = 5.0;

/// Distance below which a route point eats a dot.
pub const CONSUMPTION_TOLERANCE: f32 = 15.0;

/// Converts a calendar cell into its path-space pixel center.
#[must_use]
pub fn path_position(cell: GridCoord) -> Vec2 {
    PATH_ORIGIN
        + Vec2::new(cell.column() as f32, cell.row() as f32) * PATH_PITCH
        + Vec2::splat(PATH_CENTER_OFFSET)
}

/// Single stop on the chomper's route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraversalPoint {
    /// Path-space pixel position.
    pub position: Vec2,
    /// Calendar cell the stop originates from.
    pub cell: GridCoord,
    /// Index of the originating record in the normalized record list.
    pub record: usize,
    /// Date of the originating record.
    pub timestamp: NaiveDate,
}

/// Ordered route through every active record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TraversalPath {
    points: Vec<TraversalPoint>,
}

impl TraversalPath {
    /// Route stops in travel order.
    #[must_use]
    pub fn points(&self) -> &[TraversalPoint] {
        &self.points
    }

    /// Number of stops on the route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Reports whether the calendar had no active record to visit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Route positions translated by a constant offset.
    pub fn positions_offset_by(&self, offset: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().map(move |point| point.position + offset)
    }
}

/// Plans the route through the active records.
///
/// Records with a zero count are skipped. The remaining records are sorted by
/// `(x, y)` with a stable sort, so callers may pass records in any order.
#[must_use]
pub fn plan_path(records: &[ContributionRecord]) -> TraversalPath {
    let mut active: Vec<(usize, &ContributionRecord)> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_active())
        .collect();
    active.sort_by_key(|(_, record)| (record.x(), record.y()));

    let points = active
        .into_iter()
        .map(|(index, record)| TraversalPoint {
            position: path_position(record.cell()),
            cell: record.cell(),
            record: index,
            timestamp: record.date(),
        })
        .collect();

    TraversalPath { points }
}

/// Indices of records eaten along a route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsumedSet {
    indices: BTreeSet<usize>,
}

impl ConsumedSet {
    /// Reports whether the record at `index` was eaten.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Number of eaten records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Reports whether nothing was eaten.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Eaten record indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

/// Replays the route and collects every active record it passes.
///
/// A record is eaten when its own path-space position lies strictly closer
/// than [`CONSUMPTION_TOLERANCE`] to any route point. The result is a set, so
/// discovery order does not matter and repeated runs agree.
#[must_use]
pub fn simulate_consumption(path: &TraversalPath, records: &[ContributionRecord]) -> ConsumedSet {
    let mut indices = BTreeSet::new();

    for point in path.points() {
        for (index, record) in records.iter().enumerate() {
            if !record.is_active() {
                continue;
            }
            let position = path_position(record.cell());
            if point.position.distance(position) < CONSUMPTION_TOLERANCE {
                let _ = indices.insert(index);
            }
        }
    }

    ConsumedSet { indices }
}

/// Route and eaten dots computed together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TraversalPlan {
    /// Route through the active records.
    pub path: TraversalPath,
    /// Records eaten along the route.
    pub consumed: ConsumedSet,
}

impl TraversalPlan {
    /// Plans the route and replays it against the same records.
    #[must_use]
    pub fn compute(records: &[ContributionRecord]) -> Self {
        let path = plan_path(records);
        let consumed = simulate_consumption(&path, records);
        Self { path, consumed }
    }

    /// Scoreboard values earned by the eaten dots.
    #[must_use]
    pub fn score(&self) -> Score {
        Score::from_consumed(self.consumed.len())
    }
}
