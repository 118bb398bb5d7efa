#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for contribution maze adapters.
//!
//! [`compose_scene`] turns a normalized calendar into a declarative [`Scene`]:
//! canvas size, decorative walls, dots, power pellets, the chomper, its
//! ghosts and the optional scoreboard. Backends implementing
//! [`RenderingBackend`] serialise the scene into a concrete document format.

mod walls;

use anyhow::Result as AnyResult;
use contrib_maze_core::{
    ContributionLevel, ContributionRecord, GridCoord, NormalizedCalendar, Palette, PlayerInfo,
    RenderConfig, Score, DAYS_PER_WEEK,
};
use contrib_maze_system_traversal::{TraversalPath, TraversalPlan};
use glam::Vec2;

pub use walls::{NoWalls, RandomWalls, WallSampler};

/// Side length of a calendar cell in decoration space.
pub const CELL_SIZE: f32 = 10.0;

/// Gap between neighbouring calendar cells in decoration space.
pub const CELL_GUTTER: f32 = 2.0;

/// Pixel position of the top-left calendar cell in decoration space.
pub const GRID_ORIGIN: Vec2 = Vec2::new(50.0, 50.0);

/// Seconds the chomper spends on each route stop at normal speed.
pub const SECONDS_PER_STOP: f32 = 0.2;

/// Seconds between the staggered fade-outs of consecutive eaten dots.
pub const FADE_STAGGER_SECONDS: f32 = 0.1;

/// Duration of a single dot fade-out.
pub const FADE_DURATION_SECONDS: f32 = 0.3;

/// Fixed canvas dimensions derived from the calendar width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Narrowest canvas ever produced.
    pub const MIN_WIDTH: u32 = 800;

    /// Height shared by every canvas.
    pub const HEIGHT: u32 = 400;

    /// Horizontal pixels reserved per calendar week.
    pub const WIDTH_PER_WEEK: u32 = 12;

    /// Horizontal padding added around the calendar.
    pub const HORIZONTAL_MARGIN: u32 = 100;

    /// Sizes the canvas for a calendar spanning `weeks` columns.
    #[must_use]
    pub fn for_weeks(weeks: u32) -> Self {
        let needed = weeks
            .saturating_mul(Self::WIDTH_PER_WEEK)
            .saturating_add(Self::HORIZONTAL_MARGIN);
        Self {
            width: needed.max(Self::MIN_WIDTH),
            height: Self::HEIGHT,
        }
    }
}

/// Converts a calendar cell into the top-left corner of its decoration square.
#[must_use]
pub fn cell_corner(cell: GridCoord) -> Vec2 {
    GRID_ORIGIN + Vec2::new(cell.column() as f32, cell.row() as f32) * (CELL_SIZE + CELL_GUTTER)
}

/// Converts a calendar cell into the center of its decoration square.
#[must_use]
pub fn cell_center(cell: GridCoord) -> Vec2 {
    cell_corner(cell) + Vec2::splat(CELL_SIZE / 2.0)
}

/// Translucent wall square drawn behind the dots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallPresentation {
    /// Calendar cell covered by the wall.
    pub cell: GridCoord,
    /// Top-left corner in pixels.
    pub corner: Vec2,
    /// Side length in pixels.
    pub size: f32,
}

/// One-shot fade applied to an eaten dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeOut {
    /// Delay before the fade starts, in seconds.
    pub begin_seconds: f32,
    /// Length of the fade, in seconds.
    pub duration_seconds: f32,
}

/// Dot drawn for an active calendar day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotPresentation {
    /// Index of the record in the normalized record list.
    pub record: usize,
    /// Center in pixels.
    pub center: Vec2,
    /// Radius in pixels, growing with the record's level.
    pub radius: f32,
    /// Fade applied when the chomper eats the dot.
    pub eaten: Option<FadeOut>,
}

impl DotPresentation {
    /// Resting opacity of the dot: hidden once eaten.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        if self.eaten.is_some() {
            0.0
        } else {
            1.0
        }
    }
}

/// Always-visible pulsing marker for the busiest days.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerPelletPresentation {
    /// Index of the record in the normalized record list.
    pub record: usize,
    /// Center in pixels.
    pub center: Vec2,
}

/// Primary actor travelling the full route.
#[derive(Clone, Debug, PartialEq)]
pub struct ChomperPresentation {
    /// Route in pixel space, travelled in order and then repeated.
    pub route: Vec<Vec2>,
    /// Time to complete one lap, in seconds.
    pub duration_seconds: f32,
    /// Body fill.
    pub color: &'static str,
}

/// Secondary actor trailing the chomper on an offset route.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostPresentation {
    /// Zero-based ghost number.
    pub index: u8,
    /// Offset applied to every route point.
    pub offset: Vec2,
    /// Offset route in pixel space.
    pub route: Vec<Vec2>,
    /// Time to complete one lap including the start delay, in seconds.
    pub duration_seconds: f32,
    /// Delay before the ghost starts moving, in seconds.
    pub delay_seconds: f32,
    /// Body fill.
    pub color: &'static str,
}

/// Overlay summarising the player's run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreboardPresentation {
    /// Name shown next to `PLAYER:`.
    pub player: String,
    /// Points and level.
    pub score: Score,
    /// Sum of all contribution counts.
    pub total_contributions: u64,
}

/// Scene description combining the canvas, decoration and actors.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Output dimensions.
    pub canvas: Canvas,
    /// Colors used by every layer.
    pub palette: &'static Palette,
    /// Route and eaten dots the scene was built from.
    pub plan: TraversalPlan,
    /// Points and level earned by the eaten dots.
    pub score: Score,
    /// Decorative walls.
    pub walls: Vec<WallPresentation>,
    /// Dots for every active record.
    pub dots: Vec<DotPresentation>,
    /// Chomper, absent when the route is empty.
    pub chomper: Option<ChomperPresentation>,
    /// Ghosts, empty when the route is empty.
    pub ghosts: Vec<GhostPresentation>,
    /// Scoreboard, absent when disabled.
    pub scoreboard: Option<ScoreboardPresentation>,
    /// Power pellets for the busiest days.
    pub power_pellets: Vec<PowerPelletPresentation>,
}

/// Rendering backend capable of serialising contribution maze scenes.
pub trait RenderingBackend {
    /// Document type produced by the backend.
    type Output;

    /// Serialises the scene into a complete document.
    ///
    /// The document is built in memory and only returned once complete.
    fn render(&self, scene: &Scene) -> AnyResult<Self::Output>;
}

/// Composes the declarative scene for a normalized calendar.
///
/// Composition is deterministic apart from the wall layer, which is delegated
/// to `walls`. The route, eaten dots and score never depend on the sampler.
pub fn compose_scene<W>(
    calendar: &NormalizedCalendar,
    player: &PlayerInfo,
    config: &RenderConfig,
    walls: &mut W,
) -> Scene
where
    W: WallSampler + ?Sized,
{
    let records = calendar.records();
    let palette = config.theme().palette();
    let plan = TraversalPlan::compute(records);
    let score = plan.score();
    let lap_seconds = lap_duration(&plan.path, config);

    let chomper = (!plan.path.is_empty()).then(|| ChomperPresentation {
        route: plan.path.positions_offset_by(Vec2::ZERO).collect(),
        duration_seconds: lap_seconds,
        color: palette.chomper,
    });
    let ghosts = if plan.path.is_empty() {
        Vec::new()
    } else {
        (0..config.ghost_count())
            .map(|index| compose_ghost(index, &plan.path, lap_seconds, palette))
            .collect()
    };
    let scoreboard = config.show_score().then(|| ScoreboardPresentation {
        player: player.display_name().to_owned(),
        score,
        total_contributions: calendar.summary().total_contributions,
    });

    Scene {
        canvas: Canvas::for_weeks(calendar.summary().week_count),
        palette,
        walls: compose_walls(records, config, walls),
        dots: compose_dots(records, &plan),
        power_pellets: compose_power_pellets(records),
        plan,
        score,
        chomper,
        ghosts,
        scoreboard,
    }
}

fn lap_duration(path: &TraversalPath, config: &RenderConfig) -> f32 {
    path.len() as f32 * SECONDS_PER_STOP / config.animation_speed().multiplier()
}

fn compose_walls<W>(
    records: &[ContributionRecord],
    config: &RenderConfig,
    sampler: &mut W,
) -> Vec<WallPresentation>
where
    W: WallSampler + ?Sized,
{
    let Some(last_column) = records.iter().map(ContributionRecord::x).max() else {
        return Vec::new();
    };

    let mut walls = Vec::new();
    for column in 0..=last_column {
        for row in 0..DAYS_PER_WEEK {
            let cell = GridCoord::new(column, row);
            if sampler.place_wall(config.maze_complexity(), cell) {
                walls.push(WallPresentation {
                    cell,
                    corner: cell_corner(cell),
                    size: CELL_SIZE,
                });
            }
        }
    }
    walls
}

fn compose_dots(records: &[ContributionRecord], plan: &TraversalPlan) -> Vec<DotPresentation> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_active())
        .map(|(index, record)| DotPresentation {
            record: index,
            center: cell_center(record.cell()),
            radius: dot_radius(record.level()),
            eaten: plan.consumed.contains(index).then(|| FadeOut {
                begin_seconds: index as f32 * FADE_STAGGER_SECONDS,
                duration_seconds: FADE_DURATION_SECONDS,
            }),
        })
        .collect()
}

fn dot_radius(level: ContributionLevel) -> f32 {
    f32::from(2u8.saturating_add(level.get()).min(4))
}

fn compose_power_pellets(records: &[ContributionRecord]) -> Vec<PowerPelletPresentation> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.level() == ContributionLevel::MAX)
        .map(|(index, record)| PowerPelletPresentation {
            record: index,
            center: cell_center(record.cell()),
        })
        .collect()
}

/// Offset separating ghost `index` from the chomper's route.
///
/// Even ghosts shift right and odd ghosts left; the first two ghosts shift
/// down and the rest up.
#[must_use]
pub fn ghost_offset(index: u8) -> Vec2 {
    let x = if index % 2 == 0 { 15.0 } else { -15.0 };
    let y = if index < 2 { 10.0 } else { -10.0 };
    Vec2::new(x, y)
}

/// Start delay of ghost `index`, in seconds.
#[must_use]
pub fn ghost_delay(index: u8) -> f32 {
    f32::from(index.saturating_add(1)) * 2.0
}

fn compose_ghost(
    index: u8,
    path: &TraversalPath,
    lap_seconds: f32,
    palette: &'static Palette,
) -> GhostPresentation {
    let offset = ghost_offset(index);
    let delay_seconds = ghost_delay(index);
    GhostPresentation {
        index,
        offset,
        route: path.positions_offset_by(offset).collect(),
        duration_seconds: lap_seconds + delay_seconds,
        delay_seconds,
        color: palette.ghost(index),
    }
}
