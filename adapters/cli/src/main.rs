#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that renders a contribution calendar as an animated
//! maze SVG.

mod input;
mod output;
mod settings;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser, ValueHint};
use contrib_maze_core::{CalendarSummary, RenderConfig, RenderOptions};
use contrib_maze_rendering::{compose_scene, RandomWalls, RenderingBackend, Scene};
use contrib_maze_rendering_svg::SvgBackend;
use contrib_maze_system_calendar::{mock::DEFAULT_MOCK_WEEKS, Normalizer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::settings::RenderArgs;

/// Step output key announcing where the document was written.
const SVG_PATH_OUTPUT: &str = "svg_path";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Render a contribution calendar as an animated maze SVG",
    long_about = None
)]
struct Cli {
    /// Handle of the player; required unless --user-info is given.
    #[arg(long, env = "GITHUB_USER_NAME")]
    login: Option<String>,

    /// Display name shown on the scoreboard instead of the login.
    #[arg(long)]
    name: Option<String>,

    /// REST user document providing login and display name.
    #[arg(long, value_hint = ValueHint::FilePath)]
    user_info: Option<PathBuf>,

    /// Contribution calendar JSON: bare calendar, GraphQL data or full response.
    #[arg(
        long,
        value_hint = ValueHint::FilePath,
        conflicts_with = "mock",
        required_unless_present = "mock"
    )]
    calendar: Option<PathBuf>,

    /// Render a synthetic calendar instead of reading one.
    #[arg(long, action = ArgAction::SetTrue)]
    mock: bool,

    /// Number of weeks in a synthetic calendar.
    #[arg(long, default_value_t = DEFAULT_MOCK_WEEKS)]
    weeks: u32,

    /// Seed for synthetic data and wall placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Reject calendars whose first or last week has fewer than seven days.
    #[arg(long, action = ArgAction::SetTrue)]
    strict_weeks: bool,

    /// TOML file with a [render] table of default options.
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    /// Destination of the SVG document.
    #[arg(
        short,
        long,
        env = "INPUT_OUTPUTS",
        default_value = "dist/maze.svg",
        value_hint = ValueHint::FilePath
    )]
    output: PathBuf,

    /// GitHub Actions step output file to append `svg_path=<output>` to.
    #[arg(long, env = "GITHUB_OUTPUT", value_hint = ValueHint::FilePath)]
    github_output: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationStats {
    total_contributions: u64,
    max_contributions: u32,
    weeks: u32,
    theme: &'static str,
    ghost_count: u8,
    path_length: usize,
    dots_eaten: usize,
    score: u64,
    level: u64,
}

impl GenerationStats {
    fn new(summary: &CalendarSummary, config: &RenderConfig, scene: &Scene) -> Self {
        Self {
            total_contributions: summary.total_contributions,
            max_contributions: summary.max_count,
            weeks: summary.week_count,
            theme: config.theme().name(),
            ghost_count: config.ghost_count(),
            path_length: scene.plan.path.len(),
            dots_eaten: scene.plan.consumed.len(),
            score: scene.score.points(),
            level: scene.score.level(),
        }
    }
}

/// Entry point for the contribution maze command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let player = input::load_player(
        cli.user_info.as_deref(),
        cli.login.as_deref(),
        cli.name.as_deref(),
    )?;
    info!(player = player.login(), "generating contribution maze");

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let raw = match &cli.calendar {
        Some(path) => input::load_calendar(path)?,
        None => {
            debug!(weeks = cli.weeks, seed = ?cli.seed, "synthesising mock calendar");
            input::mock_calendar(&mut rng, cli.weeks, Utc::now().date_naive())?
        }
    };
    let normalizer = if cli.strict_weeks {
        Normalizer::strict()
    } else {
        Normalizer::with_partial_edge_weeks()
    };
    let calendar = normalizer
        .normalize(&raw)
        .context("contribution calendar is invalid")?;
    if let Some(reported) = raw.total_contributions {
        let computed = calendar.summary().total_contributions;
        if reported != computed {
            warn!(
                reported,
                computed, "reported total differs from the sum of daily counts"
            );
        }
    }

    let mut sources: Vec<RenderOptions> = Vec::with_capacity(2);
    if let Some(path) = &cli.config {
        sources.push(settings::load_config_file(path)?);
    }
    sources.push(cli.render.into_options());
    let resolved = RenderConfig::resolve(&settings::layered(sources));
    for fallback in &resolved.fallbacks {
        warn!("{fallback}");
    }
    let config = resolved.config;

    let mut walls = RandomWalls::new(rng);
    let scene = compose_scene(&calendar, &player, &config, &mut walls);
    let svg = SvgBackend::new()
        .render(&scene)
        .context("failed to render maze")?;

    output::write_atomically(&cli.output, &svg)?;
    info!(path = %cli.output.display(), bytes = svg.len(), "maze written");

    if let Some(step_output) = &cli.github_output {
        let value = cli.output.to_string_lossy();
        output::append_step_output(step_output, SVG_PATH_OUTPUT, &value)?;
    }

    let stats = GenerationStats::new(calendar.summary(), &config, &scene);
    let stats = serde_json::to_string(&stats).context("failed to serialise statistics")?;
    info!("generation statistics: {stats}");
    Ok(())
}
