//! Render option sources: the TOML config file and command-line flags.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use clap::Args;
use contrib_maze_core::RenderOptions;
use serde::Deserialize;

/// Render options accepted as raw strings; validation happens in
/// [`contrib_maze_core::RenderConfig::resolve`].
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct RenderArgs {
    /// Palette name: classic, dark, neon or retro.
    #[arg(long, env = "INPUT_THEME")]
    theme: Option<String>,

    /// Number of ghosts, at most 4.
    #[arg(long, env = "INPUT_GHOST_COUNT")]
    ghost_count: Option<String>,

    /// Animation speed: slow, normal or fast.
    #[arg(long, env = "INPUT_ANIMATION_SPEED")]
    animation_speed: Option<String>,

    /// Whether to draw the scoreboard.
    #[arg(long, env = "INPUT_SHOW_SCORE")]
    show_score: Option<String>,

    /// Wall density: simple, normal or complex.
    #[arg(long, env = "INPUT_MAZE_COMPLEXITY")]
    maze_complexity: Option<String>,
}

impl RenderArgs {
    /// Collects the options that were supplied with a non-blank value.
    pub(crate) fn into_options(self) -> RenderOptions {
        [
            ("theme", self.theme),
            ("ghost_count", self.ghost_count),
            ("animation_speed", self.animation_speed),
            ("show_score", self.show_score),
            ("maze_complexity", self.maze_complexity),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    render: BTreeMap<String, toml::Value>,
}

/// Reads render options from the `[render]` table of a TOML file.
pub(crate) fn load_config_file(path: &Path) -> Result<RenderOptions> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))
}

fn parse_config(contents: &str) -> Result<RenderOptions> {
    let file: ConfigFile = toml::from_str(contents).context("invalid config toml")?;
    let mut options = RenderOptions::new();
    for (key, value) in file.render {
        let text = match value {
            toml::Value::String(text) => text,
            toml::Value::Integer(number) => number.to_string(),
            toml::Value::Float(number) => number.to_string(),
            toml::Value::Boolean(flag) => flag.to_string(),
            other => bail!(
                "render option `{key}` must be a string, number or boolean, found {}",
                other.type_str()
            ),
        };
        options.set(&key, text);
    }
    Ok(options)
}

/// Layers option sources; later sources win key by key.
pub(crate) fn layered(sources: impl IntoIterator<Item = RenderOptions>) -> RenderOptions {
    sources
        .into_iter()
        .fold(RenderOptions::new(), |mut merged, source| {
            merged.merge(source);
            merged
        })
}
