//! Render configuration, palettes and the lenient option resolver.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Largest number of ghosts a scene may contain.
pub const MAX_GHOSTS: u8 = 4;

const DEFAULT_GHOSTS: u8 = 2;

const KEY_THEME: &str = "theme";
const KEY_GHOST_COUNT: &str = "ghost_count";
const KEY_ANIMATION_SPEED: &str = "animation_speed";
const KEY_SHOW_SCORE: &str = "show_score";
const KEY_MAZE_COMPLEXITY: &str = "maze_complexity";

/// Colors used when drawing a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Canvas fill and mouth wedge color.
    pub background: &'static str,
    /// Fill applied to decorative maze walls.
    pub wall: &'static str,
    /// Fill applied to dots and power markers.
    pub dot: &'static str,
    /// Fill applied to the chomper.
    pub chomper: &'static str,
    /// Fills applied to the ghosts, indexed by ghost number.
    pub ghosts: [&'static str; MAX_GHOSTS as usize],
    /// Scoreboard text and border color.
    pub text: &'static str,
}

impl Palette {
    /// Fill for ghost `index`, cycling through [`Palette::ghosts`].
    #[must_use]
    pub const fn ghost(&self, index: u8) -> &'static str {
        self.ghosts[index as usize % self.ghosts.len()]
    }
}

const CLASSIC: Palette = Palette {
    background: "#000000",
    wall: "#0000FF",
    dot: "#FFFF00",
    chomper: "#FFFF00",
    ghosts: ["#FF0000", "#FFB8FF", "#00FFFF", "#FFB852"],
    text: "#FFFFFF",
};

const DARK: Palette = Palette {
    background: "#0d1117",
    wall: "#21262d",
    dot: "#f0f6fc",
    chomper: "#ffd700",
    ghosts: ["#f85149", "#bc8cff", "#7ee787", "#ffa657"],
    text: "#f0f6fc",
};

const NEON: Palette = Palette {
    background: "#000011",
    wall: "#330066",
    dot: "#00ff00",
    chomper: "#ffff00",
    ghosts: ["#ff0080", "#8000ff", "#00ffff", "#ff8000"],
    text: "#00ff00",
};

const RETRO: Palette = Palette {
    background: "#2a1810",
    wall: "#8b4513",
    dot: "#ffd700",
    chomper: "#ffff80",
    ghosts: ["#cd5c5c", "#dda0dd", "#87ceeb", "#f4a460"],
    text: "#ffd700",
};

/// Named palette selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Black maze, blue walls and yellow dots.
    #[default]
    Classic,
    /// Palette tuned for dark page backgrounds.
    Dark,
    /// Saturated colors on a near-black canvas.
    Neon,
    /// Warm brown and gold tones.
    Retro,
}

impl Theme {
    /// Every theme in declaration order.
    pub const ALL: [Self; 4] = [Self::Classic, Self::Dark, Self::Neon, Self::Retro];

    /// Looks up a theme by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(name))
    }

    /// Canonical lowercase name of the theme.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Dark => "dark",
            Self::Neon => "neon",
            Self::Retro => "retro",
        }
    }

    /// Colors associated with the theme.
    #[must_use]
    pub const fn palette(self) -> &'static Palette {
        match self {
            Self::Classic => &CLASSIC,
            Self::Dark => &DARK,
            Self::Neon => &NEON,
            Self::Retro => &RETRO,
        }
    }
}

/// Animation speed tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    /// Half speed.
    Slow,
    /// Nominal speed.
    #[default]
    Normal,
    /// Double speed.
    Fast,
}

impl AnimationSpeed {
    /// Looks up a tier by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "slow" => Some(Self::Slow),
            "normal" => Some(Self::Normal),
            "fast" => Some(Self::Fast),
            _ => None,
        }
    }

    /// Canonical lowercase name of the tier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
        }
    }

    /// Factor that divides every animation duration.
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Slow => 0.5,
            Self::Normal => 1.0,
            Self::Fast => 2.0,
        }
    }
}

/// Density of decorative maze walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MazeComplexity {
    /// No walls at all.
    Simple,
    /// Sparse walls.
    #[default]
    Normal,
    /// Twice as many walls as [`MazeComplexity::Normal`].
    Complex,
}

impl MazeComplexity {
    /// Looks up a tier by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "normal" => Some(Self::Normal),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }

    /// Canonical lowercase name of the tier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Normal => "normal",
            Self::Complex => "complex",
        }
    }

    /// Probability that an eligible calendar cell receives a wall.
    #[must_use]
    pub const fn wall_probability(self) -> f64 {
        match self {
            Self::Simple => 0.0,
            Self::Normal => 0.05,
            Self::Complex => 0.1,
        }
    }
}

/// Immutable configuration consumed by scene composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    theme: Theme,
    ghost_count: u8,
    animation_speed: AnimationSpeed,
    show_score: bool,
    maze_complexity: MazeComplexity,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            ghost_count: DEFAULT_GHOSTS,
            animation_speed: AnimationSpeed::default(),
            show_score: true,
            maze_complexity: MazeComplexity::default(),
        }
    }
}

impl RenderConfig {
    /// Returns a copy using the provided palette.
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a copy using `count` ghosts, clamped to [`MAX_GHOSTS`].
    #[must_use]
    pub fn with_ghost_count(mut self, count: u32) -> Self {
        self.ghost_count = clamp_ghosts(i64::from(count));
        self
    }

    /// Returns a copy using the provided animation speed.
    #[must_use]
    pub const fn with_animation_speed(mut self, speed: AnimationSpeed) -> Self {
        self.animation_speed = speed;
        self
    }

    /// Returns a copy with the scoreboard enabled or disabled.
    #[must_use]
    pub const fn with_show_score(mut self, show_score: bool) -> Self {
        self.show_score = show_score;
        self
    }

    /// Returns a copy using the provided wall density.
    #[must_use]
    pub const fn with_maze_complexity(mut self, complexity: MazeComplexity) -> Self {
        self.maze_complexity = complexity;
        self
    }

    /// Palette selection.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Number of ghosts, never more than [`MAX_GHOSTS`].
    #[must_use]
    pub const fn ghost_count(&self) -> u8 {
        self.ghost_count
    }

    /// Animation speed tier.
    #[must_use]
    pub const fn animation_speed(&self) -> AnimationSpeed {
        self.animation_speed
    }

    /// Whether the scoreboard overlay is emitted.
    #[must_use]
    pub const fn show_score(&self) -> bool {
        self.show_score
    }

    /// Decorative wall density.
    #[must_use]
    pub const fn maze_complexity(&self) -> MazeComplexity {
        self.maze_complexity
    }

    /// Translates a flat option set into a configuration.
    ///
    /// Resolution never fails. Every unrecognised key or value is replaced by
    /// its documented default and reported in [`ResolvedConfig::fallbacks`] so
    /// the caller can decide how to surface it.
    #[must_use]
    pub fn resolve(options: &RenderOptions) -> ResolvedConfig {
        let mut config = Self::default();
        let mut fallbacks = Vec::new();

        for (key, value) in options.iter() {
            match key {
                KEY_THEME => match Theme::from_name(value) {
                    Some(theme) => config.theme = theme,
                    None => fallbacks.push(ConfigFallback::unrecognized(
                        key,
                        value,
                        Theme::default().name(),
                    )),
                },
                KEY_GHOST_COUNT => match value.trim().parse::<i64>() {
                    Ok(requested) => {
                        config.ghost_count = clamp_ghosts(requested);
                        if i64::from(config.ghost_count) != requested {
                            fallbacks.push(ConfigFallback {
                                key: key.to_owned(),
                                value: value.to_owned(),
                                reason: FallbackReason::Clamped {
                                    to: config.ghost_count,
                                },
                            });
                        }
                    }
                    Err(_) => fallbacks.push(ConfigFallback::unrecognized(
                        key,
                        value,
                        &DEFAULT_GHOSTS.to_string(),
                    )),
                },
                KEY_ANIMATION_SPEED => match AnimationSpeed::from_name(value) {
                    Some(speed) => config.animation_speed = speed,
                    None => fallbacks.push(ConfigFallback::unrecognized(
                        key,
                        value,
                        AnimationSpeed::default().name(),
                    )),
                },
                KEY_SHOW_SCORE => match parse_flag(value) {
                    Some(show) => config.show_score = show,
                    None => fallbacks.push(ConfigFallback::unrecognized(key, value, "true")),
                },
                KEY_MAZE_COMPLEXITY => match MazeComplexity::from_name(value) {
                    Some(complexity) => config.maze_complexity = complexity,
                    None => fallbacks.push(ConfigFallback::unrecognized(
                        key,
                        value,
                        MazeComplexity::default().name(),
                    )),
                },
                _ => fallbacks.push(ConfigFallback {
                    key: key.to_owned(),
                    value: value.to_owned(),
                    reason: FallbackReason::UnknownKey,
                }),
            }
        }

        ResolvedConfig { config, fallbacks }
    }
}

fn clamp_ghosts(requested: i64) -> u8 {
    requested.clamp(0, i64::from(MAX_GHOSTS)) as u8
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Flat key/value option set as supplied by the boundary.
///
/// Keys are normalised to lowercase with `-` folded into `_`, so
/// `Ghost-Count` and `ghost_count` address the same option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    entries: BTreeMap<String, String>,
}

impl RenderOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let _ = self.entries.insert(normalize_key(key), value.into());
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize_key(key)).map(String::as_str)
    }

    /// Overlays `other` on top of this set; its values win.
    pub fn merge(&mut self, other: RenderOptions) {
        self.entries.extend(other.entries);
    }

    /// Iterates over the stored options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Reports whether no option was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RenderOptions
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.set(key.as_ref(), value);
        }
        options
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('-', "_")
}

/// Outcome of [`RenderConfig::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Configuration after defaulting.
    pub config: RenderConfig,
    /// Options that could not be applied verbatim.
    pub fallbacks: Vec<ConfigFallback>,
}

/// Single option that was replaced or adjusted during resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigFallback {
    /// Normalised option key.
    pub key: String,
    /// Raw value as supplied.
    pub value: String,
    /// What happened to the value.
    pub reason: FallbackReason,
}

impl ConfigFallback {
    fn unrecognized(key: &str, value: &str, default: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
            reason: FallbackReason::Unrecognized {
                default: default.to_owned(),
            },
        }
    }
}

/// Reasons an option could not be applied verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// The key is not a recognised option and was ignored.
    UnknownKey,
    /// The value was not understood; the default was used instead.
    Unrecognized {
        /// Default that replaced the value.
        default: String,
    },
    /// The value was numerically valid but outside the accepted range.
    Clamped {
        /// Value that was applied.
        to: u8,
    },
}

impl fmt::Display for ConfigFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            FallbackReason::UnknownKey => {
                write!(f, "ignoring unknown option '{}'", self.key)
            }
            FallbackReason::Unrecognized { default } => write!(
                f,
                "option '{}' has unrecognised value '{}'; using '{default}'",
                self.key, self.value
            ),
            FallbackReason::Clamped { to } => write!(
                f,
                "option '{}' value '{}' is out of range; using {to}",
                self.key, self.value
            ),
        }
    }
}
