#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! SVG rendering backend for contribution maze scenes.
//!
//! The backend serialises a [`Scene`] into a single self-contained SVG
//! document with SMIL animations. Layers are written in a fixed order:
//! filter definitions, background, walls, dots, chomper, ghosts, scoreboard,
//! power pellets and finally the stylesheet. Every text node and attribute
//! value is XML-escaped.

mod format;

use std::fmt::{self, Write};

use anyhow::{Context, Result};
use contrib_maze_core::Palette;
use contrib_maze_rendering::{
    ChomperPresentation, DotPresentation, GhostPresentation, PowerPelletPresentation,
    RenderingBackend, Scene, ScoreboardPresentation, WallPresentation,
};

use self::format::{group_thousands, Escaped, Num, PathData};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

const CHOMPER_RADIUS: f32 = 8.0;
const CHOMPER_PATH_ID: &str = "chomper-path";
const MOUTH_PATH: &str = "M 0,0 L 8,0 A 8,8 0 0,1 5.66,5.66 Z";
const GHOST_RADIUS: f32 = 7.0;
const WALL_OPACITY: f32 = 0.3;
const POWER_PELLET_RADIUS: f32 = 6.0;

const FILTERS: &str = r#"<filter id="glow"><feGaussianBlur stdDeviation="2" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter><filter id="shadow"><feDropShadow dx="1" dy="1" stdDeviation="1" flood-opacity="0.3"/></filter>"#;

const STYLESHEET: &str = "
.chomper { filter: url(#glow); }
.ghost { animation: float 2s ease-in-out infinite; }
@keyframes float {
  0%, 100% { transform: translateY(0px); }
  50% { transform: translateY(-3px); }
}
.scoreboard text { text-shadow: 1px 1px 1px rgba(0,0,0,0.5); }
.dot:not(.eaten) { animation: pulse 1s ease-in-out infinite; }
@keyframes pulse {
  0%, 100% { opacity: 1; }
  50% { opacity: 0.7; }
}
";

/// Rendering backend producing animated SVG documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgBackend;

impl SvgBackend {
    /// Creates a new SVG backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RenderingBackend for SvgBackend {
    type Output = String;

    fn render(&self, scene: &Scene) -> Result<String> {
        let mut out = String::with_capacity(estimated_capacity(scene));
        write_document(&mut out, scene).context("failed to format SVG document")?;
        Ok(out)
    }
}

fn estimated_capacity(scene: &Scene) -> usize {
    let route = scene.plan.path.len() * 16;
    2_048 + scene.walls.len() * 96 + scene.dots.len() * 160 + route * (1 + scene.ghosts.len())
}

fn write_document(out: &mut String, scene: &Scene) -> fmt::Result {
    let palette = scene.palette;
    let (width, height) = (scene.canvas.width, scene.canvas.height);
    writeln!(
        out,
        r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="{SVG_NAMESPACE}">"#
    )?;
    writeln!(out, "<defs>{FILTERS}</defs>")?;
    writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        Escaped(palette.background)
    )?;

    for wall in &scene.walls {
        write_wall(out, wall, palette)?;
    }
    for dot in &scene.dots {
        write_dot(out, dot, palette)?;
    }
    if let Some(chomper) = &scene.chomper {
        write_chomper(out, chomper, palette)?;
    }
    for ghost in &scene.ghosts {
        write_ghost(out, ghost)?;
    }
    if let Some(scoreboard) = &scene.scoreboard {
        write_scoreboard(out, scoreboard, palette)?;
    }
    for pellet in &scene.power_pellets {
        write_power_pellet(out, pellet, palette)?;
    }

    writeln!(out, "<style>{STYLESHEET}</style>")?;
    writeln!(out, "</svg>")
}

fn write_wall(out: &mut String, wall: &WallPresentation, palette: &Palette) -> fmt::Result {
    writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{size}" height="{size}" fill="{}" opacity="{}"/>"#,
        Num(wall.corner.x),
        Num(wall.corner.y),
        Escaped(palette.wall),
        Num(WALL_OPACITY),
        size = Num(wall.size),
    )
}

fn write_dot(out: &mut String, dot: &DotPresentation, palette: &Palette) -> fmt::Result {
    let class = if dot.eaten.is_some() {
        "dot eaten"
    } else {
        "dot"
    };
    write!(
        out,
        r#"<circle class="{class} dot-{}" cx="{}" cy="{}" r="{}" fill="{}" opacity="{}""#,
        dot.record,
        Num(dot.center.x),
        Num(dot.center.y),
        Num(dot.radius),
        Escaped(palette.dot),
        Num(dot.opacity()),
    )?;
    match dot.eaten {
        Some(fade) => writeln!(
            out,
            r#"><animate attributeName="opacity" values="1;0" dur="{}s" begin="{}s" fill="freeze"/></circle>"#,
            Num(fade.duration_seconds),
            Num(fade.begin_seconds),
        ),
        None => writeln!(out, "/>"),
    }
}

fn write_chomper(
    out: &mut String,
    chomper: &ChomperPresentation,
    palette: &Palette,
) -> fmt::Result {
    let lap = Num(chomper.duration_seconds);
    writeln!(out, r#"<g class="chomper" filter="url(#glow)">"#)?;
    writeln!(
        out,
        r##"<circle cx="0" cy="0" r="{}" fill="{}"><animateMotion dur="{lap}s" repeatCount="indefinite"><mpath href="#{CHOMPER_PATH_ID}"/></animateMotion><animate attributeName="r" values="8;6;8" dur="0.5s" repeatCount="indefinite"/></circle>"##,
        Num(CHOMPER_RADIUS),
        Escaped(chomper.color),
    )?;
    writeln!(
        out,
        r##"<path class="chomper-mouth" d="{MOUTH_PATH}" fill="{}"><animateTransform attributeName="transform" type="rotate" values="0;30;0;-30;0" dur="0.5s" repeatCount="indefinite"/><animateMotion dur="{lap}s" repeatCount="indefinite"><mpath href="#{CHOMPER_PATH_ID}"/></animateMotion></path>"##,
        Escaped(palette.background),
    )?;
    writeln!(
        out,
        r#"<path id="{CHOMPER_PATH_ID}" d="{}" fill="none" stroke="none"/>"#,
        PathData(&chomper.route),
    )?;
    writeln!(out, "</g>")
}

fn write_ghost(out: &mut String, ghost: &GhostPresentation) -> fmt::Result {
    let index = ghost.index;
    writeln!(out, r#"<g class="ghost ghost-{index}">"#)?;
    writeln!(
        out,
        r##"<circle cx="0" cy="0" r="{}" fill="{}" filter="url(#shadow)"><animateMotion dur="{}s" repeatCount="indefinite" begin="{}s"><mpath href="#ghost-path-{index}"/></animateMotion><animate attributeName="opacity" values="0.8;1;0.8" dur="2s" repeatCount="indefinite"/></circle>"##,
        Num(GHOST_RADIUS),
        Escaped(ghost.color),
        Num(ghost.duration_seconds),
        Num(ghost.delay_seconds),
    )?;
    writeln!(
        out,
        r#"<path id="ghost-path-{index}" d="{}" fill="none" stroke="none"/>"#,
        PathData(&ghost.route),
    )?;
    writeln!(out, "</g>")
}

fn write_scoreboard(
    out: &mut String,
    scoreboard: &ScoreboardPresentation,
    palette: &Palette,
) -> fmt::Result {
    let text = Escaped(palette.text);
    writeln!(out, r#"<g class="scoreboard">"#)?;
    writeln!(
        out,
        r#"<rect x="10" y="10" width="200" height="80" fill="{}" stroke="{text}" stroke-width="2" opacity="0.9"/>"#,
        Escaped(palette.background),
    )?;

    let lines = [
        format!("PLAYER: {}", scoreboard.player),
        format!("SCORE: {}", group_thousands(scoreboard.score.points())),
        format!("LEVEL: {}", scoreboard.score.level()),
        format!("CONTRIBUTIONS: {}", scoreboard.total_contributions),
    ];
    for (index, line) in lines.iter().enumerate() {
        let y = 30 + 15 * index;
        let weight = if index == 0 {
            r#" font-weight="bold""#
        } else {
            ""
        };
        writeln!(
            out,
            r#"<text x="20" y="{y}" fill="{text}" font-family="monospace" font-size="12"{weight}>{}</text>"#,
            Escaped(line),
        )?;
    }
    writeln!(out, "</g>")
}

fn write_power_pellet(
    out: &mut String,
    pellet: &PowerPelletPresentation,
    palette: &Palette,
) -> fmt::Result {
    writeln!(
        out,
        r#"<circle class="power-pellet" cx="{}" cy="{}" r="{}" fill="{}" filter="url(#glow)"><animate attributeName="r" values="6;8;6" dur="1s" repeatCount="indefinite"/><animate attributeName="opacity" values="0.7;1;0.7" dur="1s" repeatCount="indefinite"/></circle>"#,
        Num(pellet.center.x),
        Num(pellet.center.y),
        Num(POWER_PELLET_RADIUS),
        Escaped(palette.dot),
    )
}
