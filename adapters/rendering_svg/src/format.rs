//! Text helpers shared by the SVG writers.

use std::fmt;

use glam::Vec2;

/// Displays a pixel or time value with at most three decimals and no
/// trailing zeros, so `55.0` prints as `55` and `1.2000000476` as `1.2`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Num(pub(crate) f32);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        if rounded == rounded.trunc() {
            return write!(f, "{}", rounded as i64);
        }
        let text = format!("{rounded:.3}");
        f.write_str(text.trim_end_matches('0'))
    }
}

/// Displays text with the five XML special characters replaced by entities.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Escaped<'a>(pub(crate) &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(index) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..index])?;
            let entity = match rest.as_bytes()[index] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&apos;",
            };
            f.write_str(entity)?;
            rest = &rest[index + 1..];
        }
        f.write_str(rest)
    }
}

/// Displays a route as SVG path data: `M x y L x y ...`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PathData<'a>(pub(crate) &'a [Vec2]);

impl fmt::Display for PathData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, point) in self.0.iter().enumerate() {
            let command = if index == 0 { "M" } else { " L" };
            write!(f, "{command} {} {}", Num(point.x), Num(point.y))?;
        }
        Ok(())
    }
}

/// Formats an integer with `,` between groups of three digits.
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
