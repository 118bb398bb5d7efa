//! Loading calendars and player identities from disk or synthesising them.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Days, NaiveDate};
use contrib_maze_core::PlayerInfo;
use contrib_maze_system_calendar::{
    mock::{self, MockCalendarSpec},
    RawCalendar,
};
use rand::Rng;

/// Reads a calendar document in any of the accepted JSON shapes.
pub(crate) fn load_calendar(path: &Path) -> Result<RawCalendar> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read calendar at {}", path.display()))?;
    RawCalendar::from_json(&contents)
        .with_context(|| format!("failed to parse calendar at {}", path.display()))
}

/// Synthesises `weeks` full weeks ending with the week containing `today`.
pub(crate) fn mock_calendar<R>(rng: &mut R, weeks: u32, today: NaiveDate) -> Result<RawCalendar>
where
    R: Rng + ?Sized,
{
    let start = first_sunday(weeks, today)
        .context("mock calendar start date is outside the supported date range")?;
    mock::generate(rng, &MockCalendarSpec::new(weeks, start))
        .context("failed to generate mock calendar")
}

fn first_sunday(weeks: u32, today: NaiveDate) -> Option<NaiveDate> {
    let this_sunday =
        today.checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_sunday())))?;
    let earlier_weeks = u64::from(weeks.saturating_sub(1)) * 7;
    this_sunday.checked_sub_days(Days::new(earlier_weeks))
}

/// Resolves the player from a REST user document or from plain flags.
///
/// Flags take precedence over the document so a display name can be
/// overridden without editing the file.
pub(crate) fn load_player(
    user_info: Option<&Path>,
    login: Option<&str>,
    name: Option<&str>,
) -> Result<PlayerInfo> {
    let player = match (user_info, login) {
        (Some(path), _) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read user info at {}", path.display()))?;
            let document: PlayerInfo = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse user info at {}", path.display()))?;
            document
                .validate()
                .with_context(|| format!("invalid user info at {}", path.display()))?
        }
        (None, Some(login)) => PlayerInfo::new(login).context("invalid --login")?,
        (None, None) => bail!("a player login is required: pass --login or --user-info"),
    };
    Ok(match name.filter(|name| !name.trim().is_empty()) {
        Some(name) => player.with_name(name),
        None => player,
    })
}
