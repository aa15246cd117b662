//! Decides what happens to a stored week once the calendar has moved on.
//!
//! The decision itself ([should_roll_over]) is pure. Asking the user goes through
//! [RolloverPrompt] and only the combination in [resolve] touches the state.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, TimeZone};
use tracing::{info, warn};

use super::state::WeeklyState;

/// Marker as found in a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekMarker {
    Missing,
    Invalid(String),
    At(DateTime<Local>),
}

impl WeekMarker {
    /// Accepts RFC 3339 timestamps and offset-less ISO 8601 ones, the latter read as local time.
    pub fn parse(raw: Option<&str>) -> WeekMarker {
        let Some(raw) = raw else {
            return WeekMarker::Missing;
        };
        if let Ok(v) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
            return WeekMarker::At(v.with_timezone(&Local));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .and_then(|v| Local.from_local_datetime(&v).earliest())
            .map_or_else(|| WeekMarker::Invalid(raw.to_string()), WeekMarker::At)
    }

    pub fn as_time(&self) -> Option<DateTime<Local>> {
        match self {
            WeekMarker::At(v) => Some(*v),
            WeekMarker::Missing | WeekMarker::Invalid(_) => None,
        }
    }
}

/// True when `marker` and `now` fall into different ISO weeks. The ISO year takes part in the
/// comparison, so week 52 of two different years are different weeks.
pub fn should_roll_over(marker: DateTime<Local>, now: DateTime<Local>) -> bool {
    marker.iso_week() != now.iso_week()
}

/// Confirmation step for starting a new week.
#[cfg_attr(test, mockall::automock)]
pub trait RolloverPrompt {
    /// Asks whether the week last seen at `last_seen` should be archived and reset.
    fn confirm_new_week(&mut self, last_seen: DateTime<Local>) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverOutcome {
    /// Stored week is the current one.
    Current,
    /// No marker to compare against.
    Unchecked,
    /// Marker couldn't be read, state was reinitialized without archiving.
    Reinitialized,
    /// User confirmed, the old week is in history.
    RolledOver,
    /// User declined, the stale week is kept as is.
    Kept,
}

/// Applies the rollover policy to a freshly loaded state.
pub fn resolve(
    state: WeeklyState,
    marker: &WeekMarker,
    now: DateTime<Local>,
    prompt: &mut dyn RolloverPrompt,
) -> (WeeklyState, RolloverOutcome) {
    match marker {
        WeekMarker::Missing => (state, RolloverOutcome::Unchecked),
        WeekMarker::Invalid(raw) => {
            warn!("Stored week marker {raw:?} is unreadable, starting over");
            (WeeklyState::fresh(now), RolloverOutcome::Reinitialized)
        }
        WeekMarker::At(last_seen) if !should_roll_over(*last_seen, now) => {
            (state, RolloverOutcome::Current)
        }
        WeekMarker::At(last_seen) => {
            if prompt.confirm_new_week(*last_seen) {
                info!("Rolling over week last seen at {last_seen}");
                (state.rolled_over(now), RolloverOutcome::RolledOver)
            } else {
                info!("Keeping stale week last seen at {last_seen}");
                (state, RolloverOutcome::Kept)
            }
        }
    }
}

/// Answers every prompt the same way.
pub struct FixedAnswer(pub bool);

impl RolloverPrompt for FixedAnswer {
    fn confirm_new_week(&mut self, _last_seen: DateTime<Local>) -> bool {
        self.0
    }
}
