use serde::{Deserialize, Serialize};

use crate::tracker::{
    day::DayTable,
    rollover::WeekMarker,
    state::{ArchivedWeek, WeeklyState},
};

/// The struct used for storing the week on disk. Tables are optional here so that a document
/// lacking one of them can be told apart from an unparsable one, both end up as a fresh week
/// though.
#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyStateEntity {
    pub progress_by_day: Option<DayTable<bool>>,
    pub exercise_by_day: Option<DayTable<String>>,
    #[serde(default)]
    pub history: Vec<ArchivedWeek>,
    pub last_week_marker: Option<String>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub best_streak: u32,
}

/// A document that passed validation, along with the marker it carried.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredState {
    pub state: WeeklyState,
    pub marker: WeekMarker,
}

impl WeeklyStateEntity {
    /// Validating step between the document and the domain. Returns `None` when one of the day
    /// tables is absent.
    pub fn into_stored(self) -> Option<StoredState> {
        let marker = WeekMarker::parse(self.last_week_marker.as_deref());
        let state = WeeklyState {
            progress_by_day: self.progress_by_day?,
            exercise_by_day: self.exercise_by_day?,
            history: self.history,
            last_week_marker: marker.as_time(),
            current_streak: self.current_streak,
            best_streak: self.best_streak,
        };
        Some(StoredState { state, marker })
    }
}

impl From<&WeeklyState> for WeeklyStateEntity {
    fn from(state: &WeeklyState) -> Self {
        Self {
            progress_by_day: Some(state.progress_by_day.clone()),
            exercise_by_day: Some(state.exercise_by_day.clone()),
            history: state.history.clone(),
            last_week_marker: state.last_week_marker.map(|v| v.to_rfc3339()),
            current_streak: state.current_streak,
            best_streak: state.best_streak,
        }
    }
}
