use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::day::{Day, DayTable};

/// Copy of a finished week taken when the tracker rolls over to a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedWeek {
    pub date: NaiveDate,
    pub progress_snapshot: DayTable<bool>,
    pub exercise_snapshot: DayTable<String>,
}

impl ArchivedWeek {
    pub fn completed_days(&self) -> usize {
        self.progress_snapshot.values().filter(|done| **done).count()
    }
}

/// Everything tracked about the current week.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeeklyState {
    pub progress_by_day: DayTable<bool>,
    pub exercise_by_day: DayTable<String>,
    pub history: Vec<ArchivedWeek>,
    /// Last moment the state was considered current. `None` only for documents written without
    /// one, which are never rolled over.
    pub last_week_marker: Option<DateTime<Local>>,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl WeeklyState {
    /// All days incomplete, no notes, no history, zero streaks.
    pub fn fresh(now: DateTime<Local>) -> Self {
        Self {
            last_week_marker: Some(now),
            ..Default::default()
        }
    }

    pub fn is_completed(&self, day: Day) -> bool {
        self.progress_by_day[day]
    }

    pub fn completed_days(&self) -> usize {
        self.progress_by_day.values().filter(|done| **done).count()
    }

    pub fn snapshot(&self, date: NaiveDate) -> ArchivedWeek {
        ArchivedWeek {
            date,
            progress_snapshot: self.progress_by_day.clone(),
            exercise_snapshot: self.exercise_by_day.clone(),
        }
    }

    /// Archives this week into history and starts an empty one. Only history carries over, both
    /// streaks start again from zero.
    pub fn rolled_over(mut self, now: DateTime<Local>) -> Self {
        let snapshot = self.snapshot(now.date_naive());
        self.history.push(snapshot);
        Self {
            history: self.history,
            ..Self::fresh(now)
        }
    }
}
