use chrono::{DateTime, Local, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::utils::time::next_occurrence;

/// Daily reminder settings, stored separately from the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    pub reminder_hour: u8,
    pub reminder_minute: u8,
    pub reminder_enabled: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            reminder_hour: 19,
            reminder_minute: 0,
            reminder_enabled: true,
        }
    }
}

impl ReminderConfig {
    /// Wall clock time of the reminder, `None` when hour or minute is out of range.
    pub fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.reminder_hour.into(), self.reminder_minute.into(), 0)
    }

    pub fn is_valid(&self) -> bool {
        self.time().is_some()
    }

    /// Next moment the reminder should fire, `None` if it's disabled.
    pub fn next_fire(&self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        if !self.reminder_enabled {
            return None;
        }
        next_occurrence(now, self.time()?)
    }
}
