use std::fmt::Display;

use crate::utils::percentage::Percentage;

use super::{day::Day, state::WeeklyState};

pub const COMPLETED_GLYPH: &str = "✅";
pub const PENDING_GLYPH: &str = "❌";

pub fn glyph(completed: bool) -> &'static str {
    if completed {
        COMPLETED_GLYPH
    } else {
        PENDING_GLYPH
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayStatus {
    pub day: Day,
    pub completed: bool,
    pub exercise: String,
}

impl DayStatus {
    pub fn glyph(&self) -> &'static str {
        glyph(self.completed)
    }
}

/// Read-only report on the current week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub completed: usize,
    pub total: usize,
    pub percentage: Percentage,
    pub current_streak: u32,
    pub best_streak: u32,
    pub days: Vec<DayStatus>,
}

impl WeekSummary {
    pub fn glyphs(&self) -> Vec<&'static str> {
        self.days.iter().map(DayStatus::glyph).collect()
    }
}

pub fn summarize(state: &WeeklyState) -> WeekSummary {
    let days = state
        .progress_by_day
        .iter()
        .map(|(day, completed)| DayStatus {
            day,
            completed: *completed,
            exercise: state.exercise_by_day[day].clone(),
        })
        .collect::<Vec<_>>();
    let completed = state.completed_days();
    let total = days.len();

    WeekSummary {
        completed,
        total,
        percentage: Percentage::of(completed, total),
        current_streak: state.current_streak,
        best_streak: state.best_streak,
        days,
    }
}

impl Display for WeekSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{COMPLETED_GLYPH} {}/{} days completed ({})",
            self.completed, self.total, self.percentage
        )?;
        writeln!(
            f,
            "🔥 Current streak: {} days | Best: {}",
            self.current_streak, self.best_streak
        )?;
        writeln!(f)?;
        for status in &self.days {
            write!(f, "{} {}", status.glyph(), status.day)?;
            if !status.exercise.is_empty() {
                write!(f, ": {}", status.exercise)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::tracker::{day::Day, state::WeeklyState};

    use super::{summarize, COMPLETED_GLYPH, PENDING_GLYPH};

    #[test]
    fn summary_counts_and_glyphs() {
        let mut state = WeeklyState::default();
        state.progress_by_day[Day::Monday] = true;
        state.progress_by_day[Day::Tuesday] = true;
        state.progress_by_day[Day::Thursday] = true;
        state.exercise_by_day[Day::Monday] = "deadlift".into();
        state.current_streak = 2;
        state.best_streak = 5;
        let before = state.clone();

        let summary = summarize(&state);

        assert_eq!(state, before);
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.total, 7);
        assert_eq!(summary.percentage.to_string(), "42.9%");
        assert_eq!(summary.current_streak, 2);
        assert_eq!(summary.best_streak, 5);
        assert_eq!(
            summary.glyphs(),
            vec![
                COMPLETED_GLYPH,
                COMPLETED_GLYPH,
                PENDING_GLYPH,
                COMPLETED_GLYPH,
                PENDING_GLYPH,
                PENDING_GLYPH,
                PENDING_GLYPH
            ]
        );

        let text = summary.to_string();
        assert!(text.starts_with("✅ 3/7 days completed (42.9%)"));
        assert!(text.contains("✅ Monday: deadlift"));
        assert!(text.contains("❌ Sunday\n"));
    }

    #[test]
    fn empty_week_summary() {
        let summary = summarize(&WeeklyState::default());
        assert_eq!(summary.completed, 0);
        assert_eq!(*summary.percentage, 0.);
        assert!(summary.glyphs().iter().all(|g| *g == PENDING_GLYPH));
    }
}
