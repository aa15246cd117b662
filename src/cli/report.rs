use std::fmt::{self, Display};

use ansi_term::{Colour, Style};

use crate::tracker::{day::Day, state::WeeklyState, summary::WeekSummary};

fn paint(style: Style, text: &str, colored: bool) -> String {
    if colored {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

pub fn render_streak(state: &WeeklyState) -> String {
    format!(
        "🔥 Streak: {} days | Best: {}",
        state.current_streak, state.best_streak
    )
}

struct StatusReport<'a> {
    summary: &'a WeekSummary,
    today: Day,
    colored: bool,
}

impl Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            summary,
            today,
            colored,
        } = *self;
        for status in &summary.days {
            let name = format!("{:<9}", status.day.name());
            let name = match (status.completed, status.day == today) {
                (true, true) => paint(Colour::Green.bold(), &name, colored),
                (true, false) => paint(Colour::Green.normal(), &name, colored),
                (false, true) => paint(Style::new().bold(), &name, colored),
                (false, false) => name,
            };
            let note = if status.exercise.is_empty() {
                paint(
                    Style::new().dimmed(),
                    &format!("({})", status.day.suggested_focus()),
                    colored,
                )
            } else {
                status.exercise.clone()
            };
            let marker = if status.day == today { " <- today" } else { "" };
            writeln!(f, "{} {name} {note}{marker}", status.glyph())?;
        }
        writeln!(
            f,
            "\n{}/{} days ({}) | 🔥 {} current | {} best",
            summary.completed,
            summary.total,
            summary.percentage,
            summary.current_streak,
            summary.best_streak
        )
    }
}

/// One line per day. Days without a note show their suggested focus instead.
pub fn render_status(summary: &WeekSummary, today: Day, colored: bool) -> String {
    StatusReport {
        summary,
        today,
        colored,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use crate::tracker::{day::Day, state::WeeklyState, summary::summarize};

    use super::{render_status, render_streak};

    #[test]
    fn status_lines() {
        let mut state = WeeklyState::default();
        state.progress_by_day[Day::Monday] = true;
        state.exercise_by_day[Day::Monday] = "bench press".into();
        state.current_streak = 1;
        state.best_streak = 1;

        let text = render_status(&summarize(&state), Day::Tuesday, false);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "✅ Monday    bench press");
        assert_eq!(lines[1], "❌ Tuesday   (Back) <- today");
        assert_eq!(lines[6], "❌ Sunday    (Rest)");
        assert_eq!(lines.last().copied(), Some("1/7 days (14.3%) | 🔥 1 current | 1 best"));
    }

    #[test]
    fn streak_line() {
        let state = WeeklyState {
            current_streak: 2,
            best_streak: 6,
            ..Default::default()
        };
        assert_eq!(render_streak(&state), "🔥 Streak: 2 days | Best: 6");
    }
}
