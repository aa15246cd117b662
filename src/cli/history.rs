use std::fmt::{self, Display};

use ansi_term::Colour;

use crate::{
    tracker::{state::ArchivedWeek, summary::glyph},
    utils::{percentage::Percentage, time::date_to_display},
};

const BAR_CELLS_PER_DAY: usize = 2;

fn progress_bar(completed: usize, total: usize, colored: bool) -> String {
    let filled = "█".repeat(completed * BAR_CELLS_PER_DAY);
    let empty = "░".repeat((total - completed) * BAR_CELLS_PER_DAY);
    if colored {
        format!("{}{empty}", Colour::Green.paint(filled))
    } else {
        format!("{filled}{empty}")
    }
}

struct HistoryReport<'a> {
    history: &'a [ArchivedWeek],
    colored: bool,
}

impl Display for HistoryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.history.is_empty() {
            return writeln!(f, "No archived weeks yet.");
        }
        for week in self.history {
            let total = week.progress_snapshot.values().count();
            let completed = week.completed_days();
            let strip = week
                .progress_snapshot
                .values()
                .map(|done| glyph(*done))
                .collect::<String>();
            writeln!(
                f,
                "{}  {strip}  {completed}/{total}  {} {}",
                date_to_display(week.date),
                progress_bar(completed, total, self.colored),
                Percentage::of(completed, total)
            )?;
        }
        Ok(())
    }
}

/// Archived weeks, oldest first, each with its day strip and a completion bar.
pub fn render_history(history: &[ArchivedWeek], colored: bool) -> String {
    HistoryReport { history, colored }.to_string()
}
