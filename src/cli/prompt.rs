use std::io::{self, BufRead, Write};

use chrono::{DateTime, Local};
use tracing::warn;

use crate::{tracker::rollover::RolloverPrompt, utils::time::date_to_display};

/// Asks on a terminal whether to start a new week. Anything but a yes, including a failed read,
/// keeps the old week.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, last_seen: DateTime<Local>) -> io::Result<bool> {
        write!(
            self.output,
            "A new week has started (last activity on {}). Archive it and reset progress? [y/N] ",
            date_to_display(last_seen.date_naive())
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

impl<R: BufRead, W: Write> RolloverPrompt for TerminalPrompt<R, W> {
    fn confirm_new_week(&mut self, last_seen: DateTime<Local>) -> bool {
        self.ask(last_seen).unwrap_or_else(|e| {
            warn!("Couldn't ask about the new week {e:?}");
            false
        })
    }
}
