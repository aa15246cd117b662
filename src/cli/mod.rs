pub mod config;
pub mod history;
pub mod prompt;
pub mod remind;
pub mod report;

use std::{
    io::{stdout, IsTerminal},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use config::{process_config_command, ConfigAction};
use prompt::TerminalPrompt;
use remind::process_remind_command;
use tracing::{info, level_filters::LevelFilter};

use crate::{
    tracker::{
        day::Day,
        rollover::{FixedAnswer, RolloverOutcome, RolloverPrompt},
        storage::{DocumentStorage, FileDocument, PROGRESS_FILE},
        Tracker, TrackerError,
    },
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX, REMINDER_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "fitweek", version, long_about = None)]
#[command(about = "Weekly workout tracker with streaks and history", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = RolloverMode::Ask,
        help = "What to do when the stored week belongs to an earlier calendar week"
    )]
    rollover: RolloverMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RolloverMode {
    /// Ask on the terminal
    Ask,
    /// Archive the old week and start a new one
    Yes,
    /// Keep tracking the old week
    No,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show the current week day by day")]
    Status,
    #[command(about = "Mark a day as completed. Defaults to today")]
    Done { day: Option<Day> },
    #[command(about = "Save what you trained on a day")]
    Note {
        #[arg(long, short, help = "Day of the note. Defaults to today")]
        day: Option<Day>,
        text: String,
    },
    #[command(about = "Completion, percentage and streaks of the current week")]
    Summary,
    #[command(about = "List archived weeks")]
    History,
    #[command(about = "Show or change reminder settings")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(about = "Wait in the foreground and remind you when today's workout is still open")]
    Remind,
}

/// Runs the command line. A rejected input is reported on stderr and turns into a failing exit
/// code, other errors are returned.
pub async fn run_cli() -> Result<ExitCode> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let prefix = match args.commands {
        Commands::Remind => REMINDER_PREFIX,
        _ => CLI_PREFIX,
    };
    enable_logging(
        prefix,
        &ensure_dir(app_dir.join("logs"))?,
        logging_level,
        args.log,
    )?;

    let colored = stdout().is_terminal();

    match args.commands {
        Commands::Status => {
            let tracker = open_tracker(&app_dir, args.rollover).await?;
            print!(
                "{}",
                report::render_status(&tracker.summarize(), tracker.today(), colored)
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Done { day } => {
            let mut tracker = open_tracker(&app_dir, args.rollover).await?;
            let day = day.unwrap_or_else(|| tracker.today());
            tracker.mark_completed(day).await?;
            println!("Workout for {day} completed 💪");
            println!("{}", report::render_streak(tracker.state()));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Note { day, text } => {
            let mut tracker = open_tracker(&app_dir, args.rollover).await?;
            process_note_command(&mut tracker, day, &text).await
        }
        Commands::Summary => {
            let tracker = open_tracker(&app_dir, args.rollover).await?;
            print!("{}", tracker.summarize());
            Ok(ExitCode::SUCCESS)
        }
        Commands::History => {
            let tracker = open_tracker(&app_dir, args.rollover).await?;
            print!(
                "{}",
                history::render_history(&tracker.state().history, colored)
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { action } => process_config_command(action, &app_dir)
            .await
            .map(|()| ExitCode::SUCCESS),
        Commands::Remind => process_remind_command(&app_dir)
            .await
            .map(|()| ExitCode::SUCCESS),
    }
}

/// Saves a note for `day`, today by default. A blank note is reported and fails the command
/// without touching the stored week.
async fn process_note_command<D: DocumentStorage>(
    tracker: &mut Tracker<D>,
    day: Option<Day>,
    text: &str,
) -> Result<ExitCode> {
    let day = day.unwrap_or_else(|| tracker.today());
    match tracker.set_exercise_note(day, text).await {
        Ok(()) => {
            println!("Exercise for {day}: {}", tracker.state().exercise_by_day[day]);
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ TrackerError::EmptyNote(_)) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(TrackerError::Storage(e)) => Err(e),
    }
}

async fn open_tracker(app_dir: &Path, mode: RolloverMode) -> Result<Tracker<FileDocument>> {
    let document = FileDocument::in_dir(app_dir, PROGRESS_FILE);
    let mut prompt: Box<dyn RolloverPrompt> = match mode {
        RolloverMode::Ask => Box::new(TerminalPrompt::stdio()),
        RolloverMode::Yes => Box::new(FixedAnswer(true)),
        RolloverMode::No => Box::new(FixedAnswer(false)),
    };
    let tracker = Tracker::open(document, Box::new(DefaultClock), prompt.as_mut()).await?;

    match tracker.rollover() {
        Some(RolloverOutcome::RolledOver) => {
            println!("New week started, last week was moved to history.")
        }
        Some(RolloverOutcome::Reinitialized) => {
            println!("Stored week couldn't be read, started a fresh one.")
        }
        Some(RolloverOutcome::Kept) => info!("Continuing with the previous week"),
        Some(RolloverOutcome::Current) | Some(RolloverOutcome::Unchecked) | None => (),
    }
    Ok(tracker)
}
