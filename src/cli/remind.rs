use std::path::Path;

use anyhow::Result;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    tracker::{
        day::Day,
        is_today_pending,
        storage::{
            config_storage::load_config, DocumentStorage, FileDocument, CONFIG_FILE,
            PROGRESS_FILE,
        },
    },
    utils::clock::{Clock, DefaultClock},
};

/// Where reminders end up.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, message: &str) {
        println!("\x07{message}");
    }
}

/// Fires once a day at the configured time while today's workout is still open. It only ever
/// reads the stored week.
pub struct Reminder<P, C> {
    progress: P,
    config: C,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
    shutdown: CancellationToken,
}

impl<P: DocumentStorage, C: DocumentStorage> Reminder<P, C> {
    pub fn new(
        progress: P,
        config: C,
        clock: Box<dyn Clock>,
        notifier: Box<dyn Notifier>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            progress,
            config,
            clock,
            notifier,
            shutdown,
        }
    }

    /// Executes the reminder loop. Config is re-read before every wait so edits made in the
    /// meantime apply from the next reminder on.
    pub async fn run(mut self) -> Result<()> {
        loop {
            let config = load_config(&self.config).await;
            let now = self.clock.time();
            let Some(fire_at) = config.next_fire(now) else {
                info!("Reminder is disabled");
                return Ok(());
            };
            debug!("Next reminder at {fire_at}");

            let wait = (fire_at - now).to_std()?;
            let deadline = self.clock.instant() + wait;
            select! {
                _ = self.shutdown.cancelled() => {
                    return Ok(())
                }
                _ = self.clock.sleep_until(deadline) => ()
            }

            let today = Day::of(self.clock.time().date_naive());
            if is_today_pending(&self.progress, self.clock.as_ref()).await {
                info!("Reminding about {today}");
                self.notifier.notify(&format!(
                    "Time to train! {today} ({}) isn't marked as completed yet.",
                    today.suggested_focus()
                ));
            } else {
                debug!("{today} is already completed");
            }
        }
    }
}

/// Detects Ctrl-C sent to the process.
async fn detect_shutdown(cancelation: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            cancelation.cancel();
        },
        _ = cancelation.cancelled() => (),
    };
}

pub async fn process_remind_command(app_dir: &Path) -> Result<()> {
    let shutdown = CancellationToken::new();
    let reminder = Reminder::new(
        FileDocument::in_dir(app_dir, PROGRESS_FILE),
        FileDocument::in_dir(app_dir, CONFIG_FILE),
        Box::new(DefaultClock),
        Box::new(StdoutNotifier),
        shutdown.clone(),
    );

    let (_, result) = tokio::join!(detect_shutdown(shutdown.clone()), async {
        let result = reminder.run().await;
        shutdown.cancel();
        result
    });
    result
}
