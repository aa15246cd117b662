use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::tracker::{
    reminder::ReminderConfig,
    storage::{
        config_storage::{load_config, save_config},
        FileDocument, CONFIG_FILE,
    },
};

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the reminder settings
    Show,
    /// Change one or more reminder settings
    Set {
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
        hour: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=59))]
        minute: Option<u8>,
        #[arg(long)]
        enabled: Option<bool>,
    },
    /// Restore the default settings
    Reset,
}

/// Applies the requested changes on top of `config`.
fn apply(
    mut config: ReminderConfig,
    hour: Option<u8>,
    minute: Option<u8>,
    enabled: Option<bool>,
) -> ReminderConfig {
    if let Some(hour) = hour {
        config.reminder_hour = hour;
    }
    if let Some(minute) = minute {
        config.reminder_minute = minute;
    }
    if let Some(enabled) = enabled {
        config.reminder_enabled = enabled;
    }
    config
}

pub async fn process_config_command(action: ConfigAction, app_dir: &Path) -> Result<()> {
    let document = FileDocument::in_dir(app_dir, CONFIG_FILE);
    match action {
        ConfigAction::Show => {
            let config = load_config(&document).await;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Set {
            hour,
            minute,
            enabled,
        } => {
            let config = apply(load_config(&document).await, hour, minute, enabled);
            save_config(&document, &config).await?;
            info!("Saved config {config:?}");
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            save_config(&document, &ReminderConfig::default()).await?;
            println!("Config reset to defaults");
        }
    }
    Ok(())
}
