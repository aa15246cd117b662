use anyhow::Result;
use tracing::{debug, warn};

use crate::tracker::reminder::ReminderConfig;

use super::DocumentStorage;

/// Loads the reminder config, falling back to defaults on any problem.
pub async fn load_config(document: &impl DocumentStorage) -> ReminderConfig {
    let text = match document.read().await {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!("No stored config, using defaults");
            return ReminderConfig::default();
        }
        Err(e) => {
            warn!("Failed to read config {e:?}");
            return ReminderConfig::default();
        }
    };

    match serde_json::from_str::<ReminderConfig>(&text) {
        Ok(config) if config.is_valid() => config,
        Ok(config) => {
            warn!("Config has an out of range reminder time {config:?}, using defaults");
            ReminderConfig::default()
        }
        Err(e) => {
            warn!("Config is corrupted {e}, using defaults");
            ReminderConfig::default()
        }
    }
}

pub async fn save_config(document: &impl DocumentStorage, config: &ReminderConfig) -> Result<()> {
    let text = serde_json::to_string_pretty(config)?;
    document.write(&text).await
}
