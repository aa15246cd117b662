use anyhow::Result;
use tracing::{debug, warn};

use crate::tracker::state::WeeklyState;

use super::{
    entities::{StoredState, WeeklyStateEntity},
    DocumentStorage,
};

/// What was found when looking for the stored week.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedDocument {
    Missing,
    /// Couldn't be read or isn't valid JSON of the expected shape.
    Unreadable,
    /// Valid JSON but without one of the day tables.
    Incomplete,
    Stored(StoredState),
}

impl LoadedDocument {
    pub fn into_stored(self) -> Option<StoredState> {
        match self {
            LoadedDocument::Stored(v) => Some(v),
            LoadedDocument::Missing | LoadedDocument::Unreadable | LoadedDocument::Incomplete => {
                None
            }
        }
    }
}

/// Loads the week document. Never fails, problems are reported through [LoadedDocument].
pub async fn load_state(document: &impl DocumentStorage) -> LoadedDocument {
    let text = match document.read().await {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!("No stored week yet");
            return LoadedDocument::Missing;
        }
        Err(e) => {
            warn!("Failed to read stored week {e:?}");
            return LoadedDocument::Unreadable;
        }
    };

    match serde_json::from_str::<WeeklyStateEntity>(&text) {
        Ok(entity) => match entity.into_stored() {
            Some(stored) => LoadedDocument::Stored(stored),
            None => {
                warn!("Stored week is missing its day tables");
                LoadedDocument::Incomplete
            }
        },
        Err(e) => {
            // Happens with empty files or hand edited documents.
            warn!("Stored week is corrupted {e}");
            LoadedDocument::Unreadable
        }
    }
}

/// Overwrites the week document with `state`.
pub async fn save_state(document: &impl DocumentStorage, state: &WeeklyState) -> Result<()> {
    let text = serde_json::to_string_pretty(&WeeklyStateEntity::from(state))?;
    document.write(&text).await
}
