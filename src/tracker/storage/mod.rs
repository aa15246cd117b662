//! Storage is organized around plain text documents.
//! The basic idea is:
//!  - There is an application directory with one document for the week and one for the config.
//!  - Documents are pretty-printed JSON and are always overwritten as a whole.
//!  - Anything that can't be read is replaced with defaults instead of failing.

pub mod config_storage;
pub mod entities;
pub mod state_storage;

use std::{
    future::Future,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::fs::operations::{overwrite_locked, read_locked};

pub const PROGRESS_FILE: &str = "progress.json";
pub const CONFIG_FILE: &str = "config.json";

/// Interface for abstracting where a single document lives.
pub trait DocumentStorage {
    /// Returns the stored text, `None` if nothing was stored yet.
    fn read(&self) -> impl Future<Output = Result<Option<String>>>;

    /// Replaces the stored text.
    fn write(&self, contents: &str) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> DocumentStorage for T
where
    T::Target: DocumentStorage,
{
    fn read(&self) -> impl Future<Output = Result<Option<String>>> {
        self.deref().read()
    }

    fn write(&self, contents: &str) -> impl Future<Output = Result<()>> {
        self.deref().write(contents)
    }
}

/// Document kept in a file on disk.
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: &Path, file_name: &str) -> Self {
        Self::new(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStorage for FileDocument {
    async fn read(&self) -> Result<Option<String>> {
        debug!("Reading {:?}", self.path);
        Ok(read_locked(&self.path).await?)
    }

    async fn write(&self, contents: &str) -> Result<()> {
        debug!("Writing {:?}", self.path);
        overwrite_locked(&self.path, contents.as_bytes()).await?;
        Ok(())
    }
}

/// Document that only lives as long as the process, for session-backed front ends.
#[derive(Default)]
pub struct SessionDocument {
    contents: Mutex<Option<String>>,
}

impl SessionDocument {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }
}

impl DocumentStorage for SessionDocument {
    async fn read(&self) -> Result<Option<String>> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| anyhow!("Session document lock was poisoned"))?;
        Ok(contents.clone())
    }

    async fn write(&self, contents: &str) -> Result<()> {
        let mut stored = self
            .contents
            .lock()
            .map_err(|_| anyhow!("Session document lock was poisoned"))?;
        *stored = Some(contents.to_string());
        Ok(())
    }
}
