//! History storage backends
//!
//! Session history persists behind a small trait so the conversation
//! core can run against the real file store or an in-memory fake.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use super::message::Message;
use crate::Result;

/// Durable storage for session history.
///
/// `load` is infallible by contract: a missing or unreadable record means
/// an empty history. `save` replaces the whole record at once, a reader
/// must never observe a partial write.
pub trait HistoryStore: Send + Sync {
    /// Load stored history, empty when nothing usable is stored
    fn load(&self) -> Vec<Message>;

    /// Overwrite the stored history with the given messages
    fn save(&self, messages: &[Message]) -> Result<()>;

    /// Remove the stored record entirely
    fn clear(&self) -> Result<()>;
}

/// File-backed history store keeping one JSON file in the storage directory
#[derive(Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    /// History file name inside the storage directory
    pub const FILE_NAME: &'static str = "chat_history.json";

    /// Create a store writing to `dir/chat_history.json`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(Self::FILE_NAME),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Vec<Message> {
        if !self.path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read history file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(
                    "Discarding corrupt history file {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&self, messages: &[Message]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(messages)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory history store for tests and `--ephemeral` runs
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl MemoryHistoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    fn save(&self, messages: &[Message]) -> Result<()> {
        *self.messages.lock() = messages.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.messages.lock().clear();
        Ok(())
    }
}
