//! Newest-first record of detection runs

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use advisor_client::DetectionReport;
use advisor_core::utils::truncate;
use advisor_core::Result;

/// One recorded detection run
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub timestamp: DateTime<Utc>,
    /// Leading excerpt of the analyzed text
    pub excerpt: String,
    pub report: DetectionReport,
}

/// File-backed detection history, newest entry first
pub struct DetectionLog {
    path: PathBuf,
}

impl DetectionLog {
    /// History file name inside the storage directory
    pub const FILE_NAME: &'static str = "detection_history.json";

    /// Create a log writing to `dir/detection_history.json`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(Self::FILE_NAME),
        }
    }

    /// Load stored records, empty when nothing usable is stored
    pub fn load(&self) -> Vec<DetectionRecord> {
        if !self.path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Failed to read detection history {}: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Discarding corrupt detection history {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Prepend a record for this run and persist the whole log
    pub fn append(&self, text: &str, report: &DetectionReport) -> Result<()> {
        let mut records = self.load();
        records.insert(
            0,
            DetectionRecord {
                timestamp: Utc::now(),
                excerpt: truncate(text, 100),
                report: report.clone(),
            },
        );

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&records)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
