//! Local data directory operations.
//!
//! Everything the tool persists lives under one data directory:
//! - Parsed meetings, appended per run
//! - Report snapshots, one per run

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Report;

pub mod jsonl;

pub use jsonl::{JsonlReader, JsonlWriter};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn meetings_path(&self) -> PathBuf {
        self.data_dir.join("meetings.jsonl")
    }

    pub fn reports_path(&self) -> PathBuf {
        self.data_dir.join("reports.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// One report run as persisted to the reports file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub stored_at: DateTime<Utc>,
    pub report: Report,
}

impl ReportSnapshot {
    pub fn new(report: Report) -> Self {
        Self {
            stored_at: Utc::now(),
            report,
        }
    }
}
