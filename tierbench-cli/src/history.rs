//! Run history
//!
//! Parsed benchmark runs kept newest-first in the store, trimmed to a
//! bounded number of records so the backing document cannot grow without
//! limit.

use crate::presets::generate_id;
use crate::store::{KvStore, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tierbench_config::BenchmarkConfig;
use tierbench_report::{BenchmarkStats, parse_output};

const RESULTS_KEY: &str = "benchmark_results";

/// Default cap on stored run records
pub const DEFAULT_MAX_RECORDS: usize = 50;

/// Lifecycle state of a recorded run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Still producing output
    Running,
    /// Finished with a recognizable report
    Completed,
    /// Finished without one
    Failed,
}

/// One benchmark run: the configuration it used, the raw report text, and
/// the statistics extracted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Stable identifier
    pub id: String,
    /// When the record was created
    pub timestamp: DateTime<Utc>,
    /// Configuration the run was launched with
    pub config: BenchmarkConfig,
    /// Raw report text
    pub output: String,
    /// Lifecycle state
    pub status: RunStatus,
    /// Wall-clock duration in milliseconds, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Extracted statistics, absent when the output was unrecognizable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<BenchmarkStats>,
}

impl RunRecord {
    /// Build a record from raw report text, parsing statistics on the way.
    /// The record completes when stats were extracted and fails otherwise.
    pub fn from_output(config: BenchmarkConfig, output: impl Into<String>) -> Self {
        let output = output.into();
        let stats = parse_output(&output);
        let status = if stats.is_some() {
            RunStatus::Completed
        } else {
            RunStatus::Failed
        };
        Self {
            id: generate_id(),
            timestamp: Utc::now(),
            config,
            output,
            status,
            duration_ms: None,
            stats,
        }
    }
}

/// Bounded, newest-first run log living in a [`KvStore`].
pub struct RunHistory<'a, S: KvStore> {
    store: &'a mut S,
    max_records: usize,
}

impl<'a, S: KvStore> RunHistory<'a, S> {
    /// History with the default record cap.
    pub fn new(store: &'a mut S) -> Self {
        Self::with_limit(store, DEFAULT_MAX_RECORDS)
    }

    /// History keeping at most `max_records` entries.
    pub fn with_limit(store: &'a mut S, max_records: usize) -> Self {
        Self { store, max_records }
    }

    /// All records, newest first.
    pub fn list(&self) -> Result<Vec<RunRecord>, StoreError> {
        match self.store.get(RESULTS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Prepend a record, dropping the oldest entries beyond the cap.
    pub fn push(&mut self, record: RunRecord) -> Result<(), StoreError> {
        let mut records = self.list()?;
        records.insert(0, record);
        records.truncate(self.max_records);
        self.persist(&records)
    }

    /// Remove one record by id; returns whether it existed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.persist(&records)?;
        Ok(true)
    }

    /// Drop the whole history.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(RESULTS_KEY)
    }

    fn persist(&mut self, records: &[RunRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.store.set(RESULTS_KEY, &json)
    }
}
