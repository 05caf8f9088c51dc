//! Configuration presets
//!
//! Named, persisted benchmark configurations. Presets live under a single
//! store key as a JSON array and are identified by a generated id; names are
//! free-form and what users normally address them by.

use crate::store::{KvStore, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tierbench_config::BenchmarkConfig;

const PRESETS_KEY: &str = "config_presets";

/// Generate a short unique id: millisecond timestamp plus a random suffix.
pub(crate) fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::random();
    format!("{millis:x}-{:06x}", suffix & 0xff_ffff)
}

/// A saved benchmark configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPreset {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// The stored configuration
    pub config: BenchmarkConfig,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time, refreshed on every save
    pub updated_at: DateTime<Utc>,
}

impl ConfigPreset {
    /// New preset with a generated id and current timestamps.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        config: BenchmarkConfig,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            description: description.into(),
            config,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Preset collection living in a [`KvStore`].
pub struct PresetStore<'a, S: KvStore> {
    store: &'a mut S,
}

impl<'a, S: KvStore> PresetStore<'a, S> {
    /// Wrap a store.
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// All presets, in insertion order.
    pub fn list(&self) -> Result<Vec<ConfigPreset>, StoreError> {
        match self.store.get(PRESETS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Look a preset up by id, falling back to an exact name match.
    pub fn find(&self, id_or_name: &str) -> Result<Option<ConfigPreset>, StoreError> {
        let presets = self.list()?;
        Ok(presets
            .iter()
            .find(|p| p.id == id_or_name)
            .or_else(|| presets.iter().find(|p| p.name == id_or_name))
            .cloned())
    }

    /// Insert a preset, or replace the existing one with the same id. A
    /// replacement gets a fresh `updated_at`.
    pub fn save(&mut self, preset: ConfigPreset) -> Result<(), StoreError> {
        let mut presets = self.list()?;
        match presets.iter_mut().find(|p| p.id == preset.id) {
            Some(existing) => {
                *existing = ConfigPreset {
                    updated_at: Utc::now(),
                    ..preset
                };
            }
            None => presets.push(preset),
        }
        self.persist(&presets)
    }

    /// Remove the preset with the given id; returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut presets = self.list()?;
        let before = presets.len();
        presets.retain(|p| p.id != id);
        if presets.len() == before {
            return Ok(false);
        }
        self.persist(&presets)?;
        Ok(true)
    }

    fn persist(&mut self, presets: &[ConfigPreset]) -> Result<(), StoreError> {
        let json = serde_json::to_string(presets)?;
        self.store.set(PRESETS_KEY, &json)
    }
}
