//! Staging cache persisted as JSON between runs

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use timetable_lint::StagingCache;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// [`StagingCache`] backed by a JSON file
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    entries: BTreeMap<String, Entry>,
    dirty: bool,
}

impl FileCache {
    /// Load the cache at `path`; a missing file is an empty cache
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read cache '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse cache '{}'", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Write the live entries back when anything was staged
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let now = Utc::now();
        self.entries.retain(|_, entry| entry.expires_at > now);

        let text = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("Failed to write cache '{}'", self.path.display()))?;
        self.dirty = false;
        Ok(())
    }
}

impl StagingCache for FileCache {
    fn put(&mut self, key: &str, value: &str, ttl: Duration) {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        tracing::debug!("Caching {} until {}", key, expires_at);
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        self.dirty = true;
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.value.clone())
    }
}
