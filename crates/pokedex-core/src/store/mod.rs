//! Local persistence for catalog entries.
//!
//! Entries fetched from the remote are written here so a later session can
//! fall back to them when the network is unavailable.
//!
//! - `FileStore`: one JSON file per entry in the cache directory
//! - `MemoryStore`: process-local, for sessions that should leave no trace

pub mod file;

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::CatalogEntry;

pub use file::{CachedData, FileStore};

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Every persisted entry, ordered by id. A missing or unreadable store
    /// yields an empty list.
    async fn load_all(&self) -> Vec<CatalogEntry>;

    /// Persist one entry, replacing any previous record with the same name.
    async fn store(&self, entry: &CatalogEntry) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, CatalogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let entries = entries.into_iter().map(|e| (e.name.clone(), e)).collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn load_all(&self) -> Vec<CatalogEntry> {
        let Ok(entries) = self.entries.lock() else {
            return Vec::new();
        };
        let mut all: Vec<CatalogEntry> = entries.values().cloned().collect();
        all.sort_by_key(|e| e.id);
        all
    }

    async fn store(&self, entry: &CatalogEntry) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        entries.insert(entry.name.clone(), entry.clone());
        Ok(())
    }
}
