use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::CatalogEntry;

use super::EntryStore;

/// Subdirectory of the cache directory holding one file per entry.
const ENTRIES_DIR: &str = "entries";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }
}

/// JSON-file backed store.
///
/// Layout: `<cache_dir>/entries/<name>.json`, each file a
/// `CachedData<CatalogEntry>`.
#[derive(Debug, Clone)]
pub struct FileStore {
    entries_dir: PathBuf,
}

impl FileStore {
    pub fn new(cache_dir: impl AsRef<Path>) -> Result<Self> {
        let entries_dir = cache_dir.as_ref().join(ENTRIES_DIR);
        std::fs::create_dir_all(&entries_dir).with_context(|| {
            format!("Failed to create cache directory: {}", entries_dir.display())
        })?;
        Ok(Self { entries_dir })
    }

    pub fn entries_dir(&self) -> &Path {
        &self.entries_dir
    }

    /// Names map to file names one-to-one: ASCII alphanumerics and `-` are
    /// kept, every other byte (including `_`) becomes `_xx` in hex.
    fn entry_path(&self, name: &str) -> PathBuf {
        let mut file_name = String::with_capacity(name.len());
        for byte in name.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file_name.push(char::from(byte));
            } else {
                let _ = write!(file_name, "_{:02x}", byte);
            }
        }
        self.entries_dir.join(format!("{}.json", file_name))
    }

    fn load_file(path: &Path) -> Result<CachedData<CatalogEntry>> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache file: {}", path.display()))?;
        let cached = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", path.display()))?;
        Ok(cached)
    }

    fn read_all(&self) -> Result<Vec<CatalogEntry>> {
        let mut entries = Vec::new();
        for dir_entry in std::fs::read_dir(&self.entries_dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::load_file(&path) {
                Ok(cached) => entries.push(cached.data),
                Err(e) => warn!(error = %format!("{:#}", e), "Skipping unreadable cache file"),
            }
        }
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }
}

#[async_trait]
impl EntryStore for FileStore {
    async fn load_all(&self) -> Vec<CatalogEntry> {
        if !self.entries_dir.exists() {
            return Vec::new();
        }
        match self.read_all() {
            Ok(entries) => {
                debug!(count = entries.len(), dir = %self.entries_dir.display(), "Loaded persisted entries");
                entries
            }
            Err(e) => {
                warn!(error = %e, "Failed to read cache directory, starting empty");
                Vec::new()
            }
        }
    }

    async fn store(&self, entry: &CatalogEntry) -> Result<()> {
        let path = self.entry_path(&entry.name);
        let contents = serde_json::to_string_pretty(&CachedData::new(entry))?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write cache file: {}", path.display()))?;
        Ok(())
    }
}
