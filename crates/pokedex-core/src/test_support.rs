//! Test doubles shared by the unit tests of this crate.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::api::{ApiError, CatalogSource};
use crate::models::dto::{NamedDto, SpritesDto, StatDto, TypeSlotDto};
use crate::models::{CatalogEntry, CreatureType, EntryDto, HeaderPage};
use crate::store::EntryStore;

/// Build an entry whose stats are derived from its id.
pub fn entry(id: u32, name: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
        image_url: Some(format!("https://img.example/{}.png", id)),
        height: 1.0 + id as f64,
        weight: 10.0 * id as f64,
        types: vec![CreatureType::Normal],
        attack: id * 3 % 100,
        defense: id * 7 % 100,
        hp: id * 11 % 100,
    }
}

/// A catalog of `count` entries named `mon-1`, `mon-2`, ...
pub fn catalog(count: u32) -> Vec<CatalogEntry> {
    (1..=count).map(|id| entry(id, &format!("mon-{}", id))).collect()
}

pub fn dto_for(entry: &CatalogEntry) -> EntryDto {
    let stat = |name: &str, value: u32| StatDto {
        base_stat: value,
        stat: NamedDto {
            name: name.to_string(),
        },
    };
    EntryDto {
        name: entry.name.clone(),
        id: entry.id,
        height: entry.height,
        weight: entry.weight,
        sprites: SpritesDto {
            front_default: entry.image_url.clone(),
        },
        types: entry
            .types
            .iter()
            .map(|t| TypeSlotDto {
                type_: NamedDto {
                    name: t.as_str().to_string(),
                },
            })
            .collect(),
        stats: vec![
            stat("hp", entry.hp),
            stat("attack", entry.attack),
            stat("defense", entry.defense),
        ],
    }
}

/// In-memory remote with call counters and failure switches.
#[derive(Default)]
pub struct FakeSource {
    entries: Vec<CatalogEntry>,
    unreachable: AtomicBool,
    failing_names: Mutex<HashSet<String>>,
    entry_delay: Option<Duration>,
    header_calls: AtomicUsize,
    entry_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    pub fn unreachable() -> Self {
        let source = Self::default();
        source.unreachable.store(true, Ordering::SeqCst);
        source
    }

    pub fn with_entry_delay(mut self, delay: Duration) -> Self {
        self.entry_delay = Some(delay);
        self
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn fail_entry(&self, name: &str) {
        self.failing_names
            .lock()
            .expect("lock")
            .insert(name.to_string());
    }

    pub fn header_calls(&self) -> usize {
        self.header_calls.load(Ordering::SeqCst)
    }

    pub fn entry_calls(&self) -> usize {
        self.entry_calls.load(Ordering::SeqCst)
    }

    pub fn remote_calls(&self) -> usize {
        self.header_calls() + self.entry_calls()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn timeout(what: &str) -> ApiError {
        ApiError::ServerError(format!("timed out fetching {}", what))
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn fetch_headers(&self, offset: usize, count: usize) -> Result<HeaderPage, ApiError> {
        self.header_calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(Self::timeout("headers"));
        }
        let names = self
            .entries
            .iter()
            .skip(offset)
            .take(count)
            .map(|e| e.name.clone())
            .collect();
        Ok(HeaderPage {
            total_count: self.entries.len(),
            names,
        })
    }

    async fn fetch_entry(&self, name: &str) -> Result<EntryDto, ApiError> {
        self.entry_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.entry_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.unreachable.load(Ordering::SeqCst)
            || self.failing_names.lock().expect("lock").contains(name)
        {
            return Err(Self::timeout(name));
        }
        self.entries
            .iter()
            .find(|e| e.name == name || e.id.to_string() == name)
            .map(dto_for)
            .ok_or_else(|| ApiError::NotFound(name.to_string()))
    }
}

/// Store that serves a fixed snapshot and rejects every write.
pub struct ReadOnlyStore {
    entries: Vec<CatalogEntry>,
    pub writes: AtomicUsize,
}

impl ReadOnlyStore {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EntryStore for ReadOnlyStore {
    async fn load_all(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }

    async fn store(&self, entry: &CatalogEntry) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("disk full while writing {}", entry.name)
    }
}
