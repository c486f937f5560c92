use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::try_join_all;
use rand::Rng;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::api::CatalogSource;
use crate::error::{CatalogError, Result};
use crate::models::{normalize_name, CatalogEntry};
use crate::store::EntryStore;

/// Entries per page when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// One position of the ordered catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Not fetched yet
    Absent,
    Present(Arc<CatalogEntry>),
}

impl Slot {
    pub fn entry(&self) -> Option<&Arc<CatalogEntry>> {
        match self {
            Slot::Absent => None,
            Slot::Present(entry) => Some(entry),
        }
    }
}

/// Operating mode, chosen once by the startup probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Remote reachable; the ordered catalog mirrors `total_count` remote positions
    Online { total_count: usize },
    /// Remote unreachable; only locally persisted entries are served
    Offline,
}

#[derive(Debug, Default)]
struct CatalogState {
    by_name: HashMap<String, Arc<CatalogEntry>>,
    by_position: Vec<Slot>,
}

type PendingFetch = Arc<OnceCell<Arc<CatalogEntry>>>;

/// In-memory view of the catalog backed by a remote source and a local store.
///
/// Initialization is lazy: the first call to any operation loads the local
/// store and probes the remote, and the resulting [`Mode`] is fixed for the
/// lifetime of the cache. Entries are shared as `Arc`s and never evicted.
pub struct CatalogCache {
    source: Arc<dyn CatalogSource>,
    store: Arc<dyn EntryStore>,
    page_size: usize,
    mode: OnceCell<Mode>,
    state: Mutex<CatalogState>,
    pending: Mutex<HashMap<String, PendingFetch>>,
}

impl CatalogCache {
    /// `page_size` of zero is treated as one.
    pub fn new(source: Arc<dyn CatalogSource>, store: Arc<dyn EntryStore>, page_size: usize) -> Self {
        Self {
            source,
            store,
            page_size: page_size.max(1),
            mode: OnceCell::new(),
            state: Mutex::new(CatalogState::default()),
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Mode of the cache, initializing it if this is the first access.
    pub async fn mode(&self) -> Mode {
        self.ensure_initialized().await
    }

    /// Size of the ordered catalog as currently known.
    pub async fn known_count(&self) -> usize {
        self.ensure_initialized().await;
        self.state().by_position.len()
    }

    /// Entries at `[offset, offset + page_size)` where
    /// `offset = page_size * page_number + paging_offset`.
    ///
    /// A window running past the end of the catalog yields a short or empty
    /// page. Online, a window with any unfetched slot is fetched in full and
    /// its entries resolved concurrently; one failed resolution fails the page.
    pub async fn get_page(
        &self,
        page_number: usize,
        paging_offset: usize,
    ) -> Result<Vec<Arc<CatalogEntry>>> {
        let mode = self.ensure_initialized().await;
        let offset = self
            .page_size
            .saturating_mul(page_number)
            .saturating_add(paging_offset);

        if let Some(cached) = self.cached_window(offset) {
            debug!(offset, count = cached.len(), "Page served from cache");
            return Ok(cached);
        }
        if mode == Mode::Offline {
            // The offline sequence is dense, so any window is a cache hit.
            return Ok(Vec::new());
        }

        let headers = self.source.fetch_headers(offset, self.page_size).await?;
        debug!(offset, count = headers.names.len(), "Resolving page headers");

        let resolved = try_join_all(headers.names.iter().map(|name| self.get_by_name(name))).await?;

        let mut state = self.state();
        for (i, entry) in resolved.iter().enumerate() {
            let position = offset + i;
            if position >= state.by_position.len() {
                state.by_position.resize(position + 1, Slot::Absent);
            }
            state.by_position[position] = Slot::Present(Arc::clone(entry));
        }
        Ok(resolved)
    }

    /// A random starting point for browsing: `page_number` in
    /// `[0, known_count / page_size)` (0 if the catalog is smaller than a page)
    /// and `paging_offset` in `[0, page_size)`.
    ///
    /// The resulting window may run past the end of the catalog.
    pub async fn get_random_page_number_and_offset(&self) -> (usize, usize) {
        let known = self.known_count().await;
        let pages = known / self.page_size;

        let mut rng = rand::thread_rng();
        let page_number = if pages == 0 { 0 } else { rng.gen_range(0..pages) };
        let paging_offset = rng.gen_range(0..self.page_size);
        (page_number, paging_offset)
    }

    /// Look up one entry by name (case-insensitive).
    ///
    /// Online misses are fetched, persisted to the local store, and cached.
    /// Concurrent misses for the same name share a single remote fetch.
    /// A key the remote resolves to another name (a numeric id) is cached
    /// alongside the canonical name for this session only.
    /// Offline misses fail with [`CatalogError::NotFound`].
    pub async fn get_by_name(&self, name: &str) -> Result<Arc<CatalogEntry>> {
        let mode = self.ensure_initialized().await;
        let key = normalize_name(name);

        if let Some(hit) = self.cached_entry(&key) {
            return Ok(hit);
        }
        match mode {
            Mode::Offline => Err(CatalogError::NotFound(key)),
            Mode::Online { .. } => self.fetch_once(&key).await,
        }
    }

    async fn ensure_initialized(&self) -> Mode {
        *self.mode.get_or_init(|| self.initialize()).await
    }

    async fn initialize(&self) -> Mode {
        let persisted: Vec<Arc<CatalogEntry>> = self
            .store
            .load_all()
            .await
            .into_iter()
            .map(Arc::new)
            .collect();

        let mode = match self.source.fetch_headers(0, 1).await {
            Ok(probe) => Mode::Online {
                total_count: probe.total_count,
            },
            Err(e) => {
                warn!(error = %e, "Catalog probe failed, serving persisted entries only");
                Mode::Offline
            }
        };

        let mut state = self.state();
        state.by_name = persisted
            .iter()
            .map(|e| (e.name.clone(), Arc::clone(e)))
            .collect();
        state.by_position = match mode {
            Mode::Online { total_count } => vec![Slot::Absent; total_count],
            Mode::Offline => persisted.into_iter().map(Slot::Present).collect(),
        };
        info!(
            ?mode,
            persisted = state.by_name.len(),
            positions = state.by_position.len(),
            "Catalog initialized"
        );
        mode
    }

    async fn fetch_once(&self, key: &str) -> Result<Arc<CatalogEntry>> {
        let pending = Arc::clone(self.pending().entry(key.to_string()).or_default());

        let result = pending
            .get_or_try_init(|| self.fetch_and_persist(key))
            .await
            .cloned();

        // Settled either way; a later caller may already have replaced the cell.
        let mut in_flight = self.pending();
        if in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, &pending))
        {
            in_flight.remove(key);
        }
        result
    }

    async fn fetch_and_persist(&self, key: &str) -> Result<Arc<CatalogEntry>> {
        // Another caller may have finished the same fetch between our lookup and now.
        if let Some(hit) = self.cached_entry(key) {
            return Ok(hit);
        }

        debug!(name = key, "Cache miss, fetching entry");
        let dto = self.source.fetch_entry(key).await?;
        let entry = CatalogEntry::try_from(dto)?;
        self.store
            .store(&entry)
            .await
            .map_err(|e| CatalogError::Persistence(format!("{:#}", e)))?;

        let entry = Arc::new(entry);
        let mut state = self.state();
        state.by_name.insert(entry.name.clone(), Arc::clone(&entry));
        if entry.name != key {
            // The remote also resolves ids; remember the key the caller used.
            state.by_name.insert(key.to_string(), Arc::clone(&entry));
        }
        if let Some(position) = entry.position() {
            if let Some(slot) = state.by_position.get_mut(position) {
                *slot = Slot::Present(Arc::clone(&entry));
            }
        }
        Ok(entry)
    }

    fn cached_entry(&self, key: &str) -> Option<Arc<CatalogEntry>> {
        self.state().by_name.get(key).cloned()
    }

    /// The window starting at `offset`, if every slot in it is present.
    fn cached_window(&self, offset: usize) -> Option<Vec<Arc<CatalogEntry>>> {
        let state = self.state();
        let len = state.by_position.len();
        let start = offset.min(len);
        let end = offset.saturating_add(self.page_size).min(len);
        state.by_position[start..end]
            .iter()
            .map(|slot| slot.entry().cloned())
            .collect()
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<String, PendingFetch>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
