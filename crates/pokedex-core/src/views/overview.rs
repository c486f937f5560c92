use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::CatalogCache;
use crate::error::Result;
use crate::models::CatalogEntry;
use crate::utils::capitalize;

/// One row of the overview list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewEntry {
    pub name: String,
    pub image_url: Option<String>,
    pub attack: u32,
    pub defense: u32,
    pub hp: u32,
}

impl From<&CatalogEntry> for OverviewEntry {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            name: capitalize(&entry.name),
            image_url: entry.image_url.clone(),
            attack: entry.attack,
            defense: entry.defense,
            hp: entry.hp,
        }
    }
}

/// Stat the overview list can be ordered by (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortColumn {
    Attack,
    Defense,
    Hp,
}

impl SortColumn {
    fn key(&self, entry: &OverviewEntry) -> u32 {
        match self {
            SortColumn::Attack => entry.attack,
            SortColumn::Defense => entry.defense,
            SortColumn::Hp => entry.hp,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewState {
    pub page: usize,
    pub paging_offset: usize,
    pub is_end_reached: bool,
    pub sort: Option<SortColumn>,
    pub entries: Vec<OverviewEntry>,
    /// Catalog position where a wrapped random walk started; paging stops
    /// before reaching it again.
    pub wrap_limit: Option<usize>,
}

impl OverviewState {
    fn apply_sort(&mut self) {
        if let Some(column) = self.sort {
            // Stable, so equal stats keep catalog order
            self.entries.sort_by(|a, b| column.key(b).cmp(&column.key(a)));
        }
    }

    fn append(&mut self, page: &[Arc<CatalogEntry>]) {
        self.entries
            .extend(page.iter().map(|e| OverviewEntry::from(e.as_ref())));
        self.apply_sort();
    }
}

/// Drives the paginated overview list on top of a shared catalog.
///
/// A failed call returns the error and leaves the state as it was.
pub struct OverviewController {
    catalog: Arc<CatalogCache>,
    state: OverviewState,
}

impl OverviewController {
    pub fn new(catalog: Arc<CatalogCache>) -> Self {
        Self {
            catalog,
            state: OverviewState::default(),
        }
    }

    pub fn state(&self) -> &OverviewState {
        &self.state
    }

    /// Reset to the start of the catalog.
    pub async fn load_first_page(&mut self) -> Result<()> {
        self.load_from(0, 0).await
    }

    /// Reset the list to a single page at the given position.
    pub async fn load_from(&mut self, page_number: usize, paging_offset: usize) -> Result<()> {
        let page = self.catalog.get_page(page_number, paging_offset).await?;
        let mut state = OverviewState {
            page: page_number,
            paging_offset,
            sort: self.state.sort,
            is_end_reached: page.is_empty(),
            ..Default::default()
        };
        state.append(&page);
        self.state = state;
        Ok(())
    }

    /// Append the page after the current one. Does nothing once the end
    /// has been reached.
    pub async fn load_next_page(&mut self) -> Result<()> {
        if self.state.is_end_reached {
            return Ok(());
        }
        let page_size = self.catalog.page_size();
        let next = self.state.page + 1;
        let start = page_size.saturating_mul(next).saturating_add(self.state.paging_offset);
        let mut page = self
            .catalog
            .get_page(next, self.state.paging_offset)
            .await?;

        let mut at_limit = false;
        if let Some(limit) = self.state.wrap_limit {
            page.truncate(limit.saturating_sub(start));
            at_limit = start.saturating_add(page_size) >= limit;
        }

        debug!(page = next, count = page.len(), "Appending overview page");
        self.state.page = next;
        self.state.is_end_reached = page.is_empty() || at_limit;
        self.state.append(&page);
        Ok(())
    }

    /// Start browsing from a random point of the catalog.
    ///
    /// When the random window runs off the end of the catalog, the list
    /// wraps to position 0 and paging continues from there up to the random
    /// start, so a full walk lists every entry once.
    pub async fn reload_from_random_page(&mut self) -> Result<()> {
        let (page_number, paging_offset) = self.catalog.get_random_page_number_and_offset().await;
        self.load_wrapping_from(page_number, paging_offset).await
    }

    async fn load_wrapping_from(&mut self, page_number: usize, paging_offset: usize) -> Result<()> {
        let page_size = self.catalog.page_size();
        let start = page_size.saturating_mul(page_number).saturating_add(paging_offset);
        let page = self.catalog.get_page(page_number, paging_offset).await?;

        let mut state = OverviewState {
            page: page_number,
            paging_offset,
            sort: self.state.sort,
            is_end_reached: page.is_empty(),
            ..Default::default()
        };
        state.append(&page);

        if page.len() < page_size && start > 0 {
            let mut wrapped = self.catalog.get_page(0, 0).await?;
            wrapped.truncate(start);
            debug!(from = start, added = wrapped.len(), "Random page wrapped to start");
            state.is_end_reached = wrapped.len() < page_size || page_size >= start;
            state.append(&wrapped);
            state.page = 0;
            state.paging_offset = 0;
            state.wrap_limit = Some(start);
        }
        self.state = state;
        Ok(())
    }

    /// Order the list by a stat, highest first. `None` keeps the current
    /// order and stops re-sorting as pages are appended.
    pub fn sort_by(&mut self, column: Option<SortColumn>) {
        self.state.sort = column;
        self.state.apply_sort();
    }
}
