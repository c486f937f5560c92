//! Core library for pokedex.
//!
//! Provides the PokeAPI client, the local entry store, and the catalog cache
//! that arbitrates between them, plus display projections for consumers.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! let config = pokedex_core::Config::load()?;
//! let catalog = config.open_catalog()?;
//! let first_page = catalog.get_page(0, 0).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod utils;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{CatalogCache, Mode, DEFAULT_PAGE_SIZE};
pub use config::Config;
pub use error::CatalogError;
pub use models::{CatalogEntry, CreatureType};
