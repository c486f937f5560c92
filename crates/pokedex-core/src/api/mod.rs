//! REST API client module for PokeAPI.
//!
//! This module provides the `CatalogSource` trait the catalog cache reads
//! through, and `PokeApiClient`, its HTTP implementation.

pub mod client;
pub mod error;

use async_trait::async_trait;

pub use client::PokeApiClient;
pub use error::ApiError;

use crate::models::{EntryDto, HeaderPage};

/// Remote source of truth for the catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch `count` names starting at `offset`, plus the total catalog size.
    async fn fetch_headers(&self, offset: usize, count: usize) -> Result<HeaderPage, ApiError>;

    /// Fetch the full record for one creature.
    async fn fetch_entry(&self, name: &str) -> Result<EntryDto, ApiError>;
}
