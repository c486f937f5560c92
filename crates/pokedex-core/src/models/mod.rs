//! Data models for the creature catalog.
//!
//! - `CatalogEntry`, `CreatureType`: the domain record handed to consumers
//! - `EntryDto`, `HeaderListDto`, `HeaderPage`: PokeAPI response shapes

pub mod dto;
pub mod entry;

pub use dto::{EntryDto, HeaderListDto, HeaderPage, MappingError};
pub use entry::{normalize_name, CatalogEntry, CreatureType};
