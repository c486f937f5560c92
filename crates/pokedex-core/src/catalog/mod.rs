//! The catalog cache: the single place consumers read creatures from.
//!
//! `CatalogCache` keeps a name-keyed table and a position-ordered sequence
//! mirroring remote pagination. At first use it probes the remote once and
//! either works online (fetching and persisting what it is missing) or
//! offline (serving only what the local store held at startup).

pub mod cache;

pub use cache::{CatalogCache, Mode, Slot, DEFAULT_PAGE_SIZE};
