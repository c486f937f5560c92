//! Display-ready projections for catalog consumers.
//!
//! - `OverviewController`: paged list with random start and stat sorting
//! - `Details`: single entry with metric units

pub mod details;
pub mod overview;

pub use details::Details;
pub use overview::{OverviewController, OverviewEntry, OverviewState, SortColumn};
