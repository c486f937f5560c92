//! Plain-text rendering of overview and details projections.

use std::fmt::Write;

use pokedex_core::utils::truncate_string;
use pokedex_core::views::{Details, OverviewState};

/// Width of the name column in the overview table
const NAME_WIDTH: usize = 20;

pub fn render_overview(state: &OverviewState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$} {:>6} {:>7} {:>4}",
        "Name",
        "Attack",
        "Defense",
        "HP",
        width = NAME_WIDTH
    );
    for entry in &state.entries {
        let _ = writeln!(
            out,
            "{:<width$} {:>6} {:>7} {:>4}",
            truncate_string(&entry.name, NAME_WIDTH),
            entry.attack,
            entry.defense,
            entry.hp,
            width = NAME_WIDTH
        );
    }
    if state.entries.is_empty() {
        let _ = writeln!(out, "(no entries)");
    }
    let _ = write!(
        out,
        "page {} (offset {}){}",
        state.page,
        state.paging_offset,
        if state.is_end_reached { ", end of catalog" } else { "" }
    );
    out
}

pub fn render_details(details: &Details) -> String {
    let types = if details.types.is_empty() {
        "-".to_string()
    } else {
        details.types.join(", ")
    };
    let mut out = String::new();
    let _ = writeln!(out, "{}", details.name);
    let _ = writeln!(out, "  Types:   {}", types);
    let _ = writeln!(out, "  Height:  {}", details.height_display());
    let _ = writeln!(out, "  Weight:  {}", details.weight_display());
    let _ = writeln!(out, "  Attack:  {}", details.attack);
    let _ = writeln!(out, "  Defense: {}", details.defense);
    let _ = writeln!(out, "  HP:      {}", details.hp);
    let _ = write!(
        out,
        "  Image:   {}",
        details.image_url.as_deref().unwrap_or("(none)")
    );
    out
}
