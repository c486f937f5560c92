use serde::Serialize;

use crate::models::CatalogEntry;
use crate::utils::{capitalize, format_measure};

/// Display-ready projection of a single entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Details {
    pub name: String,
    pub image_url: Option<String>,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub types: Vec<String>,
    pub attack: u32,
    pub defense: u32,
    pub hp: u32,
}

impl Details {
    pub fn weight_display(&self) -> String {
        format!("{} kg", format_measure(self.weight_kg))
    }

    pub fn height_display(&self) -> String {
        format!("{} cm", format_measure(self.height_cm))
    }
}

impl From<&CatalogEntry> for Details {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            name: capitalize(&entry.name),
            image_url: entry.image_url.clone(),
            // The API reports hectograms and decimetres
            weight_kg: entry.weight / 10.0,
            height_cm: entry.height * 10.0,
            types: entry.types.iter().map(|t| t.as_str().to_string()).collect(),
            attack: entry.attack,
            defense: entry.defense,
            hp: entry.hp,
        }
    }
}
