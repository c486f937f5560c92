//! Domain model for a single catalog entry.
//!
//! These types are decoupled from the PokeAPI wire format; see
//! [`super::dto`] for the response structures and their conversion.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Elemental type of a creature.
///
/// Anything the API reports outside the known set decodes to `Unknown`
/// instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatureType {
    Normal,
    Fire,
    Fighting,
    Water,
    Flying,
    Grass,
    Poison,
    Electric,
    Ground,
    Psychic,
    Rock,
    Ice,
    Bug,
    Dragon,
    Ghost,
    Dark,
    Steel,
    Fairy,
    Stellar,
    Unknown,
}

impl CreatureType {
    pub const KNOWN: [CreatureType; 19] = [
        CreatureType::Normal,
        CreatureType::Fire,
        CreatureType::Fighting,
        CreatureType::Water,
        CreatureType::Flying,
        CreatureType::Grass,
        CreatureType::Poison,
        CreatureType::Electric,
        CreatureType::Ground,
        CreatureType::Psychic,
        CreatureType::Rock,
        CreatureType::Ice,
        CreatureType::Bug,
        CreatureType::Dragon,
        CreatureType::Ghost,
        CreatureType::Dark,
        CreatureType::Steel,
        CreatureType::Fairy,
        CreatureType::Stellar,
    ];

    /// Parse an API type name. Matching is case-insensitive.
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        Self::KNOWN
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .unwrap_or(CreatureType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreatureType::Normal => "normal",
            CreatureType::Fire => "fire",
            CreatureType::Fighting => "fighting",
            CreatureType::Water => "water",
            CreatureType::Flying => "flying",
            CreatureType::Grass => "grass",
            CreatureType::Poison => "poison",
            CreatureType::Electric => "electric",
            CreatureType::Ground => "ground",
            CreatureType::Psychic => "psychic",
            CreatureType::Rock => "rock",
            CreatureType::Ice => "ice",
            CreatureType::Bug => "bug",
            CreatureType::Dragon => "dragon",
            CreatureType::Ghost => "ghost",
            CreatureType::Dark => "dark",
            CreatureType::Steel => "steel",
            CreatureType::Fairy => "fairy",
            CreatureType::Stellar => "stellar",
            CreatureType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CreatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CreatureType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CreatureType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(CreatureType::from_name(&name))
    }
}

/// One creature of the catalog.
///
/// `id` is 1-based and determines the entry's position in the ordered
/// catalog (`id - 1`). `name` is always lowercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub image_url: Option<String>,
    /// Decimetres
    pub height: f64,
    /// Hectograms
    pub weight: f64,
    pub types: Vec<CreatureType>,
    pub attack: u32,
    pub defense: u32,
    pub hp: u32,
}

impl CatalogEntry {
    /// Position in the ordered catalog, derived from the id.
    pub fn position(&self) -> Option<usize> {
        (self.id as usize).checked_sub(1)
    }
}

/// Normalize a user- or API-provided name into a lookup key.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
