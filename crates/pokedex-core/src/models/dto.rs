//! PokeAPI response structures.
//!
//! Field names follow the wire format. Unknown fields are ignored so the
//! API can grow without breaking decoding.

use serde::Deserialize;

use super::entry::{normalize_name, CatalogEntry, CreatureType};

#[derive(Debug, Clone, Deserialize)]
pub struct HeaderDto {
    pub name: String,
}

/// `GET /api/v2/pokemon/?limit=&offset=`
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderListDto {
    pub count: usize,
    #[serde(default)]
    pub results: Vec<HeaderDto>,
}

/// One window of names plus the total size of the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPage {
    pub total_count: usize,
    pub names: Vec<String>,
}

impl From<HeaderListDto> for HeaderPage {
    fn from(dto: HeaderListDto) -> Self {
        Self {
            total_count: dto.count,
            names: dto.results.into_iter().map(|h| h.name).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpritesDto {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedDto {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlotDto {
    #[serde(rename = "type")]
    pub type_: NamedDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatDto {
    pub base_stat: u32,
    pub stat: NamedDto,
}

/// `GET /api/v2/pokemon/{name}/`
#[derive(Debug, Clone, Deserialize)]
pub struct EntryDto {
    pub name: String,
    pub id: u32,
    pub height: f64,
    pub weight: f64,
    pub sprites: SpritesDto,
    #[serde(default)]
    pub types: Vec<TypeSlotDto>,
    #[serde(default)]
    pub stats: Vec<StatDto>,
}

/// Reasons a well-formed detail response still cannot become an entry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MappingError {
    #[error("{name}: missing stat '{stat}'")]
    MissingStat { name: String, stat: &'static str },

    #[error("{name}: stat '{stat}' appears more than once")]
    DuplicateStat { name: String, stat: &'static str },

    #[error("{name}: id must be positive")]
    InvalidId { name: String },
}

impl EntryDto {
    fn stat(&self, stat: &'static str) -> Result<u32, MappingError> {
        let mut matches = self.stats.iter().filter(|s| s.stat.name == stat);
        let first = matches.next().ok_or_else(|| MappingError::MissingStat {
            name: self.name.clone(),
            stat,
        })?;
        if matches.next().is_some() {
            return Err(MappingError::DuplicateStat {
                name: self.name.clone(),
                stat,
            });
        }
        Ok(first.base_stat)
    }
}

impl TryFrom<EntryDto> for CatalogEntry {
    type Error = MappingError;

    fn try_from(dto: EntryDto) -> Result<Self, Self::Error> {
        if dto.id == 0 {
            return Err(MappingError::InvalidId { name: dto.name });
        }
        let attack = dto.stat("attack")?;
        let defense = dto.stat("defense")?;
        let hp = dto.stat("hp")?;

        Ok(CatalogEntry {
            id: dto.id,
            name: normalize_name(&dto.name),
            image_url: dto.sprites.front_default.filter(|url| !url.is_empty()),
            height: dto.height,
            weight: dto.weight,
            types: dto
                .types
                .iter()
                .map(|slot| CreatureType::from_name(&slot.type_.name))
                .collect(),
            attack,
            defense,
            hp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULBASAUR: &str = r#"{
        "abilities": [],
        "base_experience": 64,
        "height": 7,
        "id": 1,
        "name": "bulbasaur",
        "sprites": {
            "back_default": null,
            "front_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/1.png"
        },
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": ""}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "defense", "url": ""}},
            {"base_stat": 65, "effort": 1, "stat": {"name": "special-attack", "url": ""}}
        ],
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": ""}},
            {"slot": 2, "type": {"name": "poison", "url": ""}}
        ],
        "weight": 69
    }"#;

    fn bulbasaur() -> EntryDto {
        serde_json::from_str(BULBASAUR).expect("Failed to parse detail fixture")
    }

    #[test]
    fn test_parse_header_list() {
        let json = r#"{"count": 1302, "next": "https://pokeapi.co/api/v2/pokemon/?offset=2&limit=2", "previous": null,
            "results": [{"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                        {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}]}"#;
        let page: HeaderPage = serde_json::from_str::<HeaderListDto>(json)
            .expect("Failed to parse header list")
            .into();
        assert_eq!(page.total_count, 1302);
        assert_eq!(page.names, vec!["bulbasaur", "ivysaur"]);
    }

    #[test]
    fn test_entry_from_dto() {
        let entry = CatalogEntry::try_from(bulbasaur()).expect("valid entry");
        assert_eq!(entry.id, 1);
        assert_eq!(entry.name, "bulbasaur");
        assert_eq!(entry.height, 7.0);
        assert_eq!(entry.weight, 69.0);
        assert_eq!(entry.types, vec![CreatureType::Grass, CreatureType::Poison]);
        assert_eq!((entry.attack, entry.defense, entry.hp), (49, 49, 45));
        assert!(entry.image_url.as_deref().is_some_and(|u| u.ends_with("/1.png")));
    }

    #[test]
    fn test_unrecognized_type_maps_to_unknown() {
        let mut dto = bulbasaur();
        dto.types[1].type_.name = "cosmic".to_string();
        let entry = CatalogEntry::try_from(dto).expect("unknown type must not fail");
        assert_eq!(entry.types, vec![CreatureType::Grass, CreatureType::Unknown]);
    }

    #[test]
    fn test_missing_sprite_is_none() {
        let mut dto = bulbasaur();
        dto.sprites.front_default = None;
        let entry = CatalogEntry::try_from(dto.clone()).expect("valid entry");
        assert_eq!(entry.image_url, None);

        dto.sprites.front_default = Some(String::new());
        let entry = CatalogEntry::try_from(dto).expect("valid entry");
        assert_eq!(entry.image_url, None);
    }

    #[test]
    fn test_missing_stat_fails() {
        let mut dto = bulbasaur();
        dto.stats.retain(|s| s.stat.name != "defense");
        assert_eq!(
            CatalogEntry::try_from(dto),
            Err(MappingError::MissingStat {
                name: "bulbasaur".to_string(),
                stat: "defense"
            })
        );
    }

    #[test]
    fn test_duplicate_stat_fails() {
        let mut dto = bulbasaur();
        let hp = dto.stats[0].clone();
        dto.stats.push(hp);
        assert!(matches!(
            CatalogEntry::try_from(dto),
            Err(MappingError::DuplicateStat { stat: "hp", .. })
        ));
    }

    #[test]
    fn test_name_is_lowercased() {
        let mut dto = bulbasaur();
        dto.name = "Bulbasaur".to_string();
        let entry = CatalogEntry::try_from(dto).expect("valid entry");
        assert_eq!(entry.name, "bulbasaur");
    }

    #[test]
    fn test_zero_id_fails() {
        let mut dto = bulbasaur();
        dto.id = 0;
        assert!(matches!(
            CatalogEntry::try_from(dto),
            Err(MappingError::InvalidId { .. })
        ));
    }
}
