//! Domain records and the PokéAPI wire shapes they are decoded from

use serde::Deserialize;
use std::collections::HashMap;

/// Reference to one listed Pokémon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub name: String,
    pub detail_url: String,
}

/// One page of the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Total number of Pokémon the API knows about, not the page length
    pub total_count: u64,
    pub items: Vec<ItemRef>,
}

/// Full detail record for a single Pokémon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDetail {
    pub id: u32,
    pub name: String,
    pub sprite_url: Option<String>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: HashMap<String, u32>,
}

impl ItemDetail {
    /// Base value of a named stat, if the API reported it
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats.get(name).copied()
    }

    pub fn hp(&self) -> Option<u32> {
        self.stat("hp")
    }

    pub fn attack(&self) -> Option<u32> {
        self.stat("attack")
    }

    pub fn defense(&self) -> Option<u32> {
        self.stat("defense")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawListing {
    count: u64,
    #[serde(default)]
    results: Vec<RawItemRef>,
}

#[derive(Debug, Deserialize)]
struct RawItemRef {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDetail {
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    sprites: RawSprites,
    #[serde(default)]
    types: Vec<RawTypeSlot>,
    #[serde(default)]
    abilities: Vec<RawAbilitySlot>,
    #[serde(default)]
    stats: Vec<RawStat>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct RawAbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct RawStat {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

impl From<RawListing> for ListingPage {
    fn from(raw: RawListing) -> Self {
        Self {
            total_count: raw.count,
            items: raw
                .results
                .into_iter()
                .map(|item| ItemRef {
                    name: item.name,
                    detail_url: item.url,
                })
                .collect(),
        }
    }
}

impl From<RawDetail> for ItemDetail {
    fn from(raw: RawDetail) -> Self {
        // First occurrence wins when the API repeats a stat name
        let mut stats = HashMap::new();
        for entry in raw.stats {
            stats.entry(entry.stat.name).or_insert(entry.base_stat);
        }

        Self {
            id: raw.id,
            name: raw.name,
            sprite_url: raw.sprites.front_default,
            types: raw.types.into_iter().map(|slot| slot.kind.name).collect(),
            abilities: raw.abilities.into_iter().map(|slot| slot.ability.name).collect(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "sprites": { "front_default": "https://img.example/1.png", "back_default": null },
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" } },
            { "slot": 2, "type": { "name": "poison", "url": "https://pokeapi.co/api/v2/type/4/" } }
        ],
        "abilities": [
            { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false, "slot": 1 },
            { "ability": { "name": "chlorophyll", "url": "" }, "is_hidden": true, "slot": 3 }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "defense", "url": "" } },
            { "base_stat": 65, "effort": 1, "stat": { "name": "special-attack", "url": "" } }
        ]
    }"#;

    #[test]
    fn test_detail_decoding() {
        let raw: RawDetail = serde_json::from_str(BULBASAUR).unwrap();
        let detail = ItemDetail::from(raw);

        assert_eq!(detail.id, 1);
        assert_eq!(detail.name, "bulbasaur");
        assert_eq!(detail.sprite_url.as_deref(), Some("https://img.example/1.png"));
        assert_eq!(detail.types, vec!["grass", "poison"]);
        assert_eq!(detail.abilities, vec!["overgrow", "chlorophyll"]);
        assert_eq!(detail.hp(), Some(45));
        assert_eq!(detail.attack(), Some(49));
        assert_eq!(detail.defense(), Some(49));
        assert_eq!(detail.stat("special-attack"), Some(65));
    }

    #[test]
    fn test_detail_missing_fields() {
        let raw: RawDetail = serde_json::from_str(
            r#"{ "id": 10, "sprites": { "front_default": null }, "stats": [] }"#,
        )
        .unwrap();
        let detail = ItemDetail::from(raw);

        assert_eq!(detail.name, "");
        assert_eq!(detail.sprite_url, None);
        assert!(detail.types.is_empty());
        assert_eq!(detail.hp(), None);
        assert_eq!(detail.defense(), None);
    }

    #[test]
    fn test_duplicate_stat_keeps_first() {
        let raw: RawDetail = serde_json::from_str(
            r#"{ "id": 2, "name": "ivysaur", "stats": [
                { "base_stat": 60, "stat": { "name": "hp" } },
                { "base_stat": 1, "stat": { "name": "hp" } }
            ] }"#,
        )
        .unwrap();

        assert_eq!(ItemDetail::from(raw).hp(), Some(60));
    }

    #[test]
    fn test_listing_decoding() {
        let raw: RawListing = serde_json::from_str(
            r#"{
                "count": 1302,
                "next": "https://pokeapi.co/api/v2/pokemon?offset=20&limit=20",
                "previous": null,
                "results": [
                    { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" },
                    { "name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/" }
                ]
            }"#,
        )
        .unwrap();
        let listing = ListingPage::from(raw);

        assert_eq!(listing.total_count, 1302);
        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.items[1].name, "ivysaur");
        assert_eq!(listing.items[1].detail_url, "https://pokeapi.co/api/v2/pokemon/2/");
    }

    #[test]
    fn test_listing_without_count_is_rejected() {
        let result: Result<RawListing, _> = serde_json::from_str(r#"{ "results": [] }"#);
        assert!(result.is_err());
    }
}
