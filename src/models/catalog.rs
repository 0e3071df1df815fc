//! Data Dragon catalog entries.
//!
//! The catalog documents are versioned and immutable for the lifetime of a
//! fetch; we re-fetch per request instead of caching across requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_stat() -> f64 {
    5.0
}

/// The attack/defense/magic/difficulty ratings on a 0-10 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionRatings {
    #[serde(default = "default_stat")]
    pub attack: f64,
    #[serde(default = "default_stat")]
    pub defense: f64,
    #[serde(default = "default_stat")]
    pub magic: f64,
    #[serde(default = "default_stat")]
    pub difficulty: f64,
}

impl Default for ChampionRatings {
    fn default() -> Self {
        Self {
            attack: default_stat(),
            defense: default_stat(),
            magic: default_stat(),
            difficulty: default_stat(),
        }
    }
}

/// One champion entry from the full-roster champion document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionData {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Role labels (Tank, Mage, Marksman, ...). Multi-valued, order as
    /// given by the catalog.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub info: ChampionRatings,
    /// Remaining catalog fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ChampionData {
    /// First tag, which the catalog orders by relevance.
    pub fn primary_role(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("Unknown")
    }
}

/// The full champion roster, keyed by internal champion id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChampionRoster {
    #[serde(default)]
    pub data: HashMap<String, ChampionData>,
}

impl ChampionRoster {
    /// Case-insensitive lookup by display name, champion id, or map key.
    pub fn find(&self, name_or_key: &str) -> Option<(&str, &ChampionData)> {
        self.data.iter().find_map(|(key, champ)| {
            let matches = champ.name.eq_ignore_ascii_case(name_or_key)
                || champ.id.eq_ignore_ascii_case(name_or_key)
                || key.eq_ignore_ascii_case(name_or_key);
            matches.then_some((key.as_str(), champ))
        })
    }
}

/// Image reference shared by abilities and passives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityImage {
    #[serde(default)]
    pub full: String,
    #[serde(default)]
    pub sprite: String,
    #[serde(default)]
    pub group: String,
}

/// One spell from the per-champion detail document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChampionSpell {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tooltip: String,
    #[serde(default)]
    pub maxrank: i64,
    #[serde(default)]
    pub cooldown: Vec<f64>,
    #[serde(default)]
    pub cost: Vec<f64>,
    #[serde(rename = "costType", default)]
    pub cost_type: String,
    #[serde(default)]
    pub range: Vec<f64>,
    /// Effect tables carry a leading null entry; kept as raw JSON
    #[serde(default)]
    pub effect: Value,
    #[serde(rename = "effectBurn", default)]
    pub effect_burn: Value,
    #[serde(default)]
    pub vars: Value,
    #[serde(default)]
    pub image: AbilityImage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChampionPassive {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: AbilityImage,
}

/// Per-champion detail document entry (abilities, base stats, lore).
#[derive(Debug, Clone, Deserialize)]
pub struct ChampionDetail {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub info: ChampionRatings,
    #[serde(default)]
    pub spells: Vec<ChampionSpell>,
    #[serde(default)]
    pub passive: ChampionPassive,
    #[serde(default)]
    pub stats: HashMap<String, f64>,
    #[serde(default)]
    pub allytips: Vec<String>,
    #[serde(default)]
    pub enemytips: Vec<String>,
    #[serde(default)]
    pub lore: String,
    #[serde(default)]
    pub blurb: String,
}

/// Gold costs for an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemGold {
    #[serde(default)]
    pub base: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub sell: i64,
    #[serde(default = "default_purchasable")]
    pub purchasable: bool,
}

fn default_purchasable() -> bool {
    true
}

/// One item entry from the item document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub plaintext: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub gold: ItemGold,
    #[serde(default)]
    pub stats: HashMap<String, f64>,
    #[serde(default)]
    pub image: Value,
    /// Component item ids this builds from
    #[serde(default)]
    pub from: Vec<String>,
    /// Item ids this builds into
    #[serde(default)]
    pub into: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The full item catalog, keyed by item id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemCatalog {
    #[serde(default)]
    pub data: HashMap<String, ItemData>,
}

impl ItemCatalog {
    /// Lookup by item id or case-insensitive name.
    pub fn find(&self, name_or_id: &str) -> Option<(&str, &ItemData)> {
        self.data.iter().find_map(|(id, item)| {
            let matches = id == name_or_id || item.name.eq_ignore_ascii_case(name_or_id);
            matches.then_some((id.as_str(), item))
        })
    }

    pub fn name_of(&self, item_id: i64) -> Option<&str> {
        self.data
            .get(&item_id.to_string())
            .map(|item| item.name.as_str())
    }
}
