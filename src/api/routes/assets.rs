//! Static catalog endpoints: champions, abilities, items.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::catalog::CatalogClient;
use crate::models::{ChampionDetail, ItemCatalog, ItemData};

fn default_true() -> bool {
    true
}

// ── Champions ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChampionParams {
    pub champion_name: Option<String>,
    #[serde(default)]
    pub detailed: bool,
    pub ability: Option<String>,
    #[serde(default)]
    pub include_stats: bool,
    #[serde(default)]
    pub include_tips: bool,
}

/// Champion info from the catalog; optionally the per-champion detail
/// document with parsed abilities.
pub async fn champions(
    State(state): State<AppState>,
    Query(params): Query<ChampionParams>,
) -> Result<Json<Value>, ApiError> {
    let roster = state.catalog.fetch_champions().await?;

    if let Some(ref champion_name) = params.champion_name {
        let (key, basic) = roster.find(champion_name).ok_or_else(|| {
            ApiError::NotFound(format!("Champion '{}' not found", champion_name))
        })?;

        if params.detailed {
            match state.catalog.fetch_champion_detail(key).await {
                Ok(Some(detail)) => {
                    let view = champion_detail_view(
                        &detail,
                        key,
                        params.ability.as_deref(),
                        params.include_stats,
                        params.include_tips,
                        &state.catalog,
                    )?;
                    info!(
                        "Fetched detailed info for champion '{}' from the catalog",
                        champion_name
                    );
                    return Ok(Json(json!({ "champion": view })));
                }
                Ok(None) => {
                    warn!(
                        "Detailed data not found for champion '{}', falling back to basic",
                        champion_name
                    );
                }
                Err(err) => {
                    warn!(
                        "Failed to fetch detailed data for champion '{}': {}, falling back to basic",
                        champion_name, err
                    );
                }
            }
            return Ok(Json(json!({ "champion": basic })));
        }

        info!(
            "Fetched basic info for champion '{}' from the catalog",
            champion_name
        );
        return Ok(Json(json!({ "champion": basic })));
    }

    if params.detailed {
        return Err(ApiError::InvalidInput(
            "Detailed information is only available for specific champions. Please specify champion_name.".to_string(),
        ));
    }

    info!("Fetched {} champions from the catalog", roster.data.len());
    Ok(Json(json!({ "champions": roster.data })))
}

// ── Champion abilities ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AbilityParams {
    pub champion_name: String,
    pub ability: Option<String>,
    #[serde(default = "default_true")]
    pub include_stats: bool,
    #[serde(default)]
    pub include_tips: bool,
}

/// Detailed champion ability information.
pub async fn champion_abilities(
    State(state): State<AppState>,
    Query(params): Query<AbilityParams>,
) -> Result<Json<Value>, ApiError> {
    let roster = state.catalog.fetch_champions().await?;
    let (key, _) = roster.find(&params.champion_name).ok_or_else(|| {
        ApiError::NotFound(format!("Champion '{}' not found.", params.champion_name))
    })?;

    let detail = state
        .catalog
        .fetch_champion_detail(key)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Detailed data not found for champion '{}'.",
                params.champion_name
            ))
        })?;

    let view = champion_detail_view(
        &detail,
        key,
        params.ability.as_deref(),
        params.include_stats,
        params.include_tips,
        &state.catalog,
    )?;

    info!("Fetched abilities for champion: {}", detail.name);
    Ok(Json(view))
}

/// Build the detail view: identity, abilities (or one selected ability),
/// optional base stats and tips, and the 0-10 ratings.
fn champion_detail_view(
    detail: &ChampionDetail,
    champion_key: &str,
    ability: Option<&str>,
    include_stats: bool,
    include_tips: bool,
    catalog: &CatalogClient,
) -> Result<Value, ApiError> {
    let mut result = Map::new();
    result.insert("champion_id".to_string(), json!(champion_key));
    result.insert("name".to_string(), json!(detail.name));
    result.insert("title".to_string(), json!(detail.title));
    result.insert("tags".to_string(), json!(detail.tags));
    result.insert("patch_version".to_string(), json!(catalog.version()));
    result.insert("language".to_string(), json!(catalog.language()));

    let mut abilities = Map::new();
    abilities.insert(
        "passive".to_string(),
        json!({
            "name": non_empty(&detail.passive.name, "Unknown"),
            "description": non_empty(&detail.passive.description, "No description available"),
            "image": detail.passive.image,
        }),
    );

    for (slot, spell) in detail.spells.iter().take(4).enumerate() {
        let slot_key = ["q", "w", "e", "r"][slot];
        abilities.insert(
            slot_key.to_string(),
            json!({
                "name": non_empty(&spell.name, "Unknown"),
                "description": non_empty(&spell.description, "No description available"),
                "tooltip": spell.tooltip,
                "max_rank": spell.maxrank,
                "cooldown": spell.cooldown,
                "cost": spell.cost,
                "cost_type": non_empty(&spell.cost_type, "Mana"),
                "range": spell.range,
                "effect": spell.effect,
                "effect_burn": spell.effect_burn,
                "vars": spell.vars,
                "image": spell.image,
            }),
        );
    }

    match ability {
        Some(selector) if !selector.eq_ignore_ascii_case("all") => {
            let selector = selector.to_ascii_lowercase();
            let selected = abilities.get(&selector).cloned().ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "Invalid ability '{}'. Must be one of: passive, q, w, e, r, all",
                    selector
                ))
            })?;
            result.insert("ability".to_string(), selected);
        }
        _ => {
            result.insert("abilities".to_string(), Value::Object(abilities));
        }
    }

    if include_stats {
        let stat = |key: &str| detail.stats.get(key).copied().unwrap_or(0.0);
        result.insert(
            "base_stats".to_string(),
            json!({
                "hp": stat("hp"),
                "hp_per_level": stat("hpperlevel"),
                "mp": stat("mp"),
                "mp_per_level": stat("mpperlevel"),
                "move_speed": stat("movespeed"),
                "armor": stat("armor"),
                "armor_per_level": stat("armorperlevel"),
                "spell_block": stat("spellblock"),
                "spell_block_per_level": stat("spellblockperlevel"),
                "attack_range": stat("attackrange"),
                "hp_regen": stat("hpregen"),
                "hp_regen_per_level": stat("hpregenperlevel"),
                "mp_regen": stat("mpregen"),
                "mp_regen_per_level": stat("mpregenperlevel"),
                "crit": stat("crit"),
                "crit_per_level": stat("critperlevel"),
                "attack_damage": stat("attackdamage"),
                "attack_damage_per_level": stat("attackdamageperlevel"),
                "attack_speed": stat("attackspeed"),
                "attack_speed_per_level": stat("attackspeedperlevel"),
            }),
        );
    }

    if include_tips {
        result.insert(
            "tips".to_string(),
            json!({
                "ally_tips": detail.allytips,
                "enemy_tips": detail.enemytips,
                "lore": non_empty(&detail.lore, "No lore available"),
                "blurb": non_empty(&detail.blurb, "No description available"),
            }),
        );
    }

    result.insert(
        "champion_info".to_string(),
        json!({
            "attack": detail.info.attack,
            "defense": detail.info.defense,
            "magic": detail.info.magic,
            "difficulty": detail.info.difficulty,
        }),
    );

    Ok(Value::Object(result))
}

fn non_empty(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

// ── Items ───────────────────────────────────────────────────────

const DETAILED_ITEM_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ItemParams {
    pub item_name_or_id: Option<String>,
    #[serde(default)]
    pub detailed: bool,
    pub category: Option<String>,
    #[serde(default)]
    pub include_recipe: bool,
    #[serde(default)]
    pub include_stats: bool,
}

/// Item info from the catalog, optionally enriched with friendly stats,
/// recipe data and metadata flags.
pub async fn items(
    State(state): State<AppState>,
    Query(params): Query<ItemParams>,
) -> Result<Json<Value>, ApiError> {
    let catalog = state.catalog.fetch_items().await?;

    if let Some(ref name_or_id) = params.item_name_or_id {
        let (key, item) = catalog
            .find(name_or_id)
            .ok_or_else(|| ApiError::NotFound(format!("Item '{}' not found", name_or_id)))?;

        if params.detailed {
            let view = item_detail_view(
                item,
                key,
                &catalog,
                params.include_recipe,
                params.include_stats,
                &state.catalog,
            );
            info!("Fetched detailed info for item '{}' from the catalog", name_or_id);
            return Ok(Json(json!({ "item": view })));
        }

        info!("Fetched basic info for item '{}' from the catalog", name_or_id);
        return Ok(Json(json!({ "item": item })));
    }

    // Optional category filter over item tags
    let mut filtered_ids: Vec<&String> = catalog
        .data
        .keys()
        .filter(|id| match &params.category {
            Some(category) => catalog.data[*id]
                .tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(category)),
            None => true,
        })
        .collect();
    filtered_ids.sort();

    if params.detailed && filtered_ids.len() > DETAILED_ITEM_LIMIT {
        return Err(ApiError::InvalidInput(format!(
            "Detailed information is only available for specific items or smaller filtered sets (max {} items).",
            DETAILED_ITEM_LIMIT
        )));
    }

    let total_count = filtered_ids.len();
    let items_value: Map<String, Value> = if params.detailed {
        filtered_ids
            .iter()
            .take(DETAILED_ITEM_LIMIT)
            .map(|id| {
                let view = item_detail_view(
                    &catalog.data[*id],
                    id,
                    &catalog,
                    params.include_recipe,
                    params.include_stats,
                    &state.catalog,
                );
                ((*id).clone(), view)
            })
            .collect()
    } else {
        filtered_ids
            .iter()
            .map(|id| {
                (
                    (*id).clone(),
                    serde_json::to_value(&catalog.data[*id]).unwrap_or(Value::Null),
                )
            })
            .collect()
    };

    info!("Fetched {} items from the catalog", total_count);
    Ok(Json(json!({ "items": items_value, "total_count": total_count })))
}

/// Build the detail view: identity, image, optional friendly stats and
/// recipe, plus metadata flags derived from tags.
fn item_detail_view(
    item: &ItemData,
    item_key: &str,
    all_items: &ItemCatalog,
    include_recipe: bool,
    include_stats: bool,
    catalog: &CatalogClient,
) -> Value {
    let mut result = Map::new();
    result.insert("item_id".to_string(), json!(item_key));
    result.insert("name".to_string(), json!(item.name));
    result.insert("description".to_string(), json!(item.description));
    result.insert("plaintext".to_string(), json!(item.plaintext));
    result.insert("tags".to_string(), json!(item.tags));
    result.insert("gold".to_string(), json!(item.gold));
    result.insert("patch_version".to_string(), json!(catalog.version()));
    result.insert("language".to_string(), json!(catalog.language()));

    let image = |key: &str| item.image.get(key).cloned().unwrap_or_else(|| json!(""));
    let image_dim = |key: &str| item.image.get(key).cloned().unwrap_or_else(|| json!(0));
    result.insert(
        "image".to_string(),
        json!({
            "full": image("full"),
            "sprite": image("sprite"),
            "group": image("group"),
            "x": image_dim("x"),
            "y": image_dim("y"),
            "w": image_dim("w"),
            "h": image_dim("h"),
        }),
    );

    if include_stats {
        let stat = |key: &str| item.stats.get(key).copied().unwrap_or(0.0);
        result.insert(
            "stats".to_string(),
            json!({
                "attack_damage": stat("FlatPhysicalDamageMod"),
                "ability_power": stat("FlatMagicDamageMod"),
                "health": stat("FlatHPPoolMod"),
                "mana": stat("FlatMPPoolMod"),
                "armor": stat("FlatArmorMod"),
                "magic_resist": stat("FlatSpellBlockMod"),
                "attack_speed": stat("PercentAttackSpeedMod"),
                "crit_chance": stat("FlatCritChanceMod"),
                "movement_speed": stat("FlatMovementSpeedMod"),
                "life_steal": stat("PercentLifeStealMod"),
                "ability_haste": stat("FlatCooldownReductionMod"),
                "health_regen": stat("FlatHPRegenMod"),
                "mana_regen": stat("FlatMPRegenMod"),
            }),
        );
    }

    if include_recipe {
        let component_entry = |component_id: &String| {
            let component = all_items.data.get(component_id);
            json!({
                "id": component_id,
                "name": component
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| format!("Item {}", component_id)),
                "cost": component.map(|c| c.gold.total).unwrap_or(0),
            })
        };

        result.insert(
            "recipe".to_string(),
            json!({
                "components": item.from.iter().map(component_entry).collect::<Vec<_>>(),
                "builds_into": item.into.iter().map(component_entry).collect::<Vec<_>>(),
                "total_cost": item.gold.total,
                "base_cost": item.gold.base,
                "sell_value": item.gold.sell,
            }),
        );
    }

    let has_tag = |tag: &str| item.tags.iter().any(|t| t == tag);
    result.insert(
        "metadata".to_string(),
        json!({
            "purchasable": item.gold.purchasable,
            "consumable": has_tag("Consumable"),
            "boots": has_tag("Boots"),
            "legendary": has_tag("Legendary"),
            "mythic": has_tag("Mythic"),
            "starter": has_tag("Starter"),
            "support": has_tag("Support"),
        }),
    );

    Value::Object(result)
}
