//! Match-centric endpoints: details, enriched participants, timeline.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::ItemCatalog;
use crate::riot::Region;

// ── Match details ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchDetailsRequest {
    pub match_id: String,
    pub region: String,
}

#[derive(Debug, Serialize)]
pub struct MatchDetailsResponse {
    pub match_id: String,
    pub region: String,
    pub match_info: Value,
}

/// Match-level information only; the participant list is stripped.
pub async fn match_details(
    State(state): State<AppState>,
    Json(request): Json<MatchDetailsRequest>,
) -> Result<Json<MatchDetailsResponse>, ApiError> {
    let region = Region::parse(&request.region)?;

    let payload = state
        .riot
        .match_raw_by_id(region, &request.match_id)
        .await?;

    let match_info: Value = match payload.get("info") {
        Some(Value::Object(info)) => {
            let filtered: Map<String, Value> = info
                .iter()
                .filter(|(key, _)| key.as_str() != "participants")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            Value::Object(filtered)
        }
        _ => Value::Object(Map::new()),
    };

    info!(
        "Fetched match info (no participants) for match ID: {}",
        request.match_id
    );
    Ok(Json(MatchDetailsResponse {
        match_id: request.match_id,
        region: region.to_string(),
        match_info,
    }))
}

// ── Match participants ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParticipantsRequest {
    pub match_id: String,
    pub region: String,
    /// -1 returns all participants
    #[serde(default = "default_num_participants")]
    pub num_participants: i64,
    #[serde(default)]
    pub simplified: bool,
}

fn default_num_participants() -> i64 {
    -1
}

#[derive(Debug, Serialize)]
pub struct ParticipantsResponse {
    pub match_id: String,
    pub region: String,
    pub num_participants: usize,
    pub participants: Vec<Value>,
}

/// Resolve item slots 0-6 into named entries, dropping empty slots.
fn items_detailed(participant: &Value, catalog: &ItemCatalog) -> Vec<Value> {
    (0..7)
        .filter_map(|slot| {
            let item_id = participant
                .get(format!("item{}", slot))
                .and_then(Value::as_i64)
                .unwrap_or(0);
            if item_id == 0 {
                return None;
            }
            let item = catalog.data.get(&item_id.to_string());
            Some(json!({
                "id": item_id,
                "name": item
                    .map(|i| i.name.clone())
                    .unwrap_or_else(|| format!("Unknown Item {}", item_id)),
                "description": item.map(|i| i.description.clone()).unwrap_or_default(),
            }))
        })
        .collect()
}

/// Full participant information for a match, with item names resolved from
/// the catalog. A failed catalog fetch degrades to placeholder names
/// instead of failing the request.
pub async fn match_participants(
    State(state): State<AppState>,
    Json(request): Json<ParticipantsRequest>,
) -> Result<Json<ParticipantsResponse>, ApiError> {
    let region = Region::parse(&request.region)?;

    let payload = state
        .riot
        .match_raw_by_id(region, &request.match_id)
        .await?;

    let participants: Vec<Value> = payload
        .get("info")
        .and_then(|info| info.get("participants"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if participants.is_empty() {
        return Err(ApiError::NoDataFound(
            "No participants found in match data.".to_string(),
        ));
    }

    let selected: &[Value] = match request.num_participants {
        -1 => &participants,
        n if n > 0 && (n as usize) <= participants.len() => &participants[..n as usize],
        _ => {
            return Err(ApiError::InvalidInput(format!(
                "num_participants must be -1 (all) or between 1 and {}",
                participants.len()
            )))
        }
    };

    let catalog = state.catalog.fetch_items_or_empty().await;

    let detailed: Vec<Value> = selected
        .iter()
        .map(|participant| {
            let items = items_detailed(participant, &catalog);
            if request.simplified {
                let total_cs = participant
                    .get("totalMinionsKilled")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    + participant
                        .get("neutralMinionsKilled")
                        .and_then(Value::as_i64)
                        .unwrap_or(0);
                json!({
                    "summonerName": participant.get("summonerName").cloned().unwrap_or(Value::Null),
                    "championName": participant.get("championName").cloned().unwrap_or(Value::Null),
                    "kills": participant.get("kills").cloned().unwrap_or(Value::Null),
                    "deaths": participant.get("deaths").cloned().unwrap_or(Value::Null),
                    "assists": participant.get("assists").cloned().unwrap_or(Value::Null),
                    "goldEarned": participant.get("goldEarned").cloned().unwrap_or(Value::Null),
                    "totalMinionsKilled": total_cs,
                    "win": participant.get("win").cloned().unwrap_or(Value::Null),
                    "items_detailed": items,
                })
            } else {
                let mut enriched = participant.clone();
                if let Value::Object(ref mut map) = enriched {
                    map.insert("items_detailed".to_string(), Value::Array(items));
                }
                enriched
            }
        })
        .collect();

    Ok(Json(ParticipantsResponse {
        match_id: request.match_id,
        region: region.to_string(),
        num_participants: detailed.len(),
        participants: detailed,
    }))
}

// ── Match timeline ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TimelineRequest {
    pub match_id: String,
    pub region: String,
    pub event_types: Option<Vec<String>>,
    pub participant_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TimelineSummary {
    pub total_frames: usize,
    pub total_kills: usize,
    pub total_item_events: usize,
    pub total_ward_events: usize,
    pub total_objective_events: usize,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub match_id: String,
    pub region: String,
    pub game_duration: i64,
    pub interval: i64,
    pub summary: TimelineSummary,
    pub frames: Vec<Value>,
}

fn event_mentions_participant(event: &Value, participant_id: i64) -> bool {
    ["participantId", "killerId", "victimId"]
        .iter()
        .any(|key| event.get(key).and_then(Value::as_i64) == Some(participant_id))
}

/// Sort one event into its category bucket.
fn categorize_event(event: &Value, buckets: &mut Map<String, Value>) {
    let event_type = event.get("type").and_then(Value::as_str).unwrap_or("");

    let (bucket, entry) = match event_type {
        "CHAMPION_KILL" => (
            "kills",
            json!({
                "timestamp": event.get("timestamp").cloned().unwrap_or(Value::Null),
                "killer_id": event.get("killerId").cloned().unwrap_or(Value::Null),
                "victim_id": event.get("victimId").cloned().unwrap_or(Value::Null),
                "assisting_participants": event
                    .get("assistingParticipantIds")
                    .cloned()
                    .unwrap_or_else(|| json!([])),
                "position": event.get("position").cloned().unwrap_or_else(|| json!({})),
                "bounty": event.get("bounty").cloned().unwrap_or_else(|| json!(0)),
            }),
        ),
        "ITEM_PURCHASED" | "ITEM_SOLD" | "ITEM_DESTROYED" | "ITEM_UNDO" => (
            "item_events",
            json!({
                "type": event_type,
                "timestamp": event.get("timestamp").cloned().unwrap_or(Value::Null),
                "participant_id": event.get("participantId").cloned().unwrap_or(Value::Null),
                "item_id": event.get("itemId").cloned().unwrap_or(Value::Null),
                "after_id": event.get("afterId").cloned().unwrap_or(Value::Null),
                "before_id": event.get("beforeId").cloned().unwrap_or(Value::Null),
            }),
        ),
        "WARD_PLACED" | "WARD_KILL" => (
            "ward_events",
            json!({
                "type": event_type,
                "timestamp": event.get("timestamp").cloned().unwrap_or(Value::Null),
                "participant_id": event.get("participantId").cloned().unwrap_or(Value::Null),
                "ward_type": event.get("wardType").cloned().unwrap_or(Value::Null),
                "position": event.get("position").cloned().unwrap_or_else(|| json!({})),
            }),
        ),
        "BUILDING_KILL" | "ELITE_MONSTER_KILL" | "DRAGON_KILL" | "BARON_KILL" => (
            "objective_events",
            json!({
                "type": event_type,
                "timestamp": event.get("timestamp").cloned().unwrap_or(Value::Null),
                "killer_id": event.get("killerId").cloned().unwrap_or(Value::Null),
                "team_id": event.get("teamId").cloned().unwrap_or(Value::Null),
                "monster_type": event.get("monsterType").cloned().unwrap_or(Value::Null),
                "monster_sub_type": event.get("monsterSubType").cloned().unwrap_or(Value::Null),
                "building_type": event.get("buildingType").cloned().unwrap_or(Value::Null),
                "lane_type": event.get("laneType").cloned().unwrap_or(Value::Null),
                "tower_type": event.get("towerType").cloned().unwrap_or(Value::Null),
                "position": event.get("position").cloned().unwrap_or_else(|| json!({})),
            }),
        ),
        _ => ("other_events", event.clone()),
    };

    if let Some(Value::Array(list)) = buckets.get_mut(bucket) {
        list.push(entry);
    }
}

fn empty_buckets() -> Map<String, Value> {
    let mut buckets = Map::new();
    for key in [
        "kills",
        "deaths",
        "assists",
        "item_events",
        "ward_events",
        "objective_events",
        "other_events",
    ] {
        buckets.insert(key.to_string(), json!([]));
    }
    buckets
}

fn bucket_len(frame: &Value, bucket: &str) -> usize {
    frame
        .get("events")
        .and_then(|events| events.get(bucket))
        .and_then(Value::as_array)
        .map(|list| list.len())
        .unwrap_or(0)
}

/// Minute-by-minute timeline with categorized events.
pub async fn match_timeline(
    State(state): State<AppState>,
    Json(request): Json<TimelineRequest>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let region = Region::parse(&request.region)?;

    let payload = state
        .riot
        .match_timeline_by_id(region, &request.match_id)
        .await?;

    let info = payload.get("info").cloned().unwrap_or_else(|| json!({}));
    let frames = info
        .get("frames")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut processed_frames: Vec<Value> = Vec::with_capacity(frames.len());
    for frame in &frames {
        let timestamp = frame.get("timestamp").and_then(Value::as_i64).unwrap_or(0);
        let minute = timestamp / 60_000;

        let events: Vec<&Value> = frame
            .get("events")
            .and_then(Value::as_array)
            .map(|list| list.iter().collect())
            .unwrap_or_default();

        let mut buckets = empty_buckets();
        for event in events {
            if let Some(ref types) = request.event_types {
                let event_type = event.get("type").and_then(Value::as_str).unwrap_or("");
                if !types.iter().any(|t| t == event_type) {
                    continue;
                }
            }
            if let Some(participant_id) = request.participant_id {
                if !event_mentions_participant(event, participant_id) {
                    continue;
                }
            }
            categorize_event(event, &mut buckets);
        }

        processed_frames.push(json!({
            "timestamp": timestamp,
            "minute": minute,
            "events": buckets,
            "participant_frames": frame
                .get("participantFrames")
                .cloned()
                .unwrap_or_else(|| json!({})),
        }));
    }

    let summary = TimelineSummary {
        total_frames: processed_frames.len(),
        total_kills: processed_frames.iter().map(|f| bucket_len(f, "kills")).sum(),
        total_item_events: processed_frames
            .iter()
            .map(|f| bucket_len(f, "item_events"))
            .sum(),
        total_ward_events: processed_frames
            .iter()
            .map(|f| bucket_len(f, "ward_events"))
            .sum(),
        total_objective_events: processed_frames
            .iter()
            .map(|f| bucket_len(f, "objective_events"))
            .sum(),
    };

    info!(
        "Fetched timeline for match ID: {} with {} frames",
        request.match_id,
        processed_frames.len()
    );
    Ok(Json(TimelineResponse {
        match_id: request.match_id,
        region: region.to_string(),
        game_duration: info.get("gameLength").and_then(Value::as_i64).unwrap_or(0),
        interval: info
            .get("frameInterval")
            .and_then(Value::as_i64)
            .unwrap_or(60_000),
        summary,
        frames: processed_frames,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_kill_event() {
        let mut buckets = empty_buckets();
        let event = json!({
            "type": "CHAMPION_KILL",
            "timestamp": 61000,
            "killerId": 3,
            "victimId": 8,
            "assistingParticipantIds": [1, 2],
            "bounty": 300
        });
        categorize_event(&event, &mut buckets);

        let kills = buckets["kills"].as_array().unwrap();
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0]["killer_id"], 3);
        assert_eq!(kills[0]["assisting_participants"], json!([1, 2]));
    }

    #[test]
    fn test_categorize_routes_item_ward_objective() {
        let mut buckets = empty_buckets();
        for (event_type, bucket) in [
            ("ITEM_PURCHASED", "item_events"),
            ("WARD_PLACED", "ward_events"),
            ("BUILDING_KILL", "objective_events"),
            ("SKILL_LEVEL_UP", "other_events"),
        ] {
            categorize_event(&json!({"type": event_type}), &mut buckets);
            assert_eq!(buckets[bucket].as_array().unwrap().len(), 1, "{}", bucket);
        }
    }

    #[test]
    fn test_event_participant_filter_checks_all_roles() {
        let kill = json!({"type": "CHAMPION_KILL", "killerId": 3, "victimId": 8});

        assert!(event_mentions_participant(&kill, 3));
        assert!(event_mentions_participant(&kill, 8));
        assert!(!event_mentions_participant(&kill, 5));
    }

    #[test]
    fn test_items_detailed_skips_empty_slots() {
        let catalog: ItemCatalog = serde_json::from_str(
            r#"{"data": {"1001": {"name": "Boots", "description": "Move faster"}}}"#,
        )
        .unwrap();
        let participant = json!({
            "item0": 1001,
            "item1": 0,
            "item2": 9999,
            "item3": 0, "item4": 0, "item5": 0, "item6": 0
        });

        let items = items_detailed(&participant, &catalog);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "Boots");
        assert_eq!(items[1]["name"], "Unknown Item 9999");
    }
}
