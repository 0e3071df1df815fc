//! Player-centric endpoints: identity, summoner profile, ranked stats,
//! mastery, match history and per-player usage analytics.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::analytics::runes::{aggregate_runes, RuneReport};
use crate::analytics::spells::{aggregate_spells, SpellReport};
use crate::api::state::AppState;
use crate::api::validators::{validate_game_name, validate_tag_line};
use crate::api::ApiError;
use crate::models::{AccountDto, LeagueEntryDto};
use crate::riot::{fetch_matches, Region};

// ── Riot ID lookup ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RiotIdRequest {
    pub game_name: String,
    pub tag_line: String,
    pub region: String,
}

/// Resolve a Riot ID (gameName#tagLine) to an account with its PUUID.
pub async fn riot_id_lookup(
    State(state): State<AppState>,
    Json(request): Json<RiotIdRequest>,
) -> Result<Json<AccountDto>, ApiError> {
    validate_game_name(&request.game_name)?;
    validate_tag_line(&request.tag_line)?;
    let region = Region::parse(&request.region)?;

    let account = state
        .riot
        .account_by_riot_id(region, &request.game_name, &request.tag_line)
        .await?;

    info!(
        "Found user: {}#{} | PUUID: {}",
        account.game_name, account.tag_line, account.puuid
    );
    Ok(Json(account))
}

// ── Summoner info ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SummonerParams {
    pub region: String,
    pub puuid: String,
}

#[derive(Debug, Serialize)]
pub struct SummonerResponse {
    pub region: String,
    pub platform: String,
    pub puuid: String,
    pub summoner_id: String,
    pub account_id: String,
    pub summoner_name: String,
    pub profile_icon_id: i64,
    pub revision_date: i64,
    pub summoner_level: i64,
    pub platforms_tried: Vec<String>,
    pub found_on_platform: String,
}

/// Summoner profile by PUUID, probing the region's platforms in order.
pub async fn summoner_info(
    State(state): State<AppState>,
    Query(params): Query<SummonerParams>,
) -> Result<Json<SummonerResponse>, ApiError> {
    let region = Region::parse(&params.region)?;

    let (platform, summoner) = state.riot.resolve_summoner(region, &params.puuid).await?;

    info!(
        "Fetched Summoner info: {} (PUUID: {})",
        summoner.name, params.puuid
    );
    Ok(Json(SummonerResponse {
        region: region.to_string(),
        platform: platform.to_string(),
        puuid: params.puuid,
        summoner_id: summoner.id,
        account_id: summoner.account_id,
        summoner_name: summoner.name,
        profile_icon_id: summoner.profile_icon_id,
        revision_date: summoner.revision_date,
        summoner_level: summoner.summoner_level,
        platforms_tried: region.platforms().iter().map(|p| p.to_string()).collect(),
        found_on_platform: platform.to_string(),
    }))
}

// ── Ranked stats ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RankedParams {
    pub region: String,
    pub summoner_id: Option<String>,
    pub puuid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RankInfo {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i64,
    pub wins: i64,
    pub losses: i64,
    pub hot_streak: bool,
    pub veteran: bool,
    pub fresh_blood: bool,
    pub inactive: bool,
    pub league_id: String,
    pub league_name: Option<String>,
}

impl From<&LeagueEntryDto> for RankInfo {
    fn from(entry: &LeagueEntryDto) -> Self {
        Self {
            queue_type: entry.queue_type.clone(),
            tier: entry.tier.clone(),
            rank: entry.rank.clone(),
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
            hot_streak: entry.hot_streak,
            veteran: entry.veteran,
            fresh_blood: entry.fresh_blood,
            inactive: entry.inactive,
            league_id: entry.league_id.clone(),
            league_name: entry.league_name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedResponse {
    pub summoner_id: String,
    pub puuid: Option<String>,
    pub region: String,
    pub platform: String,
    pub ranked_solo: Option<RankInfo>,
    pub ranked_flex: Option<RankInfo>,
    pub other_queues: Vec<RankInfo>,
    pub platforms_tried: Vec<String>,
    pub found_on_platform: String,
    pub input_method: String,
}

/// Current-season ranked entries, organized by queue. Takes exactly one of
/// `summoner_id` or `puuid`; a PUUID is first resolved to a summoner id.
pub async fn ranked_stats(
    State(state): State<AppState>,
    Query(params): Query<RankedParams>,
) -> Result<Json<RankedResponse>, ApiError> {
    let region = Region::parse(&params.region)?;

    let summoner_id = match (&params.summoner_id, &params.puuid) {
        (None, None) => {
            return Err(ApiError::InvalidInput(
                "Either summoner_id or puuid must be provided".to_string(),
            ))
        }
        (Some(_), Some(_)) => {
            return Err(ApiError::InvalidInput(
                "Provide either summoner_id OR puuid, not both".to_string(),
            ))
        }
        (Some(summoner_id), None) => summoner_id.clone(),
        (None, Some(puuid)) => {
            info!("Getting summoner_id from PUUID: {}...", truncate(puuid, 20));
            let (_, summoner) = state.riot.resolve_summoner(region, puuid).await?;
            summoner.id
        }
    };

    let (platform, entries) = state
        .riot
        .resolve_league_entries(region, &summoner_id)
        .await?;

    let mut ranked_solo = None;
    let mut ranked_flex = None;
    let mut other_queues = Vec::new();
    for entry in &entries {
        let rank_info = RankInfo::from(entry);
        match entry.queue_type.as_str() {
            "RANKED_SOLO_5x5" => ranked_solo = Some(rank_info),
            "RANKED_FLEX_SR" => ranked_flex = Some(rank_info),
            _ => other_queues.push(rank_info),
        }
    }

    info!("Fetched ranked stats for summoner ID: {}", summoner_id);
    Ok(Json(RankedResponse {
        summoner_id,
        input_method: if params.puuid.is_some() {
            "puuid".to_string()
        } else {
            "summoner_id".to_string()
        },
        puuid: params.puuid,
        region: region.to_string(),
        platform: platform.to_string(),
        ranked_solo,
        ranked_flex,
        other_queues,
        platforms_tried: region.platforms().iter().map(|p| p.to_string()).collect(),
        found_on_platform: platform.to_string(),
    }))
}

// ── Champion mastery ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MasteryParams {
    pub region: String,
    pub puuid: String,
    pub champion_id: Option<i64>,
    pub top: Option<u32>,
    #[serde(default)]
    pub total_score: bool,
}

#[derive(Debug, Serialize)]
pub struct MasteryResponse {
    pub region: String,
    pub puuid: String,
    pub entries_count: usize,
    pub mastery_data: Value,
}

/// Champion mastery: all entries, one champion, top-N, or the total score.
pub async fn champion_mastery(
    State(state): State<AppState>,
    Query(params): Query<MasteryParams>,
) -> Result<Json<MasteryResponse>, ApiError> {
    let region = Region::parse(&params.region)?;

    // PUUID is region-wide, but mastery data is platform-specific
    let (platform, summoner) = state.riot.resolve_summoner(region, &params.puuid).await?;

    let mastery_data = if params.total_score {
        state.riot.mastery_score(platform, &summoner.id).await?
    } else if let Some(champion_id) = params.champion_id {
        state
            .riot
            .mastery_by_champion(platform, &summoner.id, champion_id)
            .await?
    } else if let Some(top) = params.top {
        state.riot.top_masteries(platform, &summoner.id, top).await?
    } else {
        state.riot.masteries_by_summoner(platform, &summoner.id).await?
    };

    let entries_count = match &mastery_data {
        Value::Array(entries) => entries.len(),
        _ => 1,
    };

    info!(
        "Fetched {} mastery entr{} for PUUID {}",
        entries_count,
        if entries_count == 1 { "y" } else { "ies" },
        params.puuid
    );
    Ok(Json(MasteryResponse {
        region: region.to_string(),
        puuid: params.puuid,
        entries_count,
        mastery_data,
    }))
}

// ── Match history ids ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchIdsRequest {
    pub puuid: String,
    pub region: String,
    #[serde(default = "default_match_ids_count")]
    pub count: u32,
}

fn default_match_ids_count() -> u32 {
    5
}

#[derive(Debug, Serialize)]
pub struct MatchIdsResponse {
    pub puuid: String,
    pub region: String,
    pub match_ids: Vec<String>,
}

/// Recent match ids for a player, most recent first.
pub async fn match_ids(
    State(state): State<AppState>,
    Json(request): Json<MatchIdsRequest>,
) -> Result<Json<MatchIdsResponse>, ApiError> {
    let region = Region::parse(&request.region)?;

    let ids = state
        .riot
        .match_ids_by_puuid(region, &request.puuid, request.count, None)
        .await?;

    info!("Fetched {} matches for PUUID: {}", ids.len(), request.puuid);
    Ok(Json(MatchIdsResponse {
        puuid: request.puuid,
        region: region.to_string(),
        match_ids: ids,
    }))
}

// ── Rune usage analysis ─────────────────────────────────────────

const RUNE_WINDOW_MAX: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct RuneParams {
    pub region: String,
    pub puuid: String,
    pub champion_name: Option<String>,
    #[serde(default = "default_rune_window")]
    pub match_count: u32,
}

fn default_rune_window() -> u32 {
    10
}

#[derive(Debug, Serialize)]
pub struct RuneResponse {
    pub puuid: String,
    pub region: String,
    pub champion_filter: Option<String>,
    #[serde(flatten)]
    pub report: RuneReport,
}

/// Rune usage patterns over recent matches.
pub async fn rune_analysis(
    State(state): State<AppState>,
    Query(params): Query<RuneParams>,
) -> Result<Json<RuneResponse>, ApiError> {
    let region = Region::parse(&params.region)?;
    let window = params.match_count.min(RUNE_WINDOW_MAX);

    let ids = state
        .riot
        .match_ids_by_puuid(region, &params.puuid, window, None)
        .await?;
    if ids.is_empty() {
        return Err(ApiError::NoDataFound(
            "No recent matches found for this player.".to_string(),
        ));
    }

    let matches = fetch_matches(
        &state.riot,
        region,
        &ids,
        state.config.riot.max_concurrent_fetches,
    )
    .await;

    let report = aggregate_runes(&params.puuid, &matches, params.champion_name.as_deref())
        .ok_or_else(|| {
            ApiError::NoDataFound("No rune data found in recent matches.".to_string())
        })?;

    info!(
        "Analyzed runes from {} matches for PUUID: {}",
        report.matches_analyzed, params.puuid
    );
    Ok(Json(RuneResponse {
        puuid: params.puuid,
        region: region.to_string(),
        champion_filter: params.champion_name,
        report,
    }))
}

// ── Summoner spell analysis ─────────────────────────────────────

const SPELL_WINDOW_MAX: u32 = 25;

#[derive(Debug, Deserialize)]
pub struct SpellParams {
    pub region: String,
    pub puuid: String,
    pub champion_name: Option<String>,
    #[serde(default = "default_spell_window")]
    pub match_count: u32,
}

fn default_spell_window() -> u32 {
    15
}

#[derive(Debug, Serialize)]
pub struct SpellResponse {
    pub puuid: String,
    pub region: String,
    pub champion_filter: Option<String>,
    #[serde(flatten)]
    pub report: SpellReport,
}

/// Summoner spell usage and effectiveness over recent matches.
pub async fn spell_analysis(
    State(state): State<AppState>,
    Query(params): Query<SpellParams>,
) -> Result<Json<SpellResponse>, ApiError> {
    let region = Region::parse(&params.region)?;
    let window = params.match_count.min(SPELL_WINDOW_MAX);

    let ids = state
        .riot
        .match_ids_by_puuid(region, &params.puuid, window, None)
        .await?;
    if ids.is_empty() {
        return Err(ApiError::NoDataFound(
            "No recent matches found for this player.".to_string(),
        ));
    }

    let matches = fetch_matches(
        &state.riot,
        region,
        &ids,
        state.config.riot.max_concurrent_fetches,
    )
    .await;

    let report = aggregate_spells(&params.puuid, &matches, params.champion_name.as_deref())
        .ok_or_else(|| {
            ApiError::NoDataFound("No summoner spell data found in recent matches.".to_string())
        })?;

    info!(
        "Analyzed summoner spells from {} matches for PUUID: {}",
        report.matches_analyzed, params.puuid
    );
    Ok(Json(SpellResponse {
        puuid: params.puuid,
        region: region.to_string(),
        champion_filter: params.champion_name,
        report,
    }))
}

fn truncate(value: &str, length: usize) -> &str {
    &value[..value.len().min(length)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_caps() {
        assert_eq!(35u32.min(RUNE_WINDOW_MAX), 20);
        assert_eq!(15u32.min(RUNE_WINDOW_MAX), 15);
        assert_eq!(40u32.min(SPELL_WINDOW_MAX), 25);
    }

    #[test]
    fn test_truncate_handles_short_strings() {
        assert_eq!(truncate("abc", 20), "abc");
        assert_eq!(truncate("abcdefghij", 3), "abc");
    }

    #[test]
    fn test_rank_info_from_entry() {
        let entry = LeagueEntryDto {
            league_id: "uuid".to_string(),
            queue_type: "RANKED_SOLO_5x5".to_string(),
            tier: "GOLD".to_string(),
            rank: "II".to_string(),
            league_points: 54,
            wins: 10,
            losses: 8,
            hot_streak: false,
            veteran: true,
            fresh_blood: false,
            inactive: false,
            league_name: None,
        };
        let info = RankInfo::from(&entry);

        assert_eq!(info.tier, "GOLD");
        assert_eq!(info.league_points, 54);
        assert!(info.veteran);
    }
}
