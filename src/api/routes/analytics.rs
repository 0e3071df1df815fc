//! Aggregation analytics endpoints: player performance and the simulated
//! champion meta view.

use axum::extract::{Query, State};
use axum::Json;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::meta::{
    meta_summary, simulate_champion_stats, sort_champion_stats, ChampionMetaStat, MetaSummary,
};
use crate::analytics::performance::{aggregate_performance, PerformanceSummary};
use crate::analytics::tables::queue_filter;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::riot::{fetch_matches, Region};

// ── Player performance ──────────────────────────────────────────

const PERFORMANCE_WINDOW_MAX: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct PerformanceParams {
    pub region: String,
    pub puuid: String,
    #[serde(default = "default_performance_window")]
    pub match_count: u32,
    #[serde(default = "default_queue_type")]
    pub queue_type: String,
}

fn default_performance_window() -> u32 {
    20
}

fn default_queue_type() -> String {
    "ranked".to_string()
}

#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub puuid: String,
    pub region: String,
    pub queue_type: String,
    #[serde(flatten)]
    pub summary: PerformanceSummary,
}

/// Performance statistics over a player's recent matches.
pub async fn player_performance(
    State(state): State<AppState>,
    Query(params): Query<PerformanceParams>,
) -> Result<Json<PerformanceResponse>, ApiError> {
    let region = Region::parse(&params.region)?;
    let window = params.match_count.min(PERFORMANCE_WINDOW_MAX);
    let queue = queue_filter(&params.queue_type);

    let ids = state
        .riot
        .match_ids_by_puuid(region, &params.puuid, window, queue)
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

    let summary = aggregate_performance(&params.puuid, &matches).ok_or_else(|| {
        ApiError::NoDataFound("No performance data found in recent matches.".to_string())
    })?;

    info!(
        "Analyzed performance for {} matches for PUUID: {}",
        summary.matches_analyzed, params.puuid
    );
    Ok(Json(PerformanceResponse {
        puuid: params.puuid,
        region: region.to_string(),
        queue_type: params.queue_type,
        summary,
    }))
}

// ── Champion win rates (simulated) ──────────────────────────────

const WINRATE_RESULT_MAX: usize = 200;

const SIMULATION_DISCLAIMER: &str =
    "This data is simulated for demonstration purposes. Production implementation would require extensive match data analysis.";

#[derive(Debug, Deserialize)]
pub struct WinrateParams {
    #[serde(default = "default_all")]
    pub rank: String,
    #[serde(default = "default_all")]
    pub role: String,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_winrate_limit")]
    pub limit: usize,
}

fn default_all() -> String {
    "ALL".to_string()
}

fn default_sort_by() -> String {
    "win_rate".to_string()
}

fn default_winrate_limit() -> usize {
    50
}

#[derive(Debug, Serialize)]
pub struct WinrateResponse {
    pub patch: String,
    pub rank_filter: String,
    pub role_filter: String,
    pub sort_by: String,
    pub total_champions: usize,
    pub meta_summary: MetaSummary,
    pub champions: Vec<ChampionMetaStat>,
    pub disclaimer: String,
}

/// Simulated champion win/pick/ban rates derived from catalog
/// characteristics. Explicitly labeled as simulated.
pub async fn champion_winrates(
    State(state): State<AppState>,
    Query(params): Query<WinrateParams>,
) -> Result<Json<WinrateResponse>, ApiError> {
    let limit = params.limit.min(WINRATE_RESULT_MAX);

    let roster = state.catalog.fetch_champions().await?;

    let mut stats = simulate_champion_stats(&roster, &params.rank, &params.role, &mut thread_rng());
    sort_champion_stats(&mut stats, &params.sort_by);
    stats.truncate(limit);

    let summary = meta_summary(&stats);

    info!(
        "Generated champion win rates for {} champions (rank: {}, role: {})",
        stats.len(),
        params.rank,
        params.role
    );
    Ok(Json(WinrateResponse {
        patch: state.catalog.version().to_string(),
        rank_filter: params.rank,
        role_filter: params.role,
        sort_by: params.sort_by,
        total_champions: stats.len(),
        meta_summary: summary,
        champions: stats,
        disclaimer: SIMULATION_DISCLAIMER.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_cap() {
        assert_eq!(45u32.min(PERFORMANCE_WINDOW_MAX), 30);
        assert_eq!(10u32.min(PERFORMANCE_WINDOW_MAX), 10);
    }

    #[test]
    fn test_winrate_limit_cap() {
        assert_eq!(500usize.min(WINRATE_RESULT_MAX), 200);
        assert_eq!(50usize.min(WINRATE_RESULT_MAX), 50);
    }
}
