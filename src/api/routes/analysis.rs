//! Team composition analysis endpoint.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::ChampionData;
use crate::scoring::composition::{analyze_matchup, analyze_team, CompositionReport, TEAM_SIZE};
use crate::scoring::TagSet;

#[derive(Debug, Deserialize)]
pub struct CompositionRequest {
    pub champions: Vec<String>,
    pub enemy_champions: Option<Vec<String>>,
    #[serde(default = "default_game_phase")]
    pub game_phase: String,
}

fn default_game_phase() -> String {
    "all".to_string()
}

/// Analyze a 5-champion team: archetype, strengths/weaknesses, phase
/// outlooks, strategy, and optionally a matchup view against an enemy
/// team.
pub async fn team_composition(
    State(state): State<AppState>,
    Json(request): Json<CompositionRequest>,
) -> Result<Json<CompositionReport>, ApiError> {
    if request.champions.len() != TEAM_SIZE {
        return Err(ApiError::InvalidInput(
            "Team must have exactly 5 champions.".to_string(),
        ));
    }
    if let Some(ref enemy) = request.enemy_champions {
        if enemy.len() != TEAM_SIZE {
            return Err(ApiError::InvalidInput(
                "Enemy team must have exactly 5 champions if provided.".to_string(),
            ));
        }
    }

    let roster = state.catalog.fetch_champions().await?;

    let team: Vec<&ChampionData> = request
        .champions
        .iter()
        .map(|name| {
            roster
                .find(name)
                .map(|(_, champ)| champ)
                .ok_or_else(|| ApiError::NotFound(format!("Champion '{}' not found.", name)))
        })
        .collect::<Result<_, _>>()?;

    let mut report = analyze_team(&team, &request.game_phase);

    // Enemy lookups are best-effort: misses drop out of the tag set
    // instead of failing the whole analysis.
    if let Some(ref enemy_names) = request.enemy_champions {
        let enemy: Vec<&ChampionData> = enemy_names
            .iter()
            .filter_map(|name| roster.find(name).map(|(_, champ)| champ))
            .collect();
        let team_tags = TagSet::from_champions(&team);
        let enemy_tags = TagSet::from_champions(&enemy);
        report.matchup_analysis = Some(analyze_matchup(&team_tags, &enemy_tags));
    }

    info!(
        "Analyzed team composition: {} archetype with {} champions",
        report.team_composition.archetype,
        request.champions.len()
    );
    Ok(Json(report))
}
