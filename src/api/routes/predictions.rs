//! Match outcome prediction endpoint.

use axum::extract::State;
use axum::Json;
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::ChampionData;
use crate::scoring::composition::TEAM_SIZE;
use crate::scoring::outcome::{evaluate_team, predict_outcome, TeamEvaluation};

#[derive(Debug, Deserialize)]
pub struct OutcomeRequest {
    pub blue_team: Vec<String>,
    pub red_team: Vec<String>,
    #[serde(default = "default_game_mode")]
    pub game_mode: String,
    #[serde(default = "default_average_rank")]
    pub average_rank: String,
}

fn default_game_mode() -> String {
    "CLASSIC".to_string()
}

fn default_average_rank() -> String {
    "GOLD".to_string()
}

#[derive(Debug, Serialize)]
pub struct Prediction {
    pub blue_team_win_probability: f64,
    pub red_team_win_probability: f64,
    pub confidence: String,
    pub predicted_winner: String,
}

#[derive(Debug, Serialize)]
pub struct TeamAnalysisPair {
    pub blue_team: TeamEvaluation,
    pub red_team: TeamEvaluation,
}

#[derive(Debug, Serialize)]
pub struct MatchFactors {
    pub game_mode: String,
    pub average_rank: String,
    pub key_factors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamRecommendations {
    pub blue_team: String,
    pub red_team: String,
}

#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub prediction: Prediction,
    pub team_analysis: TeamAnalysisPair,
    pub match_factors: MatchFactors,
    pub recommendations: TeamRecommendations,
    pub disclaimer: String,
}

const PREDICTION_DISCLAIMER: &str =
    "This prediction is based on champion data and simulated analysis. Actual match outcomes depend heavily on player skill, strategy, and execution.";

fn resolve_team<'a>(
    roster: &'a crate::models::ChampionRoster,
    names: &[String],
) -> Result<Vec<&'a ChampionData>, ApiError> {
    names
        .iter()
        .map(|name| {
            roster
                .find(name)
                .map(|(_, champ)| champ)
                .ok_or_else(|| ApiError::NotFound(format!("Champion '{}' not found.", name)))
        })
        .collect()
}

/// Predict a match outcome from both team compositions.
pub async fn match_outcome(
    State(state): State<AppState>,
    Json(request): Json<OutcomeRequest>,
) -> Result<Json<OutcomeResponse>, ApiError> {
    if request.blue_team.len() != TEAM_SIZE || request.red_team.len() != TEAM_SIZE {
        return Err(ApiError::InvalidInput(
            "Each team must have exactly 5 champions.".to_string(),
        ));
    }

    let roster = state.catalog.fetch_champions().await?;

    let blue = evaluate_team(&resolve_team(&roster, &request.blue_team)?);
    let red = evaluate_team(&resolve_team(&roster, &request.red_team)?);

    let mut rng = thread_rng();
    let (blue_probability, red_probability) = predict_outcome(
        &blue,
        &red,
        &request.game_mode,
        &request.average_rank,
        || rng.gen_range(-5.0..=5.0),
    );

    let predicted_winner = if blue_probability > red_probability {
        "Blue Team"
    } else {
        "Red Team"
    };

    info!(
        "Generated match prediction: Blue {:.1}% vs Red {:.1}%",
        blue_probability, red_probability
    );
    Ok(Json(OutcomeResponse {
        prediction: Prediction {
            blue_team_win_probability: blue_probability,
            red_team_win_probability: red_probability,
            confidence: "Medium".to_string(),
            predicted_winner: predicted_winner.to_string(),
        },
        team_analysis: TeamAnalysisPair {
            blue_team: blue,
            red_team: red,
        },
        match_factors: MatchFactors {
            game_mode: request.game_mode,
            average_rank: request.average_rank,
            key_factors: vec![
                "Team composition balance".to_string(),
                "Champion synergies".to_string(),
                "Player skill level adaptation".to_string(),
                "Game mode optimization".to_string(),
            ],
        },
        recommendations: TeamRecommendations {
            blue_team: "Focus on your team's strengths and coordinate team fights.".to_string(),
            red_team: "Look for picks and capitalize on enemy positioning mistakes.".to_string(),
        },
        disclaimer: PREDICTION_DISCLAIMER.to_string(),
    }))
}
