//! REST API endpoints.
//!
//! Axum-based HTTP API exposing account lookup, match data, catalog
//! access, aggregation analytics, composition scoring and the AI chat
//! pass-through.

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::ai::AiError;
use crate::catalog::CatalogError;
use crate::riot::RiotError;

pub mod routes;
pub mod state;
pub mod validators;

use state::AppState;

/// API error taxonomy. Every variant maps to a stable machine-readable
/// code plus a human message; the frontend switches on the code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRegion(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    NoDataFound(String),

    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::InvalidRegion(_) => (StatusCode::BAD_REQUEST, "INVALID_REGION"),
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::NoDataFound(_) => (StatusCode::NOT_FOUND, "NO_DATA_FOUND"),
            ApiError::UpstreamUnavailable(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
            ApiError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RiotError> for ApiError {
    fn from(err: RiotError) -> Self {
        match err {
            RiotError::InvalidRegion(_) => ApiError::InvalidRegion(err.to_string()),
            RiotError::NotFound(_) | RiotError::ExhaustedNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
            RiotError::Exhausted { .. }
            | RiotError::Forbidden
            | RiotError::UpstreamStatus { .. }
            | RiotError::Http(_) => ApiError::UpstreamUnavailable(err.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::UpstreamUnavailable(err.to_string())
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Timeout(_) => ApiError::Timeout(err.to_string()),
            other => ApiError::Internal(format!("Failed to generate AI response: {}", other)),
        }
    }
}

/// Build the application router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/", get(routes::root::health))
        // User
        .route("/user/puuid", post(routes::user::riot_id_lookup))
        .route("/user/summoner", get(routes::user::summoner_info))
        .route("/user/ranked", get(routes::user::ranked_stats))
        .route("/user/mastery", get(routes::user::champion_mastery))
        .route("/user/match-ids", post(routes::user::match_ids))
        .route("/user/runes", get(routes::user::rune_analysis))
        .route("/user/spells", get(routes::user::spell_analysis))
        // Match
        .route("/match/details", post(routes::matches::match_details))
        .route(
            "/match/participants",
            post(routes::matches::match_participants),
        )
        .route("/match/timeline", post(routes::matches::match_timeline))
        // Game assets
        .route("/assets/champions", get(routes::assets::champions))
        .route("/assets/abilities", get(routes::assets::champion_abilities))
        .route("/assets/items", get(routes::assets::items))
        // Analytics
        .route(
            "/analytics/performance",
            get(routes::analytics::player_performance),
        )
        .route(
            "/analytics/winrates",
            get(routes::analytics::champion_winrates),
        )
        // Analysis
        .route(
            "/analysis/team-composition",
            post(routes::analysis::team_composition),
        )
        // Predictions
        .route(
            "/predictions/match-outcome",
            post(routes::predictions::match_outcome),
        )
        // AI assistant
        .route("/ai/chat", post(routes::ai::chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origin == "*" {
        layer.allow_origin(Any)
    } else {
        match origin.parse::<HeaderValue>() {
            Ok(value) => layer.allow_origin(value),
            Err(_) => layer.allow_origin(Any),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_state;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_region_is_rejected_before_any_fetch() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/user/summoner?region=atlantis&puuid=abc")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "INVALID_REGION");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("atlantis"));
    }

    #[tokio::test]
    async fn test_wrong_team_size_is_rejected() {
        let app = build_router(test_state());
        let payload = serde_json::json!({
            "champions": ["Malphite", "Lux", "Jinx", "Thresh"]
        });
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/analysis/team-composition")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_six_champion_outcome_request_is_rejected() {
        let app = build_router(test_state());
        let payload = serde_json::json!({
            "blue_team": ["A", "B", "C", "D", "E", "F"],
            "red_team": ["A", "B", "C", "D", "E"]
        });
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/predictions/match-outcome")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_game_name_is_rejected() {
        let app = build_router(test_state());
        let payload = serde_json::json!({
            "game_name": "this name is way past sixteen",
            "tag_line": "EUW",
            "region": "europe"
        });
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/user/puuid")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
