//! AI chat assistant pass-through.

use std::time::Duration;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ai::{build_prompt, ChatMessage};
use crate::api::state::AppState;
use crate::api::ApiError;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    pub context_data: Option<Value>,
    pub conversation_history: Option<Vec<ChatMessage>>,
    pub ai_model: Option<String>,
    /// Response timeout in seconds
    pub timeout: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub ai_response: String,
    pub model_used: String,
}

/// Forward a coaching question to the AI backend, bounded by the
/// caller-supplied timeout. The call is abandoned once the deadline
/// passes.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let ai_config = &state.config.ai;

    // Unknown models fall back to the configured default
    let model = match request.ai_model {
        Some(model) if ai_config.available_models.contains(&model) => model,
        _ => ai_config.model.clone(),
    };
    debug!("Using AI model: {}", model);

    let timeout_seconds = request
        .timeout
        .filter(|t| *t > 0.0)
        .unwrap_or(ai_config.timeout_seconds as f64);

    let full_prompt = build_prompt(
        &request.prompt,
        request.context_data.as_ref(),
        request.conversation_history.as_deref(),
    );

    let generation = state.ai.generate(&model, &full_prompt);
    let response = match tokio::time::timeout(Duration::from_secs_f64(timeout_seconds), generation)
        .await
    {
        Ok(result) => result?,
        Err(_) => {
            warn!("AI request timed out after {} seconds", timeout_seconds);
            return Err(ApiError::Timeout(format!(
                "AI response took longer than {} seconds. Try again or increase timeout.",
                timeout_seconds
            )));
        }
    };

    info!(
        "AI response generated successfully for prompt: '{}...'",
        request.prompt.chars().take(50).collect::<String>()
    );
    Ok(Json(ChatResponse {
        ai_response: response,
        model_used: model,
    }))
}
