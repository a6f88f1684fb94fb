//! DripBot assistant route handlers.
//!
//! Thin pass-throughs to the Claude features. Any upstream failure -
//! including a missing API key - collapses into a generic per-feature
//! message with a 502; the details stay in the logs.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::claude::{
    ChatTurn, ClaudeClient, DripScore, DropForecast, OutfitPreferences, OutfitSuggestion,
    ShopRecommendations, dripbot,
};
use crate::error::{AppError, FieldIssue, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Request body for a chat message.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Chat reply.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Request body for the drip-score analyzer.
#[derive(Debug, Deserialize)]
pub struct DripScoreRequest {
    /// Base64-encoded JPEG of the outfit.
    pub image: String,
}

/// Request body for shop recommendations.
#[derive(Debug, Deserialize)]
pub struct ShopRecommendationsRequest {
    pub preferences: String,
}

/// Request body for the drop forecaster.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropForecastRequest {
    pub recent_trends: Vec<String>,
}

/// Get the configured Claude client, or fail like any other upstream error.
fn require_claude<'a>(state: &'a AppState, failure: &str) -> Result<&'a ClaudeClient> {
    state.claude().ok_or_else(|| {
        tracing::warn!("DripBot request with no ANTHROPIC_API_KEY configured");
        AppError::Upstream(failure.to_owned())
    })
}

/// Chat with DripBot.
///
/// # Errors
///
/// Returns 400 on an empty message, 502 on upstream failure.
pub async fn chat(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>> {
    const FAILURE: &str = "Failed to chat with DripBot";

    if body.message.trim().is_empty() {
        return Err(AppError::Validation(vec![FieldIssue::new(
            "message",
            "must not be empty",
        )]));
    }

    let client = require_claude(&state, FAILURE)?;
    let reply = dripbot::chat(client, &body.history, &body.message)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "DripBot chat failed");
            AppError::Upstream(FAILURE.to_owned())
        })?;

    Ok(Json(ChatReply { reply }))
}

/// Rate an outfit image.
///
/// The score is always within [1, 100].
///
/// # Errors
///
/// Returns 400 on an empty image, 502 on upstream failure.
pub async fn drip_score(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<DripScoreRequest>,
) -> Result<Json<DripScore>> {
    const FAILURE: &str = "Failed to analyze drip";

    if body.image.trim().is_empty() {
        return Err(AppError::Validation(vec![FieldIssue::new(
            "image",
            "must not be empty",
        )]));
    }

    let client = require_claude(&state, FAILURE)?;
    let score = dripbot::analyze_drip(client, &body.image)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Drip analyzer failed");
            AppError::Upstream(FAILURE.to_owned())
        })?;

    Ok(Json(score))
}

/// Recommend shop types from stated style preferences.
///
/// # Errors
///
/// Returns 400 on empty preferences, 502 on upstream failure.
pub async fn shop_recommendations(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<ShopRecommendationsRequest>,
) -> Result<Json<ShopRecommendations>> {
    const FAILURE: &str = "Failed to get shop recommendations";

    if body.preferences.trim().is_empty() {
        return Err(AppError::Validation(vec![FieldIssue::new(
            "preferences",
            "must not be empty",
        )]));
    }

    let client = require_claude(&state, FAILURE)?;
    let recommendations = dripbot::recommend_shops(client, &body.preferences)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Shop recommendations failed");
            AppError::Upstream(FAILURE.to_owned())
        })?;

    Ok(Json(recommendations))
}

/// Build an outfit suggestion from preferences.
///
/// # Errors
///
/// Returns 502 on upstream failure.
pub async fn outfit(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<OutfitPreferences>,
) -> Result<Json<OutfitSuggestion>> {
    const FAILURE: &str = "Failed to build outfit";

    let client = require_claude(&state, FAILURE)?;
    let suggestion = dripbot::suggest_outfit(client, &body).await.map_err(|e| {
        tracing::error!(error = %e, "Outfit builder failed");
        AppError::Upstream(FAILURE.to_owned())
    })?;

    Ok(Json(suggestion))
}

/// Predict upcoming flash drops from recent trend keywords.
///
/// # Errors
///
/// Returns 400 on an empty trend list, 502 on upstream failure.
pub async fn drop_forecast(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<DropForecastRequest>,
) -> Result<Json<DropForecast>> {
    const FAILURE: &str = "Failed to predict flash drops";

    if body.recent_trends.is_empty() {
        return Err(AppError::Validation(vec![FieldIssue::new(
            "recentTrends",
            "must not be empty",
        )]));
    }

    let client = require_claude(&state, FAILURE)?;
    let forecast = dripbot::forecast_drop(client, &body.recent_trends)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Drop forecaster failed");
            AppError::Upstream(FAILURE.to_owned())
        })?;

    Ok(Json(forecast))
}
