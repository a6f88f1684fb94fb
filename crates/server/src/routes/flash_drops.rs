//! Flash-drop route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use dripden_core::{FlashDropId, ProductId};

use crate::db::FlashDropRepository;
use crate::db::flash_drops::NewFlashDrop;
use crate::error::{AppError, FieldIssue, Result};
use crate::middleware::RequireAuth;
use crate::models::{FlashDrop, FlashDropLine};
use crate::state::AppState;

/// Request body for creating a flash drop.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlashDropRequest {
    pub product_id: ProductId,
    pub limited_quantity: i32,
    pub ends_at: DateTime<Utc>,
}

impl CreateFlashDropRequest {
    /// Validate the request, collecting every field problem.
    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        if self.limited_quantity < 1 {
            issues.push(FieldIssue::new("limitedQuantity", "must be at least 1"));
        }
        if self.ends_at <= Utc::now() {
            issues.push(FieldIssue::new("endsAt", "must be in the future"));
        }

        issues
    }
}

/// List active drops (end time in the future), newest first.
///
/// # Errors
///
/// Returns 500 if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FlashDropLine>>> {
    let repo = FlashDropRepository::new(state.pool());
    let drops = repo.list_active().await?;

    Ok(Json(drops))
}

/// Create a flash drop with its full quantity remaining.
///
/// # Errors
///
/// Returns 400 on validation failure, 409 if the product doesn't exist.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<CreateFlashDropRequest>,
) -> Result<Json<FlashDrop>> {
    let issues = body.validate();
    if !issues.is_empty() {
        return Err(AppError::Validation(issues));
    }

    let repo = FlashDropRepository::new(state.pool());
    let drop = repo
        .create(&NewFlashDrop {
            product_id: body.product_id,
            limited_quantity: body.limited_quantity,
            ends_at: body.ends_at,
        })
        .await?;

    Ok(Json(drop))
}

/// Claim one unit of a drop.
///
/// The decrement is a single guarded UPDATE, so the last unit can only be
/// claimed once even under concurrent requests.
///
/// # Errors
///
/// Returns 404 when the drop doesn't exist, 409 when it is sold out or has
/// ended.
pub async fn claim(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<FlashDropId>,
) -> Result<Json<FlashDrop>> {
    let repo = FlashDropRepository::new(state.pool());

    match repo.claim(id).await? {
        Some(drop) => Ok(Json(drop)),
        None => {
            // Disambiguate: missing drop vs. sold out / ended
            match repo.get(id).await? {
                Some(_) => Err(AppError::Conflict(
                    "Flash drop is sold out or has ended".to_owned(),
                )),
                None => Err(AppError::NotFound("Flash drop".to_owned())),
            }
        }
    }
}
