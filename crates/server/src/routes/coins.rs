//! DripCoin ledger route handlers.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::CoinTransaction;
use crate::services::CoinService;
use crate::state::AppState;

/// List the user's ledger, newest first.
///
/// # Errors
///
/// Returns 500 if the database query fails.
pub async fn transactions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<CoinTransaction>>> {
    let coins = CoinService::new(state.pool());
    let transactions = coins.history(user.id).await?;

    Ok(Json(transactions))
}
