//! Saved-shop (follow) route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use dripden_core::{CoinGrant, ShopId};

use crate::db::SavedShopRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{SavedShop, SavedShopLine};
use crate::routes::auth::MessageResponse;
use crate::services::CoinService;
use crate::state::AppState;

/// Request body for following a shop.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveShopRequest {
    pub shop_id: ShopId,
}

/// Get the user's followed shops.
///
/// # Errors
///
/// Returns 500 if the database query fails.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<SavedShopLine>>> {
    let repo = SavedShopRepository::new(state.pool());
    let lines = repo.list(user.id).await?;

    Ok(Json(lines))
}

/// Follow a shop.
///
/// Following an already-followed shop returns the existing row; the coin
/// grant only fires when a row was actually inserted.
///
/// # Errors
///
/// Returns 409 if the shop doesn't exist.
pub async fn save(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<SaveShopRequest>,
) -> Result<Json<SavedShop>> {
    let repo = SavedShopRepository::new(state.pool());
    let (link, inserted) = repo.save(user.id, body.shop_id).await?;

    if inserted {
        let coins = CoinService::new(state.pool());
        coins.grant(user.id, CoinGrant::FollowShop).await?;
    }

    Ok(Json(link))
}

/// Unfollow a shop.
///
/// Idempotent: unfollowing a shop that isn't followed still succeeds.
///
/// # Errors
///
/// Returns 500 if the database delete fails.
pub async fn unsave(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(shop_id): Path<ShopId>,
) -> Result<Json<MessageResponse>> {
    let repo = SavedShopRepository::new(state.pool());
    repo.unsave(user.id, shop_id).await?;

    Ok(Json(MessageResponse {
        message: "Shop unfollowed".to_owned(),
    }))
}
