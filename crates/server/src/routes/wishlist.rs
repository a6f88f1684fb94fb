//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use dripden_core::{CoinGrant, ProductId};

use crate::db::WishlistRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{WishlistItem, WishlistLine};
use crate::routes::auth::MessageResponse;
use crate::services::CoinService;
use crate::state::AppState;

/// Request body for adding a product to the wishlist.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWishlistItemRequest {
    pub product_id: ProductId,
}

/// Get the wishlist with each row's product.
///
/// # Errors
///
/// Returns 500 if the database query fails.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<WishlistLine>>> {
    let repo = WishlistRepository::new(state.pool());
    let lines = repo.list(user.id).await?;

    Ok(Json(lines))
}

/// Add a product to the wishlist.
///
/// Re-adding an already-wishlisted product returns the existing row; the
/// coin grant only fires when a row was actually inserted, so retries can't
/// double-award.
///
/// # Errors
///
/// Returns 409 if the product doesn't exist.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<AddWishlistItemRequest>,
) -> Result<Json<WishlistItem>> {
    let repo = WishlistRepository::new(state.pool());
    let (item, inserted) = repo.add(user.id, body.product_id).await?;

    if inserted {
        let coins = CoinService::new(state.pool());
        coins.grant(user.id, CoinGrant::WishlistAdd).await?;
    }

    Ok(Json(item))
}

/// Remove a product from the wishlist.
///
/// Idempotent: removing a product that isn't wishlisted still succeeds.
///
/// # Errors
///
/// Returns 500 if the database delete fails.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<ProductId>,
) -> Result<Json<MessageResponse>> {
    let repo = WishlistRepository::new(state.pool());
    repo.remove(user.id, product_id).await?;

    Ok(Json(MessageResponse {
        message: "Item removed from wishlist".to_owned(),
    }))
}
