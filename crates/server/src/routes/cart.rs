//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use dripden_core::{CartItemId, CoinGrant, ProductId};

use crate::db::CartRepository;
use crate::db::cart::NewCartItem;
use crate::error::{AppError, FieldIssue, Result};
use crate::middleware::RequireAuth;
use crate::models::{CartItem, CartLine};
use crate::routes::auth::MessageResponse;
use crate::services::CoinService;
use crate::state::AppState;

/// Request body for adding an item to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub size: Option<String>,
    pub color: Option<String>,
}

const fn default_quantity() -> i32 {
    1
}

/// Request body for setting a cart row's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

fn validate_quantity(quantity: i32) -> Result<()> {
    if quantity < 1 {
        return Err(AppError::Validation(vec![FieldIssue::new(
            "quantity",
            "must be at least 1",
        )]));
    }
    Ok(())
}

/// Get the cart with each row's product.
///
/// # Errors
///
/// Returns 500 if the database query fails.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<CartLine>>> {
    let repo = CartRepository::new(state.pool());
    let lines = repo.list(user.id).await?;

    Ok(Json(lines))
}

/// Add an item to the cart, merging with an existing (product, size, color)
/// row, and award the cart-add coin grant.
///
/// # Errors
///
/// Returns 400 on validation failure, 409 if the product doesn't exist.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<AddCartItemRequest>,
) -> Result<Json<CartItem>> {
    validate_quantity(body.quantity)?;

    let repo = CartRepository::new(state.pool());
    let item = repo
        .add(
            user.id,
            &NewCartItem {
                product_id: body.product_id,
                quantity: body.quantity,
                size: body.size,
                color: body.color,
            },
        )
        .await?;

    let coins = CoinService::new(state.pool());
    coins.grant(user.id, CoinGrant::CartAdd).await?;

    Ok(Json(item))
}

/// Set the quantity of one cart row.
///
/// # Errors
///
/// Returns 400 on validation failure, 404 when the row doesn't exist or
/// belongs to another user.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<CartItemId>,
    Json(body): Json<UpdateCartItemRequest>,
) -> Result<Json<CartItem>> {
    validate_quantity(body.quantity)?;

    let repo = CartRepository::new(state.pool());
    let item = repo.update_quantity(user.id, id, body.quantity).await?;

    Ok(Json(item))
}

/// Remove one cart row.
///
/// Idempotent.
///
/// # Errors
///
/// Returns 500 if the database delete fails.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<CartItemId>,
) -> Result<Json<MessageResponse>> {
    let repo = CartRepository::new(state.pool());
    repo.remove(user.id, id).await?;

    Ok(Json(MessageResponse {
        message: "Item removed from cart".to_owned(),
    }))
}

/// Clear the cart.
///
/// # Errors
///
/// Returns 500 if the database delete fails.
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<MessageResponse>> {
    let repo = CartRepository::new(state.pool());
    repo.clear(user.id).await?;

    Ok(Json(MessageResponse {
        message: "Cart cleared".to_owned(),
    }))
}
