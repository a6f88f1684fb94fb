//! Shop route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use dripden_core::ShopId;

use crate::db::ShopRepository;
use crate::db::shops::ShopFilter;
use crate::error::{AppError, Result};
use crate::models::Shop;
use crate::state::AppState;

/// Query parameters for listing shops.
#[derive(Debug, Deserialize)]
pub struct ShopListQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
}

/// List shops, optionally filtered.
///
/// # Errors
///
/// Returns 500 if the database query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ShopListQuery>,
) -> Result<Json<Vec<Shop>>> {
    let repo = ShopRepository::new(state.pool());
    let shops = repo
        .list(&ShopFilter {
            search: query.search,
            tag: query.tag,
        })
        .await?;

    Ok(Json(shops))
}

/// Get a shop by ID.
///
/// # Errors
///
/// Returns 404 if the shop doesn't exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ShopId>,
) -> Result<Json<Shop>> {
    let repo = ShopRepository::new(state.pool());
    let shop = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Shop".to_owned()))?;

    Ok(Json(shop))
}
