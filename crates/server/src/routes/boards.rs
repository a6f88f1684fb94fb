//! Outfit-board route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use dripden_core::{BoardId, CoinGrant, ProductId, UserId};

use crate::db::BoardRepository;
use crate::error::{AppError, FieldIssue, Result};
use crate::middleware::RequireAuth;
use crate::models::{BoardLine, OutfitBoard, OutfitBoardItem};
use crate::routes::auth::MessageResponse;
use crate::services::CoinService;
use crate::state::AppState;

/// Request body for creating a board.
#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Request body for adding a product to a board.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBoardItemRequest {
    pub product_id: ProductId,
}

/// List the user's boards.
///
/// # Errors
///
/// Returns 500 if the database query fails.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<OutfitBoard>>> {
    let repo = BoardRepository::new(state.pool());
    let boards = repo.list(user.id).await?;

    Ok(Json(boards))
}

/// Create a board and award the board-creation coin grant.
///
/// # Errors
///
/// Returns 400 on validation failure.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateBoardRequest>,
) -> Result<Json<OutfitBoard>> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation(vec![FieldIssue::new(
            "name",
            "must not be empty",
        )]));
    }

    let repo = BoardRepository::new(state.pool());
    let board = repo
        .create(user.id, body.name.trim(), body.description.as_deref())
        .await?;

    let coins = CoinService::new(state.pool());
    coins.grant(user.id, CoinGrant::CreateBoard).await?;

    Ok(Json(board))
}

/// Get a board's items with each row's product.
///
/// # Errors
///
/// Returns 404 when the board doesn't exist or belongs to another user.
pub async fn items(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BoardId>,
) -> Result<Json<Vec<BoardLine>>> {
    let repo = BoardRepository::new(state.pool());
    let board = require_owned_board(&repo, id, user.id).await?;
    let lines = repo.items(board.id).await?;

    Ok(Json(lines))
}

/// Add a product to a board.
///
/// # Errors
///
/// Returns 404 when the board doesn't exist or belongs to another user,
/// 409 if the product doesn't exist.
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BoardId>,
    Json(body): Json<AddBoardItemRequest>,
) -> Result<Json<OutfitBoardItem>> {
    let repo = BoardRepository::new(state.pool());
    let board = require_owned_board(&repo, id, user.id).await?;
    let item = repo.add_item(board.id, body.product_id).await?;

    Ok(Json(item))
}

/// Remove a product from a board.
///
/// Idempotent.
///
/// # Errors
///
/// Returns 404 when the board doesn't exist or belongs to another user.
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((board_id, product_id)): Path<(BoardId, ProductId)>,
) -> Result<Json<MessageResponse>> {
    let repo = BoardRepository::new(state.pool());
    let board = require_owned_board(&repo, board_id, user.id).await?;
    repo.remove_item(board.id, product_id).await?;

    Ok(Json(MessageResponse {
        message: "Product removed from board".to_owned(),
    }))
}

/// Delete a board and its items.
///
/// Idempotent once ownership is established.
///
/// # Errors
///
/// Returns 500 if the database delete fails.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BoardId>,
) -> Result<Json<MessageResponse>> {
    let repo = BoardRepository::new(state.pool());
    repo.delete(user.id, id).await?;

    Ok(Json(MessageResponse {
        message: "Outfit board deleted".to_owned(),
    }))
}

/// Load a board and verify it belongs to the user.
///
/// A board owned by someone else is reported as missing rather than
/// forbidden, so board IDs don't leak.
async fn require_owned_board(
    repo: &BoardRepository<'_>,
    board_id: BoardId,
    user_id: UserId,
) -> Result<OutfitBoard> {
    let board = repo
        .get(board_id)
        .await?
        .filter(|b| b.user_id == user_id)
        .ok_or_else(|| AppError::NotFound("Outfit board".to_owned()))?;

    Ok(board)
}
