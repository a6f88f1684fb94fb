//! Aggregate profile route handler.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::{BoardRepository, CoinLedgerRepository, SavedShopRepository, WishlistRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CoinTransaction, OutfitBoard, SavedShopLine, User, WishlistLine};
use crate::services::AuthService;
use crate::state::AppState;

/// How many ledger rows the profile view includes.
const RECENT_TRANSACTION_COUNT: usize = 10;

/// Aggregate profile view: the user plus everything their profile page shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: User,
    pub wishlist_items: Vec<WishlistLine>,
    pub saved_shops: Vec<SavedShopLine>,
    pub outfit_boards: Vec<OutfitBoard>,
    pub recent_transactions: Vec<CoinTransaction>,
}

/// Get the aggregate profile view.
///
/// The four collections are fetched concurrently.
///
/// # Errors
///
/// Returns 404 when the session points at a deleted user.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<ProfileResponse>> {
    let pool = state.pool();

    let user = AuthService::new(pool)
        .get_user(current.id)
        .await
        .map_err(|_| AppError::NotFound("User".to_owned()))?;

    let wishlist_repo = WishlistRepository::new(pool);
    let saved_shop_repo = SavedShopRepository::new(pool);
    let board_repo = BoardRepository::new(pool);
    let coin_ledger_repo = CoinLedgerRepository::new(pool);

    let (wishlist_items, saved_shops, outfit_boards, mut transactions) = tokio::try_join!(
        wishlist_repo.list(user.id),
        saved_shop_repo.list(user.id),
        board_repo.list(user.id),
        coin_ledger_repo.list_for_user(user.id),
    )?;

    transactions.truncate(RECENT_TRANSACTION_COUNT);

    Ok(Json(ProfileResponse {
        user,
        wishlist_items,
        saved_shops,
        outfit_boards,
        recent_transactions: transactions,
    }))
}
