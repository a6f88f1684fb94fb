//! Database operations for the marketplace `PostgreSQL` database.
//!
//! # Tables
//!
//! - `users` - Marketplace accounts and cached DripCoin balances
//! - `sessions` - Tower-sessions storage
//! - `shops` / `products` - The catalog
//! - `cart_items` - Per-user carts with tuple-merge semantics
//! - `wishlist_items` / `saved_shops` - Membership links, unique per pair
//! - `flash_drops` - Time-boxed promotions
//! - `outfit_boards` / `outfit_board_items` - Curated product collections
//! - `coin_transactions` - Append-only DripCoin ledger
//!
//! All queries use the runtime-checked sqlx API with `FromRow` models.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p dripden-cli -- migrate
//! ```

pub mod boards;
pub mod cart;
pub mod coins;
pub mod flash_drops;
pub mod products;
pub mod saved_shops;
pub mod shops;
pub mod users;
pub mod wishlist;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use boards::BoardRepository;
pub use cart::CartRepository;
pub use coins::CoinLedgerRepository;
pub use flash_drops::FlashDropRepository;
pub use products::ProductRepository;
pub use saved_shops::SavedShopRepository;
pub use shops::ShopRepository;
pub use users::UserRepository;
pub use wishlist::WishlistRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
