//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database ping)
//!
//! # Auth
//! POST /api/auth/register           - Create account (+1250 welcome bonus)
//! POST /api/auth/login              - Log in
//! POST /api/auth/logout             - Log out
//! GET  /api/auth/me                 - Current user
//!
//! # Catalog
//! GET  /api/shops                   - List shops (?search=&tag=)
//! GET  /api/shops/{id}              - Shop detail
//! GET  /api/products                - List products (?shopId=&search=&category=)
//! GET  /api/products/{id}           - Product detail
//! POST /api/products                - Create product (auth)
//!
//! # Cart (auth)
//! GET    /api/cart                  - Cart with products
//! POST   /api/cart                  - Add item, merging duplicates (+5 coins)
//! PATCH  /api/cart/{id}             - Set quantity
//! DELETE /api/cart/{id}             - Remove item
//! DELETE /api/cart                  - Clear cart
//!
//! # Wishlist (auth)
//! GET    /api/wishlist              - Wishlist with products
//! POST   /api/wishlist              - Add product (+3 coins when new)
//! DELETE /api/wishlist/{productId}  - Remove product (idempotent)
//!
//! # Saved shops (auth)
//! GET    /api/saved-shops           - Followed shops
//! POST   /api/saved-shops           - Follow (+10 coins when new)
//! DELETE /api/saved-shops/{shopId}  - Unfollow (idempotent)
//!
//! # Flash drops
//! GET  /api/flash-drops             - Active drops, newest first
//! POST /api/flash-drops             - Create drop (auth)
//! POST /api/flash-drops/{id}/claim  - Claim one unit (auth)
//!
//! # Outfit boards (auth)
//! GET    /api/outfit-boards                          - List boards
//! POST   /api/outfit-boards                          - Create (+15 coins)
//! GET    /api/outfit-boards/{id}/items               - Board items
//! POST   /api/outfit-boards/{id}/items               - Add product
//! DELETE /api/outfit-boards/{boardId}/items/{productId} - Remove product
//! DELETE /api/outfit-boards/{id}                     - Delete board
//!
//! # Coins & profile (auth)
//! GET /api/coins/transactions       - DripCoin ledger, newest first
//! GET /api/profile                  - Aggregate profile view
//!
//! # DripBot (auth)
//! POST /api/dripbot/chat                 - Chat reply
//! POST /api/dripbot/drip-score           - Rate an outfit image
//! POST /api/dripbot/shop-recommendations - Recommend shop types
//! POST /api/dripbot/outfit               - Build an outfit
//! POST /api/dripbot/drop-forecast        - Predict upcoming drops
//! ```

pub mod auth;
pub mod boards;
pub mod cart;
pub mod coins;
pub mod dripbot;
pub mod flash_drops;
pub mod products;
pub mod profile;
pub mod saved_shops;
pub mod shops;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shops::list))
        .route("/{id}", get(shops::show))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).post(cart::add).delete(cart::clear))
        .route("/{id}", axum::routing::patch(cart::update).delete(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).post(wishlist::add))
        .route("/{product_id}", delete(wishlist::remove))
}

/// Create the saved-shops routes router.
pub fn saved_shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(saved_shops::show).post(saved_shops::save))
        .route("/{shop_id}", delete(saved_shops::unsave))
}

/// Create the flash-drop routes router.
pub fn flash_drop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(flash_drops::list).post(flash_drops::create))
        .route("/{id}/claim", post(flash_drops::claim))
}

/// Create the outfit-board routes router.
pub fn board_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(boards::list).post(boards::create))
        .route(
            "/{id}",
            delete(boards::delete),
        )
        .route(
            "/{id}/items",
            get(boards::items).post(boards::add_item),
        )
        .route(
            "/{board_id}/items/{product_id}",
            delete(boards::remove_item),
        )
}

/// Create the DripBot routes router.
pub fn dripbot_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(dripbot::chat))
        .route("/drip-score", post(dripbot::drip_score))
        .route("/shop-recommendations", post(dripbot::shop_recommendations))
        .route("/outfit", post(dripbot::outfit))
        .route("/drop-forecast", post(dripbot::drop_forecast))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/shops", shop_routes())
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/wishlist", wishlist_routes())
        .nest("/api/saved-shops", saved_shop_routes())
        .nest("/api/flash-drops", flash_drop_routes())
        .nest("/api/outfit-boards", board_routes())
        .route("/api/coins/transactions", get(coins::transactions))
        .route("/api/profile", get(profile::show))
        .nest("/api/dripbot", dripbot_routes())
}
