//! Shared helpers for DRIPDEN integration tests.
//!
//! The tests are black-box API contract tests. They require:
//! - A running `PostgreSQL` database with migrations applied
//!   (`cargo run -p dripden-cli -- migrate`)
//! - Seeded catalog data (`cargo run -p dripden-cli -- seed`)
//! - The server running (`cargo run -p dripden-server`)
//!
//! Every test is `#[ignore]`d so `cargo test` stays green without a live
//! stack; run them with `cargo test -p dripden-integration-tests -- --ignored`.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)] // test helpers panic by design

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("DRIPDEN_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store for session auth.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique throwaway username.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Register a fresh user and return the response body.
///
/// The client's cookie store holds the session afterwards.
pub async fn register_user(client: &Client, username: &str, password: &str) -> Value {
    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to register user");

    assert!(
        resp.status().is_success(),
        "registration failed: {}",
        resp.status()
    );

    resp.json().await.expect("Failed to parse register response")
}

/// Fetch the seeded shop list, panicking when the catalog is empty.
pub async fn seeded_shops(client: &Client) -> Vec<Value> {
    let shops: Vec<Value> = client
        .get(format!("{}/api/shops", base_url()))
        .send()
        .await
        .expect("Failed to list shops")
        .json()
        .await
        .expect("Failed to parse shops");

    assert!(
        !shops.is_empty(),
        "no shops found; run `cargo run -p dripden-cli -- seed` first"
    );

    shops
}

/// Create a product in the first seeded shop and return it.
///
/// Requires the client to be logged in.
pub async fn create_test_product(client: &Client, name: &str) -> Value {
    let shops = seeded_shops(client).await;
    let shop_id = shops
        .first()
        .and_then(|s| s["id"].as_str())
        .expect("shop has an id")
        .to_owned();

    let resp = client
        .post(format!("{}/api/products", base_url()))
        .json(&json!({
            "shopId": shop_id,
            "name": name,
            "price": "49.99",
            "sizes": ["S", "M", "L"],
            "colors": ["Black"],
            "stock": 10,
            "category": "Streetwear"
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert!(
        resp.status().is_success(),
        "product creation failed: {}",
        resp.status()
    );

    resp.json().await.expect("Failed to parse product response")
}
