//! Integration tests for registration, login, and the DripCoin ledger.
//!
//! These tests require a running server and a migrated, seeded database.
//! Run with: cargo test -p dripden-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use dripden_integration_tests::{base_url, client, register_user, unique_username};

#[tokio::test]
#[ignore = "Requires running server and migrated database"]
async fn test_registration_grants_welcome_bonus() {
    let client = client();
    let username = unique_username("alice");

    let body = register_user(&client, &username, "secret123").await;

    // Balance is exactly the welcome bonus
    assert_eq!(body["user"]["dripCoins"], 1250);
    assert_eq!(body["user"]["username"], Value::String(username));

    // And a matching ledger row exists
    let transactions: Vec<Value> = client
        .get(format!("{}/api/coins/transactions", base_url()))
        .send()
        .await
        .expect("Failed to list transactions")
        .json()
        .await
        .expect("Failed to parse transactions");

    assert_eq!(transactions.len(), 1);
    let first = transactions.first().expect("one transaction");
    assert_eq!(first["amount"], 1250);
    assert_eq!(first["reason"], "Welcome bonus");
}

#[tokio::test]
#[ignore = "Requires running server and migrated database"]
async fn test_duplicate_username_is_conflict() {
    let client = client();
    let username = unique_username("dupe");

    register_user(&client, &username, "secret123").await;

    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({ "username": username, "password": "secret123" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running server and migrated database"]
async fn test_register_rejects_weak_password() {
    let client = client();

    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({ "username": unique_username("weak"), "password": "short" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and migrated database"]
async fn test_login_with_wrong_password_is_unauthorized() {
    let client = client();
    let username = unique_username("bob");

    register_user(&client, &username, "secret123").await;

    let fresh = dripden_integration_tests::client();
    let resp = fresh
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "username": username, "password": "wrong-password" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and migrated database"]
async fn test_logout_invalidates_session() {
    let client = client();
    let username = unique_username("carol");

    register_user(&client, &username, "secret123").await;

    // Session works
    let resp = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to get current user");
    assert_eq!(resp.status(), StatusCode::OK);

    // Log out
    let resp = client
        .post(format!("{}/api/auth/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::OK);

    // Session is gone
    let resp = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to get current user");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and migrated database"]
async fn test_protected_routes_reject_anonymous_requests() {
    let client = client();

    for path in ["/api/cart", "/api/wishlist", "/api/profile"] {
        let resp = client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "path {path}");
    }
}
