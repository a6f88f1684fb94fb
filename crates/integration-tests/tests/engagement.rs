//! Integration tests for wishlist, saved shops, and outfit boards.
//!
//! Run with: cargo test -p dripden-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use dripden_integration_tests::{
    base_url, client, create_test_product, register_user, seeded_shops, unique_username,
};

async fn coin_reason_count(client: &reqwest::Client, reason: &str) -> usize {
    let transactions: Vec<Value> = client
        .get(format!("{}/api/coins/transactions", base_url()))
        .send()
        .await
        .expect("Failed to list transactions")
        .json()
        .await
        .expect("Failed to parse transactions");

    transactions.iter().filter(|t| t["reason"] == reason).count()
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_following_twice_keeps_one_row_and_one_grant() {
    let client = client();
    register_user(&client, &unique_username("follow"), "secret123").await;

    let shops = seeded_shops(&client).await;
    let shop_id = shops.first().and_then(|s| s["id"].as_str()).expect("shop id");

    for _ in 0..2 {
        let resp = client
            .post(format!("{}/api/saved-shops", base_url()))
            .json(&json!({ "shopId": shop_id }))
            .send()
            .await
            .expect("Failed to follow shop");
        assert!(resp.status().is_success());
    }

    let saved: Vec<Value> = client
        .get(format!("{}/api/saved-shops", base_url()))
        .send()
        .await
        .expect("Failed to list saved shops")
        .json()
        .await
        .expect("Failed to parse saved shops");

    let matching = saved.iter().filter(|s| s["shopId"] == shop_id).count();
    assert_eq!(matching, 1, "duplicate follow created a second row");

    // The 10-coin grant fired exactly once
    assert_eq!(coin_reason_count(&client, "Followed a shop").await, 1);
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_wishlist_add_twice_grants_once() {
    let client = client();
    register_user(&client, &unique_username("wish"), "secret123").await;

    let product = create_test_product(&client, "Wishlist Repeat Scarf").await;

    for _ in 0..2 {
        let resp = client
            .post(format!("{}/api/wishlist", base_url()))
            .json(&json!({ "productId": product["id"] }))
            .send()
            .await
            .expect("Failed to add to wishlist");
        assert!(resp.status().is_success());
    }

    let wishlist: Vec<Value> = client
        .get(format!("{}/api/wishlist", base_url()))
        .send()
        .await
        .expect("Failed to get wishlist")
        .json()
        .await
        .expect("Failed to parse wishlist");

    let matching = wishlist
        .iter()
        .filter(|line| line["productId"] == product["id"])
        .count();
    assert_eq!(matching, 1);
    assert_eq!(coin_reason_count(&client, "Saved item to wishlist").await, 1);
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_removing_missing_wishlist_item_succeeds() {
    let client = client();
    register_user(&client, &unique_username("wish"), "secret123").await;

    // Never-wishlisted random product ID: delete is idempotent
    let resp = client
        .delete(format!("{}/api/wishlist/{}", base_url(), Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_board_lifecycle() {
    let client = client();
    register_user(&client, &unique_username("board"), "secret123").await;

    // Create a board (+15 coins)
    let board: Value = client
        .post(format!("{}/api/outfit-boards", base_url()))
        .json(&json!({ "name": "Festival Fits", "description": "summer looks" }))
        .send()
        .await
        .expect("Failed to create board")
        .json()
        .await
        .expect("Failed to parse board");
    assert_eq!(coin_reason_count(&client, "Created outfit board").await, 1);

    // Add a product and read it back
    let product = create_test_product(&client, "Board Test Shades").await;
    let board_id = board["id"].as_str().expect("board id");

    let resp = client
        .post(format!("{}/api/outfit-boards/{board_id}/items", base_url()))
        .json(&json!({ "productId": product["id"] }))
        .send()
        .await
        .expect("Failed to add board item");
    assert!(resp.status().is_success());

    let items: Vec<Value> = client
        .get(format!("{}/api/outfit-boards/{board_id}/items", base_url()))
        .send()
        .await
        .expect("Failed to get board items")
        .json()
        .await
        .expect("Failed to parse board items");
    assert_eq!(items.len(), 1);
    assert_eq!(items.first().expect("one item")["product"]["id"], product["id"]);

    // Delete the board
    let resp = client
        .delete(format!("{}/api/outfit-boards/{board_id}", base_url()))
        .send()
        .await
        .expect("Failed to delete board");
    assert!(resp.status().is_success());

    let boards: Vec<Value> = client
        .get(format!("{}/api/outfit-boards", base_url()))
        .send()
        .await
        .expect("Failed to list boards")
        .json()
        .await
        .expect("Failed to parse boards");
    assert!(boards.iter().all(|b| b["id"] != board["id"]));
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_other_users_board_is_invisible() {
    let owner = client();
    register_user(&owner, &unique_username("owner"), "secret123").await;

    let board: Value = owner
        .post(format!("{}/api/outfit-boards", base_url()))
        .json(&json!({ "name": "Private Board" }))
        .send()
        .await
        .expect("Failed to create board")
        .json()
        .await
        .expect("Failed to parse board");
    let board_id = board["id"].as_str().expect("board id");

    let intruder = client();
    register_user(&intruder, &unique_username("intruder"), "secret123").await;

    let resp = intruder
        .get(format!("{}/api/outfit-boards/{board_id}/items", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_profile_aggregates_engagement() {
    let client = client();
    register_user(&client, &unique_username("profile"), "secret123").await;

    let shops = seeded_shops(&client).await;
    let shop_id = shops.first().and_then(|s| s["id"].as_str()).expect("shop id");

    let resp = client
        .post(format!("{}/api/saved-shops", base_url()))
        .json(&json!({ "shopId": shop_id }))
        .send()
        .await
        .expect("Failed to follow shop");
    assert!(resp.status().is_success());

    let profile: Value = client
        .get(format!("{}/api/profile", base_url()))
        .send()
        .await
        .expect("Failed to get profile")
        .json()
        .await
        .expect("Failed to parse profile");

    assert_eq!(profile["savedShops"].as_array().map(Vec::len), Some(1));
    assert_eq!(profile["wishlistItems"].as_array().map(Vec::len), Some(0));
    // Welcome bonus + follow grant, newest first
    let transactions = profile["recentTransactions"]
        .as_array()
        .expect("transactions array");
    assert_eq!(transactions.len(), 2);
    assert_eq!(
        transactions.first().expect("latest")["reason"],
        "Followed a shop"
    );
    // user balance matches the ledger sum
    assert_eq!(profile["user"]["dripCoins"], 1250 + 10);
}
