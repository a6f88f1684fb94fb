//! Integration tests for flash drops: active filtering and claim semantics.
//!
//! Run with: cargo test -p dripden-integration-tests -- --ignored

use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::{Value, json};

use dripden_integration_tests::{
    base_url, client, create_test_product, register_user, unique_username,
};

async fn create_drop(
    client: &reqwest::Client,
    product_id: &Value,
    quantity: i32,
    ends_in: Duration,
) -> reqwest::Response {
    client
        .post(format!("{}/api/flash-drops", base_url()))
        .json(&json!({
            "productId": product_id,
            "limitedQuantity": quantity,
            "endsAt": (Utc::now() + ends_in).to_rfc3339()
        }))
        .send()
        .await
        .expect("Failed to create flash drop")
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_expired_drop_is_rejected_at_creation() {
    let client = client();
    register_user(&client, &unique_username("drops"), "secret123").await;
    let product = create_test_product(&client, "Expired Drop Tee").await;

    let resp = create_drop(&client, &product["id"], 10, Duration::hours(-1)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["errors"][0]["field"], "endsAt");
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_active_listing_contains_new_drop_newest_first() {
    let client = client();
    register_user(&client, &unique_username("drops"), "secret123").await;
    let product = create_test_product(&client, "Active Drop Jacket").await;

    let resp = create_drop(&client, &product["id"], 10, Duration::hours(1)).await;
    assert!(resp.status().is_success());
    let drop: Value = resp.json().await.expect("Failed to parse drop");

    let drops: Vec<Value> = client
        .get(format!("{}/api/flash-drops", base_url()))
        .send()
        .await
        .expect("Failed to list drops")
        .json()
        .await
        .expect("Failed to parse drops");

    // Newest first: the drop we just created leads the listing
    assert_eq!(drops.first().expect("at least one drop")["id"], drop["id"]);
    // Joined product is present
    assert_eq!(
        drops.first().expect("at least one drop")["product"]["id"],
        product["id"]
    );
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_claiming_decrements_until_conflict() {
    let client = client();
    register_user(&client, &unique_username("drops"), "secret123").await;
    let product = create_test_product(&client, "One Unit Wonder").await;

    let resp = create_drop(&client, &product["id"], 1, Duration::hours(1)).await;
    assert!(resp.status().is_success());
    let drop: Value = resp.json().await.expect("Failed to parse drop");
    assert_eq!(drop["remainingQuantity"], 1);
    let drop_id = drop["id"].as_str().expect("drop id");

    // First claim takes the last unit
    let resp = client
        .post(format!("{}/api/flash-drops/{drop_id}/claim", base_url()))
        .send()
        .await
        .expect("Failed to claim");
    assert_eq!(resp.status(), StatusCode::OK);
    let claimed: Value = resp.json().await.expect("Failed to parse claim");
    assert_eq!(claimed["remainingQuantity"], 0);

    // Second claim conflicts
    let resp = client
        .post(format!("{}/api/flash-drops/{drop_id}/claim", base_url()))
        .send()
        .await
        .expect("Failed to claim");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_claiming_unknown_drop_is_not_found() {
    let client = client();
    register_user(&client, &unique_username("drops"), "secret123").await;

    let resp = client
        .post(format!(
            "{}/api/flash-drops/{}/claim",
            base_url(),
            uuid::Uuid::new_v4()
        ))
        .send()
        .await
        .expect("Failed to claim");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
