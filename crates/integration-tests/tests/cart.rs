//! Integration tests for cart semantics, especially tuple merging.
//!
//! Run with: cargo test -p dripden-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use dripden_integration_tests::{
    base_url, client, create_test_product, register_user, unique_username,
};

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_adding_same_tuple_twice_merges_quantities() {
    let client = client();
    register_user(&client, &unique_username("cart"), "secret123").await;

    let product = create_test_product(&client, "Merge Test Hoodie").await;
    let product_id = product["id"].as_str().expect("product id");

    // Add quantity 1, then quantity 2 of the same (product, size, color)
    for quantity in [1, 2] {
        let resp = client
            .post(format!("{}/api/cart", base_url()))
            .json(&json!({
                "productId": product_id,
                "quantity": quantity,
                "size": "M",
                "color": "Black"
            }))
            .send()
            .await
            .expect("Failed to add to cart");
        assert!(resp.status().is_success());
    }

    let cart: Vec<Value> = client
        .get(format!("{}/api/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");

    let matching: Vec<&Value> = cart
        .iter()
        .filter(|line| line["productId"] == product["id"])
        .collect();

    // One row, not two, with the quantities summed
    assert_eq!(matching.len(), 1);
    assert_eq!(matching.first().expect("one line")["quantity"], 3);
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_different_sizes_get_separate_rows() {
    let client = client();
    register_user(&client, &unique_username("cart"), "secret123").await;

    let product = create_test_product(&client, "Size Split Tee").await;
    let product_id = product["id"].as_str().expect("product id");

    for size in ["S", "L"] {
        let resp = client
            .post(format!("{}/api/cart", base_url()))
            .json(&json!({ "productId": product_id, "quantity": 1, "size": size }))
            .send()
            .await
            .expect("Failed to add to cart");
        assert!(resp.status().is_success());
    }

    let cart: Vec<Value> = client
        .get(format!("{}/api/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");

    let matching = cart
        .iter()
        .filter(|line| line["productId"] == product["id"])
        .count();
    assert_eq!(matching, 2);
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_cart_add_awards_five_coins() {
    let client = client();
    register_user(&client, &unique_username("cart"), "secret123").await;

    let product = create_test_product(&client, "Coin Grant Jacket").await;

    let resp = client
        .post(format!("{}/api/cart", base_url()))
        .json(&json!({ "productId": product["id"], "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert!(resp.status().is_success());

    let me: Value = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to get current user")
        .json()
        .await
        .expect("Failed to parse user");

    // Welcome bonus + cart-add grant
    assert_eq!(me["user"]["dripCoins"], 1250 + 5);
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_zero_quantity_is_rejected() {
    let client = client();
    register_user(&client, &unique_username("cart"), "secret123").await;

    let product = create_test_product(&client, "Zero Quantity Cap").await;

    let resp = client
        .post(format!("{}/api/cart", base_url()))
        .json(&json!({ "productId": product["id"], "quantity": 0 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["errors"][0]["field"], "quantity");
}

#[tokio::test]
#[ignore = "Requires running server and migrated, seeded database"]
async fn test_clear_cart_empties_it() {
    let client = client();
    register_user(&client, &unique_username("cart"), "secret123").await;

    let product = create_test_product(&client, "Clearable Beanie").await;
    let resp = client
        .post(format!("{}/api/cart", base_url()))
        .json(&json!({ "productId": product["id"], "quantity": 2 }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert!(resp.status().is_success());

    let resp = client
        .delete(format!("{}/api/cart", base_url()))
        .send()
        .await
        .expect("Failed to clear cart");
    assert!(resp.status().is_success());

    let cart: Vec<Value> = client
        .get(format!("{}/api/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");
    assert!(cart.is_empty());
}
