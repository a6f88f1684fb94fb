//! Cart models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use dripden_core::{CartItemId, ProductId, UserId};

use super::Product;

/// A cart row.
///
/// Logical identity is the (user, product, size, color) tuple; adding the
/// same tuple again increments `quantity` instead of creating a row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A cart row joined with its product, as returned by `GET /api/cart`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use dripden_core::ShopId;

    use super::*;

    #[test]
    fn test_cart_line_flattens_item_fields() {
        let product_id = ProductId::generate();
        let line = CartLine {
            item: CartItem {
                id: CartItemId::generate(),
                user_id: UserId::generate(),
                product_id,
                quantity: 2,
                size: Some("M".to_owned()),
                color: None,
                created_at: Utc::now(),
            },
            product: Product {
                id: product_id,
                shop_id: ShopId::generate(),
                name: "Cargo Pants".to_owned(),
                description: None,
                price: Decimal::new(6500, 2),
                image: None,
                images: None,
                sizes: None,
                colors: None,
                stock: 3,
                category: None,
                created_at: Utc::now(),
            },
        };

        let json = serde_json::to_value(&line).expect("serialize");
        // Item fields sit at the top level next to the joined product.
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["size"], "M");
        assert_eq!(json["product"]["name"], "Cargo Pants");
        assert_eq!(json["productId"], json["product"]["id"]);
    }
}
