//! Engagement models: wishlists, followed shops, flash drops, outfit boards.

use chrono::{DateTime, Utc};
use serde::Serialize;

use dripden_core::{BoardId, BoardItemId, FlashDropId, ProductId, SavedShopId, ShopId, UserId, WishlistItemId};

use super::{Product, Shop};

/// A wishlist membership row. At most one per (user, product).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: WishlistItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

/// A wishlist row joined with its product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistLine {
    #[serde(flatten)]
    pub item: WishlistItem,
    pub product: Product,
}

/// A followed-shop row. At most one per (user, shop).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedShop {
    pub id: SavedShopId,
    pub user_id: UserId,
    pub shop_id: ShopId,
    pub created_at: DateTime<Utc>,
}

/// A followed-shop row joined with its shop.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedShopLine {
    #[serde(flatten)]
    pub link: SavedShop,
    pub shop: Shop,
}

/// A time-boxed, quantity-limited product promotion.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FlashDrop {
    pub id: FlashDropId,
    pub product_id: ProductId,
    pub limited_quantity: i32,
    pub remaining_quantity: i32,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A flash drop joined with its product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashDropLine {
    #[serde(flatten)]
    pub drop: FlashDrop,
    pub product: Product,
}

/// A user-curated named collection of products.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OutfitBoard {
    pub id: BoardId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A board membership row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OutfitBoardItem {
    pub id: BoardItemId,
    pub board_id: BoardId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

/// A board membership row joined with its product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLine {
    #[serde(flatten)]
    pub item: OutfitBoardItem,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_drop_serializes_camel_case() {
        let drop = FlashDrop {
            id: FlashDropId::generate(),
            product_id: ProductId::generate(),
            limited_quantity: 50,
            remaining_quantity: 7,
            ends_at: Utc::now(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&drop).expect("serialize");
        assert_eq!(json["limitedQuantity"], 50);
        assert_eq!(json["remainingQuantity"], 7);
        assert!(json.get("endsAt").is_some());
    }
}
