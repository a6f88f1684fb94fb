//! Catalog models: shops and their products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use dripden_core::{ProductId, ShopId};

/// A seller storefront.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub description: Option<String>,
    /// Banner image URL.
    pub banner: Option<String>,
    /// Logo image URL.
    pub logo: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_trending: bool,
    pub created_at: DateTime<Utc>,
}

/// A product listed by a shop.
///
/// Cascade-deleted with its shop.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub shop_id: ShopId,
    pub name: String,
    pub description: Option<String>,
    /// Unit price; serialized as a decimal string.
    pub price: Decimal,
    /// Primary image URL.
    pub image: Option<String>,
    /// Additional image URLs.
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub stock: i32,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::generate(),
            shop_id: ShopId::generate(),
            name: "Oversized Hoodie".to_owned(),
            description: None,
            price: Decimal::new(4999, 2),
            image: None,
            images: None,
            sizes: Some(vec!["S".to_owned(), "M".to_owned(), "L".to_owned()]),
            colors: Some(vec!["black".to_owned()]),
            stock: 12,
            category: Some("hoodies".to_owned()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_price_serializes_as_string() {
        let json = serde_json::to_value(sample_product()).expect("serialize");
        assert_eq!(json["price"], "49.99");
        assert_eq!(json["shopId"].as_str().map(str::len), Some(36));
    }

    #[test]
    fn test_shop_serializes_camel_case() {
        let shop = Shop {
            id: ShopId::generate(),
            name: "Thrift Theory".to_owned(),
            description: Some("curated vintage".to_owned()),
            banner: None,
            logo: None,
            location: Some("Portland, OR".to_owned()),
            tags: Some(vec!["vintage".to_owned(), "denim".to_owned()]),
            is_trending: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&shop).expect("serialize");
        assert_eq!(json["isTrending"], true);
        assert_eq!(json["tags"][1], "denim");
    }
}
