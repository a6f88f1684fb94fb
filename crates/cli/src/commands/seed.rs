//! Demo catalog seeder.
//!
//! Populates shops, products, and a pair of live flash drops so a fresh
//! database has something to browse. Running the seeder twice first clears
//! the previous demo shops (cascading to their products and drops).

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;

use dripden_server::db::flash_drops::NewFlashDrop;
use dripden_server::db::products::NewProduct;
use dripden_server::db::shops::{NewShop, ShopFilter};
use dripden_server::db::{
    self, FlashDropRepository, ProductRepository, RepositoryError, ShopRepository,
};
use dripden_server::models::{Product, Shop};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Seed the database with demo catalog data.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or any insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;
    let pool = db::create_pool(&SecretString::from(database_url)).await?;

    let shops = ShopRepository::new(&pool);
    let products = ProductRepository::new(&pool);
    let drops = FlashDropRepository::new(&pool);

    tracing::info!("Clearing previous demo shops...");
    for shop in shops.list(&ShopFilter::default()).await? {
        if demo_shops().iter().any(|s| s.name == shop.name) {
            shops.delete(shop.id).await?;
        }
    }

    tracing::info!("Creating shops...");
    let mut created_shops: Vec<Shop> = Vec::new();
    for shop in demo_shops() {
        created_shops.push(shops.create(&shop).await?);
    }

    tracing::info!("Creating products...");
    let mut created_products: Vec<Product> = Vec::new();
    for (shop_name, product) in demo_products() {
        let shop = created_shops
            .iter()
            .find(|s| s.name == shop_name)
            .ok_or(RepositoryError::NotFound)?;
        created_products.push(
            products
                .create(&NewProduct {
                    shop_id: shop.id,
                    ..product
                })
                .await?,
        );
    }

    tracing::info!("Creating flash drops...");
    for (product_name, quantity, hours) in [
        ("Hypebeast Bomber Jacket", 15, 24),
        ("Cyber Runner X1", 20, 48),
    ] {
        let product = created_products
            .iter()
            .find(|p| p.name == product_name)
            .ok_or(RepositoryError::NotFound)?;
        drops
            .create(&NewFlashDrop {
                product_id: product.id,
                limited_quantity: quantity,
                ends_at: Utc::now() + Duration::hours(hours),
            })
            .await?;
    }

    tracing::info!("Seed completed!");
    Ok(())
}

fn text_list(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(ToString::to_string).collect())
}

/// The demo shop catalog.
fn demo_shops() -> Vec<NewShop> {
    vec![
        NewShop {
            name: "Urban Threads".to_owned(),
            description: Some(
                "Cutting-edge streetwear with bold designs and exclusive drops".to_owned(),
            ),
            banner: Some(
                "https://images.unsplash.com/photo-1441984904996-e0b6ba687e04?w=1200".to_owned(),
            ),
            logo: Some("https://api.dicebear.com/7.x/shapes/svg?seed=urban".to_owned()),
            location: Some("Downtown".to_owned()),
            tags: text_list(&["Streetwear", "Trending", "Local Favorite"]),
            is_trending: true,
        },
        NewShop {
            name: "Retro Vibes".to_owned(),
            description: Some("Vintage fashion from the 80s and 90s era".to_owned()),
            banner: Some(
                "https://images.unsplash.com/photo-1445205170230-053b83016050?w=1200".to_owned(),
            ),
            logo: Some("https://api.dicebear.com/7.x/shapes/svg?seed=retro".to_owned()),
            location: Some("East Side".to_owned()),
            tags: text_list(&["Vintage", "Unique", "90s"]),
            is_trending: false,
        },
        NewShop {
            name: "Minimal Studio".to_owned(),
            description: Some("Clean, modern aesthetic for the minimalist wardrobe".to_owned()),
            banner: Some(
                "https://images.unsplash.com/photo-1490481651871-ab68de25d43d?w=1200".to_owned(),
            ),
            logo: Some("https://api.dicebear.com/7.x/shapes/svg?seed=minimal".to_owned()),
            location: Some("West District".to_owned()),
            tags: text_list(&["Minimal", "Clean", "Modern"]),
            is_trending: false,
        },
        NewShop {
            name: "Neon District".to_owned(),
            description: Some(
                "Hypebeast central with limited edition drops and exclusive collabs".to_owned(),
            ),
            banner: Some(
                "https://images.unsplash.com/photo-1523381210434-271e8be1f52b?w=1200".to_owned(),
            ),
            logo: Some("https://api.dicebear.com/7.x/shapes/svg?seed=neon".to_owned()),
            location: Some("Central".to_owned()),
            tags: text_list(&["Streetwear", "Hypebeast", "Limited"]),
            is_trending: true,
        },
        NewShop {
            name: "Pastel Dreams".to_owned(),
            description: Some(
                "Soft girl aesthetic with kawaii vibes and dreamy pastels".to_owned(),
            ),
            banner: Some(
                "https://images.unsplash.com/photo-1483985988355-763728e1935b?w=1200".to_owned(),
            ),
            logo: Some("https://api.dicebear.com/7.x/shapes/svg?seed=pastel".to_owned()),
            location: Some("North End".to_owned()),
            tags: text_list(&["Girly", "Soft Girl", "Kawaii"]),
            is_trending: false,
        },
        NewShop {
            name: "Sneaker Haven".to_owned(),
            description: Some("Authentic sneakers and limited drops from top brands".to_owned()),
            banner: Some(
                "https://images.unsplash.com/photo-1460353581641-37baddab0fa2?w=1200".to_owned(),
            ),
            logo: Some("https://api.dicebear.com/7.x/shapes/svg?seed=sneaker".to_owned()),
            location: Some("South Plaza".to_owned()),
            tags: text_list(&["Sneakers", "Limited Drops", "Authentic"]),
            is_trending: true,
        },
    ]
}

/// The demo product catalog, keyed by shop name.
///
/// The `shop_id` placeholder is overwritten with the created shop's ID.
fn demo_products() -> Vec<(&'static str, NewProduct)> {
    let placeholder = dripden_core::ShopId::generate();
    let product = |name: &str,
                   description: &str,
                   price_cents: i64,
                   image: &str,
                   sizes: &[&str],
                   colors: &[&str],
                   stock: i32,
                   category: &str| NewProduct {
        shop_id: placeholder,
        name: name.to_owned(),
        description: Some(description.to_owned()),
        price: Decimal::new(price_cents, 2),
        image: Some(image.to_owned()),
        images: text_list(&[image]),
        sizes: text_list(sizes),
        colors: text_list(colors),
        stock,
        category: Some(category.to_owned()),
    };

    vec![
        (
            "Urban Threads",
            product(
                "Neon Wave Hoodie",
                "Premium hoodie with neon gradient design, perfect for standing out",
                8999,
                "https://images.unsplash.com/photo-1556821840-3a63f95609a7?w=800",
                &["S", "M", "L", "XL", "XXL"],
                &["Black", "Purple", "Blue"],
                50,
                "Streetwear",
            ),
        ),
        (
            "Urban Threads",
            product(
                "Electric Cargo Pants",
                "Futuristic cargo pants with reflective details and multiple pockets",
                12999,
                "https://images.unsplash.com/photo-1624378439575-d8705ad7ae80?w=800",
                &["28", "30", "32", "34", "36"],
                &["Black", "Olive", "Grey"],
                35,
                "Streetwear",
            ),
        ),
        (
            "Sneaker Haven",
            product(
                "Cyber Runner X1",
                "Limited edition sneakers with holographic accents and neon soles",
                19999,
                "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=800",
                &["7", "8", "9", "10", "11", "12"],
                &["Black/Neon", "White/Purple", "Grey/Blue"],
                20,
                "Sneakers",
            ),
        ),
        (
            "Sneaker Haven",
            product(
                "Street Kings High-Tops",
                "Premium high-top sneakers with leather details and vintage styling",
                14999,
                "https://images.unsplash.com/photo-1549298916-b41d501d3772?w=800",
                &["7", "8", "9", "10", "11", "12"],
                &["Black", "White", "Red"],
                40,
                "Sneakers",
            ),
        ),
        (
            "Neon District",
            product(
                "Hypebeast Bomber Jacket",
                "Exclusive bomber jacket with embroidered patches and satin finish",
                24999,
                "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=800",
                &["S", "M", "L", "XL"],
                &["Black", "Burgundy", "Navy"],
                15,
                "Streetwear",
            ),
        ),
        (
            "Neon District",
            product(
                "Limited Drop Graphic Tee",
                "Ultra-limited graphic tee with artist collaboration design",
                5999,
                "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=800",
                &["S", "M", "L", "XL"],
                &["Black", "White"],
                25,
                "Streetwear",
            ),
        ),
        (
            "Retro Vibes",
            product(
                "90s Vintage Denim Jacket",
                "Authentic vintage denim jacket from the 90s with distressed details",
                7999,
                "https://images.unsplash.com/photo-1495105787522-5334e3ffa0ef?w=800",
                &["S", "M", "L"],
                &["Blue Wash", "Black Wash"],
                8,
                "Vintage",
            ),
        ),
        (
            "Minimal Studio",
            product(
                "Essential Minimalist Tee",
                "Premium cotton tee with clean lines and perfect fit",
                3999,
                "https://images.unsplash.com/photo-1586790170083-2f9ceadc732d?w=800",
                &["XS", "S", "M", "L", "XL"],
                &["White", "Black", "Grey", "Beige"],
                100,
                "Minimal",
            ),
        ),
        (
            "Pastel Dreams",
            product(
                "Kawaii Cloud Hoodie",
                "Soft pastel hoodie with cute cloud embroidery and cozy fleece",
                6999,
                "https://images.unsplash.com/photo-1620799140408-edc6dcb6d633?w=800",
                &["XS", "S", "M", "L"],
                &["Pastel Pink", "Baby Blue", "Lavender"],
                45,
                "Girly",
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_demo_product_references_a_demo_shop() {
        let shop_names: Vec<String> = demo_shops().into_iter().map(|s| s.name).collect();
        for (shop_name, _) in demo_products() {
            assert!(
                shop_names.iter().any(|n| n == shop_name),
                "product references unknown shop {shop_name}"
            );
        }
    }

    #[test]
    fn test_demo_flash_drop_products_exist() {
        let product_names: Vec<String> =
            demo_products().into_iter().map(|(_, p)| p.name).collect();
        for name in ["Hypebeast Bomber Jacket", "Cyber Runner X1"] {
            assert!(product_names.iter().any(|n| n == name));
        }
    }

    #[test]
    fn test_demo_prices_are_positive() {
        for (_, product) in demo_products() {
            assert!(product.price > Decimal::ZERO);
        }
    }
}
