//! Product repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use dripden_core::{ProductId, ShopId};

use super::RepositoryError;
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, shop_id, name, description, price, image, images, \
     sizes, colors, stock, category, created_at";

/// Column list for selecting a joined product aliased with a `p_` prefix,
/// so link-row columns and product columns can share one result row.
pub(crate) const PRODUCT_JOIN_COLUMNS: &str = "p.id AS p_id, p.shop_id AS p_shop_id, \
     p.name AS p_name, p.description AS p_description, p.price AS p_price, \
     p.image AS p_image, p.images AS p_images, p.sizes AS p_sizes, \
     p.colors AS p_colors, p.stock AS p_stock, p.category AS p_category, \
     p.created_at AS p_created_at";

/// A product decoded from `p_`-prefixed join columns.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct JoinedProductRow {
    p_id: ProductId,
    p_shop_id: ShopId,
    p_name: String,
    p_description: Option<String>,
    p_price: Decimal,
    p_image: Option<String>,
    p_images: Option<Vec<String>>,
    p_sizes: Option<Vec<String>>,
    p_colors: Option<Vec<String>>,
    p_stock: i32,
    p_category: Option<String>,
    p_created_at: DateTime<Utc>,
}

impl From<JoinedProductRow> for Product {
    fn from(row: JoinedProductRow) -> Self {
        Self {
            id: row.p_id,
            shop_id: row.p_shop_id,
            name: row.p_name,
            description: row.p_description,
            price: row.p_price,
            image: row.p_image,
            images: row.p_images,
            sizes: row.p_sizes,
            colors: row.p_colors,
            stock: row.p_stock,
            category: row.p_category,
            created_at: row.p_created_at,
        }
    }
}

/// Fields for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub shop_id: ShopId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub stock: i32,
    pub category: Option<String>,
}

/// Optional filters for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Limit to one shop.
    pub shop_id: Option<ShopId>,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the referenced shop doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO products \
             (shop_id, name, description, price, image, images, sizes, colors, stock, category) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {PRODUCT_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Product>(&sql)
            .bind(product.shop_id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.image)
            .bind(&product.images)
            .bind(&product.sizes)
            .bind(&product.colors)
            .bind(product.stock)
            .bind(&product.category)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("shop does not exist".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        Ok(created)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(product)
    }

    /// List products, optionally scoped to a shop and filtered by name
    /// search and category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE ($1::uuid IS NULL OR shop_id = $1) \
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%') \
               AND ($3::text IS NULL OR category = $3) \
             ORDER BY created_at DESC"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(filter.shop_id)
            .bind(&filter.search)
            .bind(&filter.category)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "UPDATE products SET shop_id = $2, name = $3, description = $4, price = $5, \
             image = $6, images = $7, sizes = $8, colors = $9, stock = $10, category = $11 \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(product.shop_id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.image)
            .bind(&product.images)
            .bind(&product.sizes)
            .bind(&product.colors)
            .bind(product.stock)
            .bind(&product.category)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(updated)
    }

    /// Delete a product.
    ///
    /// Idempotent: deleting a missing product is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
