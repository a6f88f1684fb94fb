//! Shop repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dripden_core::ShopId;

use super::RepositoryError;
use crate::models::Shop;

const SHOP_COLUMNS: &str =
    "id, name, description, banner, logo, location, tags, is_trending, created_at";

/// Column list for selecting a joined shop aliased with an `s_` prefix,
/// so link-row columns and shop columns can share one result row.
pub(crate) const SHOP_JOIN_COLUMNS: &str = "s.id AS s_id, s.name AS s_name, \
     s.description AS s_description, s.banner AS s_banner, s.logo AS s_logo, \
     s.location AS s_location, s.tags AS s_tags, s.is_trending AS s_is_trending, \
     s.created_at AS s_created_at";

/// A shop decoded from `s_`-prefixed join columns.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct JoinedShopRow {
    s_id: ShopId,
    s_name: String,
    s_description: Option<String>,
    s_banner: Option<String>,
    s_logo: Option<String>,
    s_location: Option<String>,
    s_tags: Option<Vec<String>>,
    s_is_trending: bool,
    s_created_at: DateTime<Utc>,
}

impl From<JoinedShopRow> for Shop {
    fn from(row: JoinedShopRow) -> Self {
        Self {
            id: row.s_id,
            name: row.s_name,
            description: row.s_description,
            banner: row.s_banner,
            logo: row.s_logo,
            location: row.s_location,
            tags: row.s_tags,
            is_trending: row.s_is_trending,
            created_at: row.s_created_at,
        }
    }
}

/// Fields for creating a shop.
#[derive(Debug, Clone)]
pub struct NewShop {
    pub name: String,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub logo: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_trending: bool,
}

/// Optional filters for listing shops.
#[derive(Debug, Clone, Default)]
pub struct ShopFilter {
    /// Case-insensitive substring match on the shop name.
    pub search: Option<String>,
    /// Keep only shops carrying this tag.
    pub tag: Option<String>,
}

/// Repository for shop database operations.
pub struct ShopRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, shop: &NewShop) -> Result<Shop, RepositoryError> {
        let sql = format!(
            "INSERT INTO shops (name, description, banner, logo, location, tags, is_trending) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {SHOP_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Shop>(&sql)
            .bind(&shop.name)
            .bind(&shop.description)
            .bind(&shop.banner)
            .bind(&shop.logo)
            .bind(&shop.location)
            .bind(&shop.tags)
            .bind(shop.is_trending)
            .fetch_one(self.pool)
            .await?;

        Ok(created)
    }

    /// Get a shop by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let sql = format!("SELECT {SHOP_COLUMNS} FROM shops WHERE id = $1");
        let shop = sqlx::query_as::<_, Shop>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(shop)
    }

    /// List shops, optionally filtered by name search and tag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ShopFilter) -> Result<Vec<Shop>, RepositoryError> {
        let sql = format!(
            "SELECT {SHOP_COLUMNS} FROM shops \
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%') \
               AND ($2::text IS NULL OR $2 = ANY(tags)) \
             ORDER BY created_at DESC"
        );
        let shops = sqlx::query_as::<_, Shop>(&sql)
            .bind(&filter.search)
            .bind(&filter.tag)
            .fetch_all(self.pool)
            .await?;

        Ok(shops)
    }

    /// Update a shop's metadata.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shop doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: ShopId, shop: &NewShop) -> Result<Shop, RepositoryError> {
        let sql = format!(
            "UPDATE shops SET name = $2, description = $3, banner = $4, logo = $5, \
             location = $6, tags = $7, is_trending = $8 \
             WHERE id = $1 RETURNING {SHOP_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Shop>(&sql)
            .bind(id)
            .bind(&shop.name)
            .bind(&shop.description)
            .bind(&shop.banner)
            .bind(&shop.logo)
            .bind(&shop.location)
            .bind(&shop.tags)
            .bind(shop.is_trending)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(updated)
    }

    /// Delete a shop (cascades to its products).
    ///
    /// Idempotent: deleting a missing shop is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ShopId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM shops WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
