//! Wishlist repository for database operations.

use sqlx::PgPool;

use dripden_core::{ProductId, UserId};

use super::RepositoryError;
use super::products::{JoinedProductRow, PRODUCT_JOIN_COLUMNS};
use crate::models::{WishlistItem, WishlistLine};

const WISHLIST_COLUMNS: &str = "id, user_id, product_id, created_at";

/// A wishlist row joined with its product.
#[derive(Debug, sqlx::FromRow)]
struct WishlistLineRow {
    #[sqlx(flatten)]
    item: WishlistItem,
    #[sqlx(flatten)]
    product: JoinedProductRow,
}

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a product to the user's wishlist.
    ///
    /// The (user, product) pair is unique; re-adding an existing product is
    /// a no-op that returns the existing row. The boolean reports whether a
    /// row was actually inserted, so callers can make coin grants
    /// retry-safe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(WishlistItem, bool), RepositoryError> {
        let sql = format!(
            "INSERT INTO wishlist_items (user_id, product_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, product_id) DO NOTHING \
             RETURNING {WISHLIST_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, WishlistItem>(&sql)
            .bind(user_id)
            .bind(product_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("product does not exist".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        if let Some(item) = inserted {
            return Ok((item, true));
        }

        let sql = format!(
            "SELECT {WISHLIST_COLUMNS} FROM wishlist_items \
             WHERE user_id = $1 AND product_id = $2"
        );
        let existing = sqlx::query_as::<_, WishlistItem>(&sql)
            .bind(user_id)
            .bind(product_id)
            .fetch_one(self.pool)
            .await?;

        Ok((existing, false))
    }

    /// Get the user's wishlist with each row's product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<WishlistLine>, RepositoryError> {
        let sql = format!(
            "SELECT wi.id, wi.user_id, wi.product_id, wi.created_at, {PRODUCT_JOIN_COLUMNS} \
             FROM wishlist_items wi \
             JOIN products p ON p.id = wi.product_id \
             WHERE wi.user_id = $1 \
             ORDER BY wi.created_at DESC"
        );
        let rows = sqlx::query_as::<_, WishlistLineRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| WishlistLine {
                item: r.item,
                product: r.product.into(),
            })
            .collect())
    }

    /// Remove a product from the user's wishlist.
    ///
    /// Idempotent: removing a product that isn't wishlisted is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
