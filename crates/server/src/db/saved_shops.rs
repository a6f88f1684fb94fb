//! Saved-shop (follow) repository for database operations.

use sqlx::PgPool;

use dripden_core::{ShopId, UserId};

use super::RepositoryError;
use super::shops::{JoinedShopRow, SHOP_JOIN_COLUMNS};
use crate::models::{SavedShop, SavedShopLine};

const SAVED_SHOP_COLUMNS: &str = "id, user_id, shop_id, created_at";

/// A saved-shop row joined with its shop.
#[derive(Debug, sqlx::FromRow)]
struct SavedShopLineRow {
    #[sqlx(flatten)]
    link: SavedShop,
    #[sqlx(flatten)]
    shop: JoinedShopRow,
}

/// Repository for saved-shop database operations.
pub struct SavedShopRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SavedShopRepository<'a> {
    /// Create a new saved-shop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Follow a shop.
    ///
    /// The (user, shop) pair is unique; re-following is a no-op that
    /// returns the existing row. The boolean reports whether a row was
    /// actually inserted, so callers can make coin grants retry-safe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the shop doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn save(
        &self,
        user_id: UserId,
        shop_id: ShopId,
    ) -> Result<(SavedShop, bool), RepositoryError> {
        let sql = format!(
            "INSERT INTO saved_shops (user_id, shop_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, shop_id) DO NOTHING \
             RETURNING {SAVED_SHOP_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, SavedShop>(&sql)
            .bind(user_id)
            .bind(shop_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("shop does not exist".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        if let Some(link) = inserted {
            return Ok((link, true));
        }

        let sql = format!(
            "SELECT {SAVED_SHOP_COLUMNS} FROM saved_shops WHERE user_id = $1 AND shop_id = $2"
        );
        let existing = sqlx::query_as::<_, SavedShop>(&sql)
            .bind(user_id)
            .bind(shop_id)
            .fetch_one(self.pool)
            .await?;

        Ok((existing, false))
    }

    /// Get the user's followed shops.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<SavedShopLine>, RepositoryError> {
        let sql = format!(
            "SELECT ss.id, ss.user_id, ss.shop_id, ss.created_at, {SHOP_JOIN_COLUMNS} \
             FROM saved_shops ss \
             JOIN shops s ON s.id = ss.shop_id \
             WHERE ss.user_id = $1 \
             ORDER BY ss.created_at DESC"
        );
        let rows = sqlx::query_as::<_, SavedShopLineRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| SavedShopLine {
                link: r.link,
                shop: r.shop.into(),
            })
            .collect())
    }

    /// Unfollow a shop.
    ///
    /// Idempotent: unfollowing a shop that isn't followed is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn unsave(&self, user_id: UserId, shop_id: ShopId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM saved_shops WHERE user_id = $1 AND shop_id = $2")
            .bind(user_id)
            .bind(shop_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
