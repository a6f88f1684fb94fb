//! Flash-drop repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dripden_core::{FlashDropId, ProductId};

use super::RepositoryError;
use super::products::{JoinedProductRow, PRODUCT_JOIN_COLUMNS};
use crate::models::{FlashDrop, FlashDropLine};

const FLASH_DROP_COLUMNS: &str =
    "id, product_id, limited_quantity, remaining_quantity, ends_at, created_at";

/// Fields for creating a flash drop.
///
/// `remaining_quantity` starts equal to `limited_quantity`.
#[derive(Debug, Clone)]
pub struct NewFlashDrop {
    pub product_id: ProductId,
    pub limited_quantity: i32,
    pub ends_at: DateTime<Utc>,
}

/// A flash drop joined with its product.
#[derive(Debug, sqlx::FromRow)]
struct FlashDropLineRow {
    #[sqlx(flatten)]
    drop: FlashDrop,
    #[sqlx(flatten)]
    product: JoinedProductRow,
}

/// Repository for flash-drop database operations.
pub struct FlashDropRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FlashDropRepository<'a> {
    /// Create a new flash-drop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a flash drop with its full quantity remaining.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, drop: &NewFlashDrop) -> Result<FlashDrop, RepositoryError> {
        let sql = format!(
            "INSERT INTO flash_drops (product_id, limited_quantity, remaining_quantity, ends_at) \
             VALUES ($1, $2, $2, $3) RETURNING {FLASH_DROP_COLUMNS}"
        );
        let created = sqlx::query_as::<_, FlashDrop>(&sql)
            .bind(drop.product_id)
            .bind(drop.limited_quantity)
            .bind(drop.ends_at)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("product does not exist".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        Ok(created)
    }

    /// Get a flash drop by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: FlashDropId) -> Result<Option<FlashDrop>, RepositoryError> {
        let sql = format!("SELECT {FLASH_DROP_COLUMNS} FROM flash_drops WHERE id = $1");
        let drop = sqlx::query_as::<_, FlashDrop>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(drop)
    }

    /// List drops whose end time is still in the future, newest first,
    /// each with its product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<FlashDropLine>, RepositoryError> {
        let sql = format!(
            "SELECT fd.id, fd.product_id, fd.limited_quantity, fd.remaining_quantity, \
             fd.ends_at, fd.created_at, {PRODUCT_JOIN_COLUMNS} \
             FROM flash_drops fd \
             JOIN products p ON p.id = fd.product_id \
             WHERE fd.ends_at > now() \
             ORDER BY fd.created_at DESC"
        );
        let rows = sqlx::query_as::<_, FlashDropLineRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| FlashDropLine {
                drop: r.drop,
                product: r.product.into(),
            })
            .collect())
    }

    /// Claim one unit of a drop.
    ///
    /// The decrement is a single guarded UPDATE, so two claims can never
    /// take the same last unit. Returns `None` when the drop is sold out,
    /// already ended, or missing; callers disambiguate via [`Self::get`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn claim(&self, id: FlashDropId) -> Result<Option<FlashDrop>, RepositoryError> {
        let sql = format!(
            "UPDATE flash_drops SET remaining_quantity = remaining_quantity - 1 \
             WHERE id = $1 AND remaining_quantity > 0 AND ends_at > now() \
             RETURNING {FLASH_DROP_COLUMNS}"
        );
        let claimed = sqlx::query_as::<_, FlashDrop>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(claimed)
    }
}
