//! Cart repository for database operations.
//!
//! Cart rows are logically keyed by the (user, product, size, color) tuple.
//! Because size and color are nullable, the merge cannot ride on a unique
//! index; instead `add` locks any matching row inside a transaction and
//! either increments it or inserts a fresh one.

use sqlx::PgPool;

use dripden_core::{CartItemId, ProductId, UserId};

use super::RepositoryError;
use super::products::{JoinedProductRow, PRODUCT_JOIN_COLUMNS};
use crate::models::{CartItem, CartLine};

const CART_COLUMNS: &str = "id, user_id, product_id, quantity, size, color, created_at";

/// Fields for adding an item to a cart.
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// A cart row joined with its product.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    #[sqlx(flatten)]
    item: CartItem,
    #[sqlx(flatten)]
    product: JoinedProductRow,
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add an item to the user's cart, merging with an existing row that
    /// matches the same (product, size, color) tuple.
    ///
    /// Returns the resulting row and whether it was newly inserted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        user_id: UserId,
        item: &NewCartItem,
    ) -> Result<CartItem, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Lock any row for the same tuple so concurrent adds merge instead
        // of racing into duplicates.
        let existing = sqlx::query_scalar::<_, CartItemId>(
            "SELECT id FROM cart_items \
             WHERE user_id = $1 AND product_id = $2 \
               AND size IS NOT DISTINCT FROM $3 \
               AND color IS NOT DISTINCT FROM $4 \
             FOR UPDATE",
        )
        .bind(user_id)
        .bind(item.product_id)
        .bind(&item.size)
        .bind(&item.color)
        .fetch_optional(&mut *tx)
        .await?;

        let row = if let Some(id) = existing {
            let sql = format!(
                "UPDATE cart_items SET quantity = quantity + $2 \
                 WHERE id = $1 RETURNING {CART_COLUMNS}"
            );
            sqlx::query_as::<_, CartItem>(&sql)
                .bind(id)
                .bind(item.quantity)
                .fetch_one(&mut *tx)
                .await?
        } else {
            let sql = format!(
                "INSERT INTO cart_items (user_id, product_id, quantity, size, color) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING {CART_COLUMNS}"
            );
            sqlx::query_as::<_, CartItem>(&sql)
                .bind(user_id)
                .bind(item.product_id)
                .bind(item.quantity)
                .bind(&item.size)
                .bind(&item.color)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    if let sqlx::Error::Database(ref db_err) = e
                        && db_err.is_foreign_key_violation()
                    {
                        return RepositoryError::Conflict("product does not exist".to_owned());
                    }
                    RepositoryError::Database(e)
                })?
        };

        tx.commit().await?;

        Ok(row)
    }

    /// Get the user's cart with each row's product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let sql = format!(
            "SELECT ci.id, ci.user_id, ci.product_id, ci.quantity, ci.size, ci.color, \
             ci.created_at, {PRODUCT_JOIN_COLUMNS} \
             FROM cart_items ci \
             JOIN products p ON p.id = ci.product_id \
             WHERE ci.user_id = $1 \
             ORDER BY ci.created_at DESC"
        );
        let rows = sqlx::query_as::<_, CartLineRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| CartLine {
                item: r.item,
                product: r.product.into(),
            })
            .collect())
    }

    /// Set the quantity of one of the user's cart rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist or
    /// belongs to another user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_quantity(
        &self,
        user_id: UserId,
        id: CartItemId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let sql = format!(
            "UPDATE cart_items SET quantity = $3 \
             WHERE id = $1 AND user_id = $2 RETURNING {CART_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CartItem>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(quantity)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row)
    }

    /// Remove one of the user's cart rows.
    ///
    /// Idempotent: removing a missing row is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(&self, user_id: UserId, id: CartItemId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Remove every row in the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
