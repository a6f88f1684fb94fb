//! Outfit-board repository for database operations.

use sqlx::PgPool;

use dripden_core::{BoardId, ProductId, UserId};

use super::RepositoryError;
use super::products::{JoinedProductRow, PRODUCT_JOIN_COLUMNS};
use crate::models::{BoardLine, OutfitBoard, OutfitBoardItem};

const BOARD_COLUMNS: &str = "id, user_id, name, description, created_at";
const BOARD_ITEM_COLUMNS: &str = "id, board_id, product_id, created_at";

/// A board membership row joined with its product.
#[derive(Debug, sqlx::FromRow)]
struct BoardLineRow {
    #[sqlx(flatten)]
    item: OutfitBoardItem,
    #[sqlx(flatten)]
    product: JoinedProductRow,
}

/// Repository for outfit-board database operations.
pub struct BoardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new board repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a board for the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &str,
        description: Option<&str>,
    ) -> Result<OutfitBoard, RepositoryError> {
        let sql = format!(
            "INSERT INTO outfit_boards (user_id, name, description) \
             VALUES ($1, $2, $3) RETURNING {BOARD_COLUMNS}"
        );
        let board = sqlx::query_as::<_, OutfitBoard>(&sql)
            .bind(user_id)
            .bind(name)
            .bind(description)
            .fetch_one(self.pool)
            .await?;

        Ok(board)
    }

    /// Get a board by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BoardId) -> Result<Option<OutfitBoard>, RepositoryError> {
        let sql = format!("SELECT {BOARD_COLUMNS} FROM outfit_boards WHERE id = $1");
        let board = sqlx::query_as::<_, OutfitBoard>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(board)
    }

    /// List the user's boards, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<OutfitBoard>, RepositoryError> {
        let sql = format!(
            "SELECT {BOARD_COLUMNS} FROM outfit_boards \
             WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let boards = sqlx::query_as::<_, OutfitBoard>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(boards)
    }

    /// Delete one of the user's boards (cascades to its items).
    ///
    /// Idempotent: deleting a missing board is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, user_id: UserId, id: BoardId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM outfit_boards WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Get a board's items with each row's product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, board_id: BoardId) -> Result<Vec<BoardLine>, RepositoryError> {
        let sql = format!(
            "SELECT bi.id, bi.board_id, bi.product_id, bi.created_at, {PRODUCT_JOIN_COLUMNS} \
             FROM outfit_board_items bi \
             JOIN products p ON p.id = bi.product_id \
             WHERE bi.board_id = $1 \
             ORDER BY bi.created_at ASC"
        );
        let rows = sqlx::query_as::<_, BoardLineRow>(&sql)
            .bind(board_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| BoardLine {
                item: r.item,
                product: r.product.into(),
            })
            .collect())
    }

    /// Add a product to a board.
    ///
    /// The (board, product) pair is unique; re-adding returns the existing
    /// row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        board_id: BoardId,
        product_id: ProductId,
    ) -> Result<OutfitBoardItem, RepositoryError> {
        let sql = format!(
            "INSERT INTO outfit_board_items (board_id, product_id) VALUES ($1, $2) \
             ON CONFLICT (board_id, product_id) DO NOTHING \
             RETURNING {BOARD_ITEM_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, OutfitBoardItem>(&sql)
            .bind(board_id)
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
            return Ok(item);
        }

        let sql = format!(
            "SELECT {BOARD_ITEM_COLUMNS} FROM outfit_board_items \
             WHERE board_id = $1 AND product_id = $2"
        );
        let existing = sqlx::query_as::<_, OutfitBoardItem>(&sql)
            .bind(board_id)
            .bind(product_id)
            .fetch_one(self.pool)
            .await?;

        Ok(existing)
    }

    /// Remove a product from a board.
    ///
    /// Idempotent: removing a product that isn't on the board is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove_item(
        &self,
        board_id: BoardId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM outfit_board_items WHERE board_id = $1 AND product_id = $2")
            .bind(board_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
