//! DripCoin ledger repository.
//!
//! The ledger is append-only. Every insert also bumps the owning user's
//! cached `drip_coins` inside the same SQL transaction, so the invariant
//! "balance equals the sum of the user's ledger amounts" holds even when
//! either statement fails.

use sqlx::PgPool;

use dripden_core::{CoinGrant, UserId};

use super::RepositoryError;
use crate::models::CoinTransaction;

const TRANSACTION_COLUMNS: &str = "id, user_id, amount, reason, created_at";

/// Repository for DripCoin ledger operations.
pub struct CoinLedgerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CoinLedgerRepository<'a> {
    /// Create a new ledger repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a grant: insert the ledger row and bump the user's cached
    /// balance atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn record(
        &self,
        user_id: UserId,
        grant: CoinGrant,
    ) -> Result<CoinTransaction, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO coin_transactions (user_id, amount, reason) \
             VALUES ($1, $2, $3) RETURNING {TRANSACTION_COLUMNS}"
        );
        let transaction = sqlx::query_as::<_, CoinTransaction>(&sql)
            .bind(user_id)
            .bind(grant.amount())
            .bind(grant.reason())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::NotFound;
                }
                RepositoryError::Database(e)
            })?;

        let updated = sqlx::query("UPDATE users SET drip_coins = drip_coins + $2 WHERE id = $1")
            .bind(user_id)
            .bind(grant.amount())
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(transaction)
    }

    /// List a user's ledger rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CoinTransaction>, RepositoryError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM coin_transactions \
             WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let transactions = sqlx::query_as::<_, CoinTransaction>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(transactions)
    }
}
