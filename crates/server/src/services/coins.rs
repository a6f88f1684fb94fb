//! DripCoin grant service.
//!
//! Thin layer over the ledger repository that keeps every grant site on the
//! same code path: one atomic ledger-insert-plus-balance-bump per grant.

use sqlx::PgPool;
use tracing::instrument;

use dripden_core::{CoinGrant, UserId};

use crate::db::RepositoryError;
use crate::db::coins::CoinLedgerRepository;
use crate::models::CoinTransaction;

/// Service for awarding and listing DripCoins.
pub struct CoinService<'a> {
    ledger: CoinLedgerRepository<'a>,
}

impl<'a> CoinService<'a> {
    /// Create a new coin service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            ledger: CoinLedgerRepository::new(pool),
        }
    }

    /// Award a grant to a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    #[instrument(skip(self), fields(user_id = %user_id, grant = ?grant))]
    pub async fn grant(
        &self,
        user_id: UserId,
        grant: CoinGrant,
    ) -> Result<CoinTransaction, RepositoryError> {
        let transaction = self.ledger.record(user_id, grant).await?;
        tracing::info!(amount = grant.amount(), "DripCoins granted");
        Ok(transaction)
    }

    /// List a user's ledger, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<CoinTransaction>, RepositoryError> {
        self.ledger.list_for_user(user_id).await
    }
}
