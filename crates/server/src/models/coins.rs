//! DripCoin ledger model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use dripden_core::{TransactionId, UserId};

/// An append-only ledger row.
///
/// The owning user's `drip_coins` is bumped by `amount` in the same
/// database transaction that inserts this row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CoinTransaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub amount: i32,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
