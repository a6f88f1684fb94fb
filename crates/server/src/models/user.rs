//! User model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use dripden_core::UserId;

/// A registered marketplace user.
///
/// The password hash is deliberately not part of this struct; queries that
/// need it return it alongside the user (see `db::users`).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login handle, unique and lowercase.
    pub username: String,
    /// Cached DripCoin balance (sum of the user's ledger rows).
    pub drip_coins: i32,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: UserId::generate(),
            username: "alice".to_owned(),
            drip_coins: 1250,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).expect("serialize");
        assert_eq!(json["username"], "alice");
        assert_eq!(json["dripCoins"], 1250);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("passwordHash").is_none());
    }
}
