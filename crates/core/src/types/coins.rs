//! DripCoin grant catalog.
//!
//! Every engagement action that awards coins maps to one variant here, so
//! the amount and the ledger reason string are defined in exactly one place.

use serde::{Deserialize, Serialize};

/// A fixed-amount DripCoin grant awarded for an engagement action.
///
/// The ledger stores the `amount()` and `reason()` of the grant; the user's
/// cached balance is bumped by the same amount in the same transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinGrant {
    /// One-time bonus on registration.
    Welcome,
    /// Added an item to the cart.
    CartAdd,
    /// Saved an item to the wishlist.
    WishlistAdd,
    /// Followed a shop.
    FollowShop,
    /// Created an outfit board.
    CreateBoard,
}

impl CoinGrant {
    /// The number of DripCoins this grant awards.
    #[must_use]
    pub const fn amount(self) -> i32 {
        match self {
            Self::Welcome => 1250,
            Self::CartAdd => 5,
            Self::WishlistAdd => 3,
            Self::FollowShop => 10,
            Self::CreateBoard => 15,
        }
    }

    /// The human-readable reason recorded on the ledger row.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome bonus",
            Self::CartAdd => "Added item to cart",
            Self::WishlistAdd => "Saved item to wishlist",
            Self::FollowShop => "Followed a shop",
            Self::CreateBoard => "Created outfit board",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_bonus_amount() {
        assert_eq!(CoinGrant::Welcome.amount(), 1250);
        assert_eq!(CoinGrant::Welcome.reason(), "Welcome bonus");
    }

    #[test]
    fn test_engagement_amounts() {
        assert_eq!(CoinGrant::CartAdd.amount(), 5);
        assert_eq!(CoinGrant::WishlistAdd.amount(), 3);
        assert_eq!(CoinGrant::FollowShop.amount(), 10);
        assert_eq!(CoinGrant::CreateBoard.amount(), 15);
    }

    #[test]
    fn test_all_amounts_positive() {
        for grant in [
            CoinGrant::Welcome,
            CoinGrant::CartAdd,
            CoinGrant::WishlistAdd,
            CoinGrant::FollowShop,
            CoinGrant::CreateBoard,
        ] {
            assert!(grant.amount() > 0);
            assert!(!grant.reason().is_empty());
        }
    }
}
