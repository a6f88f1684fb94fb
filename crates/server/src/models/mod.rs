//! Domain models for the marketplace.
//!
//! Every struct here maps one-to-one onto a table row (or a joined
//! link+target pair) and serializes to the camelCase JSON shape the
//! storefront client consumes.

pub mod cart;
pub mod catalog;
pub mod coins;
pub mod engagement;
pub mod session;
pub mod user;

pub use cart::{CartItem, CartLine};
pub use catalog::{Product, Shop};
pub use coins::CoinTransaction;
pub use engagement::{
    BoardLine, FlashDrop, FlashDropLine, OutfitBoard, OutfitBoardItem, SavedShop, SavedShopLine,
    WishlistItem, WishlistLine,
};
pub use session::{CurrentUser, session_keys};
pub use user::User;
