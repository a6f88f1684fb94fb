//! Core types for DRIPDEN.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod coins;
pub mod id;
pub mod username;

pub use coins::CoinGrant;
pub use id::*;
pub use username::{Username, UsernameError};
