//! Error types for the authentication service.

use thiserror::Error;

use dripden_core::UsernameError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The username/password pair did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No user with that identity exists.
    #[error("user not found")]
    UserNotFound,

    /// The username is already taken.
    #[error("username already exists")]
    UserAlreadyExists,

    /// The username failed validation.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// The password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
