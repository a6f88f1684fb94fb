//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use dripden_core::CoinGrant;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::{AuthService, CoinService};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response wrapping a user plus a human-readable message.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
}

/// Response wrapping just the current user.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new account.
///
/// Creates the user, awards the welcome bonus through the ledger, and logs
/// the user in.
///
/// # Errors
///
/// Returns 400 for invalid username/password, 409 when the username is
/// taken.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool());
    let coins = CoinService::new(state.pool());

    let user = auth.register(&body.username, &body.password).await?;

    // Welcome bonus: ledger row + balance bump in one transaction
    coins.grant(user.id, CoinGrant::Welcome).await?;

    // Re-read so the response carries the post-bonus balance
    let user = auth.get_user(user.id).await?;

    establish_session(&session, &user).await?;
    set_sentry_user(&user.id, Some(&user.username));

    tracing::info!(user_id = %user.id, "user registered");

    Ok(Json(AuthResponse {
        message: "User registered successfully".to_owned(),
        user,
    }))
}

/// Log in with username and password.
///
/// # Errors
///
/// Returns 401 when the credentials don't match.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool());

    let user = auth.login(&body.username, &body.password).await?;

    establish_session(&session, &user).await?;
    set_sentry_user(&user.id, Some(&user.username));

    Ok(Json(AuthResponse {
        message: "Logged in successfully".to_owned(),
        user,
    }))
}

/// Log out, destroying the session.
///
/// # Errors
///
/// Returns 500 if the session store fails.
pub async fn logout(session: Session) -> Result<Json<MessageResponse>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    clear_sentry_user();

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_owned(),
    }))
}

/// Get the current user.
///
/// Re-reads the database so the coin balance reflects grants made since
/// login rather than the session snapshot.
///
/// # Errors
///
/// Returns 401 when no session is established.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<MeResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth.get_user(current.id).await?;

    Ok(Json(MeResponse { user }))
}

/// Store the session principal for a freshly authenticated user.
async fn establish_session(session: &Session, user: &User) -> Result<()> {
    let principal = CurrentUser {
        id: user.id,
        username: user.username.clone(),
        drip_coins: user.drip_coins,
    };

    set_current_user(session, &principal)
        .await
        .map_err(|e| AppError::Internal(format!("failed to set session: {e}")))
}
