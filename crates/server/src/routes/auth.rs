//! Admin login and logout routes.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use undangan_core::{AdminUserId, Email};

use crate::error::{AppError, clear_sentry_user, messages};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::AdminAuthService;
use crate::state::AppState;

/// Login form submission.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Logged-in admin identity returned to the console.
#[derive(Debug, Serialize)]
pub struct AdminUserInfo {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
}

/// Response after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: AdminUserInfo,
}

/// Login with email and password.
///
/// POST /login
///
/// On success the admin identity is stored in the session; the session
/// cookie carries the authentication from then on.
///
/// # Errors
///
/// Returns 400 if either credential is missing, 401 if the pair is wrong.
/// An unknown email and a wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = AdminAuthService::new(state.pool());

    let admin = service
        .login(
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;

    let current = CurrentAdmin {
        id: admin.id,
        email: admin.email.clone(),
        name: admin.name.clone(),
    };
    set_current_admin(&session, &current)
        .await
        .map_err(|e| AppError::internal(messages::LOGIN_FAILED, e))?;

    Ok(Json(LoginResponse {
        success: true,
        user: AdminUserInfo {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        },
    }))
}

/// Response after logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Logout the current admin.
///
/// POST /logout
///
/// Clears the admin identity from the session. Safe to call without being
/// logged in.
///
/// # Errors
///
/// Returns 500 if the session cannot be updated.
pub async fn logout(session: Session) -> Result<Json<LogoutResponse>, AppError> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::internal(messages::LOGOUT_FAILED, e))?;

    clear_sentry_user();

    Ok(Json(LogoutResponse {
        success: true,
        message: messages::LOGGED_OUT,
    }))
}
