//! Unified error handling for the HTTP boundary.
//!
//! Service errors convert into [`AppError`], which renders the
//! `{ success: false, message }` JSON body the site's clients parse. The
//! user-facing messages are the fixed Indonesian strings in [`messages`];
//! internal detail stays in the logs and Sentry.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{AdminAuthError, CheckInError, GuestAdminError, RegistrationError};

/// Wire messages, verbatim as the site's clients expect them.
pub mod messages {
    pub const NAME_REQUIRED: &str = "Nama harus diisi";
    pub const NAME_TOO_LONG: &str = "Nama terlalu panjang";
    pub const RSVP_SAVED: &str = "Data berhasil disimpan";
    pub const RSVP_SAVE_FAILED: &str = "Gagal menyimpan data";
    pub const FETCH_FAILED: &str = "Gagal mengambil data";
    pub const GUEST_ID_REQUIRED: &str = "ID tamu harus disediakan";
    pub const GUEST_NOT_FOUND: &str = "Tamu tidak ditemukan";
    pub const ALREADY_SCANNED: &str = "QR code sudah dipindai sebelumnya";
    pub const SCAN_UPDATED: &str = "Status scan berhasil diperbarui";
    pub const SCAN_UPDATE_FAILED: &str = "Gagal memperbarui status kehadiran";
    pub const DELETE_REQUIRES_SCAN: &str =
        "Hanya data tamu yang sudah dipindai yang dapat dihapus";
    pub const GUEST_DELETED: &str = "Data tamu berhasil dihapus";
    pub const DELETE_FAILED: &str = "Gagal menghapus data tamu";
    pub const INVALID_ATTENDANCE: &str = "Kehadiran tidak valid";
    pub const CREDENTIALS_REQUIRED: &str = "Email dan password diperlukan";
    pub const WRONG_CREDENTIALS: &str = "Email atau password salah";
    pub const LOGIN_FAILED: &str = "Gagal login";
    pub const LOGOUT_FAILED: &str = "Gagal logout";
    pub const LOGGED_OUT: &str = "Berhasil logout";
    pub const AUTH_REQUIRED: &str = "Akses ditolak: Autentikasi diperlukan";
}

/// Application-level error type for request handlers.
///
/// `Display` is the client-facing message in every variant, so rendering the
/// response body never exposes internal detail.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request from the client.
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Not authenticated, or wrong credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Internal failure: the client sees `message`, the log and Sentry get
    /// `source`.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AppError {
    /// Wrap an internal failure with the message the client should see.
    pub fn internal(
        message: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Internal {
            message: message.to_string(),
            source: Box::new(source),
        }
    }
}

/// JSON body shared by all error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Internal { .. }) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = ?self,
                sentry_event_id = %event_id,
                "request failed"
            );
        }

        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            success: false,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistrationError> for AppError {
    fn from(e: RegistrationError) -> Self {
        match e {
            RegistrationError::MissingName => Self::BadRequest(messages::NAME_REQUIRED.into()),
            RegistrationError::NameTooLong => Self::BadRequest(messages::NAME_TOO_LONG.into()),
            RegistrationError::Store(source) => {
                Self::internal(messages::RSVP_SAVE_FAILED, source)
            }
        }
    }
}

impl From<CheckInError> for AppError {
    fn from(e: CheckInError) -> Self {
        match e {
            CheckInError::MissingId => Self::BadRequest(messages::GUEST_ID_REQUIRED.into()),
            CheckInError::NotFound => Self::NotFound(messages::GUEST_NOT_FOUND.into()),
            CheckInError::AlreadyCheckedIn => {
                Self::BadRequest(messages::ALREADY_SCANNED.into())
            }
            CheckInError::Store(source) => Self::internal(messages::SCAN_UPDATE_FAILED, source),
        }
    }
}

/// Mapping for the delete operation; the listing handler wraps its store
/// error with [`messages::FETCH_FAILED`] itself.
impl From<GuestAdminError> for AppError {
    fn from(e: GuestAdminError) -> Self {
        match e {
            GuestAdminError::MissingId => Self::BadRequest(messages::GUEST_ID_REQUIRED.into()),
            GuestAdminError::NotFound => Self::NotFound(messages::GUEST_NOT_FOUND.into()),
            GuestAdminError::NotCheckedIn => {
                Self::BadRequest(messages::DELETE_REQUIRES_SCAN.into())
            }
            GuestAdminError::Store(source) => Self::internal(messages::DELETE_FAILED, source),
        }
    }
}

impl From<AdminAuthError> for AppError {
    fn from(e: AdminAuthError) -> Self {
        match e {
            AdminAuthError::MissingCredentials => {
                Self::BadRequest(messages::CREDENTIALS_REQUIRED.into())
            }
            AdminAuthError::InvalidEmail(_) | AdminAuthError::InvalidCredentials => {
                Self::Unauthorized(messages::WRONG_CREDENTIALS.into())
            }
            AdminAuthError::AlreadyExists | AdminAuthError::WeakPassword(_) => {
                Self::BadRequest(e.to_string())
            }
            AdminAuthError::PasswordHash => Self::internal(messages::LOGIN_FAILED, e),
            AdminAuthError::Repository(source) => {
                Self::internal(messages::LOGIN_FAILED, source)
            }
        }
    }
}

/// Set the Sentry user context from an admin user id.
pub fn set_sentry_user(admin_id: i32, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            status_of(AppError::BadRequest("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthorized("x".to_string())),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn blank_name_maps_to_wire_message() {
        let err = AppError::from(RegistrationError::MissingName);
        assert_eq!(err.to_string(), "Nama harus diisi");
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn overlong_name_maps_to_wire_message() {
        let err = AppError::from(RegistrationError::NameTooLong);
        assert_eq!(err.to_string(), "Nama terlalu panjang");
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn repeated_scan_maps_to_wire_message() {
        let err = AppError::from(CheckInError::AlreadyCheckedIn);
        assert_eq!(err.to_string(), "QR code sudah dipindai sebelumnya");
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unscanned_delete_maps_to_wire_message() {
        let err = AppError::from(GuestAdminError::NotCheckedIn);
        assert_eq!(
            err.to_string(),
            "Hanya data tamu yang sudah dipindai yang dapat dihapus"
        );
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn credential_errors_stay_uniform() {
        let wrong = AppError::from(AdminAuthError::InvalidCredentials);
        assert_eq!(wrong.to_string(), "Email atau password salah");
        assert_eq!(status_of(wrong), StatusCode::UNAUTHORIZED);

        let missing = AppError::from(AdminAuthError::MissingCredentials);
        assert_eq!(missing.to_string(), "Email dan password diperlukan");
        assert_eq!(status_of(missing), StatusCode::BAD_REQUEST);
    }
}
