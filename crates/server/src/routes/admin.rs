//! Admin console routes: guest listing, QR check-in, guarded delete.
//!
//! Every handler here requires a logged-in admin via [`RequireAdminAuth`].

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, messages};
use crate::middleware::RequireAdminAuth;
use crate::models::GuestRecord;
use crate::services::{CheckInService, GuestAdminService};
use crate::state::AppState;

/// Full guest listing.
#[derive(Debug, Serialize)]
pub struct GuestListResponse {
    pub success: bool,
    pub data: Vec<GuestRecord>,
}

/// List every guest record, newest registration first.
///
/// GET /admin/data
///
/// # Errors
///
/// Returns 500 if the listing cannot be read.
pub async fn list_guests(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Json<GuestListResponse>, AppError> {
    let service = GuestAdminService::new(state.guests());

    let data = service
        .list_all()
        .await
        .map_err(|e| AppError::internal(messages::FETCH_FAILED, e))?;

    Ok(Json(GuestListResponse {
        success: true,
        data,
    }))
}

/// QR scan request from the check-in page.
#[derive(Debug, Deserialize)]
pub struct UpdateScanRequest {
    #[serde(rename = "idTamu")]
    pub id_tamu: Option<String>,
}

/// Response carrying the guest record after a successful scan.
#[derive(Debug, Serialize)]
pub struct UpdateScanResponse {
    pub success: bool,
    pub message: &'static str,
    pub guest: GuestRecord,
}

/// Check a guest in by their scanned identifier.
///
/// POST /admin/updateScan
///
/// # Errors
///
/// Returns 400 if the identifier is missing or the guest was already
/// scanned, 404 if no guest holds the identifier, 500 if the update fails.
pub async fn update_scan(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Json(req): Json<UpdateScanRequest>,
) -> Result<Json<UpdateScanResponse>, AppError> {
    let service = CheckInService::new(state.guests());

    let guest = service
        .check_in(req.id_tamu.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(UpdateScanResponse {
        success: true,
        message: messages::SCAN_UPDATED,
        guest,
    }))
}

/// Delete request from the admin console.
#[derive(Debug, Deserialize)]
pub struct DeleteGuestRequest {
    pub id: Option<String>,
}

/// Response after a deletion.
#[derive(Debug, Serialize)]
pub struct DeleteGuestResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Delete a guest record by its storage id.
///
/// POST /admin/deleteGuest
///
/// Only records already checked in can be deleted.
///
/// # Errors
///
/// Returns 400 if the id is missing or the guest was never scanned, 404 if
/// no record has the id, 500 if the delete fails.
pub async fn delete_guest(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Json(req): Json<DeleteGuestRequest>,
) -> Result<Json<DeleteGuestResponse>, AppError> {
    let service = GuestAdminService::new(state.guests());

    service.delete(req.id.as_deref().unwrap_or_default()).await?;

    Ok(Json(DeleteGuestResponse {
        success: true,
        message: messages::GUEST_DELETED,
    }))
}
