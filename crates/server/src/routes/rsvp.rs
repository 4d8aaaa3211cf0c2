//! Public RSVP submission route.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use undangan_core::{Attendance, GuestDocId, GuestId};

use crate::error::{AppError, messages};
use crate::models::NewGuest;
use crate::services::RegistrationService;
use crate::state::AppState;

/// RSVP form submission.
///
/// Clients also send a `timestamp` field; it is ignored, the server clock is
/// authoritative for registration time.
#[derive(Debug, Deserialize)]
pub struct SubmitRsvpRequest {
    pub nama: Option<String>,
    pub pesan: Option<String>,
    pub kehadiran: Option<String>,
}

/// Response after a stored submission.
#[derive(Debug, Serialize)]
pub struct SubmitRsvpResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(rename = "idTamu")]
    pub id_tamu: GuestId,
    #[serde(rename = "docId")]
    pub doc_id: GuestDocId,
}

/// Submit an RSVP.
///
/// POST /submit-rsvp
///
/// # Errors
///
/// Returns 400 if the name is missing or too long, or the attendance value
/// is not one of the accepted forms. Returns 500 if the record cannot be
/// stored; in that case nothing was saved and no identifier was consumed.
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRsvpRequest>,
) -> Result<Json<SubmitRsvpResponse>, AppError> {
    let attendance = parse_attendance(req.kehadiran.as_deref())?;

    let service = RegistrationService::new(state.guests());
    let record = service
        .register(NewGuest {
            name: req.nama.unwrap_or_default(),
            message: req.pesan.unwrap_or_default(),
            attendance,
        })
        .await?;

    Ok(Json(SubmitRsvpResponse {
        success: true,
        message: messages::RSVP_SAVED,
        id_tamu: record.guest_id,
        doc_id: record.doc_id,
    }))
}

/// An absent or empty value falls back to attending, matching the invitation
/// form which preselects "Hadir".
fn parse_attendance(value: Option<&str>) -> Result<Attendance, AppError> {
    match value {
        None | Some("") => Ok(Attendance::default()),
        Some(s) => s
            .parse()
            .map_err(|_| AppError::BadRequest(messages::INVALID_ATTENDANCE.into())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn attendance_defaults_when_absent_or_empty() {
        assert_eq!(parse_attendance(None).unwrap(), Attendance::Attending);
        assert_eq!(parse_attendance(Some("")).unwrap(), Attendance::Attending);
    }

    #[test]
    fn attendance_parses_both_wire_values() {
        assert_eq!(
            parse_attendance(Some("Hadir")).unwrap(),
            Attendance::Attending
        );
        assert_eq!(
            parse_attendance(Some("Tidak Hadir")).unwrap(),
            Attendance::NotAttending
        );
    }

    #[test]
    fn unrecognized_attendance_is_rejected() {
        let result = parse_attendance(Some("mungkin"));
        assert!(result.is_err());
    }
}
