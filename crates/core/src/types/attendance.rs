//! Attendance choice for an RSVP.

use serde::{Deserialize, Serialize};

/// Whether a guest plans to attend the reception.
///
/// Wire values match the invitation form's options (`Hadir` / `Tidak Hadir`);
/// an RSVP that omits the choice defaults to attending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "undangan.attendance", rename_all = "snake_case")
)]
pub enum Attendance {
    /// The guest will attend.
    #[default]
    #[serde(rename = "Hadir")]
    Attending,
    /// The guest sends regrets.
    #[serde(rename = "Tidak Hadir")]
    NotAttending,
}

impl std::fmt::Display for Attendance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attending => write!(f, "Hadir"),
            Self::NotAttending => write!(f, "Tidak Hadir"),
        }
    }
}

impl std::str::FromStr for Attendance {
    type Err = String;

    /// Form submissions vary in casing and separator, so matching is
    /// case-insensitive and accepts both `tidak hadir` and `tidak_hadir`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hadir" => Ok(Self::Attending),
            "tidak hadir" | "tidak_hadir" => Ok(Self::NotAttending),
            _ => Err(format!("invalid attendance value: {s}")),
        }
    }
}
