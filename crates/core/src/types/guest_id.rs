//! Public guest identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`GuestId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum GuestIdError {
    /// The input string is empty.
    #[error("guest id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("guest id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains interior whitespace.
    #[error("guest id cannot contain whitespace")]
    Whitespace,
}

/// The public identifier printed into a guest's QR code.
///
/// Minted at registration from the guest's name and their sequence number:
/// every whitespace run in the name becomes a single underscore and the
/// sequence is appended zero-padded to three digits, so the seventh guest
/// "John Doe" gets `John_Doe-007`. Identifiers are unique for the lifetime
/// of the sequence counter and never change once assigned.
///
/// ## Examples
///
/// ```
/// use undangan_core::GuestId;
///
/// assert_eq!(GuestId::mint("John Doe", 7).as_str(), "John_Doe-007");
/// assert_eq!(GuestId::mint("Budi", 1).as_str(), "Budi-001");
///
/// // Scanned input is validated before lookup
/// assert!(GuestId::parse("Budi-001").is_ok());
/// assert!(GuestId::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct GuestId(String);

/// Digits in the widest sequence an `i64` counter can reach.
const MAX_SEQUENCE_DIGITS: usize = 19;

/// Replace every whitespace run in `name` with a single underscore.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }
    slug
}

impl GuestId {
    /// Maximum length accepted when parsing scanned input.
    pub const MAX_LENGTH: usize = 512;

    /// Longest name slug that still fits [`Self::MAX_LENGTH`] once the
    /// separator and the widest possible sequence suffix are appended.
    pub const MAX_NAME_LENGTH: usize = Self::MAX_LENGTH - MAX_SEQUENCE_DIGITS - 1;

    /// Minimum width of the zero-padded sequence suffix.
    ///
    /// Sequences above 999 keep their natural width (`1000`, not `000`).
    pub const SEQUENCE_WIDTH: usize = 3;

    /// Mint the identifier for a guest from their name and sequence number.
    ///
    /// Names accepted by [`Self::name_fits`] always mint an identifier that
    /// [`Self::parse`] accepts, whatever the sequence.
    #[must_use]
    pub fn mint(name: &str, sequence: i64) -> Self {
        Self(format!(
            "{slug}-{sequence:0width$}",
            slug = slugify(name),
            width = Self::SEQUENCE_WIDTH
        ))
    }

    /// Whether identifiers minted from `name` stay within
    /// [`Self::MAX_LENGTH`] for every sequence the counter can produce.
    ///
    /// Registration rejects names that fail this check, so no stored
    /// identifier is ever refused by [`Self::parse`].
    #[must_use]
    pub fn name_fits(name: &str) -> bool {
        slugify(name).len() <= Self::MAX_NAME_LENGTH
    }

    /// Parse a `GuestId` from scanned input.
    ///
    /// Scanner output often carries a trailing newline, so surrounding
    /// whitespace is trimmed before validation. Minted identifiers never
    /// contain whitespace, so any interior whitespace is rejected outright.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`], or contains interior whitespace.
    pub fn parse(s: &str) -> Result<Self, GuestIdError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(GuestIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(GuestIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(GuestIdError::Whitespace);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `GuestId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the sequence number encoded in the suffix, if present.
    ///
    /// The suffix is everything after the last `-`, so names that themselves
    /// contain hyphens still resolve correctly.
    #[must_use]
    pub fn sequence(&self) -> Option<i64> {
        self.0
            .rsplit_once('-')
            .and_then(|(_, suffix)| suffix.parse().ok())
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GuestId {
    type Err = GuestIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for GuestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for GuestId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for GuestId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for GuestId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
