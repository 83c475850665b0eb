//! Staff profile records.
//!
//! A profile links a hosted-auth user to a display name, contact details, a
//! [`Role`], and an active flag. Profiles are created when an administrator
//! provisions an account and disappear when the auth user is deleted.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Role;
use super::value_macros::define_uuid_id;

/// Maximum stored length of a full name.
pub const FULL_NAME_MAX: usize = 120;
/// Maximum stored length of a phone number.
pub const PHONE_MAX: usize = 32;

/// Validation errors raised by profile value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyFullName,
    FullNameTooLong { max: usize },
    InvalidEmail,
    PhoneTooLong { max: usize },
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::FullNameTooLong { max } => {
                write!(f, "full name must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::PhoneTooLong { max } => write!(f, "phone must be at most {max} characters"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

define_uuid_id! {
    /// Primary key of a profile row.
    ProfileId
}

define_uuid_id! {
    /// Identifier issued by the hosted auth service.
    AuthUserId
}

/// Lower-cased, trimmed email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl EmailAddress {
    /// Validate and normalise an address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(ProfileValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Trimmed, non-empty full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    /// Validate a full name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProfileValidationError::EmptyFullName);
        }
        if trimmed.chars().count() > FULL_NAME_MAX {
            return Err(ProfileValidationError::FullNameTooLong { max: FULL_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Normalise an optional phone number: blank becomes `None`.
pub fn normalise_phone(raw: Option<&str>) -> Result<Option<String>, ProfileValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(phone) if phone.chars().count() > PHONE_MAX => {
            Err(ProfileValidationError::PhoneTooLong { max: PHONE_MAX })
        }
        Some(phone) => Ok(Some(phone.to_owned())),
    }
}

/// Persisted staff profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub auth_user_id: AuthUserId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub avatar_url: Option<String>,
    pub created_by: Option<ProfileId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a freshly provisioned account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub auth_user_id: AuthUserId,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub role: Role,
    pub created_by: Option<ProfileId>,
}

/// Administrator edit of another profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileAdminUpdate {
    pub full_name: FullName,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

/// Self-service edit of one's own contact details.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactUpdate {
    pub full_name: FullName,
    pub phone: Option<String>,
}
