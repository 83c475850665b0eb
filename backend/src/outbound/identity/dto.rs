//! Request and response bodies for the hosted auth API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct UserMetadataDto<'a> {
    pub(super) full_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateUserDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) email_confirm: bool,
    pub(super) user_metadata: UserMetadataDto<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdatePasswordDto<'a> {
    pub(super) password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: Uuid,
}

#[derive(Debug, Deserialize)]
pub(super) struct SessionDto {
    pub(super) user: UserDto,
}

/// Error body; the API uses different keys depending on the endpoint.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) error: Option<String>,
    #[serde(default)]
    pub(super) error_description: Option<String>,
    #[serde(default)]
    pub(super) msg: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl ErrorBodyDto {
    pub(super) fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub(super) fn is_invalid_grant(&self) -> bool {
        self.error.as_deref() == Some("invalid_grant")
    }

    pub(super) fn describe(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .filter(|text| !text.trim().is_empty())
    }
}
