//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection is an `invalid_request` carrying `{field, code}` details,
//! with `value` added when echoing the input helps the client.

use std::str::FromStr;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    Error, LoginValidationError, PasswordValidationError, ProfileValidationError,
};

/// HTTP field name as the client sent it (camelCase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

fn value_error(field: FieldName, code: &str, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code,
    }))
}

/// Parse a path or body identifier.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        value_error(
            field,
            "invalid_uuid",
            format!("{} must be a valid UUID", field.as_str()),
            value,
        )
    })
}

/// Parse one of the snake_case text enums (role, module, status, ...).
pub(crate) fn parse_text_enum<T: FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    T::from_str(value.trim()).map_err(|_| {
        value_error(
            field,
            "invalid_value",
            format!("{} has an unsupported value", field.as_str()),
            value,
        )
    })
}

pub(crate) fn map_login_error(error: LoginValidationError) -> Error {
    match error {
        LoginValidationError::InvalidEmail => {
            field_error(FieldName::new("email"), "invalid_email", error.to_string())
        }
        LoginValidationError::EmptyPassword => {
            field_error(FieldName::new("password"), "empty_password", error.to_string())
        }
    }
}

pub(crate) fn map_profile_error(error: ProfileValidationError) -> Error {
    let (field, code) = match error {
        ProfileValidationError::EmptyFullName => ("fullName", "missing_field"),
        ProfileValidationError::FullNameTooLong { .. } => ("fullName", "too_long"),
        ProfileValidationError::InvalidEmail => ("email", "invalid_email"),
        ProfileValidationError::PhoneTooLong { .. } => ("phone", "too_long"),
    };
    field_error(FieldName::new(field), code, error.to_string())
}

pub(crate) fn map_password_error(error: PasswordValidationError) -> Error {
    match error {
        PasswordValidationError::TooShort { .. } => {
            field_error(FieldName::new("password"), "too_short", error.to_string())
        }
        PasswordValidationError::Mismatch => field_error(
            FieldName::new("confirmPassword"),
            "mismatch",
            error.to_string(),
        ),
    }
}
