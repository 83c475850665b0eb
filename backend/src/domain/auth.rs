//! Authentication primitives: login credentials and new passwords.
//!
//! Secrets are held in [`Zeroizing`] buffers so they are wiped when dropped.
//! Handlers build these types from raw strings before calling a service.

use std::fmt;

use zeroize::Zeroizing;

use super::EmailAddress;

/// Minimum accepted length for a new account password.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials passed to the identity provider.
///
/// ## Invariants
/// - `email` is a trimmed, lower-cased address.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use docketsync::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ops@Example.com ", "hunter22").unwrap();
/// assert_eq!(creds.email().as_ref(), "ops@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address used to sign in.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Errors raised when validating a new password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    /// Shorter than [`PASSWORD_MIN_LEN`] characters.
    TooShort { min: usize },
    /// Confirmation did not match.
    Mismatch,
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "password must be at least {min} characters"),
            Self::Mismatch => write!(f, "new passwords do not match"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

/// Password accepted for a new account or a password change.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Validate the minimum length.
    pub fn new(raw: &str) -> Result<Self, PasswordValidationError> {
        if raw.chars().count() < PASSWORD_MIN_LEN {
            return Err(PasswordValidationError::TooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Validate a password together with its confirmation field.
    pub fn confirmed(raw: &str, confirmation: &str) -> Result<Self, PasswordValidationError> {
        if raw != confirmation {
            return Err(PasswordValidationError::Mismatch);
        }
        Self::new(raw)
    }

    /// Secret value.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(**redacted**)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::InvalidEmail)]
    #[case("not-an-email", "pw", LoginValidationError::InvalidEmail)]
    #[case("ops@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn credentials_keep_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("ops@example.com", " spaced ")
            .expect("valid inputs");
        assert_eq!(creds.password(), " spaced ");
    }

    #[rstest]
    #[case("short", "short", PasswordValidationError::TooShort { min: PASSWORD_MIN_LEN })]
    #[case("longenough1", "longenough2", PasswordValidationError::Mismatch)]
    fn rejects_bad_new_passwords(
        #[case] raw: &str,
        #[case] confirmation: &str,
        #[case] expected: PasswordValidationError,
    ) {
        assert_eq!(NewPassword::confirmed(raw, confirmation), Err(expected));
    }

    #[rstest]
    fn debug_output_redacts_password() {
        let password = NewPassword::new("correct horse").expect("valid password");
        assert_eq!(format!("{password:?}"), "NewPassword(**redacted**)");
        assert_eq!(password.expose(), "correct horse");
    }
}
