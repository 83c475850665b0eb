//! Driven port for the hosted authentication service.
//!
//! The hosted service owns credentials; the application only ever sees the
//! auth user id it hands back. Account provisioning and deletion go through
//! the same port because the profile row hangs off the auth user.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AuthUserId, EmailAddress, LoginCredentials, NewPassword};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// Email/password pair was not accepted.
        InvalidCredentials => "invalid email or password",
        /// The referenced auth user does not exist.
        UnknownUser => "auth user not found",
        /// The provider refused the request (duplicate email, weak password).
        Rejected { message: String } =>
            "identity provider rejected request: {message}",
        /// Transport failed or the provider is down.
        Connection { message: String } =>
            "identity provider connection failed: {message}",
        /// Provider call exceeded the configured timeout.
        Timeout { message: String } =>
            "identity provider timeout: {message}",
        /// Provider response could not be decoded.
        Decode { message: String } =>
            "identity provider response decode failed: {message}",
    }
}

/// Port for the hosted authentication service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the auth user id.
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthUserId, IdentityProviderError>;

    /// Create a confirmed auth user.
    async fn create_user(
        &self,
        email: &EmailAddress,
        password: &NewPassword,
        full_name: &str,
    ) -> Result<AuthUserId, IdentityProviderError>;

    /// Delete an auth user; the profile row cascades.
    async fn delete_user(&self, user_id: &AuthUserId) -> Result<(), IdentityProviderError>;

    /// Replace a user's password.
    async fn update_password(
        &self,
        user_id: &AuthUserId,
        password: &NewPassword,
    ) -> Result<(), IdentityProviderError>;
}

/// Email accepted by [`FixtureIdentityProvider`].
pub const FIXTURE_ADMIN_EMAIL: &str = "admin@docketsync.local";
/// Password accepted by [`FixtureIdentityProvider`].
pub const FIXTURE_ADMIN_PASSWORD: &str = "password";
/// Auth user id returned by [`FixtureIdentityProvider`] on sign-in.
pub const FIXTURE_ADMIN_USER_ID: Uuid = Uuid::from_u128(0x123e4567_e89b_12d3_a456_426614174000);

/// Development provider used when no hosted auth service is configured.
///
/// Accepts a single fixed credential pair and treats every other call as a
/// success.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthUserId, IdentityProviderError> {
        if credentials.email().as_ref() == FIXTURE_ADMIN_EMAIL
            && credentials.password() == FIXTURE_ADMIN_PASSWORD
        {
            Ok(AuthUserId::from_uuid(FIXTURE_ADMIN_USER_ID))
        } else {
            Err(IdentityProviderError::invalid_credentials())
        }
    }

    async fn create_user(
        &self,
        _email: &EmailAddress,
        _password: &NewPassword,
        _full_name: &str,
    ) -> Result<AuthUserId, IdentityProviderError> {
        Ok(AuthUserId::random())
    }

    async fn delete_user(&self, _user_id: &AuthUserId) -> Result<(), IdentityProviderError> {
        Ok(())
    }

    async fn update_password(
        &self,
        _user_id: &AuthUserId,
        _password: &NewPassword,
    ) -> Result<(), IdentityProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FIXTURE_ADMIN_EMAIL, FIXTURE_ADMIN_PASSWORD, true)]
    #[case(FIXTURE_ADMIN_EMAIL, "wrong", false)]
    #[case("other@example.com", FIXTURE_ADMIN_PASSWORD, false)]
    #[tokio::test]
    async fn fixture_accepts_only_the_development_account(
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        let result = FixtureIdentityProvider.sign_in(&creds).await;
        match (should_succeed, result) {
            (true, Ok(id)) => assert_eq!(id.as_uuid(), &FIXTURE_ADMIN_USER_ID),
            (false, Err(err)) => assert_eq!(err, IdentityProviderError::InvalidCredentials),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got success: {id}"),
        }
    }

    #[rstest]
    fn rejected_error_formats_message() {
        let err = IdentityProviderError::rejected("email already registered");
        assert_eq!(
            err.to_string(),
            "identity provider rejected request: email already registered"
        );
    }
}
