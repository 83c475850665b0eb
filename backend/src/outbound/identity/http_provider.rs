//! Reqwest-backed adapter for the hosted auth service.
//!
//! Sign-in uses the password grant; account provisioning uses the admin
//! endpoints, authorised with the service key. Only the auth user id ever
//! crosses back into the domain.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::dto::{
    CreateUserDto, ErrorBodyDto, PasswordGrantDto, SessionDto, UpdatePasswordDto, UserDto,
    UserMetadataDto,
};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{AuthUserId, EmailAddress, LoginCredentials, NewPassword};

/// Connection settings for [`HostedIdentityProvider`].
pub struct HostedIdentityConfig {
    /// Auth API root, e.g. `https://project.example.co/auth/v1/`.
    pub base_url: Url,
    /// Service-role key; grants admin access to auth users.
    pub service_key: Zeroizing<String>,
    pub timeout: Duration,
}

impl fmt::Debug for HostedIdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedIdentityConfig")
            .field("base_url", &self.base_url.as_str())
            .field("service_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Identity provider backed by the hosted auth REST API.
pub struct HostedIdentityProvider {
    client: Client,
    base_url: Url,
    service_key: Zeroizing<String>,
}

impl HostedIdentityProvider {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: HostedIdentityConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
            service_key: config.service_key,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, IdentityProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| IdentityProviderError::connection("auth base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", self.service_key.as_str())
            .bearer_auth(self.service_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), IdentityProviderError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body.to_vec()))
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, IdentityProviderError> {
    serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::decode(format!("invalid auth response payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::timeout(error.to_string())
    } else {
        IdentityProviderError::connection(error.to_string())
    }
}

/// Map a non-success admin response.
fn map_admin_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    let detail = ErrorBodyDto::parse(body).describe();
    match status {
        StatusCode::NOT_FOUND => IdentityProviderError::unknown_user(),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            IdentityProviderError::timeout(format!("status {}", status.as_u16()))
        }
        _ if status.is_client_error() => IdentityProviderError::rejected(
            detail.unwrap_or_else(|| format!("status {}", status.as_u16())),
        ),
        _ => {
            warn!(status = status.as_u16(), "auth service returned a server error");
            IdentityProviderError::connection(format!("status {}", status.as_u16()))
        }
    }
}

/// Map a non-success password-grant response.
fn map_sign_in_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    let parsed = ErrorBodyDto::parse(body);
    if parsed.is_invalid_grant() || matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) {
        return IdentityProviderError::invalid_credentials();
    }
    map_admin_error(status, body)
}

#[async_trait]
impl IdentityProvider for HostedIdentityProvider {
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthUserId, IdentityProviderError> {
        let mut url = self.endpoint(&["token"])?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let body = PasswordGrantDto {
            email: credentials.email().as_ref(),
            password: credentials.password(),
        };
        let (status, payload) = self
            .send(self.request(Method::POST, url).json(&body))
            .await?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "password grant refused");
            return Err(map_sign_in_error(status, &payload));
        }
        let session: SessionDto = decode(&payload)?;
        Ok(AuthUserId::from_uuid(session.user.id))
    }

    async fn create_user(
        &self,
        email: &EmailAddress,
        password: &NewPassword,
        full_name: &str,
    ) -> Result<AuthUserId, IdentityProviderError> {
        let url = self.endpoint(&["admin", "users"])?;
        let body = CreateUserDto {
            email: email.as_ref(),
            password: password.expose(),
            email_confirm: true,
            user_metadata: UserMetadataDto { full_name },
        };
        let (status, payload) = self
            .send(self.request(Method::POST, url).json(&body))
            .await?;
        if !status.is_success() {
            return Err(map_admin_error(status, &payload));
        }
        let user: UserDto = decode(&payload)?;
        Ok(AuthUserId::from_uuid(user.id))
    }

    async fn delete_user(&self, user_id: &AuthUserId) -> Result<(), IdentityProviderError> {
        let id = user_id.to_string();
        let url = self.endpoint(&["admin", "users", &id])?;
        let (status, payload) = self.send(self.request(Method::DELETE, url)).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(map_admin_error(status, &payload))
        }
    }

    async fn update_password(
        &self,
        user_id: &AuthUserId,
        password: &NewPassword,
    ) -> Result<(), IdentityProviderError> {
        let id = user_id.to_string();
        let url = self.endpoint(&["admin", "users", &id])?;
        let body = UpdatePasswordDto {
            password: password.expose(),
        };
        let (status, payload) = self
            .send(self.request(Method::PUT, url).json(&body))
            .await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(map_admin_error(status, &payload))
        }
    }
}
