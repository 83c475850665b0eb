//! Driven port for postal-code geocoding lookups.
//!
//! The domain owns the request and response shapes so the lookup service can
//! decide on fallbacks without knowing the HTTP details.

use async_trait::async_trait;

use crate::domain::postal::PostalPlace;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the postal lookup service.
    pub enum PostalCodeSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "postal lookup transport failed: {message}",
        /// Lookup exceeded the configured timeout.
        Timeout { message: String } =>
            "postal lookup timeout: {message}",
        /// Service answered with an unexpected status.
        Status { status: u16, message: String } =>
            "postal lookup returned status {status}: {message}",
        /// Response could not be decoded.
        Decode { message: String } =>
            "postal lookup response decode failed: {message}",
    }
}

/// Port for resolving a postal code to a place.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostalCodeSource: Send + Sync {
    /// Look up a cleaned postal code, optionally scoped by a two-letter
    /// country code.
    ///
    /// Returns `Ok(None)` when the service does not know the code.
    async fn lookup(
        &self,
        country_code: Option<&'static str>,
        code: &str,
    ) -> Result<Option<PostalPlace>, PostalCodeSourceError>;
}

/// Fixture source that knows no postal codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostalCodeSource;

#[async_trait]
impl PostalCodeSource for FixturePostalCodeSource {
    async fn lookup(
        &self,
        _country_code: Option<&'static str>,
        _code: &str,
    ) -> Result<Option<PostalPlace>, PostalCodeSourceError> {
        Ok(None)
    }
}
