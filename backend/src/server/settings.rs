//! Application settings loaded via OrthoConfig.
//!
//! Every field can come from `DOCKETSYNC_*` environment variables, a
//! configuration file, or the command line. Unset optional fields fall back
//! to development defaults: fixture ports replace the database and the
//! hosted auth service.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use docketsync::outbound::identity::HostedIdentityConfig;
use docketsync::outbound::persistence::PoolConfig;
use docketsync::outbound::postal::DEFAULT_POSTAL_LOOKUP_BASE_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_POSTAL_TIMEOUT_SECS: u64 = 5;
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid URL for {name} '{value}': {source}")]
    Url {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("auth_url is set but auth_service_key is missing")]
    MissingServiceKey,
}

/// Top-level server settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DOCKETSYNC")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; fixtures are used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Base URL of the postal-code lookup API.
    pub postal_lookup_url: Option<String>,
    /// Postal lookup request timeout in seconds.
    pub postal_timeout_secs: Option<u64>,
    /// Hosted auth API root; the fixture provider is used when absent.
    pub auth_url: Option<String>,
    /// Service-role key for the hosted auth API.
    pub auth_service_key: Option<String>,
    /// Hosted auth request timeout in seconds.
    pub auth_timeout_secs: Option<u64>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("db_pool_size", &self.db_pool_size)
            .field("run_migrations", &self.run_migrations)
            .field("postal_lookup_url", &self.postal_lookup_url)
            .field("postal_timeout_secs", &self.postal_timeout_secs)
            .field("auth_url", &self.auth_url)
            .field(
                "auth_service_key",
                &self.auth_service_key.as_ref().map(|_| "<redacted>"),
            )
            .field("auth_timeout_secs", &self.auth_timeout_secs)
            .finish()
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        name,
        value: value.to_owned(),
        source,
    })
}

impl AppSettings {
    /// Resolved listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool settings when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url).with_max_size(self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE))
        })
    }

    /// Postal lookup base URL, defaulting to the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Url`] for an unparseable override.
    pub fn postal_lookup_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "postal_lookup_url",
            self.postal_lookup_url
                .as_deref()
                .unwrap_or(DEFAULT_POSTAL_LOOKUP_BASE_URL),
        )
    }

    pub fn postal_timeout(&self) -> Duration {
        Duration::from_secs(
            self.postal_timeout_secs
                .unwrap_or(DEFAULT_POSTAL_TIMEOUT_SECS),
        )
    }

    /// Hosted auth settings when `auth_url` is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the URL does not parse or the service
    /// key is missing.
    pub fn hosted_identity(&self) -> Result<Option<HostedIdentityConfig>, SettingsError> {
        let Some(raw_url) = self.auth_url.as_deref() else {
            return Ok(None);
        };
        let base_url = parse_url("auth_url", raw_url)?;
        let service_key = self
            .auth_service_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SettingsError::MissingServiceKey)?;
        Ok(Some(HostedIdentityConfig {
            base_url,
            service_key: Zeroizing::new(service_key),
            timeout: Duration::from_secs(self.auth_timeout_secs.unwrap_or(DEFAULT_AUTH_TIMEOUT_SECS)),
        }))
    }
}
