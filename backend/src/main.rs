//! Backend entry-point: loads settings, selects adapters, and serves the API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use docketsync::inbound::http::health::HealthState;
use docketsync::inbound::http::session_config::{BuildMode, session_settings_from_env};
use docketsync::outbound::identity::HostedIdentityProvider;
use docketsync::outbound::persistence::{DbPool, run_pending_migrations};
use docketsync::outbound::postal::PostalHttpSource;
use server::{AppSettings, ServerConfig, create_server};

fn startup_error(context: &str, error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {error}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| startup_error("configuration", e))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .map_err(|e| startup_error("session configuration", e))?;
    info!(fingerprint = %session.key_fingerprint(), "session signing key loaded");

    let bind_addr = settings
        .bind_addr()
        .map_err(|e| startup_error("configuration", e))?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );

    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            run_pending_migrations(pool_config.database_url().to_owned())
                .await
                .map_err(|e| startup_error("migrations", e))?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| startup_error("database pool", e))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; serving fixture data");
    }

    match settings
        .hosted_identity()
        .map_err(|e| startup_error("configuration", e))?
    {
        Some(identity) => {
            let provider =
                HostedIdentityProvider::new(identity).map_err(|e| startup_error("auth client", e))?;
            config = config.with_identity_provider(Arc::new(provider));
        }
        None => warn!("no hosted auth configured; only the development admin can sign in"),
    }

    let postal_url = settings
        .postal_lookup_url()
        .map_err(|e| startup_error("configuration", e))?;
    let postal = PostalHttpSource::new(postal_url, settings.postal_timeout())
        .map_err(|e| startup_error("postal client", e))?;
    config = config.with_postal_source(Arc::new(postal));

    info!(%bind_addr, "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
