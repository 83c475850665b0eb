//! Builders for the HTTP state ports.
//!
//! Each repository port uses its Diesel adapter when a pool is configured
//! and the fixture otherwise. Identity and postal sources are swapped in
//! independently of the database.

use std::sync::Arc;

use actix_web::web;

use docketsync::inbound::http::state::{HttpState, HttpStatePorts};
use docketsync::outbound::persistence::{
    DbPool, DieselConnoteRepository, DieselDocketRepository, DieselProfileRepository,
    DieselRolePermissionRepository, DieselTrackingHistoryRepository,
};

use super::ServerConfig;

/// Pick the pool-backed port when a pool is present, otherwise the fixture.
fn select_port<Pool, Port>(
    pool: &Option<Pool>,
    make_port: impl FnOnce(&Pool) -> Arc<Port>,
    fixture: Arc<Port>,
) -> Arc<Port>
where
    Port: ?Sized,
{
    match pool {
        Some(pool) => make_port(pool),
        None => fixture,
    }
}

fn build_ports(config: &ServerConfig) -> HttpStatePorts {
    let fixtures = HttpStatePorts::fixtures();
    let pool: &Option<DbPool> = &config.db_pool;

    let mut ports = HttpStatePorts {
        profiles: select_port(
            pool,
            |pool| Arc::new(DieselProfileRepository::new(pool.clone())),
            fixtures.profiles,
        ),
        permissions: select_port(
            pool,
            |pool| Arc::new(DieselRolePermissionRepository::new(pool.clone())),
            fixtures.permissions,
        ),
        dockets: select_port(
            pool,
            |pool| Arc::new(DieselDocketRepository::new(pool.clone())),
            fixtures.dockets,
        ),
        connotes: select_port(
            pool,
            |pool| Arc::new(DieselConnoteRepository::new(pool.clone())),
            fixtures.connotes,
        ),
        tracking: select_port(
            pool,
            |pool| Arc::new(DieselTrackingHistoryRepository::new(pool.clone())),
            fixtures.tracking,
        ),
        ..fixtures
    };
    if let Some(identity) = &config.identity {
        ports.identity = Arc::clone(identity);
    }
    if let Some(postal) = &config.postal {
        ports.postal = Arc::clone(postal);
    }
    ports
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_ports(config)))
}
