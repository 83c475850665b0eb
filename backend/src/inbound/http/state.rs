//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only ever talk to domain
//! services, so they stay testable with mocked or fixture ports.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    ConnoteRepository, DocketRepository, FixtureConnoteRepository, FixtureDocketRepository,
    FixtureIdentityProvider, FixturePostalCodeSource, FixtureProfileRepository,
    FixtureRolePermissionRepository, FixtureTrackingHistoryRepository, IdentityProvider,
    PostalCodeSource, ProfileRepository, RolePermissionRepository, TrackingHistoryRepository,
};
use crate::domain::{
    ConnoteService, DashboardService, DocketService, PermissionService, PostalLookupService,
    ProfileService, SessionService, TrackingService, UserAdminService,
};

/// Every driven port the HTTP surface needs.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub permissions: Arc<dyn RolePermissionRepository>,
    pub dockets: Arc<dyn DocketRepository>,
    pub connotes: Arc<dyn ConnoteRepository>,
    pub tracking: Arc<dyn TrackingHistoryRepository>,
    pub postal: Arc<dyn PostalCodeSource>,
    pub clock: Arc<dyn Clock>,
}

impl HttpStatePorts {
    /// Fixture ports for running without a database or hosted auth.
    ///
    /// Sign-in accepts only the development admin account.
    pub fn fixtures() -> Self {
        Self {
            identity: Arc::new(FixtureIdentityProvider),
            profiles: Arc::new(FixtureProfileRepository),
            permissions: Arc::new(FixtureRolePermissionRepository),
            dockets: Arc::new(FixtureDocketRepository),
            connotes: Arc::new(FixtureConnoteRepository),
            tracking: Arc::new(FixtureTrackingHistoryRepository),
            postal: Arc::new(FixturePostalCodeSource),
            clock: Arc::new(DefaultClock),
        }
    }
}

/// Domain services shared by all handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: SessionService,
    pub profile: ProfileService,
    pub users: UserAdminService,
    pub permissions: PermissionService,
    pub dockets: DocketService,
    pub connotes: ConnoteService,
    pub tracking: TrackingService,
    pub postal: PostalLookupService,
    pub dashboard: DashboardService,
}

impl HttpState {
    /// Wire the services over a set of ports.
    ///
    /// # Examples
    /// ```
    /// use docketsync::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts::fixtures());
    /// let _dockets = state.dockets.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identity,
            profiles,
            permissions,
            dockets,
            connotes,
            tracking,
            postal,
            clock,
        } = ports;

        let permissions = PermissionService::new(permissions);
        let dockets = DocketService::new(dockets, Arc::clone(&clock));
        Self {
            sessions: SessionService::new(
                Arc::clone(&identity),
                Arc::clone(&profiles),
                permissions.clone(),
            ),
            profile: ProfileService::new(Arc::clone(&profiles), Arc::clone(&identity)),
            users: UserAdminService::new(profiles, identity),
            permissions,
            dashboard: DashboardService::new(Arc::clone(&connotes), dockets.clone(), Arc::clone(&clock)),
            dockets,
            connotes: ConnoteService::new(Arc::clone(&connotes), Arc::clone(&clock)),
            tracking: TrackingService::new(connotes, tracking, clock),
            postal: PostalLookupService::new(postal),
        }
    }
}
