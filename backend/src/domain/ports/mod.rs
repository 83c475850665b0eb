//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod connote_repository;
mod docket_repository;
mod identity_provider;
mod postal_code_source;
mod profile_repository;
mod role_permission_repository;
mod tracking_history_repository;

#[cfg(test)]
pub use connote_repository::MockConnoteRepository;
pub use connote_repository::{
    ConnoteCountQuery, ConnoteRepository, ConnoteRepositoryError, FixtureConnoteRepository,
};
#[cfg(test)]
pub use docket_repository::MockDocketRepository;
pub use docket_repository::{DocketRepository, DocketRepositoryError, FixtureDocketRepository};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FIXTURE_ADMIN_EMAIL, FIXTURE_ADMIN_PASSWORD, FIXTURE_ADMIN_USER_ID, FixtureIdentityProvider,
    IdentityProvider, IdentityProviderError,
};
#[cfg(test)]
pub use postal_code_source::MockPostalCodeSource;
pub use postal_code_source::{FixturePostalCodeSource, PostalCodeSource, PostalCodeSourceError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{
    FIXTURE_ADMIN_PROFILE_ID, FixtureProfileRepository, ProfileRepository, ProfileRepositoryError,
    fixture_admin_profile,
};
#[cfg(test)]
pub use role_permission_repository::MockRolePermissionRepository;
pub use role_permission_repository::{
    FixtureRolePermissionRepository, RolePermissionRepository, RolePermissionRepositoryError,
};
#[cfg(test)]
pub use tracking_history_repository::MockTrackingHistoryRepository;
pub use tracking_history_repository::{
    FixtureTrackingHistoryRepository, TrackingHistoryRepository, TrackingHistoryRepositoryError,
};
