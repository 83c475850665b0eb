//! Port for the role/module permission table.

use async_trait::async_trait;

use crate::domain::{ModuleId, Role, RolePermission};

use super::define_port_error;

define_port_error! {
    /// Errors raised by role permission repository adapters.
    pub enum RolePermissionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "role permission repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "role permission repository query failed: {message}",
    }
}

/// Port for `role_permissions` rows keyed by `(role, module)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RolePermissionRepository: Send + Sync {
    /// Rows stored for one role.
    async fn list_for_role(
        &self,
        role: Role,
    ) -> Result<Vec<RolePermission>, RolePermissionRepositoryError>;

    /// Every stored row, ordered by role then module.
    async fn list_all(&self) -> Result<Vec<RolePermission>, RolePermissionRepositoryError>;

    /// Row for one `(role, module)` pair.
    async fn find(
        &self,
        role: Role,
        module: ModuleId,
    ) -> Result<Option<RolePermission>, RolePermissionRepositoryError>;

    /// Insert or update rows by their natural key.
    async fn upsert(&self, rows: &[RolePermission]) -> Result<(), RolePermissionRepositoryError>;
}

/// Fixture repository whose reads always fail, forcing the static fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRolePermissionRepository;

const FIXTURE_MESSAGE: &str = "no permission store configured";

#[async_trait]
impl RolePermissionRepository for FixtureRolePermissionRepository {
    async fn list_for_role(
        &self,
        _role: Role,
    ) -> Result<Vec<RolePermission>, RolePermissionRepositoryError> {
        Err(RolePermissionRepositoryError::connection(FIXTURE_MESSAGE))
    }

    async fn list_all(&self) -> Result<Vec<RolePermission>, RolePermissionRepositoryError> {
        Err(RolePermissionRepositoryError::connection(FIXTURE_MESSAGE))
    }

    async fn find(
        &self,
        _role: Role,
        _module: ModuleId,
    ) -> Result<Option<RolePermission>, RolePermissionRepositoryError> {
        Err(RolePermissionRepositoryError::connection(FIXTURE_MESSAGE))
    }

    async fn upsert(&self, _rows: &[RolePermission]) -> Result<(), RolePermissionRepositoryError> {
        Err(RolePermissionRepositoryError::connection(FIXTURE_MESSAGE))
    }
}
