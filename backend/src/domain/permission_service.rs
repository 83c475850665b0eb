//! Module permission resolution and administration.
//!
//! Resolution never fails: when the permission table cannot be read the
//! static fallback set is substituted and the substitution is logged. Writes
//! (seeding and toggling) do surface storage errors.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{RolePermissionRepository, RolePermissionRepositoryError};
use crate::domain::{
    Error, ModuleId, PermissionMatrix, ResolvedPermissions, Role, RolePermission,
    default_permission_matrix,
};

fn map_repository_error(error: RolePermissionRepositoryError) -> Error {
    match error {
        RolePermissionRepositoryError::Connection { message } => Error::service_unavailable(
            format!("permission repository unavailable: {message}"),
        ),
        RolePermissionRepositoryError::Query { message } => {
            Error::internal(format!("permission repository error: {message}"))
        }
    }
}

/// Resolves and edits role/module permissions.
#[derive(Clone)]
pub struct PermissionService {
    repo: Arc<dyn RolePermissionRepository>,
}

impl PermissionService {
    /// Create a service over the permission repository.
    pub fn new(repo: Arc<dyn RolePermissionRepository>) -> Self {
        Self { repo }
    }

    /// Modules visible to `role`.
    ///
    /// `main_admin` short-circuits without touching storage.
    pub async fn resolve(&self, role: Role) -> ResolvedPermissions {
        if role == Role::MainAdmin {
            return ResolvedPermissions::main_admin();
        }

        match self.repo.list_for_role(role).await {
            Ok(rows) => ResolvedPermissions::from_stored(role, &rows),
            Err(error) => {
                warn!(
                    %role,
                    error = %error,
                    "permission lookup failed; using static fallback table"
                );
                ResolvedPermissions::fallback(role, error.to_string())
            }
        }
    }

    /// The full permission table, seeding defaults when it is empty.
    pub async fn matrix(&self) -> Result<PermissionMatrix, Error> {
        let rows = self.repo.list_all().await.map_err(map_repository_error)?;
        if !rows.is_empty() {
            return Ok(PermissionMatrix::new(rows, false));
        }

        let defaults = default_permission_matrix();
        self.repo
            .upsert(&defaults)
            .await
            .map_err(map_repository_error)?;
        info!(rows = defaults.len(), "seeded default role permissions");
        Ok(PermissionMatrix::new(defaults, true))
    }

    /// Flip the `(role, module)` cell, inserting it enabled when absent.
    ///
    /// `main_admin` rows are not editable.
    pub async fn toggle(&self, role: Role, module: ModuleId) -> Result<RolePermission, Error> {
        if role == Role::MainAdmin {
            return Err(Error::invalid_request(
                "main_admin permissions cannot be changed",
            ));
        }

        let existing = self
            .repo
            .find(role, module)
            .await
            .map_err(map_repository_error)?;
        let enabled = existing.is_none_or(|row| !row.enabled);
        let row = RolePermission::new(role, module, enabled);
        self.repo
            .upsert(std::slice::from_ref(&row))
            .await
            .map_err(map_repository_error)?;
        info!(%role, %module, enabled, "toggled role permission");
        Ok(row)
    }
}

#[cfg(test)]
#[path = "permission_service_tests.rs"]
mod tests;
