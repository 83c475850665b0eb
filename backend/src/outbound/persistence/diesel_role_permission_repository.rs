//! PostgreSQL-backed `RolePermissionRepository` implementation.
//!
//! Writes are upserts on the `(role, module_id)` unique key.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RolePermissionRepository, RolePermissionRepositoryError};
use crate::domain::{ModuleId, Role, RolePermission};

use super::error_mapping::{map_diesel_error, map_pool_error, unrecognised_value};
use super::models::{NewRolePermissionRow, RolePermissionRow};
use super::pool::{DbPool, PoolError};
use super::schema::role_permissions;

/// Diesel-backed implementation of the `RolePermissionRepository` port.
#[derive(Clone)]
pub struct DieselRolePermissionRepository {
    pool: DbPool,
}

impl DieselRolePermissionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> RolePermissionRepositoryError {
    map_pool_error(error, RolePermissionRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> RolePermissionRepositoryError {
    map_diesel_error(
        error,
        RolePermissionRepositoryError::query,
        RolePermissionRepositoryError::connection,
    )
}

fn row_to_permission(row: RolePermissionRow) -> Result<RolePermission, RolePermissionRepositoryError> {
    let role: Role = row.role.parse().map_err(|_| {
        unrecognised_value("role", &row.role, RolePermissionRepositoryError::query)
    })?;
    let module: ModuleId = row.module_id.parse().map_err(|_| {
        unrecognised_value("module_id", &row.module_id, RolePermissionRepositoryError::query)
    })?;
    Ok(RolePermission::new(role, module, row.enabled))
}

#[async_trait]
impl RolePermissionRepository for DieselRolePermissionRepository {
    async fn list_for_role(
        &self,
        role: Role,
    ) -> Result<Vec<RolePermission>, RolePermissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<RolePermissionRow> = role_permissions::table
            .filter(role_permissions::role.eq(role.as_str()))
            .select(RolePermissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_permission).collect()
    }

    async fn list_all(&self) -> Result<Vec<RolePermission>, RolePermissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<RolePermissionRow> = role_permissions::table
            .order((role_permissions::role.asc(), role_permissions::module_id.asc()))
            .select(RolePermissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_permission).collect()
    }

    async fn find(
        &self,
        role: Role,
        module: ModuleId,
    ) -> Result<Option<RolePermission>, RolePermissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        role_permissions::table
            .filter(role_permissions::role.eq(role.as_str()))
            .filter(role_permissions::module_id.eq(module.as_str()))
            .select(RolePermissionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_permission)
            .transpose()
    }

    async fn upsert(&self, rows: &[RolePermission]) -> Result<(), RolePermissionRepositoryError> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let values: Vec<NewRolePermissionRow<'_>> = rows
            .iter()
            .map(|row| NewRolePermissionRow {
                role: row.role.as_str(),
                module_id: row.module.as_str(),
                enabled: row.enabled,
            })
            .collect();

        diesel::insert_into(role_permissions::table)
            .values(&values)
            .on_conflict((role_permissions::role, role_permissions::module_id))
            .do_update()
            .set((
                role_permissions::enabled.eq(excluded(role_permissions::enabled)),
                role_permissions::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
