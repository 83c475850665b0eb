//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{
    AuthUserId, ContactUpdate, NewProfile, Profile, ProfileAdminUpdate, ProfileId, Role,
};

use super::error_mapping::{map_diesel_error, map_pool_error, unique_violation, unrecognised_value};
use super::models::{ContactChangeset, NewProfileRow, ProfileAdminChangeset, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ProfileRepositoryError {
    map_pool_error(error, ProfileRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    if let Some(constraint) = unique_violation(&error) {
        return ProfileRepositoryError::duplicate(constraint.to_owned());
    }
    map_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    let role: Role = row
        .role
        .parse()
        .map_err(|_| unrecognised_value("role", &row.role, ProfileRepositoryError::query))?;
    Ok(Profile {
        id: ProfileId::from_uuid(row.id),
        auth_user_id: AuthUserId::from_uuid(row.user_id),
        full_name: row.full_name,
        email: row.email,
        phone: row.phone,
        role,
        is_active: row.is_active,
        avatar_url: row.avatar_url,
        created_by: row.created_by.map(ProfileId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_auth_user(
        &self,
        auth_user_id: &AuthUserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        profiles::table
            .filter(profiles::user_id.eq(auth_user_id.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_profile)
            .transpose()
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        profiles::table
            .find(*id.as_uuid())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_profile)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ProfileRow> = profiles::table
            .order(profiles::created_at.desc())
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_profile).collect()
    }

    async fn insert(&self, profile: &NewProfile) -> Result<Profile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewProfileRow {
            user_id: *profile.auth_user_id.as_uuid(),
            full_name: profile.full_name.as_ref(),
            email: profile.email.as_ref(),
            phone: profile.phone.as_deref(),
            role: profile.role.as_str(),
            created_by: profile.created_by.map(|id| *id.as_uuid()),
        };
        let stored: ProfileRow = diesel::insert_into(profiles::table)
            .values(&row)
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        row_to_profile(stored)
    }

    async fn update_admin(
        &self,
        id: &ProfileId,
        update: &ProfileAdminUpdate,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changeset = ProfileAdminChangeset {
            full_name: update.full_name.as_ref(),
            phone: update.phone.as_deref(),
            role: update.role.as_str(),
            is_active: update.is_active,
            updated_at: Utc::now(),
        };
        diesel::update(profiles::table.find(*id.as_uuid()))
            .set(&changeset)
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_profile)
            .transpose()
    }

    async fn update_contact(
        &self,
        id: &ProfileId,
        update: &ContactUpdate,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changeset = ContactChangeset {
            full_name: update.full_name.as_ref(),
            phone: update.phone.as_deref(),
            updated_at: Utc::now(),
        };
        diesel::update(profiles::table.find(*id.as_uuid()))
            .set(&changeset)
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_profile)
            .transpose()
    }
}
