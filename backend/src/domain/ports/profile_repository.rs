//! Port for staff profile persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AuthUserId, ContactUpdate, NewProfile, Profile, ProfileAdminUpdate, ProfileId, Role,
};

use super::define_port_error;
use super::identity_provider::{FIXTURE_ADMIN_EMAIL, FIXTURE_ADMIN_USER_ID};

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
        /// A profile already exists for the auth user.
        Duplicate { message: String } =>
            "profile already exists: {message}",
    }
}

/// Port for reading and writing `profiles` rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Profile linked to a hosted-auth user.
    async fn find_by_auth_user(
        &self,
        auth_user_id: &AuthUserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Profile by primary key.
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// All profiles, newest first.
    async fn list(&self) -> Result<Vec<Profile>, ProfileRepositoryError>;

    /// Insert a new profile and return the stored row.
    async fn insert(&self, profile: &NewProfile) -> Result<Profile, ProfileRepositoryError>;

    /// Apply an administrator edit. Returns `None` when the row is missing.
    async fn update_admin(
        &self,
        id: &ProfileId,
        update: &ProfileAdminUpdate,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Apply a self-service contact edit. Returns `None` when the row is
    /// missing.
    async fn update_contact(
        &self,
        id: &ProfileId,
        update: &ContactUpdate,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;
}

/// Primary key of the profile served by [`FixtureProfileRepository`].
pub const FIXTURE_ADMIN_PROFILE_ID: Uuid = Uuid::from_u128(0x9b2f_6a1c_4d3e_4f50_8a7b_1c2d3e4f5a6b);

/// The single development account: an active main administrator linked to
/// the fixture identity provider's user.
pub fn fixture_admin_profile() -> Profile {
    Profile {
        id: ProfileId::from_uuid(FIXTURE_ADMIN_PROFILE_ID),
        auth_user_id: AuthUserId::from_uuid(FIXTURE_ADMIN_USER_ID),
        full_name: "Development Admin".into(),
        email: FIXTURE_ADMIN_EMAIL.into(),
        phone: None,
        role: Role::MainAdmin,
        is_active: true,
        avatar_url: None,
        created_by: None,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        updated_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Fixture repository holding only [`fixture_admin_profile`]; writes are
/// rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find_by_auth_user(
        &self,
        auth_user_id: &AuthUserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok((auth_user_id.as_uuid() == &FIXTURE_ADMIN_USER_ID).then(fixture_admin_profile))
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok((id.as_uuid() == &FIXTURE_ADMIN_PROFILE_ID).then(fixture_admin_profile))
    }

    async fn list(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        Ok(vec![fixture_admin_profile()])
    }

    async fn insert(&self, _profile: &NewProfile) -> Result<Profile, ProfileRepositoryError> {
        Err(ProfileRepositoryError::connection("no profile store configured"))
    }

    async fn update_admin(
        &self,
        _id: &ProfileId,
        _update: &ProfileAdminUpdate,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Err(ProfileRepositoryError::connection("no profile store configured"))
    }

    async fn update_contact(
        &self,
        _id: &ProfileId,
        _update: &ContactUpdate,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Err(ProfileRepositoryError::connection("no profile store configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_resolves_only_the_development_admin() {
        let repo = FixtureProfileRepository;
        let admin = repo
            .find_by_auth_user(&AuthUserId::from_uuid(FIXTURE_ADMIN_USER_ID))
            .await
            .expect("fixture read");
        assert_eq!(admin.map(|p| p.role), Some(Role::MainAdmin));

        let other = repo
            .find_by_auth_user(&AuthUserId::random())
            .await
            .expect("fixture read");
        assert!(other.is_none());
    }
}
