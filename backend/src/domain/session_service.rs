//! Sign-in and per-request access resolution.
//!
//! The session cookie only stores the hosted-auth user id. Every request
//! re-derives the caller's [`AccessContext`] from it, so role changes and
//! deactivation take effect on the next request.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{AccessContext, AuthUserId, Error, LoginCredentials, PermissionService};

pub(crate) fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredentials => {
            Error::unauthorized("invalid email or password")
        }
        IdentityProviderError::UnknownUser => Error::not_found("auth user not found"),
        IdentityProviderError::Rejected { message } => Error::invalid_request(message),
        IdentityProviderError::Connection { message }
        | IdentityProviderError::Timeout { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        IdentityProviderError::Decode { message } => {
            Error::internal(format!("identity provider error: {message}"))
        }
    }
}

pub(crate) fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
        ProfileRepositoryError::Duplicate { message } => {
            Error::conflict(format!("profile already exists: {message}"))
        }
    }
}

/// Authenticates callers and builds their access context.
#[derive(Clone)]
pub struct SessionService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    permissions: PermissionService,
}

impl SessionService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        permissions: PermissionService,
    ) -> Self {
        Self {
            identity,
            profiles,
            permissions,
        }
    }

    /// Verify credentials and return the caller's access context.
    ///
    /// A valid credential pair without an active profile does not sign in.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AccessContext, Error> {
        let auth_user_id = self
            .identity
            .sign_in(credentials)
            .await
            .map_err(map_identity_error)?;
        let context = self.access_context(&auth_user_id).await?;
        info!(
            profile_id = %context.profile().id,
            role = %context.role(),
            "user signed in"
        );
        Ok(context)
    }

    /// Rebuild the access context for a signed-in auth user.
    pub async fn access_context(&self, auth_user_id: &AuthUserId) -> Result<AccessContext, Error> {
        let profile = self
            .profiles
            .find_by_auth_user(auth_user_id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| {
                debug!(%auth_user_id, "no profile for auth user");
                Error::unauthorized("no profile for the signed-in user")
            })?;
        if !profile.is_active {
            return Err(Error::forbidden("account is inactive"));
        }

        let permissions = self.permissions.resolve(profile.role).await;
        Ok(AccessContext::new(profile, permissions))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        MockIdentityProvider, MockProfileRepository, MockRolePermissionRepository,
    };
    use crate::domain::{ErrorCode, ModuleId, Profile, ProfileId, Role};
    use chrono::Utc;
    use rstest::rstest;

    fn profile(auth_user_id: AuthUserId, role: Role, is_active: bool) -> Profile {
        Profile {
            id: ProfileId::random(),
            auth_user_id,
            full_name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            phone: None,
            role,
            is_active,
            avatar_url: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        identity: MockIdentityProvider,
        profiles: MockProfileRepository,
        permissions: MockRolePermissionRepository,
    ) -> SessionService {
        SessionService::new(
            Arc::new(identity),
            Arc::new(profiles),
            PermissionService::new(Arc::new(permissions)),
        )
    }

    fn credentials() -> LoginCredentials {
        LoginCredentials::try_from_parts("grace@example.com", "cobol-rules").expect("valid")
    }

    #[tokio::test]
    async fn login_builds_context_for_active_profile() {
        let auth_user_id = AuthUserId::random();
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_in()
            .times(1)
            .return_once(move |_| Ok(auth_user_id));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_auth_user()
            .withf(move |id| *id == auth_user_id)
            .times(1)
            .return_once(move |id| Ok(Some(profile(*id, Role::Staff, true))));
        let mut permissions = MockRolePermissionRepository::new();
        permissions
            .expect_list_for_role()
            .times(1)
            .return_once(|_| Err(crate::domain::ports::RolePermissionRepositoryError::query("x")));

        let context = service(identity, profiles, permissions)
            .login(&credentials())
            .await
            .expect("login succeeds");

        assert_eq!(context.role(), Role::Staff);
        assert!(context.permissions().is_fallback());
        assert!(context.has_module_access(ModuleId::Tracking));
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_in()
            .times(1)
            .return_once(|_| Err(IdentityProviderError::invalid_credentials()));
        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_by_auth_user().never();

        let error = service(identity, profiles, MockRolePermissionRepository::new())
            .login(&credentials())
            .await
            .expect_err("login fails");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case::missing(None, ErrorCode::Unauthorized)]
    #[case::inactive(Some(false), ErrorCode::Forbidden)]
    #[tokio::test]
    async fn access_requires_active_profile(
        #[case] active: Option<bool>,
        #[case] expected: ErrorCode,
    ) {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_auth_user()
            .times(1)
            .return_once(move |id| Ok(active.map(|flag| profile(*id, Role::Manager, flag))));
        let mut permissions = MockRolePermissionRepository::new();
        permissions.expect_list_for_role().never();

        let error = service(MockIdentityProvider::new(), profiles, permissions)
            .access_context(&AuthUserId::random())
            .await
            .expect_err("access denied");

        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[case(IdentityProviderError::timeout("slow"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityProviderError::rejected("weak password"), ErrorCode::InvalidRequest)]
    #[case(IdentityProviderError::unknown_user(), ErrorCode::NotFound)]
    #[case(IdentityProviderError::decode("bad json"), ErrorCode::InternalError)]
    fn identity_errors_map_to_domain_codes(
        #[case] error: IdentityProviderError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_identity_error(error).code(), expected);
    }
}
