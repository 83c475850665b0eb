//! Staff account administration.
//!
//! Creating an account is two writes, an auth user at the identity provider
//! then a profile row, and they are not atomic: a failed profile insert
//! leaves an orphaned auth user, which is logged. Deleting goes through the
//! identity provider only; the profile row cascades from there.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::ports::{IdentityProvider, ProfileRepository};
use crate::domain::session_service::{map_identity_error, map_profile_error};
use crate::domain::{
    AccessContext, EmailAddress, Error, FullName, NewPassword, NewProfile, Profile,
    ProfileAdminUpdate, ProfileId, Role,
};

/// Validated input for provisioning a staff account.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: EmailAddress,
    pub password: NewPassword,
    pub full_name: FullName,
    pub phone: Option<String>,
    pub role: Role,
}

/// Lists, provisions, edits, and removes staff accounts.
#[derive(Clone)]
pub struct UserAdminService {
    profiles: Arc<dyn ProfileRepository>,
    identity: Arc<dyn IdentityProvider>,
}

fn ensure_can_assign(actor: &AccessContext, role: Role) -> Result<(), Error> {
    if actor.role().can_assign(role) {
        Ok(())
    } else {
        Err(Error::forbidden(format!(
            "role {} may not assign role {role}",
            actor.role()
        )))
    }
}

impl UserAdminService {
    pub fn new(profiles: Arc<dyn ProfileRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { profiles, identity }
    }

    /// Every profile, newest first.
    pub async fn list(&self) -> Result<Vec<Profile>, Error> {
        self.profiles.list().await.map_err(map_profile_error)
    }

    /// Provision an auth user and its profile.
    pub async fn create(
        &self,
        actor: &AccessContext,
        request: CreateUserRequest,
    ) -> Result<Profile, Error> {
        ensure_can_assign(actor, request.role)?;

        let auth_user_id = self
            .identity
            .create_user(&request.email, &request.password, request.full_name.as_ref())
            .await
            .map_err(map_identity_error)?;

        let new_profile = NewProfile {
            auth_user_id,
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            role: request.role,
            created_by: Some(actor.profile().id),
        };
        let profile = self
            .profiles
            .insert(&new_profile)
            .await
            .map_err(|err| {
                error!(
                    %auth_user_id,
                    error = %err,
                    "profile insert failed after auth user was created"
                );
                map_profile_error(err)
            })?;

        info!(
            profile_id = %profile.id,
            role = %profile.role,
            created_by = %actor.profile().id,
            "user account created"
        );
        Ok(profile)
    }

    /// Apply an administrator edit to another account.
    pub async fn update(
        &self,
        actor: &AccessContext,
        id: ProfileId,
        update: ProfileAdminUpdate,
    ) -> Result<Profile, Error> {
        let target = self.find(id).await?;
        if target.role == Role::MainAdmin && actor.role() != Role::MainAdmin {
            return Err(Error::forbidden("only the main administrator may edit that account"));
        }
        if update.role != target.role {
            ensure_can_assign(actor, target.role)?;
            ensure_can_assign(actor, update.role)?;
        }
        if target.id == actor.profile().id && !update.is_active {
            return Err(Error::invalid_request("you cannot deactivate your own account"));
        }

        let profile = self
            .profiles
            .update_admin(&id, &update)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
        info!(profile_id = %id, role = %profile.role, active = profile.is_active, "user updated");
        Ok(profile)
    }

    /// Delete an account through the identity provider.
    ///
    /// Callers may only delete accounts whose role they could assign.
    pub async fn delete(&self, actor: &AccessContext, id: ProfileId) -> Result<(), Error> {
        let target = self.find(id).await?;
        if target.id == actor.profile().id {
            return Err(Error::invalid_request("you cannot delete your own account"));
        }
        if target.role == Role::MainAdmin {
            return Err(Error::forbidden("the main administrator cannot be deleted"));
        }
        ensure_can_assign(actor, target.role)?;

        self.identity
            .delete_user(&target.auth_user_id)
            .await
            .map_err(map_identity_error)?;
        info!(profile_id = %id, deleted_by = %actor.profile().id, "user deleted");
        Ok(())
    }

    async fn find(&self, id: ProfileId) -> Result<Profile, Error> {
        self.profiles
            .find_by_id(&id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[cfg(test)]
#[path = "user_admin_service_tests.rs"]
mod tests;
