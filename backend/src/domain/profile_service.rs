//! Self-service profile edits.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{IdentityProvider, ProfileRepository};
use crate::domain::session_service::{map_identity_error, map_profile_error};
use crate::domain::{AccessContext, ContactUpdate, Error, NewPassword, Profile};

/// Lets a signed-in user maintain their own name, phone, and password.
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { profiles, identity }
    }

    /// Update the caller's full name and phone.
    pub async fn update_contact(
        &self,
        caller: &AccessContext,
        update: ContactUpdate,
    ) -> Result<Profile, Error> {
        let id = caller.profile().id;
        self.profiles
            .update_contact(&id, &update)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found(format!("profile {id} not found")))
    }

    /// Replace the caller's password at the identity provider.
    pub async fn change_password(
        &self,
        caller: &AccessContext,
        password: NewPassword,
    ) -> Result<(), Error> {
        let profile = caller.profile();
        self.identity
            .update_password(&profile.auth_user_id, &password)
            .await
            .map_err(map_identity_error)?;
        info!(profile_id = %profile.id, "password changed");
        Ok(())
    }
}
