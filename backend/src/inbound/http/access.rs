//! Request-scoped caller extraction.
//!
//! Handlers that need an authenticated caller take a [`Caller`] argument.
//! Extraction reads the auth user id from the session cookie and asks the
//! session service for a fresh [`AccessContext`], so a role change or
//! deactivation applies from the very next request.

use std::ops::Deref;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccessContext, Error, ModuleId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Authenticated, active caller with resolved module permissions.
#[derive(Debug, Clone)]
pub struct Caller(AccessContext);

impl Caller {
    /// Reject unless `module` is visible to the caller.
    pub fn require_module(&self, module: ModuleId) -> Result<&AccessContext, Error> {
        self.0.require_module(module)?;
        Ok(&self.0)
    }

    pub fn into_inner(self) -> AccessContext {
        self.0
    }
}

impl Deref for Caller {
    type Target = AccessContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Caller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let session = session.await?;
            let auth_user_id = session.require_auth_user()?;
            let context = state.sessions.access_context(&auth_user_id).await?;
            Ok(Caller(context))
        })
    }
}
