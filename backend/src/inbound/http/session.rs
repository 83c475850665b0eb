//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie only ever holds the hosted-auth user id. Everything else about
//! the caller is rebuilt per request by [`super::access::Caller`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{AuthUserId, Error};

pub(crate) const AUTH_USER_KEY: &str = "auth_user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember the signed-in auth user; renews the session id.
    pub fn persist_auth_user(&self, id: &AuthUserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(AUTH_USER_KEY, id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in auth user, if any. A tampered value reads as absent.
    pub fn auth_user_id(&self) -> Result<Option<AuthUserId>, Error> {
        let raw = self
            .0
            .get::<String>(AUTH_USER_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match Uuid::parse_str(&value) {
            Ok(id) => Some(AuthUserId::from_uuid(id)),
            Err(error) => {
                warn!(%error, "invalid auth user id in session cookie");
                None
            }
        }))
    }

    /// Require a signed-in auth user or return `401 Unauthorized`.
    pub fn require_auth_user(&self) -> Result<AuthUserId, Error> {
        self.auth_user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop everything stored in the session cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
