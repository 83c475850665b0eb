//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, get, test};

use crate::domain::ports::{FIXTURE_ADMIN_USER_ID, MockProfileRepository, fixture_admin_profile};
use crate::domain::{AuthUserId, Error, Role};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpStatePorts;

/// Path of [`test_sign_in`].
pub const TEST_SIGN_IN_PATH: &str = "/__test/sign-in";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Signs the fixture auth user in without going through the identity port.
#[get("/__test/sign-in")]
pub async fn test_sign_in(session: SessionContext) -> Result<HttpResponse, Error> {
    session.persist_auth_user(&AuthUserId::from_uuid(FIXTURE_ADMIN_USER_ID))?;
    Ok(HttpResponse::Ok().finish())
}

/// Call [`test_sign_in`] and return the resulting cookie.
pub async fn sign_in<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::get().uri(TEST_SIGN_IN_PATH).to_request(),
    )
    .await;
    assert!(res.status().is_success(), "test sign-in failed");
    session_cookie(&res)
}

/// Fixture ports whose signed-in caller holds `role`.
///
/// Permissions come from the static fallback table because the fixture
/// permission store is unavailable; `main_admin` always sees every module.
pub fn ports_for_role(role: Role) -> HttpStatePorts {
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_auth_user().returning(move |_| {
        let mut profile = fixture_admin_profile();
        profile.role = role;
        Ok(Some(profile))
    });
    HttpStatePorts {
        profiles: Arc::new(profiles),
        ..HttpStatePorts::fixtures()
    }
}
