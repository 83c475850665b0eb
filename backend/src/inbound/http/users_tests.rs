//! Tests for user administration handlers.

use super::*;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{
    FIXTURE_ADMIN_PROFILE_ID, MockIdentityProvider, MockProfileRepository, fixture_admin_profile,
};
use crate::domain::AuthUserId;
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{
    ports_for_role, sign_in, test_session_middleware, test_sign_in,
};

macro_rules! users_app {
    ($ports:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new($ports)))
                .wrap(test_session_middleware())
                .service(test_sign_in)
                .service(
                    web::scope("/api/v1")
                        .service(list_users)
                        .service(create_user)
                        .service(update_user)
                        .service(delete_user),
                ),
        )
        .await
    };
}

fn create_body(role: &str, password: &str) -> Value {
    json!({
        "email": "new.hire@example.com",
        "password": password,
        "fullName": "New Hire",
        "phone": "  ",
        "role": role,
    })
}

#[actix_web::test]
async fn main_admin_lists_profiles() {
    let app = users_app!(HttpStatePorts::fixtures());
    let cookie = sign_in(&app).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body[0]["id"], FIXTURE_ADMIN_PROFILE_ID.to_string());
    assert_eq!(body[0]["fullName"], "Development Admin");
    assert_eq!(body[0]["isActive"], true);
}

#[rstest]
#[case(Role::SecondAdmin)]
#[case(Role::Manager)]
#[case(Role::Staff)]
#[actix_web::test]
async fn roles_without_the_users_module_are_forbidden(#[case] role: Role) {
    let app = users_app!(ports_for_role(role));
    let cookie = sign_in(&app).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case(create_body("superuser", "longenough"), "role", "invalid_value")]
#[case(create_body("staff", "short"), "password", "too_short")]
#[actix_web::test]
async fn create_validates_the_body(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = users_app!(HttpStatePorts::fixtures());
    let cookie = sign_in(&app).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .cookie(cookie)
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn main_admin_cannot_be_assigned() {
    let app = users_app!(HttpStatePorts::fixtures());
    let cookie = sign_in(&app).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .cookie(cookie)
            .set_json(create_body("main_admin", "longenough"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn create_provisions_identity_then_profile() {
    let new_auth_user = AuthUserId::random();
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_create_user()
        .times(1)
        .returning(move |_, _, _| Ok(new_auth_user));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_auth_user()
        .returning(|_| Ok(Some(fixture_admin_profile())));
    profiles.expect_insert().times(1).returning(|new_profile| {
        let mut profile = fixture_admin_profile();
        profile.id = ProfileId::random();
        profile.auth_user_id = new_profile.auth_user_id;
        profile.full_name = new_profile.full_name.as_ref().to_owned();
        profile.email = new_profile.email.as_ref().to_owned();
        profile.phone = new_profile.phone.clone();
        profile.role = new_profile.role;
        profile.created_by = new_profile.created_by;
        Ok(profile)
    });

    let app = users_app!(HttpStatePorts {
        identity: Arc::new(identity),
        profiles: Arc::new(profiles),
        ..HttpStatePorts::fixtures()
    });
    let cookie = sign_in(&app).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .cookie(cookie)
            .set_json(create_body("staff", "longenough"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["email"], "new.hire@example.com");
    assert_eq!(body["role"], "staff");
    assert_eq!(body["phone"], Value::Null);
    assert_eq!(body["createdBy"], FIXTURE_ADMIN_PROFILE_ID.to_string());
}

#[actix_web::test]
async fn admins_cannot_delete_themselves() {
    let app = users_app!(HttpStatePorts::fixtures());
    let cookie = sign_in(&app).await;
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{FIXTURE_ADMIN_PROFILE_ID}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn malformed_ids_are_rejected() {
    let app = users_app!(HttpStatePorts::fixtures());
    let cookie = sign_in(&app).await;
    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/api/v1/users/not-a-uuid")
            .cookie(cookie)
            .set_json(json!({"fullName": "X", "role": "staff", "isActive": true}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_uuid");
}
