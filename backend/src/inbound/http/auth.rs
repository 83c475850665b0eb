//! Session and self-service account handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"ops@example.com","password":"..."}
//! POST /api/v1/logout
//! GET /api/v1/me
//! PATCH /api/v1/me {"fullName":"Ada Lovelace","phone":"+44 20 7946 0000"}
//! POST /api/v1/me/password {"password":"...","confirmPassword":"..."}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AccessContext, ContactUpdate, FullName, LoginCredentials, ModuleId, NavigationEntry,
    NewPassword, PermissionSource, normalise_phone,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::ProfileResponse;
use crate::inbound::http::validation::{map_login_error, map_password_error, map_profile_error};

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// One sidebar entry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    #[schema(example = "connotes")]
    pub module: String,
    #[schema(example = "Connotes")]
    pub title: String,
    #[schema(example = "/connotes")]
    pub route: String,
}

impl From<NavigationEntry> for NavigationItem {
    fn from(entry: NavigationEntry) -> Self {
        Self {
            module: entry.module.to_string(),
            title: entry.title.to_owned(),
            route: entry.route.to_owned(),
        }
    }
}

/// The signed-in caller as the client shell needs it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub profile: ProfileResponse,
    /// Visible modules, in navigation order.
    pub modules: Vec<String>,
    pub navigation: Vec<NavigationItem>,
    /// `builtin`, `stored`, or `fallback`.
    #[schema(example = "stored")]
    pub permission_source: String,
    /// Set when stored permissions could not be read.
    pub permission_notice: Option<String>,
}

impl From<&AccessContext> for MeResponse {
    fn from(context: &AccessContext) -> Self {
        let (permission_source, permission_notice) = match context.permissions().source() {
            PermissionSource::Builtin => ("builtin", None),
            PermissionSource::Stored => ("stored", None),
            PermissionSource::Fallback { reason } => ("fallback", Some(reason.clone())),
        };
        let navigation: Vec<NavigationItem> =
            context.navigation().into_iter().map(Into::into).collect();
        Self {
            profile: ProfileResponse::from(context.profile().clone()),
            modules: navigation.iter().map(|item| item.module.clone()).collect(),
            navigation,
            permission_source: permission_source.to_owned(),
            permission_notice,
        }
    }
}

/// Contact details the caller may edit on their own profile.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeRequest {
    pub full_name: String,
    pub phone: Option<String>,
}

/// New password with confirmation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

/// Authenticate against the hosted auth service and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = MeResponse, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials or no active profile", body = ErrorSchema),
        (status = 503, description = "Auth service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<MeResponse>> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_login_error)?;
    let context = state.sessions.login(&credentials).await?;
    session.persist_auth_user(&context.profile().auth_user_id)?;
    Ok(web::Json(MeResponse::from(&context)))
}

/// Drop the session cookie. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Current profile, visible modules, and navigation.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Signed-in caller", body = MeResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(caller: Caller) -> web::Json<MeResponse> {
    web::Json(MeResponse::from(&*caller))
}

/// Update the caller's own name and phone.
#[utoipa::path(
    patch,
    path = "/api/v1/me",
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Settings module not enabled", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "updateCurrentUser"
)]
#[patch("/me")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<UpdateMeRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let context = caller.require_module(ModuleId::Settings)?;
    let payload = payload.into_inner();
    let update = ContactUpdate {
        full_name: FullName::new(&payload.full_name).map_err(map_profile_error)?,
        phone: normalise_phone(payload.phone.as_deref()).map_err(map_profile_error)?,
    };
    let profile = state.profile.update_contact(context, update).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Change the caller's own password.
#[utoipa::path(
    post,
    path = "/api/v1/me/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Settings module not enabled", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "changePassword"
)]
#[post("/me/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let context = caller.require_module(ModuleId::Settings)?;
    let password = NewPassword::confirmed(&payload.password, &payload.confirm_password)
        .map_err(map_password_error)?;
    state.profile.change_password(context, password).await?;
    Ok(HttpResponse::NoContent().finish())
}
