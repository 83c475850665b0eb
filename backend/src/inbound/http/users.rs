//! User administration handlers.
//!
//! ```text
//! GET /api/v1/users
//! POST /api/v1/users {"email":"ops@example.com","password":"...","fullName":"Ops","role":"staff"}
//! PATCH /api/v1/users/{id} {"fullName":"Ops","role":"manager","isActive":true}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Every route needs the `users` module and an administrator role.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AccessContext, CreateUserRequest, EmailAddress, Error, FullName, ModuleId, NewPassword,
    Profile, ProfileAdminUpdate, ProfileId, Role, normalise_phone,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_password_error, map_profile_error, parse_text_enum, parse_uuid,
};

/// Staff profile as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: ProfileId,
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub phone: Option<String>,
    #[schema(value_type = String, example = "manager")]
    pub role: Role,
    pub is_active: bool,
    pub avatar_url: Option<String>,
    #[schema(value_type = Option<String>)]
    pub created_by: Option<ProfileId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name,
            email: profile.email,
            phone: profile.phone,
            role: profile.role,
            is_active: profile.is_active,
            avatar_url: profile.avatar_url,
            created_by: profile.created_by,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    #[schema(example = "staff")]
    pub role: String,
}

impl TryFrom<CreateUserBody> for CreateUserRequest {
    type Error = Error;

    fn try_from(body: CreateUserBody) -> Result<Self, Self::Error> {
        Ok(Self {
            email: EmailAddress::new(&body.email).map_err(map_profile_error)?,
            password: NewPassword::new(&body.password).map_err(map_password_error)?,
            full_name: FullName::new(&body.full_name).map_err(map_profile_error)?,
            phone: normalise_phone(body.phone.as_deref()).map_err(map_profile_error)?,
            role: parse_text_enum(&body.role, FieldName::new("role"))?,
        })
    }
}

/// Request body for `PATCH /api/v1/users/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub full_name: String,
    pub phone: Option<String>,
    #[schema(example = "manager")]
    pub role: String,
    pub is_active: bool,
}

impl TryFrom<UpdateUserBody> for ProfileAdminUpdate {
    type Error = Error;

    fn try_from(body: UpdateUserBody) -> Result<Self, Self::Error> {
        Ok(Self {
            full_name: FullName::new(&body.full_name).map_err(map_profile_error)?,
            phone: normalise_phone(body.phone.as_deref()).map_err(map_profile_error)?,
            role: parse_text_enum(&body.role, FieldName::new("role"))?,
            is_active: body.is_active,
        })
    }
}

fn require_user_admin(caller: &Caller) -> Result<&AccessContext, Error> {
    let context = caller.require_module(ModuleId::Users)?;
    context.require_role(Role::can_manage_users, "manage user accounts")?;
    Ok(context)
}

fn parse_profile_id(raw: &str) -> Result<ProfileId, Error> {
    parse_uuid(raw, FieldName::new("id")).map(ProfileId::from_uuid)
}

/// List every staff profile, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [ProfileResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<ProfileResponse>>> {
    require_user_admin(&caller)?;
    let profiles = state.users.list().await?;
    Ok(web::Json(profiles.into_iter().map(Into::into).collect()))
}

/// Provision a hosted-auth account and its profile.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Auth service or database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let context = require_user_admin(&caller)?;
    let request = CreateUserRequest::try_from(payload.into_inner())?;
    let profile = state.users.create(context, request).await?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(profile)))
}

/// Edit another account's name, phone, role, or active flag.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "Profile identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated user", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let context = require_user_admin(&caller)?;
    let id = parse_profile_id(&path)?;
    let update = ProfileAdminUpdate::try_from(payload.into_inner())?;
    let profile = state.users.update(context, id, update).await?;
    Ok(web::Json(profile.into()))
}

/// Delete an account; its profile row cascades.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "Profile identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let context = require_user_admin(&caller)?;
    let id = parse_profile_id(&path)?;
    state.users.delete(context, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
