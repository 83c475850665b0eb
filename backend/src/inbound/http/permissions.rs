//! Role permission administration. Main administrator only.
//!
//! ```text
//! GET /api/v1/permissions
//! POST /api/v1/permissions/{role}/{module}/toggle
//! ```

use actix_web::{get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, ModuleId, PermissionMatrix, Role, RolePermission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_text_enum};

/// One `(role, module)` cell.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionResponse {
    #[schema(value_type = String, example = "manager")]
    pub role: Role,
    #[schema(value_type = String, example = "finance")]
    pub module: ModuleId,
    pub enabled: bool,
}

impl From<RolePermission> for RolePermissionResponse {
    fn from(row: RolePermission) -> Self {
        Self {
            role: row.role,
            module: row.module,
            enabled: row.enabled,
        }
    }
}

/// The full grid shown on the permissions screen.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionMatrixResponse {
    /// True when this request wrote the default rows into an empty table.
    pub seeded: bool,
    #[schema(value_type = Vec<String>)]
    pub roles: Vec<Role>,
    #[schema(value_type = Vec<String>)]
    pub modules: Vec<ModuleId>,
    pub rows: Vec<RolePermissionResponse>,
}

impl From<PermissionMatrix> for PermissionMatrixResponse {
    fn from(matrix: PermissionMatrix) -> Self {
        Self {
            seeded: matrix.seeded(),
            roles: Role::ALL.to_vec(),
            modules: ModuleId::ALL.to_vec(),
            rows: matrix.rows().iter().copied().map(Into::into).collect(),
        }
    }
}

fn require_main_admin(caller: &Caller) -> Result<(), Error> {
    caller.require_role(|role| role == Role::MainAdmin, "manage role permissions")
}

/// Read the permission table, seeding defaults when it is empty.
#[utoipa::path(
    get,
    path = "/api/v1/permissions",
    responses(
        (status = 200, description = "Permission matrix", body = PermissionMatrixResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Permission store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["permissions"],
    operation_id = "listPermissions"
)]
#[get("/permissions")]
pub async fn list_permissions(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<PermissionMatrixResponse>> {
    require_main_admin(&caller)?;
    let matrix = state.permissions.matrix().await?;
    Ok(web::Json(matrix.into()))
}

/// Flip one cell; a missing cell is inserted enabled.
#[utoipa::path(
    post,
    path = "/api/v1/permissions/{role}/{module}/toggle",
    params(
        ("role" = String, Path, description = "Role to edit"),
        ("module" = String, Path, description = "Module to flip")
    ),
    responses(
        (status = 200, description = "Updated cell", body = RolePermissionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Permission store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["permissions"],
    operation_id = "togglePermission"
)]
#[post("/permissions/{role}/{module}/toggle")]
pub async fn toggle_permission(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<RolePermissionResponse>> {
    require_main_admin(&caller)?;
    let (role, module) = path.into_inner();
    let role: Role = parse_text_enum(&role, FieldName::new("role"))?;
    let module: ModuleId = parse_text_enum(&module, FieldName::new("module"))?;
    let row = state.permissions.toggle(role, module).await?;
    Ok(web::Json(row.into()))
}
