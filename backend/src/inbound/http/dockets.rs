//! Manifest docket handlers.
//!
//! ```text
//! GET /api/v1/dockets?status=open
//! POST /api/v1/dockets {"summaryNo":"S-1","docketNo":"D-1","station":"SYD","carrier":"QF","country":"Japan"}
//! POST /api/v1/dockets/{id}/close
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Docket, DocketDraft, DocketId, DocketStatus, Error, ModuleId, ProfileId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_text_enum, parse_uuid};

/// Docket as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocketResponse {
    #[schema(value_type = String)]
    pub id: DocketId,
    pub summary_no: String,
    pub date: NaiveDate,
    pub docket_no: String,
    pub station: String,
    pub carrier: String,
    pub flight_no: Option<String>,
    pub load_no: Option<String>,
    pub bags: i32,
    #[schema(value_type = String, example = "12.50")]
    pub weight: Decimal,
    pub country: String,
    #[schema(value_type = String, example = "open")]
    pub status: DocketStatus,
    #[schema(value_type = String)]
    pub created_by: ProfileId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Docket> for DocketResponse {
    fn from(docket: Docket) -> Self {
        Self {
            id: docket.id,
            summary_no: docket.summary_no,
            date: docket.date,
            docket_no: docket.docket_no,
            station: docket.station,
            carrier: docket.carrier,
            flight_no: docket.flight_no,
            load_no: docket.load_no,
            bags: docket.bags,
            weight: docket.weight,
            country: docket.country,
            status: docket.status,
            created_by: docket.created_by,
            created_at: docket.created_at,
            updated_at: docket.updated_at,
        }
    }
}

/// Request body for `POST /api/v1/dockets`.
///
/// `date` defaults to today, `bags` and `weight` to zero, `status` to open.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocketBody {
    pub summary_no: String,
    pub date: Option<NaiveDate>,
    pub docket_no: String,
    pub station: String,
    pub carrier: String,
    pub flight_no: Option<String>,
    pub load_no: Option<String>,
    pub bags: Option<i32>,
    #[schema(value_type = Option<String>, example = "12.5")]
    pub weight: Option<Decimal>,
    pub country: String,
    #[schema(example = "open")]
    pub status: Option<String>,
}

impl TryFrom<CreateDocketBody> for DocketDraft {
    type Error = Error;

    fn try_from(body: CreateDocketBody) -> Result<Self, Self::Error> {
        let status = body
            .status
            .as_deref()
            .map(|raw| parse_text_enum(raw, FieldName::new("status")))
            .transpose()?;
        Ok(Self {
            summary_no: body.summary_no,
            date: body.date,
            docket_no: body.docket_no,
            station: body.station,
            carrier: body.carrier,
            flight_no: body.flight_no,
            load_no: body.load_no,
            bags: body.bags,
            weight: body.weight,
            country: body.country,
            status,
        })
    }
}

/// Query for `GET /api/v1/dockets`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct DocketListQuery {
    /// `open` (default) or `closed`.
    pub status: Option<String>,
}

/// Dockets in one status: open newest-created first, closed most recently
/// closed first.
#[utoipa::path(
    get,
    path = "/api/v1/dockets",
    params(DocketListQuery),
    responses(
        (status = 200, description = "Dockets", body = [DocketResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Manifest module not enabled", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dockets"],
    operation_id = "listDockets"
)]
#[get("/dockets")]
pub async fn list_dockets(
    state: web::Data<HttpState>,
    caller: Caller,
    query: web::Query<DocketListQuery>,
) -> ApiResult<web::Json<Vec<DocketResponse>>> {
    caller.require_module(ModuleId::Manifest)?;
    let status = match query.status.as_deref() {
        Some(raw) => parse_text_enum(raw, FieldName::new("status"))?,
        None => DocketStatus::Open,
    };
    let dockets = state.dockets.list(status).await?;
    Ok(web::Json(dockets.into_iter().map(Into::into).collect()))
}

/// Record a new docket.
#[utoipa::path(
    post,
    path = "/api/v1/dockets",
    request_body = CreateDocketBody,
    responses(
        (status = 201, description = "Docket created", body = DocketResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Manifest module not enabled", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dockets"],
    operation_id = "createDocket"
)]
#[post("/dockets")]
pub async fn create_docket(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CreateDocketBody>,
) -> ApiResult<HttpResponse> {
    let context = caller.require_module(ModuleId::Manifest)?;
    let draft = DocketDraft::try_from(payload.into_inner())?;
    let docket = state.dockets.create(context, draft).await?;
    Ok(HttpResponse::Created().json(DocketResponse::from(docket)))
}

/// Close an open docket. Managers and administrators only.
#[utoipa::path(
    post,
    path = "/api/v1/dockets/{id}/close",
    params(("id" = String, Path, description = "Docket identifier")),
    responses(
        (status = 200, description = "Closed docket", body = DocketResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Already closed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dockets"],
    operation_id = "closeDocket"
)]
#[post("/dockets/{id}/close")]
pub async fn close_docket(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<DocketResponse>> {
    let context = caller.require_module(ModuleId::Manifest)?;
    let id = DocketId::from_uuid(parse_uuid(&path, FieldName::new("id"))?);
    let docket = state.dockets.close(context, id).await?;
    Ok(web::Json(docket.into()))
}
