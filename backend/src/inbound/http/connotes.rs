//! Connote handlers.
//!
//! ```text
//! GET /api/v1/connotes?search=acme
//! POST /api/v1/connotes
//! GET /api/v1/connotes/{id}
//! GET /api/v1/connotes/{id}/invoice
//! PUT /api/v1/connotes/{id}/status {"status":"in_transit"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{ConnoteDraft, ConnoteFilter, ConnoteId, ConnoteStatus, Error, ModuleId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_text_enum, parse_uuid};

pub use super::connotes_dto::{
    ChargesDto, ConnoteResponse, CreateConnoteBody, InvoiceLineDto, InvoicePartyDto,
    InvoiceResponse, PartyDto, SetStatusBody,
};

/// Query for `GET /api/v1/connotes`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ConnoteListQuery {
    /// Case-insensitive match on AWB, shipper name, or consignee name.
    pub search: Option<String>,
}

fn parse_connote_id(raw: &str) -> Result<ConnoteId, Error> {
    parse_uuid(raw, FieldName::new("id")).map(ConnoteId::from_uuid)
}

/// List connotes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/connotes",
    params(ConnoteListQuery),
    responses(
        (status = 200, description = "Connotes", body = [ConnoteResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Connotes module not enabled", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["connotes"],
    operation_id = "listConnotes"
)]
#[get("/connotes")]
pub async fn list_connotes(
    state: web::Data<HttpState>,
    caller: Caller,
    query: web::Query<ConnoteListQuery>,
) -> ApiResult<web::Json<Vec<ConnoteResponse>>> {
    caller.require_module(ModuleId::Connotes)?;
    let filter = ConnoteFilter::new(query.search.as_deref());
    let connotes = state.connotes.list(&filter).await?;
    Ok(web::Json(connotes.into_iter().map(Into::into).collect()))
}

/// Create a connote. The stored total is the sum of the charge lines.
#[utoipa::path(
    post,
    path = "/api/v1/connotes",
    request_body = CreateConnoteBody,
    responses(
        (status = 201, description = "Connote created", body = ConnoteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Connotes module not enabled", body = ErrorSchema),
        (status = 409, description = "AWB number already exists", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["connotes"],
    operation_id = "createConnote"
)]
#[post("/connotes")]
pub async fn create_connote(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CreateConnoteBody>,
) -> ApiResult<HttpResponse> {
    let context = caller.require_module(ModuleId::Connotes)?;
    let draft = ConnoteDraft::try_from(payload.into_inner())?;
    let connote = state.connotes.create(context, draft).await?;
    Ok(HttpResponse::Created().json(ConnoteResponse::from(connote)))
}

#[utoipa::path(
    get,
    path = "/api/v1/connotes/{id}",
    params(("id" = String, Path, description = "Connote identifier")),
    responses(
        (status = 200, description = "Connote", body = ConnoteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Connotes module not enabled", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["connotes"],
    operation_id = "getConnote"
)]
#[get("/connotes/{id}")]
pub async fn get_connote(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<ConnoteResponse>> {
    caller.require_module(ModuleId::Connotes)?;
    let connote = state.connotes.get(parse_connote_id(&path)?).await?;
    Ok(web::Json(connote.into()))
}

/// Printable invoice view of a connote.
#[utoipa::path(
    get,
    path = "/api/v1/connotes/{id}/invoice",
    params(("id" = String, Path, description = "Connote identifier")),
    responses(
        (status = 200, description = "Invoice", body = InvoiceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Connotes module not enabled", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["connotes"],
    operation_id = "getConnoteInvoice"
)]
#[get("/connotes/{id}/invoice")]
pub async fn get_invoice(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<InvoiceResponse>> {
    caller.require_module(ModuleId::Connotes)?;
    let invoice = state.connotes.invoice(parse_connote_id(&path)?).await?;
    Ok(web::Json(invoice.into()))
}

/// Overwrite a connote's status. Transitions are unrestricted.
#[utoipa::path(
    put,
    path = "/api/v1/connotes/{id}/status",
    params(("id" = String, Path, description = "Connote identifier")),
    request_body = SetStatusBody,
    responses(
        (status = 200, description = "Updated connote", body = ConnoteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Connotes module not enabled", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["connotes"],
    operation_id = "setConnoteStatus"
)]
#[put("/connotes/{id}/status")]
pub async fn set_connote_status(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<SetStatusBody>,
) -> ApiResult<web::Json<ConnoteResponse>> {
    let context = caller.require_module(ModuleId::Connotes)?;
    let id = parse_connote_id(&path)?;
    let status: ConnoteStatus = parse_text_enum(&payload.status, FieldName::new("status"))?;
    let connote = state.connotes.set_status(context, id, status).await?;
    Ok(web::Json(connote.into()))
}

#[cfg(test)]
#[path = "connotes_tests.rs"]
mod tests;
