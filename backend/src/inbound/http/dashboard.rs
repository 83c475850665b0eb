//! Dashboard handler.
//!
//! ```text
//! GET /api/v1/dashboard
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{DashboardSummary, ModuleId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Headline counts for the dashboard tiles.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryResponse {
    pub total_connotes: i64,
    pub open_dockets: i64,
    pub in_transit: i64,
    /// Delivered since midnight UTC.
    pub delivered_today: i64,
}

impl From<DashboardSummary> for DashboardSummaryResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_connotes: summary.total_connotes,
            open_dockets: summary.open_dockets,
            in_transit: summary.in_transit,
            delivered_today: summary.delivered_today,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard counts", body = DashboardSummaryResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Dashboard module not enabled", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn dashboard_summary(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<DashboardSummaryResponse>> {
    caller.require_module(ModuleId::Dashboard)?;
    let summary = state.dashboard.summary().await?;
    Ok(web::Json(summary.into()))
}
