//! Finance placeholder handler.
//!
//! ```text
//! GET /api/v1/finance
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{FinanceOverview, ModuleId, PlannedFeature};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::Caller;
use crate::inbound::http::schemas::ErrorSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PlannedFeatureResponse {
    #[schema(example = "Revenue Tracking")]
    pub title: String,
    pub summary: String,
    #[schema(example = "$0.00")]
    pub placeholder: String,
}

impl From<&PlannedFeature> for PlannedFeatureResponse {
    fn from(feature: &PlannedFeature) -> Self {
        Self {
            title: feature.title.to_owned(),
            summary: feature.summary.to_owned(),
            placeholder: feature.placeholder.to_owned(),
        }
    }
}

/// What the finance module will offer once released.
#[derive(Debug, Serialize, ToSchema)]
pub struct FinanceOverviewResponse {
    #[schema(example = "early_access")]
    pub status: String,
    pub notice: String,
    pub features: Vec<PlannedFeatureResponse>,
}

impl From<FinanceOverview> for FinanceOverviewResponse {
    fn from(overview: FinanceOverview) -> Self {
        Self {
            status: overview.status.to_owned(),
            notice: overview.notice.to_owned(),
            features: overview.features.iter().map(Into::into).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/finance",
    responses(
        (status = 200, description = "Finance overview", body = FinanceOverviewResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Finance module not enabled", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "getFinanceOverview"
)]
#[get("/finance")]
pub async fn finance_overview(caller: Caller) -> ApiResult<web::Json<FinanceOverviewResponse>> {
    caller.require_module(ModuleId::Finance)?;
    Ok(web::Json(FinanceOverview::early_access().into()))
}
