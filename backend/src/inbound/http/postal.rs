//! Postal-code helpers for the address forms.
//!
//! ```text
//! GET /api/v1/postal-codes/lookup?code=2000&country=Australia
//! GET /api/v1/postal-codes/validate?code=2000&country=Australia
//! POST /api/v1/postal-codes/autofill {"code":"2000","city":"","country":"Australia"}
//! ```
//!
//! Lookup failures are reported in the body with `200 OK`; the form shows
//! the message inline.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::postal::{has_pattern, is_valid_postal_code};
use crate::domain::{AddressFields, AutofillResult, PostalLookup};
use crate::inbound::http::access::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Query for `GET /api/v1/postal-codes/lookup`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LookupQuery {
    pub code: String,
    /// Country name used to retry a miss against a country-scoped lookup.
    pub country: Option<String>,
}

/// Query for `GET /api/v1/postal-codes/validate`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ValidateQuery {
    pub code: String,
    pub country: String,
}

#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostalLookupResponse {
    pub success: bool,
    pub city: Option<String>,
    pub country: Option<String>,
    /// One of `ZIP code too short`, `ZIP code not found`, or
    /// `Failed to lookup ZIP code`.
    pub error: Option<String>,
}

impl From<PostalLookup> for PostalLookupResponse {
    fn from(lookup: PostalLookup) -> Self {
        match lookup {
            PostalLookup::Found { city, country } => Self {
                success: true,
                city: Some(city),
                country: Some(country),
                error: None,
            },
            PostalLookup::Failed { error } => Self {
                error: Some(error),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostalValidationResponse {
    /// False only when the country has a known format and the code breaks it.
    pub valid: bool,
    pub has_pattern: bool,
}

/// Request body for `POST /api/v1/postal-codes/autofill`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AutofillBody {
    pub code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutofillResponse {
    pub lookup: PostalLookupResponse,
    pub city: String,
    pub country: String,
    pub city_filled: bool,
    pub country_filled: bool,
}

impl From<AutofillResult> for AutofillResponse {
    fn from(result: AutofillResult) -> Self {
        let AutofillResult { lookup, outcome } = result;
        Self {
            lookup: lookup.into(),
            city: outcome.fields.city,
            country: outcome.fields.country,
            city_filled: outcome.city_filled,
            country_filled: outcome.country_filled,
        }
    }
}

/// Resolve a postal code to a city and country.
#[utoipa::path(
    get,
    path = "/api/v1/postal-codes/lookup",
    params(LookupQuery),
    responses(
        (status = 200, description = "Lookup outcome", body = PostalLookupResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["postal"],
    operation_id = "lookupPostalCode"
)]
#[get("/postal-codes/lookup")]
pub async fn lookup_postal_code(
    state: web::Data<HttpState>,
    _caller: Caller,
    query: web::Query<LookupQuery>,
) -> web::Json<PostalLookupResponse> {
    let lookup = state
        .postal
        .lookup(&query.code, query.country.as_deref())
        .await;
    web::Json(lookup.into())
}

/// Check a postal code against the country's format.
#[utoipa::path(
    get,
    path = "/api/v1/postal-codes/validate",
    params(ValidateQuery),
    responses(
        (status = 200, description = "Validation outcome", body = PostalValidationResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["postal"],
    operation_id = "validatePostalCode"
)]
#[get("/postal-codes/validate")]
pub async fn validate_postal_code(
    _caller: Caller,
    query: web::Query<ValidateQuery>,
) -> web::Json<PostalValidationResponse> {
    web::Json(PostalValidationResponse {
        valid: is_valid_postal_code(&query.country, &query.code),
        has_pattern: has_pattern(&query.country),
    })
}

/// Look a code up and fill whichever of city and country are blank.
#[utoipa::path(
    post,
    path = "/api/v1/postal-codes/autofill",
    request_body = AutofillBody,
    responses(
        (status = 200, description = "Merged address fields", body = AutofillResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["postal"],
    operation_id = "autofillAddress"
)]
#[post("/postal-codes/autofill")]
pub async fn autofill_address(
    state: web::Data<HttpState>,
    _caller: Caller,
    payload: web::Json<AutofillBody>,
) -> web::Json<AutofillResponse> {
    let AutofillBody {
        code,
        city,
        country,
    } = payload.into_inner();
    let result = state
        .postal
        .autofill(&code, AddressFields { city, country })
        .await;
    web::Json(result.into())
}
