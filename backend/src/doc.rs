//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http` plus the error
//! envelope schemas ([`ErrorSchema`], [`ErrorCodeSchema`]) that stand in for
//! the framework-agnostic domain types. The session cookie is declared as
//! the global security scheme.
//!
//! Swagger UI serves the document in debug builds; `cargo run --bin
//! openapi-dump` prints it for client generation.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the DocketSync API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "DocketSync API",
        description = "Shipment administration: dockets, connotes, tracking, users, and role permissions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::auth::update_current_user,
        crate::inbound::http::auth::change_password,
        crate::inbound::http::dashboard::dashboard_summary,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::permissions::list_permissions,
        crate::inbound::http::permissions::toggle_permission,
        crate::inbound::http::dockets::list_dockets,
        crate::inbound::http::dockets::create_docket,
        crate::inbound::http::dockets::close_docket,
        crate::inbound::http::connotes::list_connotes,
        crate::inbound::http::connotes::create_connote,
        crate::inbound::http::connotes::get_connote,
        crate::inbound::http::connotes::get_invoice,
        crate::inbound::http::connotes::set_connote_status,
        crate::inbound::http::tracking::track_shipment,
        crate::inbound::http::tracking::record_event,
        crate::inbound::http::postal::lookup_postal_code,
        crate::inbound::http::postal::validate_postal_code,
        crate::inbound::http::postal::autofill_address,
        crate::inbound::http::finance::finance_overview,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "auth", description = "Sign-in, sign-out, and the caller's own profile"),
        (name = "dashboard", description = "Headline shipment counts"),
        (name = "users", description = "User administration"),
        (name = "permissions", description = "Role to module permission matrix"),
        (name = "dockets", description = "Manifest dockets"),
        (name = "connotes", description = "Consignment notes and invoices"),
        (name = "tracking", description = "Shipment history"),
        (name = "postal", description = "Postal-code lookup and validation"),
        (name = "finance", description = "Finance module preview"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
