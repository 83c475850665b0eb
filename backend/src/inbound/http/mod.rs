//! HTTP inbound adapter exposing REST endpoints.
//!
//! [`configure_api`] registers every `/api/v1` handler; the server binary
//! mounts it under the session middleware.

use actix_web::web;

pub mod access;
pub mod auth;
pub mod connotes;
mod connotes_dto;
pub mod dashboard;
pub mod dockets;
pub mod error;
pub mod finance;
pub mod health;
pub mod permissions;
pub mod postal;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tracking;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the `/api/v1` handlers on a scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use docketsync::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(auth::current_user)
        .service(auth::update_current_user)
        .service(auth::change_password)
        .service(dashboard::dashboard_summary)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(permissions::list_permissions)
        .service(permissions::toggle_permission)
        .service(dockets::list_dockets)
        .service(dockets::create_docket)
        .service(dockets::close_docket)
        .service(connotes::list_connotes)
        .service(connotes::create_connote)
        .service(connotes::get_invoice)
        .service(connotes::get_connote)
        .service(connotes::set_connote_status)
        .service(tracking::track_shipment)
        .service(tracking::record_event)
        .service(postal::lookup_postal_code)
        .service(postal::validate_postal_code)
        .service(postal::autofill_address)
        .service(finance::finance_overview);
}
