//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services that orchestrate them over the
//! driven ports in [`ports`]. Keep types immutable and document invariants
//! in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - AccessContext — the caller's profile plus resolved module permissions.
//! - Connote, Docket, TrackingEvent — shipment records.
//! - The `*Service` types — use cases invoked by the inbound adapters.

mod value_macros;

pub mod access;
pub mod auth;
pub mod connote;
pub mod connote_service;
pub mod dashboard;
pub mod dashboard_service;
pub mod docket;
pub mod docket_service;
pub mod error;
pub mod field_error;
pub mod finance;
pub mod invoice;
pub mod permission_service;
pub mod permissions;
pub mod ports;
pub mod postal;
pub mod postal_lookup_service;
pub mod profile;
pub mod profile_service;
pub mod role;
pub mod session_service;
pub mod trace_id;
pub mod tracking;
pub mod tracking_service;
pub mod user_admin_service;

#[cfg(test)]
pub(crate) mod service_fixtures;

pub use self::access::{AccessContext, NavigationEntry};
pub use self::auth::{
    LoginCredentials, LoginValidationError, NewPassword, PASSWORD_MIN_LEN, PasswordValidationError,
};
pub use self::connote::{
    Charges, Connote, ConnoteDraft, ConnoteFilter, ConnoteId, ConnoteStatus, DEFAULT_CURRENCY,
    NewConnote, ParseConnoteStatusError, ParseServiceTypeError, ParseShipmentTypeError, Party,
    PartyKind, ServiceType, ShipmentType,
};
pub use self::connote_service::ConnoteService;
pub use self::dashboard::DashboardSummary;
pub use self::dashboard_service::DashboardService;
pub use self::docket::{
    Docket, DocketDraft, DocketId, DocketStatus, NewDocket, ParseDocketStatusError,
    sort_for_listing,
};
pub use self::docket_service::DocketService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::field_error::FieldError;
pub use self::finance::{FinanceOverview, PlannedFeature};
pub use self::invoice::{Invoice, InvoiceLine, InvoiceParty};
pub use self::permission_service::PermissionService;
pub use self::permissions::{
    PermissionMatrix, PermissionSource, ResolvedPermissions, RolePermission,
    default_permission_matrix, fallback_modules,
};
pub use self::postal::{AddressFields, AutofillOutcome, PostalLookup, PostalPlace};
pub use self::postal_lookup_service::{AutofillResult, PostalLookupService};
pub use self::profile::{
    AuthUserId, ContactUpdate, EmailAddress, FullName, NewProfile, Profile, ProfileAdminUpdate,
    ProfileId, ProfileValidationError, normalise_phone,
};
pub use self::profile_service::ProfileService;
pub use self::role::{ModuleId, ParseModuleIdError, ParseRoleError, Role};
pub use self::session_service::SessionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::tracking::{NewTrackingEvent, ShipmentTrace, TrackingEvent, TrackingEventId};
pub use self::tracking_service::{TrackingEventDraft, TrackingService};
pub use self::user_admin_service::{CreateUserRequest, UserAdminService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use docketsync::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
