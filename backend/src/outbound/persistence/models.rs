//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{connotes, dockets, profiles, role_permissions, tracking_history};

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub avatar_url: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for provisioning a profile.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub user_id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
    pub created_by: Option<Uuid>,
}

/// Changeset for administrator edits.
///
/// `phone` is written even when `None` so clearing it sticks.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileAdminChangeset<'a> {
    pub full_name: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for self-service contact edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactChangeset<'a> {
    pub full_name: &'a str,
    pub phone: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Role permissions
// ---------------------------------------------------------------------------

/// Row struct for reading from the role_permissions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = role_permissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RolePermissionRow {
    pub role: String,
    pub module_id: String,
    pub enabled: bool,
}

/// Insertable struct for upserting by `(role, module_id)`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = role_permissions)]
pub(crate) struct NewRolePermissionRow<'a> {
    pub role: &'a str,
    pub module_id: &'a str,
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Dockets
// ---------------------------------------------------------------------------

/// Row struct for reading from the dockets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dockets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocketRow {
    pub id: Uuid,
    pub summary_no: String,
    pub date: NaiveDate,
    pub docket_no: String,
    pub station: String,
    pub carrier: String,
    pub flight_no: Option<String>,
    pub load_no: Option<String>,
    pub bags: i32,
    pub weight: Decimal,
    pub country: String,
    pub status: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating dockets.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dockets)]
pub(crate) struct NewDocketRow<'a> {
    pub summary_no: &'a str,
    pub date: NaiveDate,
    pub docket_no: &'a str,
    pub station: &'a str,
    pub carrier: &'a str,
    pub flight_no: Option<&'a str>,
    pub load_no: Option<&'a str>,
    pub bags: i32,
    pub weight: Decimal,
    pub country: &'a str,
    pub status: &'a str,
    pub created_by: Uuid,
}

// ---------------------------------------------------------------------------
// Connotes
// ---------------------------------------------------------------------------

/// Row struct for reading from the connotes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = connotes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConnoteRow {
    pub id: Uuid,
    pub awb_number: String,
    pub shipper_name: String,
    pub shipper_address: String,
    pub shipper_city: String,
    pub shipper_country: String,
    pub shipper_postal_code: Option<String>,
    pub shipper_phone: Option<String>,
    pub shipper_email: Option<String>,
    pub consignee_name: String,
    pub consignee_address: String,
    pub consignee_city: String,
    pub consignee_country: String,
    pub consignee_postal_code: Option<String>,
    pub consignee_phone: Option<String>,
    pub consignee_email: Option<String>,
    pub service_type: String,
    pub shipment_type: String,
    pub description: String,
    pub pieces: i32,
    pub weight: Decimal,
    pub dimensions: Option<String>,
    pub customs_value: Option<Decimal>,
    pub currency: String,
    pub freight_charges: Decimal,
    pub fuel_surcharge: Decimal,
    pub security_charge: Decimal,
    pub handling_charge: Decimal,
    pub insurance_fee: Decimal,
    pub other_charges: Decimal,
    pub total_charges: Decimal,
    pub status: String,
    pub docket_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating connotes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = connotes)]
pub(crate) struct NewConnoteRow<'a> {
    pub awb_number: &'a str,
    pub shipper_name: &'a str,
    pub shipper_address: &'a str,
    pub shipper_city: &'a str,
    pub shipper_country: &'a str,
    pub shipper_postal_code: Option<&'a str>,
    pub shipper_phone: Option<&'a str>,
    pub shipper_email: Option<&'a str>,
    pub consignee_name: &'a str,
    pub consignee_address: &'a str,
    pub consignee_city: &'a str,
    pub consignee_country: &'a str,
    pub consignee_postal_code: Option<&'a str>,
    pub consignee_phone: Option<&'a str>,
    pub consignee_email: Option<&'a str>,
    pub service_type: &'a str,
    pub shipment_type: &'a str,
    pub description: &'a str,
    pub pieces: i32,
    pub weight: Decimal,
    pub dimensions: Option<&'a str>,
    pub customs_value: Option<Decimal>,
    pub currency: &'a str,
    pub freight_charges: Decimal,
    pub fuel_surcharge: Decimal,
    pub security_charge: Decimal,
    pub handling_charge: Decimal,
    pub insurance_fee: Decimal,
    pub other_charges: Decimal,
    pub total_charges: Decimal,
    pub status: &'a str,
    pub docket_id: Option<Uuid>,
    pub created_by: Uuid,
}

// ---------------------------------------------------------------------------
// Tracking history
// ---------------------------------------------------------------------------

/// Row struct for reading from the tracking_history table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tracking_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TrackingEventRow {
    pub id: Uuid,
    pub connote_id: Uuid,
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

/// Insertable struct for appending history.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tracking_history)]
pub(crate) struct NewTrackingEventRow<'a> {
    pub connote_id: Uuid,
    pub status: &'a str,
    pub location: Option<&'a str>,
    pub description: Option<&'a str>,
    pub timestamp: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}
