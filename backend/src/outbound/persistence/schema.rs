//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.
//!
//! `audit_logs` exists in the migrations but is not mapped here; the service
//! never reads or writes it.

diesel::table! {
    /// Staff profiles.
    ///
    /// One row per hosted auth user; `user_id` is the auth user id and is
    /// unique.
    profiles (id) {
        id -> Uuid,
        user_id -> Uuid,
        full_name -> Varchar,
        email -> Varchar,
        phone -> Nullable<Varchar>,
        /// One of `main_admin`, `second_admin`, `manager`, `staff`.
        role -> Varchar,
        is_active -> Bool,
        avatar_url -> Nullable<Text>,
        created_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Module visibility per role. `(role, module_id)` is unique.
    role_permissions (id) {
        id -> Uuid,
        role -> Varchar,
        module_id -> Varchar,
        enabled -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Manifest dockets.
    dockets (id) {
        id -> Uuid,
        summary_no -> Varchar,
        date -> Date,
        docket_no -> Varchar,
        station -> Varchar,
        carrier -> Varchar,
        flight_no -> Nullable<Varchar>,
        load_no -> Nullable<Varchar>,
        bags -> Int4,
        weight -> Numeric,
        country -> Varchar,
        /// `open` or `closed`.
        status -> Varchar,
        created_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Consignment notes. `awb_number` is unique.
    connotes (id) {
        id -> Uuid,
        awb_number -> Varchar,
        shipper_name -> Varchar,
        shipper_address -> Text,
        shipper_city -> Varchar,
        shipper_country -> Varchar,
        shipper_postal_code -> Nullable<Varchar>,
        shipper_phone -> Nullable<Varchar>,
        shipper_email -> Nullable<Varchar>,
        consignee_name -> Varchar,
        consignee_address -> Text,
        consignee_city -> Varchar,
        consignee_country -> Varchar,
        consignee_postal_code -> Nullable<Varchar>,
        consignee_phone -> Nullable<Varchar>,
        consignee_email -> Nullable<Varchar>,
        service_type -> Varchar,
        shipment_type -> Varchar,
        description -> Text,
        pieces -> Int4,
        weight -> Numeric,
        dimensions -> Nullable<Varchar>,
        customs_value -> Nullable<Numeric>,
        currency -> Varchar,
        freight_charges -> Numeric,
        fuel_surcharge -> Numeric,
        security_charge -> Numeric,
        handling_charge -> Numeric,
        insurance_fee -> Numeric,
        other_charges -> Numeric,
        /// Sum of the six charge columns, frozen at insert.
        total_charges -> Numeric,
        status -> Varchar,
        docket_id -> Nullable<Uuid>,
        created_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Timestamped status events per connote.
    tracking_history (id) {
        id -> Uuid,
        connote_id -> Uuid,
        status -> Varchar,
        location -> Nullable<Varchar>,
        description -> Nullable<Text>,
        timestamp -> Timestamptz,
        created_by -> Nullable<Uuid>,
    }
}

diesel::joinable!(connotes -> dockets (docket_id));
diesel::joinable!(tracking_history -> connotes (connote_id));

diesel::allow_tables_to_appear_in_same_query!(
    connotes,
    dockets,
    profiles,
    role_permissions,
    tracking_history,
);
