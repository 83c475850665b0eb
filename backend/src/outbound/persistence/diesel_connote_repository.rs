//! PostgreSQL-backed `ConnoteRepository` implementation.
//!
//! Search uses `ILIKE` with the term's wildcard characters escaped, so
//! `%` and `_` in a search box match literally.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ConnoteCountQuery, ConnoteRepository, ConnoteRepositoryError};
use crate::domain::{
    Charges, Connote, ConnoteFilter, ConnoteId, ConnoteStatus, DocketId, NewConnote, Party,
    ProfileId, ServiceType, ShipmentType,
};

use super::error_mapping::{map_diesel_error, map_pool_error, unique_violation, unrecognised_value};
use super::models::{ConnoteRow, NewConnoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::connotes;

/// Diesel-backed implementation of the `ConnoteRepository` port.
#[derive(Clone)]
pub struct DieselConnoteRepository {
    pool: DbPool,
}

impl DieselConnoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ConnoteRepositoryError {
    map_pool_error(error, ConnoteRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ConnoteRepositoryError {
    map_diesel_error(
        error,
        ConnoteRepositoryError::query,
        ConnoteRepositoryError::connection,
    )
}

/// Wrap a search term for `ILIKE`, escaping its wildcards.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn parse_column<T: std::str::FromStr>(
    column: &'static str,
    value: &str,
) -> Result<T, ConnoteRepositoryError> {
    value
        .parse()
        .map_err(|_| unrecognised_value(column, value, ConnoteRepositoryError::query))
}

fn row_to_connote(row: ConnoteRow) -> Result<Connote, ConnoteRepositoryError> {
    let service_type: ServiceType = parse_column("service_type", &row.service_type)?;
    let shipment_type: ShipmentType = parse_column("shipment_type", &row.shipment_type)?;
    let status: ConnoteStatus = parse_column("connote status", &row.status)?;

    Ok(Connote {
        id: ConnoteId::from_uuid(row.id),
        awb_number: row.awb_number,
        shipper: Party {
            name: row.shipper_name,
            address: row.shipper_address,
            city: row.shipper_city,
            country: row.shipper_country,
            postal_code: row.shipper_postal_code,
            phone: row.shipper_phone,
            email: row.shipper_email,
        },
        consignee: Party {
            name: row.consignee_name,
            address: row.consignee_address,
            city: row.consignee_city,
            country: row.consignee_country,
            postal_code: row.consignee_postal_code,
            phone: row.consignee_phone,
            email: row.consignee_email,
        },
        service_type,
        shipment_type,
        description: row.description,
        pieces: row.pieces,
        weight: row.weight,
        dimensions: row.dimensions,
        customs_value: row.customs_value,
        currency: row.currency,
        charges: Charges {
            freight: row.freight_charges,
            fuel_surcharge: row.fuel_surcharge,
            security: row.security_charge,
            handling: row.handling_charge,
            insurance: row.insurance_fee,
            other: row.other_charges,
        },
        total_charges: row.total_charges,
        status,
        docket_id: row.docket_id.map(DocketId::from_uuid),
        created_by: ProfileId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn new_row(connote: &NewConnote) -> NewConnoteRow<'_> {
    let shipper = &connote.shipper;
    let consignee = &connote.consignee;
    NewConnoteRow {
        awb_number: &connote.awb_number,
        shipper_name: &shipper.name,
        shipper_address: &shipper.address,
        shipper_city: &shipper.city,
        shipper_country: &shipper.country,
        shipper_postal_code: shipper.postal_code.as_deref(),
        shipper_phone: shipper.phone.as_deref(),
        shipper_email: shipper.email.as_deref(),
        consignee_name: &consignee.name,
        consignee_address: &consignee.address,
        consignee_city: &consignee.city,
        consignee_country: &consignee.country,
        consignee_postal_code: consignee.postal_code.as_deref(),
        consignee_phone: consignee.phone.as_deref(),
        consignee_email: consignee.email.as_deref(),
        service_type: connote.service_type.as_str(),
        shipment_type: connote.shipment_type.as_str(),
        description: &connote.description,
        pieces: connote.pieces,
        weight: connote.weight,
        dimensions: connote.dimensions.as_deref(),
        customs_value: connote.customs_value,
        currency: &connote.currency,
        freight_charges: connote.charges.freight,
        fuel_surcharge: connote.charges.fuel_surcharge,
        security_charge: connote.charges.security,
        handling_charge: connote.charges.handling,
        insurance_fee: connote.charges.insurance,
        other_charges: connote.charges.other,
        total_charges: connote.total_charges,
        status: connote.status.as_str(),
        docket_id: connote.docket_id.map(|id| *id.as_uuid()),
        created_by: *connote.created_by.as_uuid(),
    }
}

#[async_trait]
impl ConnoteRepository for DieselConnoteRepository {
    async fn insert(&self, connote: &NewConnote) -> Result<Connote, ConnoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let stored: ConnoteRow = diesel::insert_into(connotes::table)
            .values(&new_row(connote))
            .returning(ConnoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if unique_violation(&error).is_some() {
                    ConnoteRepositoryError::duplicate_awb(connote.awb_number.clone())
                } else {
                    diesel_error(error)
                }
            })?;
        row_to_connote(stored)
    }

    async fn find(&self, id: &ConnoteId) -> Result<Option<Connote>, ConnoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        connotes::table
            .find(*id.as_uuid())
            .select(ConnoteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_connote)
            .transpose()
    }

    async fn list(&self, filter: &ConnoteFilter) -> Result<Vec<Connote>, ConnoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = connotes::table
            .select(ConnoteRow::as_select())
            .order(connotes::created_at.desc())
            .into_boxed();
        if let Some(term) = filter.search() {
            let pattern = contains_pattern(term);
            query = query.filter(
                connotes::awb_number
                    .ilike(pattern.clone())
                    .or(connotes::shipper_name.ilike(pattern.clone()))
                    .or(connotes::consignee_name.ilike(pattern)),
            );
        }
        let rows: Vec<ConnoteRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(row_to_connote).collect()
    }

    async fn find_by_awb_fragment(
        &self,
        fragment: &str,
    ) -> Result<Option<Connote>, ConnoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        connotes::table
            .filter(connotes::awb_number.ilike(contains_pattern(fragment)))
            .order(connotes::created_at.desc())
            .select(ConnoteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_connote)
            .transpose()
    }

    async fn set_status(
        &self,
        id: &ConnoteId,
        status: ConnoteStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Connote>, ConnoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(connotes::table.find(*id.as_uuid()))
            .set((
                connotes::status.eq(status.as_str()),
                connotes::updated_at.eq(at),
            ))
            .returning(ConnoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_connote)
            .transpose()
    }

    async fn count(&self, query: &ConnoteCountQuery) -> Result<i64, ConnoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut count = connotes::table.count().into_boxed();
        if let Some(status) = query.status {
            count = count.filter(connotes::status.eq(status.as_str()));
        }
        if let Some(since) = query.updated_since {
            count = count.filter(connotes::updated_at.ge(since));
        }
        count.get_result(&mut conn).await.map_err(diesel_error)
    }
}
