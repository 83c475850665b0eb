//! PostgreSQL-backed `DocketRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DocketRepository, DocketRepositoryError};
use crate::domain::{Docket, DocketId, DocketStatus, NewDocket, ProfileId};

use super::error_mapping::{map_diesel_error, map_pool_error, unrecognised_value};
use super::models::{DocketRow, NewDocketRow};
use super::pool::{DbPool, PoolError};
use super::schema::dockets;

/// Diesel-backed implementation of the `DocketRepository` port.
#[derive(Clone)]
pub struct DieselDocketRepository {
    pool: DbPool,
}

impl DieselDocketRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> DocketRepositoryError {
    map_pool_error(error, DocketRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> DocketRepositoryError {
    map_diesel_error(
        error,
        DocketRepositoryError::query,
        DocketRepositoryError::connection,
    )
}

fn row_to_docket(row: DocketRow) -> Result<Docket, DocketRepositoryError> {
    let status: DocketStatus = row
        .status
        .parse()
        .map_err(|_| unrecognised_value("docket status", &row.status, DocketRepositoryError::query))?;
    Ok(Docket {
        id: DocketId::from_uuid(row.id),
        summary_no: row.summary_no,
        date: row.date,
        docket_no: row.docket_no,
        station: row.station,
        carrier: row.carrier,
        flight_no: row.flight_no,
        load_no: row.load_no,
        bags: row.bags,
        weight: row.weight,
        country: row.country,
        status,
        created_by: ProfileId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl DocketRepository for DieselDocketRepository {
    async fn insert(&self, docket: &NewDocket) -> Result<Docket, DocketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewDocketRow {
            summary_no: &docket.summary_no,
            date: docket.date,
            docket_no: &docket.docket_no,
            station: &docket.station,
            carrier: &docket.carrier,
            flight_no: docket.flight_no.as_deref(),
            load_no: docket.load_no.as_deref(),
            bags: docket.bags,
            weight: docket.weight,
            country: &docket.country,
            status: docket.status.as_str(),
            created_by: *docket.created_by.as_uuid(),
        };
        let stored: DocketRow = diesel::insert_into(dockets::table)
            .values(&row)
            .returning(DocketRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        row_to_docket(stored)
    }

    async fn find(&self, id: &DocketId) -> Result<Option<Docket>, DocketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        dockets::table
            .find(*id.as_uuid())
            .select(DocketRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_docket)
            .transpose()
    }

    async fn list_by_status(
        &self,
        status: DocketStatus,
    ) -> Result<Vec<Docket>, DocketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let query = dockets::table
            .filter(dockets::status.eq(status.as_str()))
            .select(DocketRow::as_select());
        let rows: Vec<DocketRow> = match status {
            DocketStatus::Open => query.order(dockets::created_at.desc()).load(&mut conn).await,
            DocketStatus::Closed => query.order(dockets::updated_at.desc()).load(&mut conn).await,
        }
        .map_err(diesel_error)?;
        rows.into_iter().map(row_to_docket).collect()
    }

    async fn set_status(
        &self,
        id: &DocketId,
        status: DocketStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Docket>, DocketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(dockets::table.find(*id.as_uuid()))
            .set((
                dockets::status.eq(status.as_str()),
                dockets::updated_at.eq(at),
            ))
            .returning(DocketRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_docket)
            .transpose()
    }

    async fn count_by_status(&self, status: DocketStatus) -> Result<i64, DocketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        dockets::table
            .filter(dockets::status.eq(status.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)
    }
}
