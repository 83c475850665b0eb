//! PostgreSQL-backed `TrackingHistoryRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TrackingHistoryRepository, TrackingHistoryRepositoryError};
use crate::domain::{ConnoteId, NewTrackingEvent, ProfileId, TrackingEvent, TrackingEventId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTrackingEventRow, TrackingEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::tracking_history;

/// Diesel-backed implementation of the `TrackingHistoryRepository` port.
#[derive(Clone)]
pub struct DieselTrackingHistoryRepository {
    pool: DbPool,
}

impl DieselTrackingHistoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> TrackingHistoryRepositoryError {
    map_pool_error(error, TrackingHistoryRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> TrackingHistoryRepositoryError {
    map_diesel_error(
        error,
        TrackingHistoryRepositoryError::query,
        TrackingHistoryRepositoryError::connection,
    )
}

fn row_to_event(row: TrackingEventRow) -> TrackingEvent {
    TrackingEvent {
        id: TrackingEventId::from_uuid(row.id),
        connote_id: ConnoteId::from_uuid(row.connote_id),
        status: row.status,
        location: row.location,
        description: row.description,
        timestamp: row.timestamp,
        created_by: row.created_by.map(ProfileId::from_uuid),
    }
}

#[async_trait]
impl TrackingHistoryRepository for DieselTrackingHistoryRepository {
    async fn list_for_connote(
        &self,
        connote_id: &ConnoteId,
    ) -> Result<Vec<TrackingEvent>, TrackingHistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<TrackingEventRow> = tracking_history::table
            .filter(tracking_history::connote_id.eq(connote_id.as_uuid()))
            .order(tracking_history::timestamp.asc())
            .select(TrackingEventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_event).collect())
    }

    async fn insert(
        &self,
        event: &NewTrackingEvent,
    ) -> Result<TrackingEvent, TrackingHistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewTrackingEventRow {
            connote_id: *event.connote_id.as_uuid(),
            status: &event.status,
            location: event.location.as_deref(),
            description: event.description.as_deref(),
            timestamp: event.timestamp,
            created_by: event.created_by.map(|id| *id.as_uuid()),
        };
        diesel::insert_into(tracking_history::table)
            .values(&row)
            .returning(TrackingEventRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_event)
            .map_err(diesel_error)
    }
}
