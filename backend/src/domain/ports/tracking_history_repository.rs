//! Port for tracking history persistence.

use async_trait::async_trait;

use crate::domain::{ConnoteId, NewTrackingEvent, TrackingEvent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tracking history repository adapters.
    pub enum TrackingHistoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "tracking history repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "tracking history repository query failed: {message}",
    }
}

/// Port for `tracking_history` rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackingHistoryRepository: Send + Sync {
    /// Events for one connote, oldest first.
    async fn list_for_connote(
        &self,
        connote_id: &ConnoteId,
    ) -> Result<Vec<TrackingEvent>, TrackingHistoryRepositoryError>;

    /// Append an event and return the stored row.
    async fn insert(
        &self,
        event: &NewTrackingEvent,
    ) -> Result<TrackingEvent, TrackingHistoryRepositoryError>;
}

/// Fixture repository with no history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTrackingHistoryRepository;

#[async_trait]
impl TrackingHistoryRepository for FixtureTrackingHistoryRepository {
    async fn list_for_connote(
        &self,
        _connote_id: &ConnoteId,
    ) -> Result<Vec<TrackingEvent>, TrackingHistoryRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(
        &self,
        _event: &NewTrackingEvent,
    ) -> Result<TrackingEvent, TrackingHistoryRepositoryError> {
        Err(TrackingHistoryRepositoryError::connection(
            "no tracking store configured",
        ))
    }
}
