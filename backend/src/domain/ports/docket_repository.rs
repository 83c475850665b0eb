//! Port for manifest docket persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Docket, DocketId, DocketStatus, NewDocket};

use super::define_port_error;

define_port_error! {
    /// Errors raised by docket repository adapters.
    pub enum DocketRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "docket repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "docket repository query failed: {message}",
    }
}

/// Port for `dockets` rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocketRepository: Send + Sync {
    /// Insert a docket and return the stored row.
    async fn insert(&self, docket: &NewDocket) -> Result<Docket, DocketRepositoryError>;

    /// Docket by primary key.
    async fn find(&self, id: &DocketId) -> Result<Option<Docket>, DocketRepositoryError>;

    /// Dockets in one status.
    ///
    /// Open dockets come newest-created first, closed dockets most recently
    /// updated first.
    async fn list_by_status(
        &self,
        status: DocketStatus,
    ) -> Result<Vec<Docket>, DocketRepositoryError>;

    /// Set the status and bump `updated_at`. Returns `None` when the row is
    /// missing.
    async fn set_status(
        &self,
        id: &DocketId,
        status: DocketStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Docket>, DocketRepositoryError>;

    /// Number of dockets in one status.
    async fn count_by_status(&self, status: DocketStatus) -> Result<i64, DocketRepositoryError>;
}

/// Fixture repository with no stored dockets.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDocketRepository;

#[async_trait]
impl DocketRepository for FixtureDocketRepository {
    async fn insert(&self, _docket: &NewDocket) -> Result<Docket, DocketRepositoryError> {
        Err(DocketRepositoryError::connection("no docket store configured"))
    }

    async fn find(&self, _id: &DocketId) -> Result<Option<Docket>, DocketRepositoryError> {
        Ok(None)
    }

    async fn list_by_status(
        &self,
        _status: DocketStatus,
    ) -> Result<Vec<Docket>, DocketRepositoryError> {
        Ok(Vec::new())
    }

    async fn set_status(
        &self,
        _id: &DocketId,
        _status: DocketStatus,
        _at: DateTime<Utc>,
    ) -> Result<Option<Docket>, DocketRepositoryError> {
        Ok(None)
    }

    async fn count_by_status(&self, _status: DocketStatus) -> Result<i64, DocketRepositoryError> {
        Ok(0)
    }
}
