//! Port for connote persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Connote, ConnoteFilter, ConnoteId, ConnoteStatus, NewConnote};

use super::define_port_error;

define_port_error! {
    /// Errors raised by connote repository adapters.
    pub enum ConnoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "connote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "connote repository query failed: {message}",
        /// Another connote already uses the AWB number.
        DuplicateAwb { awb_number: String } =>
            "awb number already exists: {awb_number}",
    }
}

/// Selection for [`ConnoteRepository::count`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnoteCountQuery {
    /// Only connotes in this status.
    pub status: Option<ConnoteStatus>,
    /// Only connotes updated at or after this instant.
    pub updated_since: Option<DateTime<Utc>>,
}

/// Port for `connotes` rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnoteRepository: Send + Sync {
    /// Insert a connote and return the stored row.
    async fn insert(&self, connote: &NewConnote) -> Result<Connote, ConnoteRepositoryError>;

    /// Connote by primary key.
    async fn find(&self, id: &ConnoteId) -> Result<Option<Connote>, ConnoteRepositoryError>;

    /// Connotes matching the filter, newest first.
    async fn list(&self, filter: &ConnoteFilter) -> Result<Vec<Connote>, ConnoteRepositoryError>;

    /// Newest connote whose AWB contains `fragment`, case-insensitively.
    async fn find_by_awb_fragment(
        &self,
        fragment: &str,
    ) -> Result<Option<Connote>, ConnoteRepositoryError>;

    /// Set the status and bump `updated_at`. Returns `None` when the row is
    /// missing.
    async fn set_status(
        &self,
        id: &ConnoteId,
        status: ConnoteStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Connote>, ConnoteRepositoryError>;

    /// Number of connotes matching the query.
    async fn count(&self, query: &ConnoteCountQuery) -> Result<i64, ConnoteRepositoryError>;
}

/// Fixture repository with no stored connotes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureConnoteRepository;

#[async_trait]
impl ConnoteRepository for FixtureConnoteRepository {
    async fn insert(&self, _connote: &NewConnote) -> Result<Connote, ConnoteRepositoryError> {
        Err(ConnoteRepositoryError::connection(
            "no connote store configured",
        ))
    }

    async fn find(&self, _id: &ConnoteId) -> Result<Option<Connote>, ConnoteRepositoryError> {
        Ok(None)
    }

    async fn list(&self, _filter: &ConnoteFilter) -> Result<Vec<Connote>, ConnoteRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_awb_fragment(
        &self,
        _fragment: &str,
    ) -> Result<Option<Connote>, ConnoteRepositoryError> {
        Ok(None)
    }

    async fn set_status(
        &self,
        _id: &ConnoteId,
        _status: ConnoteStatus,
        _at: DateTime<Utc>,
    ) -> Result<Option<Connote>, ConnoteRepositoryError> {
        Ok(None)
    }

    async fn count(&self, _query: &ConnoteCountQuery) -> Result<i64, ConnoteRepositoryError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_awb_error_names_the_number() {
        let err = ConnoteRepositoryError::duplicate_awb("AWB-1");
        assert_eq!(err.to_string(), "awb number already exists: AWB-1");
    }

    #[tokio::test]
    async fn fixture_counts_are_zero() {
        let count = FixtureConnoteRepository
            .count(&ConnoteCountQuery::default())
            .await
            .expect("fixture count");
        assert_eq!(count, 0);
    }
}
