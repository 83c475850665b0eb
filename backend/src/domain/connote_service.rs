//! Connote workflow: submission, listing, detail, invoice, status.
//!
//! The charge total is computed once from the submitted charge lines and
//! stored with the row. Reads never recompute it.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{ConnoteRepository, ConnoteRepositoryError};
use crate::domain::{
    AccessContext, Connote, ConnoteDraft, ConnoteFilter, ConnoteId, ConnoteStatus, Error, Invoice,
    NewConnote,
};

pub(crate) fn map_connote_error(error: ConnoteRepositoryError) -> Error {
    match error {
        ConnoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("connote repository unavailable: {message}"))
        }
        ConnoteRepositoryError::Query { message } => {
            Error::internal(format!("connote repository error: {message}"))
        }
        ConnoteRepositoryError::DuplicateAwb { awb_number } => {
            Error::conflict(format!("awb number {awb_number} is already in use"))
        }
    }
}

/// Creates and reads connotes.
#[derive(Clone)]
pub struct ConnoteService {
    repo: Arc<dyn ConnoteRepository>,
    clock: Arc<dyn Clock>,
}

impl ConnoteService {
    pub fn new(repo: Arc<dyn ConnoteRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Validate a submission, freeze its total, and store it.
    pub async fn create(&self, actor: &AccessContext, draft: ConnoteDraft) -> Result<Connote, Error> {
        let new_connote = NewConnote::try_from_draft(draft, actor.profile().id)?;
        let connote = self
            .repo
            .insert(&new_connote)
            .await
            .map_err(map_connote_error)?;
        info!(
            connote_id = %connote.id,
            awb = %connote.awb_number,
            total = %connote.total_charges,
            "connote created"
        );
        Ok(connote)
    }

    /// Connotes matching `filter`, newest first.
    pub async fn list(&self, filter: &ConnoteFilter) -> Result<Vec<Connote>, Error> {
        let mut connotes = self.repo.list(filter).await.map_err(map_connote_error)?;
        connotes.retain(|connote| filter.matches(connote));
        connotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(connotes)
    }

    pub async fn get(&self, id: ConnoteId) -> Result<Connote, Error> {
        self.repo
            .find(&id)
            .await
            .map_err(map_connote_error)?
            .ok_or_else(|| Error::not_found(format!("connote {id} not found")))
    }

    /// Printable invoice for one connote.
    pub async fn invoice(&self, id: ConnoteId) -> Result<Invoice, Error> {
        let connote = self.get(id).await?;
        Ok(Invoice::for_connote(&connote))
    }

    /// Overwrite the status. Any status may follow any other.
    pub async fn set_status(
        &self,
        actor: &AccessContext,
        id: ConnoteId,
        status: ConnoteStatus,
    ) -> Result<Connote, Error> {
        let connote = self
            .repo
            .set_status(&id, status, self.clock.utc())
            .await
            .map_err(map_connote_error)?
            .ok_or_else(|| Error::not_found(format!("connote {id} not found")))?;
        info!(connote_id = %id, %status, updated_by = %actor.profile().id, "connote status set");
        Ok(connote)
    }
}
