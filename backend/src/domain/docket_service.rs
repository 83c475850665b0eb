//! Manifest docket workflow: create, list by status, close.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{DocketRepository, DocketRepositoryError};
use crate::domain::{
    AccessContext, Docket, DocketDraft, DocketId, DocketStatus, Error, NewDocket, Role,
    sort_for_listing,
};

fn map_docket_error(error: DocketRepositoryError) -> Error {
    match error {
        DocketRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("docket repository unavailable: {message}"))
        }
        DocketRepositoryError::Query { message } => {
            Error::internal(format!("docket repository error: {message}"))
        }
    }
}

/// Creates, lists, and closes manifest dockets.
#[derive(Clone)]
pub struct DocketService {
    repo: Arc<dyn DocketRepository>,
    clock: Arc<dyn Clock>,
}

impl DocketService {
    pub fn new(repo: Arc<dyn DocketRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Validate and store a docket. A missing date defaults to today (UTC).
    pub async fn create(&self, actor: &AccessContext, draft: DocketDraft) -> Result<Docket, Error> {
        let today = self.clock.utc().date_naive();
        let new_docket = NewDocket::try_from_draft(draft, actor.profile().id, today)?;
        let docket = self
            .repo
            .insert(&new_docket)
            .await
            .map_err(map_docket_error)?;
        info!(docket_id = %docket.id, docket_no = %docket.docket_no, "docket created");
        Ok(docket)
    }

    /// Dockets in `status`, in list-screen order.
    pub async fn list(&self, status: DocketStatus) -> Result<Vec<Docket>, Error> {
        let mut dockets = self
            .repo
            .list_by_status(status)
            .await
            .map_err(map_docket_error)?;
        sort_for_listing(status, &mut dockets);
        Ok(dockets)
    }

    /// Close an open docket. Closing twice is a conflict.
    pub async fn close(&self, actor: &AccessContext, id: DocketId) -> Result<Docket, Error> {
        actor.require_role(Role::can_manage_dockets, "close dockets")?;

        let docket = self
            .repo
            .find(&id)
            .await
            .map_err(map_docket_error)?
            .ok_or_else(|| Error::not_found(format!("docket {id} not found")))?;
        if !docket.is_open() {
            return Err(Error::conflict("docket is already closed"));
        }

        let closed = self
            .repo
            .set_status(&id, DocketStatus::Closed, self.clock.utc())
            .await
            .map_err(map_docket_error)?
            .ok_or_else(|| Error::not_found(format!("docket {id} not found")))?;
        info!(docket_id = %id, closed_by = %actor.profile().id, "docket closed");
        Ok(closed)
    }

    /// Number of open dockets.
    pub async fn open_count(&self) -> Result<i64, Error> {
        self.repo
            .count_by_status(DocketStatus::Open)
            .await
            .map_err(map_docket_error)
    }
}

#[cfg(test)]
#[path = "docket_service_tests.rs"]
mod tests;
