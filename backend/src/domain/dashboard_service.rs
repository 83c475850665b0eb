//! Dashboard headline counts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::connote_service::map_connote_error;
use crate::domain::ports::{ConnoteCountQuery, ConnoteRepository};
use crate::domain::{ConnoteStatus, DashboardSummary, DocketService, Error};

/// Aggregates connote and docket counts for the dashboard.
#[derive(Clone)]
pub struct DashboardService {
    connotes: Arc<dyn ConnoteRepository>,
    dockets: DocketService,
    clock: Arc<dyn Clock>,
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |midnight| midnight.and_utc())
}

impl DashboardService {
    pub fn new(
        connotes: Arc<dyn ConnoteRepository>,
        dockets: DocketService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connotes,
            dockets,
            clock,
        }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, Error> {
        let count = |query: ConnoteCountQuery| {
            let connotes = Arc::clone(&self.connotes);
            async move { connotes.count(&query).await.map_err(map_connote_error) }
        };

        let total_connotes = count(ConnoteCountQuery::default()).await?;
        let in_transit = count(ConnoteCountQuery {
            status: Some(ConnoteStatus::InTransit),
            updated_since: None,
        })
        .await?;
        let delivered_today = count(ConnoteCountQuery {
            status: Some(ConnoteStatus::Delivered),
            updated_since: Some(start_of_day(self.clock.utc())),
        })
        .await?;
        let open_dockets = self.dockets.open_count().await?;

        Ok(DashboardSummary {
            total_connotes,
            open_dockets,
            in_transit,
            delivered_today,
        })
    }
}
