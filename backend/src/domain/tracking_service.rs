//! Shipment tracking lookups and history events.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::connote_service::map_connote_error;
use crate::domain::ports::{
    ConnoteRepository, TrackingHistoryRepository, TrackingHistoryRepositoryError,
};
use crate::domain::{
    AccessContext, ConnoteId, Error, NewTrackingEvent, ShipmentTrace, TrackingEvent,
};

fn map_history_error(error: TrackingHistoryRepositoryError) -> Error {
    match error {
        TrackingHistoryRepositoryError::Connection { message } => Error::service_unavailable(
            format!("tracking history repository unavailable: {message}"),
        ),
        TrackingHistoryRepositoryError::Query { message } => {
            Error::internal(format!("tracking history repository error: {message}"))
        }
    }
}

/// Raw history event input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingEventDraft {
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Defaults to now.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Resolves AWB lookups to shipment traces and appends history.
#[derive(Clone)]
pub struct TrackingService {
    connotes: Arc<dyn ConnoteRepository>,
    history: Arc<dyn TrackingHistoryRepository>,
    clock: Arc<dyn Clock>,
}

impl TrackingService {
    pub fn new(
        connotes: Arc<dyn ConnoteRepository>,
        history: Arc<dyn TrackingHistoryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connotes,
            history,
            clock,
        }
    }

    /// Find the newest connote whose AWB contains `awb`, ignoring case, and
    /// return it with its history.
    pub async fn trace(&self, awb: &str) -> Result<ShipmentTrace, Error> {
        let fragment = awb.trim();
        if fragment.is_empty() {
            return Err(Error::invalid_request("awb number is required"));
        }

        let connote = self
            .connotes
            .find_by_awb_fragment(fragment)
            .await
            .map_err(map_connote_error)?
            .ok_or_else(|| {
                debug!(awb = fragment, "no connote matched tracking lookup");
                Error::not_found("Shipment not found")
            })?;
        let history = self
            .history
            .list_for_connote(&connote.id)
            .await
            .map_err(map_history_error)?;
        Ok(ShipmentTrace::new(&connote, history))
    }

    /// Append an event to a connote's history.
    pub async fn record_event(
        &self,
        actor: &AccessContext,
        connote_id: ConnoteId,
        draft: TrackingEventDraft,
    ) -> Result<TrackingEvent, Error> {
        let event = NewTrackingEvent::try_new(
            connote_id,
            &draft.status,
            draft.location.as_deref(),
            draft.description.as_deref(),
            draft.timestamp.unwrap_or_else(|| self.clock.utc()),
            Some(actor.profile().id),
        )?;

        self.connotes
            .find(&connote_id)
            .await
            .map_err(map_connote_error)?
            .ok_or_else(|| Error::not_found(format!("connote {connote_id} not found")))?;

        let stored = self
            .history
            .insert(&event)
            .await
            .map_err(map_history_error)?;
        info!(%connote_id, status = %stored.status, "tracking event recorded");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockConnoteRepository, MockTrackingHistoryRepository};
    use crate::domain::service_fixtures::{connote, context, fixture_clock, fixture_timestamp};
    use crate::domain::{ErrorCode, Role, TrackingEventId};
    use chrono::Duration;
    use rstest::rstest;

    fn service(
        connotes: MockConnoteRepository,
        history: MockTrackingHistoryRepository,
    ) -> TrackingService {
        TrackingService::new(Arc::new(connotes), Arc::new(history), fixture_clock())
    }

    fn event(connote_id: ConnoteId, status: &str, timestamp: DateTime<Utc>) -> TrackingEvent {
        TrackingEvent {
            id: TrackingEventId::random(),
            connote_id,
            status: status.into(),
            location: Some("SYD".into()),
            description: None,
            timestamp,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn trace_returns_route_and_ordered_history() {
        let shipment = connote("AWB-123456");
        let id = shipment.id;
        let mut connotes = MockConnoteRepository::new();
        connotes
            .expect_find_by_awb_fragment()
            .withf(|fragment| fragment == "123456")
            .times(1)
            .return_once(move |_| Ok(Some(shipment)));
        let mut history = MockTrackingHistoryRepository::new();
        history
            .expect_list_for_connote()
            .withf(move |target| *target == id)
            .times(1)
            .return_once(move |_| {
                Ok(vec![
                    event(id, "in_transit", fixture_timestamp() + Duration::hours(2)),
                    event(id, "created", fixture_timestamp()),
                ])
            });

        let trace = service(connotes, history)
            .trace("  123456 ")
            .await
            .expect("trace");

        assert_eq!(trace.origin, "Sydney, Australia");
        assert_eq!(trace.destination, "Osaka, Japan");
        let statuses: Vec<_> = trace.history.iter().map(|e| e.status.as_str()).collect();
        assert_eq!(statuses, vec!["created", "in_transit"]);
    }

    #[rstest]
    #[case::blank("   ", ErrorCode::InvalidRequest)]
    #[case::unknown("NOPE", ErrorCode::NotFound)]
    #[tokio::test]
    async fn trace_rejects_blank_and_unknown(#[case] awb: &str, #[case] expected: ErrorCode) {
        let mut connotes = MockConnoteRepository::new();
        connotes
            .expect_find_by_awb_fragment()
            .returning(|_| Ok(None));
        let mut history = MockTrackingHistoryRepository::new();
        history.expect_list_for_connote().never();

        let error = service(connotes, history)
            .trace(awb)
            .await
            .expect_err("lookup fails");

        assert_eq!(error.code(), expected);
    }

    #[tokio::test]
    async fn record_event_defaults_timestamp_and_author() {
        let actor = context(Role::Staff);
        let actor_id = actor.profile().id;
        let shipment = connote("AWB-9");
        let id = shipment.id;
        let mut connotes = MockConnoteRepository::new();
        connotes
            .expect_find()
            .times(1)
            .return_once(move |_| Ok(Some(shipment)));
        let mut history = MockTrackingHistoryRepository::new();
        history
            .expect_insert()
            .withf(move |new| {
                new.connote_id == id
                    && new.status == "arrived"
                    && new.timestamp == fixture_timestamp()
                    && new.created_by == Some(actor_id)
            })
            .times(1)
            .return_once(|new| Ok(event(new.connote_id, &new.status, new.timestamp)));

        let stored = service(connotes, history)
            .record_event(
                &actor,
                id,
                TrackingEventDraft {
                    status: " arrived ".into(),
                    ..TrackingEventDraft::default()
                },
            )
            .await
            .expect("recorded");

        assert_eq!(stored.status, "arrived");
    }

    #[tokio::test]
    async fn record_event_requires_existing_connote() {
        let mut connotes = MockConnoteRepository::new();
        connotes.expect_find().times(1).return_once(|_| Ok(None));
        let mut history = MockTrackingHistoryRepository::new();
        history.expect_insert().never();

        let error = service(connotes, history)
            .record_event(
                &context(Role::Staff),
                ConnoteId::random(),
                TrackingEventDraft {
                    status: "arrived".into(),
                    ..TrackingEventDraft::default()
                },
            )
            .await
            .expect_err("missing connote");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
