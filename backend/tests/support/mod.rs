//! Shared helpers for the HTTP integration tests.
//!
//! The in-memory repositories keep rows in a mutex-guarded `Vec` so a whole
//! request flow can run without PostgreSQL. Sign-in uses the fixture
//! identity provider and the fixture `main_admin` profile.

use std::sync::{Mutex, MutexGuard};

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use serde_json::json;

use docketsync::domain::ports::{
    ConnoteCountQuery, ConnoteRepository, ConnoteRepositoryError, DocketRepository,
    DocketRepositoryError, FIXTURE_ADMIN_EMAIL, FIXTURE_ADMIN_PASSWORD, TrackingHistoryRepository,
    TrackingHistoryRepositoryError,
};
use docketsync::domain::{
    Connote, ConnoteFilter, ConnoteId, ConnoteStatus, Docket, DocketId, DocketStatus, NewConnote,
    NewDocket, NewTrackingEvent, TrackingEvent, TrackingEventId,
};

pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Sign in as the development admin and return the session cookie.
pub async fn sign_in<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": FIXTURE_ADMIN_EMAIL, "password": FIXTURE_ADMIN_PASSWORD}))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "fixture login failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Clock that moves forward one second every time it is read, so writes made
/// in sequence get strictly increasing timestamps.
pub struct TickingClock(Mutex<DateTime<Utc>>);

impl Default for TickingClock {
    fn default() -> Self {
        Self(Mutex::new(Utc::now()))
    }
}

impl TickingClock {
    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.lock_clock();
        let current = *now;
        *now += TimeDelta::seconds(1);
        current
    }
}

#[derive(Default)]
pub struct InMemoryDockets {
    rows: Mutex<Vec<Docket>>,
}

#[async_trait]
impl DocketRepository for InMemoryDockets {
    async fn insert(&self, docket: &NewDocket) -> Result<Docket, DocketRepositoryError> {
        let now = Utc::now();
        let row = Docket {
            id: DocketId::random(),
            summary_no: docket.summary_no.clone(),
            date: docket.date,
            docket_no: docket.docket_no.clone(),
            station: docket.station.clone(),
            carrier: docket.carrier.clone(),
            flight_no: docket.flight_no.clone(),
            load_no: docket.load_no.clone(),
            bags: docket.bags,
            weight: docket.weight,
            country: docket.country.clone(),
            status: docket.status,
            created_by: docket.created_by,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().expect("dockets lock").push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: &DocketId) -> Result<Option<Docket>, DocketRepositoryError> {
        let rows = self.rows.lock().expect("dockets lock");
        Ok(rows.iter().find(|row| row.id == *id).cloned())
    }

    async fn list_by_status(
        &self,
        status: DocketStatus,
    ) -> Result<Vec<Docket>, DocketRepositoryError> {
        let rows = self.rows.lock().expect("dockets lock");
        let mut matching: Vec<Docket> = rows.iter().filter(|row| row.status == status).cloned().collect();
        match status {
            DocketStatus::Open => matching.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            DocketStatus::Closed => matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        }
        Ok(matching)
    }

    async fn set_status(
        &self,
        id: &DocketId,
        status: DocketStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Docket>, DocketRepositoryError> {
        let mut rows = self.rows.lock().expect("dockets lock");
        Ok(rows.iter_mut().find(|row| row.id == *id).map(|row| {
            row.status = status;
            row.updated_at = at;
            row.clone()
        }))
    }

    async fn count_by_status(&self, status: DocketStatus) -> Result<i64, DocketRepositoryError> {
        let rows = self.rows.lock().expect("dockets lock");
        Ok(rows.iter().filter(|row| row.status == status).count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryConnotes {
    rows: Mutex<Vec<Connote>>,
}

#[async_trait]
impl ConnoteRepository for InMemoryConnotes {
    async fn insert(&self, connote: &NewConnote) -> Result<Connote, ConnoteRepositoryError> {
        let mut rows = self.rows.lock().expect("connotes lock");
        if rows.iter().any(|row| row.awb_number == connote.awb_number) {
            return Err(ConnoteRepositoryError::duplicate_awb(connote.awb_number.clone()));
        }
        let now = Utc::now();
        let row = Connote {
            id: ConnoteId::random(),
            awb_number: connote.awb_number.clone(),
            shipper: connote.shipper.clone(),
            consignee: connote.consignee.clone(),
            service_type: connote.service_type,
            shipment_type: connote.shipment_type,
            description: connote.description.clone(),
            pieces: connote.pieces,
            weight: connote.weight,
            dimensions: connote.dimensions.clone(),
            customs_value: connote.customs_value,
            currency: connote.currency.clone(),
            charges: connote.charges,
            total_charges: connote.total_charges,
            status: connote.status,
            docket_id: connote.docket_id,
            created_by: connote.created_by,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: &ConnoteId) -> Result<Option<Connote>, ConnoteRepositoryError> {
        let rows = self.rows.lock().expect("connotes lock");
        Ok(rows.iter().find(|row| row.id == *id).cloned())
    }

    async fn list(&self, filter: &ConnoteFilter) -> Result<Vec<Connote>, ConnoteRepositoryError> {
        let rows = self.rows.lock().expect("connotes lock");
        Ok(rows.iter().rev().filter(|row| filter.matches(row)).cloned().collect())
    }

    async fn find_by_awb_fragment(
        &self,
        fragment: &str,
    ) -> Result<Option<Connote>, ConnoteRepositoryError> {
        let needle = fragment.to_lowercase();
        let rows = self.rows.lock().expect("connotes lock");
        Ok(rows
            .iter()
            .rev()
            .find(|row| row.awb_number.to_lowercase().contains(&needle))
            .cloned())
    }

    async fn set_status(
        &self,
        id: &ConnoteId,
        status: ConnoteStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Connote>, ConnoteRepositoryError> {
        let mut rows = self.rows.lock().expect("connotes lock");
        Ok(rows.iter_mut().find(|row| row.id == *id).map(|row| {
            row.status = status;
            row.updated_at = at;
            row.clone()
        }))
    }

    async fn count(&self, query: &ConnoteCountQuery) -> Result<i64, ConnoteRepositoryError> {
        let rows = self.rows.lock().expect("connotes lock");
        Ok(rows
            .iter()
            .filter(|row| query.status.is_none_or(|status| row.status == status))
            .filter(|row| query.updated_since.is_none_or(|since| row.updated_at >= since))
            .count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryHistory {
    rows: Mutex<Vec<TrackingEvent>>,
}

#[async_trait]
impl TrackingHistoryRepository for InMemoryHistory {
    async fn list_for_connote(
        &self,
        connote_id: &ConnoteId,
    ) -> Result<Vec<TrackingEvent>, TrackingHistoryRepositoryError> {
        let rows = self.rows.lock().expect("history lock");
        let mut events: Vec<TrackingEvent> = rows
            .iter()
            .filter(|row| row.connote_id == *connote_id)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.timestamp);
        Ok(events)
    }

    async fn insert(
        &self,
        event: &NewTrackingEvent,
    ) -> Result<TrackingEvent, TrackingHistoryRepositoryError> {
        let row = TrackingEvent {
            id: TrackingEventId::random(),
            connote_id: event.connote_id,
            status: event.status.clone(),
            location: event.location.clone(),
            description: event.description.clone(),
            timestamp: event.timestamp,
            created_by: event.created_by,
        };
        self.rows.lock().expect("history lock").push(row.clone());
        Ok(row)
    }
}
