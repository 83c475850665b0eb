//! Shipment tracking handlers.
//!
//! ```text
//! GET /api/v1/tracking/{awb}
//! POST /api/v1/tracking/{connote_id}/events {"status":"Departed","location":"SYD"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ConnoteId, ConnoteStatus, ModuleId, ProfileId, ShipmentTrace, TrackingEvent,
    TrackingEventDraft, TrackingEventId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEventResponse {
    #[schema(value_type = String)]
    pub id: TrackingEventId,
    #[schema(value_type = String)]
    pub connote_id: ConnoteId,
    #[schema(example = "Departed origin facility")]
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[schema(value_type = Option<String>)]
    pub created_by: Option<ProfileId>,
}

impl From<TrackingEvent> for TrackingEventResponse {
    fn from(event: TrackingEvent) -> Self {
        Self {
            id: event.id,
            connote_id: event.connote_id,
            status: event.status,
            location: event.location,
            description: event.description,
            timestamp: event.timestamp,
            created_by: event.created_by,
        }
    }
}

/// Where a shipment is and what happened to it so far.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentTraceResponse {
    #[schema(value_type = String)]
    pub connote_id: ConnoteId,
    pub awb_number: String,
    #[schema(value_type = String, example = "in_transit")]
    pub status: ConnoteStatus,
    #[schema(example = "Sydney, Australia")]
    pub origin: String,
    #[schema(example = "Osaka, Japan")]
    pub destination: String,
    pub last_updated: DateTime<Utc>,
    /// Oldest first.
    pub history: Vec<TrackingEventResponse>,
}

impl From<ShipmentTrace> for ShipmentTraceResponse {
    fn from(trace: ShipmentTrace) -> Self {
        Self {
            connote_id: trace.connote_id,
            awb_number: trace.awb_number,
            status: trace.status,
            origin: trace.origin,
            destination: trace.destination,
            last_updated: trace.last_updated,
            history: trace.history.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request body for `POST /api/v1/tracking/{connote_id}/events`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordEventBody {
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Defaults to the time of the request.
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<RecordEventBody> for TrackingEventDraft {
    fn from(body: RecordEventBody) -> Self {
        Self {
            status: body.status,
            location: body.location,
            description: body.description,
            timestamp: body.timestamp,
        }
    }
}

/// Look a shipment up by AWB; partial AWBs match the newest connote.
#[utoipa::path(
    get,
    path = "/api/v1/tracking/{awb}",
    params(("awb" = String, Path, description = "AWB number or fragment")),
    responses(
        (status = 200, description = "Shipment trace", body = ShipmentTraceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Tracking module not enabled", body = ErrorSchema),
        (status = 404, description = "Shipment not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tracking"],
    operation_id = "trackShipment"
)]
#[get("/tracking/{awb}")]
pub async fn track_shipment(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<ShipmentTraceResponse>> {
    caller.require_module(ModuleId::Tracking)?;
    let trace = state.tracking.trace(&path).await?;
    Ok(web::Json(trace.into()))
}

/// Append a history event to a connote.
#[utoipa::path(
    post,
    path = "/api/v1/tracking/{connote_id}/events",
    params(("connote_id" = String, Path, description = "Connote identifier")),
    request_body = RecordEventBody,
    responses(
        (status = 201, description = "Event recorded", body = TrackingEventResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Tracking module not enabled", body = ErrorSchema),
        (status = 404, description = "Connote not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tracking"],
    operation_id = "recordTrackingEvent"
)]
#[post("/tracking/{connote_id}/events")]
pub async fn record_event(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<RecordEventBody>,
) -> ApiResult<HttpResponse> {
    let context = caller.require_module(ModuleId::Tracking)?;
    let connote_id = ConnoteId::from_uuid(parse_uuid(&path, FieldName::new("connoteId"))?);
    let event = state
        .tracking
        .record_event(context, connote_id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(TrackingEventResponse::from(event)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::TimeZone;
    use serde_json::{Value, json};

    use crate::domain::ports::{MockConnoteRepository, MockTrackingHistoryRepository};
    use crate::domain::service_fixtures::connote;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{sign_in, test_session_middleware, test_sign_in};

    macro_rules! tracking_app {
        ($ports:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(HttpState::new($ports)))
                    .wrap(test_session_middleware())
                    .service(test_sign_in)
                    .service(
                        web::scope("/api/v1")
                            .service(track_shipment)
                            .service(record_event),
                    ),
            )
            .await
        };
    }

    fn event(connote_id: ConnoteId, status: &str, hour: u32) -> TrackingEvent {
        TrackingEvent {
            id: TrackingEventId::random(),
            connote_id,
            status: status.into(),
            location: Some("SYD".into()),
            description: None,
            timestamp: Utc
                .with_ymd_and_hms(2026, 3, 14, hour, 0, 0)
                .single()
                .expect("valid timestamp"),
            created_by: None,
        }
    }

    #[actix_web::test]
    async fn trace_returns_history_oldest_first() {
        let row = connote("AWB-5001");
        let id = row.id;
        let mut connotes = MockConnoteRepository::new();
        connotes
            .expect_find_by_awb_fragment()
            .withf(|fragment| fragment == "5001")
            .returning(move |_| Ok(Some(row.clone())));
        let mut history = MockTrackingHistoryRepository::new();
        history
            .expect_list_for_connote()
            .returning(move |_| Ok(vec![event(id, "Arrived", 20), event(id, "Departed", 9)]));
        let app = tracking_app!(HttpStatePorts {
            connotes: Arc::new(connotes),
            tracking: Arc::new(history),
            ..HttpStatePorts::fixtures()
        });
        let cookie = sign_in(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/tracking/5001")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["awbNumber"], "AWB-5001");
        assert_eq!(body["origin"], "Sydney, Australia");
        assert_eq!(body["history"][0]["status"], "Departed");
        assert_eq!(body["history"][1]["status"], "Arrived");
    }

    #[actix_web::test]
    async fn unknown_awb_is_not_found() {
        let app = tracking_app!(HttpStatePorts::fixtures());
        let cookie = sign_in(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/tracking/NOPE")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Shipment not found");
    }

    #[actix_web::test]
    async fn blank_event_status_is_rejected() {
        let app = tracking_app!(HttpStatePorts::fixtures());
        let cookie = sign_in(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/tracking/{}/events", ConnoteId::random()))
                .cookie(cookie)
                .set_json(json!({"status": "  "}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "status");
    }

    #[actix_web::test]
    async fn recording_an_event_needs_an_existing_connote() {
        let app = tracking_app!(HttpStatePorts::fixtures());
        let cookie = sign_in(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/tracking/{}/events", ConnoteId::random()))
                .cookie(cookie)
                .set_json(json!({"status": "Departed"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn recorded_events_carry_the_author() {
        let row = connote("AWB-5002");
        let id = row.id;
        let mut connotes = MockConnoteRepository::new();
        connotes
            .expect_find()
            .returning(move |_| Ok(Some(row.clone())));
        let mut history = MockTrackingHistoryRepository::new();
        history.expect_insert().times(1).returning(|new_event| {
            Ok(TrackingEvent {
                id: TrackingEventId::random(),
                connote_id: new_event.connote_id,
                status: new_event.status.clone(),
                location: new_event.location.clone(),
                description: new_event.description.clone(),
                timestamp: new_event.timestamp,
                created_by: new_event.created_by,
            })
        });
        let app = tracking_app!(HttpStatePorts {
            connotes: Arc::new(connotes),
            tracking: Arc::new(history),
            ..HttpStatePorts::fixtures()
        });
        let cookie = sign_in(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/tracking/{id}/events"))
                .cookie(cookie)
                .set_json(json!({"status": " Departed ", "location": "SYD"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "Departed");
        assert_eq!(body["connoteId"], id.to_string());
        assert!(body["createdBy"].is_string());
    }
}
