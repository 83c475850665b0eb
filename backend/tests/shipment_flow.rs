//! End-to-end HTTP flow over in-memory stores: manifest a docket, book a
//! connote against it, move it through tracking, and read the dashboard.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use docketsync::Trace;
use docketsync::domain::TRACE_ID_HEADER;
use docketsync::inbound::http::configure_api;
use docketsync::inbound::http::state::{HttpState, HttpStatePorts};

mod support;

use support::{
    InMemoryConnotes, InMemoryDockets, InMemoryHistory, TickingClock, session_middleware, sign_in,
};

#[fixture]
fn ports() -> HttpStatePorts {
    HttpStatePorts {
        dockets: Arc::new(InMemoryDockets::default()),
        connotes: Arc::new(InMemoryConnotes::default()),
        tracking: Arc::new(InMemoryHistory::default()),
        clock: Arc::new(TickingClock::default()),
        ..HttpStatePorts::fixtures()
    }
}

macro_rules! flow_app {
    ($ports:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new($ports)))
                .wrap(Trace)
                .service(
                    web::scope("/api/v1")
                        .wrap(session_middleware())
                        .configure(configure_api),
                ),
        )
        .await
    };
}

async fn create_docket<S, B>(app: &S, cookie: &Cookie<'static>, docket_no: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/dockets")
            .cookie(cookie.clone())
            .set_json(json!({
                "summaryNo": format!("S-{docket_no}"),
                "docketNo": docket_no,
                "station": "SYD",
                "carrier": "QF",
                "country": "Japan"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let docket: Value = test::read_body_json(res).await;
    docket["id"].as_str().expect("docket id").to_owned()
}

async fn close_docket<S, B>(app: &S, cookie: &Cookie<'static>, id: &str)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/dockets/{id}/close"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

async fn docket_nos<S, B>(app: &S, cookie: &Cookie<'static>, status: &str) -> Vec<String>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/dockets?status={status}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let listed: Value = test::read_body_json(res).await;
    listed
        .as_array()
        .expect("docket list")
        .iter()
        .filter_map(|row| row["docketNo"].as_str().map(str::to_owned))
        .collect()
}

fn party(name: &str, city: &str, country: &str, postal_code: &str) -> Value {
    json!({
        "name": name,
        "address": "1 Harbour Road",
        "city": city,
        "country": country,
        "postalCode": postal_code,
    })
}

fn connote_body(awb: &str, docket_id: &str) -> Value {
    json!({
        "awbNumber": awb,
        "shipper": party("Acme Exports", "Sydney", "Australia", "2000"),
        "consignee": party("Globex", "Osaka", "Japan", "530-0001"),
        "serviceType": "express",
        "description": "Machine parts",
        "pieces": 3,
        "weight": "18.5",
        "charges": {"freight": "200", "fuelSurcharge": "25.50", "insurance": "4.5"},
        "docketId": docket_id
    })
}

#[rstest]
#[actix_web::test]
async fn docket_to_delivery(ports: HttpStatePorts) {
    let app = flow_app!(ports);
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/dockets")
            .cookie(cookie.clone())
            .set_json(json!({
                "summaryNo": "S-100",
                "docketNo": "D-100",
                "station": "SYD",
                "carrier": "QF",
                "country": "Japan"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let docket: Value = test::read_body_json(res).await;
    let docket_id = docket["id"].as_str().expect("docket id").to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/connotes")
            .cookie(cookie.clone())
            .set_json(connote_body("AWB-884-001", &docket_id))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let connote: Value = test::read_body_json(res).await;
    assert_eq!(connote["totalCharges"], "230.00");
    assert_eq!(connote["status"], "created");
    assert_eq!(connote["docketId"], docket_id.as_str());
    let connote_id = connote["id"].as_str().expect("connote id").to_owned();

    for (status, location) in [("Departed origin facility", "SYD"), ("Arrived at hub", "NRT")] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/tracking/{connote_id}/events"))
                .cookie(cookie.clone())
                .set_json(json!({"status": status, "location": location}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/connotes/{connote_id}/status"))
            .cookie(cookie.clone())
            .set_json(json!({"status": "in_transit"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/tracking/884")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let trace: Value = test::read_body_json(res).await;
    assert_eq!(trace["awbNumber"], "AWB-884-001");
    assert_eq!(trace["status"], "in_transit");
    assert_eq!(trace["origin"], "Sydney, Australia");
    assert_eq!(trace["destination"], "Osaka, Japan");
    assert_eq!(trace["history"].as_array().map(Vec::len), Some(2));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/dashboard")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let dashboard: Value = test::read_body_json(res).await;
    assert_eq!(dashboard["totalConnotes"], 1);
    assert_eq!(dashboard["openDockets"], 1);
    assert_eq!(dashboard["inTransit"], 1);
    assert_eq!(dashboard["deliveredToday"], 0);

    assert_eq!(docket_nos(&app, &cookie, "open").await, ["D-100"]);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/dockets/{docket_id}/close"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let closed: Value = test::read_body_json(res).await;
    assert_eq!(closed["status"], "closed");

    assert!(docket_nos(&app, &cookie, "open").await.is_empty());
    assert_eq!(docket_nos(&app, &cookie, "closed").await, ["D-100"]);
}

#[rstest]
#[actix_web::test]
async fn closed_dockets_list_most_recently_closed_first(ports: HttpStatePorts) {
    let app = flow_app!(ports);
    let cookie = sign_in(&app).await;

    let first = create_docket(&app, &cookie, "D-1").await;
    let second = create_docket(&app, &cookie, "D-2").await;
    create_docket(&app, &cookie, "D-3").await;

    close_docket(&app, &cookie, &second).await;
    close_docket(&app, &cookie, &first).await;

    assert_eq!(docket_nos(&app, &cookie, "closed").await, ["D-1", "D-2"]);
    assert_eq!(docket_nos(&app, &cookie, "open").await, ["D-3"]);
}

#[rstest]
#[actix_web::test]
async fn invoice_reflects_the_stored_connote(ports: HttpStatePorts) {
    let app = flow_app!(ports);
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/connotes")
            .cookie(cookie.clone())
            .set_json(connote_body("AWB-31-337", ""))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let connote: Value = test::read_body_json(res).await;
    let id = connote["id"].as_str().expect("connote id");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/connotes/{id}/invoice"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let invoice: Value = test::read_body_json(res).await;
    assert_eq!(invoice["barcode"], "31337");
    assert_eq!(invoice["total"], "230.00");
    assert_eq!(invoice["shipper"]["city"], "SYDNEY");
    assert_eq!(invoice["destinationCode"], "JAPAN");
}

#[rstest]
#[actix_web::test]
async fn search_and_duplicates(ports: HttpStatePorts) {
    let app = flow_app!(ports);
    let cookie = sign_in(&app).await;

    for awb in ["AWB-1", "AWB-2", "AWB-1"] {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/connotes")
                .cookie(cookie.clone())
                .set_json(connote_body(awb, ""))
                .to_request(),
        )
        .await;
    }

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/connotes?search=awb")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let listed: Value = test::read_body_json(res).await;
    let awbs: Vec<&str> = listed
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|row| row["awbNumber"].as_str())
        .collect();
    assert_eq!(awbs, ["AWB-2", "AWB-1"]);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/connotes")
            .cookie(cookie)
            .set_json(connote_body("AWB-2", ""))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[case("/api/v1/me")]
#[case("/api/v1/dockets")]
#[case("/api/v1/connotes")]
#[case("/api/v1/finance")]
#[actix_web::test]
async fn api_requires_a_session(ports: HttpStatePorts, #[case] path: &str) {
    let app = flow_app!(ports);
    let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session(ports: HttpStatePorts) {
    let app = flow_app!(ports);
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie")
        .into_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/me")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
