//! API client tests against an in-process stub server
//!
//! A tiny hyper server stands in for the fleet API so the client's request
//! shapes, auth header and error taxonomy can be checked end to end without
//! any external service.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{combinators::BoxBody, BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::json;
use tokio::net::TcpListener;

use fleetdeck_core::api::{ApiClient, ApiError, Session};
use fleetdeck_core::table_view::TableView;
use fleetdeck_core::catalog;

/// One observed request: method, path+query, auth header, body.
#[derive(Debug, Clone)]
struct Seen {
    method: String,
    uri: String,
    auth: Option<String>,
}

type Log = Arc<Mutex<Vec<Seen>>>;

/// Canned response the stub returns for every request.
#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: serde_json::Value,
}

async fn handle(
    req: Request<Incoming>,
    log: Log,
    canned: Canned,
) -> Result<Response<BoxBody<Bytes, Infallible>>, Infallible> {
    log.lock().unwrap().push(Seen {
        method: req.method().to_string(),
        uri: req.uri().to_string(),
        auth: req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    let body = Full::new(Bytes::from(canned.body.to_string())).boxed();
    Ok(Response::builder()
        .status(canned.status)
        .header("content-type", "application/json")
        .body(body)
        .unwrap())
}

/// Start a stub server on an ephemeral port; returns its base URL and the
/// request log.
async fn stub(status: StatusCode, body: serde_json::Value) -> (String, Log) {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let canned = Canned { status, body };

    let log_for_server = log.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else { break };
            let io = TokioIo::new(stream);
            let log = log_for_server.clone();
            let canned = canned.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req| handle(req, log.clone(), canned.clone()));
                let _ = http1::Builder::new().serve_connection(io, service).await;
            });
        }
    });

    (format!("http://{}", addr), log)
}

fn client(base: &str, token: Option<&str>) -> ApiClient {
    ApiClient::new(base, Session::new(token.map(str::to_string)), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn list_sends_bearer_and_decodes_records() {
    let (base, log) = stub(
        StatusCode::OK,
        json!([{ "id": 1, "name": "Kwame Mensah" }, { "id": 2, "name": "Ama Owusu" }]),
    )
    .await;
    let c = client(&base, Some("secret-token"));

    let records = c.list("/api/drivers").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get_path("name"), Some(&json!("Kwame Mensah")));

    let seen = log.lock().unwrap();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].uri, "/api/drivers");
    assert_eq!(seen[0].auth.as_deref(), Some("Bearer secret-token"));
}

#[tokio::test]
async fn anonymous_client_sends_no_auth_header() {
    let (base, log) = stub(StatusCode::OK, json!([])).await;
    let c = client(&base, None);

    c.list("/api/vehicles").await.unwrap();
    assert_eq!(log.lock().unwrap()[0].auth, None);
}

#[tokio::test]
async fn mutations_use_id_query_parameters() {
    let (base, log) = stub(StatusCode::OK, json!({ "id": 7 })).await;
    let c = client(&base, None);

    c.create("/api/drivers", &json!({ "name": "New Driver" })).await.unwrap();
    c.update("/api/drivers", "7", &json!({ "name": "Renamed" })).await.unwrap();
    c.delete("/api/drivers", "7").await.unwrap();

    let seen = log.lock().unwrap();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].uri, "/api/drivers");
    assert_eq!(seen[1].method, "PUT");
    assert_eq!(seen[1].uri, "/api/drivers?id=7");
    assert_eq!(seen[2].method, "DELETE");
    assert_eq!(seen[2].uri, "/api/drivers?id=7");
}

#[tokio::test]
async fn upstream_error_message_is_surfaced_verbatim() {
    let (base, _log) =
        stub(StatusCode::CONFLICT, json!({ "error": "license number already exists" })).await;
    let c = client(&base, None);

    let err = c.create("/api/drivers", &json!({})).await.unwrap_err();
    assert_eq!(err.user_message(), "license number already exists");
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "license number already exists");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn error_without_body_gets_generic_message() {
    let (base, _log) = stub(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;
    let c = client(&base, None);

    let err = c.list("/api/repairs").await.unwrap_err();
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Request failed with status 500");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn unauthorized_maps_to_login_required() {
    for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
        let (base, _log) = stub(status, json!({ "error": "nope" })).await;
        let c = client(&base, Some("expired"));

        let err = c.list("/api/users").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert_eq!(err.code(), "login_required");
    }
}

#[tokio::test]
async fn network_failure_is_a_network_error() {
    // Nothing listens here; connection is refused immediately
    let c = client("http://127.0.0.1:9", None);

    let err = c.list("/api/drivers").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message(), "Network error. Please try again.");
}

#[tokio::test]
async fn malformed_collection_is_a_decode_error() {
    let (base, _log) = stub(StatusCode::OK, json!({ "not": "an array" })).await;
    let c = client(&base, None);

    let err = c.list("/api/drivers").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn mutation_refetches_the_snapshot() {
    let (base, log) = stub(StatusCode::OK, json!([])).await;
    let c = Arc::new(client(&base, None));
    let mut view = TableView::new(catalog::find("drivers").unwrap(), c);

    // An empty array is a valid create response body here; the stub returns
    // the same canned body for every request.
    view.create(&json!({ "name": "New Driver" })).await.unwrap();

    let seen = log.lock().unwrap();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[1].method, "GET");
    assert_eq!(seen[1].uri, "/api/drivers");
}
