//! Dashboard HTTP server
//!
//! A small hyper 1.x server exposing the embedded dashboard page, a JSON app
//! API over the tabular view engine, and the export downloads. One
//! [`TableView`] is kept per entity; handlers lock it, apply the request's
//! view-state parameters, and run the engine.

pub mod handlers;

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};

use crate::api::{ApiClient, ApiError};
use crate::catalog::{self, EntityDef};
use crate::config::FleetdeckConfig;
use crate::export::ExportFile;
use crate::table_view::TableView;

pub type RespBody = BoxBody<Bytes, Infallible>;
pub type Req = Request<Incoming>;
pub type Resp = Response<RespBody>;

pub fn body_from<T: Into<Bytes>>(data: T) -> RespBody {
    Full::new(data.into()).boxed()
}

/// Shared server state: the API client plus one lazily-created view per
/// entity. A view (snapshot and view state) is shared by every connected
/// client; this is an admin dashboard, not a multi-tenant surface.
pub struct AppState {
    pub config: FleetdeckConfig,
    pub client: Arc<ApiClient>,
    views: RwLock<HashMap<&'static str, Arc<Mutex<TableView>>>>,
}

impl AppState {
    pub fn new(config: FleetdeckConfig, client: Arc<ApiClient>) -> Self {
        Self { config, client, views: RwLock::new(HashMap::new()) }
    }

    /// Get or create the view instance for an entity.
    pub async fn view(&self, entity: &'static EntityDef) -> Arc<Mutex<TableView>> {
        if let Some(view) = self.views.read().await.get(entity.slug) {
            return view.clone();
        }
        let mut views = self.views.write().await;
        views
            .entry(entity.slug)
            .or_insert_with(|| {
                let mut view = TableView::new(entity, self.client.clone());
                view.view.set_page_size(self.config.ui.default_page_size);
                Arc::new(Mutex::new(view))
            })
            .clone()
    }
}

/// The Fleetdeck dashboard server.
pub struct DashboardServer {
    config: FleetdeckConfig,
}

impl DashboardServer {
    pub fn new(config: FleetdeckConfig) -> Self {
        Self { config }
    }

    /// Bind and serve until the process is stopped.
    pub async fn serve(self) -> Result<()> {
        self.config.validate()?;
        let client = Arc::new(ApiClient::from_config(&self.config.api)?);
        let addr = self.config.server.bind_addr();
        let access_log = self.config.server.access_log;
        let state = Arc::new(AppState::new(self.config, client));

        let listener = TcpListener::bind(&addr).await?;
        log::info!("🚀 Fleetdeck dashboard listening on http://{}", addr);
        log::info!("📚 {} entities in the catalog", catalog::CATALOG.len());

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let state = state.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req: Req| {
                    let state = state.clone();
                    async move {
                        let method = req.method().clone();
                        let path = req.uri().path().to_string();
                        let resp = handlers::route(req, state).await;
                        if access_log {
                            log::info!(
                                "{} {} {} from {}",
                                method,
                                path,
                                resp.status().as_u16(),
                                remote_addr
                            );
                        }
                        Ok::<Resp, Infallible>(resp)
                    }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    log::debug!("connection error from {}: {}", remote_addr, err);
                }
            });
        }
    }
}

// === Response helpers ===

pub fn json_response(status: StatusCode, body: &serde_json::Value) -> Resp {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body_from(body.to_string()))
        .expect("valid HTTP response")
}

/// Uniform error body: `{"error": code, "message": detail}`
pub fn json_error(status: StatusCode, code: &str, message: &str) -> Resp {
    json_response(status, &serde_json::json!({ "error": code, "message": message }))
}

pub fn html_response(html: String) -> Resp {
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/html; charset=utf-8")
        .body(body_from(html))
        .expect("valid HTTP response")
}

pub fn not_found() -> Resp {
    json_error(StatusCode::NOT_FOUND, "not_found", "No such resource")
}

/// Attachment response for a finished export.
pub fn download_response(file: ExportFile) -> Resp {
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", file.content_type)
        .header(
            "content-disposition",
            format!("attachment; filename=\"{}\"", file.filename),
        )
        .body(body_from(file.bytes))
        .expect("valid HTTP response")
}

/// Map an upstream API failure onto the app API, keeping the notification
/// contract: the dashboard shows `message` in its banner.
pub fn api_error_response(err: &ApiError) -> Resp {
    let status = match err {
        ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        ApiError::Api { .. } => StatusCode::BAD_GATEWAY,
        ApiError::Network(_) | ApiError::Decode(_) => StatusCode::BAD_GATEWAY,
    };
    log::error!("❌ fleet API error: {}", err);
    json_error(status, err.code(), &err.user_message())
}
