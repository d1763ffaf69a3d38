//! App API routing
//!
//! Routes:
//!
//! - `GET  /`                            embedded dashboard page
//! - `GET  /app/entities`                catalog listing
//! - `GET  /app/view/<slug>?...`         current page of one entity view
//! - `POST /app/view/<slug>`             create record (JSON body)
//! - `PUT  /app/view/<slug>/<id>`        update record (JSON body)
//! - `DELETE /app/view/<slug>/<id>?confirm=true`  delete record
//! - `GET  /app/export/<slug>.<ext>`     xlsx/csv/pdf download
//! - `GET  /app/print/<slug>`            print-formatted document
//!
//! View-state parameters (`q`, `sort`, `dir`, `toggle`, `page`, `size`,
//! `fields`, `field`) are accepted by the view, export and print routes alike, so an
//! export always covers exactly what the table shows.

use std::collections::HashMap;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::{Method, StatusCode};
use serde_json::{json, Value};

use super::{
    api_error_response, download_response, html_response, json_error, json_response, not_found,
    AppState, Req, Resp,
};
use crate::catalog::{self, EntityDef};
use crate::export::ExportFormat;
use crate::format::format_cell;
use crate::table_view::TableView;
use crate::view::SortDirection;

/// The embedded dashboard (single page with inline CSS/JS).
const DASHBOARD_HTML: &str = include_str!("dashboard.html");

pub async fn route(req: Req, state: Arc<AppState>) -> Resp {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let params = parse_query(req.uri().query().unwrap_or(""));

    match (&method, segments.as_slice()) {
        (&Method::GET, []) => dashboard(&state),
        (&Method::GET, ["app", "entities"]) => entities(),
        (&Method::GET, ["app", "view", slug]) => view_page(&state, slug, &params).await,
        (&Method::POST, ["app", "view", slug]) => create(&state, slug, req).await,
        (&Method::PUT, ["app", "view", slug, id]) => {
            let id = id.to_string();
            update(&state, slug, &id, req).await
        }
        (&Method::DELETE, ["app", "view", slug, id]) => remove(&state, slug, id, &params).await,
        (&Method::GET, ["app", "export", file]) => export(&state, file, &params).await,
        (&Method::GET, ["app", "print", slug]) => print(&state, slug, &params).await,
        _ => not_found(),
    }
}

fn dashboard(state: &AppState) -> Resp {
    html_response(DASHBOARD_HTML.replace("{{TITLE}}", &state.config.ui.title))
}

fn entities() -> Resp {
    let list: Vec<Value> = catalog::CATALOG
        .iter()
        .map(|e| json!({ "slug": e.slug, "title": e.title, "fields": e.fields }))
        .collect();
    json_response(StatusCode::OK, &json!({ "entities": list }))
}

/// Apply the request's view-state parameters. Argument order does not
/// matter; each setter enforces the page-reset invariant itself.
fn apply_view_params(view: &mut TableView, params: &HashMap<String, String>) {
    if let Some(q) = params.get("q") {
        view.view.set_query(q.clone());
    }
    if let Some(key) = params.get("toggle") {
        view.view.toggle_sort(key.clone());
    } else if let Some(key) = params.get("sort") {
        let dir = params
            .get("dir")
            .and_then(|d| SortDirection::parse(d))
            .unwrap_or(SortDirection::Ascending);
        view.view.set_sort(key.clone(), dir);
    }
    if let Some(size) = params.get("size").and_then(|s| s.parse().ok()) {
        view.view.set_page_size(size);
    }
    if let Some(fields) = params.get("fields") {
        let keys: Vec<String> = fields.split(',').map(str::to_string).collect();
        let entity = view.entity();
        view.view.set_selected(&keys, &entity.fields);
    }
    if let Some(key) = params.get("field") {
        view.view.toggle_field(key);
    }
    // Page last: an explicit page request wins over the resets above
    if let Some(page) = params.get("page").and_then(|p| p.parse().ok()) {
        view.view.set_page(page);
    }
}

/// Fetch a fresh snapshot when the view has none yet or the client asked
/// for one. The view lock is released while the request is in flight; the
/// generation token keeps a superseded response from being applied.
async fn ensure_snapshot(
    state: &AppState,
    view_arc: &Arc<tokio::sync::Mutex<TableView>>,
    force: bool,
) -> Result<(), Resp> {
    let (entity, generation) = {
        let mut view = view_arc.lock().await;
        if view.is_loaded() && !force {
            return Ok(());
        }
        (view.entity(), view.begin_refresh())
    };

    let result = state.client.list(entity.path).await;

    let mut view = view_arc.lock().await;
    match result {
        Ok(records) => {
            view.apply_snapshot(generation, records);
            Ok(())
        }
        Err(e) => {
            view.fail_refresh(generation);
            Err(api_error_response(&e))
        }
    }
}

async fn view_page(state: &AppState, slug: &str, params: &HashMap<String, String>) -> Resp {
    let Some(entity) = catalog::find(slug) else {
        return not_found();
    };
    let view_arc = state.view(entity).await;

    let force = params.get("refresh").map(|v| v == "1" || v == "true").unwrap_or(false);
    if let Err(resp) = ensure_snapshot(state, &view_arc, force).await {
        return resp;
    }

    let mut view = view_arc.lock().await;
    apply_view_params(&mut view, params);
    json_response(
        StatusCode::OK,
        &json!({
            "entity": entity.slug,
            "title": entity.title,
            "view": view.view,
            "page": page_json(&view),
        }),
    )
}

/// Render the current page with display-formatted cells, one row per record
/// in selected-column order.
fn page_json(view: &TableView) -> Value {
    let entity = view.entity();
    let fields = view.view.selected_fields(&entity.fields);
    let page = view.page();
    let rows: Vec<Value> = page
        .records
        .iter()
        .map(|record| {
            let cells: Vec<String> = fields
                .iter()
                .map(|f| format_cell(record.get_path(&f.key), f.kind))
                .collect();
            json!({ "id": record.id(), "cells": cells })
        })
        .collect();
    json!({
        "rows": rows,
        "total_records": page.total_records,
        "total_pages": page.total_pages,
        "page": page.page,
        "page_size": page.page_size,
    })
}

async fn read_json_body(req: Req) -> Result<Value, Resp> {
    let bytes = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => {
            return Err(json_error(StatusCode::BAD_REQUEST, "invalid_body", "Unreadable body"))
        }
    };
    serde_json::from_slice(&bytes)
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_body", "Body must be JSON"))
}

async fn create(state: &AppState, slug: &str, req: Req) -> Resp {
    let Some(entity) = catalog::find(slug) else {
        return not_found();
    };
    let body = match read_json_body(req).await {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    let view_arc = state.view(entity).await;
    let mut view = view_arc.lock().await;
    match view.create(&body).await {
        Ok(()) => json_response(StatusCode::CREATED, &json!({ "ok": true })),
        Err(e) => api_error_response(&e),
    }
}

async fn update(state: &AppState, slug: &str, id: &str, req: Req) -> Resp {
    let Some(entity) = catalog::find(slug) else {
        return not_found();
    };
    let body = match read_json_body(req).await {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    let view_arc = state.view(entity).await;
    let mut view = view_arc.lock().await;
    match view.update(id, &body).await {
        Ok(()) => json_response(StatusCode::OK, &json!({ "ok": true })),
        Err(e) => api_error_response(&e),
    }
}

async fn remove(
    state: &AppState,
    slug: &str,
    id: &str,
    params: &HashMap<String, String>,
) -> Resp {
    let Some(entity) = catalog::find(slug) else {
        return not_found();
    };
    let confirmed = params.get("confirm").map(|v| v == "true" || v == "1").unwrap_or(false);

    let view_arc = state.view(entity).await;
    let mut view = view_arc.lock().await;
    match view.remove(id, confirmed).await {
        Ok(true) => json_response(StatusCode::OK, &json!({ "ok": true, "deleted": true })),
        Ok(false) => json_error(
            StatusCode::BAD_REQUEST,
            "confirmation_required",
            "Delete was not confirmed; no request was issued",
        ),
        Err(e) => api_error_response(&e),
    }
}

async fn export(state: &AppState, file: &str, params: &HashMap<String, String>) -> Resp {
    let Some((slug, ext)) = file.rsplit_once('.') else {
        return not_found();
    };
    let format = match ExportFormat::parse(ext) {
        Ok(format) => format,
        Err(e) => return json_error(StatusCode::BAD_REQUEST, "unknown_format", &e.to_string()),
    };
    match render_export(state, slug, format, params).await {
        Ok(file) => download_response(file),
        Err(resp) => resp,
    }
}

async fn print(state: &AppState, slug: &str, params: &HashMap<String, String>) -> Resp {
    match render_export(state, slug, ExportFormat::Print, params).await {
        Ok(file) => {
            // Rendered inline so the new browsing context can print itself
            let html = String::from_utf8(file.bytes).unwrap_or_default();
            html_response(html)
        }
        Err(resp) => resp,
    }
}

async fn render_export(
    state: &AppState,
    slug: &str,
    format: ExportFormat,
    params: &HashMap<String, String>,
) -> Result<crate::export::ExportFile, Resp> {
    let entity: &'static EntityDef = catalog::find(slug).ok_or_else(not_found)?;
    let view_arc = state.view(entity).await;
    ensure_snapshot(state, &view_arc, false).await?;

    let mut view = view_arc.lock().await;
    apply_view_params(&mut view, params);
    view.export(format).map_err(|e| {
        log::error!("❌ export failed for {}: {}", slug, e);
        json_error(StatusCode::INTERNAL_SERVER_ERROR, "export_failed", &e.to_string())
    })
}

/// Decode an `application/x-www-form-urlencoded` query string. Later
/// duplicates win; `+` decodes to space.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = value.replace('+', " ");
        let value = urlencoding::decode(&value).map(|v| v.into_owned()).unwrap_or(value);
        params.insert(key.to_string(), value);
    }
    params
}
