//! Content API routes.
//!
//! - GET  /api/cms/all                 - bulk snapshot of everything
//! - POST /api/cms/initialize          - idempotent seeding
//! - GET/PUT /api/cms/about            - About singleton
//! - GET/PUT /api/cms/settings         - Settings singleton
//! - GET/POST /api/cms/{collection}    - list / create
//! - PUT/DELETE /api/cms/{collection}/{id} - merge-update / delete
//!
//! Collection names use their URL form ("impact-stories"). Stats have no
//! create or delete; the content service rejects both.

use hyper::{Method, Request, Response, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::routes::{
    error_response, json_response, method_not_allowed, parse_json_body, BoxBody,
};
use crate::server::AppState;
use crate::store::Collection;

pub async fn handle_cms_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Option<Response<BoxBody>> {
    let path = req.uri().path();
    let method = req.method();

    if !path.starts_with("/api/cms") {
        return None;
    }

    // Remove query string for matching
    let path = path.split('?').next().unwrap_or(path).to_string();
    debug!(%method, %path, "cms request");

    let response = match (method.clone(), path.as_str()) {
        (Method::GET, "/api/cms/all") => handle_get_all(state).await,
        (Method::POST, "/api/cms/initialize") => handle_initialize(state).await,

        (Method::GET, "/api/cms/about") => handle_get_about(state).await,
        (Method::PUT, "/api/cms/about") => handle_put_about(req, state).await,
        (Method::GET, "/api/cms/settings") => handle_get_settings(state).await,
        (Method::PUT, "/api/cms/settings") => handle_put_settings(req, state).await,

        (_, "/api/cms/all") | (_, "/api/cms/initialize") => Some(method_not_allowed()),
        (_, "/api/cms/about") | (_, "/api/cms/settings") => Some(method_not_allowed()),

        _ => handle_collection_route(req, state, &path).await,
    };

    Some(response.unwrap_or_else(not_found))
}

fn not_found() -> Response<BoxBody> {
    json_response(
        StatusCode::NOT_FOUND,
        &json!({ "detail": "Unknown CMS route" }),
    )
}

async fn handle_get_all(state: Arc<AppState>) -> Option<Response<BoxBody>> {
    Some(match state.content.get_all().await {
        Ok(all) => json_response(StatusCode::OK, &all),
        Err(e) => error_response(e),
    })
}

async fn handle_initialize(state: Arc<AppState>) -> Option<Response<BoxBody>> {
    Some(match state.content.initialize().await {
        Ok(seeded) => json_response(
            StatusCode::OK,
            &json!({ "success": true, "seeded": seeded }),
        ),
        Err(e) => error_response(e),
    })
}

async fn handle_get_about(state: Arc<AppState>) -> Option<Response<BoxBody>> {
    Some(match state.content.get_about().await {
        Ok(about) => json_response(StatusCode::OK, &about),
        Err(e) => error_response(e),
    })
}

async fn handle_put_about(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Option<Response<BoxBody>> {
    let body: Value = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return Some(error_response(e)),
    };
    Some(match state.content.put_about(body).await {
        Ok(about) => json_response(StatusCode::OK, &about),
        Err(e) => error_response(e),
    })
}

async fn handle_get_settings(state: Arc<AppState>) -> Option<Response<BoxBody>> {
    Some(match state.content.get_settings().await {
        Ok(settings) => json_response(StatusCode::OK, &settings),
        Err(e) => error_response(e),
    })
}

async fn handle_put_settings(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Option<Response<BoxBody>> {
    let body: Value = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return Some(error_response(e)),
    };
    Some(match state.content.put_settings(body).await {
        Ok(settings) => json_response(StatusCode::OK, &settings),
        Err(e) => error_response(e),
    })
}

/// `/api/cms/{collection}` and `/api/cms/{collection}/{id}`.
async fn handle_collection_route(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    path: &str,
) -> Option<Response<BoxBody>> {
    let rest = path.strip_prefix("/api/cms/")?;
    let mut segments = rest.splitn(2, '/');
    let collection = Collection::from_path(segments.next()?)?;
    let id = segments.next();

    let method = req.method().clone();
    let response = match (method, id) {
        (Method::GET, None) => match state.content.list(collection).await {
            Ok(records) => json_response(StatusCode::OK, &records),
            Err(e) => error_response(e),
        },
        (Method::POST, None) => {
            let body: Value = match parse_json_body(req).await {
                Ok(b) => b,
                Err(e) => return Some(error_response(e)),
            };
            match state.content.create(collection, body).await {
                Ok(record) => json_response(StatusCode::OK, &record),
                Err(e) => error_response(e),
            }
        }
        (Method::PUT, Some(id)) => {
            let id = id.to_string();
            let body: Value = match parse_json_body(req).await {
                Ok(b) => b,
                Err(e) => return Some(error_response(e)),
            };
            match state.content.update(collection, &id, body).await {
                Ok(record) => json_response(StatusCode::OK, &record),
                Err(e) => error_response(e),
            }
        }
        (Method::DELETE, Some(id)) => match state.content.delete(collection, id).await {
            Ok(()) => json_response(StatusCode::OK, &json!({ "success": true })),
            Err(e) => error_response(e),
        },
        _ => method_not_allowed(),
    };
    Some(response)
}
