//! HTTP routes for Signpost.
//!
//! Each module exposes a `handle_*_request` dispatcher that returns
//! `Some(response)` when it owns the path and `None` otherwise, so the server
//! can try them in order.

pub mod auth_routes;
pub mod cms;
pub mod forms;
pub mod health;

pub use auth_routes::handle_auth_request;
pub use cms::handle_cms_request;
pub use forms::handle_forms_request;
pub use health::{health_check, ping_check, version_info};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::SignpostError;

pub type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Request bodies larger than this are rejected outright.
const MAX_BODY_BYTES: usize = 65536;

// =============================================================================
// Response helpers
// =============================================================================

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .body(full_body(json))
        .unwrap()
}

pub fn error_response(err: SignpostError) -> Response<BoxBody> {
    let (status, message) = err.into_status_code_and_body();
    json_response(status, &json!({ "detail": message }))
}

pub fn method_not_allowed() -> Response<BoxBody> {
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &json!({ "detail": "Method not allowed" }),
    )
}

pub fn cors_preflight() -> Response<BoxBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .header("Access-Control-Max-Age", "86400")
        .body(empty_body())
        .unwrap()
}

pub fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

pub fn empty_body() -> BoxBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

pub async fn parse_json_body<T: for<'de> Deserialize<'de>>(
    req: Request<hyper::body::Incoming>,
) -> Result<T, SignpostError> {
    let body = req
        .collect()
        .await
        .map_err(|e| SignpostError::Http(format!("Failed to read body: {}", e)))?;

    let bytes = body.to_bytes();
    if bytes.len() > MAX_BODY_BYTES {
        return Err(SignpostError::Http("Request body too large".into()));
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| SignpostError::Http(format!("Invalid JSON: {}", e)))
}
