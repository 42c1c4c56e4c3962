//! Admin authentication route.
//!
//! - POST /api/auth/login - verify the admin credential pair
//!
//! Login is stateless: a successful check returns `{"authenticated": true}`
//! and nothing else. There is no token or server-side session; the admin
//! surface holds the result for the lifetime of its own session.

use hyper::{Method, Request, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth;
use crate::routes::{error_response, json_response, parse_json_body, BoxBody};
use crate::server::AppState;
use crate::types::SignpostError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn handle_auth_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Option<Response<BoxBody>> {
    let path = req.uri().path();
    let method = req.method();

    if !path.starts_with("/api/auth") {
        return None;
    }

    let path = path.split('?').next().unwrap_or(path);

    match (method.clone(), path) {
        (Method::POST, "/api/auth/login") => Some(handle_login(req, state).await),
        _ => None,
    }
}

async fn handle_login(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let body: LoginRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(e),
    };

    match auth::check_credentials(&state.args, &body.username, &body.password) {
        Ok(()) => {
            info!(username = %body.username, "admin login accepted");
            json_response(StatusCode::OK, &json!({ "authenticated": true }))
        }
        Err(SignpostError::AuthRejected(_)) => {
            warn!(username = %body.username, "admin login rejected");
            json_response(
                StatusCode::UNAUTHORIZED,
                &json!({ "detail": "Invalid credentials" }),
            )
        }
        Err(e) => error_response(e),
    }
}
