//! HTTP server implementation.
//!
//! hyper http1 with TokioIo, one spawned task per connection. Routing is a
//! chain of dispatchers; the first one that recognizes the path answers.

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::Args;
use crate::content::ContentService;
use crate::routes::{self, BoxBody};
use crate::types::SignpostError;

/// Shared application state.
pub struct AppState {
    pub args: Args,
    pub content: ContentService,
}

impl AppState {
    pub fn new(args: Args, content: ContentService) -> Self {
        Self { args, content }
    }
}

/// Start the HTTP server.
pub async fn run(state: Arc<AppState>) -> Result<(), SignpostError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Signpost listening on {}", state.args.listen);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests.
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    debug!(%method, %path, %addr, "request");

    if method == Method::OPTIONS {
        return Ok(routes::cors_preflight());
    }

    match path.as_str() {
        "/api/health" => return Ok(routes::health_check(state).await),
        "/api/ping" => return Ok(routes::ping_check(state).await),
        "/api/version" => return Ok(routes::version_info().await),
        _ => {}
    }

    // Each dispatcher consumes the request, so pick by prefix first.
    let response = if path.starts_with("/api/cms") {
        routes::handle_cms_request(req, state).await
    } else if path.starts_with("/api/forms") {
        routes::handle_forms_request(req, state).await
    } else if path.starts_with("/api/auth") {
        routes::handle_auth_request(req, state).await
    } else {
        None
    };

    Ok(response.unwrap_or_else(|| not_found(&method, &path)))
}

fn not_found(method: &Method, path: &str) -> Response<BoxBody> {
    routes::json_response(
        StatusCode::NOT_FOUND,
        &json!({ "detail": format!("No route for {} {}", method, path) }),
    )
}
