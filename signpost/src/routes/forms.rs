//! Form submission routes.
//!
//! - POST /api/forms/submit       - append a submission, fire the notification
//! - GET  /api/forms/submissions  - list submissions, `?formType=` to filter
//!
//! Submissions are append-only; there is no update or delete surface.

use hyper::{Method, Request, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::routes::{
    error_response, json_response, method_not_allowed, parse_json_body, BoxBody,
};
use crate::server::AppState;
use crate::types::SignpostError;
use signpost_client::FormType;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest {
    form_type: FormType,
    #[serde(default)]
    data: Value,
}

pub async fn handle_forms_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Option<Response<BoxBody>> {
    let path = req.uri().path();
    let method = req.method();

    if !path.starts_with("/api/forms") {
        return None;
    }

    let query = req.uri().query().map(str::to_string);
    let path = path.split('?').next().unwrap_or(path).to_string();

    let response = match (method.clone(), path.as_str()) {
        (Method::POST, "/api/forms/submit") => handle_submit(req, state).await,
        (Method::GET, "/api/forms/submissions") => handle_submissions(state, query).await,

        (_, "/api/forms/submit") | (_, "/api/forms/submissions") => method_not_allowed(),
        _ => return None,
    };
    Some(response)
}

async fn handle_submit(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let body: SubmitRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => {
            return error_response(SignpostError::Validation(format!(
                "invalid submission: {e}"
            )))
        }
    };
    match state.content.submit_form(body.form_type, body.data).await {
        Ok(receipt) => json_response(StatusCode::OK, &receipt),
        Err(e) => error_response(e),
    }
}

async fn handle_submissions(state: Arc<AppState>, query: Option<String>) -> Response<BoxBody> {
    let form_type = match query.as_deref().map(parse_form_type_filter) {
        Some(Ok(ft)) => ft,
        Some(Err(e)) => return error_response(e),
        None => None,
    };
    match state.content.list_submissions(form_type).await {
        Ok(submissions) => json_response(StatusCode::OK, &submissions),
        Err(e) => error_response(e),
    }
}

/// Pull an optional `formType=` value out of the query string.
fn parse_form_type_filter(query: &str) -> Result<Option<FormType>, SignpostError> {
    for pair in query.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() != Some("formType") {
            continue;
        }
        let raw = parts.next().unwrap_or_default();
        let form_type: FormType = serde_json::from_value(Value::String(raw.to_string()))
            .map_err(|_| SignpostError::Validation(format!("unknown form type: {raw}")))?;
        return Ok(Some(form_type));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_type_filter_parses_known_names() {
        assert_eq!(
            parse_form_type_filter("formType=newsletter").unwrap(),
            Some(FormType::Newsletter)
        );
        assert_eq!(parse_form_type_filter("other=1").unwrap(), None);
        assert!(parse_form_type_filter("formType=bogus").is_err());
    }
}
