use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::response::Json;
use axum::Form;
use serde::{Deserialize, Serialize};
use tracing::debug;
use yiff_diff::DiffRecord;

use crate::error::ApiError;

/// Body of `POST /diff`, as JSON or form fields. Missing fields are empty
/// documents.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiffRequest {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub variables: Vec<DiffRecord>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Diff two YAML documents carried in the request body.
pub async fn diff_handler(request: Request) -> Result<Json<DiffResponse>, ApiError> {
    let input = decode(request).await?;

    let a = yiff_diff::load_str(&input.a)
        .map_err(|source| ApiError::InvalidYaml { field: "a", source })?;
    let b = yiff_diff::load_str(&input.b)
        .map_err(|source| ApiError::InvalidYaml { field: "b", source })?;

    let variables = yiff_diff::diff(&a, &b);
    debug!(variables = variables.len(), "diff computed");
    Ok(Json(DiffResponse { variables }))
}

async fn decode(request: Request) -> Result<DiffRequest, ApiError> {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        let Form(input) = Form::<DiffRequest>::from_request(request, &())
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
        Ok(input)
    } else {
        // JSON regardless of content type.
        let body = Bytes::from_request(request, &())
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
    }
}
