use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use fhirbridge_client::{ClientError, FhirClient};
use fhirbridge_convert::{ConversionWarning, convert_reader};
use fhirbridge_core::Bundle;
use fhirbridge_tabular::bundle_to_csv;

/// Errors surfaced to HTTP callers as JSON `{"error": ...}` payloads.
#[derive(Debug)]
pub enum ApiError {
    /// A required boundary parameter is absent or the input is unreadable.
    BadRequest(String),
    /// The remote FHIR server failed; carries the upstream message.
    Upstream(ClientError),
    /// Conversion or serialization failed on our side.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Upstream(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({"error": message}))).into_response()
    }
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "fhirbridge",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub bundle: Bundle,
    pub resource_count: usize,
    pub warnings: Vec<ConversionWarning>,
}

/// `POST /api/convert` — CSV text in, assembled Bundle out.
pub async fn convert(body: String) -> Result<Json<ConvertResponse>, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest("no CSV input provided".to_string()));
    }

    let conversion = convert_reader(body.as_bytes()).map_err(|err| match err {
        fhirbridge_convert::Error::Csv(err) => {
            ApiError::BadRequest(format!("unreadable CSV input: {err}"))
        }
        other => ApiError::Internal(other.to_string()),
    })?;

    let resource_count = conversion.bundle.len();
    Ok(Json(ConvertResponse {
        bundle: conversion.bundle,
        resource_count,
        warnings: conversion.warnings,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
}

/// `POST /api/export/csv` — fetch a patient's `$everything` Bundle from the
/// given server and return it flattened, as a CSV attachment.
pub async fn export_csv(Json(request): Json<ExportRequest>) -> Result<Response, ApiError> {
    let server_url = required(&request.server_url, "serverUrl")?;
    let patient_id = required(&request.patient_id, "patientId")?;

    let client = FhirClient::new(server_url);
    let bundle = client
        .everything(patient_id)
        .await
        .map_err(ApiError::Upstream)?;

    let csv = bundle_to_csv(&bundle).map_err(|err| ApiError::Internal(err.to_string()))?;

    tracing::info!(patient_id, entries = bundle.len(), "exported Bundle as CSV");

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"fhir_export_{patient_id}.csv\""),
        ),
    ];
    Ok((StatusCode::OK, headers, csv).into_response())
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::BadRequest(format!(
            "missing required field '{name}'"
        ))),
    }
}
