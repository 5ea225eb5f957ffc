//! HTTP client for fetching Bundles from a remote FHIR server.
//!
//! The single operation this system needs is `Patient/<id>/$everything`,
//! which returns the Bundle the flattener consumes. Failures surface as a
//! single descriptive error; retries, if any, belong to the caller.

use fhirbridge_core::Bundle;
use reqwest::StatusCode;
use thiserror::Error;

const FHIR_JSON: &str = "application/fhir+json";

/// Errors raised while fetching a Bundle.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned HTTP {status} for {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("invalid FHIR payload from {url}: {source}")]
    Payload {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Client for one FHIR server base URL.
pub struct FhirClient {
    http: reqwest::Client,
    base_url: String,
}

impl FhirClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `GET <base>/Patient/<id>/$everything` as a Bundle.
    pub async fn everything(&self, patient_id: &str) -> Result<Bundle> {
        let url = format!("{}/Patient/{}/$everything", self.base_url, patient_id);
        tracing::debug!(%url, "fetching patient Bundle");

        let response = self
            .http
            .get(&url)
            .header("Accept", FHIR_JSON)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            return Err(ClientError::Status { url, status, body });
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Payload { url, source })
    }
}
