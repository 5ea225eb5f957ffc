//! HTTP service surface for fhirbridge.
//!
//! Two endpoints wrap the pure conversion pipelines: `POST /api/convert`
//! (CSV rows → Bundle JSON) and `POST /api/export/csv` (remote patient
//! Bundle → flattened CSV attachment).

pub mod config;
pub mod handlers;
pub mod observability;
pub mod server;

pub use config::{AppConfig, ConfigError, LoggingConfig, ServerConfig};
pub use observability::init_tracing;
pub use server::{build_app, run};
