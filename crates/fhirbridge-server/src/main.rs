use std::path::PathBuf;

use anyhow::Context;
use fhirbridge_server::{AppConfig, init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os("FHIRBRIDGE_CONFIG").map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;

    init_tracing(&config.logging.level);

    run(&config).await
}
