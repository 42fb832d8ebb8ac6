use droneops_api::config::{Config, LogFormat, StoreBackend};
use droneops_api::{router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    match &config.backend {
        StoreBackend::Sheets { spreadsheet_id, .. } => {
            info!(spreadsheet_id = %spreadsheet_id, "using Google Sheets store")
        }
        StoreBackend::Csv { dir } => info!(dir = %dir.display(), "using CSV store"),
    }

    let state = Arc::new(AppState::from_config(&config));
    let app = router(state);

    let bind_addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("DroneOps API listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
