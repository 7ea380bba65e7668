use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::config::ServerConfig;

/// Load `.env` and config, install the subscriber, then serve until shutdown.
pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;
    init_tracing(&config.log_level);

    info!(
        host = %config.host,
        port = config.port,
        max_upload_bytes = config.max_upload_bytes,
        permissive_cors = config.permissive_cors,
        "Starting name picker"
    );

    crate::interfaces::http::start_server(config)?.await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
