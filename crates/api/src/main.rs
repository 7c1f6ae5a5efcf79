//! BlueWatch server entry point

use api::{init_logging, run_server, settings::ApiSettings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== BlueWatch v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Starting room coordination server...");

    let settings = ApiSettings::load().map_err(|e| anyhow::anyhow!("settings error: {}", e))?;
    run_server(settings)
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
