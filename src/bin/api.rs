//! FloatChat API Server
//!
//! Run with: cargo run --bin floatchat-api
//!
//! # Configuration
//!
//! Read from `config.toml` in the usual locations (see `floatchat-cli config`),
//! then overridden by environment variables:
//! - `FLOATCHAT_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `FLOATCHAT_API_PORT`: Port to listen on (default: 5000)
//! - `FLOATCHAT_TYPING_DELAY_MS`: Delay between typed characters (default: 20)
//! - `FLOATCHAT_LOG_LEVEL`: Log level (default: info)
//! - `FLOATCHAT_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter directive, wins over the level above

use floatchat::api::{serve, AppState};
use floatchat::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Starting FloatChat API server v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config.api.clone(), &config.chat)?;

    tracing::info!(
        floats = state.catalog.floats().len(),
        reference = %state.assistant.reference(),
        typing_delay_ms = config.chat.typing_delay_ms,
        "Float catalog loaded"
    );

    // Run server
    tracing::info!("Starting server on {}", config.api.addr());
    serve(state).await?;

    tracing::info!("FloatChat API server stopped");

    Ok(())
}
