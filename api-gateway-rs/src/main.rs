// api-gateway-rs/src/main.rs
// Log triage API server
//
// Configuration (.env file or environment):
// - PORT: listen port (default: 8787)
// - HOST: bind host (default: 0.0.0.0)
// - ORIGIN: allowed CORS origin (default: http://localhost:5173)
// - AI_PROVIDER: mock | openai (default: mock)
// - AI_API_KEY: credential for the external provider
// - RUST_LOG: log filter (default: info)

use config_rs::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config_rs::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = AppConfig::from_env();

    api_gateway::serve(config).await?;

    Ok(())
}
