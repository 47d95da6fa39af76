use portfolio_advisor::{api::start_server, config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    config::init_tracing();

    // Load environment variables
    let server_config = config::ServerConfig::from_env()?;

    info!("Portfolio Advisor - dialog handler API");
    info!("Port: {}", server_config.port);

    start_server(server_config).await?;

    Ok(())
}
