//! Razorpay webhook server binary.

use razorpay_webhook_server::{ServerConfig, WebhookServer, load_config};

/// Config file path when none is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "razorpay-webhook.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // Load configuration
    let config = if std::path::Path::new(&path).exists() {
        load_config(&path)?
    } else {
        let mut config = ServerConfig::default();
        config.webhook = razorpay_webhooks::WebhookConfig::from_env()?;
        config
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    let server = WebhookServer::new(config);
    server.run().await?;

    Ok(())
}
