//! `concierge serve` — start the HTTP gateway.

use concierge_config::AppConfig;

pub async fn run(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(port) = port {
        config.gateway.port = port;
    }
    if !config.has_api_key() {
        anyhow::bail!("no API key configured — set CONCIERGE_API_KEY or add it to config.toml");
    }

    concierge_gateway::start(config)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))
}
