//! `concierge ask` — one loop invocation from the terminal.

use anyhow::Context;
use concierge_agent::AgentLoop;
use concierge_config::AppConfig;
use concierge_core::client::ChatClient;
use concierge_providers::OpenAiChatClient;
use concierge_store::{MemoryStore, PlainCipher, SettingsVault};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The response contract asked of the model's final answer.
fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "success": { "type": "boolean" },
            "errorMessage": { "type": ["string", "null"] },
            "reply": { "type": "string" }
        },
        "required": ["success"]
    })
}

pub async fn run(prompt: &str, context: Option<&str>) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    if !config.has_api_key() {
        anyhow::bail!("no API key configured — set CONCIERGE_API_KEY or add it to config.toml");
    }

    let context: Value = match context {
        Some(raw) => serde_json::from_str(raw).context("--context must be valid JSON")?,
        None => json!({}),
    };

    let vault = SettingsVault::new(Box::new(PlainCipher));
    let settings = vault.resolve(&config)?;
    let client: Arc<dyn ChatClient> = Arc::new(OpenAiChatClient::new(settings)?);

    let store = Arc::new(MemoryStore::new());
    let tools = concierge_tools::default_registry(store);

    // Ctrl-C aborts the loop at its next checkpoint instead of killing
    // the process mid-request.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let agent = AgentLoop::new(client)
        .with_budgets(&config.agent)
        .with_cancellation(cancel);

    let outcome = agent.run(&tools, &context, prompt, &output_schema()).await?;
    println!("{}", outcome.user_reply());
    Ok(())
}
