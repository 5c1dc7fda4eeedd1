//! HTTP API gateway for Concierge.
//!
//! Exposes a health check and the assist endpoint that drives one agent
//! loop invocation per request. The gateway owns the outcome-to-reply
//! mapping: a human-directed answer is returned verbatim, every other
//! terminal outcome surfaces the fixed degraded-mode message — never
//! silence, never an opaque 5xx for a provider outage.
//!
//! Built on Axum.

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::{Router, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

use concierge_agent::AgentLoop;
use concierge_config::AppConfig;
use concierge_core::client::ChatClient;
use concierge_core::tool::ToolRegistry;
use concierge_providers::OpenAiChatClient;
use concierge_store::{MemoryStore, PlainCipher, SettingsVault};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub config: AppConfig,
    pub client: Arc<dyn ChatClient>,
    pub tools: ToolRegistry,
}

type SharedState = Arc<GatewayState>;

/// The response contract the loop is asked to satisfy for final answers.
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

#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    pub prompt: String,

    /// Arbitrary context blob rendered into the first user message.
    #[serde(default)]
    pub context: Value,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AssistResponse {
    pub reply: String,

    /// True when the reply is the fixed degraded-mode message rather than
    /// a genuine answer.
    pub degraded: bool,
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/assist", post(assist_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn assist_handler(
    State(state): State<SharedState>,
    Json(request): Json<AssistRequest>,
) -> (StatusCode, Json<AssistResponse>) {
    let agent = AgentLoop::new(state.client.clone()).with_budgets(&state.config.agent);

    let outcome = agent
        .run(
            &state.tools,
            &request.context,
            &request.prompt,
            &output_schema(),
        )
        .await;

    match outcome {
        Ok(outcome) => {
            info!(degraded = !outcome.is_human_response(), "Assist request finished");
            let response = AssistResponse {
                reply: outcome.user_reply().to_string(),
                degraded: !outcome.is_human_response(),
            };
            (StatusCode::OK, Json(response))
        }
        Err(e) => {
            error!(error = %e, "Assist request misconfigured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AssistResponse {
                    reply: concierge_agent::DEGRADED_REPLY.to_string(),
                    degraded: true,
                }),
            )
        }
    }
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let vault = SettingsVault::new(Box::new(PlainCipher));
    let settings = vault.resolve(&config)?;
    let client: Arc<dyn ChatClient> = Arc::new(OpenAiChatClient::new(settings)?);

    let store = Arc::new(MemoryStore::new());
    let tools = concierge_tools::default_registry(store);

    let state = Arc::new(GatewayState {
        config,
        client,
        tools,
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Gateway listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use concierge_core::error::CompletionError;
    use concierge_core::message::Message;

    /// A client that always answers with the given envelope.
    struct FixedClient(String);

    #[async_trait]
    impl ChatClient for FixedClient {
        async fn complete(&self, _messages: &[Message]) -> Result<String, CompletionError> {
            Ok(self.0.clone())
        }
    }

    /// A client that never answers.
    struct DownClient;

    #[async_trait]
    impl ChatClient for DownClient {
        async fn complete(&self, _messages: &[Message]) -> Result<String, CompletionError> {
            Err(CompletionError::Network("unreachable".into()))
        }
    }

    fn state_with(client: Arc<dyn ChatClient>) -> SharedState {
        let mut config = AppConfig::default();
        // Keep tests fast: no real backoffs.
        config.agent.retry_backoff_ms = 0;
        config.agent.inter_iteration_delay_ms = 0;
        Arc::new(GatewayState {
            config,
            client,
            tools: ToolRegistry::new(),
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = health_handler().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn assist_returns_the_model_answer() {
        let client = Arc::new(FixedClient(
            r#"{"Actions":[{"Action":"Response To Human","Action Input":"All done"}]}"#.into(),
        ));
        let (status, Json(body)) = assist_handler(
            State(state_with(client)),
            Json(AssistRequest {
                prompt: "finish up".into(),
                context: json!({}),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            AssistResponse {
                reply: "All done".into(),
                degraded: false,
            }
        );
    }

    #[tokio::test]
    async fn provider_outage_degrades_instead_of_failing() {
        let (status, Json(body)) = assist_handler(
            State(state_with(Arc::new(DownClient))),
            Json(AssistRequest {
                prompt: "hello".into(),
                context: json!({}),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.degraded);
        assert_eq!(body.reply, concierge_agent::DEGRADED_REPLY);
    }

    #[tokio::test]
    async fn unknown_action_also_degrades() {
        let client = Arc::new(FixedClient(
            r#"{"Actions":[{"Action":"Teleporter","Action Input":"home"}]}"#.into(),
        ));
        let (status, Json(body)) = assist_handler(
            State(state_with(client)),
            Json(AssistRequest {
                prompt: "go".into(),
                context: json!({}),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.degraded);
    }

    #[test]
    fn output_schema_declares_the_required_properties() {
        let schema = output_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("success"));
        assert!(properties.contains_key("errorMessage"));
    }
}
