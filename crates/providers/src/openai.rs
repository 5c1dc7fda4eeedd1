//! OpenAI-compatible chat client.
//!
//! Works with OpenAI, OpenRouter, Ollama, vLLM, and any other endpoint
//! exposing `/chat/completions`. The assistant persona and fixed caveats
//! are combined into the leading system message of every outbound payload;
//! the conversation follows in order.
//!
//! Every failure — transport, non-success status, malformed payload —
//! comes back as a `CompletionError` value. The agent loop treats them all
//! as "no response"; the variants only shape the log line.

use async_trait::async_trait;
use concierge_core::client::ChatClient;
use concierge_core::error::CompletionError;
use concierge_core::message::{Message, Role};
use concierge_store::ProviderSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The assistant's persona, prepended to every request.
const PROFILE: &str = "You are Concierge, a meticulous personal assistant. \
You manage the user's tasks, notes, and reminders on their behalf.";

/// Fixed caveats appended to the persona.
const CAVEATS: &str = "Be concise. Never invent data you did not observe. \
Reply only in the JSON formats you have been given, with no surrounding prose.";

pub struct OpenAiChatClient {
    base_url: String,
    credential: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiChatClient {
    /// Build a client from vault-resolved settings.
    pub fn new(settings: ProviderSettings) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| CompletionError::NotConfigured(e.to_string()))?;

        Ok(Self {
            base_url: settings.endpoint.trim_end_matches('/').to_string(),
            credential: settings.credential,
            model: settings.model,
            client,
        })
    }

    /// The persona-plus-caveats system message leading every payload.
    fn profile_message() -> ApiMessage {
        ApiMessage {
            role: "system".into(),
            content: format!("{PROFILE}\n{CAVEATS}"),
        }
    }

    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        let mut payload = Vec::with_capacity(messages.len() + 1);
        payload.push(Self::profile_message());
        payload.extend(messages.iter().map(|m| ApiMessage {
            role: match m.role {
                Role::System => "system".into(),
                Role::User => "user".into(),
            },
            content: m.content.clone(),
        }));
        payload
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": Self::to_api_messages(messages),
            "stream": false,
        });

        debug!(model = %self.model, turns = messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.credential))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthenticationFailed(
                "invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(CompletionError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedPayload(e.to_string()))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::MalformedPayload("no choices in response".into()))?;

        choice
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| CompletionError::MalformedPayload("choice carries no content".into()))
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    #[serde(default)]
    message: Option<ApiChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
