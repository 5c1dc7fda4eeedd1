//! System prompt and first-message construction.
//!
//! The system prompt is rebuilt for every invocation: it embeds the tool
//! catalog, both legal response shapes as concrete JSON examples, the
//! response contract for the final answer, and the current local date/time
//! so the model can reason about "today" and "tomorrow".

use chrono::Local;
use concierge_core::tool::{RESPONSE_TO_HUMAN, ToolRegistry};
use serde_json::Value;

/// Build the system prompt for one loop invocation.
pub fn build_system_prompt(tools: &ToolRegistry, output_schema: &Value) -> String {
    let mut catalog = String::new();
    for tool in tools.iter() {
        catalog.push_str(&format!("- {}: {}\n", tool.name(), tool.description()));
    }
    if catalog.is_empty() {
        catalog.push_str("(none)\n");
    }

    let now = Local::now().format("%A, %B %-d %Y, %H:%M");
    let contract = serde_json::to_string_pretty(output_schema)
        .unwrap_or_else(|_| output_schema.to_string());

    format!(
        r#"You operate a tool-using assistant loop on behalf of the user.

Current local date and time: {now}

Available tools:
{catalog}
Reply with a single JSON object in exactly one of these two shapes.

To invoke one or more tools, in order:
{{"Thought": "why these actions", "Actions": [{{"Action": "<tool name>", "Action Input": "<string or JSON object>"}}]}}

To deliver your final answer to the user:
{{"Thought": "why you are done", "Actions": [{{"Action": "{RESPONSE_TO_HUMAN}", "Action Input": "<your answer>"}}]}}

Your final answer must satisfy this response contract:
{contract}

Rules:
- "Actions" must contain at least one entry.
- Never add fields beyond the ones shown.
- Never wrap the JSON in a code fence."#
    )
}

/// Build the first user message: the rendered context block followed by the
/// user's prompt.
pub fn build_first_message(insight_context: &Value, user_prompt: &str) -> String {
    let rendered = serde_json::to_string_pretty(insight_context)
        .unwrap_or_else(|_| insight_context.to_string());
    format!("Context:\n{rendered}\n\n{user_prompt}")
}
