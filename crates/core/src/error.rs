//! Error types for the Concierge domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; `Error` is the umbrella.

use thiserror::Error;

/// The top-level error type for all Concierge operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised by the agent loop itself.
///
/// Only `Config` escapes a loop invocation: it is thrown synchronously at
/// start, before the first completion call. Everything else the loop absorbs
/// into its failure counter or terminal outcome.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures of the chat-completion client.
///
/// The loop never branches on the variant — every `Err` counts identically
/// as "no response" against the consecutive-failure budget. The variants
/// exist so the log line can say what actually happened.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool invocation failed: {tool_name} — {reason}")]
    InvocationFailed { tool_name: String, reason: String },

    #[error("Invalid tool input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Revision conflict on {id}: expected {expected}, found {found}")]
    RevisionConflict { id: String, expected: u64, found: u64 },

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
