//! ChatClient trait — the abstraction over the LLM backend.
//!
//! A ChatClient knows how to send an ordered conversation to a
//! chat-completion endpoint and return the generated text. The agent loop
//! calls `complete()` without knowing which backend is configured.
//!
//! Every failure mode — transport, non-success status, malformed upstream
//! payload — surfaces as a [`CompletionError`](crate::error::CompletionError)
//! value, never a panic. The loop folds all of them into its
//! consecutive-failure budget without distinguishing the variant; only the
//! log line differs.

use crate::error::CompletionError;
use crate::message::Message;
use async_trait::async_trait;

/// The chat-completion capability consumed by the agent loop.
///
/// Implementations own their endpoint, credential, and model — injected at
/// construction from the settings vault, never reached for globally. A call
/// may suspend for as long as the transport takes; the loop imposes no
/// per-call timeout beyond its iteration and failure budgets.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the conversation and return the generated text.
    async fn complete(
        &self,
        messages: &[Message],
    ) -> std::result::Result<String, CompletionError>;
}
