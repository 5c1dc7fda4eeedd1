//! # Concierge Core
//!
//! Domain types, traits, and error definitions for the Concierge assistant
//! runtime. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator of the agent loop is defined as a trait here:
//! the chat-completion client, the tool capability, the document store.
//! Implementations live in their respective crates. This keeps the dependency
//! graph clean (all crates depend inward on core) and makes the loop testable
//! with scripted stand-ins.

pub mod client;
pub mod error;
pub mod message;
pub mod store;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use client::ChatClient;
pub use error::{AgentError, CompletionError, Error, Result, StoreError, ToolError};
pub use message::{Message, Role};
pub use store::DocumentStore;
pub use tool::{RESPONSE_TO_HUMAN, Tool, ToolRegistry};
