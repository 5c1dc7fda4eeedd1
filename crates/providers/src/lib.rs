//! Chat-completion client implementations.
//!
//! One concrete backend: any OpenAI-compatible `/chat/completions`
//! endpoint, which covers the vast majority of hosted and local providers.
//! The client owns its endpoint, credential, and model — resolved once by
//! the settings vault and injected at construction.

pub mod openai;

pub use openai::OpenAiChatClient;
