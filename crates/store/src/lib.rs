//! Storage for Concierge: the local document store the assistant's tools
//! act against, and the settings vault that keeps the provider credential
//! encrypted at rest.
//!
//! The agent loop itself never touches either — it sees tools and a
//! configured chat client. Conflict handling on the store is each tool's
//! responsibility (read-modify-write with revision re-fetch).

pub mod memory_store;
pub mod vault;

pub use memory_store::MemoryStore;
pub use vault::{KeystreamCipher, PlainCipher, ProviderSettings, SettingsCipher, SettingsVault};
