//! The wire contract between the agent loop and the model.
//!
//! The model is required to reply with a single JSON envelope:
//!
//! ```text
//! {
//!   "Thought": "<optional string>",
//!   "Actions": [
//!     { "Action": "<tool name or 'Response To Human'>", "Action Input": "<string|object>" }
//!   ]
//! }
//! ```
//!
//! `Actions` is required and non-empty; each element carries exactly the two
//! keys shown; no other keys are permitted at either level. Raw model output
//! may arrive wrapped in a ```` ```json ```` code fence, which is stripped
//! before validation.
//!
//! Pipeline: [`fence::strip_json_wrapper`] → [`envelope::validate`] →
//! [`parser::extract_actions`].

pub mod envelope;
pub mod fence;
pub mod parser;

pub use envelope::{ActionEntry, ActionInput, Envelope, Verdict, validate};
pub use fence::strip_json_wrapper;
pub use parser::{ActionRequest, extract_actions};
