//! Action extraction from a validated envelope.
//!
//! The caller has already run [`validate`](crate::envelope::validate); the
//! parser does not re-check structure. It walks leniently instead of
//! deserializing the typed envelope so that a malformed input degrades to an
//! empty list rather than a panic.

use serde_json::Value;

/// One action the model asked for, input already flattened to a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: String,
    pub input: String,
}

/// Extract the ordered action list from validated envelope text.
///
/// `Action Input` objects are JSON-stringified; strings pass through
/// unchanged; any other scalar coerces through its JSON rendering. On any
/// parse failure the result is empty — never an error, never a panic.
pub fn extract_actions(validated: &str) -> Vec<ActionRequest> {
    let Ok(value) = serde_json::from_str::<Value>(validated) else {
        return Vec::new();
    };
    let Some(actions) = value.get("Actions").and_then(Value::as_array) else {
        return Vec::new();
    };

    actions
        .iter()
        .filter_map(|entry| {
            let action = match entry.get("Action")? {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let input = match entry.get("Action Input")? {
                Value::String(s) => s.clone(),
                other => serde_json::to_string(other).ok()?,
            };
            Some(ActionRequest { action, input })
        })
        .collect()
}
