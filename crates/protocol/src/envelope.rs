//! The response envelope and its validator.
//!
//! The envelope is declared as a serde type with `deny_unknown_fields`, so
//! the schema lives in one place and the validator is generated from it.
//! [`validate`] wraps that in the contract the loop needs: a verdict that
//! distinguishes "not JSON at all" from "JSON of the wrong shape", naming
//! the offending field in the latter case.

use serde::Deserialize;
use serde_json::Value;

/// The parsed model reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// Free-form reasoning. Unvalidated beyond being a string if present.
    #[serde(rename = "Thought", default)]
    pub thought: Option<String>,

    /// The ordered action list. Must be non-empty (checked in [`validate`];
    /// serde cannot express that constraint).
    #[serde(rename = "Actions")]
    pub actions: Vec<ActionEntry>,
}

/// One requested action.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionEntry {
    #[serde(rename = "Action")]
    pub action: String,

    #[serde(rename = "Action Input")]
    pub input: ActionInput,
}

/// `Action Input` is a string or a JSON object — nothing else.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ActionInput {
    Text(String),
    Object(serde_json::Map<String, Value>),
}

/// The outcome of validating one candidate reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    /// The candidate is not JSON.
    ParseFailure(String),
    /// The candidate is JSON but not a legal envelope. The detail names
    /// the offending field or element.
    SchemaMismatch(String),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Verdict::Valid => None,
            Verdict::ParseFailure(d) | Verdict::SchemaMismatch(d) => Some(d),
        }
    }
}

/// Validate a candidate reply against the envelope schema.
///
/// Pure; never panics. Callers strip any code fence first.
pub fn validate(candidate: &str) -> Verdict {
    let value: Value = match serde_json::from_str(candidate) {
        Ok(v) => v,
        Err(e) => return Verdict::ParseFailure(format!("not valid JSON: {e}")),
    };

    match serde_json::from_value::<Envelope>(value.clone()) {
        Ok(envelope) if envelope.actions.is_empty() => {
            Verdict::SchemaMismatch("'Actions' must not be empty".into())
        }
        Ok(_) => Verdict::Valid,
        Err(_) => Verdict::SchemaMismatch(explain_mismatch(&value)),
    }
}

/// Walk the JSON value to name the field that broke the schema.
///
/// Only reached after typed deserialization has already rejected the value,
/// so falling through to a generic message is a bug in this walk, not a
/// false acceptance.
fn explain_mismatch(value: &Value) -> String {
    let Some(top) = value.as_object() else {
        return "top level must be a JSON object".into();
    };

    for key in top.keys() {
        if key != "Thought" && key != "Actions" {
            return format!("unexpected top-level field '{key}'");
        }
    }

    if let Some(thought) = top.get("Thought")
        && !thought.is_string()
    {
        return "'Thought' must be a string".into();
    }

    let Some(actions) = top.get("Actions") else {
        return "missing required field 'Actions'".into();
    };
    let Some(actions) = actions.as_array() else {
        return "'Actions' must be an array".into();
    };

    for (i, entry) in actions.iter().enumerate() {
        let Some(entry) = entry.as_object() else {
            return format!("Actions[{i}] must be an object");
        };
        for key in entry.keys() {
            if key != "Action" && key != "Action Input" {
                return format!("Actions[{i}] has unexpected field '{key}'");
            }
        }
        match entry.get("Action") {
            None => return format!("Actions[{i}] is missing 'Action'"),
            Some(a) if !a.is_string() => {
                return format!("Actions[{i}]: 'Action' must be a string");
            }
            Some(_) => {}
        }
        match entry.get("Action Input") {
            None => return format!("Actions[{i}] is missing 'Action Input'"),
            Some(input) if !input.is_string() && !input.is_object() => {
                return format!("Actions[{i}]: 'Action Input' must be a string or object");
            }
            Some(_) => {}
        }
    }

    "envelope does not match the response schema".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimal_envelope() {
        let verdict = validate(r#"{"Actions":[{"Action":"Clock","Action Input":""}]}"#);
        assert_eq!(verdict, Verdict::Valid);
    }

    #[test]
    fn accepts_thought_and_object_input() {
        let verdict = validate(
            r#"{"Thought":"check the list","Actions":[{"Action":"Task List","Action Input":{"command":"list"}}]}"#,
        );
        assert_eq!(verdict, Verdict::Valid);
    }

    #[test]
    fn accepts_multiple_actions() {
        let verdict = validate(
            r#"{"Actions":[
                {"Action":"Notes","Action Input":"first"},
                {"Action":"Response To Human","Action Input":"done"}
            ]}"#,
        );
        assert_eq!(verdict, Verdict::Valid);
    }

    #[test]
    fn rejects_non_json() {
        let verdict = validate("I think the answer is 16.");
        assert!(matches!(verdict, Verdict::ParseFailure(_)));
    }

    #[test]
    fn rejects_missing_actions() {
        let verdict = validate(r#"{"Thought":"hmm"}"#);
        assert!(matches!(verdict, Verdict::SchemaMismatch(_)));
        assert!(verdict.detail().unwrap().contains("Actions"));
    }

    #[test]
    fn rejects_empty_actions() {
        let verdict = validate(r#"{"Actions":[]}"#);
        assert_eq!(
            verdict,
            Verdict::SchemaMismatch("'Actions' must not be empty".into())
        );
    }

    #[test]
    fn rejects_element_missing_action_input_naming_it() {
        let verdict = validate(r#"{"Actions":[{"Action":"Clock"}]}"#);
        let detail = verdict.detail().unwrap();
        assert!(detail.contains("Actions[0]"), "{detail}");
        assert!(detail.contains("Action Input"), "{detail}");
    }

    #[test]
    fn rejects_extra_key_on_element() {
        let verdict =
            validate(r#"{"Actions":[{"Action":"Clock","Action Input":"","Reason":"why"}]}"#);
        let detail = verdict.detail().unwrap();
        assert!(detail.contains("Reason"), "{detail}");
    }

    #[test]
    fn rejects_extra_top_level_key() {
        let verdict = validate(r#"{"Actions":[{"Action":"a","Action Input":"b"}],"Mood":"good"}"#);
        let detail = verdict.detail().unwrap();
        assert!(detail.contains("Mood"), "{detail}");
    }

    #[test]
    fn rejects_non_string_thought() {
        let verdict = validate(r#"{"Thought":42,"Actions":[{"Action":"a","Action Input":"b"}]}"#);
        assert!(verdict.detail().unwrap().contains("Thought"));
    }

    #[test]
    fn rejects_numeric_action_input() {
        let verdict = validate(r#"{"Actions":[{"Action":"a","Action Input":7}]}"#);
        let detail = verdict.detail().unwrap();
        assert!(detail.contains("string or object"), "{detail}");
    }

    #[test]
    fn rejects_second_bad_element_by_index() {
        let verdict = validate(
            r#"{"Actions":[{"Action":"a","Action Input":"b"},{"Action":"c"}]}"#,
        );
        assert!(verdict.detail().unwrap().contains("Actions[1]"));
    }

    #[test]
    fn rejects_non_object_top_level() {
        let verdict = validate(r#"["Actions"]"#);
        assert!(verdict.detail().unwrap().contains("object"));
    }
}
