//! Terminal outcomes of one loop invocation.
//!
//! Callers observe the loop exclusively through these values (plus the one
//! fatal configuration error). Recoverable trouble never escapes the loop
//! as an error.

/// The fixed degraded-mode reply shown when the loop could not produce a
/// genuine answer. Calling surfaces must show this, never silence.
pub const DEGRADED_REPLY: &str = "I'm sorry — I wasn't able to finish working on that \
just now. Please try again in a little while.";

/// How one invocation of the agent loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The model directed an answer at the user.
    HumanResponse(String),
    /// The iteration budget ran out with the model still acting.
    Exhausted,
    /// Too many consecutive unusable replies; no further model calls were
    /// made in this invocation.
    Hibernated,
    /// The model named an action matching no tool (or a tool that failed).
    Aborted { action: String },
    /// The caller's cancellation token fired.
    Cancelled,
}

impl LoopOutcome {
    /// The text a user-facing surface should render for this outcome.
    pub fn user_reply(&self) -> &str {
        match self {
            LoopOutcome::HumanResponse(text) => text,
            _ => DEGRADED_REPLY,
        }
    }

    pub fn is_human_response(&self) -> bool {
        matches!(self, LoopOutcome::HumanResponse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_response_renders_its_text() {
        let outcome = LoopOutcome::HumanResponse("The answer is 16".into());
        assert_eq!(outcome.user_reply(), "The answer is 16");
        assert!(outcome.is_human_response());
    }

    #[test]
    fn every_other_outcome_degrades() {
        for outcome in [
            LoopOutcome::Exhausted,
            LoopOutcome::Hibernated,
            LoopOutcome::Aborted { action: "X".into() },
            LoopOutcome::Cancelled,
        ] {
            assert_eq!(outcome.user_reply(), DEGRADED_REPLY);
            assert!(!outcome.is_human_response());
        }
    }
}
