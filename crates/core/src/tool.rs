//! Tool trait — the abstraction over assistant capabilities.
//!
//! Tools are what let the agent act on the user's data: manage the task
//! list, save notes, read the clock. Each one is a closed, compile-time
//! checked implementation of [`Tool`]; the loop dispatches to them by exact
//! name match against the action names the model emits.

use crate::error::ToolError;
use async_trait::async_trait;

/// Reserved action name signalling the terminal human-directed response.
///
/// Never dispatched to a tool — the loop treats the action input as the
/// final answer text and stops.
pub const RESPONSE_TO_HUMAN: &str = "Response To Human";

/// The core Tool trait.
///
/// Input is always a single string: the dispatcher JSON-serializes object
/// action inputs before invocation, so tools that want structure parse it
/// back out themselves. Output is a string observation fed verbatim into
/// the conversation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool, matched verbatim (case-sensitive)
    /// against the `Action` field of model responses.
    fn name(&self) -> &str;

    /// What this tool does, embedded into the system prompt. Natural
    /// language only — never machine-parsed.
    fn description(&self) -> &str;

    /// Invoke the tool and produce an observation.
    async fn invoke(&self, input: &str) -> std::result::Result<String, ToolError>;
}

/// An ordered registry of available tools.
///
/// The agent loop uses this to build the tool catalog in the system prompt
/// and to look up tools when the model requests them. Registration order is
/// preserved so the catalog reads the same across runs.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Names are expected to be unique; the first
    /// registration wins on lookup.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Look up a tool by exact, case-sensitive name.
    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .map(|t| t.as_ref())
            .find(|t| t.name() == name)
    }

    /// Iterate tools in registration order (for catalog rendering).
    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "Echo"
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        async fn invoke(&self, input: &str) -> Result<String, ToolError> {
            Ok(input.to_string())
        }
    }

    #[test]
    fn registry_lookup_is_exact_and_case_sensitive() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.find("Echo").is_some());
        assert!(registry.find("echo").is_none());
        assert!(registry.find("Ech").is_none());
    }

    #[test]
    fn registry_preserves_registration_order() {
        struct Named(&'static str);

        #[async_trait]
        impl Tool for Named {
            fn name(&self) -> &str {
                self.0
            }
            fn description(&self) -> &str {
                ""
            }
            async fn invoke(&self, _input: &str) -> Result<String, ToolError> {
                Ok(String::new())
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(Box::new(Named("b")));
        registry.register(Box::new(Named("a")));
        let names: Vec<_> = registry.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn invoke_through_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let tool = registry.find("Echo").unwrap();
        assert_eq!(tool.invoke("hello").await.unwrap(), "hello");
    }

    #[test]
    fn reserved_literal_is_verbatim() {
        assert_eq!(RESPONSE_TO_HUMAN, "Response To Human");
    }
}
