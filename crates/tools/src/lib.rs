//! Assistant tools for Concierge.
//!
//! Each tool implements the core [`Tool`] trait: one string in, one string
//! observation out. Tools that touch the document store do their own
//! read-modify-write conflict handling — the agent loop only sees the
//! observation text.

pub mod clock;
pub mod notes;
pub mod task_list;

pub use clock::ClockTool;
pub use notes::NotesTool;
pub use task_list::TaskListTool;

use concierge_core::store::DocumentStore;
use concierge_core::tool::ToolRegistry;
use std::sync::Arc;

/// Build the default tool registry over a document store.
pub fn default_registry(store: Arc<dyn DocumentStore>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(TaskListTool::new(store.clone())));
    registry.register(Box::new(NotesTool::new(store)));
    registry.register(Box::new(ClockTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_store::MemoryStore;

    #[test]
    fn default_registry_contains_the_standard_tools() {
        let registry = default_registry(Arc::new(MemoryStore::new()));
        assert_eq!(registry.len(), 3);
        assert!(registry.find("Task List").is_some());
        assert!(registry.find("Notes").is_some());
        assert!(registry.find("Clock").is_some());
    }
}
