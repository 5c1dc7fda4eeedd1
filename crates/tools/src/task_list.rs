//! Task list tool — add, list, and complete tasks in the document store.
//!
//! All tasks live in one well-known document. Writes use read-modify-write
//! with a revision re-fetch on conflict, bounded to a few attempts.

use async_trait::async_trait;
use concierge_core::error::{StoreError, ToolError};
use concierge_core::store::DocumentStore;
use concierge_core::tool::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

const TASKS_DOC: &str = "tasks";
const MAX_WRITE_ATTEMPTS: u32 = 3;

pub struct TaskListTool {
    store: Arc<dyn DocumentStore>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
enum Command {
    Add { title: String },
    List,
    Complete { id: u64 },
}

impl TaskListTool {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn current(&self) -> Result<(Vec<Value>, u64), StoreError> {
        match self.store.get(TASKS_DOC).await {
            Ok(doc) => {
                let items = doc.body["items"].as_array().cloned().unwrap_or_default();
                Ok((items, doc.revision))
            }
            Err(StoreError::NotFound(_)) => Ok((Vec::new(), 0)),
            Err(e) => Err(e),
        }
    }

    async fn write_items(&self, items: Vec<Value>, revision: u64) -> Result<(), StoreError> {
        self.store
            .put(TASKS_DOC, json!({ "items": items }), revision)
            .await
            .map(|_| ())
    }

    async fn add(&self, title: &str) -> Result<String, ToolError> {
        for attempt in 0..MAX_WRITE_ATTEMPTS {
            let (mut items, revision) = self.current().await.map_err(store_failure)?;
            let id = items
                .iter()
                .filter_map(|t| t["id"].as_u64())
                .max()
                .unwrap_or(0)
                + 1;
            items.push(json!({ "id": id, "title": title, "done": false }));
            match self.write_items(items, revision).await {
                Ok(()) => return Ok(format!("Added task #{id}: {title}")),
                Err(StoreError::RevisionConflict { .. }) => {
                    debug!(attempt, "Task write conflicted, re-fetching");
                    continue;
                }
                Err(e) => return Err(store_failure(e)),
            }
        }
        Err(ToolError::InvocationFailed {
            tool_name: "Task List".into(),
            reason: "persistent revision conflict".into(),
        })
    }

    async fn list(&self) -> Result<String, ToolError> {
        let (items, _) = self.current().await.map_err(store_failure)?;
        if items.is_empty() {
            return Ok("The task list is empty.".into());
        }
        let lines: Vec<String> = items
            .iter()
            .map(|t| {
                let marker = if t["done"].as_bool().unwrap_or(false) {
                    "x"
                } else {
                    " "
                };
                format!(
                    "[{marker}] #{} {}",
                    t["id"].as_u64().unwrap_or(0),
                    t["title"].as_str().unwrap_or("")
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }

    async fn complete(&self, id: u64) -> Result<String, ToolError> {
        for attempt in 0..MAX_WRITE_ATTEMPTS {
            let (mut items, revision) = self.current().await.map_err(store_failure)?;
            let Some(task) = items.iter_mut().find(|t| t["id"].as_u64() == Some(id)) else {
                return Err(ToolError::InvalidInput(format!("no task with id {id}")));
            };
            task["done"] = json!(true);
            match self.write_items(items, revision).await {
                Ok(()) => return Ok(format!("Completed task #{id}")),
                Err(StoreError::RevisionConflict { .. }) => {
                    debug!(attempt, "Task write conflicted, re-fetching");
                    continue;
                }
                Err(e) => return Err(store_failure(e)),
            }
        }
        Err(ToolError::InvocationFailed {
            tool_name: "Task List".into(),
            reason: "persistent revision conflict".into(),
        })
    }
}

fn store_failure(e: StoreError) -> ToolError {
    ToolError::InvocationFailed {
        tool_name: "Task List".into(),
        reason: e.to_string(),
    }
}

#[async_trait]
impl Tool for TaskListTool {
    fn name(&self) -> &str {
        "Task List"
    }

    fn description(&self) -> &str {
        "Manage the user's task list. Input is a JSON object: \
         {\"command\":\"add\",\"title\":\"...\"} to add a task, \
         {\"command\":\"list\"} to list tasks, \
         {\"command\":\"complete\",\"id\":N} to mark one done."
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let command: Command = serde_json::from_str(input)
            .map_err(|e| ToolError::InvalidInput(format!("unrecognized command: {e}")))?;
        match command {
            Command::Add { title } => self.add(&title).await,
            Command::List => self.list().await,
            Command::Complete { id } => self.complete(id).await,
        }
    }
}
