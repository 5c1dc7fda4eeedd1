//! Notes tool — save and search free-form notes in the document store.

use async_trait::async_trait;
use concierge_core::error::{StoreError, ToolError};
use concierge_core::store::DocumentStore;
use concierge_core::tool::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

const NOTES_DOC: &str = "notes";
const MAX_WRITE_ATTEMPTS: u32 = 3;

pub struct NotesTool {
    store: Arc<dyn DocumentStore>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
enum Command {
    Save { text: String },
    Search { query: String },
}

impl NotesTool {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn current(&self) -> Result<(Vec<Value>, u64), StoreError> {
        match self.store.get(NOTES_DOC).await {
            Ok(doc) => {
                let notes = doc.body["notes"].as_array().cloned().unwrap_or_default();
                Ok((notes, doc.revision))
            }
            Err(StoreError::NotFound(_)) => Ok((Vec::new(), 0)),
            Err(e) => Err(e),
        }
    }

    async fn save(&self, text: &str) -> Result<String, ToolError> {
        for attempt in 0..MAX_WRITE_ATTEMPTS {
            let (mut notes, revision) = self.current().await.map_err(store_failure)?;
            notes.push(json!(text));
            let outcome = self
                .store
                .put(NOTES_DOC, json!({ "notes": notes }), revision)
                .await;
            match outcome {
                Ok(_) => return Ok("Note saved.".into()),
                Err(StoreError::RevisionConflict { .. }) => {
                    debug!(attempt, "Note write conflicted, re-fetching");
                    continue;
                }
                Err(e) => return Err(store_failure(e)),
            }
        }
        Err(ToolError::InvocationFailed {
            tool_name: "Notes".into(),
            reason: "persistent revision conflict".into(),
        })
    }

    async fn search(&self, query: &str) -> Result<String, ToolError> {
        let (notes, _) = self.current().await.map_err(store_failure)?;
        let needle = query.to_lowercase();
        let hits: Vec<&str> = notes
            .iter()
            .filter_map(Value::as_str)
            .filter(|n| n.to_lowercase().contains(&needle))
            .collect();
        if hits.is_empty() {
            return Ok(format!("No notes matching '{query}'."));
        }
        Ok(hits.join("\n"))
    }
}

fn store_failure(e: StoreError) -> ToolError {
    ToolError::InvocationFailed {
        tool_name: "Notes".into(),
        reason: e.to_string(),
    }
}

#[async_trait]
impl Tool for NotesTool {
    fn name(&self) -> &str {
        "Notes"
    }

    fn description(&self) -> &str {
        "Save and search the user's notes. Input is a JSON object: \
         {\"command\":\"save\",\"text\":\"...\"} or \
         {\"command\":\"search\",\"query\":\"...\"}."
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let command: Command = serde_json::from_str(input)
            .map_err(|e| ToolError::InvalidInput(format!("unrecognized command: {e}")))?;
        match command {
            Command::Save { text } => self.save(&text).await,
            Command::Search { query } => self.search(&query).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_store::MemoryStore;

    fn tool() -> NotesTool {
        NotesTool::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn save_then_search() {
        let tool = tool();
        tool.invoke(r#"{"command":"save","text":"Wifi password is hunter2"}"#)
            .await
            .unwrap();
        let hits = tool
            .invoke(r#"{"command":"search","query":"wifi"}"#)
            .await
            .unwrap();
        assert!(hits.contains("hunter2"));
    }

    #[tokio::test]
    async fn search_miss_says_so() {
        let hits = tool()
            .invoke(r#"{"command":"search","query":"nothing"}"#)
            .await
            .unwrap();
        assert!(hits.contains("No notes matching"));
    }

    #[tokio::test]
    async fn malformed_input_is_invalid() {
        let err = tool().invoke("just some prose").await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
