//! Clock tool — the current local date and time.

use async_trait::async_trait;
use chrono::Local;
use concierge_core::error::ToolError;
use concierge_core::tool::Tool;

pub struct ClockTool;

#[async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &str {
        "Clock"
    }

    fn description(&self) -> &str {
        "Get the current local date and time. Input is ignored."
    }

    async fn invoke(&self, _input: &str) -> Result<String, ToolError> {
        Ok(Local::now().format("%A, %B %-d %Y, %H:%M").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_a_timestamp() {
        let now = ClockTool.invoke("").await.unwrap();
        assert!(now.contains(':'));
        assert!(!now.is_empty());
    }
}
