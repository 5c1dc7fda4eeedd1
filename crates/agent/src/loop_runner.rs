//! The agent loop state machine.
//!
//! One `run()` call owns its conversation. Per iteration: call the model
//! with the full message history, strip any code fence, validate against
//! the envelope schema, then dispatch the validated actions in order.
//! Invalid or absent replies count against the consecutive-failure budget
//! (with a backoff between attempts) and are never appended to history;
//! only successful exchanges grow the conversation.

use concierge_config::AgentConfig;
use concierge_core::client::ChatClient;
use concierge_core::error::AgentError;
use concierge_core::message::Message;
use concierge_core::tool::{RESPONSE_TO_HUMAN, ToolRegistry};
use concierge_protocol::{extract_actions, strip_json_wrapper, validate};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::outcome::LoopOutcome;
use crate::prompt;

/// The agent loop orchestrator.
pub struct AgentLoop {
    client: Arc<dyn ChatClient>,
    max_iterations: u32,
    max_consecutive_failures: u32,
    retry_backoff: Duration,
    inter_iteration_delay: Duration,
    cancel: CancellationToken,
}

impl AgentLoop {
    /// Create a loop with the default budgets (10 iterations, 3 strikes,
    /// 10s backoff, 2s between iterations).
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            max_iterations: 10,
            max_consecutive_failures: 3,
            retry_backoff: Duration::from_secs(10),
            inter_iteration_delay: Duration::from_secs(2),
            cancel: CancellationToken::new(),
        }
    }

    /// Apply the budgets from configuration.
    pub fn with_budgets(mut self, config: &AgentConfig) -> Self {
        self.max_iterations = config.max_iterations;
        self.max_consecutive_failures = config.max_consecutive_failures;
        self.retry_backoff = Duration::from_millis(config.retry_backoff_ms);
        self.inter_iteration_delay = Duration::from_millis(config.inter_iteration_delay_ms);
        self
    }

    /// Set the iteration ceiling.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the consecutive-failure ceiling.
    pub fn with_max_consecutive_failures(mut self, max: u32) -> Self {
        self.max_consecutive_failures = max;
        self
    }

    /// Set the backoff after an invalid or absent reply.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the pause between successful iterations.
    pub fn with_inter_iteration_delay(mut self, delay: Duration) -> Self {
        self.inter_iteration_delay = delay;
        self
    }

    /// Attach a cancellation token, checked at the top of each iteration
    /// and before every suspension.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Drive the loop to a terminal outcome.
    ///
    /// `output_schema` must declare `success` and `errorMessage` among its
    /// properties; violating that is the one error this method returns,
    /// raised before any model call. Everything else — provider outages,
    /// schema garbage, unknown actions — is absorbed into the outcome.
    pub async fn run(
        &self,
        tools: &ToolRegistry,
        insight_context: &Value,
        user_prompt: &str,
        output_schema: &Value,
    ) -> Result<LoopOutcome, AgentError> {
        validate_output_schema(output_schema)?;

        let system_prompt = prompt::build_system_prompt(tools, output_schema);
        let first_message = prompt::build_first_message(insight_context, user_prompt);
        let mut messages = vec![Message::system(system_prompt), Message::user(first_message)];
        let mut consecutive_failures = 0u32;

        info!(
            tools = tools.len(),
            max_iterations = self.max_iterations,
            "Agent loop starting"
        );

        for iteration in 1..=self.max_iterations {
            if self.cancel.is_cancelled() {
                info!(iteration, "Agent loop cancelled");
                return Ok(LoopOutcome::Cancelled);
            }

            debug!(iteration, turns = messages.len(), "Agent loop iteration");

            let reply = match self.client.complete(&messages).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(iteration, error = %e, "Completion failed");
                    String::new()
                }
            };

            let cleaned = strip_json_wrapper(&reply);
            let verdict = validate(cleaned);

            if cleaned.is_empty() || !verdict.is_valid() {
                consecutive_failures += 1;
                warn!(
                    iteration,
                    consecutive_failures,
                    detail = verdict.detail().unwrap_or("empty reply"),
                    "Unusable model reply"
                );

                if consecutive_failures >= self.max_consecutive_failures {
                    warn!(consecutive_failures, "Failure budget exhausted, hibernating");
                    return Ok(LoopOutcome::Hibernated);
                }
                if self.suspend(self.retry_backoff).await.is_err() {
                    return Ok(LoopOutcome::Cancelled);
                }
                continue;
            }

            consecutive_failures = 0;

            for request in extract_actions(cleaned) {
                if request.action == RESPONSE_TO_HUMAN {
                    info!(iteration, "Model delivered its answer");
                    return Ok(LoopOutcome::HumanResponse(request.input));
                }

                let Some(tool) = tools.find(&request.action) else {
                    warn!(iteration, action = %request.action, "No tool matches action");
                    return Ok(LoopOutcome::Aborted {
                        action: request.action,
                    });
                };

                match tool.invoke(&request.input).await {
                    Ok(observation) => {
                        debug!(
                            iteration,
                            action = %request.action,
                            observation_len = observation.len(),
                            "Tool produced observation"
                        );
                        messages.push(Message::system(reply.clone()));
                        messages.push(Message::observation(&observation));
                    }
                    Err(e) => {
                        warn!(iteration, action = %request.action, error = %e, "Tool failed");
                        return Ok(LoopOutcome::Aborted {
                            action: request.action,
                        });
                    }
                }
            }

            if iteration < self.max_iterations
                && self.suspend(self.inter_iteration_delay).await.is_err()
            {
                return Ok(LoopOutcome::Cancelled);
            }
        }

        warn!(max_iterations = self.max_iterations, "Iteration budget exhausted");
        Ok(LoopOutcome::Exhausted)
    }

    /// Sleep unless cancellation fires first.
    async fn suspend(&self, duration: Duration) -> Result<(), ()> {
        if self.cancel.is_cancelled() {
            return Err(());
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => Ok(()),
            _ = self.cancel.cancelled() => Err(()),
        }
    }
}

/// The output-schema precondition: `success` and `errorMessage` must be
/// declared properties.
fn validate_output_schema(schema: &Value) -> Result<(), AgentError> {
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            AgentError::Config("output schema must declare a 'properties' object".into())
        })?;

    for required in ["success", "errorMessage"] {
        if !properties.contains_key(required) {
            return Err(AgentError::Config(format!(
                "output schema must declare the '{required}' property"
            )));
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────
