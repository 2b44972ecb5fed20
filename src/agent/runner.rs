//! The agent tool-calling loop: send the conversation and tool catalog to
//! the model, dispatch whatever invocations come back, feed the results in,
//! repeat until the model stops asking for tools or the turn budget runs out.

use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agent::ToolTransport;
use crate::error::AppError;
use crate::llm::provider::{ContentBlock, ModelProvider, StopReason, TokenUsage, Turn};
use crate::tools::definition::{CallMetadata, ToolCall};

const NO_RESPONSE: &str = "No response";

#[derive(Debug, Clone)]
pub struct AgentLoopConfig {
    /// Model rounds before the run fails with `BudgetExceeded` (default 25).
    pub max_turns: usize,
    pub max_output_tokens: u32,
}

impl Default for AgentLoopConfig {
    fn default() -> Self {
        Self {
            max_turns: 25,
            max_output_tokens: 9000,
        }
    }
}

/// One backend round trip, as the report prints it.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub tool: String,
    pub metadata: CallMetadata,
    pub payload: String,
}

#[derive(Debug, Clone)]
pub struct AgentRunResult {
    pub run_id: Uuid,
    pub transport: String,
    pub final_text: String,
    pub usage: TokenUsage,
    pub call_count: u64,
    pub latency: Duration,
    pub call_log: Vec<CallRecord>,
}

impl AgentRunResult {
    pub fn latency_ms(&self) -> f64 {
        self.latency.as_secs_f64() * 1000.0
    }
}

/// Drive one agent run to completion.
///
/// The conversation starts as a single user turn holding the task. Each
/// round the full conversation plus the transport's catalog goes to the
/// provider; reported usage is added to the totals whether or not the
/// response requests tools. On a tool-use stop every requested invocation
/// is dispatched through the transport (concurrently, results joined in
/// request order), and the next two turns are the assistant's blocks
/// verbatim followed by one tool result per request, correlated by id.
/// Any other stop reason finalizes the run with the first text block.
///
/// Provider and transport failures abort the run. There is no retry and no
/// partial-result recovery.
pub async fn run_agent(
    provider: &dyn ModelProvider,
    transport: &dyn ToolTransport,
    task: &str,
    config: &AgentLoopConfig,
) -> Result<AgentRunResult, AppError> {
    let run_id = Uuid::new_v4();
    let label = transport.label();
    let started = Instant::now();

    let mut turns = vec![Turn::user_text(task)];
    let mut usage = TokenUsage::default();
    let mut call_count: u64 = 0;
    let mut call_log: Vec<CallRecord> = Vec::new();

    for round in 1..=config.max_turns {
        debug!(%run_id, transport = label, round, turns = turns.len(), "model round");
        let response = provider
            .complete(&turns, transport.catalog(), config.max_output_tokens)
            .await?;
        usage.add(response.usage);

        let requests: Vec<ToolCall> = response
            .blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolCall {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                }),
                _ => None,
            })
            .collect();

        // A tool_use stop without any tool-use blocks is treated as final.
        if response.stop_reason != StopReason::ToolUse || requests.is_empty() {
            let final_text = response
                .blocks
                .iter()
                .find_map(|block| match block {
                    ContentBlock::Text { text } => Some(text.clone()),
                    _ => None,
                })
                .unwrap_or_else(|| NO_RESPONSE.to_string());

            info!(
                %run_id,
                transport = label,
                rounds = round,
                calls = call_count,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "agent run finished"
            );

            return Ok(AgentRunResult {
                run_id,
                transport: label.to_string(),
                final_text,
                usage,
                call_count,
                latency: started.elapsed(),
                call_log,
            });
        }

        info!(%run_id, transport = label, round, requests = requests.len(), "dispatching tool calls");
        let outcomes = join_all(requests.iter().map(|call| transport.invoke(call))).await;

        let mut results = Vec::with_capacity(requests.len());
        for (call, outcome) in requests.iter().zip(outcomes) {
            let invocation = outcome?;
            call_count += 1;
            debug!(%run_id, tool = %call.name, meta = %invocation.metadata, "tool call completed");
            results.push(ContentBlock::ToolResult {
                tool_use_id: call.id.clone(),
                content: invocation.payload.clone(),
            });
            call_log.push(CallRecord {
                tool: call.name.clone(),
                metadata: invocation.metadata,
                payload: invocation.payload,
            });
        }

        turns.push(Turn::assistant(response.blocks));
        turns.push(Turn::tool_results(results));
    }

    warn!(%run_id, transport = label, max_turns = config.max_turns, "turn budget exhausted");
    Err(AppError::BudgetExceeded {
        max_turns: config.max_turns,
    })
}
