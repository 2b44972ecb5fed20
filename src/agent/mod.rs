use async_trait::async_trait;

use crate::error::AppError;
use crate::tools::definition::{ToolCall, ToolDefinition, ToolInvocation};

pub mod graphql;
pub mod rest;
mod runner;

pub use runner::{run_agent, AgentLoopConfig, AgentRunResult, CallRecord};

/// The capability set that distinguishes the two agents: a tool catalog and
/// a way to dispatch one requested invocation against the backend. The loop
/// itself is generic over this seam.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    fn label(&self) -> &'static str;

    fn catalog(&self) -> &[ToolDefinition];

    async fn invoke(&self, call: &ToolCall) -> Result<ToolInvocation, AppError>;
}
