use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A capability the model may request on its behalf. For the GraphQL
/// transport the description is the sole channel carrying the schema text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub input_schema: Value,
}

/// One tool invocation requested by the model. `id` correlates the request
/// with the tool result returned on the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub input: Value,
}

/// Outcome of dispatching one tool call to the backend: the raw response
/// body plus the transport-specific call metadata kept for reporting.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub payload: String,
    pub metadata: CallMetadata,
}

/// What was actually sent over the wire, per transport: the HTTP verb and
/// path for REST, the literal query text for GraphQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallMetadata {
    Http { method: String, path: String },
    Graphql { query: String },
}

impl fmt::Display for CallMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallMetadata::Http { method, path } => write!(f, "{method} {path}"),
            CallMetadata::Graphql { query } => f.write_str(query),
        }
    }
}
