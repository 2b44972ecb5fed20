use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("model provider error: {0}")]
    Provider(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("invalid input for tool '{tool}': {reason}")]
    InvalidToolInput { tool: String, reason: String },

    #[error("agent loop exhausted its budget of {max_turns} turns without a final answer")]
    BudgetExceeded { max_turns: usize },

    #[error("{0}")]
    Message(String),
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError::Message(value.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Message(value.to_string())
    }
}
