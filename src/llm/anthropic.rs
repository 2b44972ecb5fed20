use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::llm::provider::{ContentBlock, ModelProvider, ModelResponse, StopReason, TokenUsage, Turn};
use crate::tools::definition::ToolDefinition;

#[derive(Clone)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(
        api_key: &str,
        model: impl Into<String>,
        base_url: Option<String>,
    ) -> Result<Self, AppError> {
        let base_url = base_url
            .unwrap_or_else(|| "https://api.anthropic.com".to_string())
            .trim_end_matches('/')
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|e| AppError::Config(e.to_string()))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(AppError::Http)?;

        Ok(Self {
            client,
            model: model.into(),
            base_url,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl ModelProvider for AnthropicProvider {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        turns: &[Turn],
        tools: &[ToolDefinition],
        max_output_tokens: u32,
    ) -> Result<ModelResponse, AppError> {
        let tool_defs = tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "input_schema": t.input_schema
                })
            })
            .collect::<Vec<_>>();

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": max_output_tokens,
            "tools": tool_defs,
            "messages": turns
        });

        let resp = self.client.post(self.endpoint()).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!("Anthropic error: {status} {text}")));
        }

        let parsed: WireResponse = resp
            .json()
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        let mut blocks = Vec::new();
        for block in parsed.content {
            match block.kind.as_str() {
                "text" => {
                    if let Some(text) = block.text {
                        blocks.push(ContentBlock::Text { text });
                    }
                }
                "tool_use" => {
                    if let (Some(id), Some(name), Some(input)) = (block.id, block.name, block.input)
                    {
                        blocks.push(ContentBlock::ToolUse { id, name, input });
                    }
                }
                // Other block kinds carry nothing the loop acts on.
                _ => {}
            }
        }

        Ok(ModelResponse {
            blocks,
            stop_reason: parsed.stop_reason.unwrap_or(StopReason::EndTurn),
            usage: TokenUsage {
                input_tokens: parsed.usage.input_tokens.unwrap_or_default(),
                output_tokens: parsed.usage.output_tokens.unwrap_or_default(),
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    content: Vec<WireBlock>,
    stop_reason: Option<StopReason>,
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct WireBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
    id: Option<String>,
    name: Option<String>,
    input: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    input_tokens: Option<u64>,
    output_tokens: Option<u64>,
}
