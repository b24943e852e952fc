//! Chat completions client
//!
//! A direct HTTP client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! ```ignore
//! let transport = ChatCompletionsClient::new(endpoint, api_key, "anthropic/claude-sonnet-4");
//! let reply = transport.complete(&turns, &registry.declarations()).await?;
//! ```

use anyhow::{Context, Result};
use reqwest::Client;

use super::provider::Transport;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ToolDeclaration, WireTool};
use crate::config::Settings;
use crate::conversation::Turn;

/// Client for an OpenAI-compatible chat completions endpoint
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsClient {
    /// Create a client for `endpoint` (the API base URL, without `/chat/completions`)
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Create a client from resolved settings
    pub fn from_settings(settings: &Settings) -> Self {
        tracing::info!("[ChatCompletions] Endpoint: {}", settings.endpoint);
        tracing::info!("[ChatCompletions] Using model: {}", settings.model);
        Self::new(&settings.endpoint, &settings.api_key, &settings.model)
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }

    /// Build the request body for a turn sequence
    pub fn build_request(&self, turns: &[Turn], tools: &[ToolDeclaration]) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: turns.iter().map(ChatMessage::from).collect(),
            tools: tools.iter().map(WireTool::from).collect(),
        }
    }

    async fn send_request(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let request_json =
            serde_json::to_string(request).context("Failed to serialize chat completion request")?;
        tracing::debug!("[ChatCompletions] Request JSON: {}", request_json);

        let response = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .body(request_json)
            .send()
            .await
            .context("Failed to send request to chat completions endpoint")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read chat completions response body")?;

        tracing::debug!("[ChatCompletions] Response status: {}", status);
        tracing::debug!("[ChatCompletions] Response body: {}", response_text);

        if !status.is_success() {
            tracing::error!("[ChatCompletions] API error: {} - {}", status, response_text);
            anyhow::bail!("Chat completions API error ({}): {}", status, response_text);
        }

        serde_json::from_str(&response_text).context("Failed to parse chat completions response")
    }
}

#[async_trait::async_trait]
impl Transport for ChatCompletionsClient {
    async fn complete(&self, turns: &[Turn], tools: &[ToolDeclaration]) -> Result<Turn> {
        tracing::info!("[ChatCompletions] Sending {} turns", turns.len());
        tracing::debug!("[ChatCompletions] Tools count: {}", tools.len());

        let request = self.build_request(turns, tools);
        let response = self.send_request(&request).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                "[ChatCompletions] Usage: prompt={} completion={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .context("Chat completions response contained no choices")?;

        tracing::debug!("[ChatCompletions] Finish reason: {:?}", choice.finish_reason);

        Ok(choice.message.into_assistant_turn())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ToolCall;
    use crate::llm::ToolInputSchema;

    #[test]
    fn test_from_settings_reports_model() {
        let settings = Settings {
            endpoint: "https://example.test/v1".to_string(),
            api_key: "key".to_string(),
            model: "openai/gpt-4o".to_string(),
            engine: crate::agent::EngineConfig::default(),
            log_dir: "logs".into(),
        };
        let client = ChatCompletionsClient::from_settings(&settings);
        assert_eq!(client.model(), "openai/gpt-4o");
    }

    #[test]
    fn test_url_joins_endpoint() {
        let client = ChatCompletionsClient::new("https://example.test/v1/", "key", "m");
        assert_eq!(client.url(), "https://example.test/v1/chat/completions");
    }

    #[test]
    fn test_build_request_preserves_turn_order() {
        let client = ChatCompletionsClient::new("https://example.test/v1", "key", "test-model");
        let turns = vec![
            Turn::user("read it"),
            Turn::assistant_with_calls("", vec![ToolCall::new("c1", "read_file", "{}")]),
            Turn::tool("c1", "contents"),
        ];
        let tools = vec![ToolDeclaration {
            name: "read_file".to_string(),
            description: "Read".to_string(),
            parameters: ToolInputSchema::new(),
        }];

        let request = client.build_request(&turns, &tools);
        assert_eq!(request.model, "test-model");
        let roles: Vec<_> = request.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant", "tool"]);
        assert_eq!(request.tools.len(), 1);
    }
}
