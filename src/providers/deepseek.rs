use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// DeepSeek client for the chat-completions API
#[derive(Debug)]
pub struct DeepSeek {
    /// HTTP client for API requests
    client: Client,
    /// API key for bearer authentication
    api_key: String,
    /// Full chat-completions endpoint URL
    endpoint: String,
    /// Configured model name, used for connection probes
    model: String,
}

/// Chat-completion request body
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// The model to use
    model: String,

    /// The conversation messages
    messages: Vec<ChatMessage>,

    /// Temperature for generation
    temperature: f32,

    /// Maximum number of tokens to generate
    max_tokens: u32,

    /// Streaming is never used; one reply per batch
    stream: bool,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Token usage information reported by the API
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TokenUsage {
    /// Number of prompt tokens
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Number of completion tokens
    #[serde(default)]
    pub completion_tokens: u64,
}

/// Chat-completion response
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// The completion choices; only the first is used
    pub choices: Vec<ChatChoice>,
    /// Token usage, when the API reports it
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The completion message
    pub message: ChatMessage,
}

/// Error body shape the API returns on failures
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(model: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature,
            max_tokens,
            stream: false,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }
}

impl DeepSeek {
    /// Create a new DeepSeek client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Whether an API key has been configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Provider for DeepSeek {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError(
                "Missing API key".to_string(),
            ));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .map(|e| e.message)
                .unwrap_or_else(|| format!("API Error {}", status.as_u16()));
            error!("DeepSeek API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let chat_response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if Self::extract_text(&chat_response).is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(chat_response)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = ChatRequest::new(self.model.clone(), 0.0, 10).add_message("user", "Hello");
        self.complete(request).await?;
        Ok(())
    }

    fn extract_text(response: &ChatResponse) -> String {
        response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default()
    }
}
