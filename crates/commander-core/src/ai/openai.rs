use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ai::CompletionProvider;
use crate::config::Config;
use crate::error::CompletionError;
use crate::state::ChatMessage;

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    presence_penalty: Option<f32>,
    frequency_penalty: Option<f32>,
}

impl OpenAIClient {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CompletionError::Transport)?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            max_tokens: crate::config::DEFAULT_MAX_TOKENS,
            temperature: crate::config::DEFAULT_TEMPERATURE,
            presence_penalty: None,
            frequency_penalty: None,
        })
    }

    /// Build a client from resolved settings; `None` when no API key is configured
    pub fn from_config(config: &Config) -> Result<Option<Self>, CompletionError> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(None);
        };

        let client = Self::new(api_key, &config.base_url, &config.model, config.request_timeout)?
            .with_sampling(config.max_tokens, config.temperature)
            .with_penalties(config.presence_penalty, config.frequency_penalty);
        Ok(Some(client))
    }

    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn with_penalties(mut self, presence: Option<f32>, frequency: Option<f32>) -> Self {
        self.presence_penalty = presence;
        self.frequency_penalty = frequency;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub async fn query(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let request = OpenAIRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            presence_penalty: self.presence_penalty,
            frequency_penalty: self.frequency_penalty,
        };

        let response = self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}

#[async_trait]
impl CompletionProvider for OpenAIClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        self.query(messages).await
    }
}

/// Pull the first choice's text out of a response body
fn parse_reply(body: &str) -> Result<String, CompletionError> {
    let openai_response: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::Malformed(e.to_string()))?;

    let content = openai_response.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(CompletionError::EmptyReply)?;

    if content.trim().is_empty() {
        return Err(CompletionError::EmptyReply);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("be nice"), ChatMessage::user("hi")];
        let request = OpenAIRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            max_tokens: 150,
            temperature: 0.8,
            presence_penalty: Some(0.5),
            frequency_penalty: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["max_tokens"], 150);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["presence_penalty"], 0.5);
        assert!(value.get("frequency_penalty").is_none());
    }

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Onward!"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "Onward!");
    }

    #[test]
    fn test_parse_keeps_text_verbatim() {
        let body = r#"{"choices":[{"message":{"content":"  spaced out \n"}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "  spaced out \n");
    }

    #[test]
    fn test_parse_no_choices() {
        let err = parse_reply(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, CompletionError::EmptyReply));
    }

    #[test]
    fn test_parse_null_or_blank_content() {
        let null = parse_reply(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert!(matches!(null, CompletionError::EmptyReply));

        let blank = parse_reply(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap_err();
        assert!(matches!(blank, CompletionError::EmptyReply));
    }

    #[test]
    fn test_parse_wrong_shape() {
        let err = parse_reply(r#"{"error":{"message":"nope"}}"#).unwrap_err();
        assert!(matches!(err, CompletionError::Malformed(_)));

        let err = parse_reply("<html>").unwrap_err();
        assert!(matches!(err, CompletionError::Malformed(_)));
    }

    #[test]
    fn test_from_config_without_key() {
        let config = Config::default();
        assert!(OpenAIClient::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_from_config_with_key() {
        let config = Config {
            api_key: Some("sk-test".into()),
            base_url: "http://localhost:1234/v1/".into(),
            ..Config::default()
        };
        let client = OpenAIClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.model(), "gpt-3.5-turbo");
        assert_eq!(client.completions_url(), "http://localhost:1234/v1/chat/completions");
    }
}
