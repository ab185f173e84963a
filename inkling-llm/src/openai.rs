use crate::traits::{LlmClient, LlmResponse};
use async_trait::async_trait;
use inkling_common::{InklingError, Result};
use inkling_http::{HttpClient, HttpError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1/";

pub struct OpenAiClient {
    client: HttpClient,
    api_key: Option<String>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub message: Option<ReplyMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if it has any.
    pub fn first_reply(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

impl OpenAiClient {
    /// Create a client for `model`. A missing key is only reported when a
    /// request is made.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_base_url(OPENAI_API_BASE, api_key, model)
    }

    /// Point the client at an OpenAI-compatible endpoint (gateway, proxy).
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let client = HttpClient::new(&with_trailing_slash(base_url))
            .map_err(|e| InklingError::Config(format!("HttpClient init failed: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            temperature: None,
            max_tokens: None,
        })
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        if let Some(t) = timeout {
            self.client = self.client.with_timeout(t);
        }
        self
    }

    fn build_request(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: max_tokens.or(self.max_tokens),
            temperature: temperature.or(self.temperature),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| InklingError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let req = self.build_request(prompt, system_prompt, max_tokens, temperature);
        tracing::debug!(
            model = %req.model,
            system_chars = system_prompt.map_or(0, str::len),
            prompt_chars = prompt.len(),
            "chat completion request"
        );

        let resp: ChatCompletionResponse = self
            .client
            .post_json("chat/completions", Some(api_key), &req)
            .await
            .map_err(http_to_inkling)?;

        let text = resp.first_reply().unwrap_or_default().to_string();
        if text.is_empty() {
            tracing::warn!(completion_id = %resp.id, "completion carried no message");
        }

        Ok(LlmResponse {
            text,
            tokens_used: resp.usage.as_ref().and_then(|u| u.total_tokens),
            model: resp.model,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

fn http_to_inkling(e: HttpError) -> InklingError {
    match e {
        HttpError::Decode(..) => InklingError::Decode(e.to_string()),
        other => InklingError::Http(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_is_system_then_user() {
        let client = OpenAiClient::new(Some("sk-test".into()), "gpt-4").unwrap();
        let req = client.build_request("what's new?", Some("context here"), None, None);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "context here"},
                    {"role": "user", "content": "what's new?"}
                ]
            })
        );
    }

    #[test]
    fn per_call_sampling_overrides_defaults() {
        let client = OpenAiClient::new(None, "gpt-4")
            .unwrap()
            .with_sampling(Some(0.7), Some(512));
        let req = client.build_request("p", None, Some(10), None);
        assert_eq!(req.max_tokens, Some(10));
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn first_reply_tolerates_missing_content() {
        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "c1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(resp.first_reply(), None);

        let empty: ChatCompletionResponse =
            serde_json::from_value(json!({"id": "c2", "choices": []})).unwrap();
        assert_eq!(empty.first_reply(), None);
    }

    #[test]
    fn base_url_gets_a_trailing_slash() {
        assert_eq!(with_trailing_slash("http://gw/v1"), "http://gw/v1/");
        assert_eq!(with_trailing_slash("http://gw/v1/"), "http://gw/v1/");
    }
}
