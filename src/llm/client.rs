//! LLM provider client
//!
//! Sends a single prompt to one of the supported providers and returns the
//! generated text.

use serde_json::Value;

use crate::config::{Config, ProviderCredentials, ProviderEndpoints};
use crate::error::{ConfigError, LlmError, ProcessorError, Result};
use crate::llm::types::{
    AnthropicRequest, ChatCompletionRequest, GoogleRequest, Provider, ANTHROPIC_VERSION,
};

/// Pick the provider and model for a request.
///
/// Unrecognized provider names fall back to Google with its default model,
/// ignoring the requested model.
pub fn resolve_provider(provider: &str, model: &str) -> (Provider, String) {
    match Provider::from_name(provider) {
        Some(p) => (p, model.to_string()),
        None => {
            tracing::debug!(provider, "Unrecognized provider, falling back to google");
            (Provider::Google, Provider::Google.default_model().to_string())
        }
    }
}

/// LLM API client
#[derive(Debug, Clone)]
pub struct LlmClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Provider base URLs
    endpoints: ProviderEndpoints,
}

impl LlmClient {
    /// Create a new LLM client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                ProcessorError::Config(ConfigError::HttpClient {
                    message: e.to_string(),
                })
            })?;

        Ok(Self {
            http_client,
            endpoints: config.endpoints.clone(),
        })
    }

    /// Call a provider with a prompt and return the generated text.
    ///
    /// A response that parses as JSON but lacks the expected text field yields
    /// an empty string; an empty result list is a `RequestFailed` error.
    pub async fn call(
        &self,
        credentials: &ProviderCredentials,
        provider: Provider,
        prompt: &str,
        model: &str,
    ) -> std::result::Result<String, LlmError> {
        let api_key = credentials
            .api_key(provider)
            .ok_or(LlmError::MissingApiKey { provider })?;

        let base = self.endpoints.base_url(provider).trim_end_matches('/');

        let request = match provider {
            Provider::Google => self
                .http_client
                .post(format!("{}/v1beta/models/{}:generateContent", base, model))
                .query(&[("key", api_key)])
                .json(&GoogleRequest::new(prompt)),
            Provider::Anthropic => self
                .http_client
                .post(format!("{}/v1/messages", base))
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&AnthropicRequest::new(prompt, model)),
            Provider::OpenAi | Provider::Groq => self
                .http_client
                .post(format!("{}/v1/chat/completions", base))
                .bearer_auth(api_key)
                .json(&ChatCompletionRequest::new(prompt, model)),
        };

        tracing::debug!(%provider, model, "Calling LLM provider");

        let response = request
            .send()
            .await
            .map_err(|e| request_failed(provider, e))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| request_failed(provider, e))?;

        if !status.is_success() {
            tracing::warn!(%provider, %status, "LLM provider returned an error status");
        }

        extract_text(provider, &body)
    }
}

/// Pull the generated text out of a provider response body.
///
/// Missing fields read as an empty string, but an empty array where an
/// element is expected fails the call.
fn extract_text(provider: Provider, body: &Value) -> std::result::Result<String, LlmError> {
    let mut current = body;

    for token in provider.response_text_pointer().split('/').skip(1) {
        let next = match (current, token.parse::<usize>()) {
            (Value::Array(items), Ok(_)) if items.is_empty() => {
                tracing::warn!(%provider, "LLM provider returned an empty list");
                return Err(LlmError::RequestFailed {
                    provider,
                    message: "list index out of range".to_string(),
                });
            }
            (Value::Array(items), Ok(index)) => items.get(index),
            (Value::Object(fields), _) => fields.get(token),
            _ => None,
        };

        match next {
            Some(value) => current = value,
            None => return Ok(String::new()),
        }
    }

    Ok(current.as_str().unwrap_or_default().to_string())
}

fn request_failed(provider: Provider, err: reqwest::Error) -> LlmError {
    tracing::error!("Error calling {}: {}", provider, err);
    LlmError::RequestFailed {
        provider,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_known_provider_keeps_model() {
        let (provider, model) = resolve_provider("anthropic", "gemini-1.5-pro");
        assert_eq!(provider, Provider::Anthropic);
        assert_eq!(model, "gemini-1.5-pro");
    }

    #[test]
    fn test_resolve_unknown_provider_falls_back() {
        let (provider, model) = resolve_provider("mistral", "mistral-large");
        assert_eq!(provider, Provider::Google);
        assert_eq!(model, "gemini-1.5-pro");
    }

    #[test]
    fn test_extract_text_paths() {
        let google = json!({"candidates": [{"content": {"parts": [{"text": "g"}]}}]});
        assert_eq!(extract_text(Provider::Google, &google).unwrap(), "g");

        let anthropic = json!({"content": [{"type": "text", "text": "a"}]});
        assert_eq!(extract_text(Provider::Anthropic, &anthropic).unwrap(), "a");

        let openai = json!({"choices": [{"message": {"role": "assistant", "content": "o"}}]});
        assert_eq!(extract_text(Provider::OpenAi, &openai).unwrap(), "o");
        assert_eq!(extract_text(Provider::Groq, &openai).unwrap(), "o");
    }

    #[test]
    fn test_extract_text_missing_is_empty() {
        let error_body = json!({"error": {"message": "invalid key"}});
        assert_eq!(extract_text(Provider::OpenAi, &error_body).unwrap(), "");
        assert_eq!(extract_text(Provider::Google, &json!({})).unwrap(), "");

        let no_text = json!({"choices": [{"message": {"role": "assistant"}}]});
        assert_eq!(extract_text(Provider::OpenAi, &no_text).unwrap(), "");
    }

    #[test]
    fn test_extract_text_empty_list_fails() {
        let err = extract_text(Provider::OpenAi, &json!({"choices": []})).unwrap_err();
        assert_eq!(err.to_string(), "OpenAI API error: list index out of range");

        let err = extract_text(Provider::Anthropic, &json!({"content": []})).unwrap_err();
        assert_eq!(err.to_string(), "Anthropic API error: list index out of range");

        let no_parts = json!({"candidates": [{"content": {"parts": []}}]});
        let err = extract_text(Provider::Google, &no_parts).unwrap_err();
        assert_eq!(err.to_string(), "Google API error: list index out of range");
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let client = LlmClient::new(&Config::new()).unwrap();
        let err = client
            .call(
                &ProviderCredentials::default(),
                Provider::Groq,
                "prompt",
                "llama3-70b-8192",
            )
            .await
            .unwrap_err();
        assert_eq!(err, LlmError::MissingApiKey { provider: Provider::Groq });
        assert_eq!(err.to_string(), "Groq API key not provided");
    }
}
