//! Unified OpenAI-compatible provider.
//!
//! A single struct that handles chat completions for ALL OpenAI-compatible
//! APIs. Different providers are distinguished only by endpoint URL, auth
//! style, and API key.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use saarthi_core::config::SaarthiConfig;
use saarthi_core::error::{Result, SaarthiError};
use saarthi_core::traits::provider::{GenerateParams, Provider};
use saarthi_core::types::{Message, ModelInfo, ProviderResponse, Role, Usage};

use crate::provider_registry::{AuthStyle, ProviderConfig};

/// A unified provider that works with any OpenAI-compatible API.
#[derive(Debug)]
pub struct OpenAiCompatibleProvider {
    /// Provider name (e.g., "gemini", "openai").
    name: String,
    /// API key for authentication.
    api_key: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    base_url: String,
    /// Path for chat completions (e.g., "/chat/completions").
    chat_path: String,
    /// Path for listing models (e.g., "/models").
    models_path: String,
    /// Authentication style.
    auth_style: AuthStyle,
    /// Default models to return from `list_models`.
    default_models: Vec<ModelInfo>,
    /// HTTP client.
    client: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    /// Create from a known provider config + SaarthiConfig.
    ///
    /// Resolution order:
    /// - API key: `config.llm.api_key` > env vars > empty
    /// - Base URL: `config.llm.endpoint` > env override > registry default
    pub fn from_registry(registry: &ProviderConfig, config: &SaarthiConfig) -> Result<Self> {
        let api_key = if !config.llm.api_key.is_empty() {
            config.llm.api_key.clone()
        } else {
            registry
                .env_keys
                .iter()
                .find_map(|key| std::env::var(key).ok())
                .unwrap_or_default()
        };

        let base_url = if !config.llm.endpoint.is_empty() {
            config.llm.endpoint.trim_end_matches('/').to_string()
        } else {
            registry
                .base_url_env
                .and_then(|env_key| {
                    let val = std::env::var(env_key).ok()?;
                    // For OLLAMA_HOST, append /v1 if not present
                    if val.ends_with("/v1") {
                        Some(val)
                    } else {
                        Some(format!("{}/v1", val.trim_end_matches('/')))
                    }
                })
                .unwrap_or_else(|| registry.base_url.to_string())
        };

        let default_models = registry
            .default_models
            .iter()
            .map(|m| m.to_model_info(registry.name))
            .collect();

        Ok(Self {
            name: registry.name.to_string(),
            api_key,
            base_url,
            chat_path: registry.chat_path.to_string(),
            models_path: registry.models_path.to_string(),
            auth_style: registry.auth_style,
            default_models,
            client: Self::build_client(config)?,
        })
    }

    /// Create for a custom endpoint (e.g., "custom:https://my-server.com/v1").
    pub fn custom(endpoint: &str, config: &SaarthiConfig) -> Result<Self> {
        let base_url = endpoint
            .strip_prefix("custom:")
            .unwrap_or(endpoint)
            .trim_end_matches('/')
            .to_string();

        let api_key = if !config.llm.api_key.is_empty() {
            config.llm.api_key.clone()
        } else {
            std::env::var("CUSTOM_API_KEY").unwrap_or_default()
        };

        let auth_style = if api_key.is_empty() {
            AuthStyle::None
        } else {
            AuthStyle::Bearer
        };

        Ok(Self {
            name: "custom".to_string(),
            api_key,
            base_url,
            chat_path: "/chat/completions".to_string(),
            models_path: "/models".to_string(),
            auth_style,
            default_models: vec![],
            client: Self::build_client(config)?,
        })
    }

    fn build_client(config: &SaarthiConfig) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_secs))
            .build()
            .map_err(SaarthiError::Http)
    }

    /// Build the auth header for the request.
    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_style {
            AuthStyle::Bearer if !self.api_key.is_empty() => {
                req.header("Authorization", format!("Bearer {}", self.api_key))
            }
            _ => req,
        }
    }

    /// Build the request body for one chat completion.
    ///
    /// Anthropic's native API takes system text as a top-level `system`
    /// field rather than a message; everyone else gets the standard
    /// OpenAI message list.
    fn build_body(&self, messages: &[Message], params: &GenerateParams) -> Value {
        let mut body = json!({
            "model": params.model,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
        });

        let is_anthropic = self.name == "anthropic" || self.base_url.contains("anthropic");
        if is_anthropic {
            let system_text: Vec<&str> = messages
                .iter()
                .filter(|m| m.role == Role::System)
                .map(|m| m.content.as_str())
                .collect();
            let non_system: Vec<Value> = messages
                .iter()
                .filter(|m| m.role != Role::System)
                .map(|m| serde_json::to_value(m).unwrap_or_default())
                .collect();

            if !system_text.is_empty() {
                body["system"] = Value::String(system_text.join("\n\n"));
            }
            body["messages"] = Value::Array(non_system);
        } else {
            body["messages"] = serde_json::to_value(messages).unwrap_or_default();
        }

        body
    }
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(&self, messages: &[Message], params: &GenerateParams) -> Result<ProviderResponse> {
        // For providers that require auth, check API key
        if self.auth_style != AuthStyle::None && self.api_key.is_empty() {
            return Err(SaarthiError::ApiKeyMissing(self.name.clone()));
        }

        let body = self.build_body(messages, params);
        let url = format!("{}{}", self.base_url, self.chat_path);
        tracing::debug!(provider = %self.name, model = %params.model, %url, "chat completion request");

        let response = self
            .apply_auth(self.client.post(&url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SaarthiError::Provider(format!(
                "{} API error {status}: {text}",
                self.name
            )));
        }

        let data: Value = response.json().await?;
        let content = data["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .or_else(|| {
                // Anthropic native shape
                data["content"][0]["text"].as_str().map(str::to_string)
            })
            .ok_or_else(|| {
                SaarthiError::Provider(format!("{}: response carried no content", self.name))
            })?;

        let model = data["model"].as_str().unwrap_or(&params.model).to_string();
        let usage = serde_json::from_value::<Usage>(data["usage"].clone()).ok();

        Ok(ProviderResponse { content, model, usage })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}{}", self.base_url, self.models_path);
        let response = self.apply_auth(self.client.get(&url)).send().await;

        // Fall back to the registry's static list when the endpoint is
        // unreachable or returns an unexpected shape.
        let Ok(response) = response else {
            return Ok(self.default_models.clone());
        };
        let Ok(data) = response.json::<Value>().await else {
            return Ok(self.default_models.clone());
        };

        let Some(entries) = data["data"].as_array() else {
            return Ok(self.default_models.clone());
        };

        let models = entries
            .iter()
            .filter_map(|m| m["id"].as_str())
            .map(|id| ModelInfo {
                id: id.to_string(),
                name: id.to_string(),
                provider: self.name.clone(),
                context_length: 0,
                max_output_tokens: None,
            })
            .collect();
        Ok(models)
    }
}
