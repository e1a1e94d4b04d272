//! The LLM provider trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Message, ModelInfo, ProviderResponse};

/// Generation parameters passed to every chat call.
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// A chat-completion backend. Implementations are stateless apart from the
/// HTTP client and safe to share across tasks.
#[async_trait]
pub trait Provider: Send + Sync + std::fmt::Debug {
    /// Provider identifier (e.g. "gemini", "openai").
    fn name(&self) -> &str;

    /// Run one chat completion over the given messages.
    async fn chat(&self, messages: &[Message], params: &GenerateParams) -> Result<ProviderResponse>;

    /// Models this provider advertises.
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;
}
