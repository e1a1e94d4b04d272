//! Chat and provider types shared across the workspace.

use serde::{Deserialize, Serialize};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message sent to or received from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Token accounting reported by a provider, when available.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// What a provider returns from a chat completion.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text.
    pub content: String,
    /// Model that produced it (as reported by the API).
    pub model: String,
    pub usage: Option<Usage>,
}

/// A model a provider can serve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub context_length: u32,
    pub max_output_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let m = Message::system("be kind");
        assert_eq!(m.role, Role::System);
        assert_eq!(m.content, "be kind");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let m = Message::user("hello");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["role"], "user");
    }
}
