//! Provider registry — maps provider names to endpoint configurations.
//!
//! All OpenAI-compatible providers are defined here as static config entries.
//! The unified `OpenAiCompatibleProvider` uses these configs to connect to any provider.

use saarthi_core::types::ModelInfo;

/// How to attach auth credentials to requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// No authentication required (local servers).
    None,
}

/// Static model definition for a provider.
#[derive(Debug, Clone)]
pub struct ModelDef {
    pub id: &'static str,
    pub name: &'static str,
    pub context_length: u32,
    pub max_output_tokens: Option<u32>,
}

impl ModelDef {
    pub fn to_model_info(&self, provider: &str) -> ModelInfo {
        ModelInfo {
            id: self.id.into(),
            name: self.name.into(),
            provider: provider.into(),
            context_length: self.context_length,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

/// Configuration for a single provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identifier.
    pub name: &'static str,
    /// Base URL for the API.
    pub base_url: &'static str,
    /// Path for chat completions endpoint (appended to base_url).
    pub chat_path: &'static str,
    /// Path for listing models (appended to base_url).
    pub models_path: &'static str,
    /// Environment variable names to try for the API key (in order).
    pub env_keys: &'static [&'static str],
    /// How to send auth credentials.
    pub auth_style: AuthStyle,
    /// Environment variable to override the base URL (e.g., OLLAMA_HOST).
    pub base_url_env: Option<&'static str>,
    /// Default models to return from `list_models`.
    pub default_models: &'static [ModelDef],
}

// ─── Provider Definitions ────────────────────────────────────────────────────

static GEMINI_MODELS: &[ModelDef] = &[
    ModelDef {
        id: "gemini-2.0-flash",
        name: "Gemini 2.0 Flash",
        context_length: 1_000_000,
        max_output_tokens: Some(8192),
    },
    ModelDef {
        id: "gemini-1.5-pro",
        name: "Gemini 1.5 Pro",
        context_length: 2_000_000,
        max_output_tokens: Some(8192),
    },
];

static OPENAI_MODELS: &[ModelDef] = &[
    ModelDef {
        id: "gpt-4o",
        name: "GPT-4o",
        context_length: 128_000,
        max_output_tokens: Some(4096),
    },
    ModelDef {
        id: "gpt-4o-mini",
        name: "GPT-4o Mini",
        context_length: 128_000,
        max_output_tokens: Some(4096),
    },
];

static ANTHROPIC_MODELS: &[ModelDef] = &[ModelDef {
    id: "claude-sonnet-4-20250514",
    name: "Claude Sonnet 4",
    context_length: 200_000,
    max_output_tokens: Some(8192),
}];

static GROQ_MODELS: &[ModelDef] = &[ModelDef {
    id: "llama-3.3-70b-versatile",
    name: "Llama 3.3 70B (Groq)",
    context_length: 128_000,
    max_output_tokens: Some(8192),
}];

static OLLAMA_MODELS: &[ModelDef] = &[ModelDef {
    id: "llama3.2",
    name: "Llama 3.2 (local)",
    context_length: 128_000,
    max_output_tokens: None,
}];

static PROVIDERS: &[ProviderConfig] = &[
    ProviderConfig {
        name: "gemini",
        base_url: "https://generativelanguage.googleapis.com/v1beta/openai",
        chat_path: "/chat/completions",
        models_path: "/models",
        env_keys: &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        auth_style: AuthStyle::Bearer,
        base_url_env: None,
        default_models: GEMINI_MODELS,
    },
    ProviderConfig {
        name: "openai",
        base_url: "https://api.openai.com/v1",
        chat_path: "/chat/completions",
        models_path: "/models",
        env_keys: &["OPENAI_API_KEY"],
        auth_style: AuthStyle::Bearer,
        base_url_env: None,
        default_models: OPENAI_MODELS,
    },
    ProviderConfig {
        name: "anthropic",
        base_url: "https://api.anthropic.com/v1",
        chat_path: "/chat/completions",
        models_path: "/models",
        env_keys: &["ANTHROPIC_API_KEY"],
        auth_style: AuthStyle::Bearer,
        base_url_env: None,
        default_models: ANTHROPIC_MODELS,
    },
    ProviderConfig {
        name: "groq",
        base_url: "https://api.groq.com/openai/v1",
        chat_path: "/chat/completions",
        models_path: "/models",
        env_keys: &["GROQ_API_KEY"],
        auth_style: AuthStyle::Bearer,
        base_url_env: None,
        default_models: GROQ_MODELS,
    },
    ProviderConfig {
        name: "ollama",
        base_url: "http://localhost:11434/v1",
        chat_path: "/chat/completions",
        models_path: "/models",
        env_keys: &[],
        auth_style: AuthStyle::None,
        base_url_env: Some("OLLAMA_HOST"),
        default_models: OLLAMA_MODELS,
    },
];

/// Look up a provider by name.
pub fn get_provider_config(name: &str) -> Option<&'static ProviderConfig> {
    PROVIDERS.iter().find(|p| p.name == name)
}

/// All registered provider names.
pub fn all_provider_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_provider() {
        let cfg = get_provider_config("gemini").unwrap();
        assert_eq!(cfg.auth_style, AuthStyle::Bearer);
        assert!(cfg.base_url.contains("googleapis"));
    }

    #[test]
    fn test_lookup_unknown_provider() {
        assert!(get_provider_config("telepathy").is_none());
    }

    #[test]
    fn test_ollama_needs_no_auth() {
        let cfg = get_provider_config("ollama").unwrap();
        assert_eq!(cfg.auth_style, AuthStyle::None);
        assert_eq!(cfg.base_url_env, Some("OLLAMA_HOST"));
    }

    #[test]
    fn test_model_def_conversion() {
        let info = GEMINI_MODELS[0].to_model_info("gemini");
        assert_eq!(info.id, "gemini-2.0-flash");
        assert_eq!(info.provider, "gemini");
    }
}
