//! # Saarthi Providers
//!
//! LLM provider implementations for Saarthi.
//!
//! All OpenAI-compatible providers (Gemini, OpenAI, Anthropic, Groq,
//! Ollama) are handled by a single `OpenAiCompatibleProvider`,
//! distinguished only by endpoint URL, auth style, and API key.

pub mod openai_compatible;
pub mod provider_registry;

use saarthi_core::config::SaarthiConfig;
use saarthi_core::error::{Result, SaarthiError};
use saarthi_core::traits::Provider;

/// Create a provider from configuration.
pub fn create_provider(config: &SaarthiConfig) -> Result<Box<dyn Provider>> {
    let provider_name = config.llm.provider.as_str();

    match provider_name {
        // Custom endpoint: "custom:https://my-server.com/v1"
        other if other.starts_with("custom:") => Ok(Box::new(
            openai_compatible::OpenAiCompatibleProvider::custom(other, config)?,
        )),

        // All known OpenAI-compatible providers
        _ => {
            let registry = provider_registry::get_provider_config(provider_name)
                .ok_or_else(|| SaarthiError::ProviderNotFound(provider_name.into()))?;
            Ok(Box::new(
                openai_compatible::OpenAiCompatibleProvider::from_registry(registry, config)?,
            ))
        }
    }
}

/// List all available provider names.
pub fn available_providers() -> Vec<&'static str> {
    let mut names = provider_registry::all_provider_names();
    names.push("custom");
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_rejected() {
        let mut config = SaarthiConfig::default();
        config.llm.provider = "telepathy".into();
        let err = create_provider(&config).unwrap_err();
        assert!(matches!(err, SaarthiError::ProviderNotFound(_)));
    }

    #[test]
    fn test_default_provider_resolves() {
        let config = SaarthiConfig::default();
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn test_custom_provider_resolves() {
        let mut config = SaarthiConfig::default();
        config.llm.provider = "custom:https://my-server.local/v1".into();
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "custom");
    }

    #[test]
    fn test_available_providers_includes_custom() {
        let names = available_providers();
        assert!(names.contains(&"gemini"));
        assert!(names.contains(&"custom"));
    }
}
