//! LLM client configuration.

use serde::{Deserialize, Serialize};

use super::prompts::DEFAULT_INSIGHT_PROMPT;

/// LLM provider type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Ollama API (local, default)
    #[default]
    Ollama,
    /// OpenAI-compatible API (OpenAI, Groq, Together.ai, etc.)
    OpenAI,
}

impl LlmProvider {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "openai" | "groq" | "together" => Some(Self::OpenAI),
            _ => None,
        }
    }
}

/// Configuration for LLM client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether LLM insight generation is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// LLM provider (ollama or openai)
    #[serde(default)]
    pub provider: LlmProvider,
    /// API endpoint (provider-specific defaults apply)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key for OpenAI-compatible providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model used for insights
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Custom insight prompt (uses the {content} placeholder)
    #[serde(default)]
    pub insight_prompt: Option<String>,
    /// Maximum characters of text sent per request
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.1:8b".to_string()
}

fn default_max_tokens() -> u32 {
    256
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_content_chars() -> usize {
    4000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl LlmConfig {
    /// Base default without env overrides.
    pub(crate) fn base_default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: LlmProvider::default(),
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            insight_prompt: None,
            max_content_chars: default_max_content_chars(),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_ENABLED`: "true" or "false"
    /// - `LLM_PROVIDER`: "ollama" (default), "openai", "groq", or "together"
    /// - `LLM_ENDPOINT`: API endpoint (defaults based on provider)
    /// - `LLM_API_KEY`: API key for OpenAI-compatible providers
    /// - `LLM_MODEL`: Model name
    /// - `LLM_MAX_TOKENS`: Maximum tokens in response
    /// - `LLM_TEMPERATURE`: Generation temperature (0.0-1.0)
    /// - `LLM_MAX_CONTENT_CHARS`: Max chars sent per request
    /// - `LLM_INSIGHT_PROMPT`: Custom insight prompt
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LLM_ENABLED") {
            self.enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }

        let explicit_provider = std::env::var("LLM_PROVIDER").ok();
        if let Some(provider) = explicit_provider.as_deref().and_then(LlmProvider::parse) {
            self.provider = provider;
        }

        let explicit_endpoint = std::env::var("LLM_ENDPOINT").ok();
        if let Some(ref endpoint) = explicit_endpoint {
            self.endpoint = endpoint.clone();
        }

        if let Ok(val) = std::env::var("LLM_API_KEY") {
            self.api_key = Some(val);
        }

        if let Some(provider_str) = explicit_provider {
            if explicit_endpoint.is_none() {
                if let Some(endpoint) = provider_endpoint(&provider_str) {
                    self.endpoint = endpoint.to_string();
                }
            }
            if self.api_key.is_none() {
                match provider_str.to_lowercase().as_str() {
                    "groq" => self.api_key = std::env::var("GROQ_API_KEY").ok(),
                    "openai" => self.api_key = std::env::var("OPENAI_API_KEY").ok(),
                    _ => {}
                }
            }
        }

        if let Ok(val) = std::env::var("LLM_MODEL") {
            self.model = val;
        }
        if let Some(n) = std::env::var("LLM_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.max_tokens = n;
        }
        if let Some(t) = std::env::var("LLM_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.temperature = t;
        }
        if let Some(n) = std::env::var("LLM_MAX_CONTENT_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.max_content_chars = n;
        }
        if let Ok(val) = std::env::var("LLM_INSIGHT_PROMPT") {
            self.insight_prompt = Some(val);
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Get the insight prompt, using custom or default.
    pub fn get_insight_prompt(&self) -> &str {
        self.insight_prompt
            .as_deref()
            .unwrap_or(DEFAULT_INSIGHT_PROMPT)
    }

    /// Human-readable hint shown when the service cannot be reached.
    pub fn availability_hint(&self) -> String {
        if !self.enabled {
            return "LLM is disabled (set LLM_ENABLED=true)".to_string();
        }
        match self.provider {
            LlmProvider::Ollama => format!(
                "Ollama not reachable at {}. Start it with: ollama serve",
                self.endpoint
            ),
            LlmProvider::OpenAI if self.api_key.is_none() => {
                "No API key configured (set LLM_API_KEY)".to_string()
            }
            LlmProvider::OpenAI => format!("API not reachable at {}", self.endpoint),
        }
    }
}

fn provider_endpoint(provider: &str) -> Option<&'static str> {
    match provider.to_lowercase().as_str() {
        "groq" => Some("https://api.groq.com/openai"),
        "openai" => Some("https://api.openai.com"),
        "together" => Some("https://api.together.xyz"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_default() {
        let config = LlmConfig::base_default();
        assert!(config.enabled);
        assert_eq!(config.provider, LlmProvider::Ollama);
        assert!(config.insight_prompt.is_none());
        assert!(config.get_insight_prompt().contains("{content}"));
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(LlmProvider::parse("Ollama"), Some(LlmProvider::Ollama));
        assert_eq!(LlmProvider::parse("groq"), Some(LlmProvider::OpenAI));
        assert_eq!(LlmProvider::parse("bogus"), None);
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: LlmConfig = serde_json::from_str(r#"{"model": "qwen2.5:7b"}"#).unwrap();
        assert_eq!(config.model, "qwen2.5:7b");
        assert_eq!(config.endpoint, "http://localhost:11434");
        assert_eq!(config.max_tokens, 256);
    }

    #[test]
    fn test_custom_prompt_wins() {
        let mut config = LlmConfig::base_default();
        config.insight_prompt = Some("Ringkas: {content}".into());
        assert_eq!(config.get_insight_prompt(), "Ringkas: {content}");
    }
}
