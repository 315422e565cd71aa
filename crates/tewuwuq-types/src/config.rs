use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub model: String,
    pub api_key: String,
    pub api_base: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Abort a provider request after this long
    pub request_timeout_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::Google,
            model: "gemini-2.0-flash".to_string(),
            api_key: String::new(),
            api_base: None,
            max_tokens: 4096,
            temperature: 0.7,
            request_timeout_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiProvider {
    Google,
    OpenAI,
    DeepSeek,
    Custom,
}

impl AiProvider {
    /// Base URL of the provider's OpenAI-compatible API, without the
    /// `/chat/completions` suffix.
    pub fn default_base_url(&self) -> &str {
        match self {
            AiProvider::Google => "https://generativelanguage.googleapis.com/v1beta/openai",
            AiProvider::OpenAI => "https://api.openai.com/v1",
            AiProvider::DeepSeek => "https://api.deepseek.com/v1",
            AiProvider::Custom => "",
        }
    }

    pub fn all() -> &'static [AiProvider] {
        &[
            AiProvider::Google,
            AiProvider::OpenAI,
            AiProvider::DeepSeek,
            AiProvider::Custom,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            AiProvider::Google => "Google",
            AiProvider::OpenAI => "OpenAI",
            AiProvider::DeepSeek => "DeepSeek",
            AiProvider::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    Auto,
    Memory,
    LocalStorage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Session titles derived from the first message are cut to this many
    /// characters before the ellipsis
    pub max_title_chars: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_title_chars: 30,
        }
    }
}
