use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::models::PreconditionError;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SEARCH_ENGINE: &str = "duckduckgo";
pub const DEFAULT_SEARCH_RESULTS: usize = 5;
pub const SERPAPI_BASE: &str = "https://serpapi.com";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub api_key: Option<String>,
    pub default_model: String,
    /// Overrides the provider's base URL (any OpenAI-compatible endpoint)
    pub api_base: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: None,
            default_model: DEFAULT_MODEL.to_string(),
            api_base: None,
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}

// The key never shows up in logs.
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("default_model", &self.default_model)
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl LLMConfig {
    /// The model credential, required before any stage is dispatched.
    pub fn require_api_key(&self) -> Result<&str, PreconditionError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(PreconditionError::MissingApiKey)
    }
}

#[derive(Clone, Deserialize)]
pub struct SearchConfig {
    pub serpapi_key: Option<String>,
    pub engine: String,
    pub max_results: usize,
    pub api_base: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            serpapi_key: None,
            engine: DEFAULT_SEARCH_ENGINE.to_string(),
            max_results: DEFAULT_SEARCH_RESULTS,
            api_base: SERPAPI_BASE.to_string(),
        }
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("serpapi_key", &self.serpapi_key.as_ref().map(|_| "<redacted>"))
            .field("engine", &self.engine)
            .field("max_results", &self.max_results)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("travel_plan"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| defaults.server.port.to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or(defaults.server.host),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|origins| {
                        origins
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or(defaults.server.cors_allowed_origins),
            },
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or(defaults.llm.provider),
                api_key: non_empty_var("LLM_API_KEY").or_else(|| non_empty_var("OPENAI_API_KEY")),
                default_model: env::var("LLM_MODEL").unwrap_or(defaults.llm.default_model),
                api_base: non_empty_var("LLM_API_BASE"),
                temperature: env::var("LLM_TEMPERATURE")
                    .unwrap_or_else(|_| defaults.llm.temperature.to_string())
                    .parse()?,
                max_tokens: env::var("LLM_MAX_TOKENS")
                    .unwrap_or_else(|_| defaults.llm.max_tokens.to_string())
                    .parse()?,
            },
            search: SearchConfig {
                serpapi_key: non_empty_var("SERPAPI_API_KEY"),
                engine: env::var("SEARCH_ENGINE").unwrap_or(defaults.search.engine),
                max_results: env::var("SEARCH_MAX_RESULTS")
                    .unwrap_or_else(|_| defaults.search.max_results.to_string())
                    .parse()?,
                api_base: env::var("SERPAPI_BASE").unwrap_or(defaults.search.api_base),
            },
            output: OutputConfig {
                dir: env::var("OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.output.dir),
            },
        })
    }
}
