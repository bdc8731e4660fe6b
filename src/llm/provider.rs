use async_trait::async_trait;
use crate::types::{AppError, AppResult, LLMProvider, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for LLM provider (renamed to avoid conflict with LLMProvider enum in types.rs)
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
    /// Replaces the provider's default endpoint when set
    pub api_base: Option<String>,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider_name: String,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig) -> AppResult<Self> {
        let kind = LLMProvider::from_id(&provider.name).ok_or_else(|| {
            AppError::InvalidRequest(format!("Unsupported provider: {}", provider.name))
        })?;

        let adapter: Box<dyn LLMAdapter> = match (kind, provider.api_base.as_deref()) {
            (_, Some(base)) => Box::new(crate::llm::openai::OpenAIAdapter::new_with_api_base(&provider.api_key, base)),
            (LLMProvider::OpenAI, None) => Box::new(crate::llm::openai::OpenAIAdapter::new(&provider.api_key)),
            (LLMProvider::Groq, None) => Box::new(crate::llm::groq::GroqAdapter::new(&provider.api_key)),
            (LLMProvider::OpenRouter, None) => Box::new(crate::llm::openrouter::OpenRouterAdapter::new(&provider.api_key)),
        };

        Ok(Self {
            adapter,
            provider_name: kind.to_string(),
        })
    }

    /// Wrap an existing adapter (alternate backends, test doubles)
    pub fn with_adapter(provider_name: impl Into<String>, adapter: Box<dyn LLMAdapter>) -> Self {
        Self {
            adapter,
            provider_name: provider_name.into(),
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}
