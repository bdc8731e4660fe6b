//! Chat-model runtime
//!
//! Runs a task as one chat completion: the persona becomes the system
//! instruction, the task description plus its expected-output criterion
//! becomes the user message. Personas carrying the web-search capability get
//! one search (on the task's `search_query`) appended as reference material.
//! The delegation flag is carried on the profile but never acted on here.

use super::AgentRuntime;
use crate::agents::Capability;
use crate::config::Config;
use crate::llm::provider::{LLMProviderConfig, LLM};
use crate::search::SearchTool;
use crate::tasks::TaskSpec;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub struct LlmAgentRuntime {
    llm: LLM,
    model: String,
    temperature: f32,
    max_tokens: u32,
    search: Option<SearchTool>,
}

impl LlmAgentRuntime {
    pub fn new(llm: LLM, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            temperature: 0.7,
            max_tokens: 2048,
            search: None,
        }
    }

    /// Wire a runtime from configuration. Fails before any stage runs when
    /// the model credential is missing.
    pub fn from_config(config: &Config, model: &str) -> AppResult<Self> {
        let api_key = config.llm.require_api_key()?;

        let llm = LLM::new(LLMProviderConfig {
            name: config.llm.provider.clone(),
            api_key: api_key.to_string(),
            api_base: config.llm.api_base.clone(),
        })?;

        Ok(Self::new(llm, model)
            .with_sampling(config.llm.temperature, config.llm.max_tokens)
            .with_search(SearchTool::from_config(&config.search)))
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_search(mut self, search: SearchTool) -> Self {
        self.search = Some(search);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn user_prompt(task: &TaskSpec, reference: Option<&str>) -> String {
        let mut prompt = format!(
            "{description}\n\nThis is the expected criteria for your final answer: {expected}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            description = task.description,
            expected = task.expected_output,
        );

        if let Some(reference) = reference {
            prompt.push_str(&format!(
                "\n\nWeb search results for \"{query}\" (use them where relevant):\n{reference}",
                query = task.search_query,
                reference = reference.trim_end(),
            ));
        }

        prompt
    }
}

#[async_trait]
impl AgentRuntime for LlmAgentRuntime {
    async fn execute(&self, task: &TaskSpec) -> AppResult<String> {
        info!(
            stage = %task.stage,
            role = %task.agent.role,
            model = %self.model,
            "Executing task"
        );

        let reference = match &self.search {
            Some(tool) if task.agent.can(Capability::WebSearch) => {
                debug!(tool = tool.name(), query = %task.search_query, "Grounding task with web search");
                Some(tool.search(&task.search_query).await)
            }
            _ => None,
        };

        let request = LLMRequest {
            provider: self.llm.provider_name().to_string(),
            model: self.model.clone(),
            messages: vec![LLMMessage::user(Self::user_prompt(task, reference.as_deref()))],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            system_instruction: Some(task.agent.system_instruction()),
        };

        let response = self.llm.create_chat_completion(&request).await?;

        if response.content.trim().is_empty() {
            warn!(stage = %task.stage, finish_reason = %response.finish_reason, "Model returned no content");
            return Err(AppError::LLMApi(format!(
                "model returned an empty response (finish reason: {})",
                response.finish_reason
            )));
        }

        info!(
            stage = %task.stage,
            response_len = response.content.len(),
            total_tokens = response.usage.total_tokens,
            "Task completed"
        );

        Ok(response.content)
    }
}
