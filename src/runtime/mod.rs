//! Agent Runtime
//!
//! The narrow seam between the pipeline and whatever actually produces text
//! for a task. The pipeline only ever calls `execute`; a production runtime
//! talks to a chat model, a test double can echo or fail on demand.

pub mod llm;

pub use llm::LlmAgentRuntime;

use crate::tasks::TaskSpec;
use crate::types::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Run one task with its agent and return the generated text.
    async fn execute(&self, task: &TaskSpec) -> AppResult<String>;
}
