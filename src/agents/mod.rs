//! Agent System
//!
//! The four personas that power the travel planner. Each is a plain
//! configuration record handed to an `AgentRuntime`; building one has no side
//! effects, so the pipeline builds a fresh profile for every stage.
//!
//! ```text
//! Travel Data Researcher ──► Travel Itinerary Planner ──► Travel Budget Optimizer
//!          │
//!          └──────────────► Local Travel Guide Expert
//! ```

pub mod personas;

pub use personas::{budget_optimizer, local_expert, planner, researcher};

use serde::{Deserialize, Serialize};

/// Which persona a profile describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Researcher,
    Planner,
    LocalExpert,
    BudgetOptimizer,
}

impl AgentKind {
    /// Build the profile for this persona.
    pub fn profile(self) -> AgentProfile {
        match self {
            AgentKind::Researcher => researcher(),
            AgentKind::Planner => planner(),
            AgentKind::LocalExpert => local_expert(),
            AgentKind::BudgetOptimizer => budget_optimizer(),
        }
    }
}

/// Tools a persona may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Web search through `crate::search::SearchTool`
    WebSearch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub kind: AgentKind,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub capabilities: Vec<Capability>,
    pub allow_delegation: bool,
}

impl AgentProfile {
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// The persona as a system instruction for a chat model.
    pub fn system_instruction(&self) -> String {
        format!(
            "You are {role}. {backstory}\n\nYour personal goal is: {goal}",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal,
        )
    }
}
