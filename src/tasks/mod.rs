//! Task Templates
//!
//! One pure function per pipeline stage turns a `TripRequest` (plus the text
//! of whichever earlier stage it builds on) into a `TaskSpec`: the persona,
//! the instruction block, the expected-output criterion and a suggested
//! artifact name. Nothing here touches the network.

pub mod templates;

pub use templates::{
    budget_optimization_task, destination_research_task, itinerary_creation_task,
    local_recommendations_task,
};

use crate::agents::{AgentKind, AgentProfile};
use crate::models::TripRequest;
use serde::{Deserialize, Serialize};

/// The four stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Research,
    Itinerary,
    Recommendations,
    Budget,
}

impl StageKind {
    pub const ALL: [StageKind; 4] = [
        StageKind::Research,
        StageKind::Itinerary,
        StageKind::Recommendations,
        StageKind::Budget,
    ];

    pub fn index(self) -> usize {
        match self {
            StageKind::Research => 0,
            StageKind::Itinerary => 1,
            StageKind::Recommendations => 2,
            StageKind::Budget => 3,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            StageKind::Research => "research",
            StageKind::Itinerary => "itinerary",
            StageKind::Recommendations => "recommendations",
            StageKind::Budget => "budget",
        }
    }

    pub fn agent(self) -> AgentKind {
        match self {
            StageKind::Research => AgentKind::Researcher,
            StageKind::Itinerary => AgentKind::Planner,
            StageKind::Recommendations => AgentKind::LocalExpert,
            StageKind::Budget => AgentKind::BudgetOptimizer,
        }
    }

    /// Output substituted when the stage fails.
    pub fn placeholder(self) -> &'static str {
        match self {
            StageKind::Research => "Error occurred during research. Please try again.",
            StageKind::Itinerary => "Error occurred during itinerary creation. Please try again.",
            StageKind::Recommendations => "Error occurred during recommendations. Please try again.",
            StageKind::Budget => "Error occurred during budget optimization. Please try again.",
        }
    }

    pub fn download_filename(self) -> &'static str {
        match self {
            StageKind::Research => "destination_overview.txt",
            StageKind::Itinerary => "travel_itinerary.txt",
            StageKind::Recommendations => "local_recommendations.txt",
            StageKind::Budget => "budget_plan.txt",
        }
    }

    /// Section heading shown above the stage's output.
    pub fn title(self, trip: &TripRequest) -> String {
        match self {
            StageKind::Research => format!("Destination Overview: {}", trip.destination),
            StageKind::Itinerary => format!("Your {}-Day Itinerary", trip.duration_days),
            StageKind::Recommendations => "Local Recommendations".to_string(),
            StageKind::Budget => "Budget Optimization".to_string(),
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// One unit of work for the agent runtime: exactly one agent, one task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSpec {
    pub stage: StageKind,
    pub agent: AgentProfile,
    pub description: String,
    pub expected_output: String,
    pub output_file: &'static str,
    /// Query used when the runtime grounds the task with a web search
    pub search_query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_and_indices() {
        for (i, stage) in StageKind::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
    }

    #[test]
    fn test_download_filenames() {
        let names: Vec<_> = StageKind::ALL.iter().map(|s| s.download_filename()).collect();
        assert_eq!(
            names,
            vec![
                "destination_overview.txt",
                "travel_itinerary.txt",
                "local_recommendations.txt",
                "budget_plan.txt"
            ]
        );
    }

    #[test]
    fn test_titles() {
        let trip = TripRequest::new("New York, USA", "Tokyo, Japan", vec!["Food".to_string()], 7);
        assert_eq!(StageKind::Research.title(&trip), "Destination Overview: Tokyo, Japan");
        assert_eq!(StageKind::Itinerary.title(&trip), "Your 7-Day Itinerary");
    }

    #[test]
    fn test_placeholders_are_distinct() {
        let placeholders: std::collections::HashSet<_> =
            StageKind::ALL.iter().map(|s| s.placeholder()).collect();
        assert_eq!(placeholders.len(), 4);
        assert_eq!(
            StageKind::Research.placeholder(),
            "Error occurred during research. Please try again."
        );
    }
}
