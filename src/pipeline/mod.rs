//! Pipeline Orchestrator
//!
//! Runs the four stages strictly in order, each in its own single-agent,
//! single-task dispatch:
//!
//! ```text
//! Idle ─► Researching ─► Planning ─► Recommending ─► Budgeting ─► Done
//!              │             ▲             ▲              ▲
//!              └─ research ──┴─────────────┘              │
//!                            └──────── itinerary ─────────┘
//! ```
//!
//! A failed stage never stops the run. Its output becomes the stage's
//! placeholder sentence, and later stages embed that placeholder exactly as
//! they would have embedded real content. The only way `run` returns an error
//! is a precondition failure, detected before the first dispatch.

pub mod outcome;

pub use outcome::{PipelineOutcome, StageResult};

use crate::models::TripRequest;
use crate::runtime::AgentRuntime;
use crate::tasks::{self, StageKind, TaskSpec};
use crate::types::AppResult;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Where a run currently is, with the status line and percentage shown to
/// the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Researching,
    Planning,
    Recommending,
    Budgeting,
    Done,
}

impl PipelineState {
    pub fn status_text(self) -> &'static str {
        match self {
            PipelineState::Idle => "Initializing AI agents...",
            PipelineState::Researching => "Researching destination...",
            PipelineState::Planning => "Creating itinerary...",
            PipelineState::Recommending => "Finding local recommendations...",
            PipelineState::Budgeting => "Optimizing budget...",
            PipelineState::Done => "Finalizing your travel plan...",
        }
    }

    pub fn progress(self) -> u8 {
        match self {
            PipelineState::Idle => 10,
            PipelineState::Researching => 20,
            PipelineState::Planning => 50,
            PipelineState::Recommending => 70,
            PipelineState::Budgeting => 90,
            PipelineState::Done => 100,
        }
    }

    /// The state entered while `stage` runs.
    pub fn for_stage(stage: StageKind) -> Self {
        match stage {
            StageKind::Research => PipelineState::Researching,
            StageKind::Itinerary => PipelineState::Planning,
            StageKind::Recommendations => PipelineState::Recommending,
            StageKind::Budget => PipelineState::Budgeting,
        }
    }
}

pub struct PipelineOrchestrator {
    runtime: Arc<dyn AgentRuntime>,
}

impl PipelineOrchestrator {
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self { runtime }
    }

    pub async fn run(&self, trip: &TripRequest) -> AppResult<PipelineOutcome> {
        self.run_with_progress(trip, |_| {}).await
    }

    /// Like `run`, calling `on_progress` on every state transition.
    pub async fn run_with_progress<F>(&self, trip: &TripRequest, mut on_progress: F) -> AppResult<PipelineOutcome>
    where
        F: FnMut(PipelineState) + Send,
    {
        trip.ensure_ready()?;

        let run_id = Uuid::new_v4();
        info!(
            run_id = %run_id,
            destination = %trip.destination,
            duration_days = trip.duration_days,
            "Starting travel planning pipeline"
        );
        on_progress(PipelineState::Idle);

        on_progress(PipelineState::Researching);
        let research = self
            .dispatch(run_id, tasks::destination_research_task(trip))
            .await;

        on_progress(PipelineState::Planning);
        let itinerary = self
            .dispatch(run_id, tasks::itinerary_creation_task(trip, &research.output))
            .await;

        on_progress(PipelineState::Recommending);
        let recommendations = self
            .dispatch(run_id, tasks::local_recommendations_task(trip, &research.output))
            .await;

        on_progress(PipelineState::Budgeting);
        let budget = self
            .dispatch(run_id, tasks::budget_optimization_task(trip, &itinerary.output))
            .await;

        on_progress(PipelineState::Done);

        let outcome = PipelineOutcome {
            run_id,
            stages: [research, itinerary, recommendations, budget],
        };
        info!(
            run_id = %run_id,
            failed_stages = outcome.failures().count(),
            "Travel planning pipeline complete"
        );

        Ok(outcome)
    }

    /// One isolated dispatch. Failures stop here.
    async fn dispatch(&self, run_id: Uuid, task: TaskSpec) -> StageResult {
        let stage = task.stage;
        info!(run_id = %run_id, stage = %stage, role = %task.agent.role, "Stage started");

        match self.runtime.execute(&task).await {
            Ok(output) => {
                info!(run_id = %run_id, stage = %stage, output_len = output.len(), "Stage completed");
                StageResult::succeeded(stage, output)
            }
            Err(e) => {
                error!(run_id = %run_id, stage = %stage, error = %e, "Stage failed, substituting placeholder");
                StageResult::failed(stage, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLevel, PreconditionError, TravelDates, TravelStyle};
    use crate::types::AppError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Echoes `<role>:<task-id>` followed by the prompt it was given, and
    /// fails on request for selected stages.
    #[derive(Default)]
    struct EchoRuntime {
        fail: HashSet<StageKind>,
        seen: Mutex<Vec<TaskSpec>>,
    }

    impl EchoRuntime {
        fn failing(stages: &[StageKind]) -> Self {
            Self {
                fail: stages.iter().copied().collect(),
                ..Self::default()
            }
        }

        fn echo_tag(task: &TaskSpec) -> String {
            format!("{}:{}", task.agent.role, task.stage.id())
        }

        fn seen(&self, stage: StageKind) -> TaskSpec {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.stage == stage)
                .cloned()
                .unwrap()
        }
    }

    #[async_trait]
    impl AgentRuntime for EchoRuntime {
        async fn execute(&self, task: &TaskSpec) -> AppResult<String> {
            self.seen.lock().unwrap().push(task.clone());
            if self.fail.contains(&task.stage) {
                return Err(AppError::LLMApi(format!("{} exploded", task.stage)));
            }
            Ok(format!("{}\n{}", Self::echo_tag(task), task.description))
        }
    }

    fn tokyo() -> TripRequest {
        TripRequest::new(
            "New York, USA",
            "Tokyo, Japan",
            vec!["Food".to_string(), "Culture".to_string()],
            7,
        )
        .with_budget_level(BudgetLevel::Moderate)
        .with_travel_style(TravelStyle::Moderate)
    }

    fn orchestrator(runtime: Arc<EchoRuntime>) -> PipelineOrchestrator {
        PipelineOrchestrator::new(runtime)
    }

    #[tokio::test]
    async fn test_end_to_end_echo() {
        let runtime = Arc::new(EchoRuntime::default());
        let outcome = orchestrator(runtime.clone()).run(&tokyo()).await.unwrap();

        let kinds: Vec<_> = outcome.stages.iter().map(|s| s.stage).collect();
        assert_eq!(kinds, StageKind::ALL.to_vec());
        assert!(outcome.all_succeeded());

        let research = outcome.get(StageKind::Research);
        let itinerary = outcome.get(StageKind::Itinerary);
        let budget = outcome.get(StageKind::Budget);

        assert!(research.output.starts_with("Travel Data Researcher:research"));
        assert!(itinerary.output.contains("Travel Data Researcher:research"));
        assert!(itinerary.output.starts_with("Travel Itinerary Planner:itinerary"));
        assert!(budget.output.contains("Travel Itinerary Planner:itinerary"));
        assert!(budget.output.starts_with("Travel Budget Optimizer:budget"));
    }

    #[tokio::test]
    async fn test_stages_dispatch_in_order_with_fresh_personas() {
        let runtime = Arc::new(EchoRuntime::default());
        orchestrator(runtime.clone()).run(&tokyo()).await.unwrap();

        let seen = runtime.seen.lock().unwrap();
        let order: Vec<_> = seen.iter().map(|t| t.stage).collect();
        assert_eq!(order, StageKind::ALL.to_vec());
        let roles: Vec<_> = seen.iter().map(|t| t.agent.role.as_str()).collect();
        assert_eq!(
            roles,
            vec![
                "Travel Data Researcher",
                "Travel Itinerary Planner",
                "Local Travel Guide Expert",
                "Travel Budget Optimizer"
            ]
        );
    }

    #[tokio::test]
    async fn test_recommendations_embed_research_verbatim() {
        let runtime = Arc::new(EchoRuntime::default());
        let outcome = orchestrator(runtime.clone()).run(&tokyo()).await.unwrap();

        let research_text = &outcome.get(StageKind::Research).output;
        let recommendations_task = runtime.seen(StageKind::Recommendations);
        assert!(recommendations_task.description.contains(research_text.as_str()));
    }

    #[tokio::test]
    async fn test_research_failure_propagates_placeholder() {
        let runtime = Arc::new(EchoRuntime::failing(&[StageKind::Research]));
        let outcome = orchestrator(runtime.clone()).run(&tokyo()).await.unwrap();

        let research = outcome.get(StageKind::Research);
        assert!(!research.success);
        assert_eq!(research.output, StageKind::Research.placeholder());
        assert!(research.error.as_deref().unwrap().contains("research exploded"));

        let placeholder = StageKind::Research.placeholder();
        assert!(runtime.seen(StageKind::Itinerary).description.contains(placeholder));
        assert!(runtime.seen(StageKind::Recommendations).description.contains(placeholder));

        assert!(outcome.get(StageKind::Itinerary).success);
        assert!(outcome.get(StageKind::Recommendations).success);
        assert!(outcome.get(StageKind::Budget).success);
    }

    #[tokio::test]
    async fn test_every_stage_failing_still_yields_four_results() {
        let runtime = Arc::new(EchoRuntime::failing(&StageKind::ALL));
        let outcome = orchestrator(runtime.clone()).run(&tokyo()).await.unwrap();

        assert_eq!(outcome.stages.len(), 4);
        assert_eq!(outcome.failures().count(), 4);
        for stage in StageKind::ALL {
            assert_eq!(outcome.get(stage).output, stage.placeholder());
        }
        assert!(runtime
            .seen(StageKind::Budget)
            .description
            .contains(StageKind::Itinerary.placeholder()));
    }

    #[tokio::test]
    async fn test_empty_interests_rejected_before_dispatch() {
        let runtime = Arc::new(EchoRuntime::default());
        let mut trip = tokyo();
        trip.interests.clear();

        let result = orchestrator(runtime.clone()).run(&trip).await;
        assert!(matches!(
            result,
            Err(AppError::Precondition(PreconditionError::NoInterests))
        ));
        assert!(runtime.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backwards_dates_rejected_before_dispatch() {
        let runtime = Arc::new(EchoRuntime::default());
        let mut trip = tokyo();
        trip.travel_dates = Some(TravelDates {
            start: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
        });

        let result = orchestrator(runtime.clone()).run(&trip).await;
        assert!(matches!(
            result,
            Err(AppError::Precondition(PreconditionError::NonPositiveDuration(0)))
        ));
        assert!(runtime.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_progress_reports_every_transition() {
        let runtime = Arc::new(EchoRuntime::failing(&[StageKind::Itinerary]));
        let mut states = Vec::new();
        orchestrator(runtime)
            .run_with_progress(&tokyo(), |state| states.push(state))
            .await
            .unwrap();

        assert_eq!(
            states,
            vec![
                PipelineState::Idle,
                PipelineState::Researching,
                PipelineState::Planning,
                PipelineState::Recommending,
                PipelineState::Budgeting,
                PipelineState::Done,
            ]
        );
        let percentages: Vec<_> = states.iter().map(|s| s.progress()).collect();
        assert_eq!(percentages, vec![10, 20, 50, 70, 90, 100]);
    }

    #[test]
    fn test_stage_states() {
        assert_eq!(PipelineState::for_stage(StageKind::Research), PipelineState::Researching);
        assert_eq!(PipelineState::for_stage(StageKind::Budget), PipelineState::Budgeting);
        assert_eq!(PipelineState::Planning.status_text(), "Creating itinerary...");
    }
}
