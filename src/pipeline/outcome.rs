use crate::models::TripRequest;
use crate::tasks::StageKind;
use serde::Serialize;
use uuid::Uuid;

/// What one stage produced. On failure `output` holds the stage's
/// placeholder and `error` the underlying message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageResult {
    pub stage: StageKind,
    pub output: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StageResult {
    pub fn succeeded(stage: StageKind, output: String) -> Self {
        Self {
            stage,
            output,
            success: true,
            error: None,
        }
    }

    pub fn failed(stage: StageKind, error: String) -> Self {
        Self {
            stage,
            output: stage.placeholder().to_string(),
            success: false,
            error: Some(error),
        }
    }

    /// `Error in research task: ...`, or `None` for a successful stage.
    pub fn error_notice(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|e| format!("Error in {} task: {}", self.stage, e))
    }
}

/// The four stage results of one run, in stage order.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub run_id: Uuid,
    pub stages: [StageResult; 4],
}

impl PipelineOutcome {
    pub fn get(&self, stage: StageKind) -> &StageResult {
        &self.stages[stage.index()]
    }

    pub fn all_succeeded(&self) -> bool {
        self.stages.iter().all(|s| s.success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StageResult> {
        self.stages.iter().filter(|s| !s.success)
    }

    /// `(download filename, contents)` for each stage.
    pub fn artifacts(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.stages
            .iter()
            .map(|s| (s.stage.download_filename(), s.output.as_str()))
    }

    /// The trip summary block shown above the results.
    pub fn summary_markdown(&self, trip: &TripRequest) -> String {
        let dates = match &trip.travel_dates {
            Some(dates) => dates.range_label(),
            None => format!("{} days", trip.duration_days),
        };

        format!(
            "## Trip Summary:\n\
             - **Starting Point**: {}\n\
             - **Destination**: {}\n\
             - **Travel Dates**: {}\n\
             - **Budget Level**: {}\n\
             - **Travel Style**: {}\n",
            trip.starting_point, trip.destination, dates, trip.budget_level, trip.travel_style
        )
    }
}
