//! Writes a run's four text artifacts to disk under their download names.

use crate::pipeline::PipelineOutcome;
use crate::types::AppResult;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub async fn write_artifacts(outcome: &PipelineOutcome, dir: &Path) -> AppResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(outcome.stages.len());
    for (filename, contents) in outcome.artifacts() {
        let path = dir.join(filename);
        fs::write(&path, contents).await?;
        written.push(path);
    }

    info!(run_id = %outcome.run_id, dir = %dir.display(), files = written.len(), "Artifacts written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StageResult;
    use crate::tasks::StageKind;
    use tempfile::TempDir;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_writes_four_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("plan");
        let outcome = PipelineOutcome {
            run_id: Uuid::new_v4(),
            stages: [
                StageResult::succeeded(StageKind::Research, "overview".to_string()),
                StageResult::succeeded(StageKind::Itinerary, "day by day".to_string()),
                StageResult::failed(StageKind::Recommendations, "boom".to_string()),
                StageResult::succeeded(StageKind::Budget, "costs".to_string()),
            ],
        };

        let written = write_artifacts(&outcome, &dir).await.unwrap();
        assert_eq!(written.len(), 4);

        let itinerary = fs::read_to_string(dir.join("travel_itinerary.txt")).await.unwrap();
        assert_eq!(itinerary, "day by day");
        let recommendations = fs::read_to_string(dir.join("local_recommendations.txt")).await.unwrap();
        assert_eq!(recommendations, StageKind::Recommendations.placeholder());
        assert!(dir.join("destination_overview.txt").exists());
        assert!(dir.join("budget_plan.txt").exists());
    }
}
