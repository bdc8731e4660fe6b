use axum::{
    Router,
    routing::{get, post},
    Json,
    extract::State,
    response::Json as ResponseJson,
};
use crate::models::{AppState, OptionsResponse, PlanRequest, PlanResponse};
use crate::pipeline::PipelineOrchestrator;
use crate::runtime::LlmAgentRuntime;
use crate::types::AppError;
use super::{error_response, ApiError};
use std::sync::Arc;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/plan", post(create_plan))
        .route("/api/options", get(get_options))
        .with_state(state)
}

async fn get_options() -> ResponseJson<OptionsResponse> {
    Json(OptionsResponse::default())
}

pub async fn create_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<ResponseJson<PlanResponse>, ApiError> {
    info!(destination = %request.destination, "Received plan request");

    let trip = request
        .into_trip(&state.config.llm.default_model)
        .map_err(error_response)?;
    trip.ensure_ready()
        .map_err(|e| error_response(AppError::from(e)))?;

    let runtime = LlmAgentRuntime::from_config(&state.config, &trip.model).map_err(error_response)?;
    let orchestrator = PipelineOrchestrator::new(Arc::new(runtime));

    let outcome = orchestrator.run(&trip).await.map_err(error_response)?;

    Ok(Json(PlanResponse::from_outcome(&trip, &outcome)))
}
