// Travel Planner - sequential multi-agent travel planning pipeline

pub mod config;
pub mod models;
pub mod types;
pub mod agents;
pub mod tasks;
pub mod llm;
pub mod search;    // Web search tool (DuckDuckGo through SerpAPI)
pub mod runtime;   // Executes one task with one agent
pub mod pipeline;
pub mod export;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::{AppState, TripRequest};
pub use pipeline::{PipelineOrchestrator, PipelineOutcome};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
