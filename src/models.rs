use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::config::Config;
use crate::pipeline::{PipelineOutcome, StageResult};
use crate::tasks::StageKind;
use crate::types::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

/// Interests offered by the trip form.
pub const INTEREST_OPTIONS: [&str; 10] = [
    "History",
    "Art",
    "Food",
    "Nature",
    "Adventure",
    "Culture",
    "Shopping",
    "Relaxation",
    "Nightlife",
    "Photography",
];

pub const DEFAULT_INTERESTS: [&str; 2] = ["Food", "Culture"];

pub const MODEL_OPTIONS: [&str; 3] = ["gpt-4o-mini", "gpt-4o", "gpt-3.5-turbo"];

/// Used when neither travel dates nor a duration are supplied.
pub const DEFAULT_DURATION_DAYS: u32 = 7;

/// Reasons a run is refused before any stage executes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    #[error("Please enter your OpenAI API key.")]
    MissingApiKey,

    #[error("Please fill in the starting point.")]
    MissingStartingPoint,

    #[error("Please fill in the destination.")]
    MissingDestination,

    #[error("Please select at least one interest.")]
    NoInterests,

    #[error("End date must be after start date (got a duration of {0} days).")]
    NonPositiveDuration(i64),

    #[error("Travel dates span {0} days, which is too long for one trip.")]
    DurationTooLong(i64),

    #[error("Trip duration of {duration_days} days does not match the travel dates ({date_days} days).")]
    DurationMismatch { duration_days: u32, date_days: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BudgetLevel {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl BudgetLevel {
    pub const ALL: [BudgetLevel; 3] = [BudgetLevel::Budget, BudgetLevel::Moderate, BudgetLevel::Luxury];
}

impl std::fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetLevel::Budget => write!(f, "Budget"),
            BudgetLevel::Moderate => write!(f, "Moderate"),
            BudgetLevel::Luxury => write!(f, "Luxury"),
        }
    }
}

impl FromStr for BudgetLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(BudgetLevel::Budget),
            "moderate" => Ok(BudgetLevel::Moderate),
            "luxury" => Ok(BudgetLevel::Luxury),
            other => Err(AppError::InvalidRequest(format!(
                "unknown budget level '{}' (expected Budget, Moderate or Luxury)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TravelStyle {
    Relaxed,
    #[default]
    Moderate,
    Packed,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 3] = [TravelStyle::Relaxed, TravelStyle::Moderate, TravelStyle::Packed];
}

impl std::fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelStyle::Relaxed => write!(f, "Relaxed"),
            TravelStyle::Moderate => write!(f, "Moderate"),
            TravelStyle::Packed => write!(f, "Packed"),
        }
    }
}

impl FromStr for TravelStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relaxed" => Ok(TravelStyle::Relaxed),
            "moderate" => Ok(TravelStyle::Moderate),
            "packed" => Ok(TravelStyle::Packed),
            other => Err(AppError::InvalidRequest(format!(
                "unknown travel style '{}' (expected Relaxed, Moderate or Packed)",
                other
            ))),
        }
    }
}

/// Inclusive start, exclusive end: June 1 to June 8 is a 7-day trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelDates {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TravelDates {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PreconditionError> {
        let dates = Self { start, end };
        let days = dates.duration_days();
        if days < 1 {
            return Err(PreconditionError::NonPositiveDuration(days));
        }
        Ok(dates)
    }

    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The span as a trip duration, rejecting spans under one day.
    pub fn duration_in_days(&self) -> Result<u32, PreconditionError> {
        let days = self.duration_days();
        if days < 1 {
            return Err(PreconditionError::NonPositiveDuration(days));
        }
        u32::try_from(days).map_err(|_| PreconditionError::DurationTooLong(days))
    }

    /// `June 01, 2025 to June 08, 2025 (7 days)`
    pub fn range_label(&self) -> String {
        format!(
            "{} to {} ({} days)",
            self.start.format("%B %d, %Y"),
            self.end.format("%B %d, %Y"),
            self.duration_days()
        )
    }

    /// The date line embedded in task prompts.
    pub fn describe(&self) -> String {
        format!("Travel dates: {}", self.range_label())
    }
}

fn not_blank(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Everything the pipeline needs to know about one trip. Immutable for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TripRequest {
    #[validate(custom(function = "not_blank"))]
    pub starting_point: String,
    #[validate(custom(function = "not_blank"))]
    pub destination: String,
    #[validate(length(min = 1))]
    pub interests: Vec<String>,
    #[validate(range(min = 1))]
    pub duration_days: u32,
    pub budget_level: BudgetLevel,
    pub travel_style: TravelStyle,
    pub travel_dates: Option<TravelDates>,
    pub model: String,
}

impl TripRequest {
    pub fn new(
        starting_point: impl Into<String>,
        destination: impl Into<String>,
        interests: Vec<String>,
        duration_days: u32,
    ) -> Self {
        Self {
            starting_point: starting_point.into().trim().to_string(),
            destination: destination.into().trim().to_string(),
            interests: interests
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
            duration_days,
            budget_level: BudgetLevel::default(),
            travel_style: TravelStyle::default(),
            travel_dates: None,
            model: crate::config::DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_budget_level(mut self, budget_level: BudgetLevel) -> Self {
        self.budget_level = budget_level;
        self
    }

    pub fn with_travel_style(mut self, travel_style: TravelStyle) -> Self {
        self.travel_style = travel_style;
        self
    }

    /// Sets the travel dates; the duration follows from them.
    pub fn with_dates(mut self, dates: TravelDates) -> Result<Self, PreconditionError> {
        self.duration_days = dates.duration_in_days()?;
        self.travel_dates = Some(dates);
        Ok(self)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn interests_label(&self) -> String {
        self.interests.join(", ")
    }

    pub fn travel_date_info(&self) -> Option<String> {
        self.travel_dates.map(|d| d.describe())
    }

    /// Checks the pre-run requirements, reporting the first one that fails.
    pub fn ensure_ready(&self) -> Result<(), PreconditionError> {
        if let Some(dates) = self.travel_dates {
            let days = dates.duration_in_days()?;
            if days != self.duration_days {
                return Err(PreconditionError::DurationMismatch {
                    duration_days: self.duration_days,
                    date_days: i64::from(days),
                });
            }
        }

        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };
        let fields = errors.field_errors();

        if fields.contains_key("starting_point") {
            Err(PreconditionError::MissingStartingPoint)
        } else if fields.contains_key("destination") {
            Err(PreconditionError::MissingDestination)
        } else if fields.contains_key("interests") {
            Err(PreconditionError::NoInterests)
        } else {
            Err(PreconditionError::NonPositiveDuration(i64::from(self.duration_days)))
        }
    }
}

// API Request/Response types

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub starting_point: String,
    pub destination: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub budget_level: BudgetLevel,
    #[serde(default)]
    pub travel_style: TravelStyle,
    pub model: Option<String>,
}

impl PlanRequest {
    pub fn into_trip(self, default_model: &str) -> AppResult<TripRequest> {
        let model = self
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_model.to_string());

        let trip = TripRequest::new(
            self.starting_point,
            self.destination,
            self.interests,
            self.duration_days.unwrap_or(DEFAULT_DURATION_DAYS),
        )
        .with_budget_level(self.budget_level)
        .with_travel_style(self.travel_style)
        .with_model(model);

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Ok(trip.with_dates(TravelDates::new(start, end)?)?),
            (None, None) => Ok(trip),
            _ => Err(AppError::InvalidRequest(
                "start_date and end_date must be given together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StageView {
    pub stage: StageKind,
    pub title: String,
    pub output: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub filename: &'static str,
}

impl StageView {
    pub fn new(result: &StageResult, trip: &TripRequest) -> Self {
        Self {
            stage: result.stage,
            title: result.stage.title(trip),
            output: result.output.clone(),
            success: result.success,
            error: result.error.clone(),
            filename: result.stage.download_filename(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub run_id: uuid::Uuid,
    pub summary: String,
    pub stages: Vec<StageView>,
}

impl PlanResponse {
    pub fn from_outcome(trip: &TripRequest, outcome: &PipelineOutcome) -> Self {
        Self {
            run_id: outcome.run_id,
            summary: outcome.summary_markdown(trip),
            stages: outcome.stages.iter().map(|s| StageView::new(s, trip)).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub interests: Vec<&'static str>,
    pub default_interests: Vec<&'static str>,
    pub budget_levels: Vec<BudgetLevel>,
    pub travel_styles: Vec<TravelStyle>,
    pub models: Vec<&'static str>,
}

impl Default for OptionsResponse {
    fn default() -> Self {
        Self {
            interests: INTEREST_OPTIONS.to_vec(),
            default_interests: DEFAULT_INTERESTS.to_vec(),
            budget_levels: BudgetLevel::ALL.to_vec(),
            travel_styles: TravelStyle::ALL.to_vec(),
            models: MODEL_OPTIONS.to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: Cow<'static, str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}
