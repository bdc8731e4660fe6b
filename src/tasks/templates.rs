use super::{StageKind, TaskSpec};
use crate::models::TripRequest;

/// The date line, or nothing when the trip has no dates.
fn date_line(trip: &TripRequest) -> String {
    trip.travel_date_info()
        .map(|info| format!("{}\n", info))
        .unwrap_or_default()
}

fn task(
    stage: StageKind,
    description: String,
    expected_output: &str,
    output_file: &'static str,
    search_query: String,
) -> TaskSpec {
    TaskSpec {
        stage,
        agent: stage.agent().profile(),
        description,
        expected_output: expected_output.to_string(),
        output_file,
        search_query,
    }
}

pub fn destination_research_task(trip: &TripRequest) -> TaskSpec {
    let description = format!(
        r#"Research comprehensive information about {destination} as a travel destination.
Starting point: {starting_point}
{date_line}
Focus on the following areas:
- Main attractions and points of interest
- Local customs and cultural norms
- Typical weather conditions during the travel dates
- Transportation options within the destination
- Transportation from {starting_point} to {destination}
- Safety considerations
- Language considerations
- Visa and entry requirements

The traveler is interested in: {interests}
Trip duration: {duration} days

Provide a detailed report with all relevant information organized by category."#,
        destination = trip.destination,
        starting_point = trip.starting_point,
        date_line = date_line(trip),
        interests = trip.interests_label(),
        duration = trip.duration_days,
    );

    task(
        StageKind::Research,
        description,
        "A comprehensive report on the destination with all relevant travel information",
        "destination_research_report.txt",
        format!("{} travel guide {}", trip.destination, trip.interests_label()),
    )
}

pub fn itinerary_creation_task(trip: &TripRequest, research_report: &str) -> TaskSpec {
    let description = format!(
        r#"Create a detailed day-by-day itinerary for a {duration}-day trip to {destination}.

Starting from: {starting_point}
{date_line}Traveler interests: {interests}
Budget level: {budget_level}
Travel style: {travel_style}

Use the following research as a basis for your itinerary:
{research_report}

For each day, include:
- Morning activities
- Afternoon activities
- Evening activities
- Recommended dining options
- Estimated costs for activities and meals
- Transportation between locations

Begin with travel details from {starting_point} to {destination}.
Ensure the itinerary is realistic in terms of travel times and distances.
Balance the itinerary according to the traveler's preferred style.
Include the return journey to {starting_point} at the end of the trip."#,
        duration = trip.duration_days,
        destination = trip.destination,
        starting_point = trip.starting_point,
        date_line = date_line(trip),
        interests = trip.interests_label(),
        budget_level = trip.budget_level,
        travel_style = trip.travel_style,
        research_report = research_report,
    );

    task(
        StageKind::Itinerary,
        description,
        "A detailed day-by-day itinerary for the entire trip",
        "detailed_itinerary.txt",
        format!("{} {} day itinerary", trip.destination, trip.duration_days),
    )
}

pub fn local_recommendations_task(trip: &TripRequest, research_report: &str) -> TaskSpec {
    let description = format!(
        r#"Provide authentic local recommendations for {destination} based on the traveler's interests: {interests}.

Use the following research as additional context:
{research_report}

Include recommendations for:
- Hidden gems and off-the-beaten-path attractions
- Local restaurants and street food
- Cultural experiences and interactions with locals
- Local markets and shopping opportunities
- Authentic local experiences
- Ways to avoid tourist traps

Explain why each recommendation is special and how it provides an authentic experience."#,
        destination = trip.destination,
        interests = trip.interests_label(),
        research_report = research_report,
    );

    task(
        StageKind::Recommendations,
        description,
        "A curated list of authentic local recommendations",
        "local_recommendations.txt",
        format!("{} hidden gems local favorites {}", trip.destination, trip.interests_label()),
    )
}

pub fn budget_optimization_task(trip: &TripRequest, itinerary: &str) -> TaskSpec {
    let description = format!(
        r#"Optimize the travel budget for a {duration}-day trip to {destination} with a {budget_level} budget level.

Use the following itinerary as a reference:
{itinerary}

Provide specific recommendations for:
- Accommodation options at different price points
- Transportation cost-saving strategies
- Meal planning to save money
- Free or low-cost attractions and activities
- Local discount cards or passes
- Best times to visit paid attractions for discounts
- Money-saving tips specific to the destination

Create a detailed budget breakdown by category (accommodation, food, transportation, activities, etc.)
and provide a total estimated cost for the trip."#,
        duration = trip.duration_days,
        destination = trip.destination,
        budget_level = trip.budget_level,
        itinerary = itinerary,
    );

    task(
        StageKind::Budget,
        description,
        "A detailed budget optimization plan with specific recommendations and cost estimates",
        "budget_optimization_plan.txt",
        format!("{} travel costs {} budget", trip.destination, trip.budget_level),
    )
}
