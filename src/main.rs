use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use travel_planner::{
    config::Config,
    create_router,
    export::write_artifacts,
    models::{BudgetLevel, TravelDates, TravelStyle, TripRequest, DEFAULT_INTERESTS, INTEREST_OPTIONS},
    runtime::LlmAgentRuntime,
    tasks::StageKind,
    utils::init_logger,
    AppState, PipelineOrchestrator,
};

#[derive(Parser)]
#[command(name = "travel-planner", version, about = "Plan a trip with a crew of AI agents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pipeline once and print (and save) the plan
    Plan(PlanArgs),
    /// Serve the HTTP API
    Serve,
}

#[derive(Args)]
struct PlanArgs {
    /// Where the trip starts, e.g. "New York, USA"
    #[arg(long)]
    from: String,

    /// Where the trip goes, e.g. "Tokyo, Japan"
    #[arg(long)]
    to: String,

    /// Repeatable. Suggested: History, Art, Food, Nature, Adventure, Culture,
    /// Shopping, Relaxation, Nightlife, Photography (default: Food, Culture)
    #[arg(long = "interest")]
    interests: Vec<String>,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long, requires = "end_date")]
    start_date: Option<NaiveDate>,

    /// Day the trip ends (YYYY-MM-DD), must be after the start date
    #[arg(long, requires = "start_date")]
    end_date: Option<NaiveDate>,

    /// Trip length when no dates are given
    #[arg(long, conflicts_with_all = ["start_date", "end_date"])]
    days: Option<u32>,

    /// Budget, Moderate or Luxury
    #[arg(long, default_value_t = BudgetLevel::Moderate)]
    budget: BudgetLevel,

    /// Relaxed, Moderate or Packed
    #[arg(long, default_value_t = TravelStyle::Moderate)]
    style: TravelStyle,

    /// Model selector, e.g. gpt-4o-mini, gpt-4o, gpt-3.5-turbo
    #[arg(long)]
    model: Option<String>,

    /// Model API key (overrides OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Directory for the four text files (overrides OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print only, write nothing
    #[arg(long)]
    no_save: bool,
}

impl PlanArgs {
    fn trip(&self, default_model: &str) -> anyhow::Result<TripRequest> {
        let interests = if self.interests.is_empty() {
            DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.interests.clone()
        };

        for interest in &interests {
            if !INTEREST_OPTIONS.iter().any(|o| o.eq_ignore_ascii_case(interest.trim())) {
                info!(interest = %interest, "Using a custom interest");
            }
        }

        let model = self.model.clone().unwrap_or_else(|| default_model.to_string());
        let trip = TripRequest::new(&self.from, &self.to, interests, self.days.unwrap_or(0))
            .with_budget_level(self.budget)
            .with_travel_style(self.style)
            .with_model(model);

        let trip = match (self.start_date, self.end_date, self.days) {
            (Some(start), Some(end), _) => trip.with_dates(TravelDates::new(start, end)?)?,
            (_, _, Some(_)) => trip,
            _ => {
                // Same default the trip form uses: a week, a month from now
                let start = Local::now().date_naive() + Duration::days(30);
                trip.with_dates(TravelDates::new(start, start + Duration::days(7))?)?
            }
        };

        Ok(trip)
    }
}

async fn plan(mut config: Config, args: PlanArgs) -> anyhow::Result<()> {
    if let Some(key) = &args.api_key {
        config.llm.api_key = Some(key.clone());
    }

    let trip = args.trip(&config.llm.default_model)?;
    trip.ensure_ready()?;

    let runtime = LlmAgentRuntime::from_config(&config, &trip.model)?;
    let orchestrator = PipelineOrchestrator::new(Arc::new(runtime));

    let outcome = orchestrator
        .run_with_progress(&trip, |state| {
            eprintln!("[{:>3}%] {}", state.progress(), state.status_text());
        })
        .await?;

    for notice in outcome.stages.iter().filter_map(|s| s.error_notice()) {
        eprintln!("{}", notice);
    }

    println!("{}", outcome.summary_markdown(&trip));
    for stage in StageKind::ALL {
        println!("# {}\n", stage.title(&trip));
        println!("{}\n", outcome.get(stage).output);
    }

    if !args.no_save {
        let dir = args.output_dir.unwrap_or(config.output.dir);
        let written = write_artifacts(&outcome, &dir).await?;
        for path in written {
            eprintln!("Saved {}", path.display());
        }
    }

    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Configuration loaded: {:?}", config.server);

    let state = AppState { config: config.clone() };
    let app = create_router(state);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Plan(args) => plan(config, args).await,
        Command::Serve => serve(config).await,
    }
}
