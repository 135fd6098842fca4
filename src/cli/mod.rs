use crate::{
    api::{self, ApiError, PlanTripRequest, RefineTripRequest, RegenerateDayRequest},
    config::GenerationConfig,
    core::{planner::TripPlanner, progress::FnSink, steps::AgentStep},
    schemas::Validator,
    types::{Itinerary, PlanResult, TripFormData},
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

fn cli() -> Command {
    Command::new("trip-agent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan, refine and regenerate travel itineraries with an LLM pipeline")
        .subcommand_required(true)
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .global(true)
                .value_name("MODEL")
                .help("Model identifier (or set MODEL env var)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .global(true)
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY / OPENROUTER_API_KEY). Without one, plan returns a demo itinerary"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .global(true)
                .value_name("URL")
                .help("Chat-completions base URL (or set OPENAI_BASE_URL / OPENROUTER_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .global(true)
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .help("Request timeout in seconds"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Validate every response against its JSON schema before decoding"),
        )
        .subcommand(
            Command::new("plan")
                .about("Run the full preference -> research -> itinerary pipeline")
                .arg(
                    Arg::new("prompt")
                        .help("Free-form description of the trip")
                        .index(1),
                )
                .arg(
                    Arg::new("form")
                        .short('f')
                        .long("form")
                        .value_name("FILE")
                        .help("JSON file with trip form fields"),
                )
                .arg(
                    Arg::new("destinations")
                        .short('d')
                        .long("destinations")
                        .value_name("LIST")
                        .help("Comma-separated destinations"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the response body as JSON"),
                )
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(ArgAction::SetTrue)
                        .help("Print a replay of every progress step after the run"),
                ),
        )
        .subcommand(
            Command::new("refine")
                .about("Apply feedback to an existing itinerary")
                .arg(
                    Arg::new("itinerary")
                        .short('i')
                        .long("itinerary")
                        .value_name("FILE")
                        .required(true)
                        .help("JSON file containing the itinerary"),
                )
                .arg(
                    Arg::new("feedback")
                        .help("What to change")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("regenerate-day")
                .about("Replace one day of an existing itinerary")
                .arg(
                    Arg::new("itinerary")
                        .short('i')
                        .long("itinerary")
                        .value_name("FILE")
                        .required(true)
                        .help("JSON file containing the itinerary"),
                )
                .arg(
                    Arg::new("day")
                        .long("day")
                        .value_name("INDEX")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64))
                        .help("Zero-based index of the day to replace"),
                )
                .arg(
                    Arg::new("constraints")
                        .help("Extra constraints for the new day")
                        .index(1),
                ),
        )
}

/// CLI entry point for the trip-agent tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let config = resolve_config(&matches);
    let validator = if matches.get_flag("strict") {
        Validator::Strict
    } else {
        Validator::SerdeFirst
    };
    let planner = TripPlanner::from_config(&config)?.with_validator(validator);

    info!("Using model: {}", config.model);
    info!("Base URL: {}", config.base_url);
    if !planner.is_backend_configured() {
        warn!("No API key configured; plan will return the demo itinerary");
    }

    match matches.subcommand() {
        Some(("plan", sub)) => run_plan(&planner, sub).await,
        Some(("refine", sub)) => {
            let request = RefineTripRequest {
                itinerary: read_json::<ItineraryFile>(sub, "itinerary")?.into_itinerary(),
                feedback: sub.get_one::<String>("feedback").cloned().unwrap_or_default(),
            };
            respond(api::handle_refine_trip(&planner, &request).await)
        }
        Some(("regenerate-day", sub)) => {
            let request = RegenerateDayRequest {
                itinerary: read_json::<ItineraryFile>(sub, "itinerary")?.into_itinerary(),
                day_index: sub.get_one::<i64>("day").copied(),
                constraints: sub.get_one::<String>("constraints").cloned().unwrap_or_default(),
            };
            respond(api::handle_regenerate_day(&planner, &request).await)
        }
        _ => Err("unknown subcommand".into()),
    }
}

fn resolve_config(matches: &ArgMatches) -> GenerationConfig {
    let mut config = GenerationConfig::from_env();
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(api_key.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*seconds));
    }
    config
}

async fn run_plan(
    planner: &TripPlanner,
    sub: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut form: PlanTripRequest = match sub.get_one::<String>("form") {
        Some(path) => api::parse_request(&std::fs::read_to_string(path)?)?,
        None => TripFormData::default(),
    };
    if let Some(prompt) = sub.get_one::<String>("prompt") {
        form.freeform_prompt = prompt.clone();
    }
    if let Some(destinations) = sub.get_one::<String>("destinations") {
        form.destinations = destinations.clone();
    }
    if form.freeform_prompt.trim().is_empty() && form.destination_list().is_empty() {
        return Err("Describe the trip with a prompt, --destinations or --form".into());
    }

    if sub.get_flag("json") {
        return respond(api::handle_plan_trip(planner, &form).await);
    }

    // Stream progress to stderr while the pipeline runs.
    let (tx, mut rx) = mpsc::unbounded_channel::<AgentStep>();
    let printer = tokio::spawn(async move {
        while let Some(step) = rx.recv().await {
            eprintln!("{}", step.describe());
        }
    });

    let start = Instant::now();
    let mut steps: Vec<AgentStep> = Vec::new();
    let outcome = {
        let collected = &mut steps;
        let mut sink = FnSink(move |step: AgentStep| {
            collected.push(step.clone());
            let _ = tx.send(step);
        });
        planner.run_full_pipeline(&form, &mut sink).await
    };
    printer.await?;

    match outcome {
        Ok(itinerary) => {
            if sub.get_flag("trace") {
                let result = PlanResult::new(itinerary, steps, start.elapsed());
                println!("{}", result.replay());
            } else {
                println!("{}", serde_json::to_string_pretty(&itinerary)?);
            }
            info!("Planning completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Planning failed: {}", e);
            Err(e.into())
        }
    }
}

/// Accepts either a bare itinerary or a saved `{success, itinerary}` response.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItineraryFile {
    Response { itinerary: Itinerary },
    Bare(Itinerary),
}

impl ItineraryFile {
    fn into_itinerary(self) -> Itinerary {
        match self {
            Self::Response { itinerary } | Self::Bare(itinerary) => itinerary,
        }
    }
}

fn read_json<T: DeserializeOwned>(
    sub: &ArgMatches,
    arg: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let path = sub
        .get_one::<String>(arg)
        .ok_or_else(|| format!("--{} is required", arg))?;
    Ok(api::parse_request(&std::fs::read_to_string(path)?)?)
}

fn respond<T: Serialize>(outcome: Result<T, ApiError>) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(err) => {
            error!("Request failed: {}", err);
            println!("{}", serde_json::to_string_pretty(err.body())?);
            Err(err.into())
        }
    }
}
