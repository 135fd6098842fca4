use tracing::{error, info, warn};

use super::stages::StageContext;
use crate::{
    core::{
        progress::{report, ProgressSink},
        steps::{AgentName, AgentStep},
    },
    error::{AgentError, Result},
    types::{sample::sample_itinerary, Itinerary, TripFormData},
};

const DEMO_MODE_MESSAGE: &str = "Using demo mode (no API key set)";

/// Preference -> Research -> Itinerary, strictly in order.
///
/// Each stage reports `running` before it starts and `completed` after. A
/// missing backend at the preference stage returns the offline sample; any
/// other failure is reported as an `error` step for the failing stage and
/// returned.
pub(crate) async fn run_full_pipeline(
    stages: StageContext<'_>,
    form: &TripFormData,
    sink: &mut dyn ProgressSink,
) -> Result<Itinerary> {
    report(
        sink,
        AgentStep::running(AgentName::Preference, "Analyzing your travel preferences..."),
    );

    let profile = match stages.preference(form).await {
        Ok(profile) => profile,
        Err(AgentError::BackendUnavailable) => {
            warn!(
                target: "tripagent::pipeline",
                "generation backend not configured, returning offline sample"
            );
            report(sink, AgentStep::completed(AgentName::Preference, DEMO_MODE_MESSAGE));
            return Ok(sample_itinerary());
        }
        Err(err) => return Err(fail(sink, AgentName::Preference, err)),
    };

    let destinations = profile.destination_names();
    report(
        sink,
        AgentStep::completed(
            AgentName::Preference,
            format!("Trip profile created for {}", destinations),
        ),
    );

    report(
        sink,
        AgentStep::running(
            AgentName::Research,
            format!("Researching activities in {}...", destinations),
        ),
    );
    let activities = stages
        .research(&profile)
        .await
        .map_err(|err| fail(sink, AgentName::Research, err))?;
    report(
        sink,
        AgentStep::completed(
            AgentName::Research,
            format!("Found {} activities across categories", activities.len()),
        ),
    );

    report(
        sink,
        AgentStep::running(AgentName::Itinerary, "Building your day-by-day itinerary..."),
    );
    let itinerary = stages
        .itinerary(&profile, &activities)
        .await
        .map_err(|err| fail(sink, AgentName::Itinerary, err))?;
    report(
        sink,
        AgentStep::completed(
            AgentName::Itinerary,
            format!("Created {}-day itinerary", itinerary.day_count()),
        ),
    );

    info!(
        target: "tripagent::pipeline",
        itinerary_id = %itinerary.id,
        days = itinerary.day_count(),
        activities = itinerary.activity_count(),
        "pipeline finished"
    );
    Ok(itinerary)
}

fn fail(sink: &mut dyn ProgressSink, stage: AgentName, err: AgentError) -> AgentError {
    error!(target: "tripagent::pipeline", stage = %stage, error = %err, "stage failed");
    report(sink, AgentStep::failed(stage, format!("Error: {}", err)));
    err
}
