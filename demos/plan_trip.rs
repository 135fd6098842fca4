//! Plan a trip and print each agent step as it happens.
//!
//! Runs against OPENAI_API_KEY / OPENROUTER_API_KEY when one is set, and
//! falls back to the built-in demo itinerary otherwise.

use trip_agent_rs::{AgentStep, FnSink, TripFormData, TripPlanner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let planner = TripPlanner::from_env()?;
    if !planner.is_backend_configured() {
        println!("No API key set, expect the demo itinerary\n");
    }

    let form = TripFormData {
        destinations: "Lisbon, Porto".to_string(),
        start_date: "2025-09-12".to_string(),
        end_date: "2025-09-17".to_string(),
        interests: vec!["food".into(), "architecture".into(), "live music".into()],
        freeform_prompt: "Relaxed pace, one long lunch a day, no early mornings".to_string(),
        ..TripFormData::default()
    };

    let mut sink = FnSink(|step: AgentStep| println!("{}", step.describe()));
    let itinerary = match planner.run_full_pipeline(&form, &mut sink).await {
        Ok(itinerary) => itinerary,
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            return Err(e.into());
        }
    };

    println!("\n{}", itinerary.summary);
    for day in &itinerary.days {
        println!(
            "Day {} ({}): {} activities, about {:.0} {}",
            day.day_index + 1,
            day.date,
            day.activity_count(),
            day.daily_budget,
            itinerary.trip_profile.currency
        );
    }
    println!("Total: {:.0}", itinerary.total_estimated_cost);

    Ok(())
}
