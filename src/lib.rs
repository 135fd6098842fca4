//! trip-agent-rs: a prompt-driven trip planning pipeline
//!
//! A free-form or structured trip request goes through three generation
//! stages (preference, research, itinerary) and comes back as a validated
//! day-by-day [`Itinerary`], with a progress step reported at every stage
//! transition. Finished itineraries can be refined as a whole or have a
//! single day regenerated. Without an API key the planner returns a built-in
//! demo itinerary instead of failing.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_agent_rs::{GenerationConfig, TripFormData, TripPlanner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = TripPlanner::from_config(&GenerationConfig::from_env())?;
//!
//!     let form = TripFormData::from_prompt("Four relaxed days in Lisbon, mostly food and old town walks");
//!     let result = planner.plan(&form).await?;
//!
//!     println!("{}", result.replay());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub(crate) mod services;
pub mod types;

pub use config::GenerationConfig;
pub use crate::core::{
    AgentName, AgentStep, FnSink, GenerationBackend, NoopSink, PlanResult, ProgressSink,
    StepStatus, TripPlanner,
};
pub use error::{AgentError, Result};
pub use schemas::{CompletionSchema, SchemaHandle, Validator};
pub use services::decoder::{decode_response, strip_fences, DecodeError};
pub use services::openai_client::OpenAIClient;
pub use services::template::{render_template, template_placeholders, TemplateVars};
pub use types::{
    day_count, sample_itinerary, Activity, ActivityCategory, DayPlan, Itinerary, ItineraryDraft,
    Pace, TimeOfDay, TripConstraints, TripFormData, TripProfile, WalkingTolerance,
    SAMPLE_ITINERARY_ID,
};

pub use services::prompts;
pub use types::response;

#[cfg(feature = "cli")]
pub mod cli;
