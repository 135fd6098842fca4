use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use super::{backend::GenerationBackend, progress::ProgressSink, steps::AgentStep};
use crate::{
    config::GenerationConfig,
    error::Result,
    schemas::Validator,
    services::{openai_client::OpenAIClient, pipeline, stages::StageContext},
    types::{DayPlan, Itinerary, PlanResult, TripFormData},
};

/// Entry point for planning, refining and regenerating trips.
///
/// Holds no per-request state; clone it or share it behind an `Arc` across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    backend: Arc<dyn GenerationBackend>,
    validator: Validator,
}

impl TripPlanner {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            validator: Validator::default(),
        }
    }

    /// Planner backed by the OpenAI-compatible HTTP client.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let client = OpenAIClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(&GenerationConfig::from_env())
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn validator(&self) -> Validator {
        self.validator
    }

    pub fn is_backend_configured(&self) -> bool {
        self.backend.is_configured()
    }

    fn stages(&self) -> StageContext<'_> {
        StageContext::new(self.backend.as_ref(), self.validator)
    }

    /// Run Preference -> Research -> Itinerary, pushing every progress step
    /// into `sink` as it happens.
    pub async fn run_full_pipeline(
        &self,
        form: &TripFormData,
        sink: &mut dyn ProgressSink,
    ) -> Result<Itinerary> {
        pipeline::run_full_pipeline(self.stages(), form, sink).await
    }

    /// Run the full pipeline and collect the steps alongside the itinerary.
    pub async fn plan(&self, form: &TripFormData) -> Result<PlanResult> {
        let start = Instant::now();
        let mut steps: Vec<AgentStep> = Vec::new();

        let itinerary = self.run_full_pipeline(form, &mut steps).await?;

        let result = PlanResult::new(itinerary, steps, start.elapsed());
        info!(
            target: "tripagent::pipeline",
            steps = result.agent_steps.len(),
            elapsed_ms = result.duration.as_millis() as u64,
            offline = result.used_offline_sample(),
            "plan complete"
        );
        Ok(result)
    }

    /// Apply free-text feedback to a whole itinerary. Callers reject empty
    /// feedback before getting here.
    pub async fn refine(&self, itinerary: &Itinerary, feedback: &str) -> Result<Itinerary> {
        self.stages().refine(itinerary, feedback).await
    }

    /// Produce a replacement for one day. The returned day is not spliced
    /// into `itinerary`; see [`Itinerary::with_day_replaced`].
    pub async fn regenerate_day(
        &self,
        itinerary: &Itinerary,
        day_index: usize,
        constraints: &str,
    ) -> Result<DayPlan> {
        self.stages()
            .regenerate_day(itinerary, day_index, constraints)
            .await
    }
}
