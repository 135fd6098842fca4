use super::{sample::SAMPLE_ITINERARY_ID, Itinerary};
use crate::core::steps::AgentStep;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a full planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    /// The finished itinerary (or the offline sample in demo mode)
    pub itinerary: Itinerary,
    /// Every progress step reported during the run, in order
    pub agent_steps: Vec<AgentStep>,
    /// Wall-clock time of the run
    #[serde(skip)]
    pub duration: Duration,
}

impl PlanResult {
    pub fn new(itinerary: Itinerary, agent_steps: Vec<AgentStep>, duration: Duration) -> Self {
        Self {
            itinerary,
            agent_steps,
            duration,
        }
    }

    /// True when the pipeline fell back to the built-in sample itinerary.
    pub fn used_offline_sample(&self) -> bool {
        self.itinerary.id == SAMPLE_ITINERARY_ID
    }

    /// Generate a human-readable replay of the run
    pub fn replay(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Trip Planning Trace ===".to_string());
        lines.push(format!("Duration: {:.2}s", self.duration.as_secs_f64()));
        if self.used_offline_sample() {
            lines.push("Mode: demo (offline sample)".to_string());
        }

        lines.push(String::new());
        lines.push("--- Steps ---".to_string());

        for (idx, step) in self.agent_steps.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, step.describe()));
        }

        lines.push(String::new());
        lines.push("--- Itinerary ---".to_string());
        lines.push(format!(
            "{} ({} days, {} activities, est. {:.2} {})",
            self.itinerary.trip_profile.destination_names(),
            self.itinerary.day_count(),
            self.itinerary.activity_count(),
            self.itinerary.total_estimated_cost,
            self.itinerary.trip_profile.currency,
        ));
        for day in &self.itinerary.days {
            lines.push(format!(
                "Day {} ({}): {} activities, {:.2}",
                day.day_index + 1,
                day.date,
                day.activity_count(),
                day.daily_budget
            ));
        }
        if !self.itinerary.summary.is_empty() {
            lines.push(String::new());
            lines.push(self.itinerary.summary.clone());
        }

        lines.join("\n")
    }

    /// Steps reported with `error` status.
    pub fn error_count(&self) -> usize {
        self.agent_steps.iter().filter(|s| s.is_error()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::steps::AgentName;
    use crate::types::sample::sample_itinerary;

    #[test]
    fn test_replay_lists_steps_and_days() {
        let result = PlanResult::new(
            sample_itinerary(),
            vec![
                AgentStep::running(AgentName::Preference, "Analyzing your travel preferences..."),
                AgentStep::completed(AgentName::Preference, "Using demo mode (no API key set)"),
            ],
            Duration::from_millis(1500),
        );

        let replay = result.replay();
        assert!(replay.contains("Duration: 1.50s"));
        assert!(replay.contains("Mode: demo"));
        assert!(replay.contains("2. "));
        assert!(replay.contains("Day 3 (2025-04-03)"));
        assert!(result.used_offline_sample());
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_generated_itinerary_is_not_sample() {
        let mut itinerary = sample_itinerary();
        itinerary.id = "2f1c8c1e-0000-4000-8000-000000000000".into();
        let result = PlanResult::new(itinerary, Vec::new(), Duration::ZERO);
        assert!(!result.used_offline_sample());
        assert!(!result.replay().contains("Mode: demo"));
    }
}
