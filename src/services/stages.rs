use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::decoder::decode_response;
use super::prompts::{
    ITINERARY_PROMPT, PREFERENCE_PROMPT, REFINE_PROMPT, REGENERATE_DAY_PROMPT, RESEARCH_PROMPT,
};
use super::template::{render_template, TemplateVars};
use crate::{
    core::{backend::GenerationBackend, steps::AgentName},
    error::{AgentError, Result},
    schemas::{CompletionSchema, Validator},
    types::{Activity, DayPlan, Itinerary, ItineraryDraft, TripFormData, TripProfile},
};

const NO_FREEFORM_INPUT: &str = "No additional free-form input provided.";
const NO_DAY_CONSTRAINTS: &str = "No additional constraints";

/// Everything a stage needs: the backend to call and how strictly to decode.
#[derive(Clone, Copy)]
pub(crate) struct StageContext<'a> {
    pub backend: &'a dyn GenerationBackend,
    pub validator: Validator,
}

impl<'a> StageContext<'a> {
    pub fn new(backend: &'a dyn GenerationBackend, validator: Validator) -> Self {
        Self { backend, validator }
    }

    /// render -> complete -> decode. Decode failures are tagged with the stage.
    async fn generate<T: CompletionSchema>(
        &self,
        stage: AgentName,
        template: &str,
        vars: &TemplateVars<'_>,
    ) -> Result<T> {
        let prompt = render_template(template, vars);
        debug!(
            target: "tripagent::stages",
            stage = %stage,
            prompt_chars = prompt.len(),
            "prompt rendered"
        );

        let raw = self.backend.complete(&prompt).await?;
        debug!(
            target: "tripagent::stages",
            stage = %stage,
            response_chars = raw.len(),
            "response received"
        );

        decode_response::<T>(&raw, self.validator)
            .map_err(|err| AgentError::malformed(stage, err.to_string()))
    }

    pub async fn preference(&self, form: &TripFormData) -> Result<TripProfile> {
        info!(target: "tripagent::stages", "running preference agent");

        let user_input = if form.freeform_prompt.trim().is_empty() {
            NO_FREEFORM_INPUT.to_string()
        } else {
            form.freeform_prompt.clone()
        };

        let vars = TemplateVars::from([
            ("userInput", user_input),
            (
                "structuredFields",
                serde_json::to_string_pretty(&form.structured_fields())?,
            ),
        ]);

        let profile: TripProfile = self
            .generate(AgentName::Preference, PREFERENCE_PROMPT, &vars)
            .await?;
        info!(
            target: "tripagent::stages",
            destinations = %profile.destination_names(),
            days = profile.day_count(),
            "trip profile decoded"
        );
        Ok(profile)
    }

    pub async fn research(&self, profile: &TripProfile) -> Result<Vec<Activity>> {
        info!(target: "tripagent::stages", "running research agent");

        let vars = TemplateVars::from([
            ("tripProfile", serde_json::to_string_pretty(profile)?),
            ("numDays", profile.day_count().to_string()),
            ("interests", profile.interests.join(", ")),
            ("budgetMin", profile.budget_min.to_string()),
            ("budgetMax", profile.budget_max.to_string()),
            ("currency", profile.currency.clone()),
            ("pace", profile.pace.as_str().to_string()),
            ("dietary", or_default(profile.constraints.dietary.join(", "), "none")),
            (
                "mustSeeItems",
                or_default(profile.constraints.must_see_items.join(", "), "none specified"),
            ),
        ]);

        let activities: Vec<Activity> = self
            .generate(AgentName::Research, RESEARCH_PROMPT, &vars)
            .await?;
        info!(target: "tripagent::stages", activities = activities.len(), "activities decoded");
        Ok(activities)
    }

    pub async fn itinerary(
        &self,
        profile: &TripProfile,
        activities: &[Activity],
    ) -> Result<Itinerary> {
        info!(target: "tripagent::stages", "running itinerary agent");

        let vars = TemplateVars::from([
            ("tripProfile", serde_json::to_string_pretty(profile)?),
            ("activities", serde_json::to_string_pretty(activities)?),
            ("pace", profile.pace.as_str().to_string()),
            ("budgetMin", profile.budget_min.to_string()),
            ("budgetMax", profile.budget_max.to_string()),
            ("currency", profile.currency.clone()),
            ("numDays", profile.day_count().to_string()),
        ]);

        let draft: ItineraryDraft = self
            .generate(AgentName::Itinerary, ITINERARY_PROMPT, &vars)
            .await?;
        info!(target: "tripagent::stages", days = draft.days.len(), "itinerary decoded");

        Ok(Itinerary {
            id: Uuid::new_v4().to_string(),
            trip_profile: profile.clone(),
            days: draft.days,
            total_estimated_cost: draft.total_estimated_cost,
            generated_at: Utc::now(),
            summary: draft.summary,
        })
    }

    /// Without a backend the input comes back with a fresh timestamp.
    pub async fn refine(&self, itinerary: &Itinerary, feedback: &str) -> Result<Itinerary> {
        if !self.backend.is_configured() {
            debug!(target: "tripagent::stages", "refine skipped: backend not configured");
            return Ok(Itinerary {
                generated_at: Utc::now(),
                ..itinerary.clone()
            });
        }

        info!(target: "tripagent::stages", "running refine agent");
        let vars = TemplateVars::from([
            ("itinerary", serde_json::to_string_pretty(itinerary)?),
            ("feedback", feedback.to_string()),
        ]);

        let draft: ItineraryDraft = self
            .generate(AgentName::Refine, REFINE_PROMPT, &vars)
            .await?;

        Ok(Itinerary {
            days: draft.days,
            total_estimated_cost: draft.total_estimated_cost,
            summary: draft.summary,
            generated_at: Utc::now(),
            ..itinerary.clone()
        })
    }

    /// Without a backend the target day comes back unchanged.
    pub async fn regenerate_day(
        &self,
        itinerary: &Itinerary,
        day_index: usize,
        constraints: &str,
    ) -> Result<DayPlan> {
        let current_day = itinerary.day(day_index).ok_or_else(|| {
            AgentError::InvalidRequest(format!(
                "day index {} is out of range for a {}-day itinerary",
                day_index,
                itinerary.day_count()
            ))
        })?;

        if !self.backend.is_configured() {
            debug!(target: "tripagent::stages", "regenerate-day skipped: backend not configured");
            return Ok(current_day.clone());
        }

        info!(target: "tripagent::stages", day_index, "running regenerate-day agent");
        let other_days: Vec<&DayPlan> = itinerary
            .days
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != day_index)
            .map(|(_, day)| day)
            .collect();

        let vars = TemplateVars::from([
            ("tripProfile", serde_json::to_string_pretty(&itinerary.trip_profile)?),
            ("dayIndex", day_index.to_string()),
            ("currentDay", serde_json::to_string_pretty(current_day)?),
            ("otherDays", serde_json::to_string_pretty(&other_days)?),
            ("constraints", or_default(constraints.trim().to_string(), NO_DAY_CONSTRAINTS)),
            ("date", current_day.date.to_string()),
        ]);

        let mut day: DayPlan = self
            .generate(AgentName::RegenerateDay, REGENERATE_DAY_PROMPT, &vars)
            .await?;

        // the slot being replaced is fixed by the request, not by the model
        day.day_index = current_day.day_index;
        day.date = current_day.date;
        Ok(day)
    }
}

fn or_default(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::template::template_placeholders;
    use crate::types::sample::sample_itinerary;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records prompts and answers with a fixed reply.
    #[derive(Debug)]
    struct EchoBackend {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl EchoBackend {
        fn new(reply: impl Into<String>) -> Self {
            Self {
                reply: reply.into(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl GenerationBackend for EchoBackend {
        fn is_configured(&self) -> bool {
            true
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn assert_fully_rendered(prompt: &str, template: &str) {
        for name in template_placeholders(template) {
            assert!(
                !prompt.contains(&format!("{{{name}}}")),
                "placeholder `{name}` was not supplied"
            );
        }
    }

    #[tokio::test]
    async fn test_research_prompt_supplies_every_placeholder() {
        let itinerary = sample_itinerary();
        let activities: Vec<Activity> = itinerary.days[0].activities().cloned().collect();
        let backend = EchoBackend::new(serde_json::to_string(&activities).unwrap());
        let stages = StageContext::new(&backend, Validator::SerdeFirst);

        let decoded = stages.research(&itinerary.trip_profile).await.unwrap();
        assert_eq!(decoded, activities);

        let prompt = backend.last_prompt();
        assert_fully_rendered(&prompt, RESEARCH_PROMPT);
        assert!(prompt.contains("Trip length: 3 days"));
        assert!(prompt.contains("respect dietary needs: none"));
    }

    #[tokio::test]
    async fn test_itinerary_assigns_fresh_identity() {
        let sample = sample_itinerary();
        let draft = ItineraryDraft {
            days: sample.days.clone(),
            total_estimated_cost: sample.total_estimated_cost,
            summary: "A short trip".into(),
        };
        let backend = EchoBackend::new(serde_json::to_string(&draft).unwrap());
        let stages = StageContext::new(&backend, Validator::Strict);

        let activities: Vec<Activity> = sample.days[0].activities().cloned().collect();
        let itinerary = stages
            .itinerary(&sample.trip_profile, &activities)
            .await
            .unwrap();

        assert_ne!(itinerary.id, sample.id);
        assert!(Uuid::parse_str(&itinerary.id).is_ok());
        assert_eq!(itinerary.trip_profile, sample.trip_profile);
        assert_eq!(itinerary.summary, "A short trip");
        assert_fully_rendered(&backend.last_prompt(), ITINERARY_PROMPT);
    }

    #[tokio::test]
    async fn test_preference_uses_placeholder_text_for_blank_prompt() {
        let profile = sample_itinerary().trip_profile;
        let backend = EchoBackend::new(format!(
            "```json\n{}\n```",
            serde_json::to_string(&profile).unwrap()
        ));
        let stages = StageContext::new(&backend, Validator::SerdeFirst);

        let form = TripFormData {
            destinations: "Kyoto".into(),
            ..TripFormData::default()
        };
        let decoded = stages.preference(&form).await.unwrap();
        assert_eq!(decoded, profile);

        let prompt = backend.last_prompt();
        assert!(prompt.contains(NO_FREEFORM_INPUT));
        assert!(prompt.contains("\"Kyoto\""));
        assert_fully_rendered(&prompt, PREFERENCE_PROMPT);
    }

    #[tokio::test]
    async fn test_regenerate_day_pins_index_and_date() {
        let itinerary = sample_itinerary();
        let mut replacement = itinerary.days[0].clone();
        replacement.day_index = 7;
        replacement.date = itinerary.days[0].date + chrono::Days::new(30);

        let backend = EchoBackend::new(serde_json::to_string(&replacement).unwrap());
        let stages = StageContext::new(&backend, Validator::SerdeFirst);

        let day = stages.regenerate_day(&itinerary, 2, "").await.unwrap();
        assert_eq!(day.day_index, itinerary.days[2].day_index);
        assert_eq!(day.date, itinerary.days[2].date);
        assert_eq!(day.morning_activities, replacement.morning_activities);

        let prompt = backend.last_prompt();
        assert!(prompt.contains(NO_DAY_CONSTRAINTS));
        assert_fully_rendered(&prompt, REGENERATE_DAY_PROMPT);
    }

    #[tokio::test]
    async fn test_malformed_response_names_stage() {
        let backend = EchoBackend::new("{\"days\": [");
        let stages = StageContext::new(&backend, Validator::SerdeFirst);
        let itinerary = sample_itinerary();

        let err = stages.refine(&itinerary, "more food").await.unwrap_err();
        assert_eq!(err.stage(), Some(AgentName::Refine));
        assert_fully_rendered(&backend.last_prompt(), REFINE_PROMPT);
    }
}
