#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use trip_agent_rs::{
    sample_itinerary, Activity, AgentError, GenerationBackend, GenerationConfig, ItineraryDraft,
    Result, TripPlanner,
};

/// Backend that answers from a fixed script, one reply per call, and records
/// every prompt it was sent.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Backend("script exhausted".to_string())))
    }
}

pub fn planner_with(backend: &Arc<ScriptedBackend>) -> TripPlanner {
    TripPlanner::new(backend.clone())
}

pub fn offline_planner() -> TripPlanner {
    TripPlanner::from_config(&GenerationConfig::unconfigured()).unwrap()
}

pub fn profile_reply() -> String {
    format!(
        "```json\n{}\n```",
        serde_json::to_string_pretty(&sample_itinerary().trip_profile).unwrap()
    )
}

pub fn research_reply() -> String {
    let activities: Vec<Activity> = sample_itinerary()
        .days
        .iter()
        .flat_map(|day| day.activities().cloned())
        .collect();
    serde_json::to_string(&activities).unwrap()
}

pub fn itinerary_reply() -> String {
    let sample = sample_itinerary();
    let draft = ItineraryDraft {
        days: sample.days,
        total_estimated_cost: sample.total_estimated_cost,
        summary: "Temples, markets and river gorges".to_string(),
    };
    format!("```\n{}\n```", serde_json::to_string(&draft).unwrap())
}
