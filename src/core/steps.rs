use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named agents of the planning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentName {
    #[serde(rename = "Preference Agent")]
    Preference,
    #[serde(rename = "Research Agent")]
    Research,
    #[serde(rename = "Itinerary Agent")]
    Itinerary,
    #[serde(rename = "Refine Agent")]
    Refine,
    /// Never reported through progress events; used to tag decode failures.
    #[serde(rename = "Regenerate Day Agent")]
    RegenerateDay,
}

impl AgentName {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentName::Preference => "Preference Agent",
            AgentName::Research => "Research Agent",
            AgentName::Itinerary => "Itinerary Agent",
            AgentName::Refine => "Refine Agent",
            AgentName::RegenerateDay => "Regenerate Day Agent",
        }
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a stage: `pending -> running -> completed | error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Completed,
    Error,
}

/// A single progress record emitted by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStep {
    pub agent_name: AgentName,
    pub status: StepStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl AgentStep {
    pub fn new(agent_name: AgentName, status: StepStatus, message: impl Into<String>) -> Self {
        Self {
            agent_name,
            status,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn pending(agent_name: AgentName, message: impl Into<String>) -> Self {
        Self::new(agent_name, StepStatus::Pending, message)
    }

    pub fn running(agent_name: AgentName, message: impl Into<String>) -> Self {
        Self::new(agent_name, StepStatus::Running, message)
    }

    pub fn completed(agent_name: AgentName, message: impl Into<String>) -> Self {
        Self::new(agent_name, StepStatus::Completed, message)
    }

    pub fn failed(agent_name: AgentName, message: impl Into<String>) -> Self {
        Self::new(agent_name, StepStatus::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.status == StepStatus::Error
    }

    /// Get a human-readable description of the step
    pub fn describe(&self) -> String {
        let marker = match self.status {
            StepStatus::Pending => "⏳",
            StepStatus::Running => "🧭",
            StepStatus::Completed => "✅",
            StepStatus::Error => "❌",
        };
        format!("{} {}: {}", marker, self.agent_name, self.message)
    }
}
