use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::trip::{Activity, DayPlan};
use crate::schemas::completion_schema;

/// The `{days, totalEstimatedCost, summary}` payload returned by the
/// itinerary and refine stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDraft {
    /// Day plans ordered by `dayIndex`
    pub days: Vec<DayPlan>,
    /// Estimated cost of the whole trip in the profile currency
    pub total_estimated_cost: f64,
    /// Two or three sentence overview of the trip
    pub summary: String,
}

completion_schema!(ItineraryDraft, "ItineraryDraft");

// The research stage answers with a bare JSON array.
completion_schema!(Vec<Activity>, "ActivityList");
