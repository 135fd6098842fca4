use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::trip::{Pace, WalkingTolerance};

/// Raw trip request as submitted by the caller. Every field is optional on
/// the wire; the preference stage infers whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TripFormData {
    pub origin: String,
    /// Comma-separated destination names
    pub destinations: String,
    pub start_date: String,
    pub end_date: String,
    pub budget_min: f64,
    pub budget_max: f64,
    pub pace: Pace,
    pub interests: Vec<String>,
    pub dietary: Vec<String>,
    pub walking_tolerance: WalkingTolerance,
    /// Comma-separated must-see items
    pub must_see_items: String,
    pub additional_notes: String,
    pub freeform_prompt: String,
}

impl TripFormData {
    /// A request carrying only free-form text.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            freeform_prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn destination_list(&self) -> Vec<String> {
        split_list(&self.destinations)
    }

    pub fn must_see_list(&self) -> Vec<String> {
        split_list(&self.must_see_items)
    }

    /// The structured part of the form, as handed to the preference prompt.
    pub fn structured_fields(&self) -> Value {
        json!({
            "origin": self.origin,
            "destinations": self.destination_list(),
            "startDate": self.start_date,
            "endDate": self.end_date,
            "budgetMin": self.budget_min,
            "budgetMax": self.budget_max,
            "pace": self.pace,
            "interests": self.interests,
            "dietary": self.dietary,
            "walkingTolerance": self.walking_tolerance,
            "mustSeeItems": self.must_see_list(),
            "additionalNotes": self.additional_notes,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
