use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AgentError, Result};
use crate::schemas::completion_schema;

/// How densely each day should be filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Chill,
    #[default]
    Balanced,
    Packed,
}

impl Pace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Chill => "chill",
            Pace::Balanced => "balanced",
            Pace::Packed => "packed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WalkingTolerance {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Sight,
    Food,
    Activity,
    Nightlife,
    Nature,
    Culture,
    Shopping,
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

/// Hard and soft limits the traveler asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripConstraints {
    /// Dietary restrictions, e.g. "vegetarian"
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub walking_tolerance: WalkingTolerance,
    /// Places or experiences that must appear in the plan
    #[serde(default)]
    pub must_see_items: Vec<String>,
    #[serde(default)]
    pub additional_notes: String,
}

/// Normalized trip intent produced by the preference stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripProfile {
    /// Departure city, empty when unknown
    #[serde(default)]
    pub origin: String,
    /// Destination names in visiting order
    pub destinations: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Lower bound of the total trip budget
    #[schemars(range(min = 0))]
    pub budget_min: f64,
    /// Upper bound of the total trip budget
    #[schemars(range(min = 0))]
    pub budget_max: f64,
    /// ISO currency code used for every amount in the plan
    pub currency: String,
    pub pace: Pace,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub constraints: TripConstraints,
}

completion_schema!(TripProfile, "TripProfile");

impl TripProfile {
    /// Number of planned days: whole days between start and end, never below one.
    pub fn day_count(&self) -> u32 {
        day_count(self.start_date, self.end_date)
    }

    pub fn destination_names(&self) -> String {
        self.destinations.join(", ")
    }
}

/// `ceil((end - start) / 1 day)`, floored at 1.
pub fn day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = end.signed_duration_since(start).num_days();
    u32::try_from(days.max(1)).unwrap_or(u32::MAX)
}

/// Accepts `90` and `90.0` alike; models often emit whole numbers as floats.
fn whole_number<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl<'de> Visitor<'de> for WholeNumber {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative whole number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<u32, E> {
            if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) {
                Ok(v as u32)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}

/// A candidate recommendation from the research stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ActivityCategory,
    /// Area or district, used to group nearby activities
    #[serde(default)]
    pub neighborhood: String,
    /// Expected duration in minutes
    #[serde(rename = "duration", deserialize_with = "whole_number")]
    #[schemars(range(min = 1))]
    pub duration_minutes: u32,
    /// Estimated cost in the profile currency
    #[schemars(range(min = 0))]
    pub cost_estimate: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub time_of_day: TimeOfDay,
}

/// One calendar day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// Zero-based position of the day within the trip
    #[serde(deserialize_with = "whole_number")]
    pub day_index: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub morning_activities: Vec<Activity>,
    #[serde(default)]
    pub afternoon_activities: Vec<Activity>,
    #[serde(default)]
    pub evening_activities: Vec<Activity>,
    /// Estimated spend for the day
    pub daily_budget: f64,
}

completion_schema!(DayPlan, "DayPlan");

impl DayPlan {
    /// Morning, afternoon, then evening activities.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.morning_activities
            .iter()
            .chain(&self.afternoon_activities)
            .chain(&self.evening_activities)
    }

    pub fn activity_count(&self) -> usize {
        self.morning_activities.len()
            + self.afternoon_activities.len()
            + self.evening_activities.len()
    }

    /// Sum of the activity cost estimates. `daily_budget` is only expected to approximate this.
    pub fn activity_cost(&self) -> f64 {
        self.activities().map(|activity| activity.cost_estimate).sum()
    }
}

/// A complete day-by-day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    pub trip_profile: TripProfile,
    pub days: Vec<DayPlan>,
    pub total_estimated_cost: f64,
    pub generated_at: DateTime<Utc>,
    pub summary: String,
}

impl Itinerary {
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(DayPlan::activity_count).sum()
    }

    pub fn day(&self, index: usize) -> Option<&DayPlan> {
        self.days.get(index)
    }

    /// Sum of the daily budgets.
    pub fn recompute_total(&self) -> f64 {
        self.days.iter().map(|day| day.daily_budget).sum()
    }

    /// Copy with one day swapped out, the total recomputed and the timestamp refreshed.
    pub fn with_day_replaced(&self, index: usize, day: DayPlan) -> Result<Itinerary> {
        if index >= self.days.len() {
            return Err(AgentError::InvalidRequest(format!(
                "day index {} is out of range for a {}-day itinerary",
                index,
                self.days.len()
            )));
        }

        let mut updated = self.clone();
        updated.days[index] = day;
        updated.total_estimated_cost = updated.recompute_total();
        updated.generated_at = Utc::now();
        Ok(updated)
    }
}
