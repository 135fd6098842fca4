use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::schemas::{CompletionSchema, Validator};

const FENCE: &str = "```";

/// Why a generated response could not be turned into the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response does not match `{schema}` schema: {detail}")]
    Schema { schema: &'static str, detail: String },

    #[error("failed to deserialize `{schema}` at {path}: {detail}")]
    Shape {
        schema: &'static str,
        path: String,
        detail: String,
    },
}

/// Remove surrounding whitespace and an optional fenced-block wrapper
/// (opening fence with an optional language tag, closing fence).
pub fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let (first_line, rest) = after_open.split_once('\n').unwrap_or((after_open, ""));
    let body = if first_line.trim().chars().all(is_tag_char) {
        rest
    } else {
        // opening fence and content on the same line
        after_open.trim_start_matches(is_tag_char)
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '+'
}

/// Strip fences, parse JSON and convert into `T`.
///
/// Either returns a fully valid value or an error; never a partial object.
pub fn decode_response<T: CompletionSchema>(
    raw: &str,
    validator: Validator,
) -> Result<T, DecodeError> {
    let cleaned = strip_fences(raw);
    debug!(
        target: "tripagent::decode",
        schema = T::schema().schema_name(),
        bytes = cleaned.len(),
        "decoding response"
    );

    let value: Value = serde_json::from_str(cleaned)?;
    validator.validate(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample::sample_itinerary;
    use crate::types::{Activity, DayPlan, ItineraryDraft, TripProfile};

    fn fence(body: &str, tag: &str) -> String {
        format!("```{tag}\n{body}\n```")
    }

    #[test]
    fn test_strip_fences_variants() {
        assert_eq!(strip_fences("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fences("```\n[1, 2]\n```\n"), "[1, 2]");
        assert_eq!(strip_fences("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_fences("```json {\"a\":1}```"), "{\"a\":1}");
        // no closing fence
        assert_eq!(strip_fences("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_decode_inverts_fence_wrapping() {
        let itinerary = sample_itinerary();

        let profile_json = serde_json::to_string_pretty(&itinerary.trip_profile).unwrap();
        let profile: TripProfile =
            decode_response(&fence(&profile_json, "json"), Validator::SerdeFirst).unwrap();
        assert_eq!(profile, itinerary.trip_profile);

        let day_json = serde_json::to_string(&itinerary.days[0]).unwrap();
        let day: DayPlan = decode_response(&fence(&day_json, ""), Validator::Strict).unwrap();
        assert_eq!(day, itinerary.days[0]);

        let activities: Vec<Activity> = itinerary.days[1].activities().cloned().collect();
        let list_json = serde_json::to_string(&activities).unwrap();
        let decoded: Vec<Activity> =
            decode_response(&fence(&list_json, "json"), Validator::Strict).unwrap();
        assert_eq!(decoded, activities);

        let draft = ItineraryDraft {
            days: itinerary.days.clone(),
            total_estimated_cost: itinerary.total_estimated_cost,
            summary: itinerary.summary.clone(),
        };
        let draft_json = serde_json::to_string(&draft).unwrap();
        let decoded: ItineraryDraft = decode_response(&draft_json, Validator::Strict).unwrap();
        assert_eq!(decoded, draft);
    }

    #[test]
    fn test_truncated_json_is_rejected() {
        let day_json = serde_json::to_string(&sample_itinerary().days[0]).unwrap();
        let truncated = &day_json[..day_json.len() / 2];

        let err = decode_response::<DayPlan>(truncated, Validator::SerdeFirst).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));

        let err = decode_response::<DayPlan>(&fence(truncated, "json"), Validator::Strict)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_prose_is_rejected() {
        let err = decode_response::<ItineraryDraft>(
            "Sure! Here is your itinerary: day one...",
            Validator::SerdeFirst,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("response is not valid JSON"));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let err = decode_response::<Vec<Activity>>("{\"days\": []}", Validator::SerdeFirst)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Shape { .. }));
    }
}
