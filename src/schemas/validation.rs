use crate::schemas::SchemaHandle;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a decoded payload against a schema, returning a short
/// description of the first few violations on failure.
pub(crate) fn validate_structured_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> std::result::Result<(), String> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| format!("failed to prepare schema for validation: {}", err))?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(detail_str);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::CompletionSchema;
    use crate::types::{Activity, DayPlan};
    use serde_json::json;

    fn activity(duration: i64) -> Value {
        json!({
            "id": "a1",
            "name": "Alfama walk",
            "category": "sight",
            "duration": duration,
            "costEstimate": 0,
            "timeOfDay": "morning"
        })
    }

    #[test]
    fn test_valid_activity_list_passes() {
        let payload = json!([activity(60)]);
        assert!(validate_structured_payload(<Vec<Activity>>::schema(), &payload).is_ok());
    }

    #[test]
    fn test_zero_duration_is_reported_with_path() {
        let payload = json!([activity(0)]);
        let err = validate_structured_payload(<Vec<Activity>>::schema(), &payload).unwrap_err();
        assert!(err.contains("/0/duration"), "unexpected detail: {err}");
    }

    #[test]
    fn test_errors_are_truncated() {
        let payload = json!({
            "dayIndex": "x",
            "date": 5,
            "dailyBudget": "y",
            "morningActivities": 1
        });
        let err = validate_structured_payload(DayPlan::schema(), &payload).unwrap_err();
        assert!(err.ends_with("additional errors truncated"), "unexpected detail: {err}");
    }
}
