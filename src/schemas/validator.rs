use serde_json::Value;
use tracing::debug;

use super::validation::validate_structured_payload;
use super::CompletionSchema;
use crate::services::decoder::DecodeError;

/// How strictly decoded responses are checked before being accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validator {
    /// Typed deserialization only; the first mismatch is reported with its JSON path.
    #[default]
    SerdeFirst,
    /// Validate against the derived JSON Schema first (ranges, enums,
    /// required fields), then deserialize.
    Strict,
}

impl Validator {
    /// Turn a parsed JSON value into `T`, or fail without producing anything.
    pub fn validate<T: CompletionSchema>(&self, value: Value) -> Result<T, DecodeError> {
        let schema = T::schema();

        if *self == Validator::Strict {
            validate_structured_payload(schema, &value).map_err(|detail| {
                debug!(
                    target: "tripagent::decode",
                    schema = schema.schema_name(),
                    error = %detail,
                    payload = %value
                );
                DecodeError::Schema {
                    schema: schema.schema_name(),
                    detail,
                }
            })?;
        }

        serde_path_to_error::deserialize(value).map_err(|err| {
            let path = err.path().to_string();
            let location = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            DecodeError::Shape {
                schema: schema.schema_name(),
                path: location,
                detail: err.into_inner().to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Activity;
    use serde_json::json;

    fn zero_length_activity() -> Value {
        json!([{
            "id": "a1",
            "name": "Blink",
            "category": "rest",
            "duration": 0,
            "costEstimate": 0,
            "timeOfDay": "evening"
        }])
    }

    #[test]
    fn test_serde_first_accepts_what_types_allow() {
        let activities: Vec<Activity> = Validator::SerdeFirst
            .validate(zero_length_activity())
            .unwrap();
        assert_eq!(activities[0].duration_minutes, 0);
    }

    #[test]
    fn test_strict_enforces_ranges() {
        let err = Validator::Strict
            .validate::<Vec<Activity>>(zero_length_activity())
            .unwrap_err();
        assert!(matches!(err, DecodeError::Schema { schema: "ActivityList", .. }));
    }

    #[test]
    fn test_shape_error_reports_path() {
        let payload = json!([{
            "id": "a1",
            "name": "x",
            "category": "spa",
            "duration": 5,
            "costEstimate": 1,
            "timeOfDay": "morning"
        }]);
        let err = Validator::SerdeFirst
            .validate::<Vec<Activity>>(payload)
            .unwrap_err();
        match err {
            DecodeError::Shape { path, .. } => assert_eq!(path, "[0].category"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
