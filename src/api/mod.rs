//! Transport-agnostic request handlers.
//!
//! Each handler takes a decoded request, drives the planner and produces
//! either a success body or an [`ApiError`] carrying an HTTP-style status and
//! an [`ErrorResponse`] body. Framing (HTTP, stdin, queues) is left to the
//! caller; [`parse_request`] turns a raw JSON body into a request type.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    core::{planner::TripPlanner, steps::AgentStep},
    error::AgentError,
    types::{Itinerary, TripFormData},
};

pub type PlanTripRequest = TripFormData;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineTripRequest {
    pub itinerary: Itinerary,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateDayRequest {
    pub itinerary: Itinerary,
    /// Signed so that negative indices reach validation instead of failing to parse.
    #[serde(default)]
    pub day_index: Option<i64>,
    #[serde(default)]
    pub constraints: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTripResponse {
    pub success: bool,
    pub itinerary: Itinerary,
    pub agent_steps: Vec<AgentStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub success: bool,
    pub itinerary: Itinerary,
}

/// Failure body. `agentSteps` is only present (and always empty) for plan
/// requests so that no partial progress leaks to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_steps: Option<Vec<AgentStep>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: u16,
    body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            body: ErrorResponse {
                success: false,
                error: message.into(),
                code: "INVALID_REQUEST".to_string(),
                agent_steps: None,
            },
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }

    pub fn into_body(self) -> ErrorResponse {
        self.body
    }

    fn with_empty_steps(mut self) -> Self {
        self.body.agent_steps = Some(Vec::new());
        self
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        let status = match err {
            AgentError::InvalidRequest(_) => 400,
            _ => 500,
        };
        Self {
            status,
            body: ErrorResponse {
                success: false,
                error: err.to_string(),
                code: err.error_code().to_string(),
                agent_steps: None,
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.status, self.body.code, self.body.error)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Decode a JSON request body, reporting the path of the first bad field.
pub fn parse_request<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        ApiError::bad_request(format!("Invalid request body at {}: {}", path, err.inner()))
    })
}

pub async fn handle_plan_trip(
    planner: &TripPlanner,
    request: &PlanTripRequest,
) -> ApiResult<PlanTripResponse> {
    info!(target: "tripagent::api", route = "plan-trip", "request received");

    let result = planner.plan(request).await.map_err(|err| {
        warn!(target: "tripagent::api", route = "plan-trip", error = %err, "request failed");
        ApiError::from(err).with_empty_steps()
    })?;

    Ok(PlanTripResponse {
        success: true,
        itinerary: result.itinerary,
        agent_steps: result.agent_steps,
    })
}

pub async fn handle_refine_trip(
    planner: &TripPlanner,
    request: &RefineTripRequest,
) -> ApiResult<ItineraryResponse> {
    info!(target: "tripagent::api", route = "refine-trip", "request received");

    if request.feedback.trim().is_empty() {
        return Err(ApiError::bad_request("Missing itinerary or feedback"));
    }

    let itinerary = planner
        .refine(&request.itinerary, &request.feedback)
        .await
        .map_err(|err| {
            warn!(target: "tripagent::api", route = "refine-trip", error = %err, "request failed");
            ApiError::from(err)
        })?;

    Ok(ItineraryResponse {
        success: true,
        itinerary,
    })
}

/// Regenerate one day and splice it back: the total is recomputed from the
/// daily budgets and the timestamp refreshed.
pub async fn handle_regenerate_day(
    planner: &TripPlanner,
    request: &RegenerateDayRequest,
) -> ApiResult<ItineraryResponse> {
    info!(target: "tripagent::api", route = "regenerate-day", "request received");

    let day_index = request
        .day_index
        .ok_or_else(|| ApiError::bad_request("Missing itinerary or dayIndex"))?;
    let day_index = usize::try_from(day_index)
        .ok()
        .filter(|index| *index < request.itinerary.day_count())
        .ok_or_else(|| ApiError::bad_request("Invalid dayIndex"))?;

    let itinerary = planner
        .regenerate_day(&request.itinerary, day_index, &request.constraints)
        .await
        .and_then(|day| request.itinerary.with_day_replaced(day_index, day))
        .map_err(|err| {
            warn!(
                target: "tripagent::api",
                route = "regenerate-day",
                error = %err,
                "request failed"
            );
            ApiError::from(err)
        })?;

    Ok(ItineraryResponse {
        success: true,
        itinerary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::steps::AgentName;

    #[test]
    fn test_status_mapping() {
        let invalid = ApiError::from(AgentError::InvalidRequest("bad".into()));
        assert_eq!(invalid.status(), 400);
        assert_eq!(invalid.body().code, "INVALID_REQUEST");

        let malformed = ApiError::from(AgentError::malformed(AgentName::Research, "eof"));
        assert_eq!(malformed.status(), 500);
        assert_eq!(malformed.body().code, "MALFORMED_RESPONSE");
        assert!(!malformed.body().success);
    }

    #[test]
    fn test_error_body_omits_steps_unless_plan() {
        let body = serde_json::to_value(ApiError::bad_request("nope").into_body()).unwrap();
        assert!(body.get("agentSteps").is_none());

        let plan_body = ApiError::from(AgentError::Backend("down".into()))
            .with_empty_steps()
            .into_body();
        let value = serde_json::to_value(plan_body).unwrap();
        assert_eq!(value["agentSteps"], serde_json::json!([]));
        assert_eq!(value["success"], serde_json::json!(false));
    }

    #[test]
    fn test_parse_request_reports_path() {
        let err = parse_request::<PlanTripRequest>(r#"{"pace": "sprint"}"#).unwrap_err();
        assert_eq!(err.status(), 400);
        assert!(err.body().error.contains("pace"), "{}", err.body().error);

        let form: PlanTripRequest = parse_request(r#"{"destinations": "Lisbon"}"#).unwrap();
        assert_eq!(form.destination_list(), vec!["Lisbon".to_string()]);
    }
}
