//! Client for the external AI suggestion service.
//!
//! The service analyses a bug's title and description and answers with a
//! free-text suggestion plus a predicted priority:
//!
//! ```text
//! POST {ai-base}/suggest
//!   {"title": "...", "description": "...", "userType": "business", "resolution": "..."}
//! → {"suggestion": "...", "predictedPriority": "HIGH"}
//! ```
//!
//! Every failure mode (no connection, non-2xx, malformed body) comes back as
//! a single [`ApiError`] whose message is ready for display. The free text is
//! split into labelled parts by [`sections`].

pub mod sections;

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::api::http::{Failure, HttpClient, json_field};
use crate::config::BugdashConfig;
use crate::logging::{RequestLog, Service};
use crate::model::{AiSuggestion, Priority, UserType};

const GENERIC_FAILURE: &str = "Failed to get AI suggestion";
const INVALID_RESPONSE: &str = "Invalid response from AI service";

/// Body of `POST {ai-base}/suggest`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub title: String,
    pub description: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

/// What the views need from the AI service.
pub trait SuggestionService {
    fn suggest(&self, request: &SuggestRequest) -> Result<AiSuggestion, ApiError>;
    /// Whether the service answers at all.
    fn is_healthy(&self) -> bool;
}

/// Raw response, validated into an [`AiSuggestion`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestResponse {
    suggestion: Option<String>,
    predicted_priority: Option<String>,
}

impl SuggestResponse {
    fn validate(self) -> Result<AiSuggestion, ApiError> {
        let suggestion = self
            .suggestion
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidResponse(INVALID_RESPONSE.to_string()))?;
        let predicted_priority = self
            .predicted_priority
            .as_deref()
            .and_then(|p| p.parse::<Priority>().ok())
            .ok_or_else(|| ApiError::InvalidResponse(INVALID_RESPONSE.to_string()))?;
        Ok(AiSuggestion {
            suggestion,
            predicted_priority,
        })
    }
}

/// HTTP implementation of [`SuggestionService`].
#[derive(Debug)]
pub struct AiClient {
    http: HttpClient,
    timeout_ms: u64,
}

impl AiClient {
    /// Client for `base_url` with no timeout and no request log.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(base_url, 0, Service::Ai, RequestLog::Disabled),
            timeout_ms: 0,
        }
    }

    /// Build a client from the resolved config.
    pub fn from_config(config: &BugdashConfig) -> Self {
        Self {
            http: HttpClient::new(
                &config.service.ai_base(),
                config.service.timeout_ms,
                Service::Ai,
                RequestLog::from_flag(config.logging.request_log),
            ),
            timeout_ms: config.service.timeout_ms,
        }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    fn error(&self, failure: Failure) -> ApiError {
        match failure {
            Failure::Transport(_) => ApiError::Connection {
                message: format!("Cannot connect to AI service at {}", self.base_url()),
            },
            Failure::Status { status: 503, .. } => ApiError::Status {
                status: 503,
                message: format!(
                    "AI service is unavailable. Make sure it's running at {}.",
                    self.base_url()
                ),
            },
            Failure::Status { status, body } => ApiError::Status {
                status,
                message: error_message(&body),
            },
        }
    }
}

impl SuggestionService for AiClient {
    fn suggest(&self, request: &SuggestRequest) -> Result<AiSuggestion, ApiError> {
        let reply = self
            .http
            .post("/suggest", request)
            .map_err(|f| self.error(f))?;
        let parsed: SuggestResponse = serde_json::from_str(&reply.body)
            .map_err(|_| ApiError::InvalidResponse(INVALID_RESPONSE.to_string()))?;
        parsed.validate()
    }

    /// Checks `GET {origin}/health`.
    fn is_healthy(&self) -> bool {
        let Some(origin) = origin_of(self.base_url()) else {
            return false;
        };
        HttpClient::new(&origin, self.timeout_ms, Service::Ai, RequestLog::Disabled)
            .get("/health")
            .is_ok()
    }
}

/// Message for a non-2xx body: JSON `detail`, then JSON `message`, then the
/// plain-text body, then a generic fallback.
fn error_message(body: &str) -> String {
    if let Some(detail) = json_field(body, "detail") {
        return detail;
    }
    if let Some(message) = json_field(body, "message") {
        return message;
    }
    let text = body.trim();
    if !text.is_empty() && serde_json::from_str::<serde_json::Value>(text).is_err() {
        return text.to_string();
    }
    GENERIC_FAILURE.to_string()
}

/// `scheme://host[:port]` of a URL.
fn origin_of(base: &str) -> Option<String> {
    let url = url::Url::parse(base).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> Result<AiSuggestion, ApiError> {
        serde_json::from_str::<SuggestResponse>(json).unwrap().validate()
    }

    #[test]
    fn valid_response_is_accepted() {
        let s = response(r#"{"suggestion": "Check the handler", "predictedPriority": "high"}"#)
            .unwrap();
        assert_eq!(s.predicted_priority, Priority::High);
        assert_eq!(s.suggestion, "Check the handler");
    }

    #[test]
    fn missing_fields_are_rejected() {
        for json in [
            r#"{"predictedPriority": "HIGH"}"#,
            r#"{"suggestion": "x"}"#,
            r#"{"suggestion": "  ", "predictedPriority": "LOW"}"#,
            r#"{"suggestion": "x", "predictedPriority": "URGENT"}"#,
        ] {
            let err = response(json).unwrap_err();
            assert_eq!(err.message(), "Invalid response from AI service", "{json}");
        }
    }

    #[test]
    fn request_omits_absent_resolution() {
        let req = SuggestRequest {
            title: "t".into(),
            description: "d".into(),
            user_type: UserType::Developer,
            resolution: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["userType"], "developer");
        assert!(json.get("resolution").is_none());
    }

    #[test]
    fn error_message_precedence() {
        assert_eq!(
            error_message(r#"{"detail": "OPENAI_API_KEY is not set", "message": "m"}"#),
            "OPENAI_API_KEY is not set"
        );
        assert_eq!(error_message(r#"{"message": "m"}"#), "m");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"detail": [{"loc": "title"}]}"#), GENERIC_FAILURE);
        assert_eq!(error_message(""), GENERIC_FAILURE);
    }

    #[test]
    fn unavailable_and_unreachable_messages_differ() {
        let client = AiClient::new("http://localhost:5001/ai");
        let down = client.error(Failure::Transport("refused".into()));
        let unavailable = client.error(Failure::Status {
            status: 503,
            body: String::new(),
        });
        assert!(down.is_connection());
        assert_eq!(down.message(), "Cannot connect to AI service at http://localhost:5001/ai");
        assert!(!unavailable.is_connection());
        assert!(unavailable.message().starts_with("AI service is unavailable"));
    }

    #[test]
    fn origin_strips_path() {
        assert_eq!(
            origin_of("http://localhost:5001/ai").as_deref(),
            Some("http://localhost:5001")
        );
        assert_eq!(origin_of("not a url"), None);
    }
}
