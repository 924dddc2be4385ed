//! Client for the external bug-persistence service.
//!
//! The service exposes plain REST over JSON:
//!
//! | Call                 | Result          |
//! |----------------------|-----------------|
//! | `GET /bugs`          | `[Bug]`         |
//! | `GET /bugs/{id}`     | `Bug`           |
//! | `POST /bugs`         | created `Bug`   |
//! | `PUT /bugs/{id}`     | updated `Bug`   |
//! | `DELETE /bugs/{id}`  | no content      |
//! | `GET /employees`     | `[Employee]`    |
//!
//! No retries, no auth header. Views talk to the service through the
//! [`BugService`] trait so their flows can be exercised without a network.

mod error;
pub mod http;

use serde::de::DeserializeOwned;

pub use error::ApiError;

use crate::config::BugdashConfig;
use crate::logging::{RequestLog, Service};
use crate::model::{Bug, BugId, BugUpdate, Employee, NewBug};
use http::{Failure, HttpClient, Reply, json_field};

/// Operations the views need from the bug service.
pub trait BugService {
    fn list_bugs(&self) -> Result<Vec<Bug>, ApiError>;
    fn get_bug(&self, id: &BugId) -> Result<Bug, ApiError>;
    fn create_bug(&self, bug: &NewBug) -> Result<Bug, ApiError>;
    fn update_bug(&self, id: &BugId, update: &BugUpdate) -> Result<Bug, ApiError>;
    fn delete_bug(&self, id: &BugId) -> Result<(), ApiError>;
    fn list_employees(&self) -> Result<Vec<Employee>, ApiError>;
    /// Whether the service answers at all.
    fn is_healthy(&self) -> bool;
}

/// HTTP implementation of [`BugService`].
#[derive(Debug)]
pub struct BugClient {
    http: HttpClient,
}

impl BugClient {
    /// Client for `base_url` with no timeout and no request log.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(base_url, 0, Service::Bugs, RequestLog::Disabled),
        }
    }

    /// Build a client from the resolved config.
    pub fn from_config(config: &BugdashConfig) -> Self {
        Self {
            http: HttpClient::new(
                &config.service.api_base(),
                config.service.timeout_ms,
                Service::Bugs,
                RequestLog::from_flag(config.logging.request_log),
            ),
        }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    fn error(&self, failure: Failure, fallback: &str) -> ApiError {
        match failure {
            Failure::Transport(_) => ApiError::Connection {
                message: format!("Cannot connect to bug service at {}", self.base_url()),
            },
            Failure::Status { status, body } => ApiError::Status {
                status,
                message: json_field(&body, "message").unwrap_or_else(|| fallback.to_string()),
            },
        }
    }

    fn call<T: DeserializeOwned>(
        &self,
        result: Result<Reply, Failure>,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let reply = result.map_err(|f| self.error(f, fallback))?;
        parse_body(&reply.body)
    }
}

/// Decode a JSON body, treating an empty body as JSON `null`.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(invalid_response)
}

fn invalid_response(err: serde_json::Error) -> ApiError {
    ApiError::InvalidResponse(format!("Invalid response from bug service: {err}"))
}

fn bug_path(id: &BugId) -> String {
    format!("/bugs/{}", id.path_segment())
}

impl BugService for BugClient {
    fn list_bugs(&self) -> Result<Vec<Bug>, ApiError> {
        // A non-array body is treated as an empty collection.
        let value: serde_json::Value = self.call(self.http.get("/bugs"), "Failed to load bugs.")?;
        if !value.is_array() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(invalid_response)
    }

    fn get_bug(&self, id: &BugId) -> Result<Bug, ApiError> {
        self.call(self.http.get(&bug_path(id)), "Failed to load bug")
    }

    fn create_bug(&self, bug: &NewBug) -> Result<Bug, ApiError> {
        self.call(self.http.post("/bugs", bug), "Failed to create bug")
    }

    fn update_bug(&self, id: &BugId, update: &BugUpdate) -> Result<Bug, ApiError> {
        self.call(self.http.put(&bug_path(id), update), "Failed to update bug")
    }

    fn delete_bug(&self, id: &BugId) -> Result<(), ApiError> {
        self.http
            .delete(&bug_path(id))
            .map(|_| ())
            .map_err(|f| self.error(f, "Failed to delete bug"))
    }

    fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let value: serde_json::Value =
            self.call(self.http.get("/employees"), "Failed to load employees")?;
        if !value.is_array() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(invalid_response)
    }

    fn is_healthy(&self) -> bool {
        self.http.get("/bugs").is_ok()
    }
}
