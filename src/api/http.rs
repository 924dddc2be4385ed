//! Thin `ureq` wrapper shared by the bug-service and AI clients.
//!
//! Every call is logged to the request log and classified into a
//! [`Reply`] (2xx) or a [`Failure`] (transport error or non-2xx status).
//! Turning a failure into a user-facing message is left to each client,
//! since the two services phrase their errors differently.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::logging::{RequestLog, RequestLogEntry, Service};

/// A 2xx response with its body read to a string.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

/// Why a request did not produce a 2xx response.
#[derive(Debug, Clone)]
pub enum Failure {
    /// No HTTP response at all (DNS, refused connection, timeout, ...).
    Transport(String),
    /// The server answered with a non-2xx status.
    Status { status: u16, body: String },
}

/// Synchronous JSON-over-HTTP client bound to one base URL.
#[derive(Debug)]
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
    service: Service,
    log: RequestLog,
}

impl HttpClient {
    /// Build a client. A `timeout_ms` of zero means no timeout.
    pub fn new(base_url: &str, timeout_ms: u64, service: Service, log: RequestLog) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        Self {
            agent: builder.build(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service,
            log,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, path: &str) -> Result<Reply, Failure> {
        self.send("GET", path, None::<&()>)
    }

    pub fn delete(&self, path: &str) -> Result<Reply, Failure> {
        self.send("DELETE", path, None::<&()>)
    }

    pub fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Reply, Failure> {
        self.send("POST", path, Some(body))
    }

    pub fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Reply, Failure> {
        self.send("PUT", path, Some(body))
    }

    fn send<B: Serialize>(
        &self,
        method: &str,
        path: &str,
        body: Option<&B>,
    ) -> Result<Reply, Failure> {
        let url = format!("{}{}", self.base_url, path);
        // "localhost" may resolve to ::1 first while local services bind IPv4 only.
        let url = url.replace("://localhost", "://127.0.0.1");

        let request = self
            .agent
            .request(method, &url)
            .set("Accept", "application/json");

        let start = Instant::now();
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        let latency_ms = start.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(resp) => {
                let status = resp.status();
                match resp.into_string() {
                    Ok(body) => Ok(Reply { status, body }),
                    Err(e) => Err(Failure::Transport(format!("failed to read response: {e}"))),
                }
            }
            Err(ureq::Error::Status(status, resp)) => Err(Failure::Status {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(t)) => Err(Failure::Transport(t.to_string())),
        };

        let status = match &outcome {
            Ok(reply) => Some(reply.status),
            Err(Failure::Status { status, .. }) => Some(*status),
            Err(Failure::Transport(_)) => None,
        };
        self.log.record(&RequestLogEntry::new(
            self.service,
            method,
            path,
            status,
            latency_ms,
        ));

        outcome
    }
}

/// Pull a non-blank string field out of a JSON error body.
pub fn json_field(body: &str, field: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get(field)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
