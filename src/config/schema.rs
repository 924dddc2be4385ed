/// Configuration schema and defaults for bugdash.
///
/// Defines the TOML-serializable configuration structure with three
/// sections: `[service]`, `[web]` and `[logging]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use serde::{Deserialize, Serialize};

/// Default bug-service origin.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default AI-service base (the `suggest` route lives below it).
pub const DEFAULT_AI_URL: &str = "http://localhost:5001/ai";

/// Default listen address for `bugdash serve`.
pub const DEFAULT_WEB_ADDR: &str = "127.0.0.1:9750";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level bugdash configuration.
///
/// Maps directly to the `~/.bugdash/config.toml` and `.bugdash.toml` file
/// schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BugdashConfig {
    pub service: ServiceConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [service]
// ---------------------------------------------------------------------------

/// Endpoints of the two external services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Bug-service base URL (`/bugs` and `/employees` live below it).
    pub api_url: String,
    /// AI-service base URL. A bare path such as `/ai` is resolved against
    /// the origin of `api_url`.
    pub ai_url: String,
    /// Request timeout in milliseconds. `0` disables the timeout.
    pub timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            ai_url: DEFAULT_AI_URL.to_string(),
            timeout_ms: 0,
        }
    }
}

impl ServiceConfig {
    /// Bug-service base URL without a trailing slash.
    pub fn api_base(&self) -> String {
        self.api_url.trim_end_matches('/').to_string()
    }

    /// Absolute AI-service base URL without a trailing slash.
    pub fn ai_base(&self) -> String {
        resolve_against(&self.api_url, &self.ai_url)
            .trim_end_matches('/')
            .to_string()
    }
}

/// Resolve `target` against the origin of `base` when `target` is a bare
/// path. Absolute URLs and unparseable bases are returned unchanged.
fn resolve_against(base: &str, target: &str) -> String {
    if !target.starts_with('/') {
        return target.to_string();
    }
    match url::Url::parse(base).and_then(|b| b.join(target)) {
        Ok(joined) => joined.to_string(),
        Err(_) => target.to_string(),
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Settings for the served dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address (`host:port`).
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_WEB_ADDR.to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Request-log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append every outbound service call to `~/.bugdash/request-log.jsonl`.
    pub request_log: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { request_log: true }
    }
}

// ---------------------------------------------------------------------------
// Default annotated file
// ---------------------------------------------------------------------------

impl BugdashConfig {
    /// The annotated file written by `bugdash config init`.
    pub fn default_toml() -> String {
        r#"# bugdash configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (BUGDASH_*)
#   2. Project config (.bugdash.toml in current directory)
#   3. User global config (~/.bugdash/config.toml)
#   4. Built-in defaults

[service]
api_url = "http://localhost:8080"     # bug service (GET /bugs, GET /employees, ...)
ai_url = "http://localhost:5001/ai"   # AI service; a bare path like "/ai" uses the api_url origin
timeout_ms = 0                        # 0 = no timeout

[web]
addr = "127.0.0.1:9750"
open_browser = true

[logging]
request_log = true                    # ~/.bugdash/request-log.jsonl
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
