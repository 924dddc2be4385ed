//! Reachability and local-state summary shared by `bugdash health` and
//! `GET /api/health`.

use serde::Serialize;

use crate::ai::SuggestionService;
use crate::api::BugService;
use crate::config;
use crate::logging;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub api_url: String,
    pub ai_url: String,
    pub bug_service: bool,
    pub ai_service: bool,
    pub global_config: bool,
    pub project_config: bool,
    /// Entry count of the request log, `None` when there is no log file.
    pub request_log_entries: Option<usize>,
}

impl HealthReport {
    /// Check both services and inspect the local files.
    pub fn collect(
        api_url: &str,
        ai_url: &str,
        bugs: &dyn BugService,
        ai: &dyn SuggestionService,
    ) -> Self {
        let request_log_entries = logging::request_log_path()
            .filter(|p| p.exists())
            .map(|p| logging::read_entries(&p).len());

        Self {
            api_url: api_url.to_string(),
            ai_url: ai_url.to_string(),
            bug_service: bugs.is_healthy(),
            ai_service: ai.is_healthy(),
            global_config: exists(config::global_config_file()),
            project_config: exists(config::project_config_file()),
            request_log_entries,
        }
    }

    /// Healthy when both services answer. Missing files are fine.
    pub fn is_ok(&self) -> bool {
        self.bug_service && self.ai_service
    }
}

fn exists(path: Option<std::path::PathBuf>) -> bool {
    path.is_some_and(|p| p.exists())
}
