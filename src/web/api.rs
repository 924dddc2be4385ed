//! JSON endpoints.

use serde::Serialize;

use super::{App, Page};
use crate::health::HealthReport;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(flatten)]
    report: HealthReport,
}

/// `GET /api/health`: 200 when both services answer, 503 otherwise.
pub(super) fn get_health(app: &App<'_>) -> Page {
    let report = HealthReport::collect(&app.api_url, &app.ai_url, app.bugs, app.ai);
    let (code, status) = if report.is_ok() {
        (200, "ok")
    } else {
        (503, "degraded")
    };
    json_response(code, &HealthResponse { status, report })
}

fn json_response<T: Serialize>(code: u16, data: &T) -> Page {
    match serde_json::to_string(data) {
        Ok(body) => Page::json(code, body),
        Err(e) => Page::json(500, serde_json::json!({ "error": e.to_string() }).to_string()),
    }
}
