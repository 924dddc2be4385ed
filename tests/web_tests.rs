/// Served routes rendered end to end against in-memory services.
mod support;

use tiny_http::Method;

use bugdash::model::{Priority, Status};
use bugdash::web::{App, Page, handle};

use support::{FakeAi, FakeBugs, assigned, bug, server_error};

fn sample() -> FakeBugs {
    FakeBugs::with(vec![
        bug(1, "Login broken", Status::Open, Priority::High),
        bug(2, "Old typo", Status::Closed, Priority::Low),
        assigned(bug(7, "Payment timeout", Status::Open, Priority::Critical), "Ann"),
    ])
}

fn get(bugs: &FakeBugs, ai: &FakeAi, url: &str) -> Page {
    let app = App::new(bugs, ai, "http://bugs.test", "http://bugs.test/ai");
    handle(&app, &Method::Get, url, None)
}

fn post(bugs: &FakeBugs, ai: &FakeAi, url: &str, body: &str) -> Page {
    let app = App::new(bugs, ai, "http://bugs.test", "http://bugs.test/ai");
    handle(&app, &Method::Post, url, Some(body))
}

fn idle_ai() -> FakeAi {
    FakeAi::answering("unused", Priority::Low)
}

#[test]
fn dashboard_links_counts_to_filtered_lists() {
    let page = get(&sample(), &idle_ai(), "/");
    assert_eq!(page.status, 200);
    assert!(page.content_type.starts_with("text/html"));
    assert!(page.body.contains(r#"href="/bugs?priority=HIGH""#));
    assert!(page.body.contains(r#"href="/bugs?assigned=true""#));
    assert!(
        page.body
            .contains(r#"<div class="value">2</div><div class="label">High Priority</div>"#)
    );
}

#[test]
fn list_applies_query_filters() {
    let page = get(&sample(), &idle_ai(), "/bugs?priority=HIGH");
    assert!(page.body.contains("Login broken"));
    assert!(page.body.contains("Payment timeout"));
    assert!(!page.body.contains("Old typo"));
    assert!(page.body.contains("Showing 2 of 3 bugs"));
}

#[test]
fn list_renders_cards_mode() {
    let page = get(&sample(), &idle_ai(), "/bugs?view=cards");
    assert!(page.body.contains("bug-grid"));
    assert!(!page.body.contains("<table>"));
}

#[test]
fn list_failure_shows_error() {
    let bugs = FakeBugs {
        read_failure: Some(server_error("Failed to load bugs.")),
        ..FakeBugs::default()
    };
    let page = get(&bugs, &idle_ai(), "/bugs");
    assert_eq!(page.status, 200);
    assert!(page.body.contains("Failed to load bugs."));
}

#[test]
fn unknown_bug_renders_not_found() {
    let page = get(&sample(), &idle_ai(), "/bugs/999");
    assert_eq!(page.status, 404);
    assert!(page.body.contains("Bug not found"));
    assert!(page.body.contains("Back to Dashboard"));

    assert_eq!(get(&sample(), &idle_ai(), "/edit/999").status, 404);
}

#[test]
fn unknown_route_is_404() {
    assert_eq!(get(&sample(), &idle_ai(), "/nowhere/at/all").status, 404);
    assert_eq!(post(&sample(), &idle_ai(), "/bugs", "").status, 404);
}

#[test]
fn stylesheet_is_served() {
    let page = get(&sample(), &idle_ai(), "/style.css");
    assert_eq!(page.status, 200);
    assert!(page.content_type.starts_with("text/css"));
    assert!(page.body.contains(".stat-card"));
}

#[test]
fn create_with_empty_title_stays_on_form() {
    let bugs = FakeBugs::default();
    let page = post(&bugs, &idle_ai(), "/create", "title=&description=x&priority=LOW");
    assert_eq!(page.status, 200);
    assert!(page.body.contains("Title is required"));
    assert!(bugs.calls().iter().all(|c| c != "POST /bugs"));
}

#[test]
fn create_redirects_to_list_with_notice() {
    let bugs = FakeBugs::default();
    let page = post(
        &bugs,
        &idle_ai(),
        "/create",
        "title=Broken+link&description=404+on+footer&status=OPEN&priority=LOW&assignedTo=",
    );
    assert_eq!(page.status, 303);
    assert_eq!(page.location.as_deref(), Some("/bugs?notice=Bug+created&level=success"));
    assert_eq!(bugs.bugs.borrow()[0].title, "Broken link");
}

#[test]
fn notice_from_redirect_is_rendered() {
    let page = get(&sample(), &idle_ai(), "/bugs?notice=Bug+created&level=success");
    assert!(page.body.contains(r#"<div class="notice success" role="status">Bug created</div>"#));
}

#[test]
fn create_suggest_applies_priority_and_sections() {
    let ai = FakeAi::answering(
        "Possible Causes:\nMemory leak\nResolutions:\nRestart service",
        Priority::Critical,
    );
    let page = post(
        &FakeBugs::default(),
        &ai,
        "/create/suggest",
        "title=Slow&description=Pages+hang&priority=LOW&userType=developer",
    );
    assert_eq!(page.status, 200);
    assert!(page.body.contains("<h3>Possible Causes</h3>"));
    assert!(page.body.contains("<h3>Resolutions</h3>"));
    assert!(!page.body.contains("<h3>Business Impact</h3>"));
    assert!(page.body.contains(r#"<option value="CRITICAL" selected>"#));
    assert!(page.body.contains(r#"name="ai_mode" value="developer""#));
}

#[test]
fn carried_suggestion_is_dropped_when_mode_changes() {
    let carried = "title=Slow&description=&priority=HIGH&ai_suggestion=Resolutions%3A+restart\
                   &ai_priority=HIGH&ai_mode=developer";

    let same = post(
        &FakeBugs::default(),
        &idle_ai(),
        "/create",
        &format!("{carried}&userType=developer"),
    );
    assert!(same.body.contains("id=\"ai-panel\""));

    let switched = post(
        &FakeBugs::default(),
        &idle_ai(),
        "/create",
        &format!("{carried}&userType=business"),
    );
    assert!(!switched.body.contains("id=\"ai-panel\""));
    assert!(switched.body.contains("Description is required"));
}

#[test]
fn delete_renders_list_without_the_bug() {
    let bugs = sample();
    let page = post(&bugs, &idle_ai(), "/bugs/7/delete", "return=status%3DOPEN");
    assert_eq!(page.status, 200);
    assert!(page.body.contains("Bug deleted"));
    assert!(!page.body.contains("Payment timeout"));
    assert!(page.body.contains("Login broken"));
    assert_eq!(bugs.calls(), ["GET /bugs", "DELETE /bugs/7"]);
}

#[test]
fn encoded_query_in_id_does_not_reach_another_bug() {
    let bugs = sample();
    let page = post(&bugs, &idle_ai(), "/bugs/7%3Fx/delete", "");
    assert_eq!(page.status, 200);
    assert_eq!(bugs.calls(), ["GET /bugs", "DELETE /bugs/7?x"]);
    assert!(page.body.contains("Payment timeout"));
}

#[test]
fn edit_redirects_to_detail() {
    let bugs = sample();
    let page = post(
        &bugs,
        &idle_ai(),
        "/edit/2",
        "title=Old+typo&description=fixed&status=RESOLVED&priority=LOW&assignedTo=Bo",
    );
    assert_eq!(page.status, 303);
    assert_eq!(
        page.location.as_deref(),
        Some("/bugs/2?notice=Bug+updated&level=success")
    );
    assert_eq!(bugs.calls(), ["PUT /bugs/2"]);
}

#[test]
fn detail_suggest_shows_comparison() {
    let ai = FakeAi::answering("Business Impact: Customers cannot pay", Priority::Critical);
    let bugs = sample();
    let page = post(&bugs, &ai, "/bugs/1/suggest", "");
    assert_eq!(page.status, 200);
    assert!(page.body.contains("suggests raising the priority"));
    assert!(page.body.contains("Customers cannot pay"));
    assert_eq!(bugs.find(&"1".into()).unwrap().priority, Priority::High);
}

#[test]
fn detail_ai_connection_error_is_shown() {
    let ai = FakeAi::failing(bugdash::api::ApiError::Connection {
        message: "Cannot connect to AI service at http://bugs.test/ai".into(),
    });
    let page = post(&sample(), &ai, "/bugs/1/suggest", "");
    assert!(page.body.contains("Cannot connect to AI service at http://bugs.test/ai"));
}

#[test]
fn user_text_is_escaped() {
    let bugs = FakeBugs::with(vec![bug(
        5,
        "<script>alert(1)</script>",
        Status::Open,
        Priority::Low,
    )]);
    let page = get(&bugs, &idle_ai(), "/bugs");
    assert!(!page.body.contains("<script>alert(1)</script>"));
    assert!(page.body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn health_endpoint_reports_services() {
    let page = get(&sample(), &idle_ai(), "/api/health");
    assert_eq!(page.status, 200);
    let json: serde_json::Value = serde_json::from_str(&page.body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["bug_service"], true);

    let down = FakeAi::failing(server_error("down"));
    assert_eq!(get(&sample(), &down, "/api/health").status, 503);
}
