/// Terminal create flow with optional AI assist, against in-memory services.
mod support;

use bugdash::ai::SuggestionService;
use bugdash::cli::suggest_and_submit;
use bugdash::model::{Priority, UserType};
use bugdash::views::create::CreateView;
use bugdash::views::{BugForm, Navigation};

use support::{FakeAi, FakeBugs, server_error};

fn filled_view() -> CreateView {
    CreateView::with_form(
        BugForm {
            title: "Checkout hangs".into(),
            description: "Spinner never stops".into(),
            ..BugForm::default()
        },
        UserType::Business,
    )
}

#[test]
fn ai_failure_still_creates_the_bug() {
    let bugs = FakeBugs::default();
    let ai = FakeAi::failing(server_error("AI service is down"));
    let mut view = filled_view();

    let nav = suggest_and_submit(&mut view, &bugs, Some(&ai as &dyn SuggestionService), None);

    assert!(matches!(nav, Navigation::To(_)));
    assert_eq!(ai.request_count(), 1);
    let created = &bugs.bugs.borrow()[0];
    assert_eq!(created.title, "Checkout hangs");
    assert_eq!(created.priority, Priority::Medium);
}

#[test]
fn prediction_is_applied_unless_priority_is_explicit() {
    let ai = FakeAi::answering("Resolutions: restart", Priority::Critical);

    let bugs = FakeBugs::default();
    let mut view = filled_view();
    suggest_and_submit(&mut view, &bugs, Some(&ai as &dyn SuggestionService), None);
    assert_eq!(bugs.bugs.borrow()[0].priority, Priority::Critical);

    let bugs = FakeBugs::default();
    let mut view = filled_view();
    suggest_and_submit(
        &mut view,
        &bugs,
        Some(&ai as &dyn SuggestionService),
        Some(Priority::Low),
    );
    assert_eq!(bugs.bugs.borrow()[0].priority, Priority::Low);
}

#[test]
fn without_ai_the_form_is_submitted_as_is() {
    let bugs = FakeBugs::default();
    let mut view = filled_view();
    let nav = suggest_and_submit(&mut view, &bugs, None, None);
    assert!(matches!(nav, Navigation::To(_)));
    assert_eq!(bugs.calls(), ["POST /bugs"]);
}
