//! One function per route: decode the request, drive a view, render it.

use super::form::{FormData, with_notice};
use super::{App, Page, render};
use crate::model::BugId;
use crate::views::create::CreateView;
use crate::views::dashboard::DashboardView;
use crate::views::detail::DetailView;
use crate::views::edit::EditView;
use crate::views::list::ListView;
use crate::views::{ListQuery, Navigation, Notice, Route};

/// `GET` for any page route.
pub(super) fn page(app: &App<'_>, route: Route, notice: Option<Notice>) -> Page {
    match route {
        Route::Dashboard => dashboard(app, notice),
        Route::List(seed) => list(app, seed, notice),
        Route::Create => create_form(app, notice),
        Route::Edit(id) => edit_form(app, id, notice),
        Route::Detail(id) => detail(app, id, notice),
    }
}

fn dashboard(app: &App<'_>, notice: Option<Notice>) -> Page {
    let mut view = DashboardView::new();
    view.load(app.bugs);
    if view.notice.is_none() {
        view.notice = notice;
    }
    Page::html(200, render::dashboard(&view))
}

fn list(app: &App<'_>, seed: ListQuery, notice: Option<Notice>) -> Page {
    let mut view = ListView::new(seed);
    view.load(app.bugs);
    view.notice = notice;
    Page::html(200, render::list(&view))
}

fn create_form(app: &App<'_>, notice: Option<Notice>) -> Page {
    let mut view = CreateView::new();
    view.load_employees(app.bugs);
    view.notice = notice;
    Page::html(200, render::create(&view))
}

fn edit_form(app: &App<'_>, id: BugId, notice: Option<Notice>) -> Page {
    let mut view = EditView::new(id);
    view.load(app.bugs);
    if view.is_not_found() {
        return bug_not_found();
    }
    view.notice = notice;
    Page::html(200, render::edit(&view))
}

fn detail(app: &App<'_>, id: BugId, notice: Option<Notice>) -> Page {
    let mut view = DetailView::new(id);
    view.load(app.bugs);
    if view.is_not_found() {
        return bug_not_found();
    }
    view.notice = notice;
    Page::html(200, render::detail(&view))
}

/// Rebuild the create view from a posted form, keeping a carried suggestion
/// only if it was made for the mode now selected.
fn posted_create_view(app: &App<'_>, data: &FormData) -> CreateView {
    let selected = data.user_type();
    let mut view = match data.carried_suggestion() {
        Some((suggestion, mode)) => {
            let mut view = CreateView::with_form(data.bug_form(), mode);
            view.suggestion = Some(suggestion);
            view
        }
        None => CreateView::with_form(data.bug_form(), selected),
    };
    view.set_user_type(selected);
    view.load_employees(app.bugs);
    view
}

/// `POST /create/suggest`
pub(super) fn create_suggest(app: &App<'_>, data: &FormData) -> Page {
    let mut view = posted_create_view(app, data);
    view.request_suggestion(app.ai);
    Page::html(200, render::create(&view))
}

/// `POST /create`
pub(super) fn create_submit(app: &App<'_>, data: &FormData) -> Page {
    let mut view = posted_create_view(app, data);
    match view.submit(app.bugs) {
        Navigation::To(route) => redirect(&route, view.notice.as_ref()),
        Navigation::Stay => Page::html(200, render::create(&view)),
    }
}

/// `POST /edit/{id}`
pub(super) fn edit_submit(app: &App<'_>, id: BugId, data: &FormData) -> Page {
    let mut view = EditView::with_form(id, data.bug_form());
    match view.submit(app.bugs) {
        Navigation::To(route) => redirect(&route, view.notice.as_ref()),
        Navigation::Stay => Page::html(200, render::edit(&view)),
    }
}

/// `POST /bugs/{id}/delete`: renders the list the request came from with the
/// bug removed locally.
pub(super) fn delete(app: &App<'_>, id: BugId, data: &FormData) -> Page {
    let seed = ListQuery::from_query(data.get("return").unwrap_or_default());
    let mut view = ListView::new(seed);
    view.load(app.bugs);
    view.delete(app.bugs, &id);
    Page::html(200, render::list(&view))
}

/// `POST /bugs/{id}/suggest`
pub(super) fn detail_suggest(app: &App<'_>, id: BugId) -> Page {
    let mut view = DetailView::new(id);
    view.load(app.bugs);
    if view.is_not_found() {
        return bug_not_found();
    }
    view.request_suggestion(app.ai);
    Page::html(200, render::detail(&view))
}

fn bug_not_found() -> Page {
    Page::html(
        404,
        render::not_found(
            "Bug not found",
            "The bug you're looking for doesn't exist or has been deleted.",
        ),
    )
}

fn redirect(route: &Route, notice: Option<&Notice>) -> Page {
    let href = route.href();
    match notice {
        Some(notice) => Page::redirect(with_notice(&href, notice)),
        None => Page::redirect(href),
    }
}
