//! Server-side HTML for each view.
//!
//! Every function takes a view's state and returns a complete document.
//! All dynamic text goes through [`esc`].

use std::fmt::Write;

use crate::ai::sections::SuggestionBody;
use crate::model::{Bug, BugId, Priority, Status, UserType, format_date, format_timestamp};
use crate::views::create::CreateView;
use crate::views::dashboard::DashboardView;
use crate::views::detail::DetailView;
use crate::views::edit::EditView;
use crate::views::filter::{PriorityFilter, StatusFilter};
use crate::views::list::ListView;
use crate::views::{BugForm, ListQuery, LoadState, Notice, RenderMode, Route};

/// Top-level navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Dashboard,
    Bugs,
    Create,
    None,
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// HTML-escape text for element content and attribute values.
pub fn esc(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, nav: Nav, notice: Option<&Notice>, content: &str) -> String {
    let link = |target: Nav, href: &str, label: &str| {
        let class = if target == nav { " class=\"active\"" } else { "" };
        format!("<a href=\"{href}\"{class}>{label}</a>")
    };
    let notice = notice.map(notice_html).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · bugdash</title>
<link rel="stylesheet" href="/style.css">
</head>
<body>
<div class="app">
<header>
<h1><span class="logo">bugdash</span></h1>
<nav>{dashboard}{bugs}{create}</nav>
</header>
{notice}
<main>
{content}
</main>
<footer>bugdash · bug tracking dashboard</footer>
</div>
<script>
document.querySelectorAll('form').forEach(function (form) {{
  form.addEventListener('submit', function (event) {{
    if (event.defaultPrevented) return;
    form.querySelectorAll('button').forEach(function (b) {{ b.disabled = true; }});
  }});
}});
</script>
</body>
</html>
"#,
        title = esc(title),
        dashboard = link(Nav::Dashboard, "/", "Dashboard"),
        bugs = link(Nav::Bugs, "/bugs", "Bugs"),
        create = link(Nav::Create, "/create", "Create Bug"),
    )
}

fn notice_html(notice: &Notice) -> String {
    format!(
        "<div class=\"notice {}\" role=\"status\">{}</div>",
        notice.level.as_str(),
        esc(&notice.message)
    )
}

fn status_badge(status: Status) -> String {
    let class = status.as_str().to_ascii_lowercase().replace('_', "-");
    format!(
        "<span class=\"badge status-{class}\">{}</span>",
        status.label()
    )
}

fn priority_badge(priority: Priority) -> String {
    format!(
        "<span class=\"badge priority-{}\">{}</span>",
        priority.as_str().to_ascii_lowercase(),
        priority.label()
    )
}

fn assignee_html(bug: &Bug) -> String {
    match bug.assignee() {
        Some(name) => esc(name),
        None => "<span class=\"muted\">Unassigned</span>".to_string(),
    }
}

fn options<T: Copy + PartialEq>(
    items: &[T],
    selected: T,
    value: impl Fn(T) -> String,
    label: impl Fn(T) -> String,
) -> String {
    items
        .iter()
        .map(|&item| {
            let sel = if item == selected { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{sel}>{}</option>",
                esc(&value(item)),
                esc(&label(item))
            )
        })
        .collect()
}

fn status_options(selected: Status) -> String {
    options(
        &Status::ALL,
        selected,
        |s| s.as_str().to_string(),
        |s| s.label().to_string(),
    )
}

fn priority_options(selected: Priority) -> String {
    options(
        &Priority::ALL,
        selected,
        |p| p.as_str().to_string(),
        |p| p.label().to_string(),
    )
}

fn delete_form(bug_id: &BugId, return_query: &str) -> String {
    format!(
        r#"<form method="post" action="/bugs/{id}/delete" onsubmit="return confirm('Are you sure you want to delete this bug?');">
<input type="hidden" name="return" value="{ret}">
<button class="btn small danger" type="submit">Delete</button>
</form>"#,
        id = esc(&bug_id.path_segment()),
        ret = esc(return_query),
    )
}

fn suggestion_html(body: &SuggestionBody) -> String {
    match body {
        SuggestionBody::Plain(text) => format!("<div class=\"prose\">{}</div>", esc(text)),
        SuggestionBody::Sectioned(sections) => sections
            .iter()
            .map(|section| {
                format!(
                    "<div class=\"ai-section\"><h3>{}</h3><div class=\"prose\">{}</div></div>",
                    section.kind.label(),
                    esc(&section.body)
                )
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub fn dashboard(view: &DashboardView) -> String {
    let mut content = String::from(
        "<div class=\"page-head\"><h2>Dashboard</h2>\
         <a class=\"btn primary\" href=\"/create\">Create Bug</a></div>\n<div class=\"stats-grid\">",
    );
    for card in view.counts.cards() {
        let _ = write!(
            content,
            "<a class=\"stat-card\" href=\"{}\"><div class=\"value\">{}</div><div class=\"label\">{}</div></a>",
            esc(&card.route.href()),
            card.value,
            card.label
        );
    }
    content.push_str(
        "</div>\n<div class=\"card\"><h2>Quick Actions</h2><div class=\"actions\">\
         <a class=\"btn\" href=\"/bugs\">View All Bugs</a>\
         <a class=\"btn\" href=\"/create\">Report a Bug</a></div></div>",
    );
    layout("Dashboard", Nav::Dashboard, view.notice.as_ref(), &content)
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

pub fn list(view: &ListView) -> String {
    let query = ListQuery {
        filter: view.filter.clone(),
        mode: view.mode,
    };
    let return_query = query.to_query();

    let mut content = String::from(
        "<div class=\"page-head\"><h2>All Bugs</h2>\
         <a class=\"btn primary\" href=\"/create\">Create Bug</a></div>\n",
    );
    content.push_str(&filter_form(view));

    match &view.data {
        LoadState::Loading => content.push_str("<div class=\"empty\">Loading bugs...</div>"),
        LoadState::Failed(err) => {
            let _ = write!(
                content,
                "<div class=\"notice error\">{}</div>",
                esc(err.message())
            );
        }
        LoadState::Ready(_) => {
            let visible = view.visible();
            let _ = write!(content, "<div class=\"summary\">{}</div>", esc(&view.summary()));
            if visible.is_empty() {
                let _ = write!(
                    content,
                    "<div class=\"card empty\">{}</div>",
                    esc(view.empty_message())
                );
            } else {
                match view.mode {
                    RenderMode::Table => content.push_str(&bug_table(&visible, &return_query)),
                    RenderMode::Cards => content.push_str(&bug_cards(&visible, &return_query)),
                }
            }
        }
    }

    layout("Bugs", Nav::Bugs, view.notice.as_ref(), &content)
}

fn filter_form(view: &ListView) -> String {
    let status_items: Vec<StatusFilter> = std::iter::once(StatusFilter::All)
        .chain(Status::ALL.into_iter().map(StatusFilter::Only))
        .collect();
    let priority_items: Vec<PriorityFilter> = std::iter::once(PriorityFilter::All)
        .chain(Priority::ALL.into_iter().map(PriorityFilter::Only))
        .collect();

    let status = options(
        &status_items,
        view.filter.status,
        |f| f.to_string(),
        |f| match f {
            StatusFilter::All => "All Statuses".to_string(),
            StatusFilter::Only(s) => s.label().to_string(),
        },
    );
    let priority = options(
        &priority_items,
        view.filter.priority,
        |f| f.to_string(),
        |f| match f {
            PriorityFilter::All => "All Priorities".to_string(),
            PriorityFilter::Only(p) => p.label().to_string(),
        },
    );

    let mode_link = |mode: RenderMode, label: &str| {
        let href = Route::List(ListQuery {
            filter: view.filter.clone(),
            mode,
        })
        .href();
        let class = if mode == view.mode { "btn small active" } else { "btn small" };
        format!("<a class=\"{class}\" href=\"{}\">{label}</a>", esc(&href))
    };
    let assigned = if view.filter.assigned_only {
        "<label><input type=\"checkbox\" name=\"assigned\" value=\"true\" checked> Assigned only</label>"
    } else {
        ""
    };
    let view_field = match view.mode {
        RenderMode::Table => String::new(),
        RenderMode::Cards => "<input type=\"hidden\" name=\"view\" value=\"cards\">".to_string(),
    };

    format!(
        r#"<form class="filters" method="get" action="/bugs">
<input type="search" name="search" placeholder="Search by title or status..." value="{search}">
<select name="status">{status}</select>
<select name="priority">{priority}</select>
{assigned}{view_field}
<button class="btn small" type="submit">Apply</button>
<a class="btn small" href="/bugs">Clear</a>
<span class="mode-toggle">{table}{cards}</span>
</form>
"#,
        search = esc(&view.filter.search),
        table = mode_link(RenderMode::Table, "Table"),
        cards = mode_link(RenderMode::Cards, "Cards"),
    )
}

fn bug_table(bugs: &[&Bug], return_query: &str) -> String {
    let mut out = String::from(
        "<div class=\"card\"><table><thead><tr><th>ID</th><th>Title</th><th>Status</th>\
         <th>Priority</th><th>Assigned To</th><th>Created</th><th>Actions</th></tr></thead><tbody>",
    );
    for bug in bugs {
        let id = bug.id.as_str();
        let _ = write!(
            out,
            "<tr><td class=\"mono\">#{id_text}</td><td><a href=\"{detail}\">{title}</a></td>\
             <td>{status}</td><td>{priority}</td><td>{assignee}</td><td>{created}</td>\
             <td class=\"actions\"><a class=\"btn small\" href=\"{detail}\">View</a>\
             <a class=\"btn small\" href=\"{edit}\">Edit</a>{delete}</td></tr>",
            id_text = esc(id),
            detail = esc(&Route::Detail(bug.id.clone()).href()),
            edit = esc(&Route::Edit(bug.id.clone()).href()),
            title = esc(&bug.title),
            status = status_badge(bug.status),
            priority = priority_badge(bug.priority),
            assignee = assignee_html(bug),
            created = bug
                .created_date
                .as_deref()
                .map(|raw| esc(&format_date(raw)))
                .unwrap_or_default(),
            delete = delete_form(&bug.id, return_query),
        );
    }
    out.push_str("</tbody></table></div>");
    out
}

fn bug_cards(bugs: &[&Bug], return_query: &str) -> String {
    let mut out = String::from("<div class=\"bug-grid\">");
    for bug in bugs {
        let _ = write!(
            out,
            "<div class=\"card bug-card\"><h2><a href=\"{detail}\">{title}</a></h2>\
             <div class=\"meta\">{status}{priority}</div>\
             <p class=\"muted\">{description}</p>\
             <p>Assigned: {assignee}</p>\
             <div class=\"actions\"><a class=\"btn small\" href=\"{detail}\">View</a>\
             <a class=\"btn small\" href=\"{edit}\">Edit</a>{delete}</div></div>",
            detail = esc(&Route::Detail(bug.id.clone()).href()),
            edit = esc(&Route::Edit(bug.id.clone()).href()),
            title = esc(&bug.title),
            status = status_badge(bug.status),
            priority = priority_badge(bug.priority),
            description = esc(&excerpt(&bug.description, 140)),
            assignee = assignee_html(bug),
            delete = delete_form(&bug.id, return_query),
        );
    }
    out.push_str("</div>");
    out
}

/// First `max` characters of `text`, with an ellipsis when cut.
fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

// ---------------------------------------------------------------------------
// Create / edit
// ---------------------------------------------------------------------------

fn text_fields(form: &BugForm) -> String {
    format!(
        r#"<div class="field"><label for="title">Title *</label>
<input type="text" id="title" name="title" value="{title}" placeholder="Brief summary of the bug"></div>
<div class="field"><label for="description">Description *</label>
<textarea id="description" name="description" placeholder="Steps to reproduce, expected and actual behavior">{description}</textarea></div>
"#,
        title = esc(&form.title),
        description = esc(&form.description),
    )
}

fn enum_fields(form: &BugForm) -> String {
    format!(
        r#"<div class="field"><label for="status">Status</label>
<select id="status" name="status">{status}</select></div>
<div class="field"><label for="priority">Priority</label>
<select id="priority" name="priority">{priority}</select></div>
"#,
        status = status_options(form.status),
        priority = priority_options(form.priority),
    )
}

pub fn create(view: &CreateView) -> String {
    let form = &view.form;

    let mut assignees = String::from("<option value=\"\">Unassigned</option>");
    for employee in view.assignable() {
        let sel = if employee.name == form.assigned_to { " selected" } else { "" };
        let _ = write!(
            assignees,
            "<option value=\"{name}\"{sel}>{name}</option>",
            name = esc(&employee.name)
        );
    }

    let modes = options(
        &[UserType::Business, UserType::Developer],
        view.user_type,
        |m| m.as_str().to_string(),
        |m| m.label().to_string(),
    );

    let mut ai = String::new();
    if let Some(error) = &view.ai_error {
        let _ = write!(ai, "<div class=\"notice error\">{}</div>", esc(error));
    }
    if let (Some(suggestion), Some(body)) = (&view.suggestion, view.suggestion_body()) {
        let _ = write!(
            ai,
            r#"<div id="ai-panel" class="card ai-panel">
<h2>AI Suggestion</h2>
<div class="ai-compare">Predicted priority {badge} <span class="muted">(applied to the form)</span></div>
{body}
<input class="ai-carry" type="hidden" name="ai_suggestion" value="{text}">
<input class="ai-carry" type="hidden" name="ai_priority" value="{priority}">
<input class="ai-carry" type="hidden" name="ai_mode" value="{mode}">
</div>"#,
            badge = priority_badge(suggestion.predicted_priority),
            body = suggestion_html(&body),
            text = esc(&suggestion.suggestion),
            priority = suggestion.predicted_priority.as_str(),
            mode = view.user_type.as_str(),
        );
    }

    let content = format!(
        r#"<div class="page-head"><h2>Create Bug</h2></div>
<form class="card" method="post" action="/create">
{text}
<div class="row">
{enums}
<div class="field"><label for="assignedTo">Assign To</label>
<select id="assignedTo" name="assignedTo">{assignees}</select></div>
</div>
<div class="card">
<h2>AI Assist</h2>
<p class="muted">Fill in the title and description, then ask for an analysis.</p>
<div class="actions">
<select id="userType" name="userType">{modes}</select>
<button class="btn" type="submit" formaction="/create/suggest">Get AI Suggestion</button>
</div>
</div>
{ai}
<div class="actions">
<button class="btn primary" type="submit">Create Bug</button>
<a class="btn" href="/bugs">Cancel</a>
</div>
</form>
<script>
document.getElementById('userType').addEventListener('change', function () {{
  var panel = document.getElementById('ai-panel');
  if (panel) panel.remove();
}});
</script>
"#,
        text = text_fields(form),
        enums = enum_fields(form),
    );

    layout("Create Bug", Nav::Create, view.notice.as_ref(), &content)
}

/// Edit page; the caller renders [`not_found`] when the bug failed to load.
pub fn edit(view: &EditView) -> String {
    let Some(form) = view.form() else {
        return layout(
            "Edit Bug",
            Nav::None,
            view.notice.as_ref(),
            "<div class=\"empty\">Loading bug...</div>",
        );
    };
    let detail = esc(&Route::Detail(view.id.clone()).href());

    let content = format!(
        r#"<div class="page-head"><h2>Edit Bug #{id}</h2></div>
<form class="card" method="post" action="{action}">
{text}
<div class="row">
{enums}
<div class="field"><label for="assignedTo">Assigned To</label>
<input type="text" id="assignedTo" name="assignedTo" value="{assignee}" placeholder="Employee name"></div>
</div>
<div class="actions">
<button class="btn primary" type="submit">Save Changes</button>
<a class="btn" href="{detail}">Cancel</a>
</div>
</form>
"#,
        id = esc(view.id.as_str()),
        action = esc(&Route::Edit(view.id.clone()).href()),
        text = text_fields(form),
        enums = enum_fields(form),
        assignee = esc(&form.assigned_to),
    );

    layout("Edit Bug", Nav::None, view.notice.as_ref(), &content)
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

pub fn detail(view: &DetailView) -> String {
    let Some(bug) = view.bug() else {
        return layout(
            "Bug",
            Nav::None,
            view.notice.as_ref(),
            "<div class=\"empty\">Loading bug...</div>",
        );
    };
    let id = bug.id.as_str();

    let mut fields = String::new();
    let _ = write!(
        fields,
        "<p><strong>Assigned To:</strong> {}</p>",
        assignee_html(bug)
    );
    if let Some(created) = &bug.created_date {
        let _ = write!(
            fields,
            "<p><strong>Created:</strong> {}</p>",
            esc(&format_timestamp(created))
        );
    }
    if let Some(updated) = &bug.updated_date {
        let _ = write!(
            fields,
            "<p><strong>Last Updated:</strong> {}</p>",
            esc(&format_timestamp(updated))
        );
    }

    let resolution = bug
        .resolution_notes()
        .map(|notes| {
            format!(
                "<div class=\"card\"><h2>Resolution</h2><div class=\"prose\">{}</div></div>",
                esc(notes)
            )
        })
        .unwrap_or_default();

    let mut ai = String::new();
    if let Some(error) = &view.ai_error {
        let _ = write!(ai, "<div class=\"notice error\">{}</div>", esc(error));
    }
    if let (Some(cmp), Some(body)) = (view.priority_comparison(), view.suggestion_body()) {
        let _ = write!(
            ai,
            "<div class=\"ai-compare\">Current {} · AI suggests {} <span class=\"muted\">{}</span></div>{}",
            priority_badge(cmp.current),
            priority_badge(cmp.predicted),
            cmp.verdict(),
            suggestion_html(&body)
        );
    }

    let content = format!(
        r#"<div class="page-head"><h2>{title}</h2>
<div class="actions"><a class="btn" href="{edit}">Edit</a>{delete}<a class="btn" href="/">Back to Dashboard</a></div></div>
<div class="card">
<div class="meta actions"><span class="muted">#{id_text}</span>{status}{priority}</div>
<h3>Description</h3>
<div class="prose">{description}</div>
</div>
<div class="card">{fields}</div>
{resolution}
<div class="card ai-panel">
<h2>AI Analysis</h2>
<form method="post" action="{suggest}">
<button class="btn" type="submit">Get AI Analysis</button>
</form>
{ai}
</div>
"#,
        title = esc(&bug.title),
        edit = esc(&Route::Edit(bug.id.clone()).href()),
        delete = delete_form(&bug.id, ""),
        id_text = esc(id),
        status = status_badge(bug.status),
        priority = priority_badge(bug.priority),
        description = esc(&bug.description),
        suggest = esc(&format!("/bugs/{}/suggest", bug.id.path_segment())),
    );

    layout(&bug.title, Nav::None, view.notice.as_ref(), &content)
}

// ---------------------------------------------------------------------------
// Not found
// ---------------------------------------------------------------------------

pub fn not_found(heading: &str, detail: &str) -> String {
    let content = format!(
        "<div class=\"card empty\"><h2>{}</h2><p>{}</p>\
         <p><a class=\"btn\" href=\"/\">Back to Dashboard</a></p></div>",
        esc(heading),
        esc(detail)
    );
    layout(heading, Nav::None, None, &content)
}
