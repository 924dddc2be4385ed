//! Terminal front end for the bug dashboard.
//!
//! Provides subcommand handlers for:
//! - `bugdash dashboard`: the four aggregate counts
//! - `bugdash list`: filtered bug list as a table, cards or JSON
//! - `bugdash show ID`: one bug in full
//! - `bugdash create` / `edit ID` / `delete ID`: mutations
//! - `bugdash suggest ID`: AI analysis of a stored bug
//! - `bugdash health`: service reachability and local files
//! - `bugdash config show|init|set|reset`: configuration management
//!
//! Each command drives the same view state as the served pages.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use colored::{ColoredString, Colorize};

use crate::ai::sections::SuggestionBody;
use crate::ai::{AiClient, SuggestionService};
use crate::api::{BugClient, BugService};
use crate::config::{self, BugdashConfig};
use crate::health::HealthReport;
use crate::model::{Bug, BugId, Priority, Status, UserType, format_date, format_timestamp};
use crate::views::create::CreateView;
use crate::views::dashboard::DashboardView;
use crate::views::detail::DetailView;
use crate::views::edit::EditView;
use crate::views::filter::BugFilter;
use crate::views::list::ListView;
use crate::views::{BugForm, ListQuery, Navigation, Notice, NoticeLevel, RenderMode};

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Cards,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("cards") | Some("card") => Self::Cards,
            _ => Self::Table,
        }
    }
}

/// Field overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct BugFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assign: Option<String>,
}

impl BugFields {
    fn apply(&self, form: &mut BugForm) {
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(status) = self.status {
            form.status = status;
        }
        if let Some(priority) = self.priority {
            form.priority = priority;
        }
        if let Some(assign) = &self.assign {
            form.assigned_to = assign.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// bugdash dashboard
// ---------------------------------------------------------------------------

pub fn run_dashboard(config: &BugdashConfig) -> Result<()> {
    let bugs = BugClient::from_config(config);
    let mut view = DashboardView::new();
    view.load(&bugs);
    if let Some(notice) = &view.notice {
        print_notice(notice);
    }

    println!("{}", "Bug Dashboard".bold().cyan());
    println!("{}", "=".repeat(50));
    for card in view.counts.cards() {
        println!(
            "  {:<16} {:>5}   {}",
            card.label.bold(),
            card.value,
            card.route.href().dimmed()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// bugdash list
// ---------------------------------------------------------------------------

pub fn run_list(config: &BugdashConfig, filter: BugFilter, format: OutputFormat) -> Result<()> {
    let bugs = BugClient::from_config(config);
    let mode = match format {
        OutputFormat::Cards => RenderMode::Cards,
        _ => RenderMode::Table,
    };
    let mut view = ListView::new(ListQuery { filter, mode });
    view.load(&bugs);

    if let Some(message) = view.error_message() {
        bail!("{message}");
    }
    let visible = view.visible();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("{}", "All Bugs".bold().cyan());
    println!("{}", "=".repeat(78));
    if visible.is_empty() {
        println!("{}", view.empty_message().yellow());
        return Ok(());
    }
    match format {
        OutputFormat::Cards => print_bug_cards(&visible),
        _ => print_bug_table(&visible),
    }
    println!();
    println!("{}", view.summary().dimmed());
    Ok(())
}

fn print_bug_table(bugs: &[&Bug]) {
    println!(
        "  {:<6} {:<32} {:<12} {:<9} {:<14} Created",
        "ID", "Title", "Status", "Priority", "Assigned"
    );
    println!("  {}", "-".repeat(86));

    for (i, bug) in bugs.iter().enumerate() {
        let line = format!(
            "  {:<6} {:<32} {:<12} {:<9} {:<14} {}",
            truncate(bug.id.as_str(), 6),
            truncate(&bug.title, 32),
            bug.status.label(),
            bug.priority.label(),
            truncate(bug.assignee().unwrap_or("-"), 14),
            bug.created_date.as_deref().map(format_date).unwrap_or_default(),
        );

        if i % 2 == 0 {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_bug_cards(bugs: &[&Bug]) {
    for bug in bugs {
        println!(
            "  {} {}",
            format!("#{}", bug.id).dimmed(),
            bug.title.bold()
        );
        println!(
            "    {}  {}  {}",
            colorize_status(bug.status),
            colorize_priority(bug.priority),
            bug.assignee().unwrap_or("Unassigned").dimmed()
        );
        if !bug.description.trim().is_empty() {
            println!("    {}", truncate(bug.description.trim(), 72));
        }
        println!();
    }
}

// ---------------------------------------------------------------------------
// bugdash show
// ---------------------------------------------------------------------------

pub fn run_show(config: &BugdashConfig, id: &str, format: OutputFormat) -> Result<()> {
    let bugs = BugClient::from_config(config);
    let mut view = DetailView::new(BugId::new(id));
    view.load(&bugs);
    let Some(bug) = view.bug() else {
        bail!("Bug not found");
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(bug)?);
        return Ok(());
    }
    print_bug(bug);
    Ok(())
}

fn print_bug(bug: &Bug) {
    println!("{} {}", format!("#{}", bug.id).dimmed(), bug.title.bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {} {}", "Status:     ".bold(), colorize_status(bug.status));
    println!("  {} {}", "Priority:   ".bold(), colorize_priority(bug.priority));
    println!(
        "  {} {}",
        "Assigned to:".bold(),
        bug.assignee().unwrap_or("Unassigned")
    );
    if let Some(created) = &bug.created_date {
        println!("  {} {}", "Created:    ".bold(), format_timestamp(created));
    }
    if let Some(updated) = &bug.updated_date {
        println!("  {} {}", "Updated:    ".bold(), format_timestamp(updated));
    }
    println!();
    println!("{}", "Description".bold());
    println!("{}", indent(&bug.description));
    if let Some(notes) = bug.resolution_notes() {
        println!();
        println!("{}", "Resolution".bold());
        println!("{}", indent(notes));
    }
}

// ---------------------------------------------------------------------------
// bugdash create
// ---------------------------------------------------------------------------

/// Create a bug, optionally asking the AI first.
///
/// With `suggest`, the predicted priority replaces the form's priority
/// unless `--priority` was given explicitly. An AI failure is reported and
/// the bug is still created.
pub fn run_create(
    config: &BugdashConfig,
    fields: &BugFields,
    suggest: bool,
    mode: UserType,
) -> Result<()> {
    let bugs = BugClient::from_config(config);
    let mut form = BugForm::default();
    fields.apply(&mut form);

    let mut view = CreateView::with_form(form, mode);
    view.load_employees(&bugs);

    if let Some(name) = fields.assign.as_deref().map(str::trim).filter(|n| !n.is_empty())
        && !view.assignable().iter().any(|e| e.name == name)
    {
        let available: Vec<&str> = view.assignable().into_iter().map(|e| e.name.as_str()).collect();
        if available.is_empty() {
            bail!("'{name}' is not an available employee (no employees available)");
        }
        bail!(
            "'{name}' is not an available employee (available: {})",
            available.join(", ")
        );
    }

    let ai = suggest.then(|| AiClient::from_config(config));
    let navigation = suggest_and_submit(
        &mut view,
        &bugs,
        ai.as_ref().map(|client| client as &dyn SuggestionService),
        fields.priority,
    );
    finish(navigation, view.notice.as_ref())
}

/// Ask the AI when `ai` is given, then submit the form.
///
/// The prediction is applied unless `priority` overrides it. When the AI
/// call fails its notice is printed and the submit goes ahead regardless.
pub fn suggest_and_submit(
    view: &mut CreateView,
    bugs: &dyn BugService,
    ai: Option<&dyn SuggestionService>,
    priority: Option<Priority>,
) -> Navigation {
    if let Some(ai) = ai {
        view.request_suggestion(ai);
        match (view.suggestion_body(), &view.suggestion) {
            (Some(body), Some(suggestion)) => {
                print_suggestion(&body, suggestion.predicted_priority, None)
            }
            _ => {
                if let Some(notice) = &view.notice {
                    print_notice(notice);
                }
            }
        }
        if let Some(priority) = priority {
            view.form.priority = priority;
        }
    }
    view.submit(bugs)
}

// ---------------------------------------------------------------------------
// bugdash edit
// ---------------------------------------------------------------------------

pub fn run_edit(config: &BugdashConfig, id: &str, fields: &BugFields) -> Result<()> {
    let bugs = BugClient::from_config(config);
    let mut view = EditView::new(BugId::new(id));
    view.load(&bugs);
    match view.state.ready_mut() {
        Some(form) => fields.apply(form),
        None => bail!("Bug not found"),
    }
    finish(view.submit(&bugs), view.notice.as_ref())
}

// ---------------------------------------------------------------------------
// bugdash delete
// ---------------------------------------------------------------------------

pub fn run_delete(config: &BugdashConfig, id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure you want to delete this bug?")? {
        println!("{}", "Cancelled.".dimmed());
        return Ok(());
    }

    let bugs = BugClient::from_config(config);
    let mut view = ListView::new(ListQuery::default());
    let deleted = view.delete(&bugs, &BugId::new(id));
    let message = notice_message(view.notice.as_ref());
    if !deleted {
        bail!("{message}");
    }
    println!("{} {}", "✓".green().bold(), message);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

// ---------------------------------------------------------------------------
// bugdash suggest
// ---------------------------------------------------------------------------

/// AI analysis of a stored bug. The prediction is only compared, never saved.
pub fn run_suggest(config: &BugdashConfig, id: &str) -> Result<()> {
    let bugs = BugClient::from_config(config);
    let ai = AiClient::from_config(config);
    let mut view = DetailView::new(BugId::new(id));
    view.load(&bugs);
    let Some(bug) = view.bug() else {
        bail!("Bug not found");
    };
    println!("{} {}", format!("#{}", bug.id).dimmed(), bug.title.bold().cyan());
    println!("{}", "=".repeat(60));

    view.request_suggestion(&ai);
    if let Some(error) = &view.ai_error {
        bail!("{error}");
    }
    if let (Some(body), Some(cmp)) = (view.suggestion_body(), view.priority_comparison()) {
        print_suggestion(&body, cmp.predicted, Some((cmp.current, cmp.verdict())));
    }
    Ok(())
}

fn print_suggestion(
    body: &SuggestionBody,
    predicted: Priority,
    comparison: Option<(Priority, &str)>,
) {
    println!("{}", "AI Suggestion".bold().magenta());
    match comparison {
        Some((current, verdict)) => println!(
            "  {} {} → {} ({})",
            "Priority:".bold(),
            colorize_priority(current),
            colorize_priority(predicted),
            verdict
        ),
        None => println!(
            "  {} {} (applied)",
            "Predicted priority:".bold(),
            colorize_priority(predicted)
        ),
    }
    println!();
    match body {
        SuggestionBody::Plain(text) => println!("{}", indent(text)),
        SuggestionBody::Sectioned(sections) => {
            for section in sections {
                println!("{}", section.kind.label().bold());
                println!("{}", indent(&section.body));
                println!();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// bugdash health
// ---------------------------------------------------------------------------

/// Check both services, the config files and the request log.
pub fn run_health(config: &BugdashConfig) -> Result<()> {
    println!("{}", "bugdash Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let bugs = BugClient::from_config(config);
    let ai = AiClient::from_config(config);
    let report = HealthReport::collect(bugs.base_url(), ai.base_url(), &bugs, &ai);

    print_health_item(
        "Global config",
        report.global_config,
        if report.global_config {
            "~/.bugdash/config.toml found"
        } else {
            "not found (run `bugdash config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        report.project_config,
        if report.project_config {
            ".bugdash.toml found"
        } else {
            "none (optional)"
        },
    );
    print_health_item(
        "Bug service",
        report.bug_service,
        &if report.bug_service {
            format!("reachable at {}", report.api_url)
        } else {
            format!("not reachable at {}", report.api_url)
        },
    );
    print_health_item(
        "AI service",
        report.ai_service,
        &if report.ai_service {
            format!("reachable at {}", report.ai_url)
        } else {
            format!("not reachable at {} (is it running?)", report.ai_url)
        },
    );
    print_health_item(
        "Request log",
        report.request_log_entries.is_some(),
        &match report.request_log_entries {
            Some(n) => format!("{} entries", n),
            None if config.logging.request_log => "no log file yet".to_string(),
            None => "disabled".to_string(),
        },
    );

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<18} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// bugdash config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective bugdash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file().is_some_and(|p| p.exists());
    let project_exists = config::project_config_file().is_some_and(|p| p.exists());
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.bugdash/config.toml", global_exists);
    print_source(".bugdash.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "BUGDASH_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.bugdash/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!(
        "  {}",
        "Edit the file to point bugdash at your services.".dimmed()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Report where a mutation ended up, failing the command if it stayed put.
fn finish(navigation: Navigation, notice: Option<&Notice>) -> Result<()> {
    match navigation {
        Navigation::To(route) => {
            println!(
                "{} {} {}",
                "✓".green().bold(),
                notice_message(notice),
                route.href().dimmed()
            );
            Ok(())
        }
        Navigation::Stay => bail!("{}", notice_message(notice)),
    }
}

fn notice_message(notice: Option<&Notice>) -> &str {
    notice.map_or("", |n| n.message.as_str())
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("{} {}", "✓".green().bold(), notice.message),
        NoticeLevel::Error => println!("{} {}", "✗".red().bold(), notice.message.red()),
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

fn colorize_status(status: Status) -> ColoredString {
    let label = status.label();
    match status {
        Status::Open => label.blue(),
        Status::InProgress => label.yellow(),
        Status::Resolved => label.green(),
        Status::Closed => label.dimmed(),
    }
}

fn colorize_priority(priority: Priority) -> ColoredString {
    let label = priority.label();
    match priority {
        Priority::Low => label.normal(),
        Priority::Medium => label.yellow(),
        Priority::High => label.red(),
        Priority::Critical => label.red().bold(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("ab", 2), "ab");
        assert_eq!(truncate("ünïcödé", 4), "ünï…");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("cards")), OutputFormat::Cards);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn fields_only_override_what_was_given() {
        let mut form = BugForm {
            title: "Old".into(),
            description: "Keep me".into(),
            ..BugForm::default()
        };
        BugFields {
            title: Some("New".into()),
            priority: Some(Priority::Critical),
            ..BugFields::default()
        }
        .apply(&mut form);
        assert_eq!(form.title, "New");
        assert_eq!(form.description, "Keep me");
        assert_eq!(form.priority, Priority::Critical);
        assert_eq!(form.status, Status::Open);
    }

    #[test]
    fn indent_prefixes_every_line() {
        assert_eq!(indent("a\nb"), "  a\n  b");
    }
}
