use anyhow::Result;
use clap::{Parser, Subcommand};

use bugdash::cli::{self, BugFields, OutputFormat};
use bugdash::config;
use bugdash::model::{Priority, Status, UserType};
use bugdash::views::filter::{BugFilter, PriorityFilter, StatusFilter};
use bugdash::web;

#[derive(Debug, Parser)]
#[command(name = "bugdash")]
#[command(about = "Bug tracking dashboard with AI-assisted triage")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the web dashboard
    Serve {
        /// Listen address (overrides web.addr)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Show the aggregate bug counts
    Dashboard,
    /// List bugs, filtered on the client
    List {
        /// Case-insensitive match on title or status
        #[arg(long)]
        search: Option<String>,
        /// ALL, OPEN, IN_PROGRESS, RESOLVED or CLOSED
        #[arg(long, default_value = "ALL")]
        status: StatusFilter,
        /// ALL, LOW, MEDIUM, HIGH (includes CRITICAL) or CRITICAL
        #[arg(long, default_value = "ALL")]
        priority: PriorityFilter,
        /// Only bugs with an assignee
        #[arg(long)]
        assigned: bool,
        /// Output format: table (default), cards, json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one bug
    Show {
        id: String,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a bug
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        status: Option<Status>,
        #[arg(long)]
        priority: Option<Priority>,
        /// Name of an available employee
        #[arg(long)]
        assign: Option<String>,
        /// Ask the AI service first and apply its predicted priority.
        /// An AI failure is reported but does not block the create
        #[arg(long)]
        suggest: bool,
        /// Analysis mode for --suggest: business or developer
        #[arg(long, default_value = "business")]
        mode: UserType,
    },
    /// Update fields of an existing bug
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<Status>,
        #[arg(long)]
        priority: Option<Priority>,
        /// Free-text assignee; pass "" to unassign
        #[arg(long)]
        assign: Option<String>,
    },
    /// Delete a bug
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Ask the AI service to analyse a stored bug
    Suggest { id: String },
    /// Check service reachability, config and request log
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration and its sources
    Show,
    /// Write a default ~/.bugdash/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `service.api_url`
    Set { key: String, value: String },
    /// Reset ~/.bugdash/config.toml to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let mut cfg = config::load();

    match app.command {
        Commands::Serve { addr, no_browser } => {
            if let Some(addr) = addr {
                cfg.web.addr = addr;
            }
            let open = cfg.web.open_browser && !no_browser;
            web::serve(&cfg, open)
        }
        Commands::Dashboard => cli::run_dashboard(&cfg),
        Commands::List {
            search,
            status,
            priority,
            assigned,
            format,
        } => {
            let filter = BugFilter {
                search: search.unwrap_or_default(),
                status,
                priority,
                assigned_only: assigned,
            };
            cli::run_list(&cfg, filter, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Show { id, format } => {
            cli::run_show(&cfg, &id, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Create {
            title,
            description,
            status,
            priority,
            assign,
            suggest,
            mode,
        } => {
            let fields = BugFields {
                title: Some(title),
                description: Some(description),
                status,
                priority,
                assign,
            };
            cli::run_create(&cfg, &fields, suggest, mode)
        }
        Commands::Edit {
            id,
            title,
            description,
            status,
            priority,
            assign,
        } => {
            let fields = BugFields {
                title,
                description,
                status,
                priority,
                assign,
            };
            cli::run_edit(&cfg, &id, &fields)
        }
        Commands::Delete { id, yes } => cli::run_delete(&cfg, &id, yes),
        Commands::Suggest { id } => cli::run_suggest(&cfg, &id),
        Commands::Health => cli::run_health(&cfg),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
