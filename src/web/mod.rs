//! Served dashboard for bugdash.
//!
//! A small synchronous HTTP server (`tiny_http`) renders every view as a
//! server-side HTML page:
//!
//! - `GET /`, `/bugs`, `/create`, `/edit/{id}`, `/bugs/{id}`: pages
//! - `POST /create`, `/create/suggest`, `/edit/{id}`, `/bugs/{id}/delete`,
//!   `/bugs/{id}/suggest`: form actions
//! - `GET /style.css`, `GET /api/health`
//!
//! Launched via `bugdash serve` (default: `http://127.0.0.1:9750`).

mod api;
mod assets;
mod form;
mod handlers;
pub mod render;

use std::io::Cursor;

use anyhow::{Context, Result, anyhow};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::ai::{AiClient, SuggestionService};
use crate::api::{BugClient, BugService};
use crate::config::BugdashConfig;
use crate::views::Route;
use crate::views::route::decode_segment;
use form::{FormData, notice_from_query};

// ---------------------------------------------------------------------------
// Application and responses
// ---------------------------------------------------------------------------

/// The services a request is handled against.
pub struct App<'a> {
    bugs: &'a dyn BugService,
    ai: &'a dyn SuggestionService,
    api_url: String,
    ai_url: String,
}

impl<'a> App<'a> {
    pub fn new(
        bugs: &'a dyn BugService,
        ai: &'a dyn SuggestionService,
        api_url: &str,
        ai_url: &str,
    ) -> Self {
        Self {
            bugs,
            ai,
            api_url: api_url.to_string(),
            ai_url: ai_url.to_string(),
        }
    }
}

/// A rendered response, independent of the server library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    /// `Location` header for redirects.
    pub location: Option<String>,
}

impl Page {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body,
            location: None,
        }
    }

    fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body,
            location: None,
        }
    }

    /// 303 See Other, so the browser follows with a GET.
    fn redirect(location: String) -> Self {
        Self {
            status: 303,
            content_type: "text/plain; charset=utf-8",
            body: String::new(),
            location: Some(location),
        }
    }

    fn into_response(self) -> Result<Response<Cursor<Vec<u8>>>> {
        let mut response = Response::from_data(self.body.into_bytes())
            .with_status_code(StatusCode(self.status))
            .with_header(header("Content-Type", self.content_type)?);
        if let Some(location) = &self.location {
            response = response.with_header(header("Location", location)?);
        }
        Ok(response)
    }
}

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| anyhow!("invalid header {name}: {value}"))
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server on `config.web.addr`.
///
/// Blocks the current thread. Requests are handled one at a time; a failure
/// inside one request never stops the server.
pub fn serve(config: &BugdashConfig, open: bool) -> Result<()> {
    let addr = config.web.addr.as_str();
    let server = Server::http(addr)
        .map_err(|e| anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let bugs = BugClient::from_config(config);
    let ai = AiClient::from_config(config);
    let app = App::new(&bugs, &ai, bugs.base_url(), ai.base_url());

    println!("bugdash running at http://{addr}");
    println!("  bug service: {}", bugs.base_url());
    println!("  AI service:  {}", ai.base_url());
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Post | Method::Put) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let page = handle(&app, &method, &url, body.as_deref());
        let status = page.status;
        let result = page.into_response().and_then(|resp| {
            request
                .respond(resp)
                .context("failed to write response")
        });
        if let Err(e) = result {
            eprintln!("{method} {url}: {e:#}");
        }

        // Brief access log
        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch one request to its handler.
pub fn handle(app: &App<'_>, method: &Method, url: &str, body: Option<&str>) -> Page {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let data = FormData::parse(body.unwrap_or_default());

    match (method, segments.as_slice()) {
        (&Method::Get, ["style.css"]) => Page {
            content_type: "text/css; charset=utf-8",
            ..Page::html(200, assets::STYLE_CSS.to_string())
        },
        (&Method::Get, ["api", "health"]) => api::get_health(app),

        (&Method::Post, ["create"]) => handlers::create_submit(app, &data),
        (&Method::Post, ["create", "suggest"]) => handlers::create_suggest(app, &data),
        (&Method::Post, ["edit", id]) if !id.is_empty() => {
            handlers::edit_submit(app, decode_segment(id), &data)
        }
        (&Method::Post, ["bugs", id, "delete"]) if !id.is_empty() => {
            handlers::delete(app, decode_segment(id), &data)
        }
        (&Method::Post, ["bugs", id, "suggest"]) if !id.is_empty() => {
            handlers::detail_suggest(app, decode_segment(id))
        }

        (&Method::Get, _) => match Route::from_path(path, query) {
            Some(route) => handlers::page(app, route, notice_from_query(query)),
            None => not_found(),
        },

        _ => not_found(),
    }
}

fn not_found() -> Page {
    Page::html(
        404,
        render::not_found("Page not found", "There is nothing at this address."),
    )
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
