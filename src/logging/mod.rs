use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request log entry (JSONL)
// ---------------------------------------------------------------------------

/// Which external service a request went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Bugs,
    Ai,
}

/// A single entry in the outbound request log
/// (`~/.bugdash/request-log.jsonl`).
///
/// One line per call made by the bug or AI client, successful or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub timestamp: String,
    pub service: Service,
    pub method: String,
    pub path: String,
    /// HTTP status, absent when the request never got a response.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
    pub success: bool,
    pub latency_ms: u64,
}

impl RequestLogEntry {
    pub fn new(
        service: Service,
        method: &str,
        path: &str,
        status: Option<u16>,
        latency_ms: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            service,
            method: method.to_string(),
            path: path.to_string(),
            status,
            success: status.is_some_and(|s| (200..300).contains(&s)),
            latency_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Where client calls are recorded.
#[derive(Debug, Clone, Default)]
pub enum RequestLog {
    /// Discard entries.
    #[default]
    Disabled,
    /// Append entries to a JSONL file.
    File(PathBuf),
}

impl RequestLog {
    /// The default log file, or `Disabled` when `enabled` is false or the
    /// home directory is unknown.
    pub fn from_flag(enabled: bool) -> Self {
        match request_log_path() {
            Some(path) if enabled => Self::File(path),
            _ => Self::Disabled,
        }
    }

    /// Record one entry. Failures to write are ignored.
    pub fn record(&self, entry: &RequestLogEntry) {
        if let Self::File(path) = self {
            let _ = append_entry(path, entry);
        }
    }
}

fn append_entry(path: &Path, entry: &RequestLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read all entries from a request log, skipping malformed lines.
///
/// Returns an empty vec if the file does not exist or cannot be read.
pub fn read_entries(path: &Path) -> Vec<RequestLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<RequestLogEntry>(&line).ok())
        .collect()
}

/// Return the path to the request log file.
pub fn request_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bugdash").join("request-log.jsonl"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
