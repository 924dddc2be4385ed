//! Domain types shared by the clients, views and renderers.
//!
//! The bug service owns every record; `bugdash` only ever holds copies
//! fetched for a single view activation. Field names follow the service's
//! camelCase JSON.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Server-assigned record identifier.
///
/// The bug service emits numeric ids, but the client treats them as opaque
/// and accepts either a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

/// Identifier of a [`Bug`].
pub type BugId = RecordId;

/// Bytes escaped when an id becomes one URL path segment. `/`, `?`, `#` and
/// `%` must never leak through, or the id would address another resource.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id percent-encoded as a single path segment.
    pub fn path_segment(&self) -> String {
        utf8_percent_encode(&self.0, PATH_SEGMENT).to_string()
    }

    /// Inverse of [`path_segment`](Self::path_segment). `+` stays a plus.
    pub fn from_path_segment(raw: &str) -> Self {
        Self(percent_decode_str(raw).decode_utf8_lossy().into_owned())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Status / Priority
// ---------------------------------------------------------------------------

/// Workflow stage of a bug: OPEN → IN_PROGRESS → RESOLVED → CLOSED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Open,
        Status::InProgress,
        Status::Resolved,
        Status::Closed,
    ];

    /// Wire name, as sent to and received from the bug service.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "RESOLVED" => Ok(Self::Resolved),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(format!(
                "invalid status '{s}' (expected OPEN, IN_PROGRESS, RESOLVED or CLOSED)"
            )),
        }
    }
}

/// Severity ranking, ordered LOW < MEDIUM < HIGH < CRITICAL.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// HIGH or CRITICAL.
    pub fn is_high(self) -> bool {
        self >= Self::High
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(format!(
                "invalid priority '{s}' (expected LOW, MEDIUM, HIGH or CRITICAL)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Bug
// ---------------------------------------------------------------------------

/// A tracked defect as returned by the bug service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
    pub id: BugId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

impl Bug {
    /// Whether `assignedTo` holds a non-blank name.
    pub fn is_assigned(&self) -> bool {
        self.assignee().is_some()
    }

    /// Trimmed assignee, if any.
    pub fn assignee(&self) -> Option<&str> {
        non_blank(self.assigned_to.as_deref())
    }

    /// Trimmed resolution notes, if any.
    pub fn resolution_notes(&self) -> Option<&str> {
        non_blank(self.resolution.as_deref())
    }
}

/// Body of `POST /bugs`: a bug without server-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBug {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assigned_to: Option<String>,
}

/// Body of `PUT /bugs/{id}`: exactly the mutable fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BugUpdate {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assigned_to: Option<String>,
}

// ---------------------------------------------------------------------------
// Employee
// ---------------------------------------------------------------------------

/// An employee that bugs can be assigned to. Read-only from this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub availability_status: Option<String>,
}

impl Employee {
    pub fn is_available(&self) -> bool {
        self.availability_status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("AVAILABLE"))
    }
}

// ---------------------------------------------------------------------------
// AI suggestion
// ---------------------------------------------------------------------------

/// Analysis mode requested from the AI service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Non-technical: business impact plus causes and resolutions.
    #[default]
    Business,
    /// Technical: causes and resolutions with code hints.
    Developer,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Developer => "developer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Business => "Business (Non-Technical)",
            Self::Developer => "Developer (Technical)",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(Self::Business),
            "developer" | "dev" => Ok(Self::Developer),
            _ => Err(format!(
                "invalid analysis mode '{s}' (expected business or developer)"
            )),
        }
    }
}

/// Advisory output of the AI service. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub suggestion: String,
    pub predicted_priority: Priority,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Treat an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Render a server timestamp for display (`2024-03-01 14:05`).
///
/// Accepts RFC 3339 and the zone-less ISO form the bug service emits. Values
/// that parse as neither are shown verbatim.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Render only the date part of a server timestamp.
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<chrono::NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
