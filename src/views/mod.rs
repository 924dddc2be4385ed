//! Per-page view state.
//!
//! Each page is an explicit state struct driven one way: the surface
//! renders the state, user actions call methods on it, and those methods
//! update the state (possibly after calling a service). Views never share
//! state with each other; every activation fetches its own copies.

pub mod activation;
pub mod create;
pub mod dashboard;
pub mod detail;
pub mod edit;
pub mod filter;
pub mod list;
pub mod route;

use thiserror::Error;

use crate::api::ApiError;
use crate::model::{Bug, BugUpdate, NewBug, Priority, Status};

pub use route::{ListQuery, RenderMode, Route};

// ---------------------------------------------------------------------------
// Load state
// ---------------------------------------------------------------------------

/// Progress of a view's primary fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(ApiError),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Where a view wants to go after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    To(Route),
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Problems caught before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Please fill in Title and Description first")]
    SuggestionNeedsText,
    #[error("Bug title and description are required for AI analysis")]
    BugNeedsText,
}

// ---------------------------------------------------------------------------
// Shared form
// ---------------------------------------------------------------------------

/// The five editable bug fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BugForm {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assigned_to: String,
}

impl BugForm {
    /// Prefill from an existing bug.
    pub fn from_bug(bug: &Bug) -> Self {
        Self {
            title: bug.title.clone(),
            description: bug.description.clone(),
            status: bug.status,
            priority: bug.priority,
            assigned_to: bug.assigned_to.clone().unwrap_or_default(),
        }
    }

    /// Title and description must be non-blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::DescriptionRequired);
        }
        Ok(())
    }

    pub fn has_text(&self) -> bool {
        self.validate().is_ok()
    }

    fn assignee(&self) -> Option<String> {
        let name = self.assigned_to.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    pub fn to_new_bug(&self) -> Result<NewBug, ValidationError> {
        self.validate()?;
        Ok(NewBug {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            assigned_to: self.assignee(),
        })
    }

    pub fn to_update(&self) -> Result<BugUpdate, ValidationError> {
        self.validate()?;
        Ok(BugUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            assigned_to: self.assignee(),
        })
    }
}
