//! `application/x-www-form-urlencoded` bodies and notice query parameters.

use std::collections::HashMap;

use url::form_urlencoded;

use crate::model::{AiSuggestion, UserType};
use crate::views::{BugForm, Notice, NoticeLevel};

/// Decoded form fields. Repeated keys keep the last value.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    pub fn parse(body: &str) -> Self {
        Self {
            fields: form_urlencoded::parse(body.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// The five bug fields. Unparseable enums fall back to the defaults.
    pub fn bug_form(&self) -> BugForm {
        BugForm {
            title: self.text("title"),
            description: self.text("description"),
            status: self
                .get("status")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            priority: self
                .get("priority")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            assigned_to: self.text("assignedTo"),
        }
    }

    pub fn user_type(&self) -> UserType {
        self.get("userType")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// A suggestion carried between requests in hidden fields, together with
    /// the analysis mode it was made for.
    pub fn carried_suggestion(&self) -> Option<(AiSuggestion, UserType)> {
        let suggestion = self.get("ai_suggestion").filter(|s| !s.trim().is_empty())?;
        let predicted_priority = self.get("ai_priority")?.parse().ok()?;
        let mode = self.get("ai_mode")?.parse().ok()?;
        Some((
            AiSuggestion {
                suggestion: suggestion.to_string(),
                predicted_priority,
            },
            mode,
        ))
    }
}

/// Notice passed along a redirect as `notice` and `level`.
pub fn notice_from_query(query: &str) -> Option<Notice> {
    let mut message = None;
    let mut level = NoticeLevel::Success;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "notice" if !value.trim().is_empty() => message = Some(value.into_owned()),
            "level" if value == "error" => level = NoticeLevel::Error,
            _ => {}
        }
    }
    message.map(|message| Notice { level, message })
}

/// Append a notice to a location.
pub fn with_notice(href: &str, notice: &Notice) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("notice", &notice.message)
        .append_pair("level", notice.level.as_str())
        .finish();
    let separator = if href.contains('?') { '&' } else { '?' };
    format!("{href}{separator}{query}")
}
