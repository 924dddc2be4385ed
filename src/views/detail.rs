//! Read-only bug detail with an AI comparison.
//!
//! Unlike the create form, the predicted priority is only displayed next to
//! the stored one. It is never written back.

use std::cmp::Ordering;

use super::activation::{Activation, Channel};
use super::{LoadState, Notice, ValidationError};
use crate::ai::sections::{self, SuggestionBody};
use crate::ai::{SuggestRequest, SuggestionService};
use crate::api::BugService;
use crate::model::{AiSuggestion, Bug, BugId, Priority, UserType};

/// Stored priority against the AI's prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityComparison {
    pub current: Priority,
    pub predicted: Priority,
}

impl PriorityComparison {
    pub fn agrees(&self) -> bool {
        self.current == self.predicted
    }

    /// Short verdict shown beside the two badges.
    pub fn verdict(&self) -> &'static str {
        match self.predicted.cmp(&self.current) {
            Ordering::Equal => "matches the current priority",
            Ordering::Greater => "suggests raising the priority",
            Ordering::Less => "suggests lowering the priority",
        }
    }
}

#[derive(Debug)]
pub struct DetailView {
    pub id: BugId,
    pub data: LoadState<Bug>,
    pub suggestion: Option<AiSuggestion>,
    pub ai_error: Option<String>,
    pub notice: Option<Notice>,
    activation: Activation,
}

impl DetailView {
    pub fn new(id: BugId) -> Self {
        Self {
            id,
            data: LoadState::Loading,
            suggestion: None,
            ai_error: None,
            notice: None,
            activation: Activation::new(),
        }
    }

    pub fn load(&mut self, service: &dyn BugService) {
        let ticket = self.activation.issue(Channel::Data);
        self.data = LoadState::Loading;
        let result = service.get_bug(&self.id);
        if ticket.is_live() {
            self.data = match result {
                Ok(bug) => LoadState::Ready(bug),
                Err(err) => LoadState::Failed(err),
            };
        }
    }

    /// Any failed fetch is treated as "this bug does not exist".
    pub fn is_not_found(&self) -> bool {
        self.data.error().is_some()
    }

    pub fn bug(&self) -> Option<&Bug> {
        self.data.ready()
    }

    /// Ask the AI about the stored bug, in business mode.
    pub fn request_suggestion(&mut self, ai: &dyn SuggestionService) -> bool {
        let Some(bug) = self.data.ready() else {
            return false;
        };
        if bug.title.trim().is_empty() || bug.description.trim().is_empty() {
            self.ai_error = Some(ValidationError::BugNeedsText.to_string());
            return false;
        }
        let request = SuggestRequest {
            title: bug.title.clone(),
            description: bug.description.clone(),
            user_type: UserType::Business,
            resolution: bug.resolution_notes().map(str::to_string),
        };

        let ticket = self.activation.issue(Channel::Ai);
        self.ai_error = None;
        self.suggestion = None;
        let result = ai.suggest(&request);
        if !ticket.is_live() {
            return false;
        }
        match result {
            Ok(suggestion) => self.suggestion = Some(suggestion),
            Err(err) => self.ai_error = Some(err.message().to_string()),
        }
        true
    }

    pub fn suggestion_body(&self) -> Option<SuggestionBody> {
        self.suggestion
            .as_ref()
            .map(|s| sections::parse(&s.suggestion))
    }

    pub fn priority_comparison(&self) -> Option<PriorityComparison> {
        let bug = self.data.ready()?;
        let suggestion = self.suggestion.as_ref()?;
        Some(PriorityComparison {
            current: bug.priority,
            predicted: suggestion.predicted_priority,
        })
    }

    pub fn deactivate(&self) {
        self.activation.deactivate();
    }
}
