//! Create form with optional AI assist.
//!
//! Asking the AI for a suggestion overwrites the form's priority with the
//! predicted one straight away; the user may still change it before
//! submitting. Switching the analysis mode throws away any suggestion held
//! for the previous mode.

use super::activation::{Activation, Channel, Ticket};
use super::{BugForm, ListQuery, Navigation, Notice, Route, ValidationError};
use crate::ai::sections::{self, SuggestionBody};
use crate::ai::{SuggestRequest, SuggestionService};
use crate::api::{ApiError, BugService};
use crate::model::{AiSuggestion, Employee, UserType};

#[derive(Debug)]
pub struct CreateView {
    pub form: BugForm,
    pub user_type: UserType,
    pub employees: Vec<Employee>,
    pub suggestion: Option<AiSuggestion>,
    pub ai_error: Option<String>,
    pub notice: Option<Notice>,
    activation: Activation,
}

impl Default for CreateView {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateView {
    pub fn new() -> Self {
        Self::with_form(BugForm::default(), UserType::default())
    }

    /// Rebuild the view around a form the user already filled in.
    pub fn with_form(form: BugForm, user_type: UserType) -> Self {
        Self {
            form,
            user_type,
            employees: Vec::new(),
            suggestion: None,
            ai_error: None,
            notice: None,
            activation: Activation::new(),
        }
    }

    /// Load the employee list once. A failure leaves the selector empty.
    pub fn load_employees(&mut self, service: &dyn BugService) {
        let ticket = self.activation.issue(Channel::Data);
        let employees = service.list_employees().unwrap_or_default();
        if ticket.is_live() {
            self.employees = employees;
        }
    }

    /// Employees offered in the "assign to" selector.
    pub fn assignable(&self) -> Vec<&Employee> {
        self.employees.iter().filter(|e| e.is_available()).collect()
    }

    /// Change the analysis mode, discarding a suggestion made for the old one.
    pub fn set_user_type(&mut self, user_type: UserType) {
        if user_type != self.user_type {
            self.user_type = user_type;
            self.suggestion = None;
            self.activation.issue(Channel::Ai);
        }
    }

    pub fn can_request_suggestion(&self) -> bool {
        self.form.has_text()
    }

    /// Check the form and issue the AI ticket.
    pub fn begin_suggestion(&mut self) -> Result<(Ticket, SuggestRequest), ValidationError> {
        if !self.can_request_suggestion() {
            self.notice = Some(Notice::error(
                ValidationError::SuggestionNeedsText.to_string(),
            ));
            return Err(ValidationError::SuggestionNeedsText);
        }
        self.ai_error = None;
        self.suggestion = None;
        let request = SuggestRequest {
            title: self.form.title.clone(),
            description: self.form.description.clone(),
            user_type: self.user_type,
            resolution: None,
        };
        Ok((self.activation.issue(Channel::Ai), request))
    }

    /// Apply an AI result unless its ticket was cancelled.
    pub fn finish_suggestion(
        &mut self,
        ticket: &Ticket,
        result: Result<AiSuggestion, ApiError>,
    ) -> bool {
        if !ticket.is_live() {
            return false;
        }
        match result {
            Ok(suggestion) => {
                self.form.priority = suggestion.predicted_priority;
                self.suggestion = Some(suggestion);
                self.notice = Some(Notice::success(
                    "AI suggestion generated! Review and fix the issue before creating the bug.",
                ));
            }
            Err(err) => {
                self.ai_error = Some(err.message().to_string());
                self.notice = Some(Notice::error(err.message()));
            }
        }
        true
    }

    /// Ask the AI service for a suggestion for the current form.
    pub fn request_suggestion(&mut self, ai: &dyn SuggestionService) -> bool {
        let Ok((ticket, request)) = self.begin_suggestion() else {
            return false;
        };
        let result = ai.suggest(&request);
        self.finish_suggestion(&ticket, result)
    }

    /// The held suggestion, split into sections.
    pub fn suggestion_body(&self) -> Option<SuggestionBody> {
        self.suggestion
            .as_ref()
            .map(|s| sections::parse(&s.suggestion))
    }

    /// Validate and create. Navigates to the list on success.
    pub fn submit(&mut self, service: &dyn BugService) -> Navigation {
        let bug = match self.form.to_new_bug() {
            Ok(bug) => bug,
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                return Navigation::Stay;
            }
        };

        match service.create_bug(&bug) {
            Ok(_) => {
                self.notice = Some(Notice::success("Bug created"));
                Navigation::To(Route::List(ListQuery::default()))
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.message()));
                Navigation::Stay
            }
        }
    }

    pub fn deactivate(&self) {
        self.activation.deactivate();
    }
}
