//! Edit form for an existing bug.

use super::activation::{Activation, Channel};
use super::{BugForm, LoadState, Navigation, Notice, Route};
use crate::api::BugService;
use crate::model::BugId;

#[derive(Debug)]
pub struct EditView {
    pub id: BugId,
    pub state: LoadState<BugForm>,
    pub notice: Option<Notice>,
    activation: Activation,
}

impl EditView {
    pub fn new(id: BugId) -> Self {
        Self {
            id,
            state: LoadState::Loading,
            notice: None,
            activation: Activation::new(),
        }
    }

    /// Rebuild around a form the user already submitted once.
    pub fn with_form(id: BugId, form: BugForm) -> Self {
        Self {
            state: LoadState::Ready(form),
            ..Self::new(id)
        }
    }

    /// Fetch the bug and prefill the form. A failure is shown as not found.
    pub fn load(&mut self, service: &dyn BugService) {
        let ticket = self.activation.issue(Channel::Data);
        self.state = LoadState::Loading;
        let result = service.get_bug(&self.id);
        if !ticket.is_live() {
            return;
        }
        self.state = match result {
            Ok(bug) => LoadState::Ready(BugForm::from_bug(&bug)),
            Err(err) => LoadState::Failed(err),
        };
    }

    pub fn is_not_found(&self) -> bool {
        self.state.error().is_some()
    }

    pub fn form(&self) -> Option<&BugForm> {
        self.state.ready()
    }

    /// Validate and send the mutable fields. Navigates to the detail view on
    /// success; otherwise the form is kept.
    pub fn submit(&mut self, service: &dyn BugService) -> Navigation {
        let Some(form) = self.state.ready() else {
            return Navigation::Stay;
        };
        let update = match form.to_update() {
            Ok(update) => update,
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                return Navigation::Stay;
            }
        };

        match service.update_bug(&self.id, &update) {
            Ok(_) => {
                self.notice = Some(Notice::success("Bug updated"));
                Navigation::To(Route::Detail(self.id.clone()))
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
