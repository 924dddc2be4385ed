//! Bug list: fetch everything once, filter on the client, delete inline.

use super::activation::{Activation, Channel, Ticket};
use super::filter::BugFilter;
use super::{ListQuery, LoadState, Notice, RenderMode};
use crate::api::{ApiError, BugService};
use crate::model::{Bug, BugId};

#[derive(Debug)]
pub struct ListView {
    pub filter: BugFilter,
    pub mode: RenderMode,
    pub data: LoadState<Vec<Bug>>,
    pub notice: Option<Notice>,
    activation: Activation,
}

impl ListView {
    /// A new activation, seeded from the page's query parameters.
    pub fn new(seed: ListQuery) -> Self {
        Self {
            filter: seed.filter,
            mode: seed.mode,
            data: LoadState::Loading,
            notice: None,
            activation: Activation::new(),
        }
    }

    /// Mark the list as loading and issue the fetch ticket.
    pub fn begin_load(&mut self) -> Ticket {
        self.data = LoadState::Loading;
        self.activation.issue(Channel::Data)
    }

    /// Apply a fetch result. Returns `false` if the ticket was cancelled and
    /// the result discarded.
    pub fn finish_load(&mut self, ticket: &Ticket, result: Result<Vec<Bug>, ApiError>) -> bool {
        if !ticket.is_live() {
            return false;
        }
        // A failed refetch replaces the old list rather than showing it stale.
        self.data = match result {
            Ok(bugs) => LoadState::Ready(bugs),
            Err(err) => LoadState::Failed(err),
        };
        true
    }

    /// Fetch the whole collection.
    pub fn load(&mut self, service: &dyn BugService) {
        let ticket = self.begin_load();
        let result = service.list_bugs();
        self.finish_load(&ticket, result);
    }

    /// Stop applying results to this view.
    pub fn deactivate(&self) {
        self.activation.deactivate();
    }

    /// The filtered bugs, recomputed from the current state.
    pub fn visible(&self) -> Vec<&Bug> {
        match &self.data {
            LoadState::Ready(bugs) => self.filter.apply(bugs),
            _ => Vec::new(),
        }
    }

    /// Size of the unfiltered collection.
    pub fn total(&self) -> usize {
        self.data.ready().map_or(0, Vec::len)
    }

    /// "Showing N of M bugs".
    pub fn summary(&self) -> String {
        let total = self.total();
        format!(
            "Showing {} of {} bug{}",
            self.visible().len(),
            total,
            if total == 1 { "" } else { "s" }
        )
    }

    /// Message for an empty filtered result.
    pub fn empty_message(&self) -> &'static str {
        if self.total() == 0 {
            "No bugs found."
        } else {
            "No bugs match your filters. Try adjusting your search or filters."
        }
    }

    /// Delete a bug the user already confirmed.
    ///
    /// On success the bug is dropped from the local list (no refetch). On
    /// failure the list is left untouched.
    pub fn delete(&mut self, service: &dyn BugService, id: &BugId) -> bool {
        match service.delete_bug(id) {
            Ok(()) => {
                if let Some(bugs) = self.data.ready_mut() {
                    bugs.retain(|bug| &bug.id != id);
                }
                self.notice = Some(Notice::success("Bug deleted"));
                true
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.message()));
                false
            }
        }
    }

    /// The failure message to show in place of the list.
    pub fn error_message(&self) -> Option<&str> {
        self.data.error().map(ApiError::message)
    }
}
