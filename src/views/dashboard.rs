//! Aggregate counts with deep links into the filtered list.

use super::activation::{Activation, Channel};
use super::filter::{BugFilter, PriorityFilter, StatusFilter};
use super::{ListQuery, Notice, Route};
use crate::api::BugService;
use crate::model::{Bug, Priority, Status};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total: usize,
    pub open: usize,
    pub high_priority: usize,
    /// Bugs with any assignee. There is no user identity, so this is not
    /// "assigned to me".
    pub assigned: usize,
}

impl DashboardCounts {
    pub fn from_bugs(bugs: &[Bug]) -> Self {
        bugs.iter().fold(Self::default(), |mut counts, bug| {
            counts.total += 1;
            if bug.status == Status::Open {
                counts.open += 1;
            }
            if bug.priority.is_high() {
                counts.high_priority += 1;
            }
            if bug.is_assigned() {
                counts.assigned += 1;
            }
            counts
        })
    }

    /// The four cards in display order.
    pub fn cards(&self) -> [StatCard; 4] {
        [
            StatCard {
                label: "Total Bugs",
                value: self.total,
                route: list_route(BugFilter::default()),
            },
            StatCard {
                label: "Open Bugs",
                value: self.open,
                route: list_route(BugFilter {
                    status: StatusFilter::Only(Status::Open),
                    ..BugFilter::default()
                }),
            },
            StatCard {
                label: "High Priority",
                value: self.high_priority,
                route: list_route(BugFilter {
                    priority: PriorityFilter::Only(Priority::High),
                    ..BugFilter::default()
                }),
            },
            StatCard {
                label: "Assigned",
                value: self.assigned,
                route: list_route(BugFilter {
                    assigned_only: true,
                    ..BugFilter::default()
                }),
            },
        ]
    }
}

fn list_route(filter: BugFilter) -> Route {
    Route::List(ListQuery {
        filter,
        ..ListQuery::default()
    })
}

/// One navigable count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: usize,
    pub route: Route,
}

#[derive(Debug, Default)]
pub struct DashboardView {
    pub counts: DashboardCounts,
    pub loading: bool,
    pub notice: Option<Notice>,
    activation: Activation,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Fetch all bugs and count them. A failure leaves zero counts and an
    /// error notice.
    pub fn load(&mut self, service: &dyn BugService) {
        let ticket = self.activation.issue(Channel::Data);
        self.loading = true;
        let result = service.list_bugs();
        if !ticket.is_live() {
            return;
        }
        self.loading = false;
        match result {
            Ok(bugs) => self.counts = DashboardCounts::from_bugs(&bugs),
            Err(err) => {
                self.counts = DashboardCounts::default();
                self.notice = Some(Notice::error(err.message()));
            }
        }
    }

    pub fn deactivate(&self) {
        self.activation.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_link_to_filtered_lists() {
        let hrefs: Vec<String> = DashboardCounts::default()
            .cards()
            .iter()
            .map(|card| card.route.href())
            .collect();
        assert_eq!(
            hrefs,
            [
                "/bugs",
                "/bugs?status=OPEN",
                "/bugs?priority=HIGH",
                "/bugs?assigned=true"
            ]
        );
    }
}
