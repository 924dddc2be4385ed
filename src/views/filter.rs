//! Client-side bug filtering for the list view.
//!
//! A bug is shown iff every clause holds:
//!
//! - search text is empty, or it is a case-insensitive substring of the
//!   title or of the status wire name (`in_progress` matches "progress");
//! - the status filter is `ALL` or equals the bug's status;
//! - the priority filter is `ALL`, or equals the bug's priority, or is
//!   `HIGH` and the bug is `CRITICAL`. `HIGH` therefore means "high or
//!   worse" while `CRITICAL` matches only critical bugs;
//! - when `assigned_only` is set (dashboard deep link), the bug has a
//!   non-blank assignee.

use std::fmt;
use std::str::FromStr;

use crate::model::{Bug, Priority, Status};

/// Status filter: everything, or one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Priority filter: everything, or one priority (with `HIGH` widened to
/// include `CRITICAL`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(Priority::High) => priority.is_high(),
            Self::Only(wanted) => wanted == priority,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(priority) => priority.fmt(f),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// The full set of list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BugFilter {
    pub search: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub assigned_only: bool,
}

impl BugFilter {
    pub fn matches(&self, bug: &Bug) -> bool {
        self.matches_search(bug)
            && self.status.matches(bug.status)
            && self.priority.matches(bug.priority)
            && (!self.assigned_only || bug.is_assigned())
    }

    fn matches_search(&self, bug: &Bug) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        bug.title.to_lowercase().contains(&needle)
            || bug.status.as_str().to_lowercase().contains(&needle)
    }

    /// The bugs that pass every clause, in their original order.
    pub fn apply<'a>(&self, bugs: &'a [Bug]) -> Vec<&'a Bug> {
        bugs.iter().filter(|bug| self.matches(bug)).collect()
    }

    /// Whether any filter differs from its default.
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    /// Reset every filter ("Clear all filters").
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BugId;

    fn bug(id: u64, title: &str, status: Status, priority: Priority) -> Bug {
        Bug {
            id: BugId::from(id),
            title: title.to_string(),
            description: "d".to_string(),
            status,
            priority,
            assigned_to: None,
            resolution: None,
            created_date: None,
            updated_date: None,
        }
    }

    #[test]
    fn high_filter_includes_critical_but_not_the_reverse() {
        let high = PriorityFilter::Only(Priority::High);
        let critical = PriorityFilter::Only(Priority::Critical);
        assert!(high.matches(Priority::High));
        assert!(high.matches(Priority::Critical));
        assert!(!high.matches(Priority::Medium));
        assert!(critical.matches(Priority::Critical));
        assert!(!critical.matches(Priority::High));
    }

    #[test]
    fn search_matches_title_or_status_case_insensitively() {
        let b = bug(1, "Login button dead", Status::InProgress, Priority::Low);
        let filter = |s: &str| BugFilter {
            search: s.to_string(),
            ..BugFilter::default()
        };
        assert!(filter("LOGIN").matches(&b));
        assert!(filter("progress").matches(&b));
        assert!(filter("in_prog").matches(&b));
        assert!(!filter("checkout").matches(&b));
    }

    #[test]
    fn parse_filters_from_query_values() {
        assert_eq!("ALL".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "open".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(Status::Open))
        );
        assert_eq!(
            "HIGH".parse::<PriorityFilter>(),
            Ok(PriorityFilter::Only(Priority::High))
        );
        assert!("soon".parse::<PriorityFilter>().is_err());
        assert_eq!(PriorityFilter::All.to_string(), "ALL");
    }

    #[test]
    fn clear_resets_everything() {
        let mut filter = BugFilter {
            search: "x".into(),
            status: StatusFilter::Only(Status::Closed),
            priority: PriorityFilter::Only(Priority::Low),
            assigned_only: true,
        };
        assert!(filter.is_active());
        filter.clear();
        assert!(!filter.is_active());
    }
}
