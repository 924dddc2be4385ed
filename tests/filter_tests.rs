/// List filtering properties.
///
/// The collection below covers every status × priority × assigned
/// combination, so each assertion sweeps the whole filter space.
use bugdash::model::{Bug, Priority, RecordId, Status};
use bugdash::views::dashboard::DashboardCounts;
use bugdash::views::filter::{BugFilter, PriorityFilter, StatusFilter};

fn collection() -> Vec<Bug> {
    let mut bugs = Vec::new();
    let mut id = 0u64;
    for status in Status::ALL {
        for priority in Priority::ALL {
            for assignee in [None, Some("Ann"), Some("  ")] {
                id += 1;
                bugs.push(Bug {
                    id: RecordId::from(id),
                    title: format!("Bug {id} in Checkout"),
                    description: String::new(),
                    status,
                    priority,
                    assigned_to: assignee.map(str::to_string),
                    resolution: None,
                    created_date: None,
                    updated_date: None,
                });
            }
        }
    }
    bugs
}

fn all_filters() -> Vec<BugFilter> {
    let statuses = std::iter::once(StatusFilter::All).chain(Status::ALL.map(StatusFilter::Only));
    let mut filters = Vec::new();
    for status in statuses {
        let priorities =
            std::iter::once(PriorityFilter::All).chain(Priority::ALL.map(PriorityFilter::Only));
        for priority in priorities {
            for search in ["", "checkout", "PROGRESS", "bug 1", "nothing"] {
                for assigned_only in [false, true] {
                    filters.push(BugFilter {
                        search: search.to_string(),
                        status,
                        priority,
                        assigned_only,
                    });
                }
            }
        }
    }
    filters
}

/// The three list clauses plus the assigned deep link, written out longhand.
fn expected(filter: &BugFilter, bug: &Bug) -> bool {
    let search = filter.search.to_lowercase();
    let search_ok = search.is_empty()
        || bug.title.to_lowercase().contains(&search)
        || bug.status.as_str().to_lowercase().contains(&search);
    let status_ok = match filter.status {
        StatusFilter::All => true,
        StatusFilter::Only(s) => s == bug.status,
    };
    let priority_ok = match filter.priority {
        PriorityFilter::All => true,
        PriorityFilter::Only(Priority::High) => {
            matches!(bug.priority, Priority::High | Priority::Critical)
        }
        PriorityFilter::Only(p) => p == bug.priority,
    };
    let assigned_ok = !filter.assigned_only
        || bug.assigned_to.as_deref().is_some_and(|a| !a.trim().is_empty());
    search_ok && status_ok && priority_ok && assigned_ok
}

#[test]
fn filtered_result_is_exactly_the_matching_subset() {
    let bugs = collection();
    for filter in all_filters() {
        let got: Vec<&str> = filter.apply(&bugs).into_iter().map(|b| b.id.as_str()).collect();
        let want: Vec<&str> = bugs
            .iter()
            .filter(|b| expected(&filter, b))
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(got, want, "filter {filter:?}");
    }
}

#[test]
fn filtering_is_idempotent() {
    let bugs = collection();
    for filter in all_filters() {
        let once: Vec<Bug> = filter.apply(&bugs).into_iter().cloned().collect();
        let twice: Vec<Bug> = filter.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice, "filter {filter:?}");
        assert_eq!(filter.apply(&bugs).len(), once.len());
    }
}

#[test]
fn high_includes_critical_but_not_the_reverse() {
    let bugs = collection();
    let high = BugFilter {
        priority: PriorityFilter::Only(Priority::High),
        ..BugFilter::default()
    };
    let critical = BugFilter {
        priority: PriorityFilter::Only(Priority::Critical),
        ..BugFilter::default()
    };

    let high_set = high.apply(&bugs);
    assert!(high_set.iter().any(|b| b.priority == Priority::High));
    assert!(high_set.iter().any(|b| b.priority == Priority::Critical));
    assert!(high_set.iter().all(|b| b.priority.is_high()));

    let critical_set = critical.apply(&bugs);
    assert!(!critical_set.is_empty());
    assert!(critical_set.iter().all(|b| b.priority == Priority::Critical));
}

#[test]
fn search_matches_status_wire_name() {
    let bugs = collection();
    let filter = BugFilter {
        search: "in_prog".into(),
        ..BugFilter::default()
    };
    let hits = filter.apply(&bugs);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|b| b.status == Status::InProgress));
}

#[test]
fn default_filter_shows_everything() {
    let bugs = collection();
    assert!(!BugFilter::default().is_active());
    assert_eq!(BugFilter::default().apply(&bugs).len(), bugs.len());
}

#[test]
fn dashboard_counts_match_the_filters_they_link_to() {
    let bugs = collection();
    let counts = DashboardCounts::from_bugs(&bugs);
    for card in counts.cards() {
        let bugdash::views::Route::List(query) = &card.route else {
            panic!("dashboard card {} must link to the list", card.label);
        };
        assert_eq!(
            query.filter.apply(&bugs).len(),
            card.value,
            "card {}",
            card.label
        );
    }
}

#[test]
fn dashboard_counts_for_sample() {
    let sample: Vec<Bug> = serde_json::from_str(
        r#"[
            {"id": 1, "title": "a", "status": "OPEN", "priority": "HIGH"},
            {"id": 2, "title": "b", "status": "CLOSED", "priority": "LOW"},
            {"id": 3, "title": "c", "status": "OPEN", "priority": "CRITICAL", "assignedTo": "Ann"}
        ]"#,
    )
    .unwrap();
    let counts = DashboardCounts::from_bugs(&sample);
    assert_eq!(counts.total, 3);
    assert_eq!(counts.open, 2);
    assert_eq!(counts.high_priority, 2);
    assert_eq!(counts.assigned, 1);
}
