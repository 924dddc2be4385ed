//! Addressable views and their URLs.
//!
//! Both surfaces share these: the web server maps request paths to routes,
//! and view flows answer "navigate to" with a route.

use url::form_urlencoded;

use super::filter::{BugFilter, PriorityFilter, StatusFilter};
use crate::model::BugId;

/// How the list view lays out bugs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Table,
    Cards,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Cards => "cards",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cards" | "card" | "grid" => Self::Cards,
            _ => Self::Table,
        }
    }
}

/// Initial state of the list view, as carried in its query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: BugFilter,
    pub mode: RenderMode,
}

impl ListQuery {
    /// Seed from `status`, `priority`, `search`, `assigned` and `view`.
    /// Unknown values fall back to the defaults.
    pub fn from_query(query: &str) -> Self {
        let mut seed = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "status" => seed.filter.status = value.parse().unwrap_or_default(),
                "priority" => seed.filter.priority = value.parse().unwrap_or_default(),
                "search" => seed.filter.search = value.into_owned(),
                "assigned" => seed.filter.assigned_only = value == "true" || value == "1",
                "view" => seed.mode = RenderMode::parse(&value),
                _ => {}
            }
        }
        seed
    }

    /// Query string for the non-default parts, without the leading `?`.
    pub fn to_query(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if !self.filter.search.is_empty() {
            out.append_pair("search", &self.filter.search);
        }
        if self.filter.status != StatusFilter::All {
            out.append_pair("status", &self.filter.status.to_string());
        }
        if self.filter.priority != PriorityFilter::All {
            out.append_pair("priority", &self.filter.priority.to_string());
        }
        if self.filter.assigned_only {
            out.append_pair("assigned", "true");
        }
        if self.mode != RenderMode::Table {
            out.append_pair("view", self.mode.as_str());
        }
        out.finish()
    }
}

/// Every page of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    List(ListQuery),
    Create,
    Edit(BugId),
    Detail(BugId),
}

impl Route {
    /// Path plus query string.
    pub fn href(&self) -> String {
        match self {
            Self::Dashboard => "/".to_string(),
            Self::List(query) => {
                let qs = query.to_query();
                if qs.is_empty() {
                    "/bugs".to_string()
                } else {
                    format!("/bugs?{qs}")
                }
            }
            Self::Create => "/create".to_string(),
            Self::Edit(id) => format!("/edit/{}", id.path_segment()),
            Self::Detail(id) => format!("/bugs/{}", id.path_segment()),
        }
    }

    /// Resolve a request path (without query) to a page route.
    pub fn from_path(path: &str, query: &str) -> Option<Self> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            [""] => Some(Self::Dashboard),
            ["bugs"] => Some(Self::List(ListQuery::from_query(query))),
            ["create"] => Some(Self::Create),
            ["edit", id] if !id.is_empty() => Some(Self::Edit(decode_segment(id))),
            ["bugs", id] if !id.is_empty() => Some(Self::Detail(decode_segment(id))),
            _ => None,
        }
    }
}

/// Decode one percent-encoded path segment into an id.
pub fn decode_segment(raw: &str) -> BugId {
    BugId::from_path_segment(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};

    #[test]
    fn list_query_seeds_filters() {
        let q = ListQuery::from_query("status=OPEN&priority=HIGH&view=cards&search=log+in");
        assert_eq!(q.filter.status, StatusFilter::Only(Status::Open));
        assert_eq!(q.filter.priority, PriorityFilter::Only(Priority::High));
        assert_eq!(q.filter.search, "log in");
        assert_eq!(q.mode, RenderMode::Cards);
    }

    #[test]
    fn unknown_query_values_fall_back() {
        let q = ListQuery::from_query("status=WHATEVER&priority=&assigned=no");
        assert_eq!(q, ListQuery::default());
    }

    #[test]
    fn list_href_round_trips() {
        let route = Route::from_path("/bugs", "priority=HIGH&assigned=true").unwrap();
        assert_eq!(route.href(), "/bugs?priority=HIGH&assigned=true");
        assert_eq!(Route::List(ListQuery::default()).href(), "/bugs");
    }

    #[test]
    fn paths_resolve_to_routes() {
        assert_eq!(Route::from_path("/", ""), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/create", ""), Some(Route::Create));
        assert_eq!(
            Route::from_path("/edit/7", ""),
            Some(Route::Edit(BugId::from(7)))
        );
        assert_eq!(
            Route::from_path("/bugs/BUG%2D3", ""),
            Some(Route::Detail(BugId::from("BUG-3")))
        );
        assert_eq!(Route::from_path("/nope", ""), None);
    }

    #[test]
    fn reserved_characters_stay_inside_the_id() {
        let route = Route::from_path("/bugs/7%3Fx%2Fy", "").unwrap();
        assert_eq!(route, Route::Detail(BugId::from("7?x/y")));
        assert_eq!(route.href(), "/bugs/7%3Fx%2Fy");
        assert_eq!(
            Route::from_path("/edit/a+b", ""),
            Some(Route::Edit(BugId::from("a+b")))
        );
        assert_eq!(Route::from_path("/bugs/1/extra", ""), None);
    }
}
