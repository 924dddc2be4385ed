//! In-memory stand-ins for the two services, shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use bugdash::ai::{SuggestRequest, SuggestionService};
use bugdash::api::{ApiError, BugService};
use bugdash::model::{
    AiSuggestion, Bug, BugId, BugUpdate, Employee, NewBug, Priority, RecordId, Status,
};

pub fn bug(id: u64, title: &str, status: Status, priority: Priority) -> Bug {
    Bug {
        id: RecordId::from(id),
        title: title.to_string(),
        description: format!("{title} description"),
        status,
        priority,
        assigned_to: None,
        resolution: None,
        created_date: Some("2024-03-01T14:05:00".to_string()),
        updated_date: None,
    }
}

pub fn assigned(mut bug: Bug, name: &str) -> Bug {
    bug.assigned_to = Some(name.to_string());
    bug
}

pub fn employee(id: u64, name: &str, availability: &str) -> Employee {
    Employee {
        id: RecordId::from(id),
        name: name.to_string(),
        availability_status: Some(availability.to_string()),
    }
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        message: message.to_string(),
    }
}

/// Bug service backed by a vector. Every call is recorded as `METHOD /path`.
#[derive(Default)]
pub struct FakeBugs {
    pub bugs: RefCell<Vec<Bug>>,
    pub employees: Vec<Employee>,
    /// Returned by every read when set.
    pub read_failure: Option<ApiError>,
    /// Returned by every write when set.
    pub write_failure: Option<ApiError>,
    pub employees_failure: Option<ApiError>,
    pub calls: RefCell<Vec<String>>,
    pub next_id: Cell<u64>,
}

impl FakeBugs {
    pub fn with(bugs: Vec<Bug>) -> Self {
        Self {
            bugs: RefCell::new(bugs),
            next_id: Cell::new(100),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn find(&self, id: &BugId) -> Option<Bug> {
        self.bugs.borrow().iter().find(|b| &b.id == id).cloned()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            message: "Bug not found".to_string(),
        }
    }
}

impl BugService for FakeBugs {
    fn list_bugs(&self) -> Result<Vec<Bug>, ApiError> {
        self.record("GET /bugs".into());
        match &self.read_failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.bugs.borrow().clone()),
        }
    }

    fn get_bug(&self, id: &BugId) -> Result<Bug, ApiError> {
        self.record(format!("GET /bugs/{id}"));
        if let Some(err) = &self.read_failure {
            return Err(err.clone());
        }
        self.find(id).ok_or_else(Self::not_found)
    }

    fn create_bug(&self, new: &NewBug) -> Result<Bug, ApiError> {
        self.record("POST /bugs".into());
        if let Some(err) = &self.write_failure {
            return Err(err.clone());
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = Bug {
            id: RecordId::from(id),
            title: new.title.clone(),
            description: new.description.clone(),
            status: new.status,
            priority: new.priority,
            assigned_to: new.assigned_to.clone(),
            resolution: None,
            created_date: None,
            updated_date: None,
        };
        self.bugs.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_bug(&self, id: &BugId, update: &BugUpdate) -> Result<Bug, ApiError> {
        self.record(format!("PUT /bugs/{id}"));
        if let Some(err) = &self.write_failure {
            return Err(err.clone());
        }
        let mut bugs = self.bugs.borrow_mut();
        let bug = bugs
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(Self::not_found)?;
        bug.title = update.title.clone();
        bug.description = update.description.clone();
        bug.status = update.status;
        bug.priority = update.priority;
        bug.assigned_to = update.assigned_to.clone();
        Ok(bug.clone())
    }

    fn delete_bug(&self, id: &BugId) -> Result<(), ApiError> {
        self.record(format!("DELETE /bugs/{id}"));
        if let Some(err) = &self.write_failure {
            return Err(err.clone());
        }
        let mut bugs = self.bugs.borrow_mut();
        let before = bugs.len();
        bugs.retain(|b| &b.id != id);
        if bugs.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.record("GET /employees".into());
        match &self.employees_failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.employees.clone()),
        }
    }

    fn is_healthy(&self) -> bool {
        self.read_failure.is_none()
    }
}

/// AI service answering every request with the same result.
pub struct FakeAi {
    pub result: Result<AiSuggestion, ApiError>,
    pub requests: RefCell<Vec<SuggestRequest>>,
}

impl FakeAi {
    pub fn answering(text: &str, priority: Priority) -> Self {
        Self {
            result: Ok(AiSuggestion {
                suggestion: text.to_string(),
                predicted_priority: priority,
            }),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(err: ApiError) -> Self {
        Self {
            result: Err(err),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl SuggestionService for FakeAi {
    fn suggest(&self, request: &SuggestRequest) -> Result<AiSuggestion, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        self.result.clone()
    }

    fn is_healthy(&self) -> bool {
        self.result.is_ok()
    }
}
