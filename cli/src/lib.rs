use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task as the server represents it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub is_completed: bool,
}

/// Payload for creating or replacing a task. The server assigns the ID.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub is_completed: bool,
}

/// Error type for client-side form validation.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be at least 3 characters")]
    TitleTooShort,
    #[error("Description must be less than 500 characters")]
    DescriptionTooLong,
}

/// Checks the rules the web form enforced before a task is sent to the
/// server. The server itself accepts anything.
pub fn validate_form(title: &str, description: &str) -> Result<(), FormError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(FormError::TitleRequired);
    }
    if title.chars().count() < 3 {
        return Err(FormError::TitleTooShort);
    }
    if description.trim().chars().count() > 500 {
        return Err(FormError::DescriptionTooLong);
    }
    Ok(())
}

/// Error type for API client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents a task not found error.
    #[error("No task with ID {0}")]
    NotFound(u32),
    /// Represents an unexpected response from the server.
    #[error("Unexpected status {0} from server")]
    UnexpectedStatus(reqwest::StatusCode),
    /// Represents a transport or decoding error.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Blocking HTTP client for the task API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches all tasks.
    pub fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self
            .http
            .get(self.url("/tasks"))
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    /// Fetches a single task by its ID.
    pub fn get_task(&self, id: u32) -> Result<Task, ApiError> {
        let response = self.http.get(self.url(&format!("/tasks/{id}"))).send()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        Ok(response.error_for_status()?.json()?)
    }

    /// Creates a task dated now and not yet completed, as the web form did.
    pub fn create_task(&self, title: String, description: String) -> Result<Task, ApiError> {
        let payload = TaskPayload {
            title,
            description,
            date: Utc::now(),
            is_completed: false,
        };
        let response = self
            .http
            .post(self.url("/tasks"))
            .json(&payload)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    /// Replaces every field of an existing task.
    pub fn update_task(&self, id: u32, payload: &TaskPayload) -> Result<(), ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/tasks/{id}")))
            .json(payload)
            .send()?;
        match response.status() {
            reqwest::StatusCode::NO_CONTENT => Ok(()),
            reqwest::StatusCode::NOT_FOUND => Err(ApiError::NotFound(id)),
            status => Err(ApiError::UnexpectedStatus(status)),
        }
    }

    /// Deletes a task by its ID.
    pub fn delete_task(&self, id: u32) -> Result<(), ApiError> {
        let response = self.http.delete(self.url(&format!("/tasks/{id}"))).send()?;
        match response.status() {
            reqwest::StatusCode::NO_CONTENT => Ok(()),
            reqwest::StatusCode::NOT_FOUND => Err(ApiError::NotFound(id)),
            status => Err(ApiError::UnexpectedStatus(status)),
        }
    }

    /// Flips the completion flag by fetching the task and PUT-ting it back
    /// with the other fields untouched.
    pub fn toggle_task_completion(&self, id: u32) -> Result<Task, ApiError> {
        let task = self.get_task(id)?;
        let payload = TaskPayload {
            title: task.title.clone(),
            description: task.description.clone(),
            date: task.date,
            is_completed: !task.is_completed,
        };
        self.update_task(id, &payload)?;
        Ok(Task {
            is_completed: payload.is_completed,
            ..task
        })
    }
}
