use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

pub mod api;

#[derive(Debug, PartialEq, Clone)]
pub struct Task {
    id: u32,
    title: String,
    description: String,
    date: DateTime<Utc>,
    is_completed: bool,
}

impl Task {
    pub fn new(
        id: u32,
        title: String,
        description: String,
        date: DateTime<Utc>,
        is_completed: bool,
    ) -> Self {
        Self {
            id,
            title,
            description,
            date,
            is_completed,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the date the task is scheduled for.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Returns whether the task has been completed.
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }
}

/// Input for creating or replacing a task. The store assigns the ID.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub is_completed: bool,
}

/// Error type for TaskStore operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskStoreError {
    /// Represents a task not found error.
    #[error("Task with ID {0} not found")]
    TaskNotFound(u32),
}

struct StoreInner {
    tasks: Vec<Task>,
    next_id: u32,
}

/// In-memory store owning the task collection and the ID counter.
///
/// All operations go through a single lock so each one is atomic with
/// respect to the others; the counter is incremented under the same write
/// lock as the list mutation. Contents live for the process lifetime.
pub struct TaskStore {
    inner: RwLock<StoreInner>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store holding the two example tasks the server starts with.
    pub fn seeded() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                tasks: vec![
                    Task::new(
                        1,
                        "Book Flight to Vienna".to_string(),
                        "Flight via Austrian Airlines".to_string(),
                        Utc::now() + Duration::days(10),
                        false,
                    ),
                    Task::new(
                        2,
                        "Hotel Reservation".to_string(),
                        "Confirm booking at Hotel Sacher".to_string(),
                        Utc::now() + Duration::days(11),
                        false,
                    ),
                ],
                next_id: 3,
            }),
        }
    }

    /// Retrieves all tasks in insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Vec<Task> {
        self.inner.read().await.tasks.clone()
    }

    /// Retrieves a task by its ID.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Task` if it exists, or `TaskNotFound` otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: u32) -> Result<Task, TaskStoreError> {
        self.inner
            .read()
            .await
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(TaskStoreError::TaskNotFound(id))
    }

    /// Creates a new task from the draft, assigning the next ID.
    ///
    /// IDs start at 1 and are never reused, even after a delete. Any ID a
    /// client supplied alongside the draft has already been discarded at the
    /// API boundary.
    ///
    /// # Returns
    ///
    /// The stored `Task`, including its assigned ID.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, draft: TaskDraft) -> Task {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let task = Task::new(
            id,
            draft.title,
            draft.description,
            draft.date,
            draft.is_completed,
        );
        inner.tasks.push(task.clone());
        task
    }

    /// Replaces every field of the task with the given ID, keeping the ID
    /// itself and the task's position in the collection.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or `TaskNotFound` if no task has this ID; the
    /// collection is left untouched in that case.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: u32, draft: TaskDraft) -> Result<(), TaskStoreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskStoreError::TaskNotFound(id))?;
        inner.tasks[index] = Task::new(
            id,
            draft.title,
            draft.description,
            draft.date,
            draft.is_completed,
        );
        Ok(())
    }

    /// Deletes the task with the given ID.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or `TaskNotFound` if no task has this ID.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: u32) -> Result<(), TaskStoreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskStoreError::TaskNotFound(id))?;
        inner.tasks.remove(index);
        Ok(())
    }
}

/// Shared state handed to the task routes.
#[derive(Clone)]
pub struct TaskState {
    pub store: Arc<TaskStore>,
}
