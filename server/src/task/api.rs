use crate::task::{Task, TaskDraft, TaskState, TaskStoreError};
use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON representation of a task for API responses.
///
/// The field names are the wire contract shared with the clients and must
/// stay camelCase.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    /// Unique identifier assigned by the store
    id: u32,
    /// Short label for the task
    title: String,
    /// Free-form details, may be empty
    description: String,
    /// When the task is scheduled, ISO-8601
    date: DateTime<Utc>,
    /// Whether the task is done
    is_completed: bool,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_string(),
            description: task.description().to_string(),
            date: task.date(),
            is_completed: task.is_completed(),
        }
    }
}

/// Incoming task payload for create and replace requests.
///
/// Any `id` a client sends is discarded; the store assigns IDs. Missing
/// fields fall back to explicit defaults (empty strings, not completed,
/// current time) so behavior stays deterministic rather than leaning on
/// deserializer quirks.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "Utc::now")]
    date: DateTime<Utc>,
    #[serde(default)]
    is_completed: bool,
}

impl From<TaskPayload> for TaskDraft {
    fn from(payload: TaskPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            date: payload.date,
            is_completed: payload.is_completed,
        }
    }
}

/// Error type for task handler operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskApiError {
    /// Represents a task store error.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

impl IntoResponse for TaskApiError {
    fn into_response(self) -> Response {
        match self {
            // The contract pins unknown IDs to a bare 404 with an empty body.
            TaskApiError::Store(TaskStoreError::TaskNotFound(_)) => {
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }
}

/// Handler for GET /tasks - returns every task in insertion order.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "All tasks in insertion order", body = [TaskJson])
    ),
    tag = "Tasks"
)]
pub async fn list_tasks_handler(State(state): State<TaskState>) -> Json<Vec<TaskJson>> {
    let tasks = state
        .store
        .list()
        .await
        .into_iter()
        .map(TaskJson::from)
        .collect();
    Json(tasks)
}

/// Handler for GET /tasks/{id} - returns a single task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    params(
        ("id" = u32, Path, description = "Task identifier")
    ),
    responses(
        (status = 200, description = "The task with this ID", body = TaskJson),
        (status = 404, description = "No task with this ID")
    ),
    tag = "Tasks"
)]
pub async fn get_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<u32>,
) -> Result<Json<TaskJson>, TaskApiError> {
    let task = state.store.get_by_id(id).await?;
    Ok(Json(TaskJson::from(task)))
}

/// Handler for POST /tasks - creates a task and points at it via the
/// Location header.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = TaskPayload,
    responses(
        (status = 201, description = "Task created", body = TaskJson,
            headers(("Location" = String, description = "URL of the created task")))
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<TaskState>,
    Json(payload): Json<TaskPayload>,
) -> impl IntoResponse {
    let task = state.store.create(TaskDraft::from(payload)).await;
    let location = format!("/tasks/{}", task.id());
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TaskJson::from(task)),
    )
}

/// Handler for PUT /tasks/{id} - replaces every field of the task except
/// its ID.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    params(
        ("id" = u32, Path, description = "Task identifier")
    ),
    request_body = TaskPayload,
    responses(
        (status = 204, description = "Task replaced"),
        (status = 404, description = "No task with this ID")
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<u32>,
    Json(payload): Json<TaskPayload>,
) -> Result<StatusCode, TaskApiError> {
    state.store.update(id, TaskDraft::from(payload)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /tasks/{id} - removes the task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(
        ("id" = u32, Path, description = "Task identifier")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "No task with this ID")
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, TaskApiError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Creates and returns the tasks API router.
pub fn create_api_router(state: TaskState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/tasks/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}
