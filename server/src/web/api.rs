use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::task::{TaskState, api as task_api};

/// OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    paths(
        task_api::list_tasks_handler,
        task_api::get_task_handler,
        task_api::create_task_handler,
        task_api::update_task_handler,
        task_api::delete_task_handler,
    ),
    tags(
        (name = "Tasks", description = "Travel task CRUD endpoints")
    )
)]
pub struct ApiDoc;

/// Creates the API routes for JSON API endpoints, with the OpenAPI document
/// and Swagger UI mounted alongside them.
pub fn create_api_router(task_state: TaskState) -> axum::Router {
    let tasks_router = task_api::create_api_router(task_state);
    axum::Router::new()
        .merge(tasks_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
