/// Task endpoints
///
/// Owner-scoped task CRUD. Every handler takes the owner id from the
/// verified token's [`AuthContext`], never from the request body, and
/// every query filters on it — a task belonging to someone else responds
/// exactly like a task that does not exist.
///
/// - `GET    /api/tasks` - List the caller's tasks, newest first
/// - `POST   /api/tasks` - Create a task owned by the caller
/// - `GET    /api/tasks/:id` - Fetch one task
/// - `PUT    /api/tasks/:id` - Partially update one task
/// - `DELETE /api/tasks/:id` - Delete one task
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use focusflow_shared::{
    auth::middleware::AuthContext,
    models::task::{Completion, CreateTask, Priority, Task, UpdateTask},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Uniform 404 message: a foreign-owned id and a missing id are
/// indistinguishable
const TASK_NOT_FOUND: &str = "Task not found";

/// Create task request
///
/// `completed` accepts booleans, 0/1 numbers, and "yes"/"no" strings;
/// the value is normalized before anything touches storage. Any
/// client-supplied owner field is simply not part of this shape.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Priority (defaults to Low)
    #[serde(default)]
    pub priority: Priority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Completion flag in any accepted encoding (defaults to incomplete)
    #[serde(default)]
    pub completed: Completion,
}

/// Update task request - all fields optional, only supplied ones applied
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New priority
    pub priority: Option<Priority>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,

    /// New completion flag in any accepted encoding
    pub completed: Option<Completion>,
}

/// Response carrying a single task
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// Always true
    pub success: bool,

    /// The task
    pub task: Task,
}

/// Response carrying the caller's task list
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// Always true
    pub success: bool,

    /// Tasks owned by the caller, newest-created first
    pub tasks: Vec<Task>,
}

/// Confirmation response for deletes
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Always true
    pub success: bool,

    /// Confirmation message
    pub message: String,
}

/// Lists all tasks owned by the caller, newest-created first
///
/// # Endpoint
///
/// ```text
/// GET /api/tasks
/// Authorization: Bearer <token>
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = Task::list_for_owner(&state.db, auth.user_id).await?;

    Ok(Json(TaskListResponse {
        success: true,
        tasks,
    }))
}

/// Creates a task owned by the caller
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks
/// Authorization: Bearer <token>
///
/// {
///   "title": "Buy milk",
///   "priority": "Low",
///   "dueDate": "2025-06-01T00:00:00Z",
///   "completed": "no"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing or empty title
/// - `401 Unauthorized`: missing or invalid token
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()
        .map_err(|_| ApiError::Validation("Title is required".to_string()))?;

    let task = Task::create_for_owner(
        &state.db,
        auth.user_id,
        CreateTask {
            title: req.title,
            description: req.description,
            priority: req.priority,
            due_date: req.due_date,
            completed: req.completed.as_bool(),
        },
    )
    .await?;

    tracing::info!(user_id = %auth.user_id, task_id = %task.id, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            success: true,
            task,
        }),
    ))
}

/// Fetches a single task owned by the caller
///
/// # Endpoint
///
/// ```text
/// GET /api/tasks/:id
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no such task for this owner (whether the id is
///   missing entirely or belongs to someone else)
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let task = Task::find_for_owner(&state.db, auth.user_id, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    Ok(Json(TaskResponse {
        success: true,
        task,
    }))
}

/// Partially updates a task owned by the caller
///
/// Only the supplied fields are replaced; concurrent updates resolve
/// last-write-wins.
///
/// # Endpoint
///
/// ```text
/// PUT /api/tasks/:id
/// Authorization: Bearer <token>
///
/// { "completed": "Yes" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: empty title supplied
/// - `404 Not Found`: no such task for this owner
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()
        .map_err(|_| ApiError::Validation("Title is required".to_string()))?;

    let update = UpdateTask {
        title: req.title,
        description: req.description,
        priority: req.priority,
        due_date: req.due_date,
        completed: req.completed.map(Completion::as_bool),
    };

    let task = Task::update_for_owner(&state.db, auth.user_id, task_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    tracing::info!(user_id = %auth.user_id, task_id = %task.id, "Task updated");

    Ok(Json(TaskResponse {
        success: true,
        task,
    }))
}

/// Deletes a task owned by the caller
///
/// # Endpoint
///
/// ```text
/// DELETE /api/tasks/:id
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no such task for this owner
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<DeletedResponse>> {
    let deleted = Task::delete_for_owner(&state.db, auth.user_id, task_id).await?;

    if !deleted {
        return Err(ApiError::NotFound(TASK_NOT_FOUND.to_string()));
    }

    tracing::info!(user_id = %auth.user_id, %task_id, "Task deleted");

    Ok(Json(DeletedResponse {
        success: true,
        message: "Task deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_normalizes_completed() {
        let req: CreateTaskRequest = serde_json::from_value(json!({
            "title": "Buy milk",
            "completed": "Yes"
        }))
        .unwrap();
        assert!(req.completed.as_bool());

        let req: CreateTaskRequest = serde_json::from_value(json!({
            "title": "Buy milk",
            "completed": 0
        }))
        .unwrap();
        assert!(!req.completed.as_bool());
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateTaskRequest =
            serde_json::from_value(json!({ "title": "Buy milk" })).unwrap();

        assert_eq!(req.priority, Priority::Low);
        assert!(!req.completed.as_bool());
        assert!(req.description.is_none());
        assert!(req.due_date.is_none());
    }

    #[test]
    fn test_create_request_ignores_owner_field() {
        // A client-supplied owner never reaches the model layer
        let req: CreateTaskRequest = serde_json::from_value(json!({
            "title": "Buy milk",
            "owner": "11111111-1111-1111-1111-111111111111"
        }))
        .unwrap();
        assert_eq!(req.title, "Buy milk");
    }

    #[test]
    fn test_create_request_requires_title() {
        let req: CreateTaskRequest = serde_json::from_value(json!({ "title": "" })).unwrap();
        assert!(req.validate().is_err());

        assert!(serde_json::from_value::<CreateTaskRequest>(json!({})).is_err());
    }

    #[test]
    fn test_update_request_partial_fields() {
        let req: UpdateTaskRequest =
            serde_json::from_value(json!({ "completed": "yes" })).unwrap();

        assert!(req.title.is_none());
        assert!(req.priority.is_none());
        assert_eq!(req.completed.map(Completion::as_bool), Some(true));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_request_camel_case_due_date() {
        let req: UpdateTaskRequest = serde_json::from_value(json!({
            "dueDate": "2025-06-01T00:00:00Z"
        }))
        .unwrap();
        assert!(req.due_date.is_some());
    }

    #[test]
    fn test_update_request_rejects_empty_title() {
        let req: UpdateTaskRequest = serde_json::from_value(json!({ "title": "" })).unwrap();
        assert!(req.validate().is_err());
    }
}
