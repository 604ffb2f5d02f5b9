//! Task Endpoints
//! Mission: task CRUD and the status-bucketed board listing

use crate::api::AppState;
use crate::auth::models::Claims;
use crate::error::ApiError;
use crate::messages;
use crate::response::{ok, Envelope};
use crate::tasks::models::{
    CreateTaskRequest, DeleteTaskRequest, Task, TaskListRequest, UpdateTaskDetailsRequest,
    UpdateTaskRequest,
};
use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

/// POST /users/task/add
pub async fn add_task(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    let task = state.tasks.create(&claims.sub, &payload)?;
    info!("📝 Task created: {} ({})", task.title, task.id);

    Ok(ok(messages::TASK_ADDED_SUCC, json!({})))
}

/// POST /users/task/list
///
/// The board is one grouped document; pagination applies after bucketing,
/// over the list of grouped documents. `total_records` counts those
/// documents, not individual tasks.
pub async fn list_tasks(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<TaskListRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    // Absent and non-positive limits both fall back to the default page size.
    let limit = match payload.limit {
        Some(l) if l > 0 => l as usize,
        _ => 10,
    };
    let page = payload.page.unwrap_or(1).max(1) as usize;
    let skip = (page - 1) * limit;

    let board = state.tasks.board_for(&claims.sub)?;

    let boards = vec![board];
    let total_records = boards.len();
    let task_list: Vec<_> = boards.into_iter().skip(skip).take(limit).collect();

    Ok(ok(
        messages::TASK_LIST_SUCC,
        json!({
            "taskList": task_list,
            "total_records": total_records,
        }),
    ))
}

/// POST /users/task/update
pub async fn update_task(
    State(state): State<AppState>,
    _claims: Claims,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    find_task(&state, &payload.id)?;
    state.tasks.set_status(&payload.id, payload.status)?;

    Ok(ok(messages::TASK_UPDATED_SUCC, json!({})))
}

/// POST /users/task/updateTaskDetails
pub async fn update_task_details(
    State(state): State<AppState>,
    _claims: Claims,
    Json(payload): Json<UpdateTaskDetailsRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    find_task(&state, &payload.id)?;
    state.tasks.update_details(&payload)?;

    Ok(ok(messages::TASK_UPDATE_DETAILS_SUCC, json!({})))
}

/// POST /users/task/delete
pub async fn delete_task(
    State(state): State<AppState>,
    _claims: Claims,
    Json(payload): Json<DeleteTaskRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    find_task(&state, &payload.id)?;
    state.tasks.delete(&payload.id)?;
    info!("🗑️  Task deleted: {}", payload.id);

    Ok(ok(messages::TASK_DELETE_SUCC, json!({})))
}

fn find_task(state: &AppState, id: &str) -> Result<Task, ApiError> {
    state
        .tasks
        .find_by_id(id)?
        .ok_or_else(|| ApiError::NotFound(messages::TASK_NOT_FOUND.to_string()))
}
