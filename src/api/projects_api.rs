//! Project Endpoints
//! Mission: project CRUD scoped to the authenticated principal

use crate::api::users_api::require_principal;
use crate::api::AppState;
use crate::auth::models::Claims;
use crate::error::ApiError;
use crate::messages;
use crate::projects::models::{CreateProjectRequest, PaginationRequest, UpdateProjectRequest};
use crate::projects::Project;
use crate::response::{ok, Envelope};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

/// POST /users/project/add
pub async fn add_project(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    require_principal(&state, &claims)?;

    let project = state.projects.create(&claims.sub, &payload)?;
    info!("📁 Project created: {} ({})", project.title, project.id);

    Ok(ok(messages::PROJECT_ADDED_SUCC, json!({})))
}

/// POST /users/project/edit/:id
pub async fn edit_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    require_principal(&state, &claims)?;

    let project = find_owned(&state, &id, &claims.sub)?;
    state.projects.update(&project.id, &payload)?;

    Ok(ok(messages::PROJECT_UPDATED_SUCC, json!({})))
}

/// GET /users/project/view/:id
pub async fn view_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Project>>, ApiError> {
    let project = state
        .projects
        .find_by_id(&id)?
        .ok_or_else(|| ApiError::NotFound(messages::PROJECT_NOT_FOUND.to_string()))?;

    Ok(ok(messages::PROJECT_VIEW_SUCC, project))
}

/// POST /users/project/list
pub async fn list_projects(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<PaginationRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    require_principal(&state, &claims)?;

    let (list, total_records) = state.projects.list(&claims.sub, &payload)?;

    Ok(ok(
        messages::PROJECT_LIST_SUCC,
        json!({
            "list": list,
            "total_records": total_records,
        }),
    ))
}

/// DELETE /users/project/delete/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
) -> Result<Json<Envelope<Value>>, ApiError> {
    require_principal(&state, &claims)?;

    let project = find_owned(&state, &id, &claims.sub)?;
    state.projects.delete(&project.id)?;
    info!("🗑️  Project deleted: {}", project.id);

    Ok(ok(messages::PROJECT_DELETED_SUCC, json!({})))
}

/// Resolve the project and enforce ownership: mutating someone else's
/// project is rejected, and the record stays unchanged.
fn find_owned(state: &AppState, id: &str, principal_id: &str) -> Result<Project, ApiError> {
    let project = state
        .projects
        .find_by_id(id)?
        .ok_or_else(|| ApiError::NotFound(messages::PROJECT_NOT_FOUND.to_string()))?;

    if project.user_id != principal_id {
        return Err(ApiError::BadRequest(
            messages::PROJECT_IS_NOT_LINKED.to_string(),
        ));
    }

    Ok(project)
}
