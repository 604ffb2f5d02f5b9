//! HTTP API
//! Mission: route table, shared state, and the handler modules

pub mod admin_api;
pub mod projects_api;
pub mod tasks_api;
pub mod users_api;

use crate::auth::{auth_gate, TokenService, UserStore};
use crate::chat::gateway::chat_handler;
use crate::config::AppConfig;
use crate::projects::ProjectStore;
use crate::tasks::TaskStore;
use axum::{
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<UserStore>,
    pub projects: Arc<ProjectStore>,
    pub tasks: Arc<TaskStore>,
    pub tokens: Arc<TokenService>,
}

/// Create the API router. Public routes bypass the gate; everything under
/// the protected tree passes through it first.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/admin/login", post(admin_api::login))
        .route("/admin/forgotPassword", post(admin_api::forgot_password))
        .route("/admin/resetPassword", post(admin_api::reset_password))
        .route("/users/signUp", post(users_api::sign_up))
        .route("/users/signIn", post(users_api::sign_in))
        .route("/ws", get(chat_handler));

    let protected_routes = Router::new()
        .route("/users/update", post(users_api::update_user))
        .route("/users/view", get(users_api::view_user))
        .route("/users/project/add", post(projects_api::add_project))
        .route("/users/project/edit/:id", post(projects_api::edit_project))
        .route("/users/project/list", post(projects_api::list_projects))
        .route("/users/project/view/:id", get(projects_api::view_project))
        .route(
            "/users/project/delete/:id",
            delete(projects_api::delete_project),
        )
        .route("/users/task/add", post(tasks_api::add_task))
        .route("/users/task/list", post(tasks_api::list_tasks))
        .route("/users/task/update", post(tasks_api::update_task))
        .route(
            "/users/task/updateTaskDetails",
            post(tasks_api::update_task_details),
        )
        .route("/users/task/delete", post(tasks_api::delete_task))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_gate));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
