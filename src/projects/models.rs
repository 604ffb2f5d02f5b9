//! Project Models

use serde::{Deserialize, Serialize};

/// A project owned by a principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    /// Owning principal id.
    pub user_id: String,
    pub status: String,
    pub is_active: bool,
    pub created_date: String,
    pub updated_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
}

/// Listing parameters in the datatable shape the frontend sends.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationRequest {
    pub search: Option<String>,
    /// Row offset.
    pub start: Option<i64>,
    /// Page size.
    pub length: Option<i64>,
    /// Sort column name (wire-level, camelCase).
    pub sort: Option<String>,
    /// "asc" or "desc".
    pub dir: Option<String>,
}
