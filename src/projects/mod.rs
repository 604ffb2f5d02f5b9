//! Project Management Module
//! Mission: principal-owned project records

pub mod models;
pub mod store;

pub use models::{CreateProjectRequest, PaginationRequest, Project, UpdateProjectRequest};
pub use store::ProjectStore;
