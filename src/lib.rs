//! TaskPilot Backend Library
//!
//! Multi-tenant task/project-management backend: admin authentication,
//! user signup/signin, project and task CRUD, and a stub chat gateway.
//! Exposes the modules for the binary and the integration tests.

pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod messages;
pub mod projects;
pub mod response;
pub mod tasks;
