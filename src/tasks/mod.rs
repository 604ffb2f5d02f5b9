//! Task Module
//! Mission: tasks with status buckets and board-style listing

pub mod models;
pub mod store;

pub use models::{
    CreateTaskRequest, DeleteTaskRequest, Task, TaskBoard, TaskListRequest, TaskStatus,
    TaskSummary, UpdateTaskDetailsRequest, UpdateTaskRequest,
};
pub use store::TaskStore;
