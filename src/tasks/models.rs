//! Task Models

use serde::{Deserialize, Serialize};

/// Fixed status buckets a task moves through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "inProgress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "expired")]
    Expired,
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::Completed => "completed",
            TaskStatus::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "inProgress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            "expired" => Some(TaskStatus::Expired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    /// Principal the task is assigned to, if any.
    pub assigned_to: Option<String>,
    /// Principal who created the task.
    pub developer_id: String,
    pub project_id: Option<String>,
    pub created_date: String,
    pub updated_date: String,
    pub in_progress_date: Option<String>,
}

/// One entry of a status bucket, with the assignee joined in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_id: Option<String>,
    pub created_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_progress_date: Option<String>,
}

/// The grouped listing document: every task of the principal, bucketed by
/// status in a single pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBoard {
    pub todo_tasks: Vec<TaskSummary>,
    pub in_progress_tasks: Vec<TaskSummary>,
    pub completed_tasks: Vec<TaskSummary>,
    pub expired_tasks: Vec<TaskSummary>,
}

// ===== Request bodies =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskListRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: String,
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskDetailsRequest {
    pub id: String,
    pub title: Option<String>,
    pub assigned_to: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTaskRequest {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            r#""inProgress""#
        );
        let status: TaskStatus = serde_json::from_str(r#""expired""#).unwrap();
        assert_eq!(status, TaskStatus::Expired);
        assert!(serde_json::from_str::<TaskStatus>(r#""done""#).is_err());
    }

    #[test]
    fn test_board_serializes_bucket_names() {
        let board = TaskBoard::default();
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("todoTasks"));
        assert!(json.contains("inProgressTasks"));
        assert!(json.contains("completedTasks"));
        assert!(json.contains("expiredTasks"));
    }
}
