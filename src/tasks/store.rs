//! Task Storage
//! Mission: task CRUD plus the single-pass status-bucketed board query

use crate::error::ApiError;
use crate::tasks::models::{
    CreateTaskRequest, Task, TaskBoard, TaskStatus, TaskSummary, UpdateTaskDetailsRequest,
};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub struct TaskStore {
    db_path: String,
}

impl TaskStore {
    pub fn new(db_path: &str) -> Result<Self, ApiError> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn conn(&self) -> Result<Connection, ApiError> {
        Ok(Connection::open(&self.db_path)?)
    }

    fn init_db(&self) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'todo',
                assigned_to TEXT,
                developer_id TEXT NOT NULL,
                project_id TEXT,
                created_date TEXT NOT NULL,
                updated_date TEXT NOT NULL,
                in_progress_date TEXT
            )",
            [],
        )?;
        Ok(())
    }

    pub fn create(&self, creator_id: &str, body: &CreateTaskRequest) -> Result<Task, ApiError> {
        let now = Utc::now().to_rfc3339();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: body.title.clone(),
            status: body.status.unwrap_or(TaskStatus::Todo),
            assigned_to: body.assigned_to.clone(),
            developer_id: creator_id.to_string(),
            project_id: body.project_id.clone(),
            created_date: now.clone(),
            updated_date: now,
            in_progress_date: None,
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO tasks (id, title, status, assigned_to, developer_id, project_id,
                                created_date, updated_date, in_progress_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.title,
                task.status.as_str(),
                task.assigned_to,
                task.developer_id,
                task.project_id,
                task.created_date,
                task.updated_date,
                task.in_progress_date,
            ],
        )?;

        Ok(task)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Task>, ApiError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, status, assigned_to, developer_id, project_id,
                    created_date, updated_date, in_progress_date
             FROM tasks WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], row_to_task) {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Move a task to a new status. The in-progress timestamp is refreshed
    /// on every status change, not only on the move into inProgress.
    pub fn set_status(&self, id: &str, status: TaskStatus) -> Result<(), ApiError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn()?;
        conn.execute(
            "UPDATE tasks SET status = ?2, in_progress_date = ?3, updated_date = ?3
             WHERE id = ?1",
            params![id, status.as_str(), now],
        )?;
        Ok(())
    }

    /// Partial detail update (title, assignee, project).
    pub fn update_details(&self, body: &UpdateTaskDetailsRequest) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE tasks SET
                title = COALESCE(?2, title),
                assigned_to = COALESCE(?3, assigned_to),
                project_id = COALESCE(?4, project_id),
                updated_date = ?5
             WHERE id = ?1",
            params![
                body.id,
                body.title,
                body.assigned_to,
                body.project_id,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Build the board for a principal: every task they created or are
    /// assigned to, with the assignee's display name joined in, bucketed by
    /// status in one pass.
    pub fn board_for(&self, principal_id: &str) -> Result<TaskBoard, ApiError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT t.id, t.title, t.status, t.assigned_to, t.created_date, t.in_progress_date,
                    u.first_name, u.last_name
             FROM tasks t
             LEFT JOIN users u ON u.id = t.assigned_to
             WHERE t.developer_id = ?1 OR t.assigned_to = ?1
             ORDER BY t.created_date",
        )?;

        let rows = stmt.query_map(params![principal_id], |row| {
            let status_str: String = row.get(2)?;
            let first: Option<String> = row.get(6)?;
            let last: Option<String> = row.get(7)?;
            let assigned_name = first.map(|f| match last {
                Some(l) => format!("{f} {l}"),
                None => f,
            });
            Ok(TaskSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                status: TaskStatus::from_str(&status_str).unwrap_or(TaskStatus::Todo),
                assigned_name,
                assigned_id: row.get(3)?,
                created_date: row.get(4)?,
                in_progress_date: row.get(5)?,
            })
        })?;

        let mut board = TaskBoard::default();
        for row in rows {
            let summary = row?;
            match summary.status {
                TaskStatus::Todo => board.todo_tasks.push(summary),
                TaskStatus::InProgress => board.in_progress_tasks.push(summary),
                TaskStatus::Completed => board.completed_tasks.push(summary),
                TaskStatus::Expired => board.expired_tasks.push(summary),
            }
        }

        Ok(board)
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let status_str: String = row.get(2)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        status: TaskStatus::from_str(&status_str).unwrap_or(TaskStatus::Todo),
        assigned_to: row.get(3)?,
        developer_id: row.get(4)?,
        project_id: row.get(5)?,
        created_date: row.get(6)?,
        updated_date: row.get(7)?,
        in_progress_date: row.get(8)?,
    })
}
