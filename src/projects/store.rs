//! Project Storage
//! Mission: CRUD and paginated listing for principal-owned projects

use crate::error::ApiError;
use crate::projects::models::{CreateProjectRequest, PaginationRequest, Project, UpdateProjectRequest};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub struct ProjectStore {
    db_path: String,
}

impl ProjectStore {
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
            "CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                user_id TEXT NOT NULL,
                status TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_date TEXT NOT NULL,
                updated_date TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn create(&self, owner_id: &str, body: &CreateProjectRequest) -> Result<Project, ApiError> {
        let now = Utc::now().to_rfc3339();
        let project = Project {
            id: Uuid::new_v4().to_string(),
            title: body.title.clone(),
            description: body.description.clone(),
            start_date: body.start_date.clone(),
            end_date: body.end_date.clone(),
            user_id: owner_id.to_string(),
            status: body.status.clone(),
            is_active: true,
            created_date: now.clone(),
            updated_date: now,
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO projects (id, title, description, start_date, end_date, user_id,
                                   status, is_active, created_date, updated_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                project.id,
                project.title,
                project.description,
                project.start_date,
                project.end_date,
                project.user_id,
                project.status,
                project.is_active,
                project.created_date,
                project.updated_date,
            ],
        )?;

        Ok(project)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Project>, ApiError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, start_date, end_date, user_id, status,
                    is_active, created_date, updated_date
             FROM projects WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], row_to_project) {
            Ok(project) => Ok(Some(project)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Partial update; absent fields keep their value.
    pub fn update(&self, id: &str, body: &UpdateProjectRequest) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE projects SET
                title = COALESCE(?2, title),
                description = COALESCE(?3, description),
                start_date = COALESCE(?4, start_date),
                end_date = COALESCE(?5, end_date),
                status = COALESCE(?6, status),
                is_active = COALESCE(?7, is_active),
                updated_date = ?8
             WHERE id = ?1",
            params![
                id,
                body.title,
                body.description,
                body.start_date,
                body.end_date,
                body.status,
                body.is_active,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// List the principal's projects with search, sorting, and offset/length
    /// pagination. Returns the page plus the total match count before
    /// pagination.
    pub fn list(
        &self,
        owner_id: &str,
        page: &PaginationRequest,
    ) -> Result<(Vec<Project>, i64), ApiError> {
        let conn = self.conn()?;

        let pattern = page
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s.trim())));
        let search_clause = if pattern.is_some() {
            " AND title LIKE ?2 ESCAPE '\\'"
        } else {
            ""
        };

        let order_col = sort_column(page.sort.as_deref());
        let order_dir = match page.dir.as_deref() {
            Some("asc") => "ASC",
            _ => "DESC",
        };

        let start = page.start.unwrap_or(0).max(0);
        let length = page.length.unwrap_or(10).max(0);

        let count_sql = format!("SELECT COUNT(*) FROM projects WHERE user_id = ?1{search_clause}");
        let list_sql = format!(
            "SELECT id, title, description, start_date, end_date, user_id, status,
                    is_active, created_date, updated_date
             FROM projects WHERE user_id = ?1{search_clause}
             ORDER BY {order_col} COLLATE NOCASE {order_dir}
             LIMIT {length} OFFSET {start}"
        );

        let (total, projects) = if let Some(pattern) = pattern {
            let total: i64 =
                conn.query_row(&count_sql, params![owner_id, pattern], |row| row.get(0))?;
            let mut stmt = conn.prepare(&list_sql)?;
            let projects = stmt
                .query_map(params![owner_id, pattern], row_to_project)?
                .collect::<Result<Vec<_>, _>>()?;
            (total, projects)
        } else {
            let total: i64 = conn.query_row(&count_sql, params![owner_id], |row| row.get(0))?;
            let mut stmt = conn.prepare(&list_sql)?;
            let projects = stmt
                .query_map(params![owner_id], row_to_project)?
                .collect::<Result<Vec<_>, _>>()?;
            (total, projects)
        };

        Ok((projects, total))
    }
}

/// Whitelist of sortable columns; anything unrecognized falls back to
/// creation date.
fn sort_column(sort: Option<&str>) -> &'static str {
    match sort {
        Some("title") => "title",
        Some("status") => "status",
        Some("startDate") => "start_date",
        Some("endDate") => "end_date",
        _ => "created_date",
    }
}

fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn row_to_project(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        user_id: row.get(5)?,
        status: row.get(6)?,
        is_active: row.get(7)?,
        created_date: row.get(8)?,
        updated_date: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (ProjectStore, NamedTempFile) {
        let temp = NamedTempFile::new().unwrap();
        let store = ProjectStore::new(temp.path().to_str().unwrap()).unwrap();
        (store, temp)
    }

    fn project(title: &str) -> CreateProjectRequest {
        CreateProjectRequest {
            title: title.to_string(),
            description: "desc".to_string(),
            start_date: "2026-01-01".to_string(),
            end_date: "2026-06-01".to_string(),
            status: "active".to_string(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let (store, _temp) = create_test_store();
        let created = store.create("owner-1", &project("Website")).unwrap();

        let found = store.find_by_id(&created.id).unwrap().unwrap();
        assert_eq!(found.title, "Website");
        assert_eq!(found.user_id, "owner-1");
        assert!(found.is_active);
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let (store, _temp) = create_test_store();
        let created = store.create("owner-1", &project("Website")).unwrap();

        store
            .update(
                &created.id,
                &UpdateProjectRequest {
                    title: Some("Website v2".to_string()),
                    description: None,
                    start_date: None,
                    end_date: None,
                    status: None,
                    is_active: None,
                },
            )
            .unwrap();

        let found = store.find_by_id(&created.id).unwrap().unwrap();
        assert_eq!(found.title, "Website v2");
        assert_eq!(found.description, "desc");
    }

    #[test]
    fn test_list_scoped_to_owner() {
        let (store, _temp) = create_test_store();
        store.create("owner-1", &project("Alpha")).unwrap();
        store.create("owner-1", &project("Beta")).unwrap();
        store.create("owner-2", &project("Gamma")).unwrap();

        let (list, total) = store.list("owner-1", &PaginationRequest::default()).unwrap();
        assert_eq!(total, 2);
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|p| p.user_id == "owner-1"));
    }

    #[test]
    fn test_list_search_and_sort() {
        let (store, _temp) = create_test_store();
        store.create("owner-1", &project("Billing engine")).unwrap();
        store.create("owner-1", &project("billing portal")).unwrap();
        store.create("owner-1", &project("CRM")).unwrap();

        let page = PaginationRequest {
            search: Some("billing".to_string()),
            sort: Some("title".to_string()),
            dir: Some("asc".to_string()),
            ..Default::default()
        };
        let (list, total) = store.list("owner-1", &page).unwrap();
        assert_eq!(total, 2);
        assert_eq!(list[0].title, "Billing engine");
        assert_eq!(list[1].title, "billing portal");
    }

    #[test]
    fn test_list_pagination_window() {
        let (store, _temp) = create_test_store();
        for i in 0..5 {
            store.create("owner-1", &project(&format!("P{i}"))).unwrap();
        }

        let page = PaginationRequest {
            start: Some(2),
            length: Some(2),
            sort: Some("title".to_string()),
            dir: Some("asc".to_string()),
            ..Default::default()
        };
        let (list, total) = store.list("owner-1", &page).unwrap();
        assert_eq!(total, 5);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "P2");
    }

    #[test]
    fn test_search_escapes_like_wildcards() {
        let (store, _temp) = create_test_store();
        store.create("owner-1", &project("50% done")).unwrap();
        store.create("owner-1", &project("fully done")).unwrap();

        let page = PaginationRequest {
            search: Some("50%".to_string()),
            ..Default::default()
        };
        let (list, total) = store.list("owner-1", &page).unwrap();
        assert_eq!(total, 1);
        assert_eq!(list[0].title, "50% done");
    }

    #[test]
    fn test_delete() {
        let (store, _temp) = create_test_store();
        let created = store.create("owner-1", &project("Doomed")).unwrap();
        store.delete(&created.id).unwrap();
        assert!(store.find_by_id(&created.id).unwrap().is_none());
    }
}
