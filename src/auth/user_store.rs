//! Credential Store
//! Mission: persist admin and user principals in one SQLite table

use crate::auth::models::{NewPrincipal, Principal, Role, UpdateUserRequest};
use crate::error::ApiError;
use crate::messages;
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::info;
use uuid::Uuid;

/// Principal storage with a SQLite backend. One connection is opened per
/// operation; concurrent access is left to SQLite's own locking.
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a store and initialize its schema.
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

        // Email carries a UNIQUE constraint so a signup race cannot create
        // two principals with the same address; a violation surfaces as the
        // duplicate-email error.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                country_code TEXT,
                phone_number TEXT,
                address TEXT,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                reset_token TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_date TEXT NOT NULL,
                updated_date TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Ensure the initial admin principal exists. Idempotent: a second run
    /// against the same database is a no-op.
    pub fn ensure_admin(&self, email: &str, password: &str, cost: u32) -> Result<(), ApiError> {
        if self.find_active_by_email(email)?.is_some() {
            info!("{}", messages::ADMIN_USER_ALREADY_LOADED);
            return Ok(());
        }

        let password_hash = bcrypt::hash(password, cost)?;
        self.create(NewPrincipal {
            first_name: "Super".to_string(),
            last_name: "Admin".to_string(),
            email: email.to_string(),
            country_code: None,
            phone_number: None,
            address: None,
            password_hash,
            role: Role::Admin,
        })?;

        info!("🔐 {}", messages::ADMIN_USER_LOADED_SUCC);
        Ok(())
    }

    /// Insert a new principal. Emails are normalized to lowercase at write
    /// time; a duplicate maps to `AlreadyExists`.
    pub fn create(&self, new: NewPrincipal) -> Result<Principal, ApiError> {
        let now = Utc::now().to_rfc3339();
        let principal = Principal {
            id: Uuid::new_v4().to_string(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email.to_lowercase(),
            country_code: new.country_code,
            phone_number: new.phone_number,
            address: new.address,
            password_hash: new.password_hash,
            role: new.role,
            reset_token: None,
            is_active: true,
            is_deleted: false,
            created_date: now.clone(),
            updated_date: now,
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (id, first_name, last_name, email, country_code, phone_number,
                                address, password_hash, role, reset_token, is_active, is_deleted,
                                created_date, updated_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                principal.id,
                principal.first_name,
                principal.last_name,
                principal.email,
                principal.country_code,
                principal.phone_number,
                principal.address,
                principal.password_hash,
                principal.role.as_str(),
                principal.reset_token,
                principal.is_active,
                principal.is_deleted,
                principal.created_date,
                principal.updated_date,
            ],
        )?;

        info!("✅ Created principal: {} ({})", principal.email, principal.role.as_str());

        Ok(principal)
    }

    /// Lookup by id, regardless of account state. The gate inspects the
    /// state flags itself.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Principal>, ApiError> {
        self.find_one("id = ?1", id)
    }

    /// Lookup by email for sign-in and signup checks; deleted accounts are
    /// invisible here.
    pub fn find_by_email(&self, email: &str) -> Result<Option<Principal>, ApiError> {
        self.find_one("email = ?1 AND is_deleted = 0", &email.to_lowercase())
    }

    /// Lookup by email for the admin flows, which only consider active
    /// accounts.
    pub fn find_active_by_email(&self, email: &str) -> Result<Option<Principal>, ApiError> {
        self.find_one("email = ?1 AND is_active = 1", &email.to_lowercase())
    }

    pub fn find_by_reset_token(&self, token: &str) -> Result<Option<Principal>, ApiError> {
        self.find_one("reset_token = ?1", token)
    }

    fn find_one(&self, predicate: &str, value: &str) -> Result<Option<Principal>, ApiError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT id, first_name, last_name, email, country_code, phone_number, address,
                    password_hash, role, reset_token, is_active, is_deleted,
                    created_date, updated_date
             FROM users WHERE {predicate}"
        );
        let mut stmt = conn.prepare(&sql)?;

        match stmt.query_row(params![value], row_to_principal) {
            Ok(principal) => Ok(Some(principal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a partial profile update; absent fields keep their value.
    pub fn update_profile(&self, id: &str, update: &UpdateUserRequest) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE users SET
                first_name = COALESCE(?2, first_name),
                last_name = COALESCE(?3, last_name),
                phone_number = COALESCE(?4, phone_number),
                address = COALESCE(?5, address),
                updated_date = ?6
             WHERE id = ?1",
            params![
                id,
                update.first_name,
                update.last_name,
                update.phone_number,
                update.address,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn set_reset_token(&self, id: &str, token: &str) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE users SET reset_token = ?2, updated_date = ?3 WHERE id = ?1",
            params![id, token, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Store a new password hash and clear the reset token, so the token is
    /// single-use.
    pub fn reset_password(&self, id: &str, password_hash: &str) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE users SET password_hash = ?2, reset_token = NULL, updated_date = ?3
             WHERE id = ?1",
            params![id, password_hash, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Admin toggle for account activation.
    pub fn set_active(&self, id: &str, active: bool) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE users SET is_active = ?2, updated_date = ?3 WHERE id = ?1",
            params![id, active, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Admin soft-delete flag. Records are never hard-deleted.
    pub fn set_deleted(&self, id: &str, deleted: bool) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE users SET is_deleted = ?2, updated_date = ?3 WHERE id = ?1",
            params![id, deleted, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

fn row_to_principal(row: &Row<'_>) -> rusqlite::Result<Principal> {
    let role_str: String = row.get(8)?;
    Ok(Principal {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        country_code: row.get(4)?,
        phone_number: row.get(5)?,
        address: row.get(6)?,
        password_hash: row.get(7)?,
        role: Role::from_str(&role_str).unwrap_or(Role::User),
        reset_token: row.get(9)?,
        is_active: row.get(10)?,
        is_deleted: row.get(11)?,
        created_date: row.get(12)?,
        updated_date: row.get(13)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = UserStore::new(db_path).unwrap();
        (store, temp_file)
    }

    fn sample_user(email: &str) -> NewPrincipal {
        NewPrincipal {
            first_name: "Jo".to_string(),
            last_name: "Dev".to_string(),
            email: email.to_string(),
            country_code: Some("+44".to_string()),
            phone_number: Some("07000000000".to_string()),
            address: Some("1 Test Lane".to_string()),
            password_hash: bcrypt::hash("Secret@1", 4).unwrap(),
            role: Role::User,
        }
    }

    #[test]
    fn test_create_and_find_by_email_case_insensitive() {
        let (store, _temp) = create_test_store();
        store.create(sample_user("Jo@Example.COM")).unwrap();

        let found = store.find_by_email("jo@example.com").unwrap().unwrap();
        assert_eq!(found.email, "jo@example.com");
        assert!(found.is_active);
        assert!(!found.is_deleted);

        // Mixed-case lookup also resolves
        assert!(store.find_by_email("JO@EXAMPLE.COM").unwrap().is_some());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (store, _temp) = create_test_store();
        store.create(sample_user("jo@example.com")).unwrap();

        let err = store.create(sample_user("JO@example.com")).unwrap_err();
        assert_eq!(
            err,
            ApiError::AlreadyExists(messages::EMAIL_ALREADY_EXIST.to_string())
        );
    }

    #[test]
    fn test_ensure_admin_is_idempotent() {
        let (store, _temp) = create_test_store();

        store.ensure_admin("admin@example.com", "Admin@123", 4).unwrap();
        store.ensure_admin("admin@example.com", "Admin@123", 4).unwrap();

        let admin = store.find_by_email("admin@example.com").unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.first_name, "Super");

        // Exactly one row: inserting the same email again must conflict
        assert!(store.create(sample_user("admin@example.com")).is_err());
    }

    #[test]
    fn test_deleted_account_invisible_to_email_lookup() {
        let (store, _temp) = create_test_store();
        let user = store.create(sample_user("jo@example.com")).unwrap();

        store.set_deleted(&user.id, true).unwrap();

        assert!(store.find_by_email("jo@example.com").unwrap().is_none());
        // ...but still resolvable by id, so the gate can report "deleted"
        let by_id = store.find_by_id(&user.id).unwrap().unwrap();
        assert!(by_id.is_deleted);
    }

    #[test]
    fn test_update_profile_partial() {
        let (store, _temp) = create_test_store();
        let user = store.create(sample_user("jo@example.com")).unwrap();

        store
            .update_profile(
                &user.id,
                &UpdateUserRequest {
                    first_name: Some("Joan".to_string()),
                    last_name: None,
                    phone_number: None,
                    address: Some("2 New Road".to_string()),
                },
            )
            .unwrap();

        let updated = store.find_by_id(&user.id).unwrap().unwrap();
        assert_eq!(updated.first_name, "Joan");
        assert_eq!(updated.last_name, "Dev");
        assert_eq!(updated.address.as_deref(), Some("2 New Road"));
    }

    #[test]
    fn test_reset_token_lifecycle() {
        let (store, _temp) = create_test_store();
        let user = store.create(sample_user("jo@example.com")).unwrap();

        store.set_reset_token(&user.id, "tok-32-chars").unwrap();
        let found = store.find_by_reset_token("tok-32-chars").unwrap().unwrap();
        assert_eq!(found.id, user.id);

        let new_hash = bcrypt::hash("NewSecret@1", 4).unwrap();
        store.reset_password(&user.id, &new_hash).unwrap();

        // Token is cleared on reset: a second lookup misses
        assert!(store.find_by_reset_token("tok-32-chars").unwrap().is_none());
        let after = store.find_by_id(&user.id).unwrap().unwrap();
        assert!(bcrypt::verify("NewSecret@1", &after.password_hash).unwrap());
    }

    #[test]
    fn test_set_active_toggle() {
        let (store, _temp) = create_test_store();
        let user = store.create(sample_user("jo@example.com")).unwrap();

        store.set_active(&user.id, false).unwrap();
        assert!(!store.find_by_id(&user.id).unwrap().unwrap().is_active);
        assert!(store.find_active_by_email("jo@example.com").unwrap().is_none());

        store.set_active(&user.id, true).unwrap();
        assert!(store.find_active_by_email("jo@example.com").unwrap().is_some());
    }
}
