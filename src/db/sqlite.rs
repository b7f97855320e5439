// src/db/sqlite.rs
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow}, Row};
use uuid::Uuid;
use std::path::Path;
use std::str::FromStr;
use chrono::{DateTime, Utc};

use crate::models::{NewSavedPassword, OwnerId, SavedPassword, UserRecord};
use super::{DatabaseBackend, DbError};

const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: Option<SqlitePool>,
}

impl SqliteBackend {
    pub fn new() -> Self {
        Self {
            pool: None,
        }
    }

    // Helper to get the pool or return an error
    fn get_pool(&self) -> Result<&SqlitePool, DbError> {
        self.pool.as_ref().ok_or(DbError::InitError("Database not initialized".into()))
    }
}

impl Default for SqliteBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::CorruptRecord(format!("Invalid UUID '{}': {}", value, e)))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::CorruptRecord(format!("Invalid datetime '{}': {}", value, e)))
}

fn saved_password_from_row(row: &SqliteRow) -> Result<SavedPassword, DbError> {
    let id: String = row.try_get("id")?;
    let owner_id: String = row.try_get("owner_id")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(SavedPassword {
        id: parse_uuid(&id)?,
        owner_id: parse_uuid(&owner_id)?,
        password: row.try_get("password")?,
        label: row.try_get("label")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

impl DatabaseBackend for SqliteBackend {
    async fn init(&mut self, connection_string: &str) -> Result<(), DbError> {
        let db_path = connection_string
            .strip_prefix("sqlite:")
            .ok_or_else(|| DbError::ConfigError("Invalid SQLite connection string".into()))?;
        let in_memory = db_path == MEMORY_PATH;

        // Create the database directory if it doesn't exist
        if !in_memory {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e|
                        DbError::InitError(format!("Failed to create database directory: {}", e))
                    )?;
                }
            }
        }

        log::info!("Initializing SQLite database at: {}", db_path);

        let options = SqliteConnectOptions::from_str(connection_string)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives as long as its single connection
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS saved_passwords (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                password TEXT NOT NULL,
                label TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_saved_passwords_owner ON saved_passwords(owner_id);")
            .execute(&pool)
            .await?;

        self.pool = Some(pool);
        Ok(())
    }

    async fn insert_saved_password(
        &self,
        owner_id: OwnerId,
        record: &NewSavedPassword,
    ) -> Result<Uuid, DbError> {
        let pool = self.get_pool()?;

        let id = Uuid::new_v4();
        let now_str = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO saved_passwords (id, owner_id, password, label, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(owner_id.to_string())
        .bind(&record.password)
        .bind(record.label.as_deref())
        .bind(&now_str)
        .execute(pool)
        .await?;

        Ok(id)
    }

    async fn saved_passwords_by_owner(&self, owner_id: OwnerId) -> Result<Vec<SavedPassword>, DbError> {
        let pool = self.get_pool()?;

        // Served by idx_saved_passwords_owner
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, password, label, created_at
            FROM saved_passwords
            WHERE owner_id = ?
            ORDER BY rowid ASC
            "#,
        )
        .bind(owner_id.to_string())
        .fetch_all(pool)
        .await?;

        rows.iter().map(saved_password_from_row).collect()
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<OwnerId, DbError> {
        let pool = self.get_pool()?;

        let id = Uuid::new_v4();
        let now_str = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(email)
        .bind(password_hash)
        .bind(&now_str)
        .execute(pool)
        .await;

        match result {
            Ok(_) => Ok(id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DbError::DuplicateEmail(email.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DbError> {
        let pool = self.get_pool()?;

        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        match row {
            Some(row) => {
                let id: String = row.try_get("id")?;
                let created_at: String = row.try_get("created_at")?;
                Ok(Some(UserRecord {
                    id: parse_uuid(&id)?,
                    email: row.try_get("email")?,
                    password_hash: row.try_get("password_hash")?,
                    created_at: parse_timestamp(&created_at)?,
                }))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn memory_backend() -> SqliteBackend {
        let mut backend = SqliteBackend::new();
        backend.init("sqlite::memory:").await.unwrap();
        backend
    }

    fn entry(password: &str, label: Option<&str>) -> NewSavedPassword {
        NewSavedPassword {
            password: password.to_string(),
            label: label.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_insert_and_query_by_owner() {
        let backend = memory_backend().await;
        let owner = Uuid::new_v4();

        let id = backend.insert_saved_password(owner, &entry("hunter2hunter2", Some("mail"))).await.unwrap();
        assert_eq!(id.get_version(), Some(uuid::Version::Random));

        let saved = backend.saved_passwords_by_owner(owner).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, id);
        assert_eq!(saved[0].owner_id, owner);
        assert_eq!(saved[0].password, "hunter2hunter2");
        assert_eq!(saved[0].label.as_deref(), Some("mail"));
    }

    #[tokio::test]
    async fn test_query_never_returns_other_owners() {
        let backend = memory_backend().await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        backend.insert_saved_password(alice, &entry("alice-1", None)).await.unwrap();
        backend.insert_saved_password(alice, &entry("alice-2", None)).await.unwrap();
        backend.insert_saved_password(bob, &entry("bob-1", None)).await.unwrap();

        let alice_saved = backend.saved_passwords_by_owner(alice).await.unwrap();
        let passwords: Vec<&str> = alice_saved.iter().map(|p| p.password.as_str()).collect();
        assert_eq!(passwords, vec!["alice-1", "alice-2"]);
        assert!(alice_saved.iter().all(|p| p.owner_id == alice));

        let bob_saved = backend.saved_passwords_by_owner(bob).await.unwrap();
        assert_eq!(bob_saved.len(), 1);
        assert_eq!(bob_saved[0].password, "bob-1");

        assert!(backend.saved_passwords_by_owner(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_owner_index_exists() {
        let backend = memory_backend().await;
        let pool = backend.get_pool().unwrap();

        let row = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'index' AND name = 'idx_saved_passwords_owner'")
            .fetch_optional(pool)
            .await
            .unwrap();
        assert!(row.is_some());
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let url = format!("sqlite:{}", temp_dir.path().join("nested").join("pgr.db").display());
        let owner = Uuid::new_v4();

        {
            let mut backend = SqliteBackend::new();
            backend.init(&url).await.unwrap();
            backend.insert_saved_password(owner, &entry("persisted", None)).await.unwrap();
        }

        let mut reopened = SqliteBackend::new();
        reopened.init(&url).await.unwrap();
        let saved = reopened.saved_passwords_by_owner(owner).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].password, "persisted");
        assert_eq!(saved[0].label, None);
    }

    #[tokio::test]
    async fn test_users_are_unique_by_email() {
        let backend = memory_backend().await;

        let id = backend.create_user("a@example.com", "$argon2id$stub").await.unwrap();
        let user = backend.get_user_by_email("a@example.com").await.unwrap().expect("user should exist");
        assert_eq!(user.id, id);
        assert_eq!(user.password_hash, "$argon2id$stub");

        let err = backend.create_user("a@example.com", "other").await.unwrap_err();
        assert!(matches!(err, DbError::DuplicateEmail(_)));

        assert!(backend.get_user_by_email("missing@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_uninitialized_backend_errors() {
        let backend = SqliteBackend::new();
        let err = backend.saved_passwords_by_owner(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DbError::InitError(_)));
    }
}
