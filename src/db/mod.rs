// src/db/mod.rs
use uuid::Uuid;
use crate::models::{NewSavedPassword, OwnerId, SavedPassword, UserRecord};
use thiserror::Error;

pub mod memory;
pub mod sqlite;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

// Convert database-specific errors to our DbError
impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        DbError::SqlxError(error.to_string())
    }
}

// Repository contract implemented by each storage engine.
// Lookups by owner must cost O(entries owned), never a full scan.
pub trait DatabaseBackend: Send + Sync {
    async fn init(&mut self, connection_string: &str) -> Result<(), DbError>;

    async fn insert_saved_password(
        &self,
        owner_id: OwnerId,
        record: &NewSavedPassword,
    ) -> Result<Uuid, DbError>;

    async fn saved_passwords_by_owner(&self, owner_id: OwnerId) -> Result<Vec<SavedPassword>, DbError>;

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<OwnerId, DbError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DbError>;
}

#[derive(Debug, Clone)]
pub enum DatabaseType {
    Sqlite(sqlite::SqliteBackend),
    Memory(memory::MemoryBackend),
}

// The main database struct that uses the enum pattern instead of trait objects
#[derive(Debug, Clone)]
pub struct Database {
    pub backend: DatabaseType,
}

impl Database {
    pub async fn new(connection_string: &str) -> Result<Self, DbError> {
        let backend = if connection_string.starts_with("sqlite:") {
            let mut backend = sqlite::SqliteBackend::new();
            backend.init(connection_string).await?;
            DatabaseType::Sqlite(backend)
        } else if connection_string.starts_with("memory:") {
            let mut backend = memory::MemoryBackend::new();
            backend.init(connection_string).await?;
            DatabaseType::Memory(backend)
        } else {
            return Err(DbError::ConfigError(format!(
                "Unsupported database URL '{}' (expected sqlite: or memory:)",
                connection_string
            )));
        };

        log::info!("Database ready ({})", backend_name(&backend));
        Ok(Self { backend })
    }

    pub async fn insert_saved_password(
        &self,
        owner_id: OwnerId,
        record: &NewSavedPassword,
    ) -> Result<Uuid, DbError> {
        match &self.backend {
            DatabaseType::Sqlite(backend) => backend.insert_saved_password(owner_id, record).await,
            DatabaseType::Memory(backend) => backend.insert_saved_password(owner_id, record).await,
        }
    }

    pub async fn saved_passwords_by_owner(&self, owner_id: OwnerId) -> Result<Vec<SavedPassword>, DbError> {
        match &self.backend {
            DatabaseType::Sqlite(backend) => backend.saved_passwords_by_owner(owner_id).await,
            DatabaseType::Memory(backend) => backend.saved_passwords_by_owner(owner_id).await,
        }
    }

    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<OwnerId, DbError> {
        match &self.backend {
            DatabaseType::Sqlite(backend) => backend.create_user(email, password_hash).await,
            DatabaseType::Memory(backend) => backend.create_user(email, password_hash).await,
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DbError> {
        match &self.backend {
            DatabaseType::Sqlite(backend) => backend.get_user_by_email(email).await,
            DatabaseType::Memory(backend) => backend.get_user_by_email(email).await,
        }
    }

    pub fn get_backend_type(&self) -> &str {
        backend_name(&self.backend)
    }
}

fn backend_name(backend: &DatabaseType) -> &'static str {
    match backend {
        DatabaseType::Sqlite(_) => "SQLite",
        DatabaseType::Memory(_) => "in-memory",
    }
}

// Function to initialize the database
pub async fn init_db(db_url: &str) -> Result<Database, DbError> {
    Database::new(db_url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_db_selects_backend_from_url() {
        let db = init_db("memory:").await.unwrap();
        assert_eq!(db.get_backend_type(), "in-memory");

        let db = init_db("sqlite::memory:").await.unwrap();
        assert_eq!(db.get_backend_type(), "SQLite");
    }

    #[tokio::test]
    async fn test_init_db_rejects_unknown_scheme() {
        let err = init_db("postgres://localhost/pgr").await.unwrap_err();
        assert!(matches!(err, DbError::ConfigError(_)));
    }
}
