// src/db/memory.rs
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use chrono::Utc;

use crate::models::{NewSavedPassword, OwnerId, SavedPassword, UserRecord};
use super::{DatabaseBackend, DbError};

#[derive(Debug, Default)]
struct MemoryState {
    // Entries grouped by owner, in insertion order
    saved_by_owner: HashMap<OwnerId, Vec<SavedPassword>>,
    users_by_email: HashMap<String, UserRecord>,
}

/// Process-local backend. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatabaseBackend for MemoryBackend {
    async fn init(&mut self, connection_string: &str) -> Result<(), DbError> {
        if !connection_string.starts_with("memory:") {
            return Err(DbError::ConfigError("Invalid memory connection string".into()));
        }
        log::warn!("Using in-memory storage; saved passwords are lost on exit");
        Ok(())
    }

    async fn insert_saved_password(
        &self,
        owner_id: OwnerId,
        record: &NewSavedPassword,
    ) -> Result<Uuid, DbError> {
        let entry = SavedPassword {
            id: Uuid::new_v4(),
            owner_id,
            password: record.password.clone(),
            label: record.label.clone(),
            created_at: Utc::now(),
        };
        let id = entry.id;

        let mut state = self.state.write().await;
        state.saved_by_owner.entry(owner_id).or_default().push(entry);

        Ok(id)
    }

    async fn saved_passwords_by_owner(&self, owner_id: OwnerId) -> Result<Vec<SavedPassword>, DbError> {
        let state = self.state.read().await;
        Ok(state.saved_by_owner.get(&owner_id).cloned().unwrap_or_default())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<OwnerId, DbError> {
        let mut state = self.state.write().await;
        if state.users_by_email.contains_key(email) {
            return Err(DbError::DuplicateEmail(email.to_string()));
        }

        let user = UserRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        let id = user.id;
        state.users_by_email.insert(email.to_string(), user);

        Ok(id)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DbError> {
        let state = self.state.read().await;
        Ok(state.users_by_email.get(email).cloned())
    }
}
