// src/models.rs
use uuid::Uuid;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// Identifier of an authenticated identity. Every saved password has exactly one.
pub type OwnerId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPassword {
    pub id: Uuid,
    pub owner_id: OwnerId,
    pub password: String, // Stored as given, no encryption at rest
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Fields supplied by the caller on save; id, owner and timestamp come from the store
#[derive(Debug, Clone)]
pub struct NewSavedPassword {
    pub password: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: OwnerId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// Password generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordGenerationOptions {
    pub length: usize,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub include_uppercase: bool,
}

impl Default for PasswordGenerationOptions {
    fn default() -> Self {
        Self {
            length: 12,
            include_numbers: true,
            include_symbols: true,
            include_uppercase: true,
        }
    }
}
