// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;
use crate::generators::{password::checked_length, GeneratorError};
use crate::models::{PasswordGenerationOptions, SavedPassword};

// Authentication requests and responses
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// JWT token for authenticated requests (only present on success)
    pub token: Option<String>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Whether the request carried a valid token
    pub authenticated: bool,
}

// Generator

/// Longest password the HTTP endpoint will produce in one request.
pub const MAX_REQUEST_LENGTH: usize = 4096;

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordGenerationRequest {
    /// Password length, between 0 and 4096
    pub length: i64,
    /// Add digits 0-9
    pub include_numbers: bool,
    /// Add punctuation symbols
    pub include_symbols: bool,
    /// Add uppercase A-Z
    pub include_uppercase: bool,
}

impl TryFrom<&PasswordGenerationRequest> for PasswordGenerationOptions {
    type Error = GeneratorError;

    fn try_from(req: &PasswordGenerationRequest) -> Result<Self, Self::Error> {
        let length = checked_length(req.length)?;
        if length > MAX_REQUEST_LENGTH {
            return Err(GeneratorError::LengthTooLarge { length, max: MAX_REQUEST_LENGTH });
        }

        Ok(PasswordGenerationOptions {
            length,
            include_numbers: req.include_numbers,
            include_symbols: req.include_symbols,
            include_uppercase: req.include_uppercase,
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordGenerationResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Generated password
    pub password: Option<String>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

// Saved passwords
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SavePasswordRequest {
    /// Password to store
    pub password: String,
    /// Optional free-text label
    pub label: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SavePasswordResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// ID of the new entry (only present on success)
    pub id: Option<String>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedPasswordEntry {
    pub id: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// RFC 3339 creation time
    pub created_at: String,
}

impl From<SavedPassword> for SavedPasswordEntry {
    fn from(saved: SavedPassword) -> Self {
        Self {
            id: saved.id.to_string(),
            password: saved.password,
            label: saved.label,
            created_at: saved.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SavedPasswordListResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Entries owned by the caller; empty when unauthenticated
    pub passwords: Vec<SavedPasswordEntry>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}
