// src/core/auth.rs
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Serialize, Deserialize};
use thiserror::Error;
use uuid::Uuid;
use crate::db::{Database, DbError};
use crate::models::OwnerId;
use crate::utils;

// For password verification
use argon2::{Argon2, PasswordHash, PasswordVerifier, PasswordHasher};
use argon2::password_hash::{rand_core::OsRng, SaltString};

// Define JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    // Subject (user ID)
    pub sub: String,
    // Issued at
    pub iat: i64,
    // Expiration time
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Database error: {0}")]
    DbError(DbError),

    #[error("Argon2 error: {0}")]
    Argon2Error(String),
}

impl From<DbError> for AuthError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::DuplicateEmail(_) => AuthError::DuplicateEmail,
            other => AuthError::DbError(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

/// Local identity provider: email/password accounts and bearer tokens.
pub struct AuthManager {
    jwt_secret: String,
    session_duration: Duration,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthManager {
    pub fn new(jwt_secret: impl Into<String>, session_duration: std::time::Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            session_duration: Duration::from_std(session_duration).unwrap_or_else(|_| Duration::hours(24)),
        }
    }

    pub async fn sign_up(&self, db: &Database, email: &str, password: &str) -> Result<String> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput("Email and password are required".into()));
        }

        if db.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Argon2Error(e.to_string()))?;

        let user_id = db.create_user(&email, &password_hash.to_string()).await?;
        log::info!("Registered user {}", user_id);

        self.issue_token(user_id)
    }

    pub async fn sign_in(&self, db: &Database, email: &str, password: &str) -> Result<String> {
        let email = normalize_email(email);

        let user = match db.get_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                log::warn!("Sign-in attempt for unknown account");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| AuthError::Argon2Error(format!("Invalid hash format: {}", e)))?;

        if Argon2::default().verify_password(password.as_bytes(), &parsed_hash).is_err() {
            log::warn!("Wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        log::debug!(
            "User {} <{}> signed in, registered {}",
            user.id,
            user.email,
            utils::format_time_ago(user.created_at)
        );
        self.issue_token(user.id)
    }

    pub fn issue_token(&self, user_id: OwnerId) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.session_duration).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    // Validate JWT token and return the user it was issued to
    pub fn validate_token(&self, token: &str) -> Result<OwnerId> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|_| AuthError::InvalidInput("Token subject is not a user id".into()))
    }

    /// Resolves the caller behind an optional bearer token. Anything that does
    /// not validate is treated as anonymous.
    pub fn current_identity(&self, token: Option<&str>) -> Option<OwnerId> {
        let token = token?;
        match self.validate_token(token) {
            Ok(user_id) => Some(user_id),
            Err(e) => {
                log::debug!("Ignoring token {}: {}", utils::preview(token), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AuthManager {
        AuthManager::new("test-secret", std::time::Duration::from_secs(3600))
    }

    async fn db() -> Database {
        Database::new("memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in_resolves_same_identity() {
        let db = db().await;
        let auth = manager();

        let signup_token = auth.sign_up(&db, "Alice@Example.com ", "correct horse").await.unwrap();
        let signin_token = auth.sign_in(&db, "alice@example.com", "correct horse").await.unwrap();

        let a = auth.current_identity(Some(&signup_token)).expect("signup token should resolve");
        let b = auth.current_identity(Some(&signin_token)).expect("signin token should resolve");
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let db = db().await;
        let auth = manager();
        auth.sign_up(&db, "bob@example.com", "right").await.unwrap();

        let err = auth.sign_in(&db, "bob@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = auth.sign_in(&db, "nobody@example.com", "right").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_duplicate_and_empty_sign_up() {
        let db = db().await;
        let auth = manager();
        auth.sign_up(&db, "carol@example.com", "pw").await.unwrap();

        let err = auth.sign_up(&db, "CAROL@example.com", "pw2").await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));

        let err = auth.sign_up(&db, "  ", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_or_foreign_tokens_are_anonymous() {
        let auth = manager();
        let other = AuthManager::new("other-secret", std::time::Duration::from_secs(3600));
        let foreign = other.issue_token(Uuid::new_v4()).unwrap();

        assert_eq!(auth.current_identity(None), None);
        assert_eq!(auth.current_identity(Some("not-a-jwt")), None);
        assert_eq!(auth.current_identity(Some(&foreign)), None);
    }

    #[test]
    fn test_expired_token_is_anonymous() {
        let auth = manager();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(5)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap();

        assert!(auth.validate_token(&token).is_err());
        assert_eq!(auth.current_identity(Some(&token)), None);
    }
}
