// src/core/vault.rs
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;
use crate::core::auth::{AuthManager, Result as AuthResult};
use crate::db::{Database, DbError};
use crate::generators::PasswordGenerator;
use crate::models::{NewSavedPassword, OwnerId, PasswordGenerationOptions, SavedPassword};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Generator plus the per-user password store. The caller identity is
/// resolved before each call and passed in explicitly.
pub struct Vault {
    db: Arc<Database>,
    generator: PasswordGenerator,
    pub auth_manager: AuthManager,
}

impl Vault {
    pub fn new(db: Arc<Database>, auth_manager: AuthManager) -> Self {
        Self {
            db,
            generator: PasswordGenerator::new(),
            auth_manager,
        }
    }

    pub fn generate_password(&self, options: &PasswordGenerationOptions) -> String {
        self.generator.generate_password(options)
    }

    pub async fn save_password(
        &self,
        identity: Option<OwnerId>,
        password: &str,
        label: Option<&str>,
    ) -> Result<Uuid, VaultError> {
        let owner_id = identity.ok_or(VaultError::Unauthorized)?;

        let record = NewSavedPassword {
            password: password.to_string(),
            label: label.map(str::to_string),
        };
        let id = self.db.insert_saved_password(owner_id, &record).await?;
        log::debug!("Saved password {} for {}", id, owner_id);

        Ok(id)
    }

    /// Anonymous callers get an empty list rather than an error.
    pub async fn get_saved_passwords(&self, identity: Option<OwnerId>) -> Result<Vec<SavedPassword>, VaultError> {
        let Some(owner_id) = identity else {
            return Ok(Vec::new());
        };

        Ok(self.db.saved_passwords_by_owner(owner_id).await?)
    }

    pub fn current_identity(&self, token: Option<&str>) -> Option<OwnerId> {
        self.auth_manager.current_identity(token)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<String> {
        self.auth_manager.sign_up(&self.db, email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<String> {
        self.auth_manager.sign_in(&self.db, email, password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn vault_with(url: &str) -> Vault {
        let db = Arc::new(Database::new(url).await.unwrap());
        Vault::new(db, AuthManager::new("vault-test", Duration::from_secs(3600)))
    }

    async fn vault() -> Vault {
        vault_with("memory:").await
    }

    #[tokio::test]
    async fn test_unauthenticated_save_fails_without_writing() {
        let vault = vault().await;

        let err = vault.save_password(None, "orphan", None).await.unwrap_err();
        assert!(matches!(err, VaultError::Unauthorized));

        // A fresh identity sees nothing, so nothing was attributed anywhere
        assert!(vault.get_saved_passwords(Some(Uuid::new_v4())).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unauthenticated_list_is_empty() {
        let vault = vault().await;
        vault.save_password(Some(Uuid::new_v4()), "someone-elses", None).await.unwrap();

        assert!(vault.get_saved_passwords(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_each_user_sees_only_their_own() {
        for url in ["memory:", "sqlite::memory:"] {
            let vault = vault_with(url).await;
            let alice = Uuid::new_v4();
            let bob = Uuid::new_v4();

            vault.save_password(Some(alice), "alice-secret", Some("email")).await.unwrap();
            vault.save_password(Some(bob), "bob-secret", None).await.unwrap();

            let alice_saved = vault.get_saved_passwords(Some(alice)).await.unwrap();
            assert_eq!(alice_saved.len(), 1);
            assert_eq!(alice_saved[0].password, "alice-secret");
            assert_eq!(alice_saved[0].label.as_deref(), Some("email"));

            let bob_saved = vault.get_saved_passwords(Some(bob)).await.unwrap();
            assert_eq!(bob_saved.len(), 1);
            assert_eq!(bob_saved[0].password, "bob-secret");
        }
    }

    #[tokio::test]
    async fn test_saving_same_password_twice_keeps_both() {
        let vault = vault().await;
        let owner = Uuid::new_v4();

        let first = vault.save_password(Some(owner), "dup", None).await.unwrap();
        let second = vault.save_password(Some(owner), "dup", None).await.unwrap();
        assert_ne!(first, second);

        assert_eq!(vault.get_saved_passwords(Some(owner)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_then_save_round_trip() {
        let vault = vault().await;
        let token = vault.sign_up("dana@example.com", "pw").await.unwrap();
        let identity = vault.current_identity(Some(&token));
        assert!(identity.is_some());

        let password = vault.generate_password(&PasswordGenerationOptions::default());
        vault.save_password(identity, &password, None).await.unwrap();

        let saved = vault.get_saved_passwords(identity).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].password, password);
        assert_eq!(Some(saved[0].owner_id), identity);
    }
}
