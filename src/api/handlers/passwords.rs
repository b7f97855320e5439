// src/api/handlers/passwords.rs
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use crate::api::types::{
    SavePasswordRequest, SavePasswordResponse,
    SavedPasswordEntry, SavedPasswordListResponse,
};
use crate::api::utils::current_identity;
use crate::core::vault::{Vault, VaultError};
use log::{debug, error, info};

/// Save a password
///
/// Stores the password under the authenticated caller.
#[utoipa::path(
    post,
    path = "/passwords",
    tag = "Passwords",
    security(
        ("bearer_auth" = [])
    ),
    request_body = SavePasswordRequest,
    responses(
        (status = 201, description = "Password saved", body = SavePasswordResponse),
        (status = 401, description = "Not authenticated", body = SavePasswordResponse),
        (status = 500, description = "Internal server error", body = SavePasswordResponse)
    )
)]
pub async fn save_password(
    vault: web::Data<Arc<Vault>>,
    req: HttpRequest,
    save_req: web::Json<SavePasswordRequest>,
) -> impl Responder {
    let identity = current_identity(&req);

    match vault.save_password(identity, &save_req.password, save_req.label.as_deref()).await {
        Ok(id) => {
            info!("✅ Saved password {}", id);
            HttpResponse::Created().json(SavePasswordResponse {
                success: true,
                id: Some(id.to_string()),
                error: None,
            })
        }
        Err(VaultError::Unauthorized) => {
            debug!("❌ Save attempted without authentication");
            HttpResponse::Unauthorized().json(SavePasswordResponse {
                success: false,
                id: None,
                error: Some("Not authenticated".to_string()),
            })
        }
        Err(e) => {
            error!("Failed to save password: {}", e);
            HttpResponse::InternalServerError().json(SavePasswordResponse {
                success: false,
                id: None,
                error: Some("Failed to save password".to_string()),
            })
        }
    }
}

/// List saved passwords
///
/// Returns the caller's saved passwords, or an empty list for anonymous
/// callers.
#[utoipa::path(
    get,
    path = "/passwords",
    tag = "Passwords",
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Saved passwords of the caller", body = SavedPasswordListResponse),
        (status = 500, description = "Internal server error", body = SavedPasswordListResponse)
    )
)]
pub async fn list_passwords(
    vault: web::Data<Arc<Vault>>,
    req: HttpRequest,
) -> impl Responder {
    let identity = current_identity(&req);

    match vault.get_saved_passwords(identity).await {
        Ok(saved) => {
            debug!("✅ Returning {} saved passwords", saved.len());
            HttpResponse::Ok().json(SavedPasswordListResponse {
                success: true,
                passwords: saved.into_iter().map(SavedPasswordEntry::from).collect(),
                error: None,
            })
        }
        Err(e) => {
            error!("Failed to list passwords: {}", e);
            HttpResponse::InternalServerError().json(SavedPasswordListResponse {
                success: false,
                passwords: vec![],
                error: Some("Failed to list passwords".to_string()),
            })
        }
    }
}
