// src/api/handlers/generator.rs

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use crate::api::types::{PasswordGenerationRequest, PasswordGenerationResponse};
use crate::core::vault::Vault;
use crate::models::PasswordGenerationOptions;
use log::{debug, warn};

/// Generate a password
///
/// Draws `length` characters from lowercase letters plus the requested
/// classes. Open to anonymous callers.
#[utoipa::path(
    post,
    path = "/generator/password",
    tag = "Generator",
    request_body = PasswordGenerationRequest,
    responses(
        (status = 200, description = "Generated password", body = PasswordGenerationResponse),
        (status = 400, description = "Invalid options", body = PasswordGenerationResponse)
    )
)]
pub async fn generate_password(
    vault: web::Data<Arc<Vault>>,
    generation_req: web::Json<PasswordGenerationRequest>,
) -> impl Responder {
    let options = match PasswordGenerationOptions::try_from(&*generation_req) {
        Ok(options) => options,
        Err(e) => {
            warn!("❌ Rejected generation request: {}", e);
            return HttpResponse::BadRequest().json(PasswordGenerationResponse {
                success: false,
                password: None,
                error: Some(e.to_string()),
            });
        }
    };

    debug!("🔑 Generating {}-character password", options.length);
    let password = vault.generate_password(&options);

    HttpResponse::Ok().json(PasswordGenerationResponse {
        success: true,
        password: Some(password),
        error: None,
    })
}
