// src/api/handlers/auth.rs

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use crate::core::vault::Vault;
use crate::core::auth::AuthError;
use crate::api::types::{CredentialsRequest, StatusResponse, TokenResponse};
use crate::api::utils::current_identity;
use log::{info, warn, error};

fn token_error(e: AuthError) -> HttpResponse {
    let body = |message: String| TokenResponse {
        success: false,
        token: None,
        error: Some(message),
    };

    match e {
        AuthError::InvalidCredentials => {
            HttpResponse::Unauthorized().json(body("Invalid email or password".to_string()))
        }
        AuthError::DuplicateEmail => {
            HttpResponse::Conflict().json(body("Email already registered".to_string()))
        }
        AuthError::InvalidInput(message) => HttpResponse::BadRequest().json(body(message)),
        other => {
            error!("Authentication backend failure: {}", other);
            HttpResponse::InternalServerError().json(body("Authentication failed".to_string()))
        }
    }
}

/// Create an account
///
/// Registers the email and returns a bearer token for it.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Account created", body = TokenResponse),
        (status = 400, description = "Missing email or password", body = TokenResponse),
        (status = 409, description = "Email already registered", body = TokenResponse),
        (status = 500, description = "Internal server error", body = TokenResponse)
    )
)]
pub async fn sign_up(
    vault: web::Data<Arc<Vault>>,
    req: web::Json<CredentialsRequest>,
) -> impl Responder {
    match vault.sign_up(&req.email, &req.password).await {
        Ok(token) => {
            info!("New account registered");
            HttpResponse::Ok().json(TokenResponse {
                success: true,
                token: Some(token),
                error: None,
            })
        }
        Err(e) => {
            warn!("Sign-up failed: {}", e);
            token_error(e)
        }
    }
}

/// Sign in
///
/// Verifies the account password and returns a bearer token.
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "Authentication",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = TokenResponse),
        (status = 500, description = "Internal server error", body = TokenResponse)
    )
)]
pub async fn sign_in(
    vault: web::Data<Arc<Vault>>,
    req: web::Json<CredentialsRequest>,
) -> impl Responder {
    match vault.sign_in(&req.email, &req.password).await {
        Ok(token) => HttpResponse::Ok().json(TokenResponse {
            success: true,
            token: Some(token),
            error: None,
        }),
        Err(e) => token_error(e),
    }
}

/// Check if the current token is valid
#[utoipa::path(
    get,
    path = "/auth/status",
    tag = "Authentication",
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Authentication status", body = StatusResponse)
    )
)]
pub async fn check_status(req: HttpRequest) -> impl Responder {
    HttpResponse::Ok().json(StatusResponse {
        success: true,
        authenticated: current_identity(&req).is_some(),
    })
}
