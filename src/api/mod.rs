// src/api/mod.rs
use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use std::sync::Arc;
use crate::core::vault::Vault;
use utoipa::{OpenApi, Modify};
use utoipa_swagger_ui::SwaggerUi;
use utoipa_redoc::{Redoc, Servable};

// Adds the bearer token scheme referenced by the handlers
#[derive(Default)]
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::auth::sign_up,
        crate::api::handlers::auth::sign_in,
        crate::api::handlers::auth::check_status,

        crate::api::handlers::generator::generate_password,

        crate::api::handlers::passwords::save_password,
        crate::api::handlers::passwords::list_passwords
    ),
    components(
        schemas(
            crate::api::types::CredentialsRequest,
            crate::api::types::TokenResponse,
            crate::api::types::StatusResponse,
            crate::api::types::PasswordGenerationRequest,
            crate::api::types::PasswordGenerationResponse,
            crate::api::types::SavePasswordRequest,
            crate::api::types::SavePasswordResponse,
            crate::api::types::SavedPasswordEntry,
            crate::api::types::SavedPasswordListResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account and token endpoints"),
        (name = "Generator", description = "Password generation endpoints"),
        (name = "Passwords", description = "Saved password endpoints")
    ),
    info(
        title = "PGR API",
        version = "0.1.0",
        description = "Password generator with per-user saved passwords",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Everything the server mounts, shared with the HTTP tests.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}")
            .url("/api-docs/openapi.json", ApiDoc::openapi())
    )
    .service(Redoc::with_url("/redoc", ApiDoc::openapi()));

    routes::configure_routes(cfg);
}

pub async fn start_server(vault: Arc<Vault>, address: &str, port: u16) -> std::io::Result<()> {
    log::info!("Starting PGR API server on {}:{}", address, port);

    let vault_data = web::Data::new(vault);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                "Authorization",
                "Content-Type",
                "Accept",
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(vault_data.clone())
            .configure(configure_app)
    })
    .bind((address, port))?
    .run()
    .await
}

pub mod types;
pub mod routes;
pub mod handlers;
pub mod middleware;
pub mod utils;
