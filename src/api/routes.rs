// src/api/routes.rs
use super::handlers;
use actix_web::web;
use super::middleware::auth::IdentityResolver;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Account routes
    cfg.service(
        web::scope("/auth")
            .wrap(IdentityResolver)
            .route("/signup", web::post().to(handlers::auth::sign_up))
            .route("/signin", web::post().to(handlers::auth::sign_in))
            .route("/status", web::get().to(handlers::auth::check_status))
    );

    // Generation needs no identity
    cfg.service(
        web::scope("/generator")
            .route("/password", web::post().to(handlers::generator::generate_password))
    );

    // Saved passwords; identity is optional here and enforced per handler
    cfg.service(
        web::scope("/passwords")
            .wrap(IdentityResolver)
            .route("", web::get().to(handlers::passwords::list_passwords))
            .route("", web::post().to(handlers::passwords::save_password))
    );
}
