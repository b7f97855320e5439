use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

mod api;
mod cli;
mod core;
mod db;
mod generators;
mod models;
mod utils;

use crate::cli::{handlers, Args, CliCommand};
use crate::core::auth::AuthManager;
use crate::core::config::Config;
use crate::core::vault::Vault;

fn resolve_jwt_secret(config: &Config) -> Result<String> {
    if let Some(secret) = &config.jwt_secret {
        return Ok(secret.clone());
    }

    let dir = utils::get_app_config_dir().context("No config directory available; set JWT_SECRET")?;
    utils::load_or_create_secret(&dir).context("Failed to load signing secret")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let (mut config, config_warnings) = Config::load();
    if let Some(db) = &args.db {
        config.database_url = db.clone();
    }

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    for warning in &config_warnings {
        log::warn!("{}", warning);
    }
    log::debug!("Loaded config: database={}, api={}:{}", config.database_url, config.api_address, config.api_port);

    match args.command {
        // Generation touches neither storage nor identity
        CliCommand::Generate { length, numbers, symbols, uppercase } => {
            let options = handlers::generation_options(&config, length, numbers, symbols, uppercase)?;
            println!("{}", handlers::handle_generate(&options));
            Ok(())
        }
        command => run_with_vault(command, &config).await,
    }
}

async fn run_with_vault(command: CliCommand, config: &Config) -> Result<()> {
    let db = db::init_db(&config.database_url)
        .await
        .with_context(|| format!("Database connection failed for {}", config.database_url))?;
    log::debug!("Using {} storage", db.get_backend_type());

    let auth_manager = AuthManager::new(resolve_jwt_secret(config)?, config.session_duration);
    let vault = Arc::new(Vault::new(Arc::new(db), auth_manager));

    match command {
        CliCommand::Serve { port } => {
            let port = port.unwrap_or(config.api_port);
            api::start_server(vault, &config.api_address, port).await?;
            log::info!("API server shut down");
        }
        CliCommand::Signup { email } => handlers::handle_signup(&vault, &email).await?,
        CliCommand::Signin { email } => handlers::handle_signin(&vault, &email).await?,
        CliCommand::Save { password, label, token } => {
            let id = handlers::handle_save(&vault, token.as_deref(), &password, label.as_deref()).await?;
            println!("✅ Password saved ({})", id);
        }
        CliCommand::List { token } => {
            let saved = handlers::handle_list(&vault, token.as_deref()).await?;
            handlers::print_saved(&saved);
        }
        CliCommand::Generate { .. } => unreachable!("generate runs before storage is opened"),
    }

    Ok(())
}
