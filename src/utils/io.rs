// src/utils/io.rs
use std::fs;
use std::path::{Path, PathBuf};

/// Get the application config directory
pub fn get_app_config_dir() -> Option<PathBuf> {
    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "pgr", "pgr") {
        let config_dir = proj_dirs.config_dir();

        // Create the directory if it doesn't exist
        if !config_dir.exists() {
            if let Err(e) = fs::create_dir_all(config_dir) {
                log::error!("Failed to create config directory: {}", e);
                return None;
            }
        }

        Some(config_dir.to_path_buf())
    } else {
        log::error!("Could not determine config directory");
        None
    }
}

/// Read the signing secret stored in `dir`, creating it on first use.
pub fn load_or_create_secret(dir: &Path) -> std::io::Result<String> {
    let secret_file = dir.join("jwt_secret");

    if secret_file.exists() {
        let secret = fs::read_to_string(&secret_file)?;
        let secret = secret.trim();
        if !secret.is_empty() {
            return Ok(secret.to_string());
        }
        log::warn!("Empty secret file at {}, regenerating", secret_file.display());
    }

    let secret = super::generate_secret();
    fs::write(&secret_file, &secret)?;
    log::info!("Generated new signing secret at {}", secret_file.display());

    Ok(secret)
}
