// src/cli/handlers.rs
use anyhow::{bail, Context, Result};
use console::style;
use inquire::Password;
use uuid::Uuid;
use crate::core::config::Config;
use crate::core::vault::{Vault, VaultError};
use crate::generators::password::{checked_length, MAX_UI_LENGTH, MIN_UI_LENGTH};
use crate::generators::PasswordGenerator;
use crate::models::{PasswordGenerationOptions, SavedPassword};
use crate::utils::format_time_ago;

pub fn generation_options(
    config: &Config,
    length: Option<i64>,
    numbers: bool,
    symbols: bool,
    uppercase: bool,
) -> Result<PasswordGenerationOptions> {
    let length = match length {
        Some(length) => checked_length(length)?,
        None => config.default_password_length,
    };

    Ok(PasswordGenerationOptions {
        length,
        include_numbers: numbers,
        include_symbols: symbols,
        include_uppercase: uppercase,
    })
}

pub fn handle_generate(options: &PasswordGenerationOptions) -> String {
    if !(MIN_UI_LENGTH..=MAX_UI_LENGTH).contains(&options.length) {
        eprintln!(
            "{} length {} is outside the usual {}-{} range",
            style("note:").yellow(),
            options.length,
            MIN_UI_LENGTH,
            MAX_UI_LENGTH
        );
    }
    PasswordGenerator::new().generate_password(options)
}

fn prompt_password(confirm: bool) -> Result<String> {
    let mut prompt = Password::new("Account password:")
        .with_display_mode(inquire::PasswordDisplayMode::Hidden);
    if !confirm {
        prompt = prompt.without_confirmation();
    }
    prompt.prompt().context("Failed to read password")
}

fn print_token(token: &str) {
    println!("{}", style("✅ Signed in").green());
    println!("export PGR_TOKEN={}", token);
}

pub async fn handle_signup(vault: &Vault, email: &str) -> Result<()> {
    let password = prompt_password(true)?;
    let token = vault.sign_up(email, &password).await?;
    print_token(&token);
    Ok(())
}

pub async fn handle_signin(vault: &Vault, email: &str) -> Result<()> {
    let password = prompt_password(false)?;
    let token = vault.sign_in(email, &password).await?;
    print_token(&token);
    Ok(())
}

pub async fn handle_save(
    vault: &Vault,
    token: Option<&str>,
    password: &str,
    label: Option<&str>,
) -> Result<Uuid> {
    let identity = vault.current_identity(token);

    match vault.save_password(identity, password, label).await {
        Ok(id) => Ok(id),
        Err(VaultError::Unauthorized) => {
            bail!("Not signed in. Run `pgr signin` and pass --token or set PGR_TOKEN")
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn handle_list(vault: &Vault, token: Option<&str>) -> Result<Vec<SavedPassword>> {
    let identity = vault.current_identity(token);
    if identity.is_none() {
        eprintln!("{}", style("Sign in to see your saved passwords").dim());
    }
    Ok(vault.get_saved_passwords(identity).await?)
}

pub fn print_saved(saved: &[SavedPassword]) {
    if saved.is_empty() {
        println!("No saved passwords");
        return;
    }

    println!("{}", style("Saved Passwords").bold());
    for entry in saved {
        let label = entry.label.as_deref().unwrap_or("-");
        println!(
            "{}  {:<16} {}  {}",
            style(entry.id).dim(),
            label,
            entry.password,
            style(format_time_ago(entry.created_at)).dim()
        );
    }
}
