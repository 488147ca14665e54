use anyhow::{bail, Context, Result};

use remora_lib::profiles::{ProfileUpdate, UserProfile};

use crate::app::App;
use crate::OutputFormat;

/// Profile fields safe to print; the password hash is never shown
fn profile_json(username: &str, profile: &UserProfile) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "fullName": profile.full_name,
        "email": profile.email,
        "age": profile.age,
        "createdAt": profile.created_at.map(|d| d.to_rfc3339()),
        "lastLogin": profile.last_login.map(|d| d.to_rfc3339()),
    })
}

fn print_profile(username: &str, profile: &UserProfile, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&profile_json(username, profile))?);
        }
        OutputFormat::Plain => {
            println!("Username:   {}", username);
            println!("Full name:  {}", profile.full_name);
            println!("Email:      {}", profile.email);
            println!("Age:        {}", profile.age);
            if let Some(created) = profile.created_at {
                println!("Created:    {}", created.format("%Y-%m-%d %H:%M"));
            }
            if let Some(login) = profile.last_login {
                println!("Last login: {}", login.format("%Y-%m-%d %H:%M"));
            }
        }
    }
    Ok(())
}

pub fn run_register(app: &mut App, username: &str, full_name: Option<&str>, format: &OutputFormat) -> Result<()> {
    let password = App::read_password()?;
    let profile = app.controller.register(username, &password, full_name)?;

    match format {
        OutputFormat::Json => print_profile(username.trim(), &profile, format)?,
        OutputFormat::Plain => println!("Account '{}' created", username.trim()),
    }
    Ok(())
}

pub fn run_login(app: &mut App, username: &str, format: &OutputFormat) -> Result<()> {
    let password = App::read_password()?;
    let profile = app.controller.login(username, &password)?;

    match format {
        OutputFormat::Json => print_profile(username.trim(), &profile, format)?,
        OutputFormat::Plain => {
            let name = if profile.full_name.is_empty() { username.trim() } else { profile.full_name.as_str() };
            println!("Welcome back, {}!", name);
        }
    }
    Ok(())
}

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let usernames = app.controller.list_accounts().context("Failed to load accounts")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&usernames)?);
        }
        OutputFormat::Plain => {
            if usernames.is_empty() {
                println!("No accounts yet.");
            }
            for username in &usernames {
                println!("{}", username);
            }
        }
    }
    Ok(())
}

pub fn run_show(app: &App, username: &str, format: &OutputFormat) -> Result<()> {
    let accounts = app.controller.list_accounts().context("Failed to load accounts")?;
    if !accounts.iter().any(|u| u == username.trim()) {
        bail!("Account not found: {}", username.trim());
    }
    let profile = app.controller.load_profile(username)?;
    print_profile(username.trim(), &profile, format)
}

pub fn run_update(
    app: &App,
    username: &str,
    full_name: Option<String>,
    email: Option<String>,
    age: Option<u32>,
    format: &OutputFormat,
) -> Result<()> {
    if full_name.is_none() && email.is_none() && age.is_none() {
        bail!("Nothing to update; pass --full-name, --email or --age");
    }

    let update = ProfileUpdate { full_name, email, age };
    let profile = app.controller.update_profile(username, update)?;

    match format {
        OutputFormat::Json => print_profile(username.trim(), &profile, format)?,
        OutputFormat::Plain => println!("Profile saved for '{}'", username.trim()),
    }
    Ok(())
}

pub fn run_delete(app: &mut App, username: &str) -> Result<()> {
    app.controller.delete_account(username)?;
    println!("Account '{}' deleted", username.trim());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_json_omits_password() {
        let profile = UserProfile::new("Ada".to_string(), "secret-hash".to_string());
        let value = profile_json("ada", &profile);

        assert_eq!(value["fullName"], "Ada");
        assert!(value.get("password").is_none());
        assert!(!value.to_string().contains("secret-hash"));
    }
}
