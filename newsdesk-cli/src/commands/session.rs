use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use rpassword::prompt_password;
use shared::models::{RegisterRequest, UserRecord};

use super::{connect, open_session};
use crate::GlobalArgs;

/// Environment variable read instead of prompting for a password.
pub const PASSWORD_ENV: &str = "NEWSDESK_PASSWORD";

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Log in and store the issued token
    Login {
        /// Account email; prompted for when omitted
        #[arg(long, short)]
        email: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the signed-in account after checking it with the backend
    Whoami,
    /// Create a new account (does not log in)
    Register {
        #[arg(long, short)]
        username: String,
        #[arg(long, short)]
        email: String,
        #[arg(long, default_value = "")]
        full_name: String,
    },
}

pub async fn run(global: &GlobalArgs, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Login { email } => login(global, email).await,
        SessionCommand::Logout => logout(global),
        SessionCommand::Whoami => whoami(global).await,
        SessionCommand::Register {
            username,
            email,
            full_name,
        } => register(global, username, email, full_name).await,
    }
}

async fn login(global: &GlobalArgs, email: Option<String>) -> Result<()> {
    let session = open_session(global)?;
    session.initialize().await;

    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = read_password()?;

    let user = session
        .login(&email, &password)
        .await
        .context("login failed")?;
    print_user_summary(&user);
    Ok(())
}

fn logout(global: &GlobalArgs) -> Result<()> {
    let session = open_session(global)?;
    session.logout();
    println!("Logged out");
    Ok(())
}

async fn whoami(global: &GlobalArgs) -> Result<()> {
    let (_, user) = connect(global).await?;
    print_user_summary(&user);
    Ok(())
}

async fn register(
    global: &GlobalArgs,
    username: String,
    email: String,
    full_name: String,
) -> Result<()> {
    let session = open_session(global)?;
    let password = read_password()?;
    let request = RegisterRequest {
        username,
        email,
        password,
        full_name,
    };
    session
        .register(&request)
        .await
        .context("registration failed")?;
    println!("Registered {}; log in to continue", request.email);
    Ok(())
}

fn read_password() -> Result<String> {
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(password) => password,
        Err(_) => prompt_password("Password: ").context("failed to read password")?,
    };
    if password.trim().is_empty() {
        bail!("password must not be empty");
    }
    Ok(password)
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim().to_string();
    if trimmed.is_empty() {
        bail!("input must not be empty");
    }
    Ok(trimmed)
}

fn print_user_summary(user: &UserRecord) {
    println!("Logged in as {}", user.display_name());
    if let Some(email) = &user.email {
        println!("email: {email}");
    }
    println!("role: {}", user.role);
    println!("id: {}", user.id);
}
