use anyhow::{Context, Result};
use clap::Subcommand;
use shared::models::{CreateUserRequest, UserQuery, UserRole};

use super::{connect, print_json, session::PASSWORD_ENV};
use crate::GlobalArgs;

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List staff accounts
    List {
        /// admin, editor or author
        #[arg(long, short)]
        role: Option<UserRole>,
        /// Match against name and email
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print account counts per role
    Stats,
    /// Create an account; the password is read like `session login`
    Create {
        #[arg(long, short)]
        username: String,
        #[arg(long, short)]
        email: String,
        #[arg(long, short)]
        role: UserRole,
        #[arg(long, default_value = "")]
        full_name: String,
    },
    /// Set a new password for an account
    Password { id: i64 },
    /// Delete an account other than your own
    Delete { id: i64 },
}

pub async fn run(global: &GlobalArgs, command: UsersCommand) -> Result<()> {
    let (api, _) = connect(global).await?;
    let users = api.users();

    match command {
        UsersCommand::List { role, search, json } => {
            let list = users
                .list(&UserQuery { role, search })
                .await
                .context("failed to list users")?;
            if json {
                print_json(&list)?;
            } else {
                for user in &list {
                    println!(
                        "{:>4}  {:<7}  {:<28}  {}",
                        user.id,
                        user.role.as_str(),
                        user.display_name(),
                        user.email.as_deref().unwrap_or_default()
                    );
                }
            }
        }
        UsersCommand::Stats => {
            let stats = users.stats().await.context("failed to load user stats")?;
            println!("total:   {}", stats.total);
            println!("admins:  {}", stats.admins);
            println!("editors: {}", stats.editors);
            println!("authors: {}", stats.authors);
        }
        UsersCommand::Create {
            username,
            email,
            role,
            full_name,
        } => {
            let request = CreateUserRequest {
                username,
                email,
                password: new_password()?,
                full_name,
                role,
                avatar: String::new(),
            };
            users
                .create(&request)
                .await
                .context("failed to create user")?;
            println!("Created {} ({})", request.username, request.role);
        }
        UsersCommand::Password { id } => {
            let password = new_password()?;
            users
                .change_password(id, &password)
                .await
                .with_context(|| format!("failed to change password for user {id}"))?;
            println!("Password changed for user {id}");
        }
        UsersCommand::Delete { id } => {
            users
                .delete(id)
                .await
                .with_context(|| format!("failed to delete user {id}"))?;
            println!("Deleted user {id}");
        }
    }
    Ok(())
}

fn new_password() -> Result<String> {
    match std::env::var(PASSWORD_ENV) {
        Ok(password) => Ok(password),
        Err(_) => rpassword::prompt_password("New password: ").context("failed to read password"),
    }
}
