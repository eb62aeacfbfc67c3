//! Subcommand implementations.

pub mod articles;
pub mod banners;
pub mod categories;
pub mod completion;
pub mod config;
pub mod session;
pub mod submissions;
pub mod upload;
pub mod users;

use std::rc::Rc;

use anyhow::{Context, Result, bail};
use client::{ApiClient, SessionManager, store::FileStore};
use shared::{config::ClientConfig, models::UserRecord};

use crate::GlobalArgs;

/// Builds a session over the credential file named by `global`.
pub fn open_session(global: &GlobalArgs) -> Result<SessionManager> {
    let config = ClientConfig::load_config(global.config.as_deref(), global.server.as_deref())
        .context("failed to resolve client configuration")?;
    let store = global
        .credentials
        .clone()
        .map_or_else(FileStore::at_default_location, FileStore::new);
    tracing::debug!(path = %store.path().display(), "using credential file");
    Ok(SessionManager::new(config, Rc::new(store)))
}

/// Restores the saved session and fails unless it is still valid.
pub async fn connect(global: &GlobalArgs) -> Result<(ApiClient, UserRecord)> {
    let session = open_session(global)?;
    session.initialize().await;
    let Some(user) = session.current_user() else {
        bail!("not logged in; run `newsdesk session login` first");
    };
    Ok((ApiClient::new(session), user))
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Cuts `text` to `width` characters, marking the cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}
