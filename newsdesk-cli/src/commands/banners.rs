use anyhow::{Context, Result};
use clap::Subcommand;

use super::{connect, print_json};
use crate::GlobalArgs;

#[derive(Subcommand, Debug)]
pub enum BannersCommand {
    /// List banners, active and inactive
    List {
        #[arg(long)]
        json: bool,
    },
    /// Switch a banner between active and inactive
    Toggle { id: i64 },
    /// Delete a banner
    Delete { id: i64 },
}

pub async fn run(global: &GlobalArgs, command: BannersCommand) -> Result<()> {
    let (api, _) = connect(global).await?;
    let banners = api.banners();

    match command {
        BannersCommand::List { json } => {
            let list = banners.list().await.context("failed to list banners")?;
            if json {
                print_json(&list)?;
            } else {
                for banner in &list {
                    println!(
                        "{:>4}  {:<10}  {:<8}  {}",
                        banner.id,
                        banner.kind.as_str(),
                        if banner.is_active { "active" } else { "inactive" },
                        banner.title
                    );
                }
            }
        }
        BannersCommand::Toggle { id } => {
            banners
                .toggle(id)
                .await
                .with_context(|| format!("failed to toggle banner {id}"))?;
            println!("Toggled banner {id}");
        }
        BannersCommand::Delete { id } => {
            banners
                .delete(id)
                .await
                .with_context(|| format!("failed to delete banner {id}"))?;
            println!("Deleted banner {id}");
        }
    }
    Ok(())
}
