use anyhow::{Context, Result};
use clap::Subcommand;
use shared::models::CategoryDraft;

use super::{connect, print_json};
use crate::GlobalArgs;

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    /// List categories
    List {
        #[arg(long)]
        json: bool,
    },
    /// Create a category; the slug is derived from the name unless given
    Create {
        name: String,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a category
    Delete { id: i64 },
}

pub async fn run(global: &GlobalArgs, command: CategoriesCommand) -> Result<()> {
    let (api, _) = connect(global).await?;
    let categories = api.categories();

    match command {
        CategoriesCommand::List { json } => {
            let list = categories
                .list()
                .await
                .context("failed to list categories")?;
            if json {
                print_json(&list)?;
            } else {
                for category in &list {
                    println!("{:>4}  {:<24}  {}", category.id, category.name, category.slug);
                }
            }
        }
        CategoriesCommand::Create {
            name,
            slug,
            description,
        } => {
            let mut draft = CategoryDraft::from_name(&name);
            if let Some(slug) = slug {
                draft.slug = slug;
            }
            draft.description = description;
            let label = draft.name.clone();
            categories
                .create(draft)
                .await
                .context("failed to create category")?;
            println!("Created category {label}");
        }
        CategoriesCommand::Delete { id } => {
            categories
                .delete(id)
                .await
                .with_context(|| format!("failed to delete category {id}"))?;
            println!("Deleted category {id}");
        }
    }
    Ok(())
}
