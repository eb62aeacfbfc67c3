use anyhow::{Context, Result};
use clap::Subcommand;
use shared::models::{Article, ArticleQuery, SortOrder};

use super::{connect, print_json, truncate};
use crate::GlobalArgs;

#[derive(Subcommand, Debug)]
pub enum ArticlesCommand {
    /// List articles, newest first
    List {
        /// Maximum number of articles to fetch
        #[arg(long, short, default_value_t = 100)]
        limit: u32,
        /// Only show titles containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one article as JSON
    Show { id: i64 },
    /// Delete an article
    Delete { id: i64 },
    /// Print the headline counters
    Stats,
    /// Show which featured slots are taken
    Featured,
}

pub async fn run(global: &GlobalArgs, command: ArticlesCommand) -> Result<()> {
    let (api, _) = connect(global).await?;
    let articles = api.articles();

    match command {
        ArticlesCommand::List {
            limit,
            search,
            json,
        } => {
            let query = ArticleQuery {
                limit: Some(limit),
                sort: Some("created_at".to_string()),
                order: Some(SortOrder::Desc),
            };
            let list = articles
                .list(&query)
                .await
                .context("failed to list articles")?;
            let search = search.unwrap_or_default();
            let matching: Vec<&Article> =
                list.iter().filter(|article| article.title_matches(&search)).collect();
            if json {
                print_json(&matching)?;
            } else {
                for article in matching {
                    println!("{}", article_line(article));
                }
            }
        }
        ArticlesCommand::Show { id } => {
            let article = articles
                .get(id)
                .await
                .with_context(|| format!("failed to load article {id}"))?;
            print_json(&article)?;
        }
        ArticlesCommand::Delete { id } => {
            articles
                .delete(id)
                .await
                .with_context(|| format!("failed to delete article {id}"))?;
            println!("Deleted article {id}");
        }
        ArticlesCommand::Stats => {
            let stats = articles.stats().await.context("failed to load stats")?;
            println!("articles:   {}", stats.total_articles);
            println!("views:      {}", stats.total_views);
            println!("comments:   {}", stats.total_comments);
            println!("categories: {}", stats.total_categories);
        }
        ArticlesCommand::Featured => {
            let taken = articles
                .taken_featured_slots(None)
                .await
                .context("failed to check featured slots")?;
            for priority in shared::models::FEATURED_PRIORITIES {
                match taken.get(&priority) {
                    Some(article) => println!("#{priority}  {} ({})", article.title, article.id),
                    None => println!("#{priority}  free"),
                }
            }
        }
    }
    Ok(())
}

fn article_line(article: &Article) -> String {
    let mut flags = Vec::new();
    if let Some(priority) = article.is_featured {
        flags.push(format!("featured #{priority}"));
    }
    if article.is_breaking {
        flags.push("breaking".to_string());
    }
    format!(
        "{:>6}  {:<9}  {:<50}  {}",
        article.id,
        article.status.as_str(),
        truncate(&article.title, 50),
        flags.join(", ")
    )
    .trim_end()
    .to_string()
}
