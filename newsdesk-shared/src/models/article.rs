use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use strum::EnumIter;

/// Priorities available for the front-page featured slots.
pub const FEATURED_PRIORITIES: std::ops::RangeInclusive<u8> = 1..=5;

/// Publication state of an article.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
}

impl ArticleStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A news article as listed by `/articles`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    /// HTML body produced by the rich-text editor.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub status: ArticleStatus,
    /// Featured slot priority (1..=5), if the article occupies one.
    #[serde(default, deserialize_with = "featured_priority")]
    pub is_featured: Option<u8>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub is_breaking: bool,
    #[serde(default, deserialize_with = "loose_bool")]
    pub show_author: bool,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, alias = "view_count")]
    pub views: Option<u64>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Article {
    /// Cover image URL, preferring the newer `featured_image` field.
    pub fn cover(&self) -> Option<&str> {
        self.featured_image
            .as_deref()
            .filter(|url| !url.is_empty())
            .or(self.cover_image.as_deref().filter(|url| !url.is_empty()))
    }

    /// Case-insensitive title match used by the list filter.
    pub fn title_matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Payload for `POST /articles` and `PUT /articles/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub slug: String,
    pub category_id: i64,
    pub content: String,
    pub excerpt: String,
    pub tags: String,
    pub status: ArticleStatus,
    pub is_featured: Option<u8>,
    pub is_breaking: bool,
    /// Sent as `0`/`1`, which is what the backend stores.
    #[serde(serialize_with = "bool_as_int", deserialize_with = "loose_bool")]
    pub show_author: bool,
    pub featured_image: String,
    pub published_at: Option<String>,
}

impl ArticleDraft {
    /// Checks the fields the editor requires before saving.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.slug.trim().is_empty() {
            return Err("slug is required");
        }
        if self.content.trim().is_empty() {
            return Err("content is required");
        }
        if self.category_id <= 0 {
            return Err("category is required");
        }
        if let Some(priority) = self.is_featured
            && !FEATURED_PRIORITIES.contains(&priority)
        {
            return Err("featured priority must be between 1 and 5");
        }
        Ok(())
    }
}

impl From<&Article> for ArticleDraft {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            category_id: article.category_id.unwrap_or_default(),
            content: article.content.clone().unwrap_or_default(),
            excerpt: article.excerpt.clone().unwrap_or_default(),
            tags: article.tags.clone().unwrap_or_default(),
            status: article.status,
            is_featured: article.is_featured,
            is_breaking: article.is_breaking,
            show_author: article.show_author,
            featured_image: article.cover().unwrap_or_default().to_string(),
            published_at: article.published_at.clone(),
        }
    }
}

/// Sort direction for article listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Parameters accepted by `GET /articles`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

impl ArticleQuery {
    /// The five most recently created articles, as shown on the dashboard.
    pub fn recent(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            sort: Some("created_at".to_string()),
            order: Some(SortOrder::Desc),
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(order) = self.order {
            let order = match order {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            };
            pairs.push(("order", order.to_string()));
        }
        pairs
    }
}

/// Response of `GET /articles/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleStats {
    #[serde(default)]
    pub total_articles: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_categories: u64,
}

/// Response of `GET /articles/featured/check/:priority`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeaturedSlot {
    #[serde(default)]
    pub taken: bool,
    #[serde(default)]
    pub article: Option<Article>,
}

fn bool_as_int<S: serde::Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseFlag {
    Bool(bool),
    Int(i64),
    Null(()),
}

/// Accepts `true`/`false`, `0`/`1` and `null` for MySQL-style boolean columns.
fn loose_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match LooseFlag::deserialize(deserializer)? {
        LooseFlag::Bool(value) => value,
        LooseFlag::Int(value) => value != 0,
        LooseFlag::Null(()) => false,
    })
}

/// `is_featured` is `null`, `0`, a priority, or a legacy boolean.
fn featured_priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    Ok(match LooseFlag::deserialize(deserializer)? {
        LooseFlag::Bool(true) => Some(1),
        LooseFlag::Int(value) if value > 0 => u8::try_from(value).ok(),
        LooseFlag::Bool(false) | LooseFlag::Int(_) | LooseFlag::Null(()) => None,
    })
}
