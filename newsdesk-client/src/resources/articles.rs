use std::collections::BTreeMap;

use shared::models::{
    Article, ArticleDraft, ArticleList, ArticleQuery, ArticleStats, FEATURED_PRIORITIES,
    FeaturedSlot,
};
use tracing::warn;

use super::with_query;
use crate::{
    api::{ApiClient, HttpMethod, RequestOptions},
    error::ClientError,
};

/// `/articles` endpoints.
#[derive(Debug, Clone)]
pub struct Articles {
    api: ApiClient,
}

impl Articles {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Articles matching `query`, newest first.
    pub async fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>, ClientError> {
        let path = with_query("/articles", &query.to_pairs());
        let list: ArticleList = self.api.request_data(&path, RequestOptions::get()).await?;
        Ok(list.articles)
    }

    /// One article by id.
    pub async fn get(&self, id: i64) -> Result<Article, ClientError> {
        self.api
            .request_data(&format!("/articles/{id}"), RequestOptions::get())
            .await
    }

    /// Validates `draft` and creates the article.
    pub async fn create(&self, draft: &ArticleDraft) -> Result<(), ClientError> {
        draft.validate().map_err(invalid)?;
        self.api
            .request_ack("/articles", RequestOptions::json(HttpMethod::Post, draft)?)
            .await
    }

    /// Validates `draft` and replaces article `id` with it.
    pub async fn update(&self, id: i64, draft: &ArticleDraft) -> Result<(), ClientError> {
        draft.validate().map_err(invalid)?;
        self.api
            .request_ack(
                &format!("/articles/{id}"),
                RequestOptions::json(HttpMethod::Put, draft)?,
            )
            .await
    }

    /// Deletes article `id`.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api
            .request_ack(&format!("/articles/{id}"), RequestOptions::delete())
            .await
    }

    /// Dashboard totals.
    pub async fn stats(&self) -> Result<ArticleStats, ClientError> {
        self.api
            .request_data("/articles/stats", RequestOptions::get())
            .await
    }

    /// Who holds featured slot `priority` (1..=5).
    pub async fn featured_slot(&self, priority: u8) -> Result<FeaturedSlot, ClientError> {
        if !FEATURED_PRIORITIES.contains(&priority) {
            return Err(ClientError::Validation(
                "featured priority must be between 1 and 5".to_string(),
            ));
        }
        self.api
            .request_data(
                &format!("/articles/featured/check/{priority}"),
                RequestOptions::get(),
            )
            .await
    }

    /// Featured slots held by articles other than `except_id`.
    ///
    /// A slot that fails to load is logged and left out; an expired session
    /// or a cancelled view still aborts the whole scan.
    pub async fn taken_featured_slots(
        &self,
        except_id: Option<i64>,
    ) -> Result<BTreeMap<u8, Article>, ClientError> {
        let mut taken = BTreeMap::new();
        for priority in FEATURED_PRIORITIES {
            match self.featured_slot(priority).await {
                Ok(FeaturedSlot {
                    taken: true,
                    article: Some(article),
                }) if Some(article.id) != except_id => {
                    taken.insert(priority, article);
                }
                Ok(_) => {}
                Err(err @ (ClientError::SessionExpired | ClientError::Cancelled)) => {
                    return Err(err);
                }
                Err(err) => warn!(priority, error = %err, "failed to check featured slot"),
            }
        }
        Ok(taken)
    }
}

fn invalid(message: &str) -> ClientError {
    ClientError::Validation(message.to_string())
}
