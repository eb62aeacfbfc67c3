use shared::models::{Category, CategoryDraft, CategoryList};

use crate::{
    api::{ApiClient, HttpMethod, RequestOptions},
    error::ClientError,
};

/// `/categories` endpoints.
#[derive(Debug, Clone)]
pub struct Categories {
    api: ApiClient,
}

impl Categories {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All categories.
    pub async fn list(&self) -> Result<Vec<Category>, ClientError> {
        let list: CategoryList = self
            .api
            .request_data("/categories", RequestOptions::get())
            .await?;
        Ok(list.categories)
    }

    /// Creates a category, deriving the slug from the name when it is blank.
    pub async fn create(&self, draft: CategoryDraft) -> Result<(), ClientError> {
        let draft = normalize(draft)?;
        self.api
            .request_ack("/categories", RequestOptions::json(HttpMethod::Post, &draft)?)
            .await
    }

    /// Replaces category `id`; the slug is normalized like in [`Self::create`].
    pub async fn update(&self, id: i64, draft: CategoryDraft) -> Result<(), ClientError> {
        let draft = normalize(draft)?;
        self.api
            .request_ack(
                &format!("/categories/{id}"),
                RequestOptions::json(HttpMethod::Put, &draft)?,
            )
            .await
    }

    /// Deletes category `id`.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api
            .request_ack(&format!("/categories/{id}"), RequestOptions::delete())
            .await
    }
}

fn normalize(draft: CategoryDraft) -> Result<CategoryDraft, ClientError> {
    draft
        .normalized()
        .map_err(|message| ClientError::Validation(message.to_string()))
}
