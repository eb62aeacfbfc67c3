use shared::models::{Banner, BannerDraft};

use crate::{
    api::{ApiClient, HttpMethod, RequestOptions},
    error::ClientError,
};

/// `/banners` endpoints, admin view.
#[derive(Debug, Clone)]
pub struct Banners {
    api: ApiClient,
}

impl Banners {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every banner, active or not.
    pub async fn list(&self) -> Result<Vec<Banner>, ClientError> {
        self.api
            .request_data("/banners/admin", RequestOptions::get())
            .await
    }

    /// Creates a banner.
    pub async fn create(&self, draft: &BannerDraft) -> Result<(), ClientError> {
        validate(draft)?;
        self.api
            .request_ack("/banners", RequestOptions::json(HttpMethod::Post, draft)?)
            .await
    }

    /// Replaces banner `id`.
    pub async fn update(&self, id: i64, draft: &BannerDraft) -> Result<(), ClientError> {
        validate(draft)?;
        self.api
            .request_ack(
                &format!("/banners/{id}"),
                RequestOptions::json(HttpMethod::Put, draft)?,
            )
            .await
    }

    /// Deletes banner `id`.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api
            .request_ack(&format!("/banners/{id}"), RequestOptions::delete())
            .await
    }

    /// Flips the banner between active and inactive.
    pub async fn toggle(&self, id: i64) -> Result<(), ClientError> {
        self.api
            .request_ack(
                &format!("/banners/{id}/toggle"),
                RequestOptions::method(HttpMethod::Patch),
            )
            .await
    }
}

fn validate(draft: &BannerDraft) -> Result<(), ClientError> {
    draft
        .validate()
        .map_err(|message| ClientError::Validation(message.to_string()))
}
