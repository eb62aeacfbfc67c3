use shared::models::{
    Submission, SubmissionFilter, SubmissionList, SubmissionStatus, SubmissionStatusUpdate,
};

use super::with_query;
use crate::{
    api::{ApiClient, HttpMethod, RequestOptions, bare_body},
    error::ClientError,
};

/// `/submissions` endpoints: the reader tip moderation queue.
#[derive(Debug, Clone)]
pub struct Submissions {
    api: ApiClient,
}

impl Submissions {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submissions matching `filter`, as returned by the backend.
    pub async fn list(&self, filter: SubmissionFilter) -> Result<Vec<Submission>, ClientError> {
        let pairs: Vec<(&str, &str)> = filter
            .query_value()
            .map(|status| vec![("status", status)])
            .unwrap_or_default();
        let path = with_query("/submissions", &pairs);
        let body = self.api.request(&path, RequestOptions::get()).await?;
        let list: SubmissionList = bare_body(&path, body)?;
        Ok(list.submissions)
    }

    /// Approves or rejects a submission. Moving back to pending is refused.
    pub async fn set_status(&self, id: i64, status: SubmissionStatus) -> Result<(), ClientError> {
        if status == SubmissionStatus::Pending {
            return Err(ClientError::Validation(
                "a submission can only be approved or rejected".to_string(),
            ));
        }
        self.api
            .request_bare_ack(
                &format!("/submissions/{id}/status"),
                RequestOptions::json(HttpMethod::Patch, &SubmissionStatusUpdate { status })?,
            )
            .await
    }

    /// Removes a submission from the queue.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api
            .request_bare_ack(&format!("/submissions/{id}"), RequestOptions::delete())
            .await
    }
}
