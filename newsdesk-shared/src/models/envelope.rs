use serde::{Deserialize, Serialize};

use super::{Article, Category, Submission, UserRecord};

/// Response wrapper used by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    /// Whether the backend accepted the request.
    #[serde(default)]
    pub success: bool,
    /// Payload, present on success for endpoints that return one.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message, usually present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Creates a successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Creates a failed envelope with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Returns the server message, or `fallback` when none was sent.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// `data` of `GET /articles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArticleList {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// `data` of `GET /categories`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// `data` of `GET /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

/// Body of `GET /submissions`, which lists at the top level rather than under `data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionList {
    #[serde(default)]
    pub submissions: Vec<Submission>,
}
