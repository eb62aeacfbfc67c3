use serde::{Deserialize, Serialize};

use super::UserRecord;

/// Credentials posted to `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `data` of a successful `/auth/login` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginData {
    /// Opaque bearer token.
    pub token: String,
    pub user: UserRecord,
}

/// Fields posted to `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}
