use shared::models::{
    CreateUserRequest, MIN_PASSWORD_LEN, PasswordChange, UpdateUserRequest, UserList, UserQuery,
    UserRecord, UserStats,
};

use super::with_query;
use crate::{
    api::{ApiClient, HttpMethod, RequestOptions},
    error::ClientError,
};

/// `/users` endpoints. The backend only serves these to admins.
#[derive(Debug, Clone)]
pub struct Users {
    api: ApiClient,
}

impl Users {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Accounts matching `query`.
    pub async fn list(&self, query: &UserQuery) -> Result<Vec<UserRecord>, ClientError> {
        let path = with_query("/users", &query.to_pairs());
        let list: UserList = self.api.request_data(&path, RequestOptions::get()).await?;
        Ok(list.users)
    }

    /// Account counts per role.
    pub async fn stats(&self) -> Result<UserStats, ClientError> {
        self.api
            .request_data("/users/stats/overview", RequestOptions::get())
            .await
    }

    /// Creates an account. The password must be at least six characters.
    pub async fn create(&self, request: &CreateUserRequest) -> Result<(), ClientError> {
        require_identity(&request.username, &request.email)?;
        check_password(&request.password)?;
        self.api
            .request_ack("/users", RequestOptions::json(HttpMethod::Post, request)?)
            .await
    }

    /// Updates profile fields of account `id`; the password is untouched.
    pub async fn update(&self, id: i64, request: &UpdateUserRequest) -> Result<(), ClientError> {
        require_identity(&request.username, &request.email)?;
        self.api
            .request_ack(
                &format!("/users/{id}"),
                RequestOptions::json(HttpMethod::Put, request)?,
            )
            .await
    }

    /// Sets a new password for account `id`.
    pub async fn change_password(&self, id: i64, password: &str) -> Result<(), ClientError> {
        check_password(password)?;
        let change = PasswordChange {
            password: password.to_string(),
        };
        self.api
            .request_ack(
                &format!("/users/{id}/password"),
                RequestOptions::json(HttpMethod::Patch, &change)?,
            )
            .await
    }

    /// Deletes an account other than the one currently logged in.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        if self.api.session().current_user().is_some_and(|user| user.id == id) {
            return Err(ClientError::Validation(
                "you cannot delete your own account".to_string(),
            ));
        }
        self.api
            .request_ack(&format!("/users/{id}"), RequestOptions::delete())
            .await
    }
}

fn require_identity(username: &str, email: &str) -> Result<(), ClientError> {
    if username.trim().is_empty() || email.trim().is_empty() {
        return Err(ClientError::Validation(
            "username and email are required".to_string(),
        ));
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), ClientError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
