use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};
use strum::EnumIter;

/// Minimum password length accepted by the user management endpoints.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Newsroom role assigned to a staff account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Editor,
    Author,
}

impl UserRole {
    /// Return the canonical string representation used by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "author" => Ok(Self::Author),
            _ => Err("unknown user role"),
        }
    }
}

/// A staff account as returned by `/auth/login` and `/users`.
///
/// Fields the client does not model are kept in [`UserRecord::extra`] so a
/// record cached in the credential store reads back exactly as it was written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    /// Backend identifier.
    pub id: i64,

    /// Login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Short display name, when the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Full legal name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Contact email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Newsroom role.
    pub role: UserRole,

    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Creation timestamp as formatted by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Any additional fields sent by the backend.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Create a record with only the required fields populated.
    pub fn new(id: i64, role: UserRole) -> Self {
        Self {
            id,
            username: None,
            name: None,
            full_name: None,
            email: None,
            role,
            avatar: None,
            created_at: None,
            extra: Map::new(),
        }
    }

    /// Best available human-readable label for the account.
    pub fn display_name(&self) -> String {
        self.full_name
            .as_deref()
            .or(self.name.as_deref())
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .map_or_else(|| format!("user #{}", self.id), str::to_string)
    }
}

/// Payload for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar: String,
}

/// Payload for `PUT /users/:id`. Passwords change through [`PasswordChange`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar: String,
}

impl From<CreateUserRequest> for UpdateUserRequest {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            full_name: request.full_name,
            role: request.role,
            avatar: request.avatar,
        }
    }
}

/// Payload for `PATCH /users/:id/password`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordChange {
    pub password: String,
}

/// Filters accepted by `GET /users`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Restrict to one role; `None` lists every role.
    pub role: Option<UserRole>,
    /// Free-text search over name and email.
    pub search: Option<String>,
}

impl UserQuery {
    /// Query-string pairs in the order the backend documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(role) = self.role {
            pairs.push(("role", role.as_str().to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

/// Response of `GET /users/stats/overview`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub admins: u64,
    #[serde(default)]
    pub editors: u64,
    #[serde(default)]
    pub authors: u64,
}
