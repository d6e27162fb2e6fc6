//! JSON shapes exchanged with the reqres API.

use serde::{Deserialize, Serialize};

use crate::domain::{CreatedUser, NewUser, UserRecord};

/// Envelope of `GET /users?page=N`. Only `data` is consumed.
#[derive(Debug, Deserialize)]
pub struct ListUsersResponse {
    pub data: Vec<ListedUser>,
}

#[derive(Debug, Deserialize)]
pub struct ListedUser {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUserRequest<'a> {
    pub name: &'a str,
    pub job: &'a str,
}

/// Body of a successful `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserResponse {
    pub id: IdValue,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// reqres returns string ids from create, but a number is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Text(String),
    Number(u64),
}

/// Body of a failed request, e.g. `{"error": "Missing API key"}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

impl From<ListedUser> for UserRecord {
    fn from(user: ListedUser) -> Self {
        UserRecord::listed(
            user.id,
            user.first_name,
            user.last_name,
            user.email,
            user.avatar,
        )
    }
}

impl From<CreateUserResponse> for CreatedUser {
    fn from(response: CreateUserResponse) -> Self {
        let id = match response.id {
            IdValue::Text(id) => id,
            IdValue::Number(id) => id.to_string(),
        };
        CreatedUser {
            id,
            name: response.name,
            job: response.job,
        }
    }
}

impl<'a> From<&'a NewUser> for CreateUserRequest<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: &user.name,
            job: &user.job,
        }
    }
}

/// Pulls a structured error message out of a failure body.
///
/// Non-JSON bodies, non-string `error` fields and blank messages yield `None`.
pub fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.filter(|message| !message.trim().is_empty())
}
