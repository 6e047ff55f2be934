//! HTTP client and wire types for the user-records service.
//!
//! The service speaks JSON over four endpoints: `GET /users`,
//! `POST /users`, `PUT /users/{id}` and `DELETE /users/{id}`. Record
//! fields use camelCase keys on the wire (`firstName`, `lastName`,
//! `email`, `department`).

use crate::error::{ApiError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A user record as the service returns it.
///
/// The text fields default to empty strings so a record whose payload
/// lacks them (the public mock service uses a different schema) still
/// loads and renders with blank cells instead of failing the whole
/// response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
}

/// Create payload: the four text fields with no identifier key at all.
/// The service assigns the identifier and echoes the stored record back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

/// Async client for the user-records service.
///
/// Requests carry no timeout: the surrounding application treats every
/// call as fire-and-forget, so a stalled request simply never completes.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the service at `base_url`.
    ///
    /// The URL must be non-empty and start with `http://` or `https://`;
    /// trailing slashes are trimmed.
    pub fn new(base_url: &str) -> Result<Self> {
        if base_url.is_empty() {
            return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .user_agent(concat!("userdash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every user record.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, "Fetching users");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let users: Vec<User> = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse user list: {}", e))
            })?;
            debug!(count = users.len(), "Fetched users");
            Ok(users)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Create a record from `draft` and return the stored record.
    pub async fn create_user(&self, draft: &UserDraft) -> Result<User> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, "Creating user");

        let response = self.http.post(&url).json(draft).send().await?;
        let status = response.status();

        if status.is_success() {
            let user: User = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse created user: {}", e))
            })?;
            debug!(id = user.id, "Created user");
            Ok(user)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Replace the record with `user`'s identifier by `user`.
    /// The response body is ignored.
    pub async fn update_user(&self, user: &User) -> Result<()> {
        let url = format!("{}/users/{}", self.base_url, user.id);
        debug!(url = %url, "Updating user");

        let response = self.http.put(&url).json(user).send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(id = user.id, "Updated user");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Delete the record with `id`. The response body is ignored.
    pub async fn delete_user(&self, id: u64) -> Result<()> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(url = %url, "Deleting user");

        let response = self.http.delete(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(id, "Deleted user");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_url() {
        assert!(matches!(
            ApiClient::new(""),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn new_rejects_missing_scheme() {
        assert!(matches!(
            ApiClient::new("example.com/api"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn new_trims_trailing_slashes() {
        let client = ApiClient::new("http://localhost:4000///").unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000");
    }

    #[test]
    fn user_serializes_with_camel_case_keys() {
        let user = User {
            id: 3,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            department: "Engineering".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["department"], "Engineering");
    }

    #[test]
    fn draft_serializes_without_id_key() {
        let draft = UserDraft {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            department: "Research".into(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["firstName"], "Grace");
    }

    #[test]
    fn user_tolerates_missing_text_fields() {
        let user: User =
            serde_json::from_str(r#"{"id": 7, "name": "Kurtis Weissnat"}"#).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.first_name, "");
        assert_eq!(user.department, "");
    }

    #[test]
    fn user_list_keeps_response_order() {
        let users: Vec<User> = serde_json::from_str(
            r#"[{"id": 2, "firstName": "B"}, {"id": 1, "firstName": "A"}]"#,
        )
        .unwrap();
        assert_eq!(users[0].id, 2);
        assert_eq!(users[1].id, 1);
    }
}
