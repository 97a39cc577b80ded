//! Authentication models.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Username and password for the password grant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// Username (the backend accepts the account e-mail).
    pub username: String,
    /// Password.
    pub password: String,
}

impl LoginCredentials {
    /// Creates credentials, trimming surrounding whitespace.
    #[must_use]
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self {
            username: username.as_ref().trim().to_string(),
            password: password.as_ref().trim().to_string(),
        }
    }

    /// Rejects empty credentials before any request is made.
    ///
    /// # Errors
    ///
    /// Returns `DataError::ValidationFailed` if either field is blank.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(DataError::ValidationFailed {
                field: "credentials".to_string(),
                reason: "Username and password are required".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// OAuth2 token response of `POST /v1/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Bearer token.
    pub access_token: String,
    /// Token type, normally `bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Response of `POST /v1/refresh-token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RefreshedToken {
    /// The new token, absent when the backend declined.
    #[serde(default)]
    pub token: Option<String>,
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access.
    #[default]
    Admin,
    /// Call agent.
    Agent,
}

/// The signed-in user.
///
/// The login endpoint only returns a token, so the profile is derived from
/// the username at sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier.
    pub id: String,
    /// E-mail address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    #[serde(default)]
    pub role: UserRole,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl User {
    /// Builds the local profile for a freshly signed-in username.
    #[must_use]
    pub fn from_login(username: &str, created_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            id: "1".to_string(),
            email: username.to_string(),
            name: "User".to_string(),
            role: UserRole::Admin,
            created_at: created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_are_trimmed() {
        let creds = LoginCredentials::new("  admin@example.com ", " secret\n");
        assert_eq!(creds.username, "admin@example.com");
        assert_eq!(creds.password, "secret");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let creds = LoginCredentials::new("admin", "   ");
        let err = creds.validate().unwrap_err();
        assert!(err.to_string().contains("Username and password are required"));
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = LoginCredentials::new("admin", "hunter2");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_token_type_defaults() {
        let token: Token = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn test_user_wire_names() {
        let user = User::from_login("ops@example.com", chrono::Utc::now());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "admin");
        assert!(json.get("createdAt").is_some());
    }
}
