//! Sign-in, token checks and sign-out.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use voxdial_core::error::{ApiError, Result};
use voxdial_core::models::{LoginCredentials, RefreshedToken, Token, User};

use super::client::{ApiClient, VERIFY_TOKEN_PATH};
use super::session::Session;

/// JWT segments are base64url; some issuers keep the padding.
const JWT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Returns true if the JWT has expired at `now` (Unix seconds).
///
/// A token without `exp` never expires. A token whose payload cannot be
/// decoded counts as expired.
#[must_use]
pub fn is_token_expired_at(token: &str, now: i64) -> bool {
    let Some(payload) = token.split('.').nth(1) else {
        return true;
    };
    let Ok(bytes) = JWT_ENGINE.decode(payload) else {
        return true;
    };
    let Ok(claims) = serde_json::from_slice::<Value>(&bytes) else {
        return true;
    };

    match claims.get("exp") {
        None | Some(Value::Null) => false,
        #[allow(clippy::cast_precision_loss)]
        Some(exp) => exp.as_f64().is_none_or(|exp| exp <= now as f64),
    }
}

/// Returns true if the JWT has expired.
///
/// ```
/// use voxdial_gateway::rest::is_token_expired;
///
/// assert!(is_token_expired("not-a-jwt"));
/// ```
#[must_use]
pub fn is_token_expired(token: &str) -> bool {
    is_token_expired_at(token, Utc::now().timestamp())
}

impl ApiClient {
    /// Signs in with the password grant and stores the session.
    ///
    /// Credentials are trimmed; blank ones are rejected without a request.
    ///
    /// # Errors
    ///
    /// `DataError::ValidationFailed` for blank credentials, otherwise any
    /// request failure. A 422 surfaces as `ApiError::Validation`.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session> {
        let credentials = LoginCredentials::new(&credentials.username, &credentials.password);
        credentials.validate()?;

        let token: Token = self
            .post("/v1/login")
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
                ("scope", ""),
            ])
            .send_json()
            .await?;

        let session = Session::new(
            token.access_token,
            User::from_login(&credentials.username, Utc::now()),
        );
        self.set_session(session.clone());
        info!(username = %credentials.username, "Signed in");
        Ok(session)
    }

    /// Clears the session.
    pub fn logout(&self) {
        self.clear_session();
        info!("Signed out");
    }

    /// Returns true if a user is signed in with an unexpired token.
    ///
    /// An expired token is cleared.
    pub fn is_authenticated(&self) -> bool {
        let session = self.session();
        let (Some(token), Some(_)) = (session.token(), session.user()) else {
            return false;
        };
        if is_token_expired(token) {
            warn!("Token expired, clearing session");
            self.logout();
            return false;
        }
        true
    }

    /// Asks the backend whether the token is still valid.
    ///
    /// A missing verification route (404) trusts the local token.
    pub async fn verify_token(&self) -> bool {
        match self.get(VERIFY_TOKEN_PATH).send().await {
            Ok(_) => true,
            Err(e) if matches!(e.as_api_error(), Some(ApiError::NotFound { .. })) => {
                warn!("Token verification endpoint not available, trusting local token");
                true
            }
            Err(e) => {
                warn!(error = %e, "Token verification failed");
                false
            }
        }
    }

    /// Exchanges the token for a new one and stores it.
    ///
    /// Returns `None` if the backend declines or the request fails.
    pub async fn refresh_token(&self) -> Option<String> {
        match self
            .post("/v1/refresh-token")
            .send_json::<RefreshedToken>()
            .await
        {
            Ok(RefreshedToken { token: Some(token) }) if !token.is_empty() => {
                self.store_token(token.clone());
                info!("Token refreshed");
                Some(token)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testing::stub;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Form, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use voxdial_core::error::{DataError, VoxdialError};

    fn jwt(claims: &Value) -> String {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        format!(
            "{}.{}.sig",
            engine.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
            engine.encode(claims.to_string())
        )
    }

    #[test]
    fn test_token_expiry() {
        let now = 1_700_000_000;
        assert!(!is_token_expired_at(&jwt(&json!({ "exp": now + 60 })), now));
        assert!(is_token_expired_at(&jwt(&json!({ "exp": now })), now));
        assert!(is_token_expired_at(&jwt(&json!({ "exp": now - 1 })), now));
        assert!(!is_token_expired_at(&jwt(&json!({ "sub": "ops" })), now));
    }

    #[test]
    fn test_undecodable_token_is_expired() {
        assert!(is_token_expired_at("abc", 0));
        assert!(is_token_expired_at("a.!!!.c", 0));
        assert!(is_token_expired_at(&format!("a.{}.c", "bm90IGpzb24"), 0));
    }

    #[tokio::test]
    async fn test_login_sends_form_and_stores_session() {
        let router = Router::new().route(
            "/v1/login",
            post(|Form(fields): Form<HashMap<String, String>>| async move {
                assert_eq!(fields["grant_type"], "password");
                assert_eq!(fields["username"], "ops@example.com");
                assert_eq!(fields["password"], "hunter2");
                assert_eq!(fields["scope"], "");
                Json(json!({ "access_token": "tok123", "token_type": "bearer" }))
            }),
        );
        let (client, _) = stub(router).await;

        let session = client
            .login(&LoginCredentials::new("  ops@example.com ", " hunter2 "))
            .await
            .unwrap();
        assert_eq!(session.token(), Some("tok123"));
        assert_eq!(client.token().as_deref(), Some("tok123"));
        assert_eq!(session.user().unwrap().email, "ops@example.com");

        client.logout();
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        let (client, _) = stub(Router::new()).await;
        let err = client
            .login(&LoginCredentials::new("   ", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VoxdialError::Data(DataError::ValidationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_verify_token() {
        let router = Router::new().route(
            "/v1/verify-token",
            get(|headers: HeaderMap| async move {
                if headers.get("authorization").is_some_and(|v| v == "Bearer good") {
                    StatusCode::OK
                } else {
                    StatusCode::FORBIDDEN
                }
            }),
        );
        let (client, _) = stub(router).await;

        client.set_session(Session::with_token("good"));
        assert!(client.verify_token().await);

        client.set_session(Session::with_token("bad"));
        assert!(!client.verify_token().await);
    }

    #[tokio::test]
    async fn test_verify_token_missing_route_trusts_token() {
        let (client, notices) = stub(Router::new()).await;
        client.set_session(Session::with_token("tok"));

        assert!(client.verify_token().await);
        assert!(notices.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_token() {
        let router = Router::new().route(
            "/v1/refresh-token",
            post(|| async { Json(json!({ "token": "fresh" })) }),
        );
        let (client, _) = stub(router).await;
        client.set_session(Session::with_token("old"));

        assert_eq!(client.refresh_token().await.as_deref(), Some("fresh"));
        assert_eq!(client.token().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_refresh_token_failure_keeps_session() {
        let (client, _) = stub(Router::new()).await;
        client.set_session(Session::with_token("old"));

        assert!(client.refresh_token().await.is_none());
        assert_eq!(client.token().as_deref(), Some("old"));
    }

    #[test]
    fn test_is_authenticated_clears_expired_token() {
        let client = ApiClient::new(voxdial_core::config::ApiSettings::default()).unwrap();
        assert!(!client.is_authenticated());

        let expired = jwt(&json!({ "exp": 1 }));
        client.set_session(Session::new(expired, User::from_login("ops", Utc::now())));
        assert!(!client.is_authenticated());
        assert!(client.token().is_none());

        let open_ended = jwt(&json!({ "sub": "ops" }));
        client.set_session(Session::new(open_ended, User::from_login("ops", Utc::now())));
        assert!(client.is_authenticated());
    }
}
