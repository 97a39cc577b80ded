//! REST client for the calling platform backend.

use parking_lot::RwLock;
use reqwest::{Client, Method, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use voxdial_core::config::ApiSettings;
use voxdial_core::error::{ApiError, DataError, NetworkError, Result};
use voxdial_core::models::HttpValidationError;
use voxdial_core::notice::{Notice, Notifier, TracingNotifier};

use super::session::Session;

/// Token verification path. A 404 here raises no notice.
pub(crate) const VERIFY_TOKEN_PATH: &str = "/v1/verify-token";

/// Notice for a 401.
pub const SESSION_EXPIRED_TEXT: &str = "Session expired. Please login again.";
/// Notice for a 403.
pub const ACCESS_DENIED_TEXT: &str = "Access denied. Insufficient permissions.";
/// Notice for a 404.
pub const NOT_FOUND_TEXT: &str = "Resource not found.";
/// Notice for a 5xx.
pub const SERVER_ERROR_TEXT: &str = "Server error. Please try again later.";
/// Notice for a timed out request.
pub const TIMEOUT_TEXT: &str = "Request timeout. Please try again.";
/// Notice for a request that got no response.
pub const NETWORK_ERROR_TEXT: &str = "Network error. Please check your connection.";

/// REST client holding the signed-in session.
///
/// Every request carries `Authorization: Bearer <token>` while a session
/// token is present. Failed requests raise a notice and come back as
/// [`VoxdialError`](voxdial_core::error::VoxdialError); a 401 also clears
/// the session.
///
/// # Example
///
/// ```no_run
/// use voxdial_core::config::ApiSettings;
/// use voxdial_core::models::LoginCredentials;
/// use voxdial_gateway::rest::ApiClient;
///
/// # async fn run() -> voxdial_core::error::Result<()> {
/// let client = ApiClient::new(ApiSettings::default())?;
/// client.login(&LoginCredentials::new("ops@example.com", "hunter2")).await?;
/// let campaigns = client.campaigns().await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    settings: ApiSettings,
    http_client: Client,
    session: RwLock<Session>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Creates a client with no session.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the HTTP client cannot be created.
    pub fn new(settings: ApiSettings) -> std::result::Result<Self, NetworkError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            settings
                .user_agent
                .parse()
                .map_err(|_| NetworkError::ConnectionFailed {
                    reason: "Invalid user agent".to_string(),
                })?,
        );

        let http_client = Client::builder()
            .timeout(settings.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| NetworkError::ConnectionFailed {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            settings,
            http_client,
            session: RwLock::new(Session::default()),
            notifier: Arc::new(TracingNotifier),
        })
    }

    /// Sets where notices go. Defaults to [`TracingNotifier`].
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Starts with the given session.
    #[must_use]
    pub fn with_session(self, session: Session) -> Self {
        *self.session.write() = session;
        self
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Returns a copy of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    /// Returns the current token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.read().token().map(str::to_string)
    }

    /// Replaces the session.
    pub fn set_session(&self, session: Session) {
        *self.session.write() = session;
    }

    pub(crate) fn store_token(&self, token: String) {
        self.session.write().set_token(token);
    }

    pub(crate) fn clear_session(&self) {
        self.session.write().clear();
    }

    /// Creates a GET request builder.
    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::GET, path)
    }

    /// Creates a POST request builder.
    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::POST, path)
    }

    /// Creates a PUT request builder.
    #[must_use]
    pub fn put(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::PUT, path)
    }

    /// Creates a DELETE request builder.
    #[must_use]
    pub fn delete(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::DELETE, path)
    }

    /// Builds the full URL for a path.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
        }
    }

    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    /// Maps a transport failure and raises its notice.
    fn transport_error(&self, error: &reqwest::Error) -> NetworkError {
        if error.is_timeout() {
            self.notify(Notice::error(TIMEOUT_TEXT));
            NetworkError::Timeout {
                timeout_ms: self.settings.timeout_ms,
            }
        } else if error.is_connect() {
            self.notify(Notice::error(NETWORK_ERROR_TEXT));
            NetworkError::ConnectionFailed {
                reason: error.to_string(),
            }
        } else {
            self.notify(Notice::error(NETWORK_ERROR_TEXT));
            NetworkError::Http {
                status_code: error.status().map_or(0, |s| s.as_u16()),
                reason: error.to_string(),
            }
        }
    }

    /// Maps a rejected response and raises its notice.
    fn status_error(&self, status: u16, path: &str, body: &str) -> ApiError {
        match status {
            401 => {
                self.clear_session();
                self.notify(Notice::error(SESSION_EXPIRED_TEXT));
            }
            403 => self.notify(Notice::error(ACCESS_DENIED_TEXT)),
            404 if path != VERIFY_TOKEN_PATH => self.notify(Notice::error(NOT_FOUND_TEXT)),
            500..=599 => self.notify(Notice::error(SERVER_ERROR_TEXT)),
            _ => {}
        }

        if status == 422 {
            let message = serde_json::from_str::<HttpValidationError>(body)
                .map_or_else(|_| body.to_string(), |e| e.summary());
            return ApiError::Validation { message };
        }
        ApiError::from_status(status, path, body)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.settings.base_url)
            .field("session", &*self.session.read())
            .finish_non_exhaustive()
    }
}

enum Body {
    Empty,
    Json(std::result::Result<Vec<u8>, String>),
    Form(Vec<(String, String)>),
}

/// Request builder for backend calls.
pub struct RequestBuilder<'a> {
    client: &'a ApiClient,
    method: Method,
    path: String,
    query_params: Vec<(String, String)>,
    body: Body,
}

impl<'a> RequestBuilder<'a> {
    fn new(client: &'a ApiClient, method: Method, path: &str) -> Self {
        Self {
            client,
            method,
            path: path.to_string(),
            query_params: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Adds multiple query parameters.
    #[must_use]
    pub fn queries<K: Into<String>>(mut self, params: impl IntoIterator<Item = (K, String)>) -> Self {
        self.query_params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// Sets the request body as JSON.
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Body::Json(serde_json::to_vec(body).map_err(|e| e.to_string()));
        self
    }

    /// Sets an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = Body::Form(
            fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
        self
    }

    /// Sends the request and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if no response arrived, `ApiError` for a
    /// non-success status and `DataError` if the body could not be
    /// serialized.
    pub async fn send(self) -> Result<Response> {
        let client = self.client;
        let url = client.build_url(&self.path);

        debug!(method = %self.method, path = %self.path, "Sending request");

        let mut request = client.http_client.request(self.method.clone(), &url);
        if !self.query_params.is_empty() {
            request = request.query(&self.query_params);
        }
        if let Some(token) = client.token() {
            request = request.bearer_auth(token);
        }
        request = match self.body {
            Body::Empty => request,
            Body::Json(Ok(bytes)) => request.body(bytes),
            Body::Json(Err(reason)) => return Err(DataError::JsonError { reason }.into()),
            Body::Form(fields) => request
                .form(&fields)
                .header(header::ACCEPT, "application/json"),
        };

        let response = request.send().await.map_err(|e| {
            let error = client.transport_error(&e);
            warn!(method = %self.method, path = %self.path, error = %error, "Request failed");
            error
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = client.status_error(status.as_u16(), &self.path, &body);
        warn!(
            method = %self.method,
            path = %self.path,
            status = status.as_u16(),
            error = %error,
            "Request rejected"
        );
        Err(error.into())
    }

    /// Sends the request and deserializes the response as JSON.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send), plus `ApiError::Decode` for a body that
    /// does not match `T`.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T> {
        let path = self.path.clone();
        let response = self.send().await?;
        let bytes = response.bytes().await.map_err(|e| ApiError::Decode {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::Decode {
                path,
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Sends the request and returns the body as text.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send).
    pub async fn send_text(self) -> Result<String> {
        let path = self.path.clone();
        let response = self.send().await?;
        response.text().await.map_err(|e| {
            ApiError::Decode {
                path,
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Sends the request and reads the acknowledgement text.
    ///
    /// Accepts a JSON string, a `{ "message": ... }` object or plain text.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send).
    pub async fn send_message(self) -> Result<String> {
        self.send_text().await.map(|text| message_text(&text))
    }
}

/// Extracts the human readable text from an acknowledgement body.
pub(crate) fn message_text(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(text)) => text,
        Ok(serde_json::Value::Object(map)) => match map.get("message") {
            Some(serde_json::Value::String(text)) => text.clone(),
            _ => body.to_string(),
        },
        _ => body.to_string(),
    }
}
