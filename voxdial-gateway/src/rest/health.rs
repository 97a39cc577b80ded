//! Backend reachability.

use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};
use voxdial_core::error::{ApiError, NetworkError, Result, VoxdialError};
use voxdial_core::models::{HealthReport, HealthStatus};

use super::client::{ApiClient, message_text};

/// Root message reported when the backend is not reachable.
pub const BACKEND_NOT_CONNECTED: &str = "AI Calling Platform API - Backend Not Connected";

/// Health message when the check fails.
pub const BACKEND_UNREACHABLE: &str = "Backend API is not accessible";

/// Version reported by a healthy backend.
pub const API_VERSION: &str = "v1.0.0";

fn is_not_connected(error: &VoxdialError) -> bool {
    matches!(
        error,
        VoxdialError::Network(NetworkError::ConnectionFailed { .. })
            | VoxdialError::Api(ApiError::NotFound { .. })
    )
}

impl ApiClient {
    async fn fetch_root(&self) -> Result<String> {
        self.get("/").send_text().await.map(|body| message_text(&body))
    }

    /// Welcome message of `GET /`.
    ///
    /// Returns [`BACKEND_NOT_CONNECTED`] when the connection is refused or
    /// the route is missing.
    ///
    /// # Errors
    ///
    /// Any other failure of the request.
    pub async fn root_message(&self) -> Result<String> {
        match self.fetch_root().await {
            Ok(message) => Ok(message),
            Err(e) if is_not_connected(&e) => {
                info!(error = %e, "Root endpoint not available");
                Ok(BACKEND_NOT_CONNECTED.to_string())
            }
            Err(e) => Err(e),
        }
    }

    /// Checks that the backend answers `GET /`.
    ///
    /// Never fails; an unreachable backend yields an unhealthy report.
    pub async fn health_check(&self) -> HealthReport {
        let started = Instant::now();
        let result = self.fetch_root().await;
        let response_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(message) => HealthReport {
                status: HealthStatus::Healthy,
                message,
                timestamp: Utc::now(),
                version: Some(API_VERSION.to_string()),
                response_time_ms: Some(response_time_ms),
            },
            Err(e) => {
                warn!(error = %e, "Health check failed");
                HealthReport {
                    status: HealthStatus::Unhealthy,
                    message: BACKEND_UNREACHABLE.to_string(),
                    timestamp: Utc::now(),
                    version: None,
                    response_time_ms: Some(response_time_ms),
                }
            }
        }
    }
}
