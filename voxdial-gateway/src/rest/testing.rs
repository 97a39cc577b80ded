//! Local HTTP stubs for client tests.

use axum::Router;
use std::sync::Arc;
use voxdial_core::config::ApiSettings;
use voxdial_core::notice::CollectingNotifier;

use super::ApiClient;

/// Serves `router` on an ephemeral port and returns its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on.
pub(crate) fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Serves `router` and returns a client pointed at it.
pub(crate) async fn stub(router: Router) -> (ApiClient, CollectingNotifier) {
    let base_url = serve(router).await;
    client_for(&base_url)
}

/// A client for `base_url` that collects its notices.
pub(crate) fn client_for(base_url: &str) -> (ApiClient, CollectingNotifier) {
    let notices = CollectingNotifier::new();
    let client = ApiClient::new(ApiSettings {
        base_url: base_url.to_string(),
        ..ApiSettings::default()
    })
    .unwrap()
    .with_notifier(Arc::new(notices.clone()));
    (client, notices)
}
