//! Knowledge base endpoints.
//!
//! The backend may not serve these routes yet, so a 404 yields an empty
//! result instead of an error.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use voxdial_core::error::{ApiError, Result, VoxdialError};
use voxdial_core::models::{KnowledgeDocument, KnowledgeDocumentPage, KnowledgeStats};

use super::client::ApiClient;

/// Acknowledgement when deletion succeeded.
pub const DOCUMENT_DELETED_TEXT: &str = "Document deleted successfully";
/// Acknowledgement when the backend has no delete route.
pub const DELETE_UNAVAILABLE_TEXT: &str = "Delete functionality not available yet";

/// Outcome of a document deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeDeletion {
    /// Whether the document is gone.
    pub success: bool,
    /// What happened.
    pub message: String,
}

fn is_not_found(error: &VoxdialError) -> bool {
    matches!(error.as_api_error(), Some(ApiError::NotFound { .. }))
}

impl ApiClient {
    /// One page of uploaded documents.
    pub async fn knowledge_documents(&self, page: u32, limit: u32) -> Result<KnowledgeDocumentPage> {
        match self
            .get("/v1/knowledge/documents")
            .query("page", page.to_string())
            .query("limit", limit.to_string())
            .send_json()
            .await
        {
            Err(e) if is_not_found(&e) => {
                info!("Knowledge documents endpoint not available");
                Ok(KnowledgeDocumentPage::empty())
            }
            other => other,
        }
    }

    /// Details of one document, `None` if unknown.
    pub async fn knowledge_document(&self, id: &str) -> Result<Option<KnowledgeDocument>> {
        match self
            .get(&format!("/v1/knowledge/documents/{id}"))
            .send_json()
            .await
        {
            Ok(document) => Ok(Some(document)),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Deletes a document. Failures are reported in the result.
    pub async fn delete_knowledge_document(&self, id: &str) -> KnowledgeDeletion {
        match self
            .delete(&format!("/v1/knowledge/documents/{id}"))
            .send()
            .await
        {
            Ok(_) => {
                info!(id, "Knowledge document deleted");
                KnowledgeDeletion {
                    success: true,
                    message: DOCUMENT_DELETED_TEXT.to_string(),
                }
            }
            Err(e) if is_not_found(&e) => KnowledgeDeletion {
                success: false,
                message: DELETE_UNAVAILABLE_TEXT.to_string(),
            },
            Err(e) => {
                warn!(id, error = %e, "Failed to delete knowledge document");
                KnowledgeDeletion {
                    success: false,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Document counts and total size.
    pub async fn knowledge_stats(&self) -> Result<KnowledgeStats> {
        match self.get("/v1/knowledge/stats").send_json().await {
            Err(e) if is_not_found(&e) => {
                info!("Knowledge stats endpoint not available");
                Ok(KnowledgeStats::default())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testing::stub;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_missing_routes_yield_empty_results() {
        let (client, _) = stub(Router::new()).await;

        assert_eq!(
            client.knowledge_documents(1, 20).await.unwrap(),
            KnowledgeDocumentPage::empty()
        );
        assert!(client.knowledge_document("doc-1").await.unwrap().is_none());
        assert_eq!(client.knowledge_stats().await.unwrap(), KnowledgeStats::default());

        let deletion = client.delete_knowledge_document("doc-1").await;
        assert!(!deletion.success);
        assert_eq!(deletion.message, DELETE_UNAVAILABLE_TEXT);
    }

    #[tokio::test]
    async fn test_document_page() {
        let router = Router::new().route(
            "/v1/knowledge/documents",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["page"], "2");
                assert_eq!(params["limit"], "5");
                Json(json!({
                    "documents": [{
                        "id": "doc-1",
                        "filename": "faq.pdf",
                        "originalName": "FAQ.pdf",
                        "fileType": "pdf",
                        "fileSize": 2048,
                        "status": "vectorized",
                        "vectorized": true,
                        "uploadedAt": "2024-05-01T10:00:00Z"
                    }],
                    "total": 6,
                    "page": 2,
                    "limit": 5,
                    "totalPages": 2
                }))
            }),
        );
        let (client, _) = stub(router).await;

        let page = client.knowledge_documents(2, 5).await.unwrap();
        assert_eq!(page.total_pages, 2);
        assert!(page.documents[0].vectorized);
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let router = Router::new().route(
            "/v1/knowledge/documents/:id",
            delete(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let (client, _) = stub(router).await;

        let deletion = client.delete_knowledge_document("doc-1").await;
        assert!(!deletion.success);
        assert!(deletion.message.contains("500"));
    }

    #[tokio::test]
    async fn test_stats_server_error_propagates() {
        let router = Router::new().route(
            "/v1/knowledge/stats",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let (client, _) = stub(router).await;
        assert!(client.knowledge_stats().await.is_err());
    }
}
