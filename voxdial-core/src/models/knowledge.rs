//! Knowledge base models.

use serde::{Deserialize, Serialize};

/// Document kind, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeFileType {
    /// PDF.
    Pdf,
    /// Word document.
    Docx,
    /// Plain text and anything unrecognized.
    Txt,
    /// Comma separated values.
    Csv,
}

impl KnowledgeFileType {
    /// Classifies a file name by its extension.
    ///
    /// ```
    /// use voxdial_core::models::KnowledgeFileType;
    ///
    /// assert_eq!(KnowledgeFileType::from_filename("Pricing.DOC"), KnowledgeFileType::Docx);
    /// assert_eq!(KnowledgeFileType::from_filename("notes.md"), KnowledgeFileType::Txt);
    /// ```
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Self::Pdf,
            "docx" | "doc" => Self::Docx,
            "csv" => Self::Csv,
            _ => Self::Txt,
        }
    }
}

/// Ingestion state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeDocumentStatus {
    /// Stored, not processed.
    #[default]
    Uploaded,
    /// Being processed.
    Processing,
    /// Embedded and searchable.
    Vectorized,
    /// Processing failed.
    Failed,
}

/// A knowledge base document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeDocument {
    /// Identifier.
    pub id: String,
    /// Stored file name.
    pub filename: String,
    /// File name as uploaded.
    #[serde(default)]
    pub original_name: String,
    /// Document kind.
    pub file_type: KnowledgeFileType,
    /// Size in bytes.
    #[serde(default)]
    pub file_size: u64,
    /// Ingestion state.
    #[serde(default)]
    pub status: KnowledgeDocumentStatus,
    /// Whether embeddings exist.
    #[serde(default)]
    pub vectorized: bool,
    /// Upload time.
    pub uploaded_at: String,
    /// Processing completion time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
}

/// One page of `GET /v1/knowledge/documents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeDocumentPage {
    /// Documents on this page.
    pub documents: Vec<KnowledgeDocument>,
    /// Total documents.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Number of pages.
    pub total_pages: u32,
}

impl KnowledgeDocumentPage {
    /// Page returned when the backend has no listing endpoint.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            documents: Vec::new(),
            total: 0,
            page: 1,
            limit: 20,
            total_pages: 0,
        }
    }
}

/// Knowledge base totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeStats {
    /// All documents.
    pub total_documents: u64,
    /// Total size in bytes.
    pub total_size: u64,
    /// Being processed.
    pub processing_documents: u64,
    /// Searchable.
    pub vectorized_documents: u64,
    /// Failed processing.
    pub failed_documents: u64,
    /// Awaiting processing.
    pub uploaded_documents: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_fallbacks() {
        assert_eq!(KnowledgeFileType::from_filename("a.pdf"), KnowledgeFileType::Pdf);
        assert_eq!(KnowledgeFileType::from_filename("a.CSV"), KnowledgeFileType::Csv);
        assert_eq!(KnowledgeFileType::from_filename("README"), KnowledgeFileType::Txt);
        assert_eq!(KnowledgeFileType::from_filename("a.rtf"), KnowledgeFileType::Txt);
    }

    #[test]
    fn test_document_camel_case() {
        let json = r#"{
            "id": "doc-1",
            "filename": "faq.pdf",
            "originalName": "FAQ.pdf",
            "fileType": "pdf",
            "fileSize": 2048,
            "status": "vectorized",
            "vectorized": true,
            "uploadedAt": "2024-12-01T09:30:00Z"
        }"#;
        let doc: KnowledgeDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.status, KnowledgeDocumentStatus::Vectorized);
        assert_eq!(doc.file_size, 2048);
        assert!(doc.processed_at.is_none());
    }

    #[test]
    fn test_stats_tolerate_missing_fields() {
        let stats: KnowledgeStats = serde_json::from_str(r#"{"totalDocuments": 3}"#).unwrap();
        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.failed_documents, 0);
    }
}
