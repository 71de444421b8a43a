//! Document → tables pipeline.
//!
//! Ties the outer collaborators to the reconstruction core: sniff the upload,
//! hand it to the recognizer, rebuild the tables from the returned blocks.

use crate::core::config::ReconstructionConfig;
use crate::core::mime::sniff_document;
use crate::reconstruction::assemble_tables;
use crate::recognizer::TableRecognizer;
use crate::types::TableSet;
use crate::Result;

/// Extract every table from one document.
///
/// The recognizer is passed in rather than looked up, so callers decide whether it
/// is the real service or a stand-in.
///
/// # Errors
///
/// - `TableliftError::Validation` / `UnsupportedFormat` - empty or unsupported document;
///   the recognizer is not called
/// - `TableliftError::Recognition` - propagated from the recognizer
/// - `TableliftError::NoTablesFound` - the document has no tables
/// - `TableliftError::Structure` - the block graph is inconsistent
pub async fn extract_tables(
    recognizer: &dyn TableRecognizer,
    document: &[u8],
    config: &ReconstructionConfig,
) -> Result<TableSet> {
    let format = sniff_document(document)?;
    tracing::info!(
        "Analyzing {} byte {} document with {}",
        document.len(),
        format,
        recognizer.name()
    );

    let response = recognizer.analyze(document).await?;
    tracing::debug!("Recognizer returned {} blocks", response.blocks.len());

    let tables = assemble_tables(&response.blocks, config)?;
    tracing::info!("Reconstructed {} table(s)", tables.len());

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TableliftError;
    use crate::blocks::AnalyzeDocumentResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    struct Canned {
        json: &'static str,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(json: &'static str) -> Self {
            Self {
                json,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TableRecognizer for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn analyze(&self, _document: &[u8]) -> Result<AnalyzeDocumentResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            AnalyzeDocumentResponse::from_json(self.json)
        }
    }

    struct Failing;

    #[async_trait]
    impl TableRecognizer for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        async fn analyze(&self, _document: &[u8]) -> Result<AnalyzeDocumentResponse> {
            Err(TableliftError::recognition("service unavailable"))
        }
    }

    #[tokio::test]
    async fn test_extract_tables_end_to_end() {
        let recognizer = Canned::new(
            r#"{"Blocks": [
                {"BlockType": "TABLE", "Id": "t", "Relationships": [{"Type": "CHILD", "Ids": ["c"]}]},
                {"BlockType": "CELL", "Id": "c", "RowIndex": 1, "ColumnIndex": 1,
                 "Relationships": [{"Type": "CHILD", "Ids": ["w"]}]},
                {"BlockType": "WORD", "Id": "w", "Text": "Qty"}
            ]}"#,
        );

        let set = extract_tables(&recognizer, PNG, &ReconstructionConfig::default())
            .await
            .unwrap();
        assert_eq!(set.tables[0].rows[0].cells, vec!["Qty "]);
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_document_skips_recognizer() {
        let recognizer = Canned::new(r#"{"Blocks": []}"#);

        let err = extract_tables(&recognizer, b"plain text", &ReconstructionConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TableliftError::UnsupportedFormat(_)));
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_tables_found() {
        let recognizer = Canned::new(r#"{"Blocks": [{"BlockType": "PAGE", "Id": "p"}]}"#);

        let err = extract_tables(&recognizer, PNG, &ReconstructionConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TableliftError::NoTablesFound));
    }

    #[tokio::test]
    async fn test_recognizer_failure_propagates() {
        let err = extract_tables(&Failing, PNG, &ReconstructionConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TableliftError::Recognition { .. }));
        assert!(!err.is_client_error());
    }
}
