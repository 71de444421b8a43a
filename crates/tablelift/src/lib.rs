//! Tablelift - table reconstruction from document-analysis block graphs.
//!
//! Tablelift sends a scanned page or PDF to a document-analysis service (AWS Textract),
//! then rebuilds every table in the response as ordered rows of cell text.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tablelift::{TableliftConfig, TextractClient, extract_tables};
//!
//! # async fn example() -> tablelift::Result<()> {
//! let config = TableliftConfig::load(None)?;
//! let recognizer = TextractClient::new(&config.textract)?;
//!
//! let document = std::fs::read("invoice.png")?;
//! let tables = extract_tables(&recognizer, &document, &config.reconstruction).await?;
//! println!("{}", serde_json::to_string_pretty(&tables)?);
//! # Ok(())
//! # }
//! ```
//!
//! Reconstruction alone needs no network access:
//!
//! ```rust
//! use tablelift::{ReconstructionConfig, assemble_tables, blocks::AnalyzeDocumentResponse};
//!
//! # fn main() -> tablelift::Result<()> {
//! let response = AnalyzeDocumentResponse::from_json(r#"{"Blocks": [
//!     {"BlockType": "TABLE", "Id": "t", "Relationships": [{"Type": "CHILD", "Ids": ["c"]}]},
//!     {"BlockType": "CELL", "Id": "c", "RowIndex": 1, "ColumnIndex": 1}
//! ]}"#)?;
//!
//! let tables = assemble_tables(&response.blocks, &ReconstructionConfig::default())?;
//! assert_eq!(tables.tables[0].rows[0].cells, vec![""]);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Reconstruction** (`reconstruction`): block index, cell text, grid building, table assembly
//! - **Recognition** (`recognizer`): the [`TableRecognizer`] seam and the Textract client
//! - **Core** (`core`): configuration, document sniffing, and the extraction pipeline
//! - **API** (`api`): the HTTP upload service
//!
//! # Features
//!
//! - `textract` (default): the SigV4-signed Textract client
//! - `api` (default): the Axum HTTP server

#![deny(unsafe_code)]

pub mod blocks;
pub mod core;
pub mod error;
pub mod reconstruction;
pub mod recognizer;
pub mod render;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::{Result, TableliftError};
pub use types::{TableResult, TableRow, TableSet};

pub use core::config::{GapPolicy, ReconstructionConfig, RowOrder, ServerConfig, TableliftConfig, TextractConfig};
pub use core::mime::{DocumentFormat, sniff_document};
pub use core::pipeline::extract_tables;

pub use reconstruction::assemble_tables;
pub use recognizer::TableRecognizer;

#[cfg(feature = "textract")]
pub use recognizer::TextractClient;
