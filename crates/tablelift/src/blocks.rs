//! Recognition-service response model.
//!
//! These types mirror the JSON returned by Textract's `AnalyzeDocument`. Keys are
//! PascalCase on the wire. Only the fields table reconstruction needs are modelled;
//! everything else (geometry, entity types, queries) is accepted and dropped.
//!
//! Unknown `BlockType`, `Relationships[].Type` and `SelectionStatus` values deserialize
//! to an `Other` variant so that a newer service version never breaks parsing.

use serde::{Deserialize, Serialize};

/// Full `AnalyzeDocument` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalyzeDocumentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadata>,

    /// Flat block list. Missing in the payload means empty.
    #[serde(default)]
    pub blocks: Vec<Block>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyze_document_model_version: Option<String>,
}

impl AnalyzeDocumentResponse {
    /// Parse a response from its JSON text (e.g. a response saved to disk).
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    #[serde(default)]
    pub pages: u32,
}

/// One node of the recognition graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    pub id: String,

    pub block_type: BlockType,

    /// `None` when the key is absent, which is common for leaf blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<SelectionStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Block {
    /// Ids of every `CHILD` relationship, in the order the service listed them.
    ///
    /// Relationships of other types are skipped. A block without relationships
    /// yields nothing.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .flatten()
            .filter(|rel| rel.kind == RelationshipType::Child)
            .flat_map(|rel| rel.ids.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    Table,
    Cell,
    MergedCell,
    SelectionElement,
    KeyValueSet,
    Title,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    #[serde(rename = "Type")]
    pub kind: RelationshipType,

    #[serde(default)]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Child,
    Value,
    MergedCell,
    Title,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    Selected,
    NotSelected,
    #[serde(other)]
    Other,
}
