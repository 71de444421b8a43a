use serde::{Deserialize, Serialize};

/// Every table reconstructed from one document.
///
/// This is the JSON body of a successful `/upload` response:
/// `{"tables": [{"tableId": 0, "rows": [{"rowId": 1, "cells": ["a ", "b "]}]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSet {
    pub tables: Vec<TableResult>,
}

impl TableSet {
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// One reconstructed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResult {
    /// Zero-based position among the TABLE blocks of the response.
    pub table_id: usize,
    pub rows: Vec<TableRow>,
}

impl TableResult {
    /// Number of cells in the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    }
}

/// One row of a reconstructed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// The service's own `RowIndex` for this row.
    pub row_id: u32,

    /// Cell text in output order. Each non-empty value keeps its trailing space.
    pub cells: Vec<String>,

    /// Per-cell confidence aligned with `cells`, when requested.
    ///
    /// `None` entries mark padded gaps and cells the service reported without a score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Vec<Option<f64>>>,
}
