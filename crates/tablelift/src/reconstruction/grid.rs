use indexmap::IndexMap;

use crate::blocks::{Block, BlockType};
use crate::core::config::{GapPolicy, ReconstructionConfig, RowOrder};
use crate::types::TableRow;
use crate::{Result, TableliftError};

use super::cell::cell_text;
use super::index::BlockIndex;

/// Text and score of one grid position.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub text: String,
    pub confidence: Option<f64>,
}

/// Row index → column index → cell, both levels in first-seen order.
///
/// Indices are whatever the service assigned; the grid is not assumed rectangular,
/// contiguous, or 1-based.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableGrid {
    rows: IndexMap<u32, IndexMap<u32, GridCell>>,
}

impl TableGrid {
    /// Scan the `CHILD` cells of `table` into a grid.
    ///
    /// A repeated (row, column) pair overwrites the earlier text but keeps the
    /// earlier position. Non-CELL children are skipped.
    ///
    /// # Errors
    ///
    /// `TableliftError::Structure` when a child id does not resolve, a CELL lacks
    /// `RowIndex`/`ColumnIndex`, or any cell's text cannot be extracted.
    pub fn build(table: &Block, index: &BlockIndex<'_>) -> Result<Self> {
        let mut grid = Self::default();

        for child in index.children(table) {
            let cell = child?;
            if cell.block_type != BlockType::Cell {
                continue;
            }

            let (row, column) = match (cell.row_index, cell.column_index) {
                (Some(row), Some(column)) => (row, column),
                _ => {
                    return Err(TableliftError::structure(format!(
                        "CELL block '{}' in table '{}' has no RowIndex/ColumnIndex",
                        cell.id, table.id
                    )));
                }
            };

            let text = cell_text(cell, index)?;
            grid.rows.entry(row).or_default().insert(
                column,
                GridCell {
                    text,
                    confidence: cell.confidence,
                },
            );
        }

        Ok(grid)
    }

    pub fn get(&self, row: u32, column: u32) -> Option<&GridCell> {
        self.rows.get(&row).and_then(|columns| columns.get(&column))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Highest column index present in any row.
    pub fn max_column(&self) -> Option<u32> {
        self.rows.values().flat_map(|columns| columns.keys().copied()).max()
    }

    /// Flatten the grid into output rows.
    ///
    /// With the default config rows and columns come out in first-seen order and
    /// missing columns are simply absent, so later cells shift left.
    /// `RowOrder::Sorted` orders both levels by numeric index. `GapPolicy::Pad` emits
    /// columns `1..=max_column` in ascending order with `""` for missing cells.
    ///
    /// # Errors
    ///
    /// `TableliftError::Structure` under `GapPolicy::Pad` when a cell sits in column 0
    /// or beyond `config.max_padded_columns`.
    pub fn into_rows(self, config: &ReconstructionConfig) -> Result<Vec<TableRow>> {
        let max_column = self.max_column().unwrap_or(0);
        if config.gaps == GapPolicy::Pad {
            self.check_paddable(max_column, config.max_padded_columns)?;
        }

        let mut rows = self.rows;

        if config.order == RowOrder::Sorted {
            rows.sort_unstable_keys();
            for columns in rows.values_mut() {
                columns.sort_unstable_keys();
            }
        }

        let rows = rows
            .into_iter()
            .map(|(row_id, mut columns)| {
                let cells: Vec<GridCell> = match config.gaps {
                    GapPolicy::Skip => columns.into_values().collect(),
                    GapPolicy::Pad => (1..=max_column)
                        .map(|column| {
                            columns.swap_remove(&column).unwrap_or(GridCell {
                                text: String::new(),
                                confidence: None,
                            })
                        })
                        .collect(),
                };

                let confidence = config
                    .include_confidence
                    .then(|| cells.iter().map(|cell| cell.confidence).collect());

                TableRow {
                    row_id,
                    cells: cells.into_iter().map(|cell| cell.text).collect(),
                    confidence,
                }
            })
            .collect();

        Ok(rows)
    }

    fn check_paddable(&self, max_column: u32, limit: u32) -> Result<()> {
        if max_column > limit {
            return Err(TableliftError::structure(format!(
                "ColumnIndex {} exceeds the padding limit of {} columns",
                max_column, limit
            )));
        }
        if let Some(row) = self
            .rows
            .iter()
            .find_map(|(row, columns)| columns.contains_key(&0).then_some(*row))
        {
            return Err(TableliftError::structure(format!(
                "Cell in row {} has ColumnIndex 0; padded columns start at 1",
                row
            )));
        }
        Ok(())
    }
}
