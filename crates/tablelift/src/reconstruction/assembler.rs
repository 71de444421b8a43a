use crate::blocks::Block;
use crate::core::config::ReconstructionConfig;
use crate::types::{TableResult, TableSet};
use crate::{Result, TableliftError};

use super::grid::TableGrid;
use super::index::BlockIndex;

/// Rebuild every table of a recognition response.
///
/// Tables are processed one after another in response order; `tableId` is the
/// position among TABLE blocks, unrelated to the block's own id.
///
/// # Errors
///
/// - `TableliftError::NoTablesFound` when the response has no TABLE block
/// - `TableliftError::Structure` when any table references a missing or malformed
///   block; nothing is returned for the other tables in that case
pub fn assemble_tables(blocks: &[Block], config: &ReconstructionConfig) -> Result<TableSet> {
    let index = BlockIndex::build(blocks);

    if index.tables().is_empty() {
        tracing::debug!("No TABLE blocks among {} blocks", index.len());
        return Err(TableliftError::NoTablesFound);
    }

    let mut tables = Vec::with_capacity(index.tables().len());
    for (table_id, table) in index.tables().iter().enumerate() {
        let grid = TableGrid::build(table, &index)?;
        tracing::debug!(
            "Table {} (block '{}'): {} rows, widest column {}",
            table_id,
            table.id,
            grid.row_count(),
            grid.max_column().unwrap_or(0)
        );

        tables.push(TableResult {
            table_id,
            rows: grid.into_rows(config)?,
        });
    }

    Ok(TableSet { tables })
}
