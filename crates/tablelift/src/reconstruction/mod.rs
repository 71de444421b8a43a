//! Table reconstruction from a recognition block graph.
//!
//! The recognition service returns a flat list of blocks linked by `CHILD`
//! relationships: TABLE → CELL → WORD / SELECTION_ELEMENT. Reconstruction runs in
//! four steps, all synchronous and request-scoped:
//!
//! 1. [`BlockIndex`] maps ids to blocks and collects TABLE blocks in response order.
//! 2. [`TableGrid::build`] scans a table's cells into a row → column grid.
//! 3. [`cell_text`] turns one cell's words and ticked checkboxes into text.
//! 4. [`assemble_tables`] runs the above per table and numbers the results.
//!
//! # Example
//!
//! ```rust
//! use tablelift::blocks::AnalyzeDocumentResponse;
//! use tablelift::reconstruction::assemble_tables;
//! use tablelift::ReconstructionConfig;
//!
//! # fn main() -> tablelift::Result<()> {
//! let response = AnalyzeDocumentResponse::from_json(r#"{"Blocks": [
//!     {"BlockType": "TABLE", "Id": "t", "Relationships": [{"Type": "CHILD", "Ids": ["c"]}]},
//!     {"BlockType": "CELL", "Id": "c", "RowIndex": 1, "ColumnIndex": 1,
//!      "Relationships": [{"Type": "CHILD", "Ids": ["w"]}]},
//!     {"BlockType": "WORD", "Id": "w", "Text": "1,234"}
//! ]}"#)?;
//!
//! let set = assemble_tables(&response.blocks, &ReconstructionConfig::default())?;
//! assert_eq!(set.tables[0].rows[0].cells, vec!["\"1,234\" "]);
//! # Ok(())
//! # }
//! ```

mod assembler;
mod cell;
mod grid;
mod index;

pub use assembler::assemble_tables;
pub use cell::{SELECTED_MARK, cell_text, is_grouped_number};
pub use grid::{GridCell, TableGrid};
pub use index::BlockIndex;
