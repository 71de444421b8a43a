use crate::blocks::{Block, BlockType, SelectionStatus};
use crate::{Result, TableliftError};

use super::index::BlockIndex;

/// Token emitted for a ticked checkbox / radio button.
pub const SELECTED_MARK: &str = "X";

/// Compute the display text of one CELL block.
///
/// Child WORD blocks contribute their text and SELECTED selection elements contribute
/// [`SELECTED_MARK`]; every token is followed by a single space, so non-empty results
/// keep a trailing space. Any other child type is ignored. A cell without `CHILD`
/// relationships yields `""`.
///
/// # Errors
///
/// `TableliftError::Structure` when a child id does not resolve, a WORD has no `Text`,
/// or a selection element has no `SelectionStatus`.
pub fn cell_text(cell: &Block, index: &BlockIndex<'_>) -> Result<String> {
    let mut text = String::new();

    for child in index.children(cell) {
        let child = child?;
        match child.block_type {
            BlockType::Word => {
                let word = child.text.as_deref().ok_or_else(|| {
                    TableliftError::structure(format!("WORD block '{}' has no Text", child.id))
                })?;
                push_word(&mut text, word);
            }
            BlockType::SelectionElement => {
                let status = child.selection_status.ok_or_else(|| {
                    TableliftError::structure(format!(
                        "SELECTION_ELEMENT block '{}' has no SelectionStatus",
                        child.id
                    ))
                })?;
                if status == SelectionStatus::Selected {
                    text.push_str(SELECTED_MARK);
                    text.push(' ');
                }
            }
            _ => {}
        }
    }

    Ok(text)
}

fn push_word(out: &mut String, word: &str) {
    if is_grouped_number(word) {
        out.push('"');
        out.push_str(word);
        out.push('"');
    } else {
        out.push_str(word);
    }
    out.push(' ');
}

/// `true` for digit strings with thousands separators such as `1,234`.
///
/// These get quoted so a CSV/spreadsheet consumer does not split them into fields.
/// The word must contain a comma, and what remains after dropping the commas must be
/// non-empty and entirely numeric.
///
/// "Numeric" means [`char::is_numeric`]: the Unicode general categories Nd, Nl and No
/// (`1`, `٣`, `Ⅻ`, `½`). Characters that only carry a numeric value in Unihan, such as
/// the CJK numerals `一` and `二`, are letters (Lo) and do not count, so `一,二` stays
/// unquoted.
pub fn is_grouped_number(word: &str) -> bool {
    if !word.contains(',') {
        return false;
    }

    let mut digits = word.chars().filter(|c| *c != ',').peekable();
    digits.peek().is_some() && digits.all(char::is_numeric)
}
