//! Before/after views of an edit for display to the user.

use carve_core::apply_text_edits;
use similar::TextDiff;

use crate::error::malformed;
use crate::{RefactorError, TreeEdit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPreview {
    pub original: String,
    pub modified: String,
    /// Unified diff of `original` against `modified`, three lines of context.
    pub unified_diff: String,
}

pub fn preview(edit: &TreeEdit) -> Result<EditPreview, RefactorError> {
    let original = edit
        .original_root()
        .ok_or_else(|| malformed("edit target has no tree"))?
        .to_string();
    let modified = apply_text_edits(&original, &[edit.to_text_edit()])?;
    if edit.apply()?.to_string() != modified {
        return Err(malformed("text edit and tree edit disagree"));
    }
    let unified_diff = TextDiff::from_lines(&original, &modified)
        .unified_diff()
        .context_radius(3)
        .header("original", "modified")
        .to_string();
    Ok(EditPreview {
        original,
        modified,
        unified_diff,
    })
}
