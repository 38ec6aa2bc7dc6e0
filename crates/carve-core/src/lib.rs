//! Core shared types for Carve.
//!
//! This crate is intentionally small: text ranges, text edits, and the
//! cancellation primitives threaded through every refactoring request.

mod cancel;
mod edit;

pub use cancel::{check_cancelled, CancellationToken, Cancelled};
pub use edit::{apply_text_edits, normalize_text_edits, EditError, TextEdit};
pub use text_size::{TextRange, TextSize};
