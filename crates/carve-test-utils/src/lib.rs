//! Utilities shared by carve tests.
//!
//! Fixtures mark the request span inline: `$0` for a caret, or
//! `/*start*/` and `/*end*/` around a selection.

mod fixtures;

pub use fixtures::*;
