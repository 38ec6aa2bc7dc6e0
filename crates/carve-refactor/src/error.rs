use carve_core::{Cancelled, EditError};
use thiserror::Error;

use crate::semantic::SemanticError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefactorError {
    #[error("refactoring request was cancelled")]
    Cancelled,
    #[error("no semantic model is available for this request")]
    SemanticUnavailable,
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error("malformed syntax tree: {0}")]
    MalformedTree(String),
    #[error("edit would introduce syntax errors ({before} before, {after} after)")]
    InvalidEdit { before: usize, after: usize },
    #[error(transparent)]
    Edit(#[from] EditError),
}

impl RefactorError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RefactorError::Cancelled)
    }
}

impl From<Cancelled> for RefactorError {
    fn from(_: Cancelled) -> Self {
        RefactorError::Cancelled
    }
}

pub(crate) fn malformed(what: impl std::fmt::Display) -> RefactorError {
    RefactorError::MalformedTree(what.to_string())
}
