use std::fmt;

use carve_core::{check_cancelled, CancellationToken, TextRange};

use crate::{RefactorError, RefactoringId, TreeEdit};

pub(crate) type Action = Box<dyn FnOnce(&CancellationToken) -> Result<TreeEdit, RefactorError>>;

/// A refactoring discovered at the request location, not yet executed.
pub struct RefactoringOffer {
    id: RefactoringId,
    title: String,
    target: TextRange,
    action: Action,
}

impl RefactoringOffer {
    pub(crate) fn new(id: RefactoringId, title: String, target: TextRange, action: Action) -> Self {
        debug_assert!(!title.is_empty(), "offers must have a title");
        Self {
            id,
            title,
            target,
            action,
        }
    }

    pub fn id(&self) -> RefactoringId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Extent of the construct the offer was discovered on.
    pub fn target(&self) -> TextRange {
        self.target
    }

    /// Run the deferred action. The resulting edit has been validated
    /// against a re-parse of the edited document.
    pub fn apply(self, cancel: &CancellationToken) -> Result<TreeEdit, RefactorError> {
        check_cancelled(cancel)?;
        let edit = (self.action)(cancel)?;
        check_cancelled(cancel)?;
        edit.validate()?;
        tracing::debug!(id = %self.id, range = ?edit.range(), "refactoring applied");
        Ok(edit)
    }
}

impl fmt::Debug for RefactoringOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefactoringOffer")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
