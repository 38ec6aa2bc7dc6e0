use crate::RefactoringId;

/// Decides which refactorings a request may offer.
///
/// Any `Fn(RefactoringId) -> bool` is a filter, so a configuration adapts as
/// `|id| config.is_enabled(id.as_str())`.
pub trait RefactoringFilter {
    fn is_enabled(&self, id: RefactoringId) -> bool;

    fn is_any_enabled(&self, ids: &[RefactoringId]) -> bool {
        ids.iter().any(|id| self.is_enabled(*id))
    }
}

impl<F> RefactoringFilter for F
where
    F: Fn(RefactoringId) -> bool,
{
    fn is_enabled(&self, id: RefactoringId) -> bool {
        self(id)
    }
}

/// Enables everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRefactorings;

impl RefactoringFilter for AllRefactorings {
    fn is_enabled(&self, _: RefactoringId) -> bool {
        true
    }
}
