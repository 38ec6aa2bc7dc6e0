use std::cell::Cell;
use std::rc::Rc;

use carve_core::{check_cancelled, CancellationToken, TextRange};
use carve_syntax::SyntaxNode;

use crate::offer::{Action, RefactoringOffer};
use crate::semantic::{SemanticAccess, SemanticModel};
use crate::{RefactorError, RefactoringFilter, RefactoringId, TreeEdit};

/// Per-request state shared by every dispatcher.
///
/// Request inputs are read-only; the only mutation is appending offers.
pub struct DispatchContext<'a> {
    root: SyntaxNode,
    span: TextRange,
    filter: &'a dyn RefactoringFilter,
    semantic: SemanticAccess<'a>,
    cancel: &'a CancellationToken,
    offers: Vec<RefactoringOffer>,
    analyzer_calls: Cell<usize>,
    dispatcher_calls: Cell<usize>,
}

impl<'a> DispatchContext<'a> {
    pub fn new(
        root: SyntaxNode,
        span: TextRange,
        filter: &'a dyn RefactoringFilter,
        semantic: SemanticAccess<'a>,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            root,
            span,
            filter,
            semantic,
            cancel,
            offers: Vec::new(),
            analyzer_calls: Cell::new(0),
            dispatcher_calls: Cell::new(0),
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn span(&self) -> TextRange {
        self.span
    }

    /// Runs `f` with the request span temporarily replaced by `span`.
    pub(crate) fn with_span<T>(&mut self, span: TextRange, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.span, span);
        let result = f(self);
        self.span = saved;
        result
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        self.cancel
    }

    pub fn is_enabled(&self, id: RefactoringId) -> bool {
        self.filter.is_enabled(id)
    }

    pub fn is_any_enabled(&self, ids: &[RefactoringId]) -> bool {
        self.filter.is_any_enabled(ids)
    }

    pub fn check_cancelled(&self) -> Result<(), RefactorError> {
        Ok(check_cancelled(self.cancel)?)
    }

    /// Runs an eligibility analyzer, counting the invocation.
    pub(crate) fn analyze<T>(&self, analyzer: impl FnOnce() -> T) -> T {
        self.analyzer_calls.set(self.analyzer_calls.get() + 1);
        analyzer()
    }

    pub(crate) fn record_dispatch(&self) {
        self.dispatcher_calls.set(self.dispatcher_calls.get() + 1);
    }

    /// The request's semantic model, acquired on first use.
    ///
    /// `Ok(None)` means the host has no semantic model for this request;
    /// semantic analyzers treat that as ineligible.
    pub(crate) fn semantic(&self) -> Result<Option<Rc<dyn SemanticModel>>, RefactorError> {
        match self.semantic.get(self.cancel) {
            Ok(model) => Ok(Some(model)),
            Err(RefactorError::SemanticUnavailable) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn offer(
        &mut self,
        id: RefactoringId,
        title: impl Into<String>,
        target: TextRange,
        action: impl FnOnce(&CancellationToken) -> Result<TreeEdit, RefactorError> + 'static,
    ) {
        let title = title.into();
        tracing::trace!(%id, %title, "offer registered");
        let action: Action = Box::new(action);
        self.offers.push(RefactoringOffer::new(id, title, target, action));
    }

    pub fn offers(&self) -> &[RefactoringOffer] {
        &self.offers
    }

    pub fn into_offers(self) -> Vec<RefactoringOffer> {
        self.offers
    }

    /// Eligibility analyzers run so far.
    pub fn analyzer_calls(&self) -> usize {
        self.analyzer_calls.get()
    }

    /// Node-kind dispatchers invoked so far.
    pub fn dispatcher_calls(&self) -> usize {
        self.dispatcher_calls.get()
    }

    pub fn semantic_acquisitions(&self) -> usize {
        self.semantic.acquisitions()
    }
}

impl std::fmt::Debug for DispatchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchContext")
            .field("span", &self.span)
            .field("offers", &self.offers)
            .field("semantic", &self.semantic)
            .finish_non_exhaustive()
    }
}
