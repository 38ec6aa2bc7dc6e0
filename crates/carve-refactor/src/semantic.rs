//! The host's semantic model and per-request lazy access to it.
//!
//! Acquiring a semantic model is the most expensive thing a request can do,
//! so dispatchers run their syntactic pre-checks first and only ask for the
//! model when an analyzer reports [`Eligibility::NeedsSemantic`]. The model
//! is acquired at most once per request.
//!
//! [`Eligibility::NeedsSemantic`]: crate::Eligibility::NeedsSemantic

use std::cell::{Cell, OnceCell, RefCell};
use std::rc::Rc;

use carve_core::{check_cancelled, CancellationToken};
use carve_syntax::{ast, LiteralValue};
use thiserror::Error;

use crate::RefactorError;

/// A compile-time constant, as reported by the host.
pub type ConstantValue = LiteralValue;

/// Coarse classification of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Reference,
    Nullable,
    Value,
    /// The type did not resolve.
    Error,
    Unknown,
}

impl TypeCategory {
    /// `as` can only target types that admit `null`.
    pub fn admits_null(self) -> bool {
        matches!(self, TypeCategory::Reference | TypeCategory::Nullable)
    }
}

/// Type and symbol queries the host answers for the current document.
pub trait SemanticModel {
    fn type_category(&self, ty: &ast::Type) -> TypeCategory;

    fn constant_value(&self, expr: &ast::Expression) -> Option<ConstantValue>;

    /// Name of the parameter an argument binds to.
    fn parameter_name(&self, argument: &ast::Argument) -> Option<String>;

    /// Name of the parameter at the argument's position in its list, as if
    /// the argument carried no name.
    fn positional_parameter_name(&self, argument: &ast::Argument) -> Option<String>;

    /// Whether the delegate type a lambda converts to returns `void`.
    /// `None` when the conversion target is unknown.
    fn lambda_returns_void(&self, lambda: &ast::LambdaExpression) -> Option<bool>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("semantic analysis failed: {message}")]
pub struct SemanticError {
    pub message: String,
}

impl SemanticError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Produces the semantic model for one request.
pub type SemanticProvider<'a> =
    Box<dyn FnOnce() -> Result<Rc<dyn SemanticModel>, SemanticError> + 'a>;

/// Memoizing wrapper around a [`SemanticProvider`].
pub struct SemanticAccess<'a> {
    provider: RefCell<Option<SemanticProvider<'a>>>,
    model: OnceCell<Result<Rc<dyn SemanticModel>, SemanticError>>,
    acquisitions: Cell<usize>,
}

impl<'a> SemanticAccess<'a> {
    pub fn new(provider: SemanticProvider<'a>) -> Self {
        Self {
            provider: RefCell::new(Some(provider)),
            model: OnceCell::new(),
            acquisitions: Cell::new(0),
        }
    }

    /// Access for hosts without semantic analysis; semantic analyzers then
    /// never offer anything.
    pub fn unavailable() -> Self {
        Self {
            provider: RefCell::new(None),
            model: OnceCell::new(),
            acquisitions: Cell::new(0),
        }
    }

    /// Number of times the provider ran (0 or 1).
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.get()
    }

    pub fn get(&self, cancel: &CancellationToken) -> Result<Rc<dyn SemanticModel>, RefactorError> {
        check_cancelled(cancel)?;

        if self.model.get().is_none() {
            let Some(provider) = self.provider.borrow_mut().take() else {
                return Err(RefactorError::SemanticUnavailable);
            };
            tracing::debug!("acquiring semantic model");
            self.acquisitions.set(self.acquisitions.get() + 1);
            let result = provider();
            if let Err(err) = &result {
                tracing::debug!(error = %err, "semantic model acquisition failed");
            }
            // The provider was taken above, so nothing else can have filled the cell.
            let _ = self.model.set(result);
            check_cancelled(cancel)?;
        }

        match self.model.get() {
            Some(Ok(model)) => Ok(Rc::clone(model)),
            Some(Err(err)) => Err(RefactorError::Semantic(err.clone())),
            None => Err(RefactorError::SemanticUnavailable),
        }
    }
}

impl std::fmt::Debug for SemanticAccess<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticAccess")
            .field("acquired", &self.model.get().is_some())
            .field("acquisitions", &self.acquisitions.get())
            .finish()
    }
}
