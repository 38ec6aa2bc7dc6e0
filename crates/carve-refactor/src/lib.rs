//! Refactoring discovery for Carve.
//!
//! Given a syntax tree and a caret or selection, [`compute_offers`] walks
//! from the innermost node under the span up to the root and asks one
//! dispatcher per construct kind which refactorings apply. The result is a
//! list of [`RefactoringOffer`]s, innermost first, each carrying a deferred
//! action that produces a validated [`TreeEdit`].
//!
//! Hosts normally go through [`RefactoringProvider`], which applies the
//! user's [`carve_config::RefactoringsConfig`] and keeps faults away from the
//! caller.
//!
//! The refactorings available today:
//! - braces: add/remove around `if`/`else` branches and switch sections
//! - literals: hexadecimal/decimal conversion, boolean negation
//! - arguments: add/remove argument names
//! - expressions: cast to `as`, constant folding, conditional
//!   simplification and inversion, operand swapping, parenthesis removal
//! - bodies: expression-bodied lambdas and methods, block-bodied lambdas
//! - statements: wrap a selection in a condition or a try-catch

mod context;
mod dispatch;
mod edit;
mod eligibility;
mod error;
mod filter;
mod handlers;
mod id;
mod layout;
mod offer;
mod preview;
mod provider;
mod semantic;
pub mod span;
pub mod trivia;

pub use context::DispatchContext;
pub use dispatch::{compute_offers, dispatch_node, walk, Construct};
pub use edit::{EditTarget, TreeEdit};
pub use eligibility::Eligibility;
pub use error::RefactorError;
pub use filter::{AllRefactorings, RefactoringFilter};
pub use id::{RefactoringId, UnknownRefactoringId};
pub use offer::RefactoringOffer;
pub use preview::{preview, EditPreview};
pub use provider::RefactoringProvider;
pub use semantic::{
    ConstantValue, SemanticAccess, SemanticError, SemanticModel, SemanticProvider, TypeCategory,
};
