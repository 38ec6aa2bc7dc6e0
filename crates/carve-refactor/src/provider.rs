//! The host-facing entry point.
//!
//! [`RefactoringProvider`] wraps [`compute_offers`] so that nothing that
//! goes wrong while looking for refactorings reaches the host: faults and
//! panics are logged and turn into "no refactorings here". With
//! `fail_loudly` set they are re-raised instead.

use std::any::Any;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use carve_config::{ConfigWarning, RefactoringsConfig};
use carve_core::{CancellationToken, TextRange};
use carve_syntax::SyntaxNode;

use crate::dispatch::compute_offers;
use crate::semantic::SemanticProvider;
use crate::{RefactoringId, RefactoringOffer};

#[derive(Debug, Clone, Default)]
pub struct RefactoringProvider {
    config: RefactoringsConfig,
}

impl RefactoringProvider {
    pub fn new(config: RefactoringsConfig) -> Self {
        for warning in config.unmatched_patterns(&RefactoringId::all_keys()) {
            if let ConfigWarning::UnknownRefactoring { toml_path, pattern } = &warning {
                tracing::warn!(
                    target: "carve.refactor",
                    toml_path = %toml_path,
                    pattern = %pattern,
                    "pattern matches no refactoring"
                );
            }
        }
        Self { config }
    }

    pub fn config(&self) -> &RefactoringsConfig {
        &self.config
    }

    /// Offers for `span`, or an empty list if the request was cancelled or
    /// failed.
    pub fn provide(
        &self,
        root: &SyntaxNode,
        span: TextRange,
        semantic: SemanticProvider<'_>,
        cancel: &CancellationToken,
    ) -> Vec<RefactoringOffer> {
        let filter = |id: RefactoringId| self.config.is_enabled(id.as_str());
        let result = catch_unwind(AssertUnwindSafe(move || {
            compute_offers(root, span, &filter, semantic, cancel)
        }));

        match result {
            Ok(Ok(offers)) => offers,
            Ok(Err(err)) if err.is_cancelled() => {
                tracing::debug!(target: "carve.refactor", ?span, "refactoring request cancelled");
                Vec::new()
            }
            Ok(Err(err)) => {
                if self.config.fail_loudly {
                    panic!("refactoring request failed: {err}");
                }
                tracing::error!(target: "carve.refactor", ?span, error = %err, "refactoring request failed");
                Vec::new()
            }
            Err(payload) => {
                if self.config.fail_loudly {
                    resume_unwind(payload);
                }
                let message = panic_payload_to_string(payload.as_ref())
                    .unwrap_or_else(|| "<non-string panic payload>".to_string());
                tracing::error!(
                    target: "carve.refactor",
                    ?span,
                    panic = %message,
                    "panic while computing refactorings"
                );
                Vec::new()
            }
        }
    }
}

fn panic_payload_to_string(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return Some((*message).to_string());
    }
    payload.downcast_ref::<String>().cloned()
}
