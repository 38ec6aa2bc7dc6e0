use std::cell::Cell;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use carve_config::{CarveConfig, RefactoringsConfig};
use carve_core::CancellationToken;
use carve_refactor::{preview, RefactoringId, RefactoringProvider, SemanticError};
use carve_syntax::LiteralValue;
use pretty_assertions::assert_eq;

use super::common::{provider_for, titles, Request, StubModel};

const LITERAL: &str = "class C\n{\n    bool M()\n    {\n        return tr$0ue;\n    }\n}\n";
const CONSTANT: &str = "class C\n{\n    int M()\n    {\n        return Lim$0it;\n    }\n}\n";

fn stub() -> carve_refactor::SemanticProvider<'static> {
    provider_for(Rc::new(StubModel::default()), Rc::new(Cell::new(0)))
}

fn failing() -> carve_refactor::SemanticProvider<'static> {
    Box::new(|| Err(SemanticError::new("project is still loading")))
}

fn panicking() -> carve_refactor::SemanticProvider<'static> {
    Box::new(|| panic!("model exploded"))
}

#[test]
fn config_patterns_filter_offers() {
    let request = Request::new(LITERAL);

    let provider = RefactoringProvider::default();
    let offers = provider.provide(&request.root, request.span, stub(), &CancellationToken::new());
    assert_eq!(titles(&offers), vec!["Negate boolean literal"]);

    let provider = RefactoringProvider::new(RefactoringsConfig {
        disable: vec!["negate_*".to_string()],
        ..RefactoringsConfig::default()
    });
    let offers = provider.provide(&request.root, request.span, stub(), &CancellationToken::new());
    assert!(offers.is_empty());

    let provider = RefactoringProvider::new(RefactoringsConfig {
        enabled: false,
        ..RefactoringsConfig::default()
    });
    let offers = provider.provide(&request.root, request.span, stub(), &CancellationToken::new());
    assert!(offers.is_empty());
}

#[test]
fn provider_reads_the_refactorings_table() {
    let (config, diagnostics) = CarveConfig::load_from_str_with_diagnostics(
        r#"
[refactorings]
enable = ["*_literal"]
disable = ["convert_decimal_*"]
"#,
    )
    .unwrap();
    assert!(diagnostics.unknown_keys.is_empty());
    let provider = RefactoringProvider::new(config.refactorings);
    assert!(provider.config().is_enabled(RefactoringId::NegateBooleanLiteral.as_str()));
    assert!(!provider
        .config()
        .is_enabled(RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral.as_str()));
    assert!(!provider.config().is_enabled(RefactoringId::WrapInTryCatch.as_str()));
}

#[test]
fn unknown_patterns_are_tolerated() {
    let provider = RefactoringProvider::new(RefactoringsConfig {
        disable: vec!["no_such_refactoring".to_string()],
        ..RefactoringsConfig::default()
    });
    let request = Request::new(LITERAL);
    let offers = provider.provide(&request.root, request.span, stub(), &CancellationToken::new());
    assert_eq!(titles(&offers), vec!["Negate boolean literal"]);
}

#[test]
fn semantic_failure_yields_no_offers() {
    let request = Request::new(CONSTANT);
    let provider = RefactoringProvider::default();
    let offers = provider.provide(&request.root, request.span, failing(), &CancellationToken::new());
    assert!(offers.is_empty());
}

#[test]
#[should_panic(expected = "refactoring request failed")]
fn semantic_failure_is_raised_when_failing_loudly() {
    let request = Request::new(CONSTANT);
    let provider = RefactoringProvider::new(RefactoringsConfig {
        fail_loudly: true,
        ..RefactoringsConfig::default()
    });
    provider.provide(&request.root, request.span, failing(), &CancellationToken::new());
}

#[test]
fn panics_are_contained() {
    let request = Request::new(CONSTANT);
    let provider = RefactoringProvider::default();
    let offers = provider.provide(&request.root, request.span, panicking(), &CancellationToken::new());
    assert!(offers.is_empty());
}

#[test]
fn panics_propagate_when_failing_loudly() {
    let request = Request::new(CONSTANT);
    let provider = RefactoringProvider::new(RefactoringsConfig {
        fail_loudly: true,
        ..RefactoringsConfig::default()
    });
    let result = catch_unwind(AssertUnwindSafe(|| {
        provider.provide(&request.root, request.span, panicking(), &CancellationToken::new())
    }));
    let payload = result.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"model exploded"));
}

#[test]
fn cancellation_yields_no_offers_even_when_failing_loudly() {
    let request = Request::new(LITERAL);
    let provider = RefactoringProvider::new(RefactoringsConfig {
        fail_loudly: true,
        ..RefactoringsConfig::default()
    });
    let cancel = CancellationToken::new();
    cancel.cancel();
    let offers = provider.provide(&request.root, request.span, stub(), &cancel);
    assert!(offers.is_empty());
}

#[test]
fn offer_previews_as_a_unified_diff() {
    let request = Request::new(CONSTANT);
    let model = StubModel {
        constants: HashMap::from([("Limit", LiteralValue::Integer(10))]),
        ..StubModel::default()
    };
    let provider = RefactoringProvider::default();
    let offers = provider.provide(
        &request.root,
        request.span,
        provider_for(Rc::new(model), Rc::new(Cell::new(0))),
        &CancellationToken::new(),
    );
    assert_eq!(titles(&offers), vec!["Replace with constant value '10'"]);

    let edit = offers
        .into_iter()
        .next()
        .unwrap()
        .apply(&CancellationToken::new())
        .unwrap();
    let preview = preview(&edit).unwrap();
    assert_eq!(preview.original, request.text);
    assert_eq!(preview.modified, request.text.replace("return Limit;", "return 10;"));
    assert!(preview.unified_diff.contains("-        return Limit;\n+        return 10;\n"));
}
