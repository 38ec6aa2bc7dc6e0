use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use carve_core::{CancellationToken, TextRange, TextSize};
use carve_refactor::{
    compute_offers, walk, AllRefactorings, Construct, DispatchContext, RefactorError,
    RefactoringId, SemanticAccess, SemanticError,
};
use carve_syntax::{parse, LiteralValue, SyntaxKind};
use pretty_assertions::assert_eq;

use super::common::{provider_for, titles, Request, StubModel};

const ARGUMENTS: &str = r#"class C
{
    void M(int x)
    {
        f(1, x$0, 3);
    }
}
"#;

fn argument_model() -> StubModel {
    StubModel {
        constants: HashMap::from([("x", LiteralValue::Integer(42))]),
        parameters: vec!["first", "second", "third"],
        ..StubModel::default()
    }
}

#[test]
fn disabled_refactorings_run_no_analyzers() {
    let fixtures = [
        ARGUMENTS,
        "class C\n{\n    int M()\n    {\n        return 0x1$0A;\n    }\n}\n",
        "class C\n{\n    void M()\n    {\n        $0if (x)\n            a();\n    }\n}\n",
        "class C\n{\n    int M()\n    {\n        return (st$0ring)o;\n    }\n}\n",
    ];
    for fixture in fixtures {
        let request = Request::new(fixture);
        let runs = Rc::new(Cell::new(0));
        let cancel = CancellationToken::new();
        let nothing = |_: RefactoringId| false;
        let mut ctx = DispatchContext::new(
            request.root.clone(),
            request.span,
            &nothing,
            SemanticAccess::new(provider_for(Rc::new(argument_model()), runs.clone())),
            &cancel,
        );
        walk(&mut ctx).unwrap();

        assert_eq!(ctx.analyzer_calls(), 0, "{fixture}");
        assert_eq!(ctx.semantic_acquisitions(), 0);
        assert_eq!(runs.get(), 0);
        assert!(ctx.offers().is_empty());
        assert!(ctx.dispatcher_calls() > 0);
    }
}

#[test]
fn disabled_refactoring_is_never_offered() {
    let request = Request::new(ARGUMENTS);
    let without_names = |id: RefactoringId| id != RefactoringId::AddArgumentName;
    let offers = request.offers_with(&without_names, Rc::new(argument_model()));
    assert_eq!(titles(&offers), vec!["Replace with constant value '42'"]);
}

#[test]
fn semantic_model_is_acquired_once() {
    let request = Request::new(ARGUMENTS);
    let model = Rc::new(argument_model());
    let runs = Rc::new(Cell::new(0));
    let offers = compute_offers(
        &request.root,
        request.span,
        &AllRefactorings,
        provider_for(model.clone(), runs.clone()),
        &CancellationToken::new(),
    )
    .unwrap();

    assert_eq!(offers.len(), 2);
    assert_eq!(runs.get(), 1);
    assert_eq!(model.queries.get(), 2);
}

#[test]
fn syntactic_refactorings_never_touch_the_model() {
    let request =
        Request::new("class C\n{\n    bool M()\n    {\n        return tr$0ue;\n    }\n}\n");
    let runs = Rc::new(Cell::new(0));
    let offers = compute_offers(
        &request.root,
        request.span,
        &AllRefactorings,
        provider_for(Rc::new(StubModel::default()), runs.clone()),
        &CancellationToken::new(),
    )
    .unwrap();

    assert_eq!(titles(&offers), vec!["Negate boolean literal"]);
    assert_eq!(runs.get(), 0);
}

#[test]
fn missing_model_means_no_semantic_offers() {
    let request = Request::new(ARGUMENTS);
    let cancel = CancellationToken::new();
    let mut ctx = DispatchContext::new(
        request.root.clone(),
        request.span,
        &AllRefactorings,
        SemanticAccess::unavailable(),
        &cancel,
    );
    walk(&mut ctx).unwrap();
    assert!(ctx.offers().is_empty());
}

#[test]
fn failing_model_fails_the_request() {
    let request = Request::new(ARGUMENTS);
    let result = compute_offers(
        &request.root,
        request.span,
        &AllRefactorings,
        Box::new(|| Err(SemanticError::new("workspace is loading"))),
        &CancellationToken::new(),
    );
    let err = result.unwrap_err();
    assert!(matches!(err, RefactorError::Semantic(_)), "{err:?}");
    assert!(!err.is_cancelled());
}

#[test]
fn cancelled_request_stops_the_walk() {
    let request = Request::new(ARGUMENTS);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = compute_offers(
        &request.root,
        request.span,
        &AllRefactorings,
        provider_for(Rc::new(argument_model()), Rc::new(Cell::new(0))),
        &cancel,
    );
    assert!(result.unwrap_err().is_cancelled());
}

#[test]
fn offers_come_innermost_first() {
    let request = Request::new(
        "class C\n{\n    bool M(bool a, bool b)\n    {\n        return a ? (b $0? true : false) : false;\n    }\n}\n",
    );
    let offers = request.offers();
    assert_eq!(
        titles(&offers),
        vec![
            "Simplify conditional expression",
            "Invert conditional expression",
            "Invert conditional expression",
        ]
    );
    for pair in offers.windows(2) {
        assert!(
            pair[1].target().contains_range(pair[0].target()),
            "{:?} should enclose {:?}",
            pair[1].target(),
            pair[0].target()
        );
    }
    assert_ne!(offers[1].target(), offers[2].target());
}

#[test]
fn every_ancestor_is_dispatched_once() {
    let request = Request::new(
        "class C\n{\n    int M()\n    {\n        return (1 + 2) * 0x1$0A;\n    }\n}\n",
    );
    let token = request
        .root
        .token_at_offset(request.span.start())
        .right_biased()
        .unwrap();
    let depth = token.parent_ancestors().count();

    let cancel = CancellationToken::new();
    let mut ctx = DispatchContext::new(
        request.root.clone(),
        request.span,
        &AllRefactorings,
        SemanticAccess::unavailable(),
        &cancel,
    );
    walk(&mut ctx).unwrap();
    assert_eq!(ctx.dispatcher_calls(), depth);
    assert_eq!(titles(ctx.offers()), vec!["Convert to '26'"]);
}

#[test]
fn caret_before_closing_parenthesis_sees_the_last_argument() {
    let request = Request::new(
        "class C\n{\n    void M()\n    {\n        f(1, 0x10$0);\n    }\n}\n",
    );
    let offers = request.offers();
    assert_eq!(titles(&offers), vec!["Convert to '16'"]);
}

#[test]
fn span_outside_the_document_offers_nothing() {
    let request = Request::new("class C\n{\n}\n$0");
    let beyond = TextRange::empty(request.root.text_range().end() + TextSize::from(5));
    let offers = compute_offers(
        &request.root,
        beyond,
        &AllRefactorings,
        Box::new(|| Err(SemanticError::new("unused"))),
        &CancellationToken::new(),
    )
    .unwrap();
    assert!(offers.is_empty());
}

#[test]
fn constructs_are_classified_by_kind() {
    let root = parse("class C\n{\n    int M()\n    {\n        return 1;\n    }\n}\n").syntax();
    let literal = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::LiteralExpression)
        .unwrap();
    assert!(matches!(
        Construct::classify(&literal),
        Construct::LiteralExpression(_)
    ));
    assert_eq!(Construct::classify(&literal).syntax(), &literal);

    let class = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::ClassDeclaration)
        .unwrap();
    assert!(matches!(Construct::classify(&class), Construct::Other(_)));
}
