use carve_core::{apply_text_edits, CancellationToken, TextRange, TextSize};
use carve_refactor::span::{is_between, is_contained_in, is_empty_and_contained_in};
use carve_refactor::{trivia, RefactoringId};
use carve_syntax::{parse, parse_integer_literal, AstNode, LiteralExpression, SyntaxElement};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rowan::NodeOrToken;

use super::common::{check, Request, StubModel};

fn range(start: u32, len: u32) -> TextRange {
    TextRange::at(TextSize::from(start), TextSize::from(len))
}

proptest! {
    #[test]
    fn caret_containment_matches_offsets(caret in 0u32..64, start in 0u32..48, len in 0u32..16) {
        let extent = range(start, len);
        let caret = TextRange::empty(TextSize::from(caret));
        let expected = extent.start() <= caret.start() && caret.start() <= extent.end();
        prop_assert_eq!(is_empty_and_contained_in(caret, extent), expected);
        prop_assert_eq!(is_contained_in(caret, extent), expected);
    }

    #[test]
    fn selections_are_never_carets(start in 0u32..48, len in 1u32..16, other in 0u32..64) {
        let selection = range(start, len);
        prop_assert!(!is_empty_and_contained_in(selection, range(0, 64)));
        prop_assert!(!is_empty_and_contained_in(selection, range(other, 0)));
    }

    #[test]
    fn between_means_touching_neither(start in 0u32..32, len in 0u32..8, gap in 0u32..8) {
        let first = range(0, start);
        let last = range(start + gap, 4);
        let span = range(start, len);
        prop_assert_eq!(is_between(span, first, last), len <= gap);
    }

    #[test]
    fn hexadecimal_conversion_keeps_the_value(value in any::<u32>()) {
        let after = check(
            &format!("class C\n{{\n    long M()\n    {{\n        return {value}$0;\n    }}\n}}\n"),
            RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral,
        );
        let literal = parse(&after)
            .syntax()
            .descendants()
            .find_map(LiteralExpression::cast)
            .unwrap();
        let parsed = parse_integer_literal(&literal.syntax().to_string()).unwrap();
        prop_assert_eq!(parsed.value, u64::from(value));
    }
}

/// Between them these offer every refactoring at least once.
const FIXTURES: &[&str] = &[
    "class C\n{\n    int M()\n    {\n        return 0x1$0A;\n    }\n}\n",
    "class C\n{\n    int M()\n    {\n        return 2$06;\n    }\n}\n",
    "class C\n{\n    bool M()\n    {\n        return /*start*/true/*end*/;\n    }\n}\n",
    "class C\n{\n    void M()\n    {\n        f(1, se$0cond: x);\n    }\n}\n",
    "class C\n{\n    void M()\n    {\n        f(1, x$0, 3);\n    }\n}\n",
    "class C\n{\n    object M()\n    {\n        return (Fo$0o)o;\n    }\n}\n",
    "class C\n{\n    bool M()\n    {\n        return a < b $0? true : false;\n    }\n}\n",
    "class C\n{\n    bool M()\n    {\n        return a $0<= b;\n    }\n}\n",
    "class C\n{\n    int M()\n    {\n        return $0(a * b) + c;\n    }\n}\n",
    "class C\n{\n    void M()\n    {\n        Func f = x $0=> { return x * 2; };\n    }\n}\n",
    "class C\n{\n    void M()\n    {\n        Action g = () $0=> Log(1);\n    }\n}\n",
    "class C\n{\n    int Tw$0ice(int x)\n    {\n        return x * 2;\n    }\n}\n",
    "class C\n{\n    void M()\n    {\n        $0if (x)\n            a();\n        else\n        {\n            b();\n        }\n    }\n}\n",
    "class C\n{\n    void M(int n)\n    {\n        $0switch (n)\n        {\n            case 1:\n                a();\n            case 2:\n                {\n                    b();\n                }\n        }\n    }\n}\n",
    "class C\n{\n    void M(int n)\n    {\n        switch (n)\n        {\n            $0case 1:\n                a();\n            case 2:\n                {\n                    b();\n                }\n        }\n    }\n}\n",
    "class C\n{\n    void M(int n)\n    {\n        switch (n)\n        {\n            case 1:\n                a();\n            $0case 2:\n                {\n                    b();\n                }\n        }\n    }\n}\n",
    "class C\n{\n    void M()\n    {\n        /*start*/a();\n        b();/*end*/\n    }\n}\n",
];

fn model() -> StubModel {
    StubModel {
        reference_types: vec!["Foo"],
        constants: [("x", carve_syntax::LiteralValue::Integer(7))].into(),
        parameters: vec!["first", "second", "third"],
        lambda_returns_void: Some(true),
        ..StubModel::default()
    }
}

#[test]
fn applied_offers_always_reparse_cleanly() {
    let mut seen = Vec::new();
    for fixture in FIXTURES {
        let request = Request::new(fixture);
        let count = request.offers_with_model(model()).len();
        assert!(count > 0, "no offers for {fixture}");

        for index in 0..count {
            // Actions consume their offer, so each one gets a fresh request.
            let offer = request.offers_with_model(model()).swap_remove(index);
            let id = offer.id();
            seen.push(id);
            let edit = offer
                .apply(&CancellationToken::new())
                .unwrap_or_else(|err| panic!("{id} failed on {fixture}: {err}"));
            let after = edit.apply().unwrap().to_string();
            let as_text = apply_text_edits(&request.text, &[edit.to_text_edit()]).unwrap();
            assert_eq!(as_text, after, "{id} text edit disagrees with tree edit on {fixture}");
            let reparsed = parse(&after);
            assert!(reparsed.ok(), "{id} broke {fixture}:\n{after}\n{:?}", reparsed.errors);
        }
    }

    let missing: Vec<RefactoringId> = RefactoringId::ALL
        .into_iter()
        .filter(|id| !seen.contains(id))
        .collect();
    assert_eq!(missing, Vec::<RefactoringId>::new());
}

/// Leading and trailing trivia of the node an offer replaces.
fn surrounding_trivia(element: &SyntaxElement) -> (String, String) {
    (
        trivia::text(&trivia::leading(element)),
        trivia::text(&trivia::trailing(element)),
    )
}

#[test]
fn replacing_a_node_keeps_its_trivia() {
    let cases = [
        ("return /* a */ 0x1$0A // b\n;", "26"),
        ("return /* a */ tr$0ue /* b */;", "false"),
        ("return /* a */ (str$0ing)o /* b */;", "o as string"),
    ];
    for (statement, replacement) in cases {
        let fixture = format!("class C\n{{\n    object M()\n    {{\n        {statement}\n    }}\n}}\n");
        let request = Request::new(&fixture);
        let offers = request.offers();
        let offer = offers.into_iter().next().unwrap();
        let target = offer.target();

        let before = match request.root.covering_element(target) {
            NodeOrToken::Token(token) => NodeOrToken::Node(token.parent().unwrap()),
            node => node,
        };
        let edit = offer.apply(&CancellationToken::new()).unwrap();
        let after_root = edit.apply().unwrap();
        let replaced = TextRange::at(target.start(), TextSize::of(replacement));
        assert_eq!(&after_root.to_string()[replaced], replacement);

        let after = match after_root.covering_element(replaced) {
            NodeOrToken::Token(token) => NodeOrToken::Node(token.parent().unwrap()),
            node => node,
        };
        assert_eq!(surrounding_trivia(&before), surrounding_trivia(&after), "{statement}");
    }
}
