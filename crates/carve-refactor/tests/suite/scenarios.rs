use std::collections::HashMap;

use carve_core::{CancellationToken, TextRange, TextSize};
use carve_refactor::{RefactoringId, TypeCategory};
use carve_syntax::{AstNode, LiteralExpression, LiteralValue};
use pretty_assertions::assert_eq;

use super::common::{apply, check, ids, titles, Request, StubModel};

#[test]
fn caret_on_switch_keyword_braces_every_section() {
    let request = Request::new(
        r#"class C
{
    void M(int x)
    {
        $0switch (x)
        {
            case 1:
                a();
            case 2:
                b(); // two
            default:
                c();
        }
    }
}
"#,
    );

    let offers = request.offers();
    assert_eq!(titles(&offers), vec!["Add braces to sections"]);

    let edit = offers
        .into_iter()
        .next()
        .unwrap()
        .apply(&CancellationToken::new())
        .unwrap();
    assert!(edit.needs_reformat());
    assert_eq!(
        edit.apply().unwrap().to_string(),
        r#"class C
{
    void M(int x)
    {
        switch (x)
        {
            case 1:
                {
                    a();
                }
            case 2:
                {
                    b();
                } // two
            default:
                {
                    c();
                }
        }
    }
}
"#
    );
}

#[test]
fn removing_section_braces_is_not_offered_twice() {
    let request = Request::new(
        r#"class C
{
    int M(int x)
    {
        switch (x)
        {
            $0case 1:
                {
                    return 1;
                }
            default:
                return 0;
        }
    }
}
"#,
    );
    let offers = request.offers();
    assert_eq!(titles(&offers), vec!["Remove braces from section"]);

    let after = apply(offers, RefactoringId::RemoveBracesFromSwitchSection);
    assert_eq!(
        after,
        r#"class C
{
    int M(int x)
    {
        switch (x)
        {
            case 1:
                return 1;
            default:
                return 0;
        }
    }
}
"#
    );

    let again = Request::new(&after.replacen("case 1", "$0case 1", 1));
    let offers = again.offers();
    assert!(!ids(&offers).contains(&RefactoringId::RemoveBracesFromSwitchSection));
    assert_eq!(
        titles(&offers),
        vec!["Add braces to section", "Add braces to sections"]
    );
}

#[test]
fn hexadecimal_literal_converts_from_any_caret_position() {
    let text = r#"class C
{
    int M()
    {
        return /* hex */ 0x1A /* tail */;
    }
}
"#;
    let start = text.find("0x1A").unwrap();
    for offset in start..=start + "0x1A".len() {
        let fixture = format!("{}$0{}", &text[..offset], &text[offset..]);
        let offers = Request::new(&fixture).offers();
        assert_eq!(titles(&offers), vec!["Convert to '26'"], "caret at {offset}");
    }

    let after = check(
        &text.replacen("0x1A", "0x1$0A", 1),
        RefactoringId::ConvertHexadecimalLiteralToDecimalLiteral,
    );
    assert_eq!(after, text.replace("0x1A", "26"));
}

#[test]
fn boolean_negation_is_symmetric() {
    let fixture = r#"class C
{
    bool M()
    {
        return /* a */ /*start*/true/*end*/ /* b */;
    }
}
"#;
    let request = Request::new(fixture);
    let offers = request.offers();
    assert_eq!(titles(&offers), vec!["Negate boolean literal"]);

    let negated = apply(offers, RefactoringId::NegateBooleanLiteral);
    assert_eq!(negated, request.text.replace("true", "false"));

    let back = check(
        &negated.replacen("false", "/*start*/false/*end*/", 1),
        RefactoringId::NegateBooleanLiteral,
    );
    assert_eq!(back, request.text);
}

#[test]
fn caret_before_comma_sees_the_preceding_argument() {
    let request = Request::new(
        r#"class C
{
    void M(int x)
    {
        f(1, x$0, 3);
    }
}
"#,
    );
    let model = || StubModel {
        constants: HashMap::from([("x", LiteralValue::Integer(42))]),
        parameters: vec!["first", "second", "third"],
        ..StubModel::default()
    };

    let offers = request.offers_with_model(model());
    assert_eq!(
        titles(&offers),
        vec!["Replace with constant value '42'", "Add argument name 'second'"]
    );
    let x = request.text.find("x,").unwrap();
    let x_range = TextRange::at(TextSize::try_from(x).unwrap(), TextSize::from(1));
    assert!(offers.iter().all(|offer| offer.target() == x_range));

    let named = apply(
        request.offers_with_model(model()),
        RefactoringId::AddArgumentName,
    );
    assert!(named.contains("f(1, second: x, 3);"), "{named}");
}

#[test]
fn type_category_decides_nullability() {
    assert!(TypeCategory::Reference.admits_null());
    assert!(TypeCategory::Nullable.admits_null());
    assert!(!TypeCategory::Value.admits_null());
    assert!(!TypeCategory::Error.admits_null());
    assert!(!TypeCategory::Unknown.admits_null());
}

#[test]
fn converted_literal_is_a_single_literal_node() {
    let after = check(
        r#"class C
{
    int M()
    {
        return 2$06;
    }
}
"#,
        RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral,
    );
    let root = carve_syntax::parse(&after).syntax();
    let literals: Vec<String> = root
        .descendants()
        .filter_map(LiteralExpression::cast)
        .map(|literal| literal.syntax().to_string())
        .collect();
    assert_eq!(literals, vec!["0x1A"]);
}
