use carve_refactor::RefactoringId;
use carve_syntax::{parse, AstNode, IfStatement};
use pretty_assertions::assert_eq;

use super::common::{apply, assert_not_offered, check, ids, titles, Request};

/// `body` as the statements of a method, indented by the caller.
fn in_method(body: &str) -> String {
    let body = body.trim_matches('\n');
    format!("class C\n{{\n    void M(bool x, int n)\n    {{\n{body}\n    }}\n}}\n")
}

#[test]
fn braces_are_added_to_both_branches() {
    let fixture = in_method(
        r#"
        $0if (x)
            a();
        else
            b();
"#,
    );
    let request = Request::new(&fixture);
    assert_eq!(titles(&request.offers()), vec!["Add braces"]);

    let after = check(&fixture, RefactoringId::AddBraces);
    assert_eq!(
        after,
        in_method(
            r#"
        if (x)
        {
            a();
        }
        else
        {
            b();
        }
"#
        )
    );
}

#[test]
fn removing_braces_restores_the_original_layout() {
    let braced = in_method(
        r#"
        if$0 (x)
        {
            a();
        }
        else
        {
            b();
        }
"#,
    );
    let request = Request::new(&braced);
    assert_eq!(titles(&request.offers()), vec!["Remove braces"]);

    let after = check(&braced, RefactoringId::RemoveBraces);
    assert_eq!(
        after,
        in_method(
            r#"
        if (x)
            a();
        else
            b();
"#
        )
    );
}

#[test]
fn caret_on_else_reaches_the_head_of_the_chain() {
    let after = check(
        &in_method(
            r#"
        if (x)
            a();
        $0else if (n > 0)
            b();
"#,
        ),
        RefactoringId::AddBraces,
    );
    assert_eq!(
        after,
        in_method(
            r#"
        if (x)
        {
            a();
        }
        else if (n > 0)
            b();
"#
        )
    );
}

#[test]
fn nested_if_keeps_the_braces_that_bind_its_else() {
    let fixture = in_method(
        r#"
        $0if (x)
        {
            if (n > 0)
                a();
        }
        else
            b();
"#,
    );
    let offered = ids(&Request::new(&fixture).offers());
    assert_eq!(offered, vec![RefactoringId::AddBraces]);

    let after = check(&fixture, RefactoringId::AddBraces);
    assert_eq!(
        after,
        in_method(
            r#"
        if (x)
        {
            if (n > 0)
                a();
        }
        else
        {
            b();
        }
"#
        )
    );
}

#[test]
fn braces_stay_when_the_block_ends_in_an_open_if() {
    for inner in [
        "            while (x)\n                if (n > 0)\n                    a();",
        "            if (n > 0)\n                a();\n            else if (n < 0)\n                c();",
    ] {
        let fixture = format!(
            "class C\n{{\n    void M(bool x, int n)\n    {{\n        $0if (x)\n        {{\n{inner}\n        }}\n        else\n            b();\n    }}\n}}\n"
        );
        let offered = ids(&Request::new(&fixture).offers());
        assert_eq!(offered, vec![RefactoringId::AddBraces], "{inner}");
    }
}

#[test]
fn braces_go_when_the_inner_if_has_its_own_else() {
    let fixture = in_method(
        r#"
        $0if (x)
        {
            if (n > 0)
                a();
            else
                c();
        }
        else
            b();
"#,
    );
    let offered = ids(&Request::new(&fixture).offers());
    assert_eq!(offered, vec![RefactoringId::AddBraces, RefactoringId::RemoveBraces]);

    let after = check(&fixture, RefactoringId::RemoveBraces);
    let root = parse(&after).syntax();
    let outer = root.descendants().find_map(IfStatement::cast).unwrap();
    let else_branch = outer.else_clause().and_then(|clause| clause.statement());
    assert_eq!(
        else_branch.map(|statement| statement.syntax().to_string()),
        Some("b();".to_string())
    );
}

#[test]
fn braces_around_declarations_or_comments_stay() {
    assert_not_offered(
        &in_method(
            r#"
        $0if (x)
        {
            int y = 1;
        }
"#,
        ),
        RefactoringId::RemoveBraces,
    );
    assert_not_offered(
        &in_method(
            r#"
        $0if (x)
        {
            // why
            a();
        }
"#,
        ),
        RefactoringId::RemoveBraces,
    );
}

#[test]
fn caret_in_branch_body_is_not_on_the_header() {
    assert_not_offered(
        &in_method(
            r#"
        if (x)
            a$0();
"#,
        ),
        RefactoringId::AddBraces,
    );
}

#[test]
fn selected_sections_get_braces_together() {
    let request = Request::new(&in_method(
        r#"
        switch (n)
        {
            /*start*/case 1:
                a();/*end*/
            case 2:
                b();
        }
"#,
    ));
    let offers = request.offers();
    assert_eq!(
        titles(&offers),
        vec!["Add braces to section", "Add braces to sections"]
    );

    let after = apply(offers, RefactoringId::AddBracesToSwitchSections);
    assert_eq!(
        after,
        in_method(
            r#"
        switch (n)
        {
            case 1:
                {
                    a();
                }
            case 2:
                b();
        }
"#
        )
    );
}

#[test]
fn selection_cutting_through_sections_offers_nothing() {
    let request = Request::new(&in_method(
        r#"
        switch (n)
        {
            case 1:
                /*start*/a();
            case 2:/*end*/
                b();
        }
"#,
    ));
    assert!(request.offers().is_empty());
}

#[test]
fn caret_in_section_body_is_not_on_the_labels() {
    let request = Request::new(&in_method(
        r#"
        switch (n)
        {
            case 1:
                a$0();
        }
"#,
    ));
    let offered = ids(&request.offers());
    assert!(!offered.contains(&RefactoringId::AddBracesToSwitchSection));
    assert!(!offered.contains(&RefactoringId::AddBracesToSwitchSections));
}

#[test]
fn section_statements_can_be_wrapped() {
    let fixture = in_method(
        r#"
        switch (n)
        {
            case 1:
                /*start*/a();
                b();/*end*/
                break;
        }
"#,
    );
    let request = Request::new(&fixture);
    assert_eq!(
        titles(&request.offers()),
        vec!["Wrap in condition", "Wrap in try-catch"]
    );

    let after = check(&fixture, RefactoringId::WrapInCondition);
    assert_eq!(
        after,
        in_method(
            r#"
        switch (n)
        {
            case 1:
                if (condition)
                {
                    a();
                    b();
                }
                break;
        }
"#
        )
    );
}

#[test]
fn statements_are_wrapped_in_a_condition() {
    let fixture = in_method(
        r#"
        /*start*/a();
        b();/*end*/
        c();
"#,
    );
    let request = Request::new(&fixture);
    assert_eq!(
        titles(&request.offers()),
        vec!["Wrap in condition", "Wrap in try-catch"]
    );

    let after = check(&fixture, RefactoringId::WrapInCondition);
    assert_eq!(
        after,
        in_method(
            r#"
        if (condition)
        {
            a();
            b();
        }
        c();
"#
        )
    );
}

#[test]
fn statements_are_wrapped_in_a_try_catch() {
    let after = check(
        &in_method(
            r#"
        /*start*/a();
        b();/*end*/
        c();
"#,
        ),
        RefactoringId::WrapInTryCatch,
    );
    assert_eq!(
        after,
        in_method(
            r#"
        try
        {
            a();
            b();
        }
        catch (Exception)
        {
        }
        c();
"#
        )
    );
}

#[test]
fn locals_read_after_the_selection_block_wrapping() {
    assert_not_offered(
        &in_method(
            r#"
        /*start*/int y = 1;/*end*/
        a(y);
"#,
        ),
        RefactoringId::WrapInCondition,
    );

    let after = check(
        &in_method(
            r#"
        /*start*/int y = 1;
        a(y);/*end*/
"#,
        ),
        RefactoringId::WrapInCondition,
    );
    assert_eq!(
        after,
        in_method(
            r#"
        if (condition)
        {
            int y = 1;
            a(y);
        }
"#
        )
    );
}

#[test]
fn locals_read_in_a_later_section_block_wrapping() {
    let fixture = in_method(
        r#"
        switch (n)
        {
            case 1:
                /*start*/int y = 1;/*end*/
                break;
            case 2:
                y = 2;
                break;
        }
"#,
    );
    let offered = ids(&Request::new(&fixture).offers());
    assert!(!offered.contains(&RefactoringId::WrapInCondition), "{offered:?}");
    assert!(!offered.contains(&RefactoringId::WrapInTryCatch), "{offered:?}");

    let unrelated = fixture.replace("y = 2;", "a();");
    assert_eq!(
        titles(&Request::new(&unrelated).offers()),
        vec!["Wrap in condition", "Wrap in try-catch"]
    );
}

#[test]
fn partially_selected_statement_blocks_wrapping() {
    assert_not_offered(
        &in_method(
            r#"
        /*start*/a();
        b/*end*/();
"#,
        ),
        RefactoringId::WrapInCondition,
    );
}

#[test]
fn empty_caret_does_not_wrap() {
    let request = Request::new(&in_method(
        r#"
        a();$0
        b();
"#,
    ));
    assert!(!ids(&request.offers()).contains(&RefactoringId::WrapInCondition));
}
