use std::collections::HashMap;

use carve_refactor::RefactoringId;
use carve_syntax::LiteralValue;
use pretty_assertions::assert_eq;

use super::common::{assert_not_offered, check, check_with_model, ids, titles, Request, StubModel};

/// `body` as the only statement of a method.
fn in_method(body: &str) -> String {
    format!("class C\n{{\n    object M(int x)\n    {{\n        {body}\n    }}\n}}\n")
}

#[test]
fn decimal_literal_converts_to_uppercase_hexadecimal() {
    let after = check(
        &in_method("return 2$06;"),
        RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral,
    );
    assert_eq!(after, in_method("return 0x1A;"));
}

#[test]
fn literal_conversion_keeps_the_suffix() {
    let after = check(
        &in_method("return 255$0UL;"),
        RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral,
    );
    assert_eq!(after, in_method("return 0xFFUL;"));

    let after = check(
        &in_method("return 0x$0ffL;"),
        RefactoringId::ConvertHexadecimalLiteralToDecimalLiteral,
    );
    assert_eq!(after, in_method("return 255L;"));
}

#[test]
fn binary_and_real_literals_are_left_alone() {
    let request = Request::new(&in_method("return 0b1$001;"));
    assert!(request.offers().is_empty());

    let request = Request::new(&in_method("return 1.$05;"));
    assert!(request.offers().is_empty());
}

#[test]
fn caret_outside_literal_offers_nothing() {
    let request = Request::new(&in_method("re$0turn 26;"));
    assert!(titles(&request.offers()).is_empty());
}

fn two_parameters() -> StubModel {
    StubModel {
        parameters: vec!["first", "second"],
        ..StubModel::default()
    }
}

#[test]
fn argument_name_is_removed() {
    let after = check_with_model(
        &in_method("f(1, se$0cond: x);"),
        two_parameters(),
        RefactoringId::RemoveArgumentName,
    );
    assert_eq!(after, in_method("f(1, x);"));
}

#[test]
fn argument_name_stays_when_position_binds_elsewhere() {
    let request = Request::new(&in_method("f(sec$0ond: 1, first: 2);"));
    let offers = request.offers_with_model(two_parameters());
    assert!(
        !ids(&offers).contains(&RefactoringId::RemoveArgumentName),
        "{:?}",
        titles(&offers)
    );
}

#[test]
fn argument_name_stays_without_a_model() {
    assert_not_offered(
        &in_method("f(1, se$0cond: x);"),
        RefactoringId::RemoveArgumentName,
    );
}

#[test]
fn argument_name_stays_after_a_named_argument() {
    assert_not_offered(
        &in_method("f(first: 1, se$0cond: x);"),
        RefactoringId::RemoveArgumentName,
    );
}

#[test]
fn argument_name_is_added_from_the_model() {
    let model = StubModel {
        parameters: vec!["count"],
        ..StubModel::default()
    };
    let after = check_with_model(
        &in_method("return new List($05);"),
        model,
        RefactoringId::AddArgumentName,
    );
    assert_eq!(after, in_method("return new List(count: 5);"));
}

#[test]
fn argument_name_needs_a_parameter_name() {
    assert_not_offered(&in_method("f($05);"), RefactoringId::AddArgumentName);
}

#[test]
fn cast_to_string_becomes_as() {
    let after = check(
        &in_method("return (str$0ing)value;"),
        RefactoringId::ReplaceCastWithAs,
    );
    assert_eq!(after, in_method("return value as string;"));
}

#[test]
fn cast_to_value_type_stays() {
    assert_not_offered(
        &in_method("return (i$0nt)value;"),
        RefactoringId::ReplaceCastWithAs,
    );
    assert_not_offered(
        &in_method("return (Fo$0o)value;"),
        RefactoringId::ReplaceCastWithAs,
    );
}

#[test]
fn cast_to_reference_type_asks_the_model() {
    let model = StubModel {
        reference_types: vec!["Foo"],
        ..StubModel::default()
    };
    let after = check_with_model(
        &in_method("return (Fo$0o)value;"),
        model,
        RefactoringId::ReplaceCastWithAs,
    );
    assert_eq!(after, in_method("return value as Foo;"));
}

#[test]
fn cast_operand_keeps_its_grouping() {
    let after = check(
        &in_method("return ((o$0bject)value).ToString();"),
        RefactoringId::ReplaceCastWithAs,
    );
    assert_eq!(after, in_method("return (value as object).ToString();"));
}

#[test]
fn constant_value_replaces_the_name() {
    let model = StubModel {
        constants: HashMap::from([("Limits.Max", LiteralValue::Integer(100))]),
        ..StubModel::default()
    };
    let request = Request::new(&in_method("return Limits.M$0ax * 2;"));
    let offers = request.offers_with_model(model);
    assert_eq!(titles(&offers), vec!["Replace with constant value '100'"]);

    let model = StubModel {
        constants: HashMap::from([("Limits.Max", LiteralValue::Integer(100))]),
        ..StubModel::default()
    };
    let after = check_with_model(
        &in_method("return Limits.M$0ax * 2;"),
        model,
        RefactoringId::ReplaceExpressionWithConstantValue,
    );
    assert_eq!(after, in_method("return 100 * 2;"));
}

#[test]
fn negative_constant_is_parenthesized_where_needed() {
    let model = StubModel {
        constants: HashMap::from([("offset", LiteralValue::Integer(-1))]),
        ..StubModel::default()
    };
    let after = check_with_model(
        &in_method("return -offset$0;"),
        model,
        RefactoringId::ReplaceExpressionWithConstantValue,
    );
    assert_eq!(after, in_method("return -(-1);"));
}

#[test]
fn assignment_target_is_not_replaced() {
    let model = StubModel {
        constants: HashMap::from([("x", LiteralValue::Integer(1))]),
        ..StubModel::default()
    };
    let request = Request::new(&in_method("x$0 = 2;"));
    assert!(request.offers_with_model(model).is_empty());
}

#[test]
fn conditional_with_literal_branches_is_simplified() {
    let request = Request::new(&in_method("return ok $0? true : false;"));
    assert_eq!(
        titles(&request.offers()),
        vec!["Simplify conditional expression", "Invert conditional expression"]
    );

    let after = check(
        &in_method("return ok $0? true : false;"),
        RefactoringId::SimplifyConditionalExpression,
    );
    assert_eq!(after, in_method("return ok;"));

    let after = check(
        &in_method("return a == b $0? false : true;"),
        RefactoringId::SimplifyConditionalExpression,
    );
    assert_eq!(after, in_method("return a != b;"));
}

#[test]
fn matching_literal_branches_are_not_simplified() {
    assert_not_offered(
        &in_method("return ok $0? true : true;"),
        RefactoringId::SimplifyConditionalExpression,
    );
}

#[test]
fn conditional_is_inverted() {
    let after = check(
        &in_method("return a < b $0? x : y;"),
        RefactoringId::InvertConditionalExpression,
    );
    assert_eq!(after, in_method("return a >= b ? y : x;"));

    let after = check(
        &in_method("return ok $0? x : y;"),
        RefactoringId::InvertConditionalExpression,
    );
    assert_eq!(after, in_method("return !ok ? y : x;"));
}

#[test]
fn comparison_operands_swap_with_mirrored_operator() {
    let after = check(
        &in_method("return a $0< b;"),
        RefactoringId::SwapBinaryOperands,
    );
    assert_eq!(after, in_method("return b > a;"));

    let after = check(
        &in_method("return /*start*/a == b/*end*/;"),
        RefactoringId::SwapBinaryOperands,
    );
    assert_eq!(after, in_method("return b == a;"));
}

#[test]
fn swapped_operands_keep_their_grouping() {
    let after = check(
        &in_method("return a == b $0== c;"),
        RefactoringId::SwapBinaryOperands,
    );
    assert_eq!(after, in_method("return c == (a == b);"));
}

#[test]
fn short_circuit_operands_with_side_effects_stay() {
    assert_not_offered(
        &in_method("return x == 1 $0&& f();"),
        RefactoringId::SwapBinaryOperands,
    );
    let after = check(
        &in_method("return a $0&& b;"),
        RefactoringId::SwapBinaryOperands,
    );
    assert_eq!(after, in_method("return b && a;"));
}

#[test]
fn only_symmetric_operators_swap() {
    assert_not_offered(
        &in_method("return /*start*/a - b/*end*/;"),
        RefactoringId::SwapBinaryOperands,
    );
    assert_not_offered(
        &in_method("return a $0* b;"),
        RefactoringId::SwapBinaryOperands,
    );
}

#[test]
fn receiver_of_member_access_is_not_replaced() {
    let model = StubModel {
        constants: HashMap::from([("offset", LiteralValue::Integer(1))]),
        ..StubModel::default()
    };
    let request = Request::new(&in_method("return offset$0.ToString();"));
    assert!(request.offers_with_model(model).is_empty());
}

#[test]
fn redundant_parentheses_are_removed() {
    let after = check(
        &in_method("return $0(a * b) + c;"),
        RefactoringId::RemoveParentheses,
    );
    assert_eq!(after, in_method("return a * b + c;"));

    let after = check(
        &in_method("return (a)$0;"),
        RefactoringId::RemoveParentheses,
    );
    assert_eq!(after, in_method("return a;"));
}

#[test]
fn parentheses_that_group_stay() {
    assert_not_offered(
        &in_method("return $0(a + b) * c;"),
        RefactoringId::RemoveParentheses,
    );
    assert_not_offered(
        &in_method("return a - $0(b - c);"),
        RefactoringId::RemoveParentheses,
    );
    assert_not_offered(
        &in_method("return (int)$0(-x);"),
        RefactoringId::RemoveParentheses,
    );
}

#[test]
fn caret_on_parenthesis_reaches_the_inner_literal() {
    let request = Request::new(&in_method("return $0(0x10);"));
    let offers = request.offers();
    assert_eq!(titles(&offers), vec!["Convert to '16'", "Remove parentheses"]);
    assert!(offers[1].target().contains_range(offers[0].target()));
    assert_ne!(offers[1].target(), offers[0].target());
}

#[test]
fn lambda_block_collapses_to_its_expression() {
    let after = check(
        &in_method("Func f = x $0=> { return x * 2; };"),
        RefactoringId::UseExpressionBodiedLambda,
    );
    assert_eq!(after, in_method("Func f = x => x * 2;"));
}

#[test]
fn lambda_block_with_two_statements_stays() {
    assert_not_offered(
        &in_method("Action f = () $0=> { a(); b(); };"),
        RefactoringId::UseExpressionBodiedLambda,
    );
}

#[test]
fn lambda_expression_gets_a_return_block() {
    let after = check(
        &in_method("Func f = x $0=> x + 1;"),
        RefactoringId::UseBlockBodiedLambda,
    );
    assert_eq!(after, in_method("Func f = x => { return x + 1; };"));
}

#[test]
fn void_lambda_call_becomes_a_statement() {
    let model = StubModel {
        lambda_returns_void: Some(true),
        ..StubModel::default()
    };
    let after = check_with_model(
        &in_method("Action a = () $0=> Log(1);"),
        model,
        RefactoringId::UseBlockBodiedLambda,
    );
    assert_eq!(after, in_method("Action a = () => { Log(1); };"));
}

#[test]
fn lambda_call_with_unknown_return_is_not_offered() {
    assert_not_offered(
        &in_method("Action a = () $0=> Log(1);"),
        RefactoringId::UseBlockBodiedLambda,
    );
}

#[test]
fn lambda_body_is_out_of_reach() {
    let request = Request::new(&in_method("Func f = x => x $0+ 1;"));
    assert!(!ids(&request.offers()).contains(&RefactoringId::UseBlockBodiedLambda));
}

#[test]
fn method_with_single_return_becomes_expression_bodied() {
    let after = check(
        "class C\n{\n    int Tw$0ice(int x)\n    {\n        return x * 2;\n    }\n}\n",
        RefactoringId::UseExpressionBodiedMethod,
    );
    assert_eq!(after, "class C\n{\n    int Twice(int x) => x * 2;\n}\n");
}

#[test]
fn void_method_keeps_its_statement_expression() {
    let after = check(
        "class C\n{\n    void Lo$0g()\n    {\n        Write(1);\n    }\n}\n",
        RefactoringId::UseExpressionBodiedMethod,
    );
    assert_eq!(after, "class C\n{\n    void Log() => Write(1);\n}\n");
}

#[test]
fn method_with_several_statements_stays() {
    assert_not_offered(
        "class C\n{\n    int Tw$0ice(int x)\n    {\n        a();\n        return x * 2;\n    }\n}\n",
        RefactoringId::UseExpressionBodiedMethod,
    );
    assert_not_offered(
        "class C\n{\n    int Twice(int x)\n    {\n        return x $0* 2;\n    }\n}\n",
        RefactoringId::UseExpressionBodiedMethod,
    );
}
