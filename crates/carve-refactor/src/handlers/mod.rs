//! Node-kind dispatchers, one module per construct.
//!
//! Every dispatcher follows the same order: return early when none of its
//! refactorings is enabled, check the span against the construct, then run
//! eligibility analyzers (through [`DispatchContext::analyze`]) and register
//! offers for the ones that succeed.
//!
//! [`DispatchContext::analyze`]: crate::DispatchContext

pub(crate) mod argument;
pub(crate) mod binary;
pub(crate) mod cast;
pub(crate) mod conditional;
pub(crate) mod constant;
pub(crate) mod if_statement;
pub(crate) mod lambda;
pub(crate) mod literal;
pub(crate) mod method;
pub(crate) mod parenthesized;
pub(crate) mod statements;
pub(crate) mod switch_section;
pub(crate) mod switch_statement;

use carve_syntax::{
    ast, make, AstNode, BinaryOperator, Expression, Precedence, SyntaxKind, SyntaxNode,
};
use rowan::{GreenNode, NodeOrToken};

/// Whether an expression of `precedence` needs parentheses when it takes
/// the place of `original`.
pub(crate) fn needs_parens(original: &SyntaxNode, precedence: Precedence) -> bool {
    let Some(parent) = original.parent().and_then(Expression::cast) else {
        return false;
    };
    let is_first_child = parent.syntax().first_child().as_ref() == Some(original);

    match parent {
        Expression::ParenthesizedExpression(_) | Expression::LambdaExpression(_) => false,
        Expression::LiteralExpression(_)
        | Expression::NameExpression(_)
        | Expression::ThisExpression(_)
        | Expression::BaseExpression(_)
        | Expression::ObjectCreationExpression(_) => false,
        Expression::InvocationExpression(_)
        | Expression::MemberAccessExpression(_)
        | Expression::ElementAccessExpression(_)
        | Expression::PostfixUnaryExpression(_) => is_first_child && precedence < Precedence::Primary,
        // `-(-1)` must not become `--1`.
        Expression::PrefixUnaryExpression(_) => precedence <= Precedence::Unary,
        Expression::CastExpression(_) => precedence < Precedence::Unary,
        Expression::AsExpression(_) | Expression::IsExpression(_) => {
            precedence < Precedence::Relational
        }
        Expression::BinaryExpression(binary) => {
            let Some(op) = binary.operator() else {
                return true;
            };
            let right_associative = op == BinaryOperator::Coalesce;
            if is_first_child != right_associative {
                precedence < op.precedence()
            } else {
                precedence <= op.precedence()
            }
        }
        Expression::ConditionalExpression(_) => {
            if is_first_child {
                precedence <= Precedence::Conditional
            } else {
                precedence < Precedence::Conditional
            }
        }
        Expression::AssignmentExpression(_) => {
            is_first_child || precedence < Precedence::Assignment
        }
    }
}

/// Precedence of a detached expression.
pub(crate) fn precedence_of(green: &GreenNode) -> Precedence {
    Expression::cast(SyntaxNode::new_root(green.clone()))
        .map_or(Precedence::Lambda, |expr| expr.precedence())
}

/// `green`, parenthesized if it would rebind in place of `original`.
pub(crate) fn parenthesize_for(original: &SyntaxNode, green: GreenNode) -> GreenNode {
    if needs_parens(original, precedence_of(&green)) {
        make::parenthesized(green)
    } else {
        green
    }
}

/// Logical negation of a boolean expression, in its simplest form.
pub(crate) fn negate(expr: &Expression) -> GreenNode {
    match expr {
        Expression::PrefixUnaryExpression(prefix)
            if prefix
                .operator_token()
                .is_some_and(|op| op.kind() == SyntaxKind::Bang) =>
        {
            if let Some(operand) = prefix.operand() {
                return make::green_node(operand.syntax());
            }
        }
        Expression::BinaryExpression(binary) => {
            if let (Some(op), Some(token)) = (binary.operator(), binary.operator_token()) {
                if let Some(negated) = op.negated() {
                    return with_token_replaced(
                        binary.syntax(),
                        &token,
                        make::token(negated.token_kind(), negated.text()),
                    );
                }
            }
        }
        Expression::LiteralExpression(literal) => {
            if let Some(ast::LiteralKind::Bool(value)) = literal.kind() {
                return make::bool_literal(!value);
            }
        }
        _ => {}
    }

    let green = make::green_node(expr.syntax());
    if expr.precedence() >= Precedence::Unary {
        make::prefix_not(green)
    } else {
        make::prefix_not(make::parenthesized(green))
    }
}

/// Copy of `node` with one of its direct tokens swapped out.
pub(crate) fn with_token_replaced(
    node: &SyntaxNode,
    token: &carve_syntax::SyntaxToken,
    replacement: rowan::GreenToken,
) -> GreenNode {
    let children = node.children_with_tokens().map(|child| match child {
        NodeOrToken::Token(t) if &t == token => NodeOrToken::Token(replacement.clone()),
        other => make::green(&other),
    });
    make::node(node.kind(), children.collect())
}

/// Comment tokens anywhere under `container` that lie outside `inner`.
pub(crate) fn has_comments_outside(container: &SyntaxNode, inner: &SyntaxNode) -> bool {
    let inner_range = inner.text_range();
    container
        .descendants_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .any(|t| {
            matches!(t.kind(), SyntaxKind::LineComment | SyntaxKind::BlockComment)
                && !inner_range.contains_range(t.text_range())
        })
}
