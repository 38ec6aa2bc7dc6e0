use carve_syntax::{ast, make, AstNode, BinaryOperator, Expression};
use rowan::{GreenNode, NodeOrToken};

use crate::error::malformed;
use crate::{span, DispatchContext, RefactorError, RefactoringId, TreeEdit};

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    binary: &ast::BinaryExpression,
) -> Result<(), RefactorError> {
    let id = RefactoringId::SwapBinaryOperands;
    if !ctx.is_enabled(id) {
        return Ok(());
    }
    let Some(op_token) = binary.operator_token() else {
        return Ok(());
    };
    let extent = binary.syntax().text_range();
    if !span::is_empty_and_contained_in(ctx.span(), op_token.text_range())
        && !span::is_selection_of(ctx.span(), extent)
    {
        return Ok(());
    }
    let Some(mirrored) = ctx.analyze(|| swappable(binary)) else {
        return Ok(());
    };

    let binary = binary.clone();
    ctx.offer(id, "Swap operands", extent, move |_| {
        let (Some(lhs), Some(rhs), Some(op_token)) =
            (binary.lhs(), binary.rhs(), binary.operator_token())
        else {
            return Err(malformed("binary expression lost an operand"));
        };
        let precedence = mirrored.precedence();
        let children = binary
            .syntax()
            .children_with_tokens()
            .map(|child| match &child {
                NodeOrToken::Node(node) if node == lhs.syntax() => {
                    NodeOrToken::Node(operand(&rhs, rhs.precedence() < precedence))
                }
                NodeOrToken::Node(node) if node == rhs.syntax() => {
                    NodeOrToken::Node(operand(&lhs, lhs.precedence() <= precedence))
                }
                NodeOrToken::Token(token) if token == &op_token => {
                    NodeOrToken::Token(make::token(mirrored.token_kind(), mirrored.text()))
                }
                _ => make::green(&child),
            })
            .collect();
        let node = binary.syntax();
        Ok(TreeEdit::replace_node(node, make::node(node.kind(), children)))
    });
    Ok(())
}

/// The operator to use once the operands trade places. Short-circuiting
/// operators only swap when neither operand has side effects.
fn swappable(binary: &ast::BinaryExpression) -> Option<BinaryOperator> {
    let op = binary.operator()?;
    let mirrored = op.mirrored()?;
    let (lhs, rhs) = (binary.lhs()?, binary.rhs()?);
    if matches!(op, BinaryOperator::And | BinaryOperator::Or)
        && !(lhs.is_side_effect_free() && rhs.is_side_effect_free())
    {
        return None;
    }
    Some(mirrored)
}

fn operand(expr: &Expression, parenthesize: bool) -> GreenNode {
    let green = make::green_node(expr.syntax());
    if parenthesize {
        make::parenthesized(green)
    } else {
        green
    }
}
