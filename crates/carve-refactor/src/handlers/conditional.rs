use carve_syntax::{ast, make, AstNode, Expression, LiteralKind};
use rowan::NodeOrToken;

use super::{negate, parenthesize_for};
use crate::error::malformed;
use crate::{span, DispatchContext, RefactorError, RefactoringId, TreeEdit};

const IDS: &[RefactoringId] = &[
    RefactoringId::SimplifyConditionalExpression,
    RefactoringId::InvertConditionalExpression,
];

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    conditional: &ast::ConditionalExpression,
) -> Result<(), RefactorError> {
    if !ctx.is_any_enabled(IDS) {
        return Ok(());
    }
    let extent = conditional.syntax().text_range();
    if !span::is_contained_in(ctx.span(), extent) {
        return Ok(());
    }

    if ctx.is_enabled(RefactoringId::SimplifyConditionalExpression) {
        if let Some(keep_condition) = ctx.analyze(|| simplification(conditional)) {
            let conditional = conditional.clone();
            ctx.offer(
                RefactoringId::SimplifyConditionalExpression,
                "Simplify conditional expression",
                extent,
                move |_| {
                    let condition = conditional
                        .condition()
                        .ok_or_else(|| malformed("conditional lost its condition"))?;
                    let green = if keep_condition {
                        make::green_node(condition.syntax())
                    } else {
                        negate(&condition)
                    };
                    let node = conditional.syntax();
                    Ok(TreeEdit::replace_node(node, parenthesize_for(node, green)))
                },
            );
        }
    }

    if ctx.is_enabled(RefactoringId::InvertConditionalExpression)
        && ctx.analyze(|| is_complete(conditional))
    {
        let conditional = conditional.clone();
        ctx.offer(
            RefactoringId::InvertConditionalExpression,
            "Invert conditional expression",
            extent,
            move |_| {
                let (Some(condition), Some(when_true), Some(when_false)) = (
                    conditional.condition(),
                    conditional.when_true(),
                    conditional.when_false(),
                ) else {
                    return Err(malformed("conditional lost an operand"));
                };
                let children = conditional
                    .syntax()
                    .children_with_tokens()
                    .map(|child| match &child {
                        NodeOrToken::Node(node) if node == condition.syntax() => {
                            NodeOrToken::Node(negate(&condition))
                        }
                        NodeOrToken::Node(node) if node == when_true.syntax() => {
                            NodeOrToken::Node(make::green_node(when_false.syntax()))
                        }
                        NodeOrToken::Node(node) if node == when_false.syntax() => {
                            NodeOrToken::Node(make::green_node(when_true.syntax()))
                        }
                        _ => make::green(&child),
                    })
                    .collect();
                let node = conditional.syntax();
                Ok(TreeEdit::replace_node(node, make::node(node.kind(), children)))
            },
        );
    }
    Ok(())
}

/// `Some(true)` for `c ? true : false`, `Some(false)` for `c ? false : true`.
fn simplification(conditional: &ast::ConditionalExpression) -> Option<bool> {
    conditional.condition()?;
    let when_true = bool_value(conditional.when_true()?)?;
    let when_false = bool_value(conditional.when_false()?)?;
    (when_true != when_false).then_some(when_true)
}

fn bool_value(expr: Expression) -> Option<bool> {
    match expr.skip_parens() {
        Expression::LiteralExpression(literal) => match literal.kind()? {
            LiteralKind::Bool(value) => Some(value),
            _ => None,
        },
        _ => None,
    }
}

fn is_complete(conditional: &ast::ConditionalExpression) -> bool {
    conditional.condition().is_some()
        && conditional.question_token().is_some()
        && conditional.when_true().is_some()
        && conditional.colon_token().is_some()
        && conditional.when_false().is_some()
}
