use carve_syntax::{ast, make, AstNode, Expression, SyntaxKind};

use super::parenthesize_for;
use crate::error::malformed;
use crate::{span, DispatchContext, Eligibility, RefactorError, RefactoringId, TreeEdit};

/// Names and member accesses that the host can fold to a constant.
pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    expr: &Expression,
) -> Result<(), RefactorError> {
    let id = RefactoringId::ReplaceExpressionWithConstantValue;
    if !ctx.is_enabled(id) {
        return Ok(());
    }
    let extent = expr.syntax().text_range();
    if !span::is_contained_in(ctx.span(), extent) {
        return Ok(());
    }
    if ctx.analyze(|| analyze(expr)) != Eligibility::NeedsSemantic {
        return Ok(());
    }

    let Some(model) = ctx.semantic()? else {
        return Ok(());
    };
    ctx.check_cancelled()?;
    let Some(text) = model.constant_value(expr).and_then(|value| value.to_source()) else {
        return Ok(());
    };

    let node = expr.syntax().clone();
    let title = format!("Replace with constant value '{text}'");
    ctx.offer(id, title, extent, move |_| {
        let green = make::expr_from_text(&text)
            .ok_or_else(|| malformed(format!("constant `{text}` is not an expression")))?;
        Ok(TreeEdit::replace_node(&node, parenthesize_for(&node, green)))
    });
    Ok(())
}

fn analyze(expr: &Expression) -> Eligibility<()> {
    if !matches!(
        expr,
        Expression::NameExpression(_) | Expression::MemberAccessExpression(_)
    ) {
        return Eligibility::Ineligible;
    }
    let Some(parent) = expr.syntax().parent() else {
        return Eligibility::NeedsSemantic;
    };
    let is_first_child = parent.first_child().as_ref() == Some(expr.syntax());

    let written_or_called = match parent.kind() {
        SyntaxKind::AssignmentExpression | SyntaxKind::InvocationExpression => is_first_child,
        // Receivers name a type or namespace as often as a value.
        SyntaxKind::MemberAccessExpression => is_first_child,
        SyntaxKind::PrefixUnaryExpression | SyntaxKind::PostfixUnaryExpression => {
            ast::PrefixUnaryExpression::cast(parent.clone())
                .and_then(|it| it.operator_token())
                .or_else(|| {
                    ast::PostfixUnaryExpression::cast(parent.clone())
                        .and_then(|it| it.operator_token())
                })
                .is_some_and(|op| matches!(op.kind(), SyntaxKind::PlusPlus | SyntaxKind::MinusMinus))
        }
        _ => false,
    };
    if written_or_called {
        Eligibility::Ineligible
    } else {
        Eligibility::NeedsSemantic
    }
}
