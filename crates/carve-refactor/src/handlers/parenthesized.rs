use carve_syntax::{ast, make, AstNode, Expression, Precedence, SyntaxKind, TextRange};

use super::needs_parens;
use crate::dispatch::dispatch_node;
use crate::error::malformed;
use crate::{span, DispatchContext, RefactorError, RefactoringId, TreeEdit};

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    paren: &ast::ParenthesizedExpression,
) -> Result<(), RefactorError> {
    let Some(inner) = paren.expression() else {
        return Ok(());
    };

    // A caret on `(` is a caret on the start of the inner expression too,
    // which the ancestor walk never visits. Inner offers come first.
    let on_l_paren = paren
        .l_paren_token()
        .is_some_and(|token| token.text_range().start() == ctx.span().start());
    if ctx.span().is_empty() && on_l_paren {
        let caret = TextRange::empty(inner.syntax().text_range().start());
        ctx.with_span(caret, |ctx| dispatch_node(ctx, inner.syntax()))?;
    }

    if ctx.is_enabled(RefactoringId::RemoveParentheses) && is_on_parentheses(ctx, paren) {
        if ctx.analyze(|| is_removable(paren, &inner)) {
            let node = paren.syntax().clone();
            let paren = paren.clone();
            ctx.offer(
                RefactoringId::RemoveParentheses,
                "Remove parentheses",
                node.text_range(),
                move |_| {
                    let inner = paren
                        .expression()
                        .ok_or_else(|| malformed("parentheses lost their expression"))?;
                    Ok(TreeEdit::replace_node(
                        &node,
                        make::green_node(inner.syntax()),
                    ))
                },
            );
        }
    }
    Ok(())
}

fn is_on_parentheses(ctx: &DispatchContext<'_>, paren: &ast::ParenthesizedExpression) -> bool {
    let on_token = |token: Option<carve_syntax::SyntaxToken>| {
        token.is_some_and(|t| span::is_empty_and_contained_in(ctx.span(), t.text_range()))
    };
    on_token(paren.l_paren_token())
        || on_token(paren.r_paren_token())
        || span::is_selection_of(ctx.span(), paren.syntax().text_range())
}

/// Removing the parentheses must not rebind the inner expression.
fn is_removable(paren: &ast::ParenthesizedExpression, inner: &Expression) -> bool {
    if paren.r_paren_token().is_none() {
        return false;
    }
    let precedence = inner.precedence();
    let under_cast = paren
        .syntax()
        .parent()
        .is_some_and(|parent| parent.kind() == SyntaxKind::CastExpression);
    if precedence == Precedence::Primary {
        return true;
    }
    // `(T)(-x)` would read as a subtraction without them.
    !under_cast && !needs_parens(paren.syntax(), precedence)
}
