use carve_syntax::{ast, make, AstNode, Expression, Statement, SyntaxKind};
use rowan::NodeOrToken;

use super::has_comments_outside;
use crate::layout::is_plain_whitespace;
use crate::{span, trivia, DispatchContext, RefactorError, RefactoringId, TreeEdit};

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    method: &ast::MethodDeclaration,
) -> Result<(), RefactorError> {
    let id = RefactoringId::UseExpressionBodiedMethod;
    if !ctx.is_enabled(id) {
        return Ok(());
    }
    let (Some(name), Some(params)) = (method.name_token(), method.parameter_list()) else {
        return Ok(());
    };
    let header = span::cover(name.text_range(), params.syntax().text_range());
    if !span::is_contained_in(ctx.span(), header) {
        return Ok(());
    }
    let Some(expr) = ctx.analyze(|| reducible_expression(method)) else {
        return Ok(());
    };
    let Some(body) = method.body() else {
        return Ok(());
    };

    let method_node = method.syntax().clone();
    ctx.offer(
        id,
        "Use expression-bodied member",
        method.syntax().text_range(),
        move |_| {
            let body = NodeOrToken::Node(body.syntax().clone());
            let clause = make::node(
                SyntaxKind::ArrowExpressionClause,
                vec![
                    NodeOrToken::Token(make::token(SyntaxKind::FatArrow, "=>")),
                    make::whitespace(" "),
                    NodeOrToken::Node(make::green_node(expr.syntax())),
                ],
            );
            let semicolon = NodeOrToken::Token(make::token(SyntaxKind::Semicolon, ";"));

            // `Foo()\n{ ... }` becomes `Foo() => ...;` when only whitespace
            // separates the parameters from the body.
            let leading = trivia::leading(&body);
            let first = match leading.first() {
                Some(ws) if is_plain_whitespace(&leading) => NodeOrToken::Token(ws.clone()),
                _ => body.clone(),
            };
            let mut replacement = Vec::with_capacity(3);
            if first != body {
                replacement.push(make::whitespace(" "));
            }
            replacement.push(NodeOrToken::Node(clause));
            replacement.push(semicolon);
            TreeEdit::replace_children(&method_node, &first, &body, replacement)
        },
    );
    Ok(())
}

/// Void methods need a single expression statement; others a single
/// `return expr;`. Comments inside the body would be lost.
fn reducible_expression(method: &ast::MethodDeclaration) -> Option<Expression> {
    let body = method.body()?;
    let expr = match (body.single_statement()?, method.returns_void()) {
        (Statement::ExpressionStatement(stmt), true) => stmt.expression()?,
        (Statement::ReturnStatement(ret), false) => ret.expression()?,
        _ => return None,
    };
    (!has_comments_outside(body.syntax(), expr.syntax())).then_some(expr)
}
