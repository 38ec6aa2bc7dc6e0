use carve_syntax::{
    ast, make, AstNode, Expression, GreenElement, LambdaBody, Statement, SyntaxKind, TextRange,
};
use rowan::{GreenNode, NodeOrToken};

use super::has_comments_outside;
use crate::{span, DispatchContext, Eligibility, RefactorError, RefactoringId, TreeEdit};

const IDS: &[RefactoringId] = &[
    RefactoringId::UseExpressionBodiedLambda,
    RefactoringId::UseBlockBodiedLambda,
];

/// Statement shape for a block body built from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyStatement {
    Expression,
    Return,
}

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    lambda: &ast::LambdaExpression,
) -> Result<(), RefactorError> {
    if !ctx.is_any_enabled(IDS) {
        return Ok(());
    }
    let Some(arrow) = lambda.arrow_token() else {
        return Ok(());
    };
    let header = TextRange::new(lambda.syntax().text_range().start(), arrow.text_range().end());
    if !span::is_contained_in(ctx.span(), header) {
        return Ok(());
    }

    match lambda.body() {
        Some(LambdaBody::Block(block)) => {
            if !ctx.is_enabled(RefactoringId::UseExpressionBodiedLambda) {
                return Ok(());
            }
            let Some(expr) = ctx.analyze(|| reducible_expression(&block)) else {
                return Ok(());
            };
            let block = block.syntax().clone();
            ctx.offer(
                RefactoringId::UseExpressionBodiedLambda,
                "Use expression-bodied lambda",
                lambda.syntax().text_range(),
                move |_| {
                    Ok(TreeEdit::replace_node(
                        &block,
                        make::green_node(expr.syntax()),
                    ))
                },
            );
        }
        Some(LambdaBody::Expression(expr)) => {
            if !ctx.is_enabled(RefactoringId::UseBlockBodiedLambda) {
                return Ok(());
            }
            let shape = match ctx.analyze(|| block_body_shape(&expr)) {
                Eligibility::Ineligible => return Ok(()),
                Eligibility::Eligible(shape) => shape,
                Eligibility::NeedsSemantic => {
                    let Some(model) = ctx.semantic()? else {
                        return Ok(());
                    };
                    ctx.check_cancelled()?;
                    match model.lambda_returns_void(lambda) {
                        Some(true) => BodyStatement::Expression,
                        Some(false) => BodyStatement::Return,
                        None => return Ok(()),
                    }
                }
            };
            ctx.offer(
                RefactoringId::UseBlockBodiedLambda,
                "Use block body for lambda",
                lambda.syntax().text_range(),
                move |_| {
                    let statement = body_statement(&expr, shape);
                    let block = make::block(vec![
                        make::whitespace(" "),
                        NodeOrToken::Node(statement),
                        make::whitespace(" "),
                    ]);
                    Ok(TreeEdit::replace_node(expr.syntax(), block))
                },
            );
        }
        None => {}
    }
    Ok(())
}

/// The expression a single-statement block body reduces to.
fn reducible_expression(block: &ast::Block) -> Option<Expression> {
    let expr = match block.single_statement()? {
        Statement::ReturnStatement(ret) => ret.expression()?,
        Statement::ExpressionStatement(stmt) => stmt.expression()?,
        _ => return None,
    };
    (!has_comments_outside(block.syntax(), expr.syntax())).then_some(expr)
}

/// Expressions that are valid statements on their own depend on whether
/// the lambda returns a value; everything else must be returned.
fn block_body_shape(expr: &Expression) -> Eligibility<BodyStatement> {
    let statement_like = match expr {
        Expression::InvocationExpression(_)
        | Expression::AssignmentExpression(_)
        | Expression::ObjectCreationExpression(_) => true,
        Expression::PrefixUnaryExpression(it) => is_increment(it.operator_token()),
        Expression::PostfixUnaryExpression(it) => is_increment(it.operator_token()),
        _ => false,
    };
    if statement_like {
        Eligibility::NeedsSemantic
    } else {
        Eligibility::Eligible(BodyStatement::Return)
    }
}

fn is_increment(op: Option<carve_syntax::SyntaxToken>) -> bool {
    op.is_some_and(|op| matches!(op.kind(), SyntaxKind::PlusPlus | SyntaxKind::MinusMinus))
}

fn body_statement(expr: &Expression, shape: BodyStatement) -> GreenNode {
    let expr = NodeOrToken::Node(make::green_node(expr.syntax()));
    let semicolon: GreenElement = NodeOrToken::Token(make::token(SyntaxKind::Semicolon, ";"));
    match shape {
        BodyStatement::Expression => {
            make::node(SyntaxKind::ExpressionStatement, vec![expr, semicolon])
        }
        BodyStatement::Return => make::node(
            SyntaxKind::ReturnStatement,
            vec![
                NodeOrToken::Token(make::token(SyntaxKind::ReturnKw, "return")),
                make::whitespace(" "),
                expr,
                semicolon,
            ],
        ),
    }
}
