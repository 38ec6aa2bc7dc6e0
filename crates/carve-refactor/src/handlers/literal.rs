use carve_syntax::{
    ast, make, parse_integer_literal, AstNode, IntegerLiteral, LiteralKind, Radix, SyntaxKind,
};

use crate::{span, DispatchContext, RefactorError, RefactoringId, TreeEdit};

const IDS: &[RefactoringId] = &[
    RefactoringId::ConvertHexadecimalLiteralToDecimalLiteral,
    RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral,
    RefactoringId::NegateBooleanLiteral,
];

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    literal: &ast::LiteralExpression,
) -> Result<(), RefactorError> {
    if !ctx.is_any_enabled(IDS) {
        return Ok(());
    }
    let extent = literal.syntax().text_range();
    if !span::is_contained_in(ctx.span(), extent) {
        return Ok(());
    }

    match literal.kind() {
        Some(LiteralKind::Integer)
            if ctx.is_any_enabled(&[
                RefactoringId::ConvertHexadecimalLiteralToDecimalLiteral,
                RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral,
            ]) =>
        {
            let Some(parsed) = ctx.analyze(|| integer_literal(literal)) else {
                return Ok(());
            };
            let (id, text) = match parsed.radix {
                Radix::Hexadecimal => (
                    RefactoringId::ConvertHexadecimalLiteralToDecimalLiteral,
                    parsed.to_decimal(),
                ),
                Radix::Decimal => (
                    RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral,
                    parsed.to_hexadecimal(),
                ),
                Radix::Binary => return Ok(()),
            };
            if !ctx.is_enabled(id) {
                return Ok(());
            }

            let node = literal.syntax().clone();
            let title = format!("Convert to '{text}'");
            ctx.offer(id, title, extent, move |_| {
                Ok(TreeEdit::replace_node(
                    &node,
                    make::literal(SyntaxKind::IntLiteral, &text),
                ))
            });
        }
        Some(LiteralKind::Bool(_)) if ctx.is_enabled(RefactoringId::NegateBooleanLiteral) => {
            let Some(value) = ctx.analyze(|| boolean_literal(literal)) else {
                return Ok(());
            };
            let node = literal.syntax().clone();
            ctx.offer(
                RefactoringId::NegateBooleanLiteral,
                "Negate boolean literal",
                extent,
                move |_| Ok(TreeEdit::replace_node(&node, make::bool_literal(!value))),
            );
        }
        _ => {}
    }
    Ok(())
}

/// Integer literals whose value fits the widest integer type.
fn integer_literal(literal: &ast::LiteralExpression) -> Option<IntegerLiteral> {
    let token = literal.token()?;
    if token.kind() != SyntaxKind::IntLiteral {
        return None;
    }
    parse_integer_literal(token.text()).ok()
}

fn boolean_literal(literal: &ast::LiteralExpression) -> Option<bool> {
    match literal.kind()? {
        LiteralKind::Bool(value) => Some(value),
        _ => None,
    }
}
