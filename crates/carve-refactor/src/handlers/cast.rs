use carve_syntax::{ast, make, AstNode, SyntaxKind};

use super::parenthesize_for;
use crate::error::malformed;
use crate::{span, DispatchContext, Eligibility, RefactorError, RefactoringId, TreeEdit};

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    cast: &ast::CastExpression,
) -> Result<(), RefactorError> {
    if !ctx.is_enabled(RefactoringId::ReplaceCastWithAs) {
        return Ok(());
    }
    let (Some(l_paren), Some(r_paren)) = (cast.l_paren_token(), cast.r_paren_token()) else {
        return Ok(());
    };
    let type_part = span::cover(l_paren.text_range(), r_paren.text_range());
    if !span::is_contained_in(ctx.span(), type_part) {
        return Ok(());
    }

    match ctx.analyze(|| analyze(cast)) {
        Eligibility::Ineligible => return Ok(()),
        Eligibility::Eligible(()) => {}
        Eligibility::NeedsSemantic => {
            let Some(model) = ctx.semantic()? else {
                return Ok(());
            };
            ctx.check_cancelled()?;
            let admits_null = cast
                .ty()
                .is_some_and(|ty| model.type_category(&ty).admits_null());
            if !admits_null {
                return Ok(());
            }
        }
    }

    let node = cast.syntax().clone();
    let cast = cast.clone();
    ctx.offer(
        RefactoringId::ReplaceCastWithAs,
        "Replace cast with 'as'",
        node.text_range(),
        move |_| {
            let (Some(ty), Some(expr)) = (cast.ty(), cast.expression()) else {
                return Err(malformed("cast lost its operand"));
            };
            let text = format!("{} as {}", expr.syntax(), ty.syntax());
            let green =
                make::expr_from_text(&text).ok_or_else(|| malformed("cannot build `as` expression"))?;
            Ok(TreeEdit::replace_node(&node, parenthesize_for(&node, green)))
        },
    );
    Ok(())
}

/// `as` needs a target type that admits `null`. Predefined value types never
/// do; `object`, `string`, arrays and nullable types always do.
fn analyze(cast: &ast::CastExpression) -> Eligibility<()> {
    let (Some(ty), Some(_)) = (cast.ty(), cast.expression()) else {
        return Eligibility::Ineligible;
    };
    match ty {
        ast::Type::PredefinedType(predefined) => match predefined.keyword().map(|kw| kw.kind()) {
            Some(SyntaxKind::ObjectKw | SyntaxKind::StringKw) => Eligibility::Eligible(()),
            _ => Eligibility::Ineligible,
        },
        ast::Type::NullableType(_) | ast::Type::ArrayType(_) => Eligibility::Eligible(()),
        ast::Type::NamedType(_) => Eligibility::NeedsSemantic,
    }
}
