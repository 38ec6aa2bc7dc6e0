use carve_syntax::{ast, make, AstNode, SyntaxKind};
use rowan::NodeOrToken;

use crate::{span, DispatchContext, Eligibility, RefactorError, RefactoringId, TreeEdit};

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    argument: &ast::Argument,
) -> Result<(), RefactorError> {
    if !ctx.is_any_enabled(&[RefactoringId::AddArgumentName, RefactoringId::RemoveArgumentName]) {
        return Ok(());
    }
    let extent = argument.syntax().text_range();
    if !span::is_contained_in(ctx.span(), extent) {
        return Ok(());
    }

    if ctx.is_enabled(RefactoringId::RemoveArgumentName)
        && ctx.analyze(|| can_remove_name(argument)) == Eligibility::NeedsSemantic
    {
        let Some(model) = ctx.semantic()? else {
            return Ok(());
        };
        ctx.check_cancelled()?;
        // Dropping the name must not move the argument to another parameter.
        let named = argument.name_colon().and_then(|name_colon| name_colon.name());
        let positional = model.positional_parameter_name(argument);
        if named.is_some() && named == positional {
            let node = argument.syntax().clone();
            ctx.offer(
                RefactoringId::RemoveArgumentName,
                "Remove argument name",
                extent,
                move |_| {
                    let children = node
                        .children_with_tokens()
                        .skip_while(|child| child.kind() != SyntaxKind::NameColon)
                        .skip(1)
                        .skip_while(|child| child.kind().is_trivia())
                        .map(|child| make::green(&child))
                        .collect();
                    Ok(TreeEdit::replace_node(
                        &node,
                        make::node(SyntaxKind::Argument, children),
                    ))
                },
            );
        }
    }

    if ctx.is_enabled(RefactoringId::AddArgumentName)
        && ctx.analyze(|| can_add_name(argument)) == Eligibility::NeedsSemantic
    {
        let Some(model) = ctx.semantic()? else {
            return Ok(());
        };
        ctx.check_cancelled()?;
        let Some(name) = model.parameter_name(argument).filter(|name| !name.is_empty()) else {
            return Ok(());
        };

        let node = argument.syntax().clone();
        let title = format!("Add argument name '{name}'");
        ctx.offer(RefactoringId::AddArgumentName, title, extent, move |_| {
            let mut children = vec![
                NodeOrToken::Node(make::name_colon(&name)),
                make::whitespace(" "),
            ];
            children.extend(node.children_with_tokens().map(|child| make::green(&child)));
            Ok(TreeEdit::replace_node(
                &node,
                make::node(SyntaxKind::Argument, children),
            ))
        });
    }
    Ok(())
}

/// Named arguments preceded only by positional ones.
fn can_remove_name(argument: &ast::Argument) -> Eligibility<()> {
    if !argument.is_named() || argument.expression().is_none() {
        return Eligibility::Ineligible;
    }
    let Some(list) = argument.argument_list() else {
        return Eligibility::Ineligible;
    };
    let only_positional_before = list
        .arguments()
        .take_while(|other| other != argument)
        .all(|other| !other.is_named());
    if only_positional_before {
        Eligibility::NeedsSemantic
    } else {
        Eligibility::Ineligible
    }
}

fn can_add_name(argument: &ast::Argument) -> Eligibility<()> {
    if argument.is_named() || argument.expression().is_none() {
        return Eligibility::Ineligible;
    }
    let call_like = argument
        .argument_list()
        .and_then(|list| list.syntax().parent())
        .is_some_and(|parent| {
            matches!(
                parent.kind(),
                SyntaxKind::InvocationExpression | SyntaxKind::ObjectCreationExpression
            )
        });
    if call_like {
        Eligibility::NeedsSemantic
    } else {
        Eligibility::Ineligible
    }
}
