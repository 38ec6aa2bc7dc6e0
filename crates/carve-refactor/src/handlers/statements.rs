//! Wrapping a selection of whole statements.
//!
//! Both refactorings work on a contiguous run of statements inside a block
//! or a switch section. The selection has to cover each statement it
//! touches completely.

use std::collections::HashSet;

use carve_syntax::{
    ast, make, AstNode, GreenElement, NameExpression, Statement, SyntaxElement, SyntaxKind,
    SyntaxNode, TextRange,
};
use rowan::{Direction, GreenNode, NodeOrToken};

use crate::layout::{block_around, indent_unit, line_indent, sibling_run};
use crate::{span, DispatchContext, RefactorError, RefactoringId, TreeEdit};

const IDS: &[RefactoringId] = &[RefactoringId::WrapInCondition, RefactoringId::WrapInTryCatch];

pub(crate) fn dispatch_block(
    ctx: &mut DispatchContext<'_>,
    block: &ast::Block,
) -> Result<(), RefactorError> {
    let (Some(l_brace), Some(r_brace)) = (block.l_brace_token(), block.r_brace_token()) else {
        return Ok(());
    };
    let inside = TextRange::new(l_brace.text_range().end(), r_brace.text_range().start());
    dispatch_run(ctx, block.syntax(), block.statements().collect(), inside)
}

pub(crate) fn dispatch_section(
    ctx: &mut DispatchContext<'_>,
    section: &ast::SwitchSection,
) -> Result<(), RefactorError> {
    let Some(labels_end) = section.labels().last().map(|l| l.syntax().text_range().end()) else {
        return Ok(());
    };
    let end = section.syntax().text_range().end();
    if end < labels_end {
        return Ok(());
    }
    let after_labels = TextRange::new(labels_end, end);
    dispatch_run(ctx, section.syntax(), section.statements().collect(), after_labels)
}

fn dispatch_run(
    ctx: &mut DispatchContext<'_>,
    parent: &SyntaxNode,
    statements: Vec<Statement>,
    region: TextRange,
) -> Result<(), RefactorError> {
    if !ctx.is_any_enabled(IDS) {
        return Ok(());
    }
    let span = ctx.span();
    if span.is_empty() || !span::is_contained_in(span, region) {
        return Ok(());
    }
    let Some(selected) = ctx.analyze(|| selected_statements(span, &statements)) else {
        return Ok(());
    };
    if !ctx.analyze(|| locals_stay_in_scope(parent, &statements, selected.clone())) {
        return Ok(());
    }

    let first = statements[selected.start].syntax().clone();
    let last = statements[selected.end - 1].syntax().clone();
    let unit = indent_unit(ctx.root());
    let target = span::cover(first.text_range(), last.text_range());

    for (id, title, wrap) in [
        (RefactoringId::WrapInCondition, "Wrap in condition", Wrap::Condition),
        (RefactoringId::WrapInTryCatch, "Wrap in try-catch", Wrap::TryCatch),
    ] {
        if !ctx.is_enabled(id) {
            continue;
        }
        let (parent, first, last) = (parent.clone(), first.clone(), last.clone());
        ctx.offer(id, title, target, move |_| {
            let run = sibling_run(&first, &last);
            let base = line_indent(&NodeOrToken::Node(first.clone()));
            let green = wrap.build(&run, &base, unit);
            Ok(TreeEdit::replace_children(
                &parent,
                &NodeOrToken::Node(first),
                &NodeOrToken::Node(last),
                vec![NodeOrToken::Node(green)],
            )?
            .with_reformat())
        });
    }
    Ok(())
}

/// Index range of the statements the span covers. Partially covered
/// statements reject the whole selection.
fn selected_statements(span: TextRange, statements: &[Statement]) -> Option<std::ops::Range<usize>> {
    let mut selected: Option<std::ops::Range<usize>> = None;
    for (index, statement) in statements.iter().enumerate() {
        let range = statement.syntax().text_range();
        if span::is_contained_in(range, span) {
            selected = Some(match selected {
                Some(run) => run.start..index + 1,
                None => index..index + 1,
            });
        } else if range.intersect(span).is_some_and(|overlap| !overlap.is_empty()) {
            return None;
        }
    }
    selected
}

/// Locals declared in the selection must not be read after it, since the
/// wrapper puts them in a nested scope. All sections of a switch share one
/// scope, so later sections count as "after".
fn locals_stay_in_scope(
    parent: &SyntaxNode,
    statements: &[Statement],
    selected: std::ops::Range<usize>,
) -> bool {
    let end = selected.end;
    let declared: HashSet<String> = statements[selected]
        .iter()
        .flat_map(|statement| statement.declared_names())
        .collect();
    if declared.is_empty() {
        return true;
    }
    let mut later: Vec<Statement> = statements[end..].to_vec();
    if parent.kind() == SyntaxKind::SwitchSection {
        later.extend(
            parent
                .siblings(Direction::Next)
                .skip(1)
                .filter_map(ast::SwitchSection::cast)
                .flat_map(|section| section.statements().collect::<Vec<_>>()),
        );
    }
    later.iter().all(|statement| {
        statement
            .syntax()
            .descendants()
            .filter_map(NameExpression::cast)
            .filter_map(|name| name.name_token())
            .all(|token| !declared.contains(token.text()))
    })
}

#[derive(Debug, Clone, Copy)]
enum Wrap {
    Condition,
    TryCatch,
}

impl Wrap {
    fn build(self, run: &[SyntaxElement], base: &str, unit: &str) -> GreenNode {
        let newline = || make::whitespace(&format!("\n{base}"));
        let body = NodeOrToken::Node(block_around(run, base, unit));
        match self {
            Wrap::Condition => make::node(
                SyntaxKind::IfStatement,
                vec![
                    token(SyntaxKind::IfKw, "if"),
                    make::whitespace(" "),
                    token(SyntaxKind::LParen, "("),
                    NodeOrToken::Node(make::node(
                        SyntaxKind::NameExpression,
                        vec![token(SyntaxKind::Identifier, "condition")],
                    )),
                    token(SyntaxKind::RParen, ")"),
                    newline(),
                    body,
                ],
            ),
            Wrap::TryCatch => {
                let catch_type = make::node(
                    SyntaxKind::NamedType,
                    vec![token(SyntaxKind::Identifier, "Exception")],
                );
                let catch_clause = make::node(
                    SyntaxKind::CatchClause,
                    vec![
                        token(SyntaxKind::CatchKw, "catch"),
                        make::whitespace(" "),
                        token(SyntaxKind::LParen, "("),
                        NodeOrToken::Node(catch_type),
                        token(SyntaxKind::RParen, ")"),
                        newline(),
                        NodeOrToken::Node(make::block(vec![newline()])),
                    ],
                );
                make::node(
                    SyntaxKind::TryStatement,
                    vec![
                        token(SyntaxKind::TryKw, "try"),
                        newline(),
                        body,
                        newline(),
                        NodeOrToken::Node(catch_clause),
                    ],
                )
            }
        }
    }
}

fn token(kind: SyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(make::token(kind, text))
}
