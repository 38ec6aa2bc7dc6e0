use carve_syntax::{ast, make, AstNode, Statement, SyntaxElement, SyntaxKind, TextRange};
use rowan::{GreenNode, NodeOrToken};

use super::statements;
use crate::layout::{block_around, indent_unit, line_indent, sibling_run, unwrap_block};
use crate::{span, DispatchContext, RefactorError, RefactoringId, TreeEdit};

const IDS: &[RefactoringId] = &[
    RefactoringId::AddBracesToSwitchSection,
    RefactoringId::RemoveBracesFromSwitchSection,
    RefactoringId::AddBracesToSwitchSections,
    RefactoringId::RemoveBracesFromSwitchSections,
];

/// Wrapping a section's statements in a block, or unwrapping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionBraces {
    Add,
    Remove,
}

impl SectionBraces {
    pub(crate) fn applies(self, section: &ast::SwitchSection) -> bool {
        match self {
            SectionBraces::Add => can_add_braces(section),
            SectionBraces::Remove => can_remove_braces(section),
        }
    }

    pub(crate) fn single_id(self) -> RefactoringId {
        match self {
            SectionBraces::Add => RefactoringId::AddBracesToSwitchSection,
            SectionBraces::Remove => RefactoringId::RemoveBracesFromSwitchSection,
        }
    }

    pub(crate) fn batch_id(self) -> RefactoringId {
        match self {
            SectionBraces::Add => RefactoringId::AddBracesToSwitchSections,
            SectionBraces::Remove => RefactoringId::RemoveBracesFromSwitchSections,
        }
    }

    fn single_title(self) -> &'static str {
        match self {
            SectionBraces::Add => "Add braces to section",
            SectionBraces::Remove => "Remove braces from section",
        }
    }

    pub(crate) fn batch_title(self) -> &'static str {
        match self {
            SectionBraces::Add => "Add braces to sections",
            SectionBraces::Remove => "Remove braces from sections",
        }
    }

    /// The section with its statements wrapped or unwrapped.
    pub(crate) fn rewrite(self, section: &ast::SwitchSection, unit: &str) -> GreenNode {
        match self {
            SectionBraces::Add => add_braces(section, unit),
            SectionBraces::Remove => remove_braces(section),
        }
    }
}

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    section: &ast::SwitchSection,
) -> Result<(), RefactorError> {
    if ctx.is_any_enabled(IDS) {
        braces(ctx, section)?;
    }
    statements::dispatch_section(ctx, section)
}

fn braces(ctx: &mut DispatchContext<'_>, section: &ast::SwitchSection) -> Result<(), RefactorError> {
    let extent = section.syntax().text_range();
    let on_labels = labels_range(section)
        .is_some_and(|labels| span::is_contained_in(ctx.span(), labels));
    if !on_labels && !span::is_selection_of(ctx.span(), extent) {
        return Ok(());
    }

    let unit = indent_unit(ctx.root());
    for braces in [SectionBraces::Add, SectionBraces::Remove] {
        let id = braces.single_id();
        if ctx.is_enabled(id) && ctx.analyze(|| braces.applies(section)) {
            let section = section.clone();
            ctx.offer(id, braces.single_title(), extent, move |_| {
                Ok(TreeEdit::replace_node(section.syntax(), braces.rewrite(&section, unit))
                    .with_reformat())
            });
        }

        let batch_id = braces.batch_id();
        if !on_labels || !ctx.is_enabled(batch_id) {
            continue;
        }
        let Some(switch) = section.switch_statement() else {
            continue;
        };
        let eligible = ctx.analyze(|| {
            switch
                .sections()
                .filter(|section| braces.applies(section))
                .collect::<Vec<_>>()
        });
        if eligible.len() < 2 {
            continue;
        }
        let target = switch.syntax().text_range();
        ctx.offer(batch_id, braces.batch_title(), target, move |_| {
            Ok(rewrite_sections(&switch, &eligible, braces, unit))
        });
    }
    Ok(())
}

/// One edit over the whole switch statement, rewriting `sections`.
pub(crate) fn rewrite_sections(
    switch: &ast::SwitchStatement,
    sections: &[ast::SwitchSection],
    braces: SectionBraces,
    unit: &str,
) -> TreeEdit {
    let children = switch
        .syntax()
        .children_with_tokens()
        .map(|child| match &child {
            NodeOrToken::Node(node) => match sections.iter().find(|s| s.syntax() == node) {
                Some(section) => NodeOrToken::Node(braces.rewrite(section, unit)),
                None => make::green(&child),
            },
            NodeOrToken::Token(_) => make::green(&child),
        })
        .collect();
    TreeEdit::replace_node(
        switch.syntax(),
        make::node(SyntaxKind::SwitchStatement, children),
    )
    .with_reformat()
}

pub(crate) fn labels_range(section: &ast::SwitchSection) -> Option<TextRange> {
    let mut labels = section.labels();
    let first = labels.next()?.syntax().text_range();
    let last = labels.last().map_or(first, |label| label.syntax().text_range());
    Some(span::cover(first, last))
}

fn can_add_braces(section: &ast::SwitchSection) -> bool {
    let mut statements = section.statements();
    match (statements.next(), statements.next()) {
        (None, _) => false,
        (Some(Statement::Block(_)), None) => false,
        _ => true,
    }
}

/// The single statement is a non-empty block without local declarations.
fn can_remove_braces(section: &ast::SwitchSection) -> bool {
    let Some(Statement::Block(block)) = section.single_statement() else {
        return false;
    };
    let mut statements = block.statements().peekable();
    statements.peek().is_some() && statements.all(|statement| !statement.is_local_declaration())
}

fn add_braces(section: &ast::SwitchSection, unit: &str) -> GreenNode {
    let statements: Vec<Statement> = section.statements().collect();
    let (Some(first), Some(last)) = (statements.first(), statements.last()) else {
        return make::green_node(section.syntax());
    };
    let run = sibling_run(first.syntax(), last.syntax());
    let base = line_indent(&NodeOrToken::Node(first.syntax().clone()));
    let block = block_around(&run, &base, unit);

    let mut children = Vec::new();
    let mut in_run = false;
    for child in section.syntax().children_with_tokens() {
        if child_is(&child, first) {
            in_run = true;
            children.push(NodeOrToken::Node(block.clone()));
        }
        if !in_run {
            children.push(make::green(&child));
        }
        if child_is(&child, last) {
            in_run = false;
        }
    }
    make::node(SyntaxKind::SwitchSection, children)
}

fn remove_braces(section: &ast::SwitchSection) -> GreenNode {
    let Some(Statement::Block(block)) = section.single_statement() else {
        return make::green_node(section.syntax());
    };
    let indent = line_indent(&NodeOrToken::Node(block.syntax().clone()));
    let mut children = Vec::new();
    for child in section.syntax().children_with_tokens() {
        match &child {
            NodeOrToken::Node(node) if node == block.syntax() => {
                children.extend(unwrap_block(node, &indent));
            }
            _ => children.push(make::green(&child)),
        }
    }
    make::node(SyntaxKind::SwitchSection, children)
}

fn child_is(child: &SyntaxElement, statement: &Statement) -> bool {
    matches!(child, NodeOrToken::Node(node) if node == statement.syntax())
}
