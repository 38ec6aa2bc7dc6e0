use carve_syntax::{
    ast, make, AstNode, GreenElement, Statement, SyntaxElement, SyntaxKind, SyntaxNode,
};
use rowan::{GreenNode, NodeOrToken};

use super::has_comments_outside;
use crate::layout::{block_around, indent_unit, node_indent, unwrap_block};
use crate::{span, DispatchContext, RefactorError, RefactoringId, TreeEdit};

const IDS: &[RefactoringId] = &[RefactoringId::AddBraces, RefactoringId::RemoveBraces];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Braces {
    Add,
    Remove,
}

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    if_stmt: &ast::IfStatement,
) -> Result<(), RefactorError> {
    if !ctx.is_any_enabled(IDS) {
        return Ok(());
    }
    // `else if` is handled from the head of the chain.
    if if_stmt
        .syntax()
        .parent()
        .is_some_and(|parent| parent.kind() == SyntaxKind::ElseClause)
    {
        return Ok(());
    }
    if !is_on_header(ctx, if_stmt) {
        return Ok(());
    }

    let unit = indent_unit(ctx.root());
    for (id, braces, title) in [
        (RefactoringId::AddBraces, Braces::Add, "Add braces"),
        (RefactoringId::RemoveBraces, Braces::Remove, "Remove braces"),
    ] {
        if !ctx.is_enabled(id) || !ctx.analyze(|| any_branch_applies(if_stmt, braces)) {
            continue;
        }
        let if_stmt = if_stmt.clone();
        ctx.offer(id, title, if_stmt.syntax().text_range(), move |_| {
            let base = node_indent(if_stmt.syntax());
            let green = rewrite_if(&if_stmt, braces, &base, unit);
            Ok(TreeEdit::replace_node(if_stmt.syntax(), green).with_reformat())
        });
    }
    Ok(())
}

fn is_on_header(ctx: &DispatchContext<'_>, if_stmt: &ast::IfStatement) -> bool {
    let (Some(if_kw), Some(r_paren)) = (if_stmt.if_token(), if_stmt.r_paren_token()) else {
        return false;
    };
    let header = span::cover(if_kw.text_range(), r_paren.text_range());
    if span::is_contained_in(ctx.span(), header) {
        return true;
    }
    if_stmt
        .else_clause()
        .and_then(|clause| clause.else_token())
        .is_some_and(|else_kw| span::is_empty_and_contained_in(ctx.span(), else_kw.text_range()))
}

/// The then-branch and, unless it continues an `else if` chain, the else
/// branch.
fn branches(if_stmt: &ast::IfStatement) -> Vec<Statement> {
    let mut branches: Vec<Statement> = if_stmt.then_branch().into_iter().collect();
    if let Some(statement) = if_stmt.else_clause().and_then(|clause| clause.statement()) {
        if !matches!(statement, Statement::IfStatement(_)) {
            branches.push(statement);
        }
    }
    branches
}

fn any_branch_applies(if_stmt: &ast::IfStatement, braces: Braces) -> bool {
    branches(if_stmt).iter().any(|branch| applies(branch, braces))
}

fn applies(branch: &Statement, braces: Braces) -> bool {
    match (braces, branch) {
        (Braces::Add, Statement::Block(_)) => false,
        (Braces::Add, _) => true,
        (Braces::Remove, Statement::Block(block)) => block.single_statement().is_some_and(|inner| {
            !inner.is_local_declaration()
                && !(ends_in_open_if(&inner) && followed_by_else(block.syntax()))
                && !has_comments_outside(block.syntax(), inner.syntax())
        }),
        (Braces::Remove, _) => false,
    }
}

/// Whether `statement` ends in an `if` without `else`, which would take over
/// an `else` written after it.
fn ends_in_open_if(statement: &Statement) -> bool {
    match statement {
        Statement::IfStatement(if_stmt) => match if_stmt.else_clause() {
            None => true,
            Some(clause) => clause.statement().is_some_and(|tail| ends_in_open_if(&tail)),
        },
        Statement::WhileStatement(while_stmt) => {
            while_stmt.body().is_some_and(|body| ends_in_open_if(&body))
        }
        _ => false,
    }
}

fn followed_by_else(node: &SyntaxNode) -> bool {
    let mut next = node.last_token().and_then(|token| token.next_token());
    while let Some(token) = next {
        if !token.kind().is_trivia() {
            return token.kind() == SyntaxKind::ElseKw;
        }
        next = token.next_token();
    }
    false
}

fn rewrite_if(if_stmt: &ast::IfStatement, braces: Braces, base: &str, unit: &str) -> GreenNode {
    let then = if_stmt
        .then_branch()
        .filter(|branch| applies(branch, braces));
    let else_clause = if_stmt.else_clause();

    let elements: Vec<SyntaxElement> = if_stmt.syntax().children_with_tokens().collect();
    let mut children = Vec::with_capacity(elements.len() + 2);
    for (index, element) in elements.iter().enumerate() {
        let after_whitespace = index > 0 && elements[index - 1].kind() == SyntaxKind::Whitespace;
        match element {
            NodeOrToken::Node(node) if then.as_ref().is_some_and(|t| t.syntax() == node) => {
                if after_whitespace {
                    children.pop();
                }
                children.extend(rewrite_branch(node, braces, base, unit));
            }
            NodeOrToken::Node(node)
                if else_clause.as_ref().is_some_and(|e| e.syntax() == node) =>
            {
                if then.is_some() && after_whitespace {
                    children.pop();
                    children.push(make::whitespace(&format!("\n{base}")));
                }
                children.push(NodeOrToken::Node(rewrite_else(node, braces, base, unit)));
            }
            _ => children.push(make::green(element)),
        }
    }
    make::node(SyntaxKind::IfStatement, children)
}

fn rewrite_else(clause: &SyntaxNode, braces: Braces, base: &str, unit: &str) -> GreenNode {
    let branch = ast::ElseClause::cast(clause.clone())
        .and_then(|clause| clause.statement())
        .filter(|branch| !matches!(branch, Statement::IfStatement(_)))
        .filter(|branch| applies(branch, braces));
    let Some(branch) = branch else {
        return make::green_node(clause);
    };

    let elements: Vec<SyntaxElement> = clause.children_with_tokens().collect();
    let mut children = Vec::with_capacity(elements.len() + 2);
    for (index, element) in elements.iter().enumerate() {
        match element {
            NodeOrToken::Node(node) if node == branch.syntax() => {
                if index > 0 && elements[index - 1].kind() == SyntaxKind::Whitespace {
                    children.pop();
                }
                children.extend(rewrite_branch(node, braces, base, unit));
            }
            _ => children.push(make::green(element)),
        }
    }
    make::node(SyntaxKind::ElseClause, children)
}

/// The branch with its separating whitespace, in Allman layout.
fn rewrite_branch(branch: &SyntaxNode, braces: Braces, base: &str, unit: &str) -> Vec<GreenElement> {
    match braces {
        Braces::Add => vec![
            make::whitespace(&format!("\n{base}")),
            NodeOrToken::Node(block_around(
                &[NodeOrToken::Node(branch.clone())],
                base,
                unit,
            )),
        ],
        Braces::Remove => {
            let inner = format!("{base}{unit}");
            let mut elements = vec![make::whitespace(&format!("\n{inner}"))];
            elements.extend(unwrap_block(branch, &inner));
            elements
        }
    }
}
