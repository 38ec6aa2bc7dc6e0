//! Indentation-aware construction of replacement blocks.
//!
//! Edits are marked for reformatting, but the text they produce should
//! already be laid out the way a person would write it.

use carve_syntax::{make, GreenElement, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use rowan::{GreenNode, GreenNodeData, GreenToken, GreenTokenData, NodeOrToken};

const SPACES: &str = "    ";
const TAB: &str = "\t";

/// One level of indentation as used by the document.
pub(crate) fn indent_unit(root: &SyntaxNode) -> &'static str {
    let uses_tabs = root
        .descendants_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .filter(|t| t.kind() == SyntaxKind::Whitespace)
        .find_map(|t| {
            let text = t.text();
            let indent = &text[text.rfind('\n')? + 1..];
            indent.chars().next()
        })
        .is_some_and(|c| c == '\t');
    if uses_tabs {
        TAB
    } else {
        SPACES
    }
}

/// Leading whitespace of the line `element` starts on.
pub(crate) fn line_indent(element: &SyntaxElement) -> String {
    let first = match element {
        NodeOrToken::Node(node) => node.first_token(),
        NodeOrToken::Token(token) => Some(token.clone()),
    };
    let mut line = String::new();
    let mut current = first.and_then(|t| t.prev_token());
    while let Some(token) = current {
        let text = token.text();
        if let Some(pos) = text.rfind('\n') {
            line.insert_str(0, &text[pos + 1..]);
            break;
        }
        line.insert_str(0, text);
        current = token.prev_token();
    }
    line.chars().take_while(|c| matches!(c, ' ' | '\t')).collect()
}

pub(crate) fn node_indent(node: &SyntaxNode) -> String {
    line_indent(&NodeOrToken::Node(node.clone()))
}

/// Copies `elements`, moving every line that starts with `from` to start
/// with `to` instead.
pub(crate) fn reindent(elements: &[SyntaxElement], from: &str, to: &str) -> Vec<GreenElement> {
    elements
        .iter()
        .map(|element| match element {
            NodeOrToken::Node(node) => NodeOrToken::Node(reindent_node(&node.green(), from, to)),
            NodeOrToken::Token(token) => NodeOrToken::Token(reindent_token(token.green(), from, to)),
        })
        .collect()
}

fn reindent_node(node: &GreenNodeData, from: &str, to: &str) -> GreenNode {
    GreenNode::new(
        node.kind(),
        node.children().map(|child| match child {
            NodeOrToken::Node(child) => NodeOrToken::Node(reindent_node(child, from, to)),
            NodeOrToken::Token(child) => NodeOrToken::Token(reindent_token(child, from, to)),
        }),
    )
}

fn reindent_token(token: &GreenTokenData, from: &str, to: &str) -> GreenToken {
    if token.kind() == rowan::SyntaxKind::from(SyntaxKind::Whitespace) {
        if let Some(text) = shift_line(token.text(), from, to) {
            return GreenToken::new(token.kind(), &text);
        }
    }
    token.to_owned()
}

fn shift_line(text: &str, from: &str, to: &str) -> Option<String> {
    let newline = text.rfind('\n')?;
    let rest = text[newline + 1..].strip_prefix(from)?;
    Some(format!("{}{to}{rest}", &text[..=newline]))
}

/// `{`, the statements one level deeper than `base`, then `}` on its own
/// line at `base`.
pub(crate) fn block_around(run: &[SyntaxElement], base: &str, unit: &str) -> GreenNode {
    let Some(first) = run.first() else {
        return make::block(vec![make::whitespace(&format!("\n{base}"))]);
    };
    let from = line_indent(first);
    let inner = format!("{base}{unit}");

    let mut children = vec![make::whitespace(&format!("\n{inner}"))];
    children.extend(reindent(run, &from, &inner));
    children.push(make::whitespace(&format!("\n{base}")));
    make::block(children)
}

/// Everything between a block's braces except the whitespace right after
/// `{` and right before `}`.
pub(crate) fn block_contents(block: &SyntaxNode) -> Vec<SyntaxElement> {
    let mut elements: Vec<SyntaxElement> = block.children_with_tokens().collect();
    if elements.last().is_some_and(|e| e.kind() == SyntaxKind::RBrace) {
        elements.pop();
    }
    if elements.first().is_some_and(|e| e.kind() == SyntaxKind::LBrace) {
        elements.remove(0);
    }
    while elements.first().is_some_and(|e| e.kind() == SyntaxKind::Whitespace) {
        elements.remove(0);
    }
    while elements.last().is_some_and(|e| e.kind() == SyntaxKind::Whitespace) {
        elements.pop();
    }
    elements
}

/// The contents of `block`, moved to start at indentation `to`.
pub(crate) fn unwrap_block(block: &SyntaxNode, to: &str) -> Vec<GreenElement> {
    let contents = block_contents(block);
    let Some(first) = contents.first() else {
        return Vec::new();
    };
    reindent(&contents, &line_indent(first), to)
}

/// A run of a parent's children from `first` to `last`, both included.
pub(crate) fn sibling_run(first: &SyntaxNode, last: &SyntaxNode) -> Vec<SyntaxElement> {
    let end = last.text_range().end();
    let mut run = Vec::new();
    for element in first.siblings_with_tokens(rowan::Direction::Next) {
        let past_end = element.text_range().start() >= end;
        if past_end {
            break;
        }
        run.push(element);
    }
    run
}

/// Whether a trivia run only contains whitespace.
pub(crate) fn is_plain_whitespace(tokens: &[SyntaxToken]) -> bool {
    tokens.iter().all(|t| t.kind() == SyntaxKind::Whitespace)
}
