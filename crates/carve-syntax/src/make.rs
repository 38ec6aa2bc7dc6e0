//! Green-tree constructors for building replacement subtrees.
//!
//! Everything here produces detached green nodes; splicing them into an
//! existing tree is the caller's job.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use crate::parser::{parse_expression_fragment, parse_statement_fragment, SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;
use crate::{GreenElement, SyntaxElement};

pub fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind.into(), text)
}

pub fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind.into(), children)
}

pub fn whitespace(text: &str) -> GreenElement {
    NodeOrToken::Token(token(SyntaxKind::Whitespace, text))
}

fn tok(kind: SyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(token(kind, text))
}

/// A `LiteralExpression` wrapping a single literal token.
pub fn literal(kind: SyntaxKind, text: &str) -> GreenNode {
    node(SyntaxKind::LiteralExpression, vec![tok(kind, text)])
}

pub fn bool_literal(value: bool) -> GreenNode {
    if value {
        literal(SyntaxKind::TrueKw, "true")
    } else {
        literal(SyntaxKind::FalseKw, "false")
    }
}

pub fn parenthesized(expr: GreenNode) -> GreenNode {
    node(
        SyntaxKind::ParenthesizedExpression,
        vec![
            tok(SyntaxKind::LParen, "("),
            NodeOrToken::Node(expr),
            tok(SyntaxKind::RParen, ")"),
        ],
    )
}

/// `!expr`; the operand is parenthesized by the caller when needed.
pub fn prefix_not(expr: GreenNode) -> GreenNode {
    node(
        SyntaxKind::PrefixUnaryExpression,
        vec![tok(SyntaxKind::Bang, "!"), NodeOrToken::Node(expr)],
    )
}

/// `{` + `inner` + `}`. `inner` carries its own layout trivia.
pub fn block(inner: Vec<GreenElement>) -> GreenNode {
    let mut children = Vec::with_capacity(inner.len() + 2);
    children.push(tok(SyntaxKind::LBrace, "{"));
    children.extend(inner);
    children.push(tok(SyntaxKind::RBrace, "}"));
    node(SyntaxKind::Block, children)
}

/// `name: `
pub fn name_colon(name: &str) -> GreenNode {
    node(
        SyntaxKind::NameColon,
        vec![tok(SyntaxKind::Identifier, name), tok(SyntaxKind::Colon, ":")],
    )
}

/// Parses `text` as a single expression. Returns `None` when the text does
/// not parse cleanly.
pub fn expr_from_text(text: &str) -> Option<GreenNode> {
    let parse = parse_expression_fragment(text);
    if !parse.ok() {
        return None;
    }
    let root = parse.syntax();
    let mut nodes = root.children();
    let expr = nodes.next()?;
    if nodes.next().is_some() || expr.text_range() != root.text_range() {
        return None;
    }
    Some(green_node(&expr))
}

/// Parses `text` as a statement list and returns the fragment's children,
/// trivia included. Returns `None` when the text does not parse cleanly.
pub fn stmts_from_text(text: &str) -> Option<Vec<GreenElement>> {
    let parse = parse_statement_fragment(text);
    if !parse.ok() {
        return None;
    }
    Some(parse.syntax().children_with_tokens().map(|it| green(&it)).collect())
}

pub fn green_node(node: &SyntaxNode) -> GreenNode {
    node.green().into_owned()
}

pub fn green_token(token: &SyntaxToken) -> GreenToken {
    token.green().to_owned()
}

pub fn green(element: &SyntaxElement) -> GreenElement {
    match element {
        NodeOrToken::Node(node) => NodeOrToken::Node(green_node(node)),
        NodeOrToken::Token(token) => NodeOrToken::Token(green_token(token)),
    }
}

/// Concatenated source text of detached green elements.
pub fn text_of(elements: &[GreenElement]) -> String {
    let mut out = String::new();
    for element in elements {
        match element {
            NodeOrToken::Node(node) => out.push_str(&node.to_string()),
            NodeOrToken::Token(token) => out.push_str(token.text()),
        }
    }
    out
}
