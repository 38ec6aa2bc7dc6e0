//! Trivia around tight nodes.
//!
//! Nodes never start or end with trivia, so the whitespace and comments
//! "belonging" to a node are the runs of trivia tokens directly next to it
//! among its siblings. Replacing a node in place keeps those runs intact.

use carve_syntax::{SyntaxElement, SyntaxToken};
use rowan::{Direction, NodeOrToken};

/// Trivia tokens immediately before `element`, in source order.
pub fn leading(element: &SyntaxElement) -> Vec<SyntaxToken> {
    let mut run = run(element, Direction::Prev);
    run.reverse();
    run
}

/// Trivia tokens immediately after `element`, in source order.
pub fn trailing(element: &SyntaxElement) -> Vec<SyntaxToken> {
    run(element, Direction::Next)
}

fn run(element: &SyntaxElement, direction: Direction) -> Vec<SyntaxToken> {
    match element {
        NodeOrToken::Node(node) => trivia_prefix(node.siblings_with_tokens(direction)),
        NodeOrToken::Token(token) => trivia_prefix(token.siblings_with_tokens(direction)),
    }
}

/// The trivia tokens at the front of `siblings`, after the element itself.
fn trivia_prefix(siblings: impl Iterator<Item = SyntaxElement>) -> Vec<SyntaxToken> {
    siblings
        .skip(1)
        .map_while(|sibling| match sibling {
            NodeOrToken::Token(token) if token.kind().is_trivia() => Some(token),
            _ => None,
        })
        .collect()
}

pub fn text(tokens: &[SyntaxToken]) -> String {
    tokens.iter().map(|t| t.text()).collect()
}

/// Comments in a trivia run.
pub fn has_comments(tokens: &[SyntaxToken]) -> bool {
    tokens.iter().any(|t| t.kind() != carve_syntax::SyntaxKind::Whitespace)
}
