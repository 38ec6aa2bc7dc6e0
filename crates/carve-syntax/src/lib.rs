//! Lossless syntax trees for a compact C#-family language.
//!
//! - [`parse`] parses a whole compilation unit into a rowan tree.
//! - [`parse_expression_fragment`] and [`parse_statement_fragment`] parse
//!   snippets under a [`SyntaxKind::Fragment`] root; [`make`] builds on them
//!   to construct replacement subtrees.
//!
//! Nodes are tight: they never start or end with trivia. Whitespace and
//! comments between two elements belong to the enclosing node.

pub mod ast;
mod lexer;
mod literals;
pub mod make;
mod parser;
mod syntax_kind;

pub use ast::*;
pub use lexer::{lex, lex_with_errors, LexError, Token};
pub use literals::{
    parse_integer_literal, parse_literal, IntegerLiteral, LiteralError, LiteralValue, Radix,
};
pub use parser::{
    debug_dump, parse, parse_expression_fragment, parse_statement_fragment, Parse, SyntaxElement,
    SyntaxNode, SyntaxToken,
};
pub use syntax_kind::{CarveLanguage, SyntaxKind};
pub use text_size::{TextRange, TextSize};

/// Owned green element, as stored in a replacement subtree.
pub type GreenElement = rowan::NodeOrToken<rowan::GreenNode, rowan::GreenToken>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}
