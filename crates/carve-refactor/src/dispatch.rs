//! Routing a request span to the node-kind dispatchers.
//!
//! The walk starts at the innermost node under the span and climbs to the
//! root, dispatching on every ancestor. Offers therefore come out innermost
//! first.

use carve_core::{CancellationToken, TextRange};
use carve_syntax::{ast, AstNode, Expression, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use rowan::{Direction, NodeOrToken, TokenAtOffset};

use crate::handlers::{
    argument, binary, cast, conditional, constant, if_statement, lambda, literal, method,
    parenthesized, statements, switch_section, switch_statement,
};
use crate::semantic::{SemanticAccess, SemanticProvider};
use crate::{DispatchContext, RefactorError, RefactoringFilter, RefactoringOffer};

/// Constructs that have a dispatcher. Everything else is [`Construct::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    SwitchStatement(ast::SwitchStatement),
    SwitchSection(ast::SwitchSection),
    Block(ast::Block),
    IfStatement(ast::IfStatement),
    MethodDeclaration(ast::MethodDeclaration),
    LiteralExpression(ast::LiteralExpression),
    Argument(ast::Argument),
    CastExpression(ast::CastExpression),
    NameExpression(ast::NameExpression),
    MemberAccessExpression(ast::MemberAccessExpression),
    LambdaExpression(ast::LambdaExpression),
    ConditionalExpression(ast::ConditionalExpression),
    BinaryExpression(ast::BinaryExpression),
    ParenthesizedExpression(ast::ParenthesizedExpression),
    Other(SyntaxNode),
}

impl Construct {
    pub fn classify(node: &SyntaxNode) -> Construct {
        fn cast<N: AstNode>(node: &SyntaxNode, wrap: fn(N) -> Construct) -> Option<Construct> {
            N::cast(node.clone()).map(wrap)
        }

        let construct = match node.kind() {
            SyntaxKind::SwitchStatement => cast(node, Construct::SwitchStatement),
            SyntaxKind::SwitchSection => cast(node, Construct::SwitchSection),
            SyntaxKind::Block => cast(node, Construct::Block),
            SyntaxKind::IfStatement => cast(node, Construct::IfStatement),
            SyntaxKind::MethodDeclaration => cast(node, Construct::MethodDeclaration),
            SyntaxKind::LiteralExpression => cast(node, Construct::LiteralExpression),
            SyntaxKind::Argument => cast(node, Construct::Argument),
            SyntaxKind::CastExpression => cast(node, Construct::CastExpression),
            SyntaxKind::NameExpression => cast(node, Construct::NameExpression),
            SyntaxKind::MemberAccessExpression => cast(node, Construct::MemberAccessExpression),
            SyntaxKind::LambdaExpression => cast(node, Construct::LambdaExpression),
            SyntaxKind::ConditionalExpression => cast(node, Construct::ConditionalExpression),
            SyntaxKind::BinaryExpression => cast(node, Construct::BinaryExpression),
            SyntaxKind::ParenthesizedExpression => cast(node, Construct::ParenthesizedExpression),
            _ => None,
        };
        construct.unwrap_or_else(|| Construct::Other(node.clone()))
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Construct::SwitchStatement(it) => it.syntax(),
            Construct::SwitchSection(it) => it.syntax(),
            Construct::Block(it) => it.syntax(),
            Construct::IfStatement(it) => it.syntax(),
            Construct::MethodDeclaration(it) => it.syntax(),
            Construct::LiteralExpression(it) => it.syntax(),
            Construct::Argument(it) => it.syntax(),
            Construct::CastExpression(it) => it.syntax(),
            Construct::NameExpression(it) => it.syntax(),
            Construct::MemberAccessExpression(it) => it.syntax(),
            Construct::LambdaExpression(it) => it.syntax(),
            Construct::ConditionalExpression(it) => it.syntax(),
            Construct::BinaryExpression(it) => it.syntax(),
            Construct::ParenthesizedExpression(it) => it.syntax(),
            Construct::Other(node) => node,
        }
    }
}

/// Computes every refactoring offered for `span` in the tree under `root`.
///
/// The semantic provider runs at most once, and only if some analyzer asks
/// for semantic information. Returns [`RefactorError::Cancelled`] when
/// `cancel` fires mid-request.
pub fn compute_offers(
    root: &SyntaxNode,
    span: TextRange,
    filter: &dyn RefactoringFilter,
    semantic: SemanticProvider<'_>,
    cancel: &CancellationToken,
) -> Result<Vec<RefactoringOffer>, RefactorError> {
    let mut ctx = DispatchContext::new(
        root.clone(),
        span,
        filter,
        SemanticAccess::new(semantic),
        cancel,
    );
    walk(&mut ctx)?;
    tracing::debug!(
        target: "carve.refactor",
        ?span,
        offers = ctx.offers().len(),
        dispatchers = ctx.dispatcher_calls(),
        analyzers = ctx.analyzer_calls(),
        "computed refactoring offers"
    );
    Ok(ctx.into_offers())
}

/// Dispatches on the node under the context's span and on all of its
/// ancestors, innermost first.
pub fn walk(ctx: &mut DispatchContext<'_>) -> Result<(), RefactorError> {
    let Some((start, boundary)) = locate(ctx.root(), ctx.span()) else {
        return Ok(());
    };

    // A caret right before `,` or `)` also belongs to the element the token
    // closes.
    if let Some(token) = boundary {
        if let Some(NodeOrToken::Node(previous)) = previous_significant_sibling(&token) {
            for node in nodes_ending_at(&previous) {
                dispatch_node(ctx, &node)?;
            }
        }
    }

    for node in start.ancestors() {
        dispatch_node(ctx, &node)?;
    }
    Ok(())
}

/// Runs the dispatcher for a single node.
pub fn dispatch_node(ctx: &mut DispatchContext<'_>, node: &SyntaxNode) -> Result<(), RefactorError> {
    ctx.check_cancelled()?;
    ctx.record_dispatch();
    tracing::trace!(target: "carve.refactor", kind = ?node.kind(), range = ?node.text_range(), "dispatch");
    dispatch_construct(ctx, Construct::classify(node))
}

fn dispatch_construct(ctx: &mut DispatchContext<'_>, construct: Construct) -> Result<(), RefactorError> {
    match construct {
        Construct::SwitchStatement(it) => switch_statement::dispatch(ctx, &it),
        Construct::SwitchSection(it) => switch_section::dispatch(ctx, &it),
        Construct::Block(it) => statements::dispatch_block(ctx, &it),
        Construct::IfStatement(it) => if_statement::dispatch(ctx, &it),
        Construct::MethodDeclaration(it) => method::dispatch(ctx, &it),
        Construct::LiteralExpression(it) => literal::dispatch(ctx, &it),
        Construct::Argument(it) => argument::dispatch(ctx, &it),
        Construct::CastExpression(it) => cast::dispatch(ctx, &it),
        Construct::NameExpression(it) => constant::dispatch(ctx, &Expression::NameExpression(it)),
        Construct::MemberAccessExpression(it) => {
            constant::dispatch(ctx, &Expression::MemberAccessExpression(it))
        }
        Construct::LambdaExpression(it) => lambda::dispatch(ctx, &it),
        Construct::ConditionalExpression(it) => conditional::dispatch(ctx, &it),
        Construct::BinaryExpression(it) => binary::dispatch(ctx, &it),
        Construct::ParenthesizedExpression(it) => parenthesized::dispatch(ctx, &it),
        Construct::Other(_) => Ok(()),
    }
}

/// The innermost node for `span`, plus the boundary token a caret sits on.
fn locate(root: &SyntaxNode, span: TextRange) -> Option<(SyntaxNode, Option<SyntaxToken>)> {
    if !root.text_range().contains_range(span) {
        return None;
    }
    if !span.is_empty() {
        let node = match root.covering_element(span) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent()?,
        };
        return Some((node, None));
    }

    let offset = span.start();
    let token = match root.token_at_offset(offset) {
        TokenAtOffset::None => return None,
        TokenAtOffset::Single(token) => token,
        TokenAtOffset::Between(left, right) => {
            if right.kind().is_trivia() && !left.kind().is_trivia() {
                left
            } else {
                right
            }
        }
    };
    let boundary = (is_boundary(token.kind()) && token.text_range().start() == offset)
        .then(|| token.clone());
    Some((token.parent()?, boundary))
}

fn is_boundary(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Comma
            | SyntaxKind::RParen
            | SyntaxKind::RBracket
            | SyntaxKind::Semicolon
            | SyntaxKind::RBrace
    )
}

fn previous_significant_sibling(token: &SyntaxToken) -> Option<SyntaxElement> {
    token
        .siblings_with_tokens(Direction::Prev)
        .skip(1)
        .find(|element| !element.kind().is_trivia())
}

/// `node` and its descendants that end where it ends, innermost first.
fn nodes_ending_at(node: &SyntaxNode) -> Vec<SyntaxNode> {
    let Some(last) = node.last_token().and_then(|token| token.parent()) else {
        return vec![node.clone()];
    };
    let mut nodes = Vec::new();
    for ancestor in last.ancestors() {
        let reached = &ancestor == node;
        nodes.push(ancestor);
        if reached {
            break;
        }
    }
    nodes
}
