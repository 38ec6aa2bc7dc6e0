//! Tree edits produced by refactoring actions.
//!
//! An edit names one place in the original tree (a node, a token, or a
//! contiguous run of a parent's children) and the detached green elements
//! that replace it. Applying an edit path-copies from the edit point to the
//! root; every untouched subtree is shared with the original.

use carve_core::{TextEdit, TextRange};
use carve_syntax::{
    make, parse, parse_expression_fragment, parse_statement_fragment, GreenElement, SyntaxKind,
    SyntaxNode, SyntaxToken,
};
use rowan::NodeOrToken;

use crate::error::malformed;
use crate::RefactorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Node(SyntaxNode),
    Token(SyntaxToken),
    /// Children `first..=last` of `parent`, tokens included.
    Children {
        parent: SyntaxNode,
        first: usize,
        last: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEdit {
    target: EditTarget,
    replacement: Vec<GreenElement>,
    reformat: bool,
}

impl TreeEdit {
    pub fn replace_node(node: &SyntaxNode, with: rowan::GreenNode) -> Self {
        Self::replace_node_with_many(node, vec![NodeOrToken::Node(with)])
    }

    pub fn replace_node_with_many(node: &SyntaxNode, with: Vec<GreenElement>) -> Self {
        Self {
            target: EditTarget::Node(node.clone()),
            replacement: with,
            reformat: false,
        }
    }

    pub fn replace_token(token: &SyntaxToken, with: rowan::GreenToken) -> Self {
        Self {
            target: EditTarget::Token(token.clone()),
            replacement: vec![NodeOrToken::Token(with)],
            reformat: false,
        }
    }

    /// Replace the sibling run from `first` to `last` (inclusive). Both must
    /// be children of `parent`, with `first` not after `last`.
    pub fn replace_children(
        parent: &SyntaxNode,
        first: &carve_syntax::SyntaxElement,
        last: &carve_syntax::SyntaxElement,
        with: Vec<GreenElement>,
    ) -> Result<Self, RefactorError> {
        let index_in_parent = |element: &carve_syntax::SyntaxElement| {
            let (owner, index) = match element {
                NodeOrToken::Node(node) => (node.parent(), node.index()),
                NodeOrToken::Token(token) => (token.parent(), token.index()),
            };
            match owner {
                Some(owner) if &owner == parent => Ok(index),
                _ => Err(malformed("edit range is not a run of siblings")),
            }
        };
        let first = index_in_parent(first)?;
        let last = index_in_parent(last)?;
        if first > last {
            return Err(malformed("edit range is reversed"));
        }
        Ok(Self {
            target: EditTarget::Children {
                parent: parent.clone(),
                first,
                last,
            },
            replacement: with,
            reformat: false,
        })
    }

    /// Ask the host to reformat the replaced region.
    pub fn with_reformat(mut self) -> Self {
        self.reformat = true;
        self
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    pub fn replacement(&self) -> &[GreenElement] {
        &self.replacement
    }

    pub fn needs_reformat(&self) -> bool {
        self.reformat
    }

    /// Source range of the replaced elements in the original tree.
    pub fn range(&self) -> TextRange {
        match &self.target {
            EditTarget::Node(node) => node.text_range(),
            EditTarget::Token(token) => token.text_range(),
            EditTarget::Children {
                parent,
                first,
                last,
            } => {
                let children: Vec<_> = parent.children_with_tokens().collect();
                match (children.get(*first), children.get(*last)) {
                    (Some(first), Some(last)) => first.text_range().cover(last.text_range()),
                    _ => TextRange::empty(parent.text_range().start()),
                }
            }
        }
    }

    pub fn replacement_text(&self) -> String {
        make::text_of(&self.replacement)
    }

    pub fn to_text_edit(&self) -> TextEdit {
        TextEdit::new(self.range(), self.replacement_text())
    }

    /// Root of the tree the edit was made against.
    pub fn original_root(&self) -> Option<SyntaxNode> {
        let start = match &self.target {
            EditTarget::Node(node) => node.clone(),
            EditTarget::Children { parent, .. } => parent.clone(),
            EditTarget::Token(token) => token.parent()?,
        };
        start.ancestors().last()
    }

    /// Build the edited tree. The original tree is left untouched.
    pub fn apply(&self) -> Result<SyntaxNode, RefactorError> {
        let (parent, first, last) = match &self.target {
            EditTarget::Node(node) => match node.parent() {
                Some(parent) => (parent, node.index(), node.index()),
                None => return self.replace_root(),
            },
            EditTarget::Token(token) => {
                let parent = token
                    .parent()
                    .ok_or_else(|| malformed("token without a parent"))?;
                (parent, token.index(), token.index())
            }
            EditTarget::Children {
                parent,
                first,
                last,
            } => (parent.clone(), *first, *last),
        };

        let child_count = parent.children_with_tokens().count();
        if last >= child_count {
            return Err(malformed("edit range is out of bounds"));
        }
        let spliced = parent
            .green()
            .splice_children(first..=last, self.replacement.iter().cloned());
        Ok(SyntaxNode::new_root(parent.replace_with(spliced)))
    }

    fn replace_root(&self) -> Result<SyntaxNode, RefactorError> {
        match self.replacement.as_slice() {
            [NodeOrToken::Node(green)] => Ok(SyntaxNode::new_root(green.clone())),
            _ => Err(malformed("a root can only be replaced by a single node")),
        }
    }

    /// Re-parse the edited text and reject the edit if it has more syntax
    /// errors than the original.
    pub fn validate(&self) -> Result<(), RefactorError> {
        let original = self
            .original_root()
            .ok_or_else(|| malformed("token without a parent"))?;
        let edited = self.apply()?;
        let before = reparse_error_count(&original);
        let after = reparse_error_count(&edited);
        if after > before {
            tracing::warn!(before, after, "rejecting edit that introduces syntax errors");
            return Err(RefactorError::InvalidEdit { before, after });
        }
        Ok(())
    }
}

fn reparse_error_count(root: &SyntaxNode) -> usize {
    let text = root.to_string();
    let parse = match root.kind() {
        SyntaxKind::CompilationUnit => parse(&text),
        SyntaxKind::Fragment
            if root
                .children()
                .next()
                .is_some_and(|child| child.kind().is_expression()) =>
        {
            parse_expression_fragment(&text)
        }
        _ => parse_statement_fragment(&text),
    };
    parse.errors.len()
}
