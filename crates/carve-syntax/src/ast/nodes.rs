//! Typed wrappers over [`SyntaxNode`]s.
//!
//! Accessors never fail on malformed input; missing pieces come back as `None`.

use crate::ast::{support, AstNode};
use crate::parser::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

// --- Declarations ---

ast_node!(CompilationUnit);
ast_node!(Fragment);
ast_node!(ClassDeclaration);
ast_node!(StructDeclaration);
ast_node!(MethodDeclaration);
ast_node!(FieldDeclaration);
ast_node!(ParameterList);
ast_node!(Parameter);
ast_node!(ArrowExpressionClause);
ast_node!(VariableDeclarator);

impl MethodDeclaration {
    pub fn return_type(&self) -> Option<Type> {
        support::child(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Identifier)
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        support::child(&self.syntax)
    }

    pub fn expression_body(&self) -> Option<ArrowExpressionClause> {
        support::child(&self.syntax)
    }

    pub fn semicolon_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Semicolon)
    }
}

impl ParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        support::children(&self.syntax)
    }

    pub fn l_paren_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LParen)
    }

    pub fn r_paren_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RParen)
    }
}

impl Parameter {
    pub fn ty(&self) -> Option<Type> {
        support::child(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Identifier)
    }
}

impl ArrowExpressionClause {
    pub fn arrow_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::FatArrow)
    }

    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }
}

impl VariableDeclarator {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Identifier)
    }

    pub fn initializer(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }
}

// --- Statements ---

ast_node!(Block);
ast_node!(LocalDeclarationStatement);
ast_node!(ExpressionStatement);
ast_node!(IfStatement);
ast_node!(ElseClause);
ast_node!(SwitchStatement);
ast_node!(SwitchSection);
ast_node!(SwitchLabel);
ast_node!(WhileStatement);
ast_node!(ReturnStatement);
ast_node!(BreakStatement);
ast_node!(ContinueStatement);
ast_node!(ThrowStatement);
ast_node!(TryStatement);
ast_node!(CatchClause);
ast_node!(FinallyClause);
ast_node!(EmptyStatement);

ast_enum!(Statement {
    Block,
    LocalDeclarationStatement,
    ExpressionStatement,
    IfStatement,
    SwitchStatement,
    WhileStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    TryStatement,
    EmptyStatement,
});

impl Block {
    pub fn l_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn r_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RBrace)
    }

    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        support::children(&self.syntax)
    }
}

impl LocalDeclarationStatement {
    pub fn ty(&self) -> Option<Type> {
        support::child(&self.syntax)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> + '_ {
        support::children(&self.syntax)
    }
}

impl ExpressionStatement {
    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn semicolon_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Semicolon)
    }
}

impl IfStatement {
    pub fn if_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::IfKw)
    }

    pub fn r_paren_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RParen)
    }

    pub fn condition(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn then_branch(&self) -> Option<Statement> {
        support::child(&self.syntax)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        support::child(&self.syntax)
    }
}

impl ElseClause {
    pub fn else_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::ElseKw)
    }

    pub fn statement(&self) -> Option<Statement> {
        support::child(&self.syntax)
    }
}

impl SwitchStatement {
    pub fn switch_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::SwitchKw)
    }

    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn l_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn r_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RBrace)
    }

    pub fn sections(&self) -> impl Iterator<Item = SwitchSection> + '_ {
        support::children(&self.syntax)
    }
}

impl SwitchSection {
    pub fn labels(&self) -> impl Iterator<Item = SwitchLabel> + '_ {
        support::children(&self.syntax)
    }

    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        support::children(&self.syntax)
    }

    /// The enclosing switch statement.
    pub fn switch_statement(&self) -> Option<SwitchStatement> {
        self.syntax.parent().and_then(SwitchStatement::cast)
    }
}

impl SwitchLabel {
    pub fn keyword_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn value(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn colon_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Colon)
    }
}

impl WhileStatement {
    pub fn condition(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<Statement> {
        support::child(&self.syntax)
    }
}

impl ReturnStatement {
    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }
}

impl ThrowStatement {
    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }
}

impl TryStatement {
    pub fn block(&self) -> Option<Block> {
        support::child(&self.syntax)
    }

    pub fn catch_clauses(&self) -> impl Iterator<Item = CatchClause> + '_ {
        support::children(&self.syntax)
    }

    pub fn finally_clause(&self) -> Option<FinallyClause> {
        support::child(&self.syntax)
    }
}

impl CatchClause {
    pub fn block(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

impl FinallyClause {
    pub fn block(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

// --- Types ---

ast_node!(PredefinedType);
ast_node!(NamedType);
ast_node!(TypeArgumentList);
ast_node!(NullableType);
ast_node!(ArrayType);

ast_enum!(Type {
    PredefinedType,
    NamedType,
    NullableType,
    ArrayType,
});

impl PredefinedType {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }
}

impl NamedType {
    pub fn type_argument_list(&self) -> Option<TypeArgumentList> {
        support::child(&self.syntax)
    }
}

impl NullableType {
    pub fn element_type(&self) -> Option<Type> {
        support::child(&self.syntax)
    }
}

impl ArrayType {
    pub fn element_type(&self) -> Option<Type> {
        support::child(&self.syntax)
    }
}

// --- Expressions ---

ast_node!(LiteralExpression);
ast_node!(NameExpression);
ast_node!(ThisExpression);
ast_node!(BaseExpression);
ast_node!(ParenthesizedExpression);
ast_node!(CastExpression);
ast_node!(LambdaExpression);
ast_node!(LambdaParameterList);
ast_node!(InvocationExpression);
ast_node!(ArgumentList);
ast_node!(Argument);
ast_node!(NameColon);
ast_node!(MemberAccessExpression);
ast_node!(ElementAccessExpression);
ast_node!(ObjectCreationExpression);
ast_node!(PrefixUnaryExpression);
ast_node!(PostfixUnaryExpression);
ast_node!(BinaryExpression);
ast_node!(AsExpression);
ast_node!(IsExpression);
ast_node!(ConditionalExpression);
ast_node!(AssignmentExpression);

ast_enum!(Expression {
    LiteralExpression,
    NameExpression,
    ThisExpression,
    BaseExpression,
    ParenthesizedExpression,
    CastExpression,
    LambdaExpression,
    InvocationExpression,
    MemberAccessExpression,
    ElementAccessExpression,
    ObjectCreationExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    AsExpression,
    IsExpression,
    ConditionalExpression,
    AssignmentExpression,
});

impl LiteralExpression {
    pub fn token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }
}

impl NameExpression {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Identifier)
    }
}

impl ParenthesizedExpression {
    pub fn l_paren_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LParen)
    }

    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn r_paren_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RParen)
    }
}

impl CastExpression {
    pub fn l_paren_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LParen)
    }

    pub fn ty(&self) -> Option<Type> {
        support::child(&self.syntax)
    }

    pub fn r_paren_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RParen)
    }

    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }
}

impl LambdaExpression {
    pub fn parameter_list(&self) -> Option<LambdaParameterList> {
        support::child(&self.syntax)
    }

    /// The single unparenthesized parameter of `x => ...`.
    pub fn parameter(&self) -> Option<Parameter> {
        support::child(&self.syntax)
    }

    pub fn arrow_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::FatArrow)
    }
}

impl LambdaParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        support::children(&self.syntax)
    }
}

impl InvocationExpression {
    pub fn callee(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        support::child(&self.syntax)
    }
}

impl ArgumentList {
    pub fn arguments(&self) -> impl Iterator<Item = Argument> + '_ {
        support::children(&self.syntax)
    }
}

impl Argument {
    pub fn name_colon(&self) -> Option<NameColon> {
        support::child(&self.syntax)
    }

    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.syntax.parent().and_then(ArgumentList::cast)
    }
}

impl NameColon {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Identifier)
    }
}

impl MemberAccessExpression {
    /// Receiver node; may be a [`PredefinedType`] as in `int.MaxValue`.
    pub fn receiver(&self) -> Option<SyntaxNode> {
        self.syntax.first_child()
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Identifier)
    }
}

impl ElementAccessExpression {
    pub fn receiver(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }
}

impl ObjectCreationExpression {
    pub fn ty(&self) -> Option<Type> {
        support::child(&self.syntax)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        support::child(&self.syntax)
    }
}

impl PrefixUnaryExpression {
    pub fn operator_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn operand(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }
}

impl PostfixUnaryExpression {
    pub fn operand(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn operator_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }
}

impl BinaryExpression {
    pub fn lhs(&self) -> Option<Expression> {
        support::children(&self.syntax).next()
    }

    pub fn operator_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn rhs(&self) -> Option<Expression> {
        support::children(&self.syntax).nth(1)
    }
}

impl AsExpression {
    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn ty(&self) -> Option<Type> {
        support::child(&self.syntax)
    }
}

impl IsExpression {
    pub fn expression(&self) -> Option<Expression> {
        support::child(&self.syntax)
    }

    pub fn ty(&self) -> Option<Type> {
        support::child(&self.syntax)
    }
}

impl ConditionalExpression {
    pub fn condition(&self) -> Option<Expression> {
        support::children(&self.syntax).next()
    }

    pub fn question_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Question)
    }

    pub fn when_true(&self) -> Option<Expression> {
        support::children(&self.syntax).nth(1)
    }

    pub fn colon_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::Colon)
    }

    pub fn when_false(&self) -> Option<Expression> {
        support::children(&self.syntax).nth(2)
    }
}

impl AssignmentExpression {
    pub fn lhs(&self) -> Option<Expression> {
        support::children(&self.syntax).next()
    }

    pub fn operator_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn rhs(&self) -> Option<Expression> {
        support::children(&self.syntax).nth(1)
    }
}
