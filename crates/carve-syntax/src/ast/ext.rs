use crate::ast::{support, AstNode};
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Real,
    Char,
    String,
    Bool(bool),
    Null,
}

impl super::LiteralExpression {
    pub fn kind(&self) -> Option<LiteralKind> {
        let token = self.token()?;
        Some(match token.kind() {
            SyntaxKind::IntLiteral => LiteralKind::Integer,
            SyntaxKind::RealLiteral => LiteralKind::Real,
            SyntaxKind::CharLiteral => LiteralKind::Char,
            SyntaxKind::StringLiteral => LiteralKind::String,
            SyntaxKind::TrueKw => LiteralKind::Bool(true),
            SyntaxKind::FalseKw => LiteralKind::Bool(false),
            SyntaxKind::NullKw => LiteralKind::Null,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
    Coalesce,
}

impl BinaryOperator {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::Star => Self::Mul,
            SyntaxKind::Slash => Self::Div,
            SyntaxKind::Percent => Self::Rem,
            SyntaxKind::Plus => Self::Add,
            SyntaxKind::Minus => Self::Sub,
            SyntaxKind::Less => Self::Less,
            SyntaxKind::LessEq => Self::LessEq,
            SyntaxKind::Greater => Self::Greater,
            SyntaxKind::GreaterEq => Self::GreaterEq,
            SyntaxKind::EqEq => Self::Eq,
            SyntaxKind::BangEq => Self::NotEq,
            SyntaxKind::Amp => Self::BitAnd,
            SyntaxKind::Caret => Self::BitXor,
            SyntaxKind::Pipe => Self::BitOr,
            SyntaxKind::AmpAmp => Self::And,
            SyntaxKind::PipePipe => Self::Or,
            SyntaxKind::QuestionQuestion => Self::Coalesce,
            _ => return None,
        })
    }

    pub fn token_kind(self) -> SyntaxKind {
        match self {
            Self::Mul => SyntaxKind::Star,
            Self::Div => SyntaxKind::Slash,
            Self::Rem => SyntaxKind::Percent,
            Self::Add => SyntaxKind::Plus,
            Self::Sub => SyntaxKind::Minus,
            Self::Less => SyntaxKind::Less,
            Self::LessEq => SyntaxKind::LessEq,
            Self::Greater => SyntaxKind::Greater,
            Self::GreaterEq => SyntaxKind::GreaterEq,
            Self::Eq => SyntaxKind::EqEq,
            Self::NotEq => SyntaxKind::BangEq,
            Self::BitAnd => SyntaxKind::Amp,
            Self::BitXor => SyntaxKind::Caret,
            Self::BitOr => SyntaxKind::Pipe,
            Self::And => SyntaxKind::AmpAmp,
            Self::Or => SyntaxKind::PipePipe,
            Self::Coalesce => SyntaxKind::QuestionQuestion,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Or => "||",
            Self::Coalesce => "??",
        }
    }

    /// Operator that keeps the meaning when both operands trade places.
    pub fn mirrored(self) -> Option<Self> {
        Some(match self {
            Self::Less => Self::Greater,
            Self::LessEq => Self::GreaterEq,
            Self::Greater => Self::Less,
            Self::GreaterEq => Self::LessEq,
            Self::Eq | Self::NotEq | Self::And | Self::Or => self,
            _ => return None,
        })
    }

    /// Logical complement, if one exists as a single operator.
    pub fn negated(self) -> Option<Self> {
        Some(match self {
            Self::Less => Self::GreaterEq,
            Self::LessEq => Self::Greater,
            Self::Greater => Self::LessEq,
            Self::GreaterEq => Self::Less,
            Self::Eq => Self::NotEq,
            Self::NotEq => Self::Eq,
            _ => return None,
        })
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Self::Mul | Self::Div | Self::Rem => Precedence::Multiplicative,
            Self::Add | Self::Sub => Precedence::Additive,
            Self::Less | Self::LessEq | Self::Greater | Self::GreaterEq => Precedence::Relational,
            Self::Eq | Self::NotEq => Precedence::Equality,
            Self::BitAnd => Precedence::BitAnd,
            Self::BitXor => Precedence::BitXor,
            Self::BitOr => Precedence::BitOr,
            Self::And => Precedence::LogicalAnd,
            Self::Or => Precedence::LogicalOr,
            Self::Coalesce => Precedence::Coalesce,
        }
    }
}

impl super::BinaryExpression {
    pub fn operator(&self) -> Option<BinaryOperator> {
        BinaryOperator::from_kind(self.operator_token()?.kind())
    }
}

/// Expression precedence, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lambda,
    Assignment,
    Conditional,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Primary,
}

impl super::Expression {
    pub fn precedence(&self) -> Precedence {
        use super::Expression::*;

        match self {
            LiteralExpression(_)
            | NameExpression(_)
            | ThisExpression(_)
            | BaseExpression(_)
            | ParenthesizedExpression(_)
            | InvocationExpression(_)
            | MemberAccessExpression(_)
            | ElementAccessExpression(_)
            | ObjectCreationExpression(_)
            | PostfixUnaryExpression(_) => Precedence::Primary,
            PrefixUnaryExpression(_) | CastExpression(_) => Precedence::Unary,
            BinaryExpression(it) => it
                .operator()
                .map_or(Precedence::Lambda, BinaryOperator::precedence),
            AsExpression(_) | IsExpression(_) => Precedence::Relational,
            ConditionalExpression(_) => Precedence::Conditional,
            AssignmentExpression(_) => Precedence::Assignment,
            LambdaExpression(_) => Precedence::Lambda,
        }
    }

    /// Strips any number of enclosing parentheses.
    pub fn skip_parens(self) -> Self {
        let mut expr = self;
        while let super::Expression::ParenthesizedExpression(paren) = &expr {
            match paren.expression() {
                Some(inner) => expr = inner,
                None => break,
            }
        }
        expr
    }

    /// True for expressions whose evaluation cannot have side effects:
    /// literals, names, `this`, and member or element reads of those.
    pub fn is_side_effect_free(&self) -> bool {
        use super::Expression::*;

        match self {
            LiteralExpression(_) | NameExpression(_) | ThisExpression(_) | BaseExpression(_) => {
                true
            }
            ParenthesizedExpression(it) => it
                .expression()
                .is_some_and(|inner| inner.is_side_effect_free()),
            MemberAccessExpression(it) => it.receiver().is_some_and(|receiver| {
                super::PredefinedType::can_cast(receiver.kind())
                    || super::Expression::cast(receiver)
                        .is_some_and(|inner| inner.is_side_effect_free())
            }),
            PrefixUnaryExpression(it) => {
                it.operator_token().is_some_and(|op| {
                    matches!(
                        op.kind(),
                        SyntaxKind::Bang | SyntaxKind::Minus | SyntaxKind::Plus | SyntaxKind::Tilde
                    )
                }) && it.operand().is_some_and(|inner| inner.is_side_effect_free())
            }
            BinaryExpression(it) => {
                it.lhs().is_some_and(|lhs| lhs.is_side_effect_free())
                    && it.rhs().is_some_and(|rhs| rhs.is_side_effect_free())
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LambdaBody {
    Block(super::Block),
    Expression(super::Expression),
}

impl LambdaBody {
    pub fn syntax(&self) -> &crate::SyntaxNode {
        match self {
            LambdaBody::Block(it) => it.syntax(),
            LambdaBody::Expression(it) => it.syntax(),
        }
    }
}

impl super::LambdaExpression {
    pub fn body(&self) -> Option<LambdaBody> {
        let node = self.syntax().last_child()?;
        if let Some(block) = super::Block::cast(node.clone()) {
            return Some(LambdaBody::Block(block));
        }
        super::Expression::cast(node).map(LambdaBody::Expression)
    }
}

impl super::SwitchSection {
    /// The single statement of the section, if it has exactly one.
    pub fn single_statement(&self) -> Option<super::Statement> {
        let mut statements = self.statements();
        let first = statements.next()?;
        statements.next().is_none().then_some(first)
    }
}

impl super::MethodDeclaration {
    pub fn returns_void(&self) -> bool {
        matches!(
            self.return_type(),
            Some(super::Type::PredefinedType(ty))
                if ty.keyword().is_some_and(|kw| kw.kind() == SyntaxKind::VoidKw)
        )
    }
}

impl super::Block {
    /// The single statement of the block, if it has exactly one.
    pub fn single_statement(&self) -> Option<super::Statement> {
        let mut statements = self.statements();
        let first = statements.next()?;
        statements.next().is_none().then_some(first)
    }
}

impl super::Argument {
    pub fn is_named(&self) -> bool {
        self.name_colon().is_some()
    }
}

impl super::NameColon {
    pub fn name(&self) -> Option<String> {
        self.name_token().map(|tok| tok.text().to_string())
    }
}

impl super::Statement {
    /// Local declarations cannot be the embedded statement of `if`/`else`.
    pub fn is_local_declaration(&self) -> bool {
        matches!(self, super::Statement::LocalDeclarationStatement(_))
    }

    /// Declared local names, for local declaration statements.
    pub fn declared_names(&self) -> Vec<String> {
        match self {
            super::Statement::LocalDeclarationStatement(decl) => decl
                .declarators()
                .filter_map(|d| d.name_token())
                .map(|tok| tok.text().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl super::SwitchLabel {
    pub fn is_default(&self) -> bool {
        support::token(self.syntax(), SyntaxKind::DefaultKw).is_some()
    }
}
