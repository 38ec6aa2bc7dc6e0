use std::collections::VecDeque;

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, NodeOrToken};
use text_size::{TextRange, TextSize};

use crate::lexer::{lex_with_errors, Token};
use crate::syntax_kind::{CarveLanguage, SyntaxKind};
use crate::ParseError;

pub type SyntaxNode = rowan::SyntaxNode<CarveLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CarveLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CarveLanguage>;

/// Prefix operators bind tighter than every infix operator.
const PREFIX_BP: u8 = 100;
const POSTFIX_BP: u8 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<ParseError>,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn token_at_offset(&self, offset: TextSize) -> rowan::TokenAtOffset<SyntaxToken> {
        self.syntax().token_at_offset(offset)
    }

    pub fn covering_element(&self, range: TextRange) -> SyntaxElement {
        self.syntax().covering_element(range)
    }
}

/// Parse a whole compilation unit.
pub fn parse(input: &str) -> Parse {
    let mut parser = Parser::new(input);
    parser.parse_compilation_unit();
    parser.finish()
}

/// Parse a single expression wrapped in a [`SyntaxKind::Fragment`] root.
pub fn parse_expression_fragment(input: &str) -> Parse {
    let mut parser = Parser::new(input);
    parser.builder.start_node(SyntaxKind::Fragment.into());
    parser.parse_expression(0);
    parser.finish_fragment("expected end of expression")
}

/// Parse a sequence of statements wrapped in a [`SyntaxKind::Fragment`] root.
pub fn parse_statement_fragment(input: &str) -> Parse {
    let mut parser = Parser::new(input);
    parser.builder.start_node(SyntaxKind::Fragment.into());
    while !parser.at(SyntaxKind::Eof) {
        if parser.at(SyntaxKind::RBrace) {
            parser.recover_with_error("unexpected `}`");
        } else {
            parser.parse_statement();
        }
    }
    parser.finish_fragment("expected statement")
}

struct Parser<'a> {
    input: &'a str,
    tokens: VecDeque<Token>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let (tokens, lex_errors) = lex_with_errors(input);
        Self {
            input,
            tokens: VecDeque::from(tokens),
            builder: GreenNodeBuilder::new(),
            errors: lex_errors
                .into_iter()
                .map(|err| ParseError {
                    message: err.message,
                    range: err.range,
                })
                .collect(),
        }
    }

    fn finish(mut self) -> Parse {
        self.errors.sort_by_key(|err| err.range.start());
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    fn finish_fragment(mut self, message: &str) -> Parse {
        if !self.at(SyntaxKind::Eof) {
            self.error_here(message);
            self.start_node(SyntaxKind::Error);
            while !self.at(SyntaxKind::Eof) {
                self.bump();
            }
            self.builder.finish_node();
        }
        self.eat_trivia();
        self.builder.finish_node();
        self.finish()
    }

    // --- Declarations ---

    fn parse_compilation_unit(&mut self) {
        self.builder.start_node(SyntaxKind::CompilationUnit.into());
        while !self.at(SyntaxKind::Eof) {
            match self.current() {
                SyntaxKind::UsingKw => self.parse_using_directive(),
                SyntaxKind::NamespaceKw => self.parse_namespace(),
                _ if self.at_type_decl_start() => self.parse_type_declaration(),
                _ => self.recover_with_error("expected a type or namespace declaration"),
            }
        }
        self.eat_trivia();
        self.builder.finish_node();
    }

    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::UsingDirective);
        self.bump();
        self.parse_name();
        self.expect(SyntaxKind::Semicolon, "expected `;` after using directive");
        self.builder.finish_node();
    }

    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NamespaceDeclaration);
        self.bump();
        self.parse_name();
        self.expect(SyntaxKind::LBrace, "expected `{` after namespace name");
        while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            if self.at_type_decl_start() {
                self.parse_type_declaration();
            } else {
                self.recover_with_error("expected a type declaration");
            }
        }
        self.expect(SyntaxKind::RBrace, "expected `}` after namespace body");
        self.builder.finish_node();
    }

    fn parse_name(&mut self) {
        self.start_node(SyntaxKind::Name);
        self.expect(SyntaxKind::Identifier, "expected name");
        while self.at(SyntaxKind::Dot) && self.nth(1) == SyntaxKind::Identifier {
            self.bump();
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_type_declaration(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_modifiers();
        let kind = match self.current() {
            SyntaxKind::StructKw => SyntaxKind::StructDeclaration,
            _ => SyntaxKind::ClassDeclaration,
        };
        self.builder.start_node_at(checkpoint, kind.into());
        self.expect_any(
            &[SyntaxKind::ClassKw, SyntaxKind::StructKw],
            "expected `class` or `struct`",
        );
        self.expect(SyntaxKind::Identifier, "expected type name");
        self.expect(SyntaxKind::LBrace, "expected `{` after type name");
        while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            self.parse_member();
        }
        self.expect(SyntaxKind::RBrace, "expected `}` after type body");
        self.builder.finish_node();
    }

    fn parse_member(&mut self) {
        if self.at_type_decl_start() && self.lookahead_type_keyword() {
            self.parse_type_declaration();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_modifiers();
        if !self.at_type_start() {
            self.builder.start_node_at(checkpoint, SyntaxKind::Error.into());
            self.error_here("expected a field or method declaration");
            self.recover_to(&[SyntaxKind::Semicolon, SyntaxKind::RBrace]);
            if self.at(SyntaxKind::Semicolon) {
                self.bump();
            }
            self.builder.finish_node();
            return;
        }

        self.parse_type(TypeContext::Declaration);
        if self.at(SyntaxKind::Identifier) && self.nth(1) == SyntaxKind::LParen {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::MethodDeclaration.into());
            self.bump();
            self.parse_parameter_list();
            match self.current() {
                SyntaxKind::LBrace => self.parse_block(),
                SyntaxKind::FatArrow => {
                    self.parse_arrow_expression_clause();
                    self.expect(SyntaxKind::Semicolon, "expected `;` after expression body");
                }
                _ => {
                    self.expect(SyntaxKind::Semicolon, "expected method body or `;`");
                }
            }
        } else {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::FieldDeclaration.into());
            self.parse_variable_declarators();
            self.expect(SyntaxKind::Semicolon, "expected `;` after field declaration");
        }
        self.builder.finish_node();
    }

    fn parse_modifiers(&mut self) {
        while self.current().is_modifier() {
            self.bump();
        }
    }

    fn parse_parameter_list(&mut self) {
        self.start_node(SyntaxKind::ParameterList);
        self.expect(SyntaxKind::LParen, "expected `(`");
        while !self.at(SyntaxKind::RParen) && !self.at(SyntaxKind::Eof) {
            self.start_node(SyntaxKind::Parameter);
            self.parse_type(TypeContext::Declaration);
            self.expect(SyntaxKind::Identifier, "expected parameter name");
            if self.at(SyntaxKind::Eq) {
                self.bump();
                self.parse_expression(0);
            }
            self.builder.finish_node();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RParen, "expected `)` after parameters");
        self.builder.finish_node();
    }

    fn parse_arrow_expression_clause(&mut self) {
        self.start_node(SyntaxKind::ArrowExpressionClause);
        self.bump();
        self.parse_expression(0);
        self.builder.finish_node();
    }

    fn parse_variable_declarators(&mut self) {
        loop {
            self.start_node(SyntaxKind::VariableDeclarator);
            self.expect(SyntaxKind::Identifier, "expected variable name");
            if self.at(SyntaxKind::Eq) {
                self.bump();
                self.parse_expression(0);
            }
            self.builder.finish_node();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
    }

    // --- Statements ---

    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        self.expect(SyntaxKind::LBrace, "expected `{`");
        while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            self.parse_statement();
        }
        self.expect(SyntaxKind::RBrace, "expected `}`");
        self.builder.finish_node();
    }

    fn parse_statement(&mut self) {
        let checkpoint = self.checkpoint();
        let before = self.tokens.len();

        match self.current() {
            SyntaxKind::LBrace => self.parse_block(),
            SyntaxKind::IfKw => self.parse_if_statement(checkpoint),
            SyntaxKind::SwitchKw => self.parse_switch_statement(checkpoint),
            SyntaxKind::WhileKw => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::WhileStatement.into());
                self.bump();
                self.parse_parenthesized_condition("while");
                self.parse_statement();
                self.builder.finish_node();
            }
            SyntaxKind::TryKw => self.parse_try_statement(checkpoint),
            SyntaxKind::ReturnKw => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::ReturnStatement.into());
                self.bump();
                if !self.at(SyntaxKind::Semicolon) {
                    self.parse_expression(0);
                }
                self.expect(SyntaxKind::Semicolon, "expected `;` after return");
                self.builder.finish_node();
            }
            SyntaxKind::BreakKw | SyntaxKind::ContinueKw => {
                let kind = if self.at(SyntaxKind::BreakKw) {
                    SyntaxKind::BreakStatement
                } else {
                    SyntaxKind::ContinueStatement
                };
                self.builder.start_node_at(checkpoint, kind.into());
                self.bump();
                self.expect(SyntaxKind::Semicolon, "expected `;`");
                self.builder.finish_node();
            }
            SyntaxKind::ThrowKw => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::ThrowStatement.into());
                self.bump();
                if !self.at(SyntaxKind::Semicolon) {
                    self.parse_expression(0);
                }
                self.expect(SyntaxKind::Semicolon, "expected `;` after throw");
                self.builder.finish_node();
            }
            SyntaxKind::Semicolon => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::EmptyStatement.into());
                self.bump();
                self.builder.finish_node();
            }
            _ if self.at_local_declaration_start() => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::LocalDeclarationStatement.into());
                if self.at(SyntaxKind::ConstKw) {
                    self.bump();
                }
                self.parse_type(TypeContext::Declaration);
                self.parse_variable_declarators();
                self.expect(
                    SyntaxKind::Semicolon,
                    "expected `;` after local declaration",
                );
                self.builder.finish_node();
            }
            _ if can_start_expression(self.current()) => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::ExpressionStatement.into());
                self.parse_expression(0);
                self.expect(SyntaxKind::Semicolon, "expected `;` after expression");
                self.builder.finish_node();
            }
            _ => {}
        }

        if self.tokens.len() == before {
            if self.at(SyntaxKind::RBrace) || self.at(SyntaxKind::Eof) {
                self.error_here("expected statement");
            } else {
                self.recover_with_error("expected statement");
            }
        }
    }

    fn parse_parenthesized_condition(&mut self, keyword: &str) {
        self.expect(SyntaxKind::LParen, &format!("expected `(` after {keyword}"));
        self.parse_expression(0);
        self.expect(SyntaxKind::RParen, "expected `)`");
    }

    fn parse_if_statement(&mut self, checkpoint: Checkpoint) {
        self.builder
            .start_node_at(checkpoint, SyntaxKind::IfStatement.into());
        self.bump();
        self.parse_parenthesized_condition("if");
        self.parse_statement();
        if self.at(SyntaxKind::ElseKw) {
            self.start_node(SyntaxKind::ElseClause);
            self.bump();
            self.parse_statement();
            self.builder.finish_node();
        }
        self.builder.finish_node();
    }

    fn parse_switch_statement(&mut self, checkpoint: Checkpoint) {
        self.builder
            .start_node_at(checkpoint, SyntaxKind::SwitchStatement.into());
        self.bump();
        self.parse_parenthesized_condition("switch");
        self.expect(SyntaxKind::LBrace, "expected `{` after switch");
        while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            if self.at_switch_label() {
                self.parse_switch_section();
            } else {
                self.recover_with_error("expected `case` or `default`");
            }
        }
        self.expect(SyntaxKind::RBrace, "expected `}` after switch sections");
        self.builder.finish_node();
    }

    fn parse_switch_section(&mut self) {
        self.start_node(SyntaxKind::SwitchSection);
        while self.at_switch_label() {
            self.start_node(SyntaxKind::SwitchLabel);
            if self.at(SyntaxKind::CaseKw) {
                self.bump();
                self.parse_expression(0);
            } else {
                self.bump();
            }
            self.expect(SyntaxKind::Colon, "expected `:` after switch label");
            self.builder.finish_node();
        }
        while !self.at_switch_label()
            && !self.at(SyntaxKind::RBrace)
            && !self.at(SyntaxKind::Eof)
        {
            self.parse_statement();
        }
        self.builder.finish_node();
    }

    fn at_switch_label(&self) -> bool {
        self.at(SyntaxKind::CaseKw)
            || (self.at(SyntaxKind::DefaultKw) && self.nth(1) == SyntaxKind::Colon)
    }

    fn parse_try_statement(&mut self, checkpoint: Checkpoint) {
        self.builder
            .start_node_at(checkpoint, SyntaxKind::TryStatement.into());
        self.bump();
        self.parse_block();
        while self.at(SyntaxKind::CatchKw) {
            self.start_node(SyntaxKind::CatchClause);
            self.bump();
            if self.at(SyntaxKind::LParen) {
                self.bump();
                self.parse_type(TypeContext::Declaration);
                if self.at(SyntaxKind::Identifier) {
                    self.bump();
                }
                self.expect(SyntaxKind::RParen, "expected `)` after catch declaration");
            }
            self.parse_block();
            self.builder.finish_node();
        }
        if self.at(SyntaxKind::FinallyKw) {
            self.start_node(SyntaxKind::FinallyClause);
            self.bump();
            self.parse_block();
            self.builder.finish_node();
        }
        self.builder.finish_node();
    }

    // --- Types ---

    fn parse_type(&mut self, context: TypeContext) {
        let checkpoint = self.checkpoint();
        match self.current() {
            kind if kind.is_predefined_type() => {
                self.start_node(SyntaxKind::PredefinedType);
                self.bump();
                self.builder.finish_node();
            }
            SyntaxKind::Identifier => {
                self.start_node(SyntaxKind::NamedType);
                self.bump();
                while self.at(SyntaxKind::Dot) && self.nth(1) == SyntaxKind::Identifier {
                    self.bump();
                    self.bump();
                }
                if self.at(SyntaxKind::Less) {
                    self.parse_type_argument_list();
                }
                self.builder.finish_node();
            }
            _ => {
                self.error_here("expected type");
                return;
            }
        }

        loop {
            if self.at(SyntaxKind::Question) && context.accepts_nullable(self.nth(1)) {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::NullableType.into());
                self.bump();
                self.builder.finish_node();
            } else if self.at(SyntaxKind::LBracket) && self.nth(1) == SyntaxKind::RBracket {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::ArrayType.into());
                self.bump();
                self.bump();
                self.builder.finish_node();
            } else {
                break;
            }
        }
    }

    fn parse_type_argument_list(&mut self) {
        self.start_node(SyntaxKind::TypeArgumentList);
        self.bump();
        loop {
            self.parse_type(TypeContext::Declaration);
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Greater, "expected `>` after type arguments");
        self.builder.finish_node();
    }

    // --- Expressions ---

    fn parse_expression(&mut self, min_bp: u8) {
        let checkpoint = self.checkpoint();

        match self.current() {
            kind if kind.is_literal() => {
                self.start_node(SyntaxKind::LiteralExpression);
                self.bump();
                self.builder.finish_node();
            }
            SyntaxKind::ThisKw => {
                self.start_node(SyntaxKind::ThisExpression);
                self.bump();
                self.builder.finish_node();
            }
            SyntaxKind::BaseKw => {
                self.start_node(SyntaxKind::BaseExpression);
                self.bump();
                self.builder.finish_node();
            }
            SyntaxKind::NewKw => {
                self.start_node(SyntaxKind::ObjectCreationExpression);
                self.bump();
                self.parse_type(TypeContext::Declaration);
                if self.at(SyntaxKind::LParen) {
                    self.parse_argument_list();
                }
                self.builder.finish_node();
            }
            SyntaxKind::Plus
            | SyntaxKind::Minus
            | SyntaxKind::Bang
            | SyntaxKind::Tilde
            | SyntaxKind::PlusPlus
            | SyntaxKind::MinusMinus => {
                self.start_node(SyntaxKind::PrefixUnaryExpression);
                self.bump();
                self.parse_expression(PREFIX_BP);
                self.builder.finish_node();
            }
            SyntaxKind::Identifier => {
                if self.nth(1) == SyntaxKind::FatArrow {
                    self.parse_lambda_expression(checkpoint);
                } else {
                    self.start_node(SyntaxKind::NameExpression);
                    self.bump();
                    self.builder.finish_node();
                }
            }
            kind if kind.is_predefined_type() => {
                // `int.MaxValue`, `string.Empty`.
                self.start_node(SyntaxKind::PredefinedType);
                self.bump();
                self.builder.finish_node();
            }
            SyntaxKind::LParen => {
                if self.is_lambda_paren() {
                    self.parse_lambda_expression(checkpoint);
                } else if self.is_cast_expression() {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::CastExpression.into());
                    self.bump();
                    self.parse_type(TypeContext::Declaration);
                    self.expect(SyntaxKind::RParen, "expected `)` in cast");
                    self.parse_expression(PREFIX_BP);
                    self.builder.finish_node();
                } else {
                    self.start_node(SyntaxKind::ParenthesizedExpression);
                    self.bump();
                    self.parse_expression(0);
                    self.expect(SyntaxKind::RParen, "expected `)`");
                    self.builder.finish_node();
                }
            }
            _ => {
                self.error_here("expected expression");
                if !at_expression_boundary(self.current()) {
                    self.start_node(SyntaxKind::Error);
                    self.bump();
                    self.builder.finish_node();
                }
                return;
            }
        }

        loop {
            let op = self.current();

            match op {
                SyntaxKind::LParen if min_bp <= POSTFIX_BP => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::InvocationExpression.into());
                    self.parse_argument_list();
                    self.builder.finish_node();
                    continue;
                }
                SyntaxKind::Dot if min_bp <= POSTFIX_BP => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::MemberAccessExpression.into());
                    self.bump();
                    self.expect(SyntaxKind::Identifier, "expected member name after `.`");
                    self.builder.finish_node();
                    continue;
                }
                SyntaxKind::LBracket if min_bp <= POSTFIX_BP => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::ElementAccessExpression.into());
                    self.bump();
                    self.parse_expression(0);
                    self.expect(SyntaxKind::RBracket, "expected `]`");
                    self.builder.finish_node();
                    continue;
                }
                SyntaxKind::PlusPlus | SyntaxKind::MinusMinus if min_bp <= POSTFIX_BP => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::PostfixUnaryExpression.into());
                    self.bump();
                    self.builder.finish_node();
                    continue;
                }
                SyntaxKind::AsKw | SyntaxKind::IsKw => {
                    let (l_bp, _) = RELATIONAL_BP;
                    if l_bp < min_bp {
                        break;
                    }
                    let kind = if op == SyntaxKind::AsKw {
                        SyntaxKind::AsExpression
                    } else {
                        SyntaxKind::IsExpression
                    };
                    self.builder.start_node_at(checkpoint, kind.into());
                    self.bump();
                    self.parse_type(TypeContext::Expression);
                    self.builder.finish_node();
                    continue;
                }
                SyntaxKind::Question => {
                    let (l_bp, r_bp) = CONDITIONAL_BP;
                    if l_bp < min_bp {
                        break;
                    }
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::ConditionalExpression.into());
                    self.bump();
                    self.parse_expression(0);
                    self.expect(SyntaxKind::Colon, "expected `:` in conditional expression");
                    self.parse_expression(r_bp);
                    self.builder.finish_node();
                    continue;
                }
                _ => {}
            }

            let Some((l_bp, r_bp, expr_kind)) = infix_binding_power(op) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.builder.start_node_at(checkpoint, expr_kind.into());
            self.bump();
            self.parse_expression(r_bp);
            self.builder.finish_node();
        }
    }

    fn parse_lambda_expression(&mut self, checkpoint: Checkpoint) {
        self.builder
            .start_node_at(checkpoint, SyntaxKind::LambdaExpression.into());
        if self.at(SyntaxKind::LParen) {
            self.start_node(SyntaxKind::LambdaParameterList);
            self.bump();
            while !self.at(SyntaxKind::RParen) && !self.at(SyntaxKind::Eof) {
                self.start_node(SyntaxKind::Parameter);
                if self.nth(1) != SyntaxKind::Comma && self.nth(1) != SyntaxKind::RParen {
                    self.parse_type(TypeContext::Declaration);
                }
                self.expect(SyntaxKind::Identifier, "expected lambda parameter");
                self.builder.finish_node();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
            self.expect(SyntaxKind::RParen, "expected `)` after lambda parameters");
            self.builder.finish_node();
        } else {
            self.start_node(SyntaxKind::Parameter);
            self.bump();
            self.builder.finish_node();
        }
        self.expect(SyntaxKind::FatArrow, "expected `=>` in lambda");
        if self.at(SyntaxKind::LBrace) {
            self.parse_block();
        } else {
            self.parse_expression(0);
        }
        self.builder.finish_node();
    }

    fn parse_argument_list(&mut self) {
        self.start_node(SyntaxKind::ArgumentList);
        self.bump();
        while !self.at(SyntaxKind::RParen) && !self.at(SyntaxKind::Eof) {
            self.start_node(SyntaxKind::Argument);
            if self.at(SyntaxKind::Identifier) && self.nth(1) == SyntaxKind::Colon {
                self.start_node(SyntaxKind::NameColon);
                self.bump();
                self.bump();
                self.builder.finish_node();
            }
            self.parse_expression(0);
            self.builder.finish_node();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RParen, "expected `)` after arguments");
        self.builder.finish_node();
    }

    fn is_lambda_paren(&self) -> bool {
        let mut depth = 0usize;
        let mut n = 0usize;
        loop {
            match self.nth(n) {
                SyntaxKind::LParen => depth += 1,
                SyntaxKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return self.nth(n + 1) == SyntaxKind::FatArrow;
                    }
                }
                SyntaxKind::Eof | SyntaxKind::Semicolon | SyntaxKind::LBrace => return false,
                _ => {}
            }
            n += 1;
        }
    }

    fn is_cast_expression(&self) -> bool {
        let Some(after_type) = self.scan_type(1, true) else {
            return false;
        };
        if self.nth(after_type) != SyntaxKind::RParen {
            return false;
        }
        let next = self.nth(after_type + 1);
        if self.nth(1).is_predefined_type() {
            return can_start_expression(next);
        }
        // `(a) - b` stays a parenthesized subtraction.
        next.is_literal()
            || matches!(
                next,
                SyntaxKind::Identifier
                    | SyntaxKind::LParen
                    | SyntaxKind::Bang
                    | SyntaxKind::Tilde
                    | SyntaxKind::ThisKw
                    | SyntaxKind::BaseKw
                    | SyntaxKind::NewKw
            )
    }

    fn at_local_declaration_start(&self) -> bool {
        if self.at(SyntaxKind::ConstKw) {
            return true;
        }
        let Some(after_type) = self.scan_type(0, true) else {
            return false;
        };
        self.nth(after_type) == SyntaxKind::Identifier
            && matches!(
                self.nth(after_type + 1),
                SyntaxKind::Eq | SyntaxKind::Semicolon | SyntaxKind::Comma
            )
    }

    /// Scans a type starting at the `n`-th non-trivia token and returns the
    /// index just past it.
    fn scan_type(&self, mut n: usize, allow_nullable: bool) -> Option<usize> {
        match self.nth(n) {
            kind if kind.is_predefined_type() => n += 1,
            SyntaxKind::Identifier => {
                n += 1;
                while self.nth(n) == SyntaxKind::Dot && self.nth(n + 1) == SyntaxKind::Identifier {
                    n += 2;
                }
                if self.nth(n) == SyntaxKind::Less {
                    n += 1;
                    loop {
                        n = self.scan_type(n, true)?;
                        if self.nth(n) != SyntaxKind::Comma {
                            break;
                        }
                        n += 1;
                    }
                    if self.nth(n) != SyntaxKind::Greater {
                        return None;
                    }
                    n += 1;
                }
            }
            _ => return None,
        }
        loop {
            match self.nth(n) {
                SyntaxKind::Question if allow_nullable => n += 1,
                SyntaxKind::LBracket if self.nth(n + 1) == SyntaxKind::RBracket => n += 2,
                _ => return Some(n),
            }
        }
    }

    // --- Recovery ---

    fn recover_with_error(&mut self, message: &str) {
        self.error_here(message);
        self.start_node(SyntaxKind::Error);
        self.bump();
        self.builder.finish_node();
    }

    fn recover_to(&mut self, recovery: &[SyntaxKind]) {
        while !self.at(SyntaxKind::Eof) && !recovery.contains(&self.current()) {
            self.bump();
        }
    }

    fn at_type_decl_start(&self) -> bool {
        let kind = self.current();
        kind == SyntaxKind::ClassKw || kind == SyntaxKind::StructKw || kind.is_modifier()
    }

    fn lookahead_type_keyword(&self) -> bool {
        let mut n = 0;
        while self.nth(n).is_modifier() {
            n += 1;
        }
        matches!(self.nth(n), SyntaxKind::ClassKw | SyntaxKind::StructKw)
    }

    fn at_type_start(&self) -> bool {
        let kind = self.current();
        kind == SyntaxKind::Identifier || kind.is_predefined_type()
    }

    // --- Token plumbing ---

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Kind of the `n`-th upcoming non-trivia token. Never consumes trivia,
    /// so callers can decide where a node ends without pulling trailing
    /// trivia into it.
    fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .nth(n)
            .map_or(SyntaxKind::Eof, |token| token.kind)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    fn eat_trivia(&mut self) {
        while self.tokens.front().is_some_and(|t| t.kind.is_trivia()) {
            self.bump_any();
        }
    }

    fn bump(&mut self) {
        self.eat_trivia();
        self.bump_any();
    }

    fn bump_any(&mut self) {
        if let Some(token) = self.tokens.pop_front() {
            self.builder.token(token.kind.into(), token.text(self.input));
        }
    }

    fn expect(&mut self, kind: SyntaxKind, message: &str) -> bool {
        self.expect_any(&[kind], message)
    }

    fn expect_any(&mut self, kinds: &[SyntaxKind], message: &str) -> bool {
        if kinds.contains(&self.current()) {
            self.bump();
            true
        } else {
            self.error_here(message);
            false
        }
    }

    fn error_here(&mut self, message: &str) {
        let range = self.current_range();
        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    fn current_range(&self) -> TextRange {
        self.tokens
            .iter()
            .find(|token| !token.kind.is_trivia())
            .map(|token| token.range)
            .unwrap_or_else(|| TextRange::empty(TextSize::of(self.input)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeContext {
    Declaration,
    /// After `as`/`is`, where `?` may start a conditional expression instead.
    Expression,
}

impl TypeContext {
    fn accepts_nullable(self, after_question: SyntaxKind) -> bool {
        match self {
            TypeContext::Declaration => true,
            TypeContext::Expression => matches!(
                after_question,
                SyntaxKind::RParen
                    | SyntaxKind::Semicolon
                    | SyntaxKind::Comma
                    | SyntaxKind::RBracket
                    | SyntaxKind::RBrace
                    | SyntaxKind::Eof
            ),
        }
    }
}

const RELATIONAL_BP: (u8, u8) = (50, 51);
const CONDITIONAL_BP: (u8, u8) = (4, 3);

fn infix_binding_power(op: SyntaxKind) -> Option<(u8, u8, SyntaxKind)> {
    // Returns (left_bp, right_bp, node_kind); larger binds tighter.
    let (l, r, kind) = match op {
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => {
            (70, 71, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::Plus | SyntaxKind::Minus => (60, 61, SyntaxKind::BinaryExpression),
        SyntaxKind::Less | SyntaxKind::LessEq | SyntaxKind::Greater | SyntaxKind::GreaterEq => {
            (RELATIONAL_BP.0, RELATIONAL_BP.1, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::EqEq | SyntaxKind::BangEq => (45, 46, SyntaxKind::BinaryExpression),
        SyntaxKind::Amp => (40, 41, SyntaxKind::BinaryExpression),
        SyntaxKind::Caret => (39, 40, SyntaxKind::BinaryExpression),
        SyntaxKind::Pipe => (38, 39, SyntaxKind::BinaryExpression),
        SyntaxKind::AmpAmp => (30, 31, SyntaxKind::BinaryExpression),
        SyntaxKind::PipePipe => (20, 21, SyntaxKind::BinaryExpression),
        // Right-associative.
        SyntaxKind::QuestionQuestion => (11, 10, SyntaxKind::BinaryExpression),
        kind if kind.is_assignment_operator() => (1, 0, SyntaxKind::AssignmentExpression),
        _ => return None,
    };
    Some((l, r, kind))
}

fn can_start_expression(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || kind.is_predefined_type()
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::ThisKw
                | SyntaxKind::BaseKw
                | SyntaxKind::NewKw
                | SyntaxKind::LParen
                | SyntaxKind::Plus
                | SyntaxKind::Minus
                | SyntaxKind::Bang
                | SyntaxKind::Tilde
                | SyntaxKind::PlusPlus
                | SyntaxKind::MinusMinus
        )
}

/// Tokens an expression error must not swallow so enclosing constructs can
/// still close.
fn at_expression_boundary(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Semicolon
            | SyntaxKind::Comma
            | SyntaxKind::RParen
            | SyntaxKind::RBracket
            | SyntaxKind::RBrace
            | SyntaxKind::Colon
            | SyntaxKind::Eof
    )
}

/// Indented tree dump used by tests and debugging.
pub fn debug_dump(node: &SyntaxNode) -> String {
    fn go(node: &SyntaxNode, indent: usize, out: &mut String) {
        use std::fmt::Write;
        let _ = writeln!(out, "{:indent$}{:?}", "", node.kind(), indent = indent);
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => go(&n, indent + 2, out),
                NodeOrToken::Token(t) => {
                    let _ = writeln!(
                        out,
                        "{:indent$}{:?} {:?}",
                        "",
                        t.kind(),
                        t.text(),
                        indent = indent + 2
                    );
                }
            }
        }
    }

    let mut out = String::new();
    go(node, 0, &mut out);
    out
}
