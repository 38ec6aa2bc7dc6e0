use text_size::{TextRange, TextSize};

use crate::syntax_kind::SyntaxKind;

/// A lexed token; the text lives in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub range: TextRange,
}

/// Tokenize `input`, including trivia. No `Eof` token is produced.
pub fn lex(input: &str) -> Vec<Token> {
    lex_with_errors(input).0
}

pub fn lex_with_errors(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    (tokens, lexer.errors)
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            errors: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.bump();
        }
    }

    fn error(&mut self, start: usize, message: &str) {
        self.errors.push(LexError {
            message: message.to_string(),
            range: range(start, self.pos),
        });
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let start = self.pos;
        let c = self.bump()?;

        let kind = match c {
            c if c.is_whitespace() => {
                self.eat_while(char::is_whitespace);
                SyntaxKind::Whitespace
            }
            '/' if self.peek() == Some('/') => {
                self.eat_while(|c| c != '\n' && c != '\r');
                SyntaxKind::LineComment
            }
            '/' if self.peek() == Some('*') => {
                self.bump();
                match self.rest().find("*/") {
                    Some(end) => self.pos += end + 2,
                    None => {
                        self.pos = self.input.len();
                        self.error(start, "unterminated block comment");
                    }
                }
                SyntaxKind::BlockComment
            }
            '"' => {
                self.string_body(start, false);
                SyntaxKind::StringLiteral
            }
            '@' if self.peek() == Some('"') => {
                self.bump();
                self.string_body(start, true);
                SyntaxKind::StringLiteral
            }
            '\'' => {
                self.char_body(start);
                SyntaxKind::CharLiteral
            }
            '0'..='9' => self.number(c),
            '.' if matches!(self.peek(), Some('0'..='9')) => self.number(c),
            '@' | '_' => self.identifier_or_keyword(start),
            c if unicode_ident::is_xid_start(c) => self.identifier_or_keyword(start),
            _ => self.punctuation(c),
        };

        if kind == SyntaxKind::Error {
            self.error(start, "unexpected character");
        }

        Some(Token {
            kind,
            range: range(start, self.pos),
        })
    }

    fn identifier_or_keyword(&mut self, start: usize) -> SyntaxKind {
        let verbatim = self.input[start..].starts_with('@');
        self.eat_while(|c| c == '_' || unicode_ident::is_xid_continue(c));
        let text = &self.input[start..self.pos];
        if verbatim {
            if text.len() == 1 {
                return SyntaxKind::Error;
            }
            return SyntaxKind::Identifier;
        }
        SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn string_body(&mut self, start: usize, verbatim: bool) {
        loop {
            match self.bump() {
                None => {
                    self.error(start, "unterminated string literal");
                    return;
                }
                Some('"') if verbatim && self.peek() == Some('"') => {
                    self.bump();
                }
                Some('"') => return,
                Some('\\') if !verbatim => {
                    self.bump();
                }
                Some('\n') if !verbatim => {
                    self.pos -= 1;
                    self.error(start, "unterminated string literal");
                    return;
                }
                Some(_) => {}
            }
        }
    }

    fn char_body(&mut self, start: usize) {
        loop {
            match self.bump() {
                None => {
                    self.error(start, "unterminated character literal");
                    return;
                }
                Some('\n') => {
                    self.pos -= 1;
                    self.error(start, "unterminated character literal");
                    return;
                }
                Some('\'') => return,
                Some('\\') => {
                    self.bump();
                }
                Some(_) => {}
            }
        }
    }

    fn number(&mut self, first: char) -> SyntaxKind {
        let is_digit_or_sep = |c: char| c.is_ascii_digit() || c == '_';

        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.bump();
            self.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            self.integer_suffix();
            return SyntaxKind::IntLiteral;
        }
        if first == '0' && matches!(self.peek(), Some('b' | 'B')) {
            self.bump();
            self.eat_while(|c| c == '0' || c == '1' || c == '_');
            self.integer_suffix();
            return SyntaxKind::IntLiteral;
        }

        let mut real = first == '.';
        self.eat_while(is_digit_or_sep);
        if !real && self.peek() == Some('.') && matches!(self.nth(1), Some('0'..='9')) {
            self.bump();
            self.eat_while(is_digit_or_sep);
            real = true;
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_digit = match self.nth(1) {
                Some('+' | '-') => self.nth(2),
                other => other,
            };
            if matches!(exponent_digit, Some('0'..='9')) {
                self.bump();
                let _ = self.eat('+') || self.eat('-');
                self.eat_while(is_digit_or_sep);
                real = true;
            }
        }
        if matches!(self.peek(), Some('f' | 'F' | 'd' | 'D' | 'm' | 'M')) {
            self.bump();
            return SyntaxKind::RealLiteral;
        }
        if real {
            return SyntaxKind::RealLiteral;
        }
        self.integer_suffix();
        SyntaxKind::IntLiteral
    }

    fn integer_suffix(&mut self) {
        match self.peek() {
            Some('u' | 'U') => {
                self.bump();
                let _ = self.eat('l') || self.eat('L');
            }
            Some('l' | 'L') => {
                self.bump();
                let _ = self.eat('u') || self.eat('U');
            }
            _ => {}
        }
    }

    fn punctuation(&mut self, c: char) -> SyntaxKind {
        use SyntaxKind::*;

        match c {
            '(' => LParen,
            ')' => RParen,
            '{' => LBrace,
            '}' => RBrace,
            '[' => LBracket,
            ']' => RBracket,
            ';' => Semicolon,
            ',' => Comma,
            '.' => Dot,
            ':' => Colon,
            '~' => Tilde,
            '?' => {
                if self.eat('?') {
                    if self.eat('=') {
                        QuestionQuestionEq
                    } else {
                        QuestionQuestion
                    }
                } else {
                    Question
                }
            }
            '=' => {
                if self.eat('=') {
                    EqEq
                } else if self.eat('>') {
                    FatArrow
                } else {
                    Eq
                }
            }
            '!' => self.with_eq(Bang, BangEq),
            '<' => self.with_eq(Less, LessEq),
            '>' => self.with_eq(Greater, GreaterEq),
            '*' => self.with_eq(Star, StarEq),
            '/' => self.with_eq(Slash, SlashEq),
            '%' => self.with_eq(Percent, PercentEq),
            '^' => self.with_eq(Caret, CaretEq),
            '+' => {
                if self.eat('+') {
                    PlusPlus
                } else {
                    self.with_eq(Plus, PlusEq)
                }
            }
            '-' => {
                if self.eat('-') {
                    MinusMinus
                } else {
                    self.with_eq(Minus, MinusEq)
                }
            }
            '&' => {
                if self.eat('&') {
                    AmpAmp
                } else {
                    self.with_eq(Amp, AmpEq)
                }
            }
            '|' => {
                if self.eat('|') {
                    PipePipe
                } else {
                    self.with_eq(Pipe, PipeEq)
                }
            }
            _ => Error,
        }
    }

    fn with_eq(&mut self, plain: SyntaxKind, with_eq: SyntaxKind) -> SyntaxKind {
        if self.eat('=') {
            with_eq
        } else {
            plain
        }
    }
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}
