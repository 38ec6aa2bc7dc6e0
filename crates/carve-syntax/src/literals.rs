use std::ops::Range;

use crate::syntax_kind::SyntaxKind;

/// A compile-time value that can be spelled as source text.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i128),
    Real(f64),
    Char(char),
    String(String),
    Bool(bool),
    Null,
}

impl LiteralValue {
    /// Source spelling of the value, or `None` when no literal can express
    /// it (non-finite reals).
    pub fn to_source(&self) -> Option<String> {
        Some(match self {
            LiteralValue::Integer(value) => value.to_string(),
            LiteralValue::Real(value) if !value.is_finite() => return None,
            LiteralValue::Real(value) => format!("{value:?}"),
            LiteralValue::Char(c) => {
                let mut out = String::from("'");
                escape_into(*c, '\'', &mut out);
                out.push('\'');
                out
            }
            LiteralValue::String(s) => {
                let mut out = String::from("\"");
                for c in s.chars() {
                    escape_into(c, '"', &mut out);
                }
                out.push('"');
                out
            }
            LiteralValue::Bool(true) => "true".to_string(),
            LiteralValue::Bool(false) => "false".to_string(),
            LiteralValue::Null => "null".to_string(),
        })
    }
}

fn escape_into(c: char, quote: char, out: &mut String) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c => out.push(c),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LiteralError {
    pub message: String,
    /// Byte range within the literal text (not file offsets).
    pub span: Range<usize>,
}

fn err(message: impl Into<String>, span: Range<usize>) -> LiteralError {
    LiteralError {
        message: message.into(),
        span,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Decimal,
    Hexadecimal,
}

impl Radix {
    fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }
}

/// A parsed integer literal token such as `0x1A`, `1_000` or `7UL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub value: u64,
    pub radix: Radix,
    /// Type suffix exactly as written (`""`, `"u"`, `"L"`, `"UL"`, ...).
    pub suffix: String,
}

impl IntegerLiteral {
    /// Spell the same value in decimal, keeping the suffix.
    pub fn to_decimal(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }

    /// Spell the same value in hexadecimal (`0x` prefix, upper-case digits),
    /// keeping the suffix.
    pub fn to_hexadecimal(&self) -> String {
        format!("0x{:X}{}", self.value, self.suffix)
    }
}

pub fn parse_integer_literal(text: &str) -> Result<IntegerLiteral, LiteralError> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return Err(err("Empty integer literal", 0..0));
    }

    let suffix_start = bytes
        .iter()
        .rposition(|b| !matches!(b, b'u' | b'U' | b'l' | b'L'))
        .map_or(0, |idx| idx + 1);
    let suffix = &text[suffix_start..];
    if suffix.len() > 2 || (suffix.len() == 2 && suffix[..1].eq_ignore_ascii_case(&suffix[1..])) {
        return Err(err("Invalid integer suffix", suffix_start..bytes.len()));
    }

    let (radix, prefix_len) = integer_radix(bytes, suffix_start);
    let value = parse_unsigned_integer(bytes, prefix_len, suffix_start, radix)?;
    Ok(IntegerLiteral {
        value,
        radix,
        suffix: suffix.to_string(),
    })
}

fn integer_radix(bytes: &[u8], end: usize) -> (Radix, usize) {
    if end >= 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (Radix::Hexadecimal, 2),
            b'b' | b'B' => return (Radix::Binary, 2),
            _ => {}
        }
    }
    (Radix::Decimal, 0)
}

fn parse_unsigned_integer(
    bytes: &[u8],
    prefix_len: usize,
    end: usize,
    radix: Radix,
) -> Result<u64, LiteralError> {
    if end == prefix_len {
        return Err(err("Missing digits", prefix_len..end));
    }
    if bytes[end - 1] == b'_' {
        return Err(err(
            "Trailing underscore is not allowed in numeric literal",
            end - 1..end,
        ));
    }

    let base = radix.base();
    let mut value: u64 = 0;
    let mut seen_digit = false;
    for (idx, &b) in bytes[..end].iter().enumerate().skip(prefix_len) {
        if b == b'_' {
            continue;
        }
        let digit = (b as char).to_digit(base).ok_or_else(|| {
            err(
                format!("Invalid digit `{}` in {radix:?} literal", b as char),
                idx..idx + 1,
            )
        })?;
        seen_digit = true;
        value = value
            .checked_mul(u64::from(base))
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or_else(|| err("Integer literal is too large", 0..end))?;
    }

    if !seen_digit {
        return Err(err("Missing digits", prefix_len..end));
    }
    Ok(value)
}

/// Parse a literal token into its value. Only integer, boolean and `null`
/// literals are supported; other kinds report an error.
pub fn parse_literal(kind: SyntaxKind, text: &str) -> Result<LiteralValue, LiteralError> {
    match kind {
        SyntaxKind::IntLiteral => Ok(LiteralValue::Integer(i128::from(
            parse_integer_literal(text)?.value,
        ))),
        SyntaxKind::TrueKw => Ok(LiteralValue::Bool(true)),
        SyntaxKind::FalseKw => Ok(LiteralValue::Bool(false)),
        SyntaxKind::NullKw => Ok(LiteralValue::Null),
        _ => Err(err(
            format!("Unsupported literal kind: {kind:?}"),
            0..text.len(),
        )),
    }
}
