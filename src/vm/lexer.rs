use crate::vm::error::ExecutionError;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i64),
    Decimal(Decimal),
    Str(String),
    /// Bare word: `null`, `true`, `false`, `arguments`
    Ident(String),
    /// `$NAME`, without the prefix
    Func(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    EqEq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    NullSafeEq,
}

/// A token and the byte offset it starts at.
pub type Spanned = (usize, Token);

pub fn tokenize(script: &str) -> Result<Vec<Spanned>, ExecutionError> {
    let bytes = script.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let c = bytes[pos];

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let token = match c {
            b'(' => single(&mut pos, Token::LParen),
            b')' => single(&mut pos, Token::RParen),
            b'[' => single(&mut pos, Token::LBracket),
            b']' => single(&mut pos, Token::RBracket),
            b',' => single(&mut pos, Token::Comma),
            b'+' => single(&mut pos, Token::Plus),
            b'-' => single(&mut pos, Token::Minus),
            b'*' => single(&mut pos, Token::Star),
            b'/' => single(&mut pos, Token::Slash),
            b'%' => single(&mut pos, Token::Percent),
            b'=' if bytes.get(pos + 1) == Some(&b'=') => {
                pos += 2;
                Token::EqEq
            }
            b'!' if bytes.get(pos + 1) == Some(&b'=') => {
                pos += 2;
                Token::NotEq
            }
            b'!' => single(&mut pos, Token::Bang),
            b'<' => {
                if script[pos..].starts_with("<=>") {
                    pos += 3;
                    Token::NullSafeEq
                } else if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    Token::Lte
                } else {
                    single(&mut pos, Token::Lt)
                }
            }
            b'>' if bytes.get(pos + 1) == Some(&b'=') => {
                pos += 2;
                Token::Gte
            }
            b'>' => single(&mut pos, Token::Gt),
            b'\'' => lex_string(script, &mut pos)?,
            b'$' => {
                pos += 1;
                let name = take_word(bytes, &mut pos);
                if name.is_empty() {
                    return Err(ExecutionError::syntax(start, "expected function name after '$'"));
                }
                Token::Func(name.to_string())
            }
            c if c.is_ascii_digit() => lex_number(script, &mut pos)?,
            c if c.is_ascii_alphabetic() || c == b'_' => {
                Token::Ident(take_word(bytes, &mut pos).to_string())
            }
            _ => {
                let unexpected = script[pos..].chars().next().unwrap_or_default();
                return Err(ExecutionError::syntax(
                    start,
                    format!("unexpected character '{unexpected}'"),
                ));
            }
        };

        tokens.push((start, token));
    }

    Ok(tokens)
}

fn single(pos: &mut usize, token: Token) -> Token {
    *pos += 1;
    token
}

fn take_word<'a>(bytes: &'a [u8], pos: &mut usize) -> &'a str {
    let start = *pos;
    while *pos < bytes.len() && (bytes[*pos].is_ascii_alphanumeric() || bytes[*pos] == b'_') {
        *pos += 1;
    }
    // ASCII-only slice, always valid UTF-8
    std::str::from_utf8(&bytes[start..*pos]).unwrap_or_default()
}

fn lex_number(script: &str, pos: &mut usize) -> Result<Token, ExecutionError> {
    let bytes = script.as_bytes();
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }

    let is_decimal = bytes.get(*pos) == Some(&b'.')
        && bytes.get(*pos + 1).is_some_and(u8::is_ascii_digit);
    if is_decimal {
        *pos += 1;
        while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
            *pos += 1;
        }
    }

    let text = &script[start..*pos];
    if !is_decimal {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Token::Int(i));
        }
    }

    // integers wider than i64 fall back to decimal
    Decimal::from_str(text)
        .map(Token::Decimal)
        .map_err(|e| ExecutionError::syntax(start, format!("invalid number {text}: {e}")))
}

fn lex_string(script: &str, pos: &mut usize) -> Result<Token, ExecutionError> {
    let start = *pos;
    let mut chars = script[start + 1..].char_indices();
    let mut out = String::new();

    while let Some((i, c)) = chars.next() {
        match c {
            '\'' => {
                *pos = start + 1 + i + 1;
                return Ok(Token::Str(out));
            }
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 't')) => out.push('\t'),
                Some((_, '0')) => out.push('\0'),
                Some((_, other)) => out.push(other),
                None => break,
            },
            c => out.push(c),
        }
    }

    Err(ExecutionError::syntax(start, "unterminated string literal"))
}
