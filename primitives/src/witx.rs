//! WITX function-declaration parser.
//!
//! Reads the subset of the witx-bindgen grammar this module publishes:
//!
//! ```text
//! name: function(arg: type, ...) -> type
//! ```
//!
//! Types are `s64` and `list<s64>`. Names may be bare identifiers or
//! `"quoted"`, argument lists may end with a trailing comma, a single result
//! may be wrapped in parentheses, and `//` starts a line comment.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{DfError, DfResult};
use crate::interface::{FunctionSig, ValueType};

/// A function declaration read from WITX text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitxFunction {
    pub name: String,
    pub params: Vec<(String, ValueType)>,
    pub result: ValueType,
}

impl PartialEq<FunctionSig> for WitxFunction {
    fn eq(&self, sig: &FunctionSig) -> bool {
        self.name == sig.name
            && self.result == sig.result
            && self.params.len() == sig.params.len()
            && self
                .params
                .iter()
                .zip(sig.params)
                .all(|((name, ty), p)| name == p.name && *ty == p.ty)
    }
}

/// Parse every function declaration in `src`, in order.
pub fn parse_witx(src: &str) -> DfResult<Vec<WitxFunction>> {
    let tokens = tokenize(src)?;
    let mut parser = Parser { tokens, pos: 0 };
    let mut functions: Vec<WitxFunction> = Vec::new();
    while !parser.at_end() {
        let line = parser.line();
        let function = parser.function()?;
        if functions.iter().any(|f| f.name == function.name) {
            return Err(DfError::Parse { line, reason: "duplicate function" });
        }
        functions.push(function);
    }
    Ok(functions)
}

// ── Lexer ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Colon,
    Comma,
    LParen,
    RParen,
    Lt,
    Gt,
    Arrow,
}

fn tokenize(src: &str) -> DfResult<Vec<(Token<'_>, usize)>> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let token = match c {
            b'\n' => {
                line += 1;
                i += 1;
                continue;
            }
            c if c.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b':' => Token::Colon,
            b',' => Token::Comma,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'<' => Token::Lt,
            b'>' => Token::Gt,
            b'-' if bytes.get(i + 1) == Some(&b'>') => {
                tokens.push((Token::Arrow, line));
                i += 2;
                continue;
            }
            b'"' => {
                let start = i + 1;
                let end = src[start..]
                    .find(|ch: char| ch == '"' || ch == '\n')
                    .map(|n| start + n)
                    .filter(|&end| bytes[end] == b'"' && end > start)
                    .ok_or(DfError::Parse { line, reason: "unterminated quoted name" })?;
                tokens.push((Token::Ident(&src[start..end]), line));
                i = end + 1;
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let start = i;
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'-')
                {
                    // `-` belongs to the name unless it opens `->`.
                    if bytes[i] == b'-' && bytes.get(i + 1) == Some(&b'>') {
                        break;
                    }
                    i += 1;
                }
                tokens.push((Token::Ident(&src[start..i]), line));
                continue;
            }
            _ => return Err(DfError::Parse { line, reason: "unexpected character" }),
        };
        tokens.push((token, line));
        i += 1;
    }
    Ok(tokens)
}

// ── Parser ──

struct Parser<'a> {
    tokens: Vec<(Token<'a>, usize)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |&(_, line)| line)
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).map(|&(token, _)| token)
    }

    fn eat(&mut self, token: Token<'a>) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token<'a>, reason: &'static str) -> DfResult<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(reason))
        }
    }

    fn ident(&mut self, reason: &'static str) -> DfResult<&'a str> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error(reason)),
        }
    }

    fn error(&self, reason: &'static str) -> DfError {
        DfError::Parse { line: self.line(), reason }
    }

    fn function(&mut self) -> DfResult<WitxFunction> {
        let name = self.ident("expected function name")?;
        self.expect(Token::Colon, "expected `:` after function name")?;
        if self.ident("expected `function`")? != "function" {
            return Err(DfError::Parse {
                line: self.tokens[self.pos - 1].1,
                reason: "expected `function`",
            });
        }
        self.expect(Token::LParen, "expected `(`")?;

        let mut params = Vec::new();
        while !self.eat(Token::RParen) {
            let arg = self.ident("expected argument name")?;
            self.expect(Token::Colon, "expected `:` after argument name")?;
            let ty = self.value_type()?;
            params.push((String::from(arg), ty));
            if !self.eat(Token::Comma) {
                self.expect(Token::RParen, "expected `,` or `)`")?;
                break;
            }
        }

        if !self.eat(Token::Arrow) {
            return Err(self.error("expected `->` and a result type"));
        }
        let result = if self.eat(Token::LParen) {
            let ty = self.value_type()?;
            self.eat(Token::Comma);
            self.expect(Token::RParen, "only a single result is supported")?;
            ty
        } else {
            self.value_type()?
        };

        Ok(WitxFunction {
            name: String::from(name),
            params,
            result,
        })
    }

    fn value_type(&mut self) -> DfResult<ValueType> {
        match self.ident("expected a type")? {
            "s64" => Ok(ValueType::S64),
            "list" => {
                self.expect(Token::Lt, "expected `<` after `list`")?;
                if self.ident("expected list element type")? != "s64" {
                    return Err(self.error("unsupported list element type"));
                }
                self.expect(Token::Gt, "expected `>`")?;
                Ok(ValueType::ListS64)
            }
            _ => Err(DfError::Parse {
                line: self.tokens[self.pos - 1].1,
                reason: "unsupported type",
            }),
        }
    }
}
