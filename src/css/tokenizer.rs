//! Lossless stylesheet tokenizer.
//!
//! Splits stylesheet text into tokens shaped after CSS Syntax Level 3.
//! Tokens only record byte spans, and those spans tile the input exactly,
//! so concatenating every token's text reproduces the source byte for byte.

use miette::NamedSource;

use crate::error::{Result, SpriteError};

use super::span::{offset_to_location, Span};

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    Comment,
    Ident,
    /// An identifier immediately followed by `(`; the span includes the paren.
    Function,
    AtKeyword,
    Hash,
    String,
    /// A complete `url(...)` form, quoted or not.
    Url,
    Number,
    Percentage,
    Dimension,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    Colon,
    Semicolon,
    Comma,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Delim,
}

impl TokenKind {
    /// Whitespace and comments carry no meaning for declarations.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

/// A single token: its kind and where it sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Tokenize stylesheet text.
///
/// Fails on unterminated comments, strings and `url(` forms.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    tokenize_named("stylesheet", source)
}

/// Tokenize stylesheet text, naming the source in error reports.
pub fn tokenize_named(name: &str, source: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while lexer.pos < lexer.bytes.len() {
        let start = lexer.pos;
        let kind = lexer
            .next_kind()
            .map_err(|fault| fault.into_error(name, source))?;
        tokens.push(Token {
            kind,
            span: Span::new(start, lexer.pos),
        });
    }

    Ok(tokens)
}

/// A lexing failure before it is attached to its source text.
struct Fault {
    message: &'static str,
    span: Span,
}

impl Fault {
    fn into_error(self, name: &str, source: &str) -> SpriteError {
        let location = offset_to_location(source, self.span.start);
        SpriteError::Syntax {
            message: self.message.to_string(),
            location: location.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: self.span.into(),
        }
    }
}

struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn starts_with(&self, pattern: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(pattern)
    }

    fn next_kind(&mut self) -> std::result::Result<TokenKind, Fault> {
        let b = self.bytes[self.pos];

        if is_whitespace(b) {
            while self.peek(0).is_some_and(is_whitespace) {
                self.pos += 1;
            }
            return Ok(TokenKind::Whitespace);
        }

        if self.starts_with(b"/*") {
            return self.consume_comment();
        }

        if b == b'"' || b == b'\'' {
            self.consume_string()?;
            return Ok(TokenKind::String);
        }

        if self.starts_with(b"<!--") {
            self.pos += 4;
            return Ok(TokenKind::Cdo);
        }

        if self.starts_with(b"-->") {
            self.pos += 3;
            return Ok(TokenKind::Cdc);
        }

        if self.starts_number(0) {
            return Ok(self.consume_numeric());
        }

        if self.starts_ident(0) {
            return self.consume_ident_like();
        }

        match b {
            b'#' if self.peek(1).is_some_and(is_name_char) || self.valid_escape(1) => {
                self.pos += 1;
                self.consume_name();
                Ok(TokenKind::Hash)
            }
            b'@' if self.starts_ident(1) => {
                self.pos += 1;
                self.consume_name();
                Ok(TokenKind::AtKeyword)
            }
            b':' => self.single(TokenKind::Colon),
            b';' => self.single(TokenKind::Semicolon),
            b',' => self.single(TokenKind::Comma),
            b'{' => self.single(TokenKind::OpenBrace),
            b'}' => self.single(TokenKind::CloseBrace),
            b'(' => self.single(TokenKind::OpenParen),
            b')' => self.single(TokenKind::CloseParen),
            b'[' => self.single(TokenKind::OpenBracket),
            b']' => self.single(TokenKind::CloseBracket),
            _ => {
                self.pos += char_len(b);
                Ok(TokenKind::Delim)
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> std::result::Result<TokenKind, Fault> {
        self.pos += 1;
        Ok(kind)
    }

    fn consume_comment(&mut self) -> std::result::Result<TokenKind, Fault> {
        let start = self.pos;
        let body = &self.bytes[start + 2..];
        match body.windows(2).position(|w| w == b"*/") {
            Some(end) => {
                self.pos = start + 2 + end + 2;
                Ok(TokenKind::Comment)
            }
            None => Err(Fault {
                message: "unterminated comment",
                span: Span::new(start, self.bytes.len()),
            }),
        }
    }

    /// Consume a quoted string, starting at the opening quote.
    fn consume_string(&mut self) -> std::result::Result<(), Fault> {
        let start = self.pos;
        let quote = self.bytes[start];
        self.pos += 1;

        loop {
            match self.peek(0) {
                None | Some(b'\n') | Some(b'\r') | Some(0x0C) => {
                    return Err(Fault {
                        message: "unterminated string",
                        span: Span::new(start, self.pos),
                    });
                }
                Some(b) if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(b'\\') => match self.peek(1) {
                    None => self.pos += 1,
                    // escaped newline continues the string
                    Some(b'\r') if self.peek(2) == Some(b'\n') => self.pos += 3,
                    Some(next) => self.pos += 1 + char_len(next),
                },
                Some(b) => self.pos += char_len(b),
            }
        }
    }

    fn consume_numeric(&mut self) -> TokenKind {
        if matches!(self.peek(0), Some(b'+') | Some(b'-')) {
            self.pos += 1;
        }
        self.consume_digits();
        if self.peek(0) == Some(b'.') && self.peek(1).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            self.consume_digits();
        }
        if matches!(self.peek(0), Some(b'e') | Some(b'E')) {
            let digit_at = if matches!(self.peek(1), Some(b'+') | Some(b'-')) { 2 } else { 1 };
            if self.peek(digit_at).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += digit_at;
                self.consume_digits();
            }
        }

        if self.peek(0) == Some(b'%') {
            self.pos += 1;
            TokenKind::Percentage
        } else if self.starts_ident(0) {
            self.consume_name();
            TokenKind::Dimension
        } else {
            TokenKind::Number
        }
    }

    fn consume_digits(&mut self) {
        while self.peek(0).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn consume_ident_like(&mut self) -> std::result::Result<TokenKind, Fault> {
        let start = self.pos;
        self.consume_name();

        if self.peek(0) != Some(b'(') {
            return Ok(TokenKind::Ident);
        }

        let name = &self.bytes[start..self.pos];
        self.pos += 1;
        if name.eq_ignore_ascii_case(b"url") {
            self.consume_url(start)?;
            Ok(TokenKind::Url)
        } else {
            Ok(TokenKind::Function)
        }
    }

    /// Consume the remainder of a `url(` form, up to and including `)`.
    fn consume_url(&mut self, start: usize) -> std::result::Result<(), Fault> {
        let malformed = |end: usize| Fault {
            message: "malformed url()",
            span: Span::new(start, end),
        };

        self.skip_whitespace();

        if matches!(self.peek(0), Some(b'"') | Some(b'\'')) {
            self.consume_string()?;
            self.skip_whitespace();
            return match self.peek(0) {
                Some(b')') => {
                    self.pos += 1;
                    Ok(())
                }
                None => Err(Fault {
                    message: "unterminated url()",
                    span: Span::new(start, self.pos),
                }),
                Some(_) => Err(malformed(self.pos)),
            };
        }

        loop {
            match self.peek(0) {
                None => {
                    return Err(Fault {
                        message: "unterminated url()",
                        span: Span::new(start, self.pos),
                    })
                }
                Some(b')') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(b) if is_whitespace(b) => {
                    self.skip_whitespace();
                    if self.peek(0) == Some(b')') {
                        self.pos += 1;
                        return Ok(());
                    }
                    return Err(malformed(self.pos));
                }
                Some(b'"') | Some(b'\'') | Some(b'(') => return Err(malformed(self.pos + 1)),
                Some(b'\\') if self.valid_escape(0) => self.consume_escape(),
                Some(b'\\') => return Err(malformed(self.pos + 1)),
                Some(b) => self.pos += char_len(b),
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek(0).is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    fn consume_name(&mut self) {
        loop {
            match self.peek(0) {
                Some(b) if is_name_char(b) => self.pos += 1,
                Some(b'\\') if self.valid_escape(0) => self.consume_escape(),
                _ => return,
            }
        }
    }

    /// Consume a `\` escape; the caller has checked it is valid.
    fn consume_escape(&mut self) {
        self.pos += 1;
        let mut hex = 0;
        while hex < 6 && self.peek(0).is_some_and(|b| b.is_ascii_hexdigit()) {
            self.pos += 1;
            hex += 1;
        }
        if hex == 0 {
            if let Some(b) = self.peek(0) {
                self.pos += char_len(b);
            }
            return;
        }
        if self.starts_with(b"\r\n") {
            self.pos += 2;
        } else if self.peek(0).is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    fn valid_escape(&self, ahead: usize) -> bool {
        self.peek(ahead) == Some(b'\\')
            && self
                .peek(ahead + 1)
                .is_some_and(|b| !matches!(b, b'\n' | b'\r' | 0x0C))
    }

    fn starts_ident(&self, ahead: usize) -> bool {
        match self.peek(ahead) {
            Some(b'-') => {
                self.peek(ahead + 1)
                    .is_some_and(|b| b == b'-' || is_name_start(b))
                    || self.valid_escape(ahead + 1)
            }
            Some(b) if is_name_start(b) => true,
            Some(b'\\') => self.valid_escape(ahead),
            _ => false,
        }
    }

    fn starts_number(&self, ahead: usize) -> bool {
        let digit = |i: usize| self.peek(i).is_some_and(|b| b.is_ascii_digit());
        match self.peek(ahead) {
            Some(b'+') | Some(b'-') => {
                digit(ahead + 1) || (self.peek(ahead + 1) == Some(b'.') && digit(ahead + 2))
            }
            Some(b'.') => digit(ahead + 1),
            Some(b) => b.is_ascii_digit(),
            None => false,
        }
    }
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit() || b == b'-'
}

/// Byte length of the UTF-8 sequence introduced by `lead`.
fn char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        // continuation bytes never start a token in valid UTF-8
        _ => 1,
    }
}
