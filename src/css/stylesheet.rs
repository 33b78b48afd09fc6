//! Owned token arena with in-place value replacement.
//!
//! A [`Stylesheet`] owns its source text and token list. Callers hold
//! [`TokenId`] handles into it, record replacements by handle, and serialize
//! once at the end. Untouched tokens are written back from the original
//! source slice, so they come out byte-identical.

use std::collections::HashMap;

use crate::error::Result;

use super::tokenizer::{tokenize_named, Token, TokenKind};

/// Handle to a token inside a [`Stylesheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(usize);

impl TokenId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A `property: value` pair found in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The property name token.
    pub property: TokenId,
    /// Significant value tokens, with whitespace and comments skipped.
    pub value: Vec<TokenId>,
}

/// A tokenized stylesheet.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    source: String,
    tokens: Vec<Token>,
    replacements: HashMap<TokenId, String>,
}

impl Stylesheet {
    /// Tokenize stylesheet text.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        Self::parse_named("stylesheet", source)
    }

    /// Tokenize stylesheet text, naming it in error reports.
    pub fn parse_named(name: &str, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let tokens = tokenize_named(name, &source)?;
        Ok(Self {
            source,
            tokens,
            replacements: HashMap::new(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn kind(&self, id: TokenId) -> TokenKind {
        self.tokens[id.0].kind
    }

    /// Original text of a token, ignoring any replacement.
    pub fn text(&self, id: TokenId) -> &str {
        self.tokens[id.0].span.slice(&self.source)
    }

    /// Replace the text a token serializes to.
    pub fn replace(&mut self, id: TokenId, text: impl Into<String>) {
        self.replacements.insert(id, text.into());
    }

    pub fn is_replaced(&self, id: TokenId) -> bool {
        self.replacements.contains_key(&id)
    }

    /// Serialize the stream, applying replacements.
    pub fn to_css(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        for (index, token) in self.tokens.iter().enumerate() {
            match self.replacements.get(&TokenId(index)) {
                Some(text) => out.push_str(text),
                None => out.push_str(token.span.slice(&self.source)),
            }
        }
        out
    }

    /// Find every declaration in the stream, in source order.
    ///
    /// A declaration is an identifier followed by `:` whose value ends at a
    /// `;` or `}` on the same nesting level (or at end of input). Runs that
    /// end at `{` or at an unbalanced `)` are selectors or media features,
    /// not declarations, and are skipped.
    pub fn declarations(&self) -> Vec<Declaration> {
        let mut found = Vec::new();
        let mut index = 0;

        while index < self.tokens.len() {
            if self.tokens[index].kind != TokenKind::Ident {
                index += 1;
                continue;
            }

            let colon = self.next_significant(index + 1);
            if colon.map(|c| self.tokens[c].kind) != Some(TokenKind::Colon) {
                index += 1;
                continue;
            }

            let mut cursor = colon.map_or(index + 1, |c| c + 1);
            let mut depth = 0usize;
            let mut value = Vec::new();
            let mut terminated = true;

            while cursor < self.tokens.len() {
                let kind = self.tokens[cursor].kind;
                match kind {
                    TokenKind::Semicolon | TokenKind::CloseBrace if depth == 0 => break,
                    TokenKind::OpenBrace => {
                        terminated = false;
                        break;
                    }
                    TokenKind::CloseParen | TokenKind::CloseBracket if depth == 0 => {
                        terminated = false;
                        break;
                    }
                    TokenKind::Function | TokenKind::OpenParen | TokenKind::OpenBracket => {
                        depth += 1
                    }
                    TokenKind::CloseParen | TokenKind::CloseBracket => depth -= 1,
                    _ => {}
                }
                if !kind.is_trivia() {
                    value.push(TokenId(cursor));
                }
                cursor += 1;
            }

            if terminated {
                found.push(Declaration {
                    property: TokenId(index),
                    value,
                });
            }
            index = cursor;
        }

        found
    }

    fn next_significant(&self, from: usize) -> Option<usize> {
        (from..self.tokens.len()).find(|&i| !self.tokens[i].kind.is_trivia())
    }
}
