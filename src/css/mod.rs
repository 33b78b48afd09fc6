//! Stylesheet tokenizing and serialization.
//!
//! The sprite engine needs two things from a stylesheet: handles to
//! individual tokens that it can overwrite, and a serializer that writes
//! every untouched byte back exactly as it was read.
//!
//! # Usage
//!
//! ```ignore
//! use cssprite::css::Stylesheet;
//!
//! let mut sheet = Stylesheet::parse(".a { background: url(x.png) }")?;
//! let decl = sheet.declarations().remove(0);
//! sheet.replace(decl.value[0], "url(y.png)");
//! assert_eq!(sheet.to_css(), ".a { background: url(y.png) }");
//! ```

pub mod span;
mod stylesheet;
mod tokenizer;

pub use span::{offset_to_location, Location, Span};
pub use stylesheet::{Declaration, Stylesheet, TokenId};
pub use tokenizer::{tokenize, tokenize_named, Token, TokenKind};
