//! cssprite - CSS sprite generator
//!
//! Finds `background: url(<group>.<name>.png)` declarations in a
//! stylesheet, merges each group's images into one PNG sprite named after
//! a hash of its contents, and rewrites the declarations to point into
//! the sprite. Everything else in the stylesheet is kept byte for byte.

pub mod cli;
pub mod css;
pub mod error;
pub mod manifest;
pub mod output;
pub mod service;
pub mod sprite;

pub use css::{Stylesheet, Token, TokenKind};
pub use error::{ErrorKind, Result, SpriteError};
pub use manifest::{Manifest, StylesheetEntry};
pub use service::{FileService, MemoryService, ResourceService};
pub use sprite::{Generated, GroupPlan, Placement, Plan, SpriteSheet, Spriter};
