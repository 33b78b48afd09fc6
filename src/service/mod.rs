//! Resource I/O for the sprite engine.
//!
//! The engine never touches storage itself. It asks a [`ResourceService`]
//! to open source images and to create sprite outputs, so the same engine
//! can run against the filesystem, an archive, or memory.
//!
//! Handles are plain boxed readers and writers; dropping them releases the
//! underlying resource on every path, success or failure.

mod file;
mod memory;

use std::io::{self, Read, Write};

pub use file::FileService;
pub use memory::MemoryService;

/// Storage capability supplied by the caller.
pub trait ResourceService {
    /// Open a source image by the name it has in the stylesheet.
    ///
    /// Returns an error of kind [`io::ErrorKind::NotFound`] when no such
    /// image exists.
    fn open_image(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;

    /// Create (or truncate) a sprite output, named relative to the output
    /// stylesheet.
    fn create_sprite(&self, name: &str) -> io::Result<Box<dyn Write + '_>>;
}

impl<S: ResourceService + ?Sized> ResourceService for &S {
    fn open_image(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        (**self).open_image(name)
    }

    fn create_sprite(&self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        (**self).create_sprite(name)
    }
}
