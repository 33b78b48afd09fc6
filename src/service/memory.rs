//! In-memory resource service.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Cursor, Read, Write};

use super::ResourceService;

/// Serves images from memory and captures sprite outputs.
///
/// Counts every `open_image` call per name, which makes it suitable for
/// checking that each image is read only once.
#[derive(Debug, Default)]
pub struct MemoryService {
    images: HashMap<String, Vec<u8>>,
    opens: RefCell<HashMap<String, usize>>,
    sprites: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image, builder style.
    pub fn with_image(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert_image(name, bytes);
        self
    }

    pub fn insert_image(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.images.insert(name.into(), bytes.into());
    }

    /// How many times `name` has been opened (including failed attempts).
    pub fn open_count(&self, name: &str) -> usize {
        self.opens.borrow().get(name).copied().unwrap_or(0)
    }

    /// Bytes written to the sprite `name`, if it was created.
    pub fn sprite(&self, name: &str) -> Option<Vec<u8>> {
        self.sprites.borrow().get(name).cloned()
    }

    /// Names of all created sprites, sorted.
    pub fn sprite_names(&self) -> Vec<String> {
        self.sprites.borrow().keys().cloned().collect()
    }
}

impl ResourceService for MemoryService {
    fn open_image(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        *self.opens.borrow_mut().entry(name.to_string()).or_default() += 1;

        match self.images.get(name) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", name),
            )),
        }
    }

    fn create_sprite(&self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        self.sprites.borrow_mut().insert(name.to_string(), Vec::new());
        Ok(Box::new(MemoryWriter {
            store: &self.sprites,
            name: name.to_string(),
        }))
    }
}

struct MemoryWriter<'a> {
    store: &'a RefCell<BTreeMap<String, Vec<u8>>>,
    name: String,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.store
            .borrow_mut()
            .entry(self.name.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_counts_calls() {
        let service = MemoryService::new().with_image("g1.a.png", b"abc".to_vec());

        let mut s = String::new();
        service
            .open_image("g1.a.png")
            .unwrap()
            .read_to_string(&mut s)
            .unwrap();
        assert_eq!(s, "abc");
        assert_eq!(service.open_count("g1.a.png"), 1);

        assert!(service.open_image("nope.png").is_err());
        assert_eq!(service.open_count("nope.png"), 1);
        assert_eq!(service.open_count("never.png"), 0);
    }

    #[test]
    fn test_create_captures_and_truncates() {
        let service = MemoryService::new();

        service.create_sprite("s.png").unwrap().write_all(b"one").unwrap();
        assert_eq!(service.sprite("s.png").unwrap(), b"one");

        service.create_sprite("s.png").unwrap().write_all(b"two").unwrap();
        assert_eq!(service.sprite("s.png").unwrap(), b"two");
        assert_eq!(service.sprite_names(), vec!["s.png"]);
    }
}
