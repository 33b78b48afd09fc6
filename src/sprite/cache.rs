//! Memoized image loading.

use std::collections::HashMap;
use std::io::Read;
use std::rc::Rc;

use image::{ImageFormat, RgbaImage};

use crate::error::{Result, SpriteError};
use crate::service::ResourceService;

/// A decoded source image.
#[derive(Debug)]
pub struct LoadedImage {
    pub filename: String,
    pub pixels: RgbaImage,
}

impl LoadedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Images decoded during one generation run, keyed by filename.
///
/// Every reference to the same filename gets the same shared
/// [`LoadedImage`]; the resource is opened and decoded at most once.
#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<String, Rc<LoadedImage>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct images decoded so far.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Load `filename` through `service`, or return the cached image.
    pub fn load<S: ResourceService + ?Sized>(
        &mut self,
        service: &S,
        filename: &str,
    ) -> Result<Rc<LoadedImage>> {
        if let Some(image) = self.images.get(filename) {
            return Ok(Rc::clone(image));
        }

        let image = Rc::new(decode(service, filename)?);
        self.images.insert(filename.to_string(), Rc::clone(&image));
        Ok(image)
    }
}

fn decode<S: ResourceService + ?Sized>(service: &S, filename: &str) -> Result<LoadedImage> {
    let mut reader = service.open_image(filename).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SpriteError::ImageNotFound {
            name: filename.to_string(),
            help: Some(e.to_string()),
        },
        _ => SpriteError::Read {
            path: filename.into(),
            message: e.to_string(),
        },
    })?;

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| SpriteError::Read {
        path: filename.into(),
        message: e.to_string(),
    })?;
    drop(reader);

    let pixels = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .map_err(|e| SpriteError::ImageDecode {
            name: filename.to_string(),
            message: e.to_string(),
        })?
        .to_rgba8();

    Ok(LoadedImage {
        filename: filename.to_string(),
        pixels,
    })
}
