//! Strip layout and sprite compositing.
//!
//! Members are placed left to right in first-seen order on a single row.
//! Sprite width is the sum of member widths, height is the tallest member.
//! This is intentionally not a bin packer.

use std::io::Cursor;

use image::{imageops, ImageFormat, RgbaImage};

use crate::error::{Result, SpriteError};

use super::cache::LoadedImage;

/// Computed placement of a group's members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripLayout {
    pub width: u32,
    pub height: u32,
    /// Horizontal offset of each member, in input order. Vertical offset is always 0.
    pub offsets: Vec<u32>,
}

/// Lay out images of the given `(width, height)` sizes in a single row.
///
/// Fails when the combined width does not fit in a `u32`.
pub fn layout(sizes: impl IntoIterator<Item = (u32, u32)>) -> Result<StripLayout> {
    let mut width: u32 = 0;
    let mut height = 0;
    let mut offsets = Vec::new();

    for (w, h) in sizes {
        offsets.push(width);
        width = width.checked_add(w).ok_or_else(|| SpriteError::Encode {
            message: format!(
                "sprite would be wider than {} pixels after {} images",
                u32::MAX,
                offsets.len()
            ),
        })?;
        height = height.max(h);
    }

    Ok(StripLayout {
        width,
        height,
        offsets,
    })
}

/// Render `images` into one buffer at the offsets in `layout`.
///
/// Source pixels replace the destination verbatim, alpha included.
pub fn composite(images: &[&LoadedImage], layout: &StripLayout) -> RgbaImage {
    let mut sprite = RgbaImage::new(layout.width, layout.height);

    for (image, &x) in images.iter().zip(&layout.offsets) {
        imageops::replace(&mut sprite, &image.pixels, i64::from(x), 0);
    }

    sprite
}

/// Encode a sprite as PNG.
pub fn encode_png(sprite: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    sprite
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| SpriteError::Encode {
            message: e.to_string(),
        })?;
    Ok(bytes)
}
