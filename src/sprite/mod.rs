//! The sprite generation engine.
//!
//! Generation runs in four phases, each exactly once and in order:
//!
//! 1. **Scan** the stylesheet for `background: url(<group>.<name>.png)`
//!    declarations and group them by `<group>` in first-seen order.
//! 2. **Load** each referenced image through the [`ResourceService`],
//!    decoding every filename at most once.
//! 3. **Composite, name and rewrite** each group: lay members out in a
//!    horizontal strip, encode the sprite as PNG, name it after a hash of
//!    its bytes, write it, and point every member declaration at it.
//! 4. **Serialize** the stylesheet, untouched bytes verbatim.
//!
//! Any error aborts the whole run; no stylesheet text is returned.
//!
//! # Example
//!
//! ```ignore
//! use cssprite::{FileService, Spriter};
//!
//! let service = FileService::new(vec!["css".into()], "dist");
//! let generated = Spriter::new(source, &service).generate()?;
//! std::fs::write("dist/app.css", generated.css)?;
//! ```

pub mod cache;
pub mod compose;
pub mod extract;
pub mod naming;
pub mod rewrite;

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::rc::Rc;

use image::RgbaImage;
use serde::Serialize;

use crate::css::Stylesheet;
use crate::error::{Result, SpriteError};
use crate::service::ResourceService;

pub use cache::{ImageCache, LoadedImage};
pub use compose::StripLayout;
pub use extract::ImageReference;

/// One slot in a sprite: a reference and the image it resolved to.
#[derive(Debug, Clone)]
pub struct SpriteMember {
    pub reference: ImageReference,
    /// Shared with every other member that references the same file.
    pub image: Rc<LoadedImage>,
    pub offset_x: u32,
    pub offset_y: u32,
}

/// Members destined for one sprite, in first-seen order.
#[derive(Debug, Clone)]
pub struct SpriteGroup {
    pub key: String,
    pub members: Vec<SpriteMember>,
}

impl SpriteGroup {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            members: Vec::new(),
        }
    }

    /// Compute the strip layout and record each member's offset.
    pub fn arrange(&mut self) -> Result<StripLayout> {
        let strip = compose::layout(
            self.members
                .iter()
                .map(|m| (m.image.width(), m.image.height())),
        )?;
        for (member, &x) in self.members.iter_mut().zip(&strip.offsets) {
            member.offset_x = x;
            member.offset_y = 0;
        }
        Ok(strip)
    }

    /// Render the sprite for an arranged group.
    pub fn render(&self, strip: &StripLayout) -> RgbaImage {
        let images: Vec<&LoadedImage> = self.members.iter().map(|m| m.image.as_ref()).collect();
        compose::composite(&images, strip)
    }

    fn placements(&self) -> Vec<Placement> {
        self.members
            .iter()
            .map(|m| Placement {
                url: m.reference.url.clone(),
                x: m.offset_x,
                y: m.offset_y,
                width: m.image.width(),
                height: m.image.height(),
            })
            .collect()
    }
}

/// Where a referenced image sits inside its sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub url: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A sprite produced by [`Spriter::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpriteSheet {
    /// Output resource name, e.g. `l01cVKU8.png`.
    pub name: String,
    pub group: String,
    pub width: u32,
    pub height: u32,
    pub members: Vec<Placement>,
    /// True when an earlier group produced identical bytes, so nothing was written.
    pub reused: bool,
}

/// Result of a successful generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The rewritten stylesheet.
    pub css: String,
    /// One entry per group, in first-seen order.
    pub sprites: Vec<SpriteSheet>,
}

/// Layout of one group, computed without rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPlan {
    pub group: String,
    pub width: u32,
    pub height: u32,
    pub members: Vec<Placement>,
}

/// What a generation run would do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub groups: Vec<GroupPlan>,
    /// `background` references left alone because they do not follow the naming convention.
    pub ignored: Vec<String>,
}

/// Sprite generator for one stylesheet.
pub struct Spriter<S> {
    css: String,
    source_name: String,
    service: S,
}

impl<S: ResourceService> Spriter<S> {
    /// Create a generator for stylesheet text, resolving images through `service`.
    pub fn new(css: impl Into<String>, service: S) -> Self {
        Self {
            css: css.into(),
            source_name: "stylesheet".to_string(),
            service,
        }
    }

    /// Name the stylesheet in syntax error reports (usually its path).
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Generate sprites and return the rewritten stylesheet.
    ///
    /// Each call starts from an empty image cache.
    pub fn generate(&self) -> Result<Generated> {
        let mut cache = ImageCache::new();
        let (mut sheet, mut groups, _) = self.collect(&mut cache)?;

        let mut written = HashSet::new();
        let mut sprites = Vec::with_capacity(groups.len());

        for group in &mut groups {
            let strip = group.arrange()?;
            let encoded = compose::encode_png(&group.render(&strip))?;
            let name = naming::content_name(&encoded);

            let reused = !written.insert(name.clone());
            if !reused {
                self.write_sprite(&name, &encoded)?;
            }

            for member in &group.members {
                rewrite::rewrite(&mut sheet, member.reference.token, &name, member.offset_x);
            }

            sprites.push(SpriteSheet {
                name,
                group: group.key.clone(),
                width: strip.width,
                height: strip.height,
                members: group.placements(),
                reused,
            });
        }

        Ok(Generated {
            css: sheet.to_css(),
            sprites,
        })
    }

    /// Scan, load and lay out every group without writing anything.
    pub fn plan(&self) -> Result<Plan> {
        let mut cache = ImageCache::new();
        let (_, mut groups, ignored) = self.collect(&mut cache)?;

        let groups = groups
            .iter_mut()
            .map(|group| {
                let strip = group.arrange()?;
                Ok(GroupPlan {
                    group: group.key.clone(),
                    width: strip.width,
                    height: strip.height,
                    members: group.placements(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Plan { groups, ignored })
    }

    /// Scan and load: returns the stylesheet, the groups in first-seen
    /// order, and the references that were not eligible.
    fn collect(
        &self,
        cache: &mut ImageCache,
    ) -> Result<(Stylesheet, Vec<SpriteGroup>, Vec<String>)> {
        let sheet = Stylesheet::parse_named(&self.source_name, self.css.as_str())?;

        let mut groups: Vec<SpriteGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut ignored = Vec::new();

        for reference in extract::scan(&sheet) {
            if !reference.is_eligible() {
                ignored.push(reference.url);
                continue;
            }

            let image = cache.load(&self.service, &reference.url)?;
            let slot = *index.entry(reference.group.clone()).or_insert_with(|| {
                groups.push(SpriteGroup::new(reference.group.clone()));
                groups.len() - 1
            });
            groups[slot].members.push(SpriteMember {
                reference,
                image,
                offset_x: 0,
                offset_y: 0,
            });
        }

        Ok((sheet, groups, ignored))
    }

    fn write_sprite(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let write_error = |e: std::io::Error| SpriteError::Write {
            target: name.to_string(),
            message: e.to_string(),
        };

        let mut writer = self.service.create_sprite(name).map_err(write_error)?;
        writer.write_all(bytes).map_err(write_error)?;
        writer.flush().map_err(write_error)
    }
}

#[cfg(test)]
pub(crate) fn test_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    compose::encode_png(&RgbaImage::from_pixel(width, height, image::Rgba(rgba))).unwrap()
}
