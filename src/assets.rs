//! Tile visuals and sprite loading.
//!
//! Sprites are read once at start-up. A sprite that cannot be loaded is
//! replaced by a 1x1 placeholder and a warning is logged; loading never fails.

use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use bytes::Bytes;
use image::{ImageFormat, Rgba, RgbaImage};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::tile::{Rgb, Tile};

const PLACEHOLDER_PIXEL: Rgba<u8> = Rgba([255, 0, 255, 255]);

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {} as PNG: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Encoded 1x1 magenta PNG, built on first use.
fn placeholder_png() -> Bytes {
    static PNG: OnceLock<Bytes> = OnceLock::new();
    PNG.get_or_init(|| {
        let image = RgbaImage::from_pixel(1, 1, PLACEHOLDER_PIXEL);
        let mut bytes = Vec::new();
        let encoded = image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png);
        match encoded {
            Ok(()) => Bytes::from(bytes),
            Err(err) => {
                error!(error = %err, "failed to encode placeholder sprite");
                Bytes::new()
            }
        }
    })
    .clone()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub png: Bytes,
    pub placeholder: bool,
}

impl Sprite {
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            width: 1,
            height: 1,
            png: placeholder_png(),
            placeholder: true,
        }
    }

    /// Reads `<dir>/<name>.png` and decodes it fully, so a file with a good
    /// header but a corrupt body is rejected here rather than in the page.
    pub fn load(dir: &Path, name: &str) -> Result<Self, AssetError> {
        let path = dir.join(format!("{name}.png"));
        let data = fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        let decoded = image::load_from_memory_with_format(&data, ImageFormat::Png)
            .map_err(|source| AssetError::Decode {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            name: name.to_string(),
            width: decoded.width(),
            height: decoded.height(),
            png: Bytes::from(data),
            placeholder: false,
        })
    }

    /// Loads the sprite, logging and substituting the placeholder on failure.
    pub fn load_or_placeholder(dir: &Path, name: &str) -> Self {
        match Self::load(dir, name) {
            Ok(sprite) => {
                debug!(sprite = name, width = sprite.width, height = sprite.height, "loaded sprite");
                sprite
            }
            Err(err) => {
                warn!(sprite = name, error = %err, "sprite unavailable, using placeholder");
                Self::placeholder(name)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visual {
    Color(Rgb),
    Sprite(Sprite),
}

/// Palette entry as served to the browser.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteEntry {
    pub code: u8,
    pub name: &'static str,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
}

/// The fixed visual for every tile, chosen once at construction.
#[derive(Debug, Clone)]
pub struct TileSet {
    visuals: Vec<Visual>,
}

impl TileSet {
    pub fn load(assets_dir: &Path) -> Self {
        let visuals = Tile::ALL
            .iter()
            .map(|tile| match tile.sprite_name() {
                Some(name) => Visual::Sprite(Sprite::load_or_placeholder(assets_dir, name)),
                None => Visual::Color(tile.color()),
            })
            .collect();
        Self { visuals }
    }

    /// Colour-only tile set; sprite tiles keep their placeholders.
    pub fn placeholders() -> Self {
        let visuals = Tile::ALL
            .iter()
            .map(|tile| match tile.sprite_name() {
                Some(name) => Visual::Sprite(Sprite::placeholder(name)),
                None => Visual::Color(tile.color()),
            })
            .collect();
        Self { visuals }
    }

    pub fn visual(&self, tile: Tile) -> &Visual {
        &self.visuals[tile.code() as usize]
    }

    pub fn sprite(&self, name: &str) -> Option<&Sprite> {
        self.visuals.iter().find_map(|visual| match visual {
            Visual::Sprite(sprite) if sprite.name == name => Some(sprite),
            _ => None,
        })
    }

    pub fn palette(&self) -> Vec<PaletteEntry> {
        Tile::ALL
            .iter()
            .map(|&tile| PaletteEntry {
                code: tile.code(),
                name: tile.name(),
                color: tile.color().to_hex(),
                sprite: match self.visual(tile) {
                    Visual::Sprite(sprite) => Some(format!("/sprites/{}", sprite.name)),
                    Visual::Color(_) => None,
                },
            })
            .collect()
    }
}
