//! Glyph rasterization onto the drawing surface. Fonts are loaded at
//! startup from an explicit path, a URL, or common system locations; when
//! none is available, callers degrade to text-free output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};

use super::surface::Surface;

pub struct TextOverlay {
    font: Font,
    font_size: f32,
}

impl TextOverlay {
    pub fn from_bytes(bytes: &[u8], font_size: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("failed to parse font: {}", e))?;
        Ok(Self { font, font_size })
    }

    pub fn from_file(path: &Path, font_size: f32) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        Self::from_bytes(&bytes, font_size)
    }

    /// Try an explicit path, then a URL, then system font locations.
    /// Returns `None` (with warnings) when no font can be found, so text
    /// overlays are an optional layer rather than a startup failure.
    pub fn load(path: Option<&Path>, url: Option<&str>, font_size: f32) -> Option<Self> {
        if let Some(path) = path {
            match Self::from_file(path, font_size) {
                Ok(overlay) => return Some(overlay),
                Err(err) => log::warn!("{:#}", err),
            }
        }
        if let Some(url) = url {
            match load_font_from_url(url) {
                Ok(bytes) => match Self::from_bytes(&bytes, font_size) {
                    Ok(overlay) => return Some(overlay),
                    Err(err) => log::warn!("{:#}", err),
                },
                Err(err) => log::warn!("Failed to load font from URL: {:#}", err),
            }
        }
        for candidate in system_font_candidates() {
            if candidate.exists() {
                if let Ok(overlay) = Self::from_file(&candidate, font_size) {
                    log::info!("Using system font {}", candidate.display());
                    return Some(overlay);
                }
            }
        }
        log::warn!("No usable font found; text overlays disabled");
        None
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn measure_width(&self, text: &str) -> u32 {
        let mut width = 0.0f32;
        for ch in text.chars() {
            width += self.font.metrics(ch, self.font_size).advance_width;
        }
        width.ceil() as u32
    }

    /// Composite text at (x, y); y is the top of the nominal line box.
    pub fn composite(&self, surface: &mut Surface, text: &str, x: i32, y: i32, color: [u8; 4]) {
        let mut cursor_x = x;
        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
            let glyph_y = y + self.font_size as i32 - metrics.height as i32 - metrics.ymin;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = coverage as f32 / 255.0 * (color[3] as f32 / 255.0);
                    surface.blend_pixel(
                        cursor_x + gx as i32,
                        glyph_y + gy as i32,
                        [color[0], color[1], color[2]],
                        alpha,
                    );
                }
            }
            cursor_x += metrics.advance_width as i32;
        }
    }
}

pub fn load_font_from_url(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to fetch font from {}", url))?
        .error_for_status()
        .context("Font server returned an error")?;
    let bytes = response.bytes().context("Failed to read font body")?;
    Ok(bytes.to_vec())
}

fn system_font_candidates() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}
