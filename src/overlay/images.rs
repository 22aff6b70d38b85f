//! Generated-imagery compositor: cycles through an ordered image sequence
//! by mean spectral energy, with an amplitude-coupled pulse and fade. An
//! empty sequence delegates to milkdrop; a pending sequence draws a
//! placeholder marker until images resolve.

use std::path::Path;

use anyhow::{Context, Result};

use crate::engine::Compositor;
use crate::render::surface::Surface;
use crate::visual::{mean_amplitude, milkdrop, Snapshot, VisualConfig};

const FADE_ALPHA: f32 = 0.25;

/// A decoded RGBA image handle, resolved before the session starts.
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SourceImage {
    pub fn load(path: &Path) -> Result<Self> {
        let decoded = image::open(path)
            .with_context(|| format!("Failed to decode image: {}", path.display()))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self {
            width,
            height,
            pixels: decoded.into_raw(),
        })
    }
}

pub struct ImageOverlay {
    images: Vec<SourceImage>,
    /// True when a generation request is outstanding and no images have
    /// resolved yet; draws the placeholder instead of delegating.
    pending: bool,
}

impl ImageOverlay {
    pub fn new(images: Vec<SourceImage>, pending: bool) -> Self {
        Self { images, pending }
    }

    /// Load every decodable PNG/JPEG in a directory, ordered by file name.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read image directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| {
                matches!(
                    p.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
                    Some("png" | "jpg" | "jpeg")
                )
            })
            .collect();
        paths.sort();

        let mut images = Vec::with_capacity(paths.len());
        for path in &paths {
            match SourceImage::load(path) {
                Ok(img) => images.push(img),
                Err(err) => log::warn!("{:#}", err),
            }
        }
        log::info!("Loaded {} overlay images from {}", images.len(), dir.display());
        // Files were present but none decoded: treat as still pending.
        let pending = images.is_empty() && !paths.is_empty();
        Ok(Self::new(images, pending))
    }
}

/// Active image index for a mean amplitude in [0, 1].
pub(crate) fn select_index(mean: f32, count: usize) -> usize {
    ((mean.clamp(0.0, 1.0) * count as f32).floor() as usize) % count.max(1)
}

impl Compositor for ImageOverlay {
    fn compose(
        &self,
        surface: &mut Surface,
        snapshot: &Snapshot,
        config: &VisualConfig,
        elapsed: f32,
    ) {
        let mean = mean_amplitude(snapshot.bins, config);

        if self.images.is_empty() {
            if self.pending {
                surface.fade([0, 0, 0], FADE_ALPHA);
                draw_placeholder(surface, config, mean, elapsed);
            } else {
                // No imagery at all for this session: fall through to the
                // base algorithm instead of drawing nothing.
                milkdrop::draw(surface, snapshot, config, elapsed);
            }
            return;
        }

        surface.fade([0, 0, 0], FADE_ALPHA);

        let img = &self.images[select_index(mean, self.images.len())];
        let fit = (surface.width() as f32 / img.width as f32)
            .min(surface.height() as f32 / img.height as f32)
            * 0.8;
        let scale = fit * (1.0 + mean * 0.1);
        let alpha = 0.55 + 0.45 * mean;
        let (cx, cy) = surface.center();
        blit_scaled(surface, img, cx, cy, scale, alpha);
    }
}

/// Nearest-neighbor blit of `img`, uniformly scaled about its center.
fn blit_scaled(surface: &mut Surface, img: &SourceImage, cx: f32, cy: f32, scale: f32, alpha: f32) {
    if scale <= 0.0 {
        return;
    }
    let dst_w = (img.width as f32 * scale) as i32;
    let dst_h = (img.height as f32 * scale) as i32;
    let x0 = (cx - dst_w as f32 / 2.0) as i32;
    let y0 = (cy - dst_h as f32 / 2.0) as i32;

    for dy in 0..dst_h {
        let sy = (dy as f32 / scale) as u32;
        if sy >= img.height {
            continue;
        }
        for dx in 0..dst_w {
            let sx = (dx as f32 / scale) as u32;
            if sx >= img.width {
                continue;
            }
            let idx = ((sy * img.width + sx) * 4) as usize;
            let src_a = img.pixels[idx + 3] as f32 / 255.0;
            surface.blend_pixel(
                x0 + dx,
                y0 + dy,
                [img.pixels[idx], img.pixels[idx + 1], img.pixels[idx + 2]],
                alpha * src_a,
            );
        }
    }
}

/// Pulsing hollow frame shown while generation is still outstanding.
fn draw_placeholder(surface: &mut Surface, config: &VisualConfig, mean: f32, elapsed: f32) {
    let (cx, cy) = surface.center();
    let half = surface.width().min(surface.height()) as f32 * (0.12 + 0.03 * (elapsed * 2.0).sin())
        * (1.0 + mean * 0.1);
    let color = config.color_scheme.shade(elapsed * 45.0, 0.8);
    let x0 = cx - half;
    let y0 = cy - half;
    let side = (half * 2.0) as u32;
    surface.fill_rect(x0 as i32, y0 as i32, side, 2, color, 0.8);
    surface.fill_rect(x0 as i32, (cy + half) as i32, side, 2, color, 0.8);
    surface.fill_rect(x0 as i32, y0 as i32, 2, side, color, 0.8);
    surface.fill_rect((cx + half) as i32, y0 as i32, 2, side, color, 0.8);
}
