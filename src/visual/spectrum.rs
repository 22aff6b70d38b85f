//! Classic bar chart, one bar per bin. The deterministic fallback for
//! unknown algorithm ids and for the waveform algorithm when no waveform
//! snapshot is available.

use super::{scaled, Snapshot, VisualConfig};
use crate::render::surface::Surface;
use crate::visual::color::lerp_rgb;

const FADE_ALPHA: f32 = 0.35;

pub fn draw(surface: &mut Surface, snapshot: &Snapshot, config: &VisualConfig, _elapsed: f32) {
    surface.fade([0, 0, 0], FADE_ALPHA);
    draw_bars(surface, snapshot.bins, config, 1.0, 1.0);
}

/// Bar rendering at a reduced height/opacity; the lyrics compositor reuses
/// this for its backdrop.
pub fn draw_bars(
    surface: &mut Surface,
    bins: &[f32],
    config: &VisualConfig,
    height_frac: f32,
    alpha: f32,
) {
    if bins.is_empty() {
        return;
    }
    let width = surface.width();
    let height = surface.height();
    let (bottom, top) = config.color_scheme.gradient();
    let col_w = width as f32 / bins.len() as f32;
    let bar_w = (col_w - 1.0).max(1.0) as u32;
    let max_h = height as f32 * height_frac.clamp(0.0, 1.0);

    for (i, &raw) in bins.iter().enumerate() {
        let amp = scaled(raw, config);
        let bar_h = (amp * max_h) as i32;
        let x = (i as f32 * col_w) as i32;
        for row in 0..bar_h {
            let t = row as f32 / max_h.max(1.0);
            let color = lerp_rgb(bottom, top, t);
            surface.fill_rect(x, height as i32 - 1 - row, bar_w, 1, color, alpha);
        }
    }
}
