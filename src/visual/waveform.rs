//! Time-domain oscilloscope trace: one connected polyline across the full
//! width. Requires the waveform snapshot; without one it falls back to the
//! spectrum bar chart.

use super::{spectrum, Snapshot, VisualConfig};
use crate::render::surface::Surface;

const FADE_ALPHA: f32 = 0.35;

pub fn draw(surface: &mut Surface, snapshot: &Snapshot, config: &VisualConfig, elapsed: f32) {
    let samples = match snapshot.waveform {
        Some(samples) if !samples.is_empty() => samples,
        _ => {
            spectrum::draw(surface, snapshot, config, elapsed);
            return;
        }
    };

    surface.fade([0, 0, 0], FADE_ALPHA);

    let width = surface.width() as f32;
    let height = surface.height() as f32;
    let mid = height / 2.0;
    let span = height * 0.4 * config.gain();
    let color = config.color_scheme.shade(elapsed * 30.0, 1.0);

    let last = (samples.len() - 1).max(1) as f32;
    let mut prev: Option<(f32, f32)> = None;
    for (i, &sample) in samples.iter().enumerate() {
        let x = i as f32 / last * (width - 1.0);
        let y = mid - sample.clamp(-1.0, 1.0) * span;
        if let Some((px, py)) = prev {
            surface.line(px, py, x, y, color, 0.9);
        }
        prev = Some((x, y));
    }
}
