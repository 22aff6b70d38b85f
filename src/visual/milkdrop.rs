//! Circular scatter: one dot per bin on a rotating ring, radius driven by
//! amplitude with a fixed floor so silent bins still plot.

use std::f32::consts::TAU;

use super::{beat_boost, mean_amplitude, scaled, Snapshot, VisualConfig};
use crate::render::surface::Surface;

const FADE_ALPHA: f32 = 0.10;
const RADIUS_FLOOR: f32 = 100.0;
const RADIUS_SPAN: f32 = 150.0;

pub fn draw(surface: &mut Surface, snapshot: &Snapshot, config: &VisualConfig, elapsed: f32) {
    surface.fade([0, 0, 0], FADE_ALPHA);

    let bins = snapshot.bins;
    if bins.is_empty() {
        return;
    }
    let (cx, cy) = surface.center();
    let n = bins.len() as f32;
    let boost = beat_boost(config, mean_amplitude(bins, config));

    for (i, &raw) in bins.iter().enumerate() {
        let amp = scaled(raw, config);
        let frac = i as f32 / n;
        let angle = TAU * frac + elapsed;
        let radius = RADIUS_FLOOR + amp * RADIUS_SPAN;
        let hue = (frac * 360.0 + elapsed * 50.0) % 360.0;
        let color = config.color_scheme.shade(hue, amp);
        let size = (1.0 + amp * 4.0) * boost;
        surface.fill_circle(
            cx + angle.cos() * radius,
            cy + angle.sin() * radius,
            size,
            color,
            0.9,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(surface: &Surface, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * surface.width() + x) * 4) as usize;
        let p = surface.pixels();
        [p[idx], p[idx + 1], p[idx + 2]]
    }

    #[test]
    fn zero_amplitude_bins_still_plot_on_the_radius_floor() {
        let mut surface = Surface::new(400, 400);
        let bins = vec![0.0f32; 4];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        draw(&mut surface, &snapshot, &VisualConfig::default(), 0.0);

        // Bins 0..4 sit at angles 0, 90, 180, 270 degrees, radius 100.
        assert_ne!(pixel(&surface, 300, 200), [0, 0, 0]);
        assert_ne!(pixel(&surface, 200, 300), [0, 0, 0]);
        assert_ne!(pixel(&surface, 100, 200), [0, 0, 0]);
        assert_ne!(pixel(&surface, 200, 100), [0, 0, 0]);
        // No dot on the diagonal between them.
        assert_eq!(pixel(&surface, 270, 270), [0, 0, 0]);
    }

    #[test]
    fn empty_snapshot_only_fades() {
        let mut surface = Surface::new(32, 32);
        let snapshot = Snapshot {
            bins: &[],
            waveform: None,
        };
        draw(&mut surface, &snapshot, &VisualConfig::default(), 1.0);
        assert!(surface.pixels().chunks_exact(4).all(|p| p[0] == 0));
    }
}
