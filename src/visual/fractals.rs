//! Recursive branching structure radiating from the center. Branch spread
//! follows the mean spectral amplitude; recursion depth is hard-capped.

use std::f32::consts::TAU;

use super::{mean_amplitude, Snapshot, VisualConfig};
use crate::render::surface::Surface;
use crate::visual::color::ColorScheme;

const FADE_ALPHA: f32 = 0.16;
const BASE_BRANCHES: u32 = 8;
const LENGTH_DECAY: f32 = 0.7;

/// Capped recursion depth. Branch count doubles per level, so raising this
/// grows the per-frame segment count as 2^depth.
pub const MAX_DEPTH: u32 = 4;

pub fn draw(surface: &mut Surface, snapshot: &Snapshot, config: &VisualConfig, elapsed: f32) {
    surface.fade([0, 0, 0], FADE_ALPHA);

    let mean = mean_amplitude(snapshot.bins, config);
    let spread = 0.5 + mean;
    let (cx, cy) = surface.center();
    let length = surface.width().min(surface.height()) as f32 * 0.18;

    for k in 0..BASE_BRANCHES {
        let angle = TAU * k as f32 / BASE_BRANCHES as f32 + elapsed;
        let hue = k as f32 / BASE_BRANCHES as f32 * 360.0 + elapsed * 40.0;
        branch(
            surface,
            cx,
            cy,
            angle,
            length,
            MAX_DEPTH,
            spread,
            config.color_scheme,
            hue,
            mean,
        );
    }
}

/// Draw one segment and recurse into two children. Returns the number of
/// segments drawn; depth 0 is the base case and draws nothing.
#[allow(clippy::too_many_arguments)]
pub(crate) fn branch(
    surface: &mut Surface,
    x: f32,
    y: f32,
    angle: f32,
    length: f32,
    depth: u32,
    spread: f32,
    scheme: ColorScheme,
    hue: f32,
    mean: f32,
) -> usize {
    if depth == 0 {
        return 0;
    }
    let x2 = x + angle.cos() * length;
    let y2 = y + angle.sin() * length;
    let value = 0.3 + 0.7 * mean * depth as f32 / MAX_DEPTH as f32;
    surface.line(x, y, x2, y2, scheme.shade(hue + depth as f32 * 18.0, value), 0.8);

    let next_len = length * LENGTH_DECAY;
    1 + branch(surface, x2, y2, angle - spread, next_len, depth - 1, spread, scheme, hue, mean)
        + branch(surface, x2, y2, angle + spread, next_len, depth - 1, spread, scheme, hue, mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_draws_fifteen_segments_at_full_depth() {
        let mut surface = Surface::new(256, 256);
        let drawn = branch(
            &mut surface,
            128.0,
            128.0,
            0.0,
            40.0,
            MAX_DEPTH,
            0.6,
            ColorScheme::Rainbow,
            0.0,
            0.5,
        );
        // 1 + 2 + 4 + 8 segments for depth 4.
        assert_eq!(drawn, 15);
    }

    #[test]
    fn depth_zero_draws_nothing() {
        let mut surface = Surface::new(64, 64);
        let drawn = branch(
            &mut surface,
            32.0,
            32.0,
            0.0,
            20.0,
            0,
            0.6,
            ColorScheme::Rainbow,
            0.0,
            0.5,
        );
        assert_eq!(drawn, 0);
        assert!(surface.pixels().chunks_exact(4).all(|p| p[0] == 0));
    }

    #[test]
    fn segment_count_is_independent_of_amplitude() {
        for mean in [0.0, 0.5, 1.0] {
            let mut surface = Surface::new(256, 256);
            let drawn = branch(
                &mut surface,
                128.0,
                128.0,
                1.0,
                40.0,
                MAX_DEPTH,
                0.5 + mean,
                ColorScheme::Cool,
                90.0,
                mean,
            );
            assert_eq!(drawn, 15);
        }
    }

    #[test]
    fn full_frame_draws_without_panicking() {
        let mut surface = Surface::new(200, 200);
        let bins = vec![0.8f32; 16];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        draw(&mut surface, &snapshot, &VisualConfig::default(), 2.5);
        assert!(surface.pixels().iter().any(|&b| b > 0 && b != 255));
    }
}
