//! Per-bin flame columns: amplitude sets the flame height, a sinusoidal
//! noise term wiggles each 5-pixel step horizontally, and the color runs a
//! fixed base/mid/tip gradient. The base row survives silence.

use super::{beat_boost, mean_amplitude, scaled, Snapshot, VisualConfig};
use crate::render::surface::Surface;
use crate::visual::color::lerp_rgb;

const FADE_ALPHA: f32 = 0.25;
const STEP: i32 = 5;
const BASE: [u8; 3] = [200, 20, 0];
const MID: [u8; 3] = [255, 140, 0];
const TIP: [u8; 3] = [255, 230, 120];

pub fn draw(surface: &mut Surface, snapshot: &Snapshot, config: &VisualConfig, elapsed: f32) {
    surface.fade([0, 0, 0], FADE_ALPHA);

    let bins = snapshot.bins;
    if bins.is_empty() {
        return;
    }
    let width = surface.width();
    let height = surface.height() as i32;
    let col_w = width as f32 / bins.len() as f32;
    let bar_w = col_w.ceil().max(1.0) as u32;
    let boost = beat_boost(config, mean_amplitude(bins, config));

    for (i, &raw) in bins.iter().enumerate() {
        let amp = scaled(raw, config) * boost;
        let flame_h = (amp * height as f32 * 0.75).max(0.0);
        let base_x = i as f32 * col_w;

        // Step upward from the base; the first step always draws, so a
        // zero-height flame keeps its base row.
        let mut offset = 0i32;
        loop {
            let t = offset as f32 / flame_h.max(1.0);
            let color = if t < 0.5 {
                lerp_rgb(BASE, MID, t * 2.0)
            } else {
                lerp_rgb(MID, TIP, (t - 0.5) * 2.0)
            };
            let wiggle =
                (elapsed * 3.0 + offset as f32 * 0.05 + i as f32 * 0.7).sin() * 4.0 * t;
            let y = height - 1 - offset - (STEP - 1);
            surface.fill_rect((base_x + wiggle) as i32, y, bar_w, STEP as u32, color, 0.85);
            offset += STEP;
            if offset as f32 > flame_h {
                break;
            }
        }
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
    fn silence_keeps_the_base_row() {
        let mut surface = Surface::new(64, 64);
        let bins = vec![0.0f32; 8];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        draw(&mut surface, &snapshot, &VisualConfig::default(), 0.0);
        // Bottom rows carry the base color, upper half stays dark.
        assert!(pixel(&surface, 2, 63)[0] > 0);
        assert_eq!(pixel(&surface, 32, 10), [0, 0, 0]);
    }

    #[test]
    fn full_amplitude_reaches_well_above_the_base() {
        let mut surface = Surface::new(64, 100);
        let bins = vec![1.0f32; 4];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        draw(&mut surface, &snapshot, &VisualConfig::default(), 1.0);
        let lit = (0..100u32)
            .filter(|&y| (0..64u32).any(|x| pixel(&surface, x, y) != [0, 0, 0]))
            .count();
        assert!(lit > 50, "flames covered only {} rows", lit);
    }

    #[test]
    fn empty_snapshot_draws_nothing() {
        let mut surface = Surface::new(16, 16);
        let snapshot = Snapshot {
            bins: &[],
            waveform: None,
        };
        draw(&mut surface, &snapshot, &VisualConfig::default(), 0.0);
        assert!(surface.pixels().chunks_exact(4).all(|p| p[0] == 0));
    }
}
