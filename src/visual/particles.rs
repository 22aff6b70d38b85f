//! Amplitude-gated particle bursts scattered around the center. Bins at or
//! below the spawn threshold contribute nothing at all.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{beat_boost, mean_amplitude, scaled, Snapshot, VisualConfig};
use crate::render::surface::Surface;

const FADE_ALPHA: f32 = 0.12;
const SPAWN_THRESHOLD: f32 = 0.1;
const MAX_DISTANCE: f32 = 200.0;

pub fn draw(surface: &mut Surface, snapshot: &Snapshot, config: &VisualConfig, elapsed: f32) {
    surface.fade([0, 0, 0], FADE_ALPHA);

    let bins = snapshot.bins;
    if bins.is_empty() {
        return;
    }
    let (cx, cy) = surface.center();
    let n = bins.len() as f32;
    let boost = beat_boost(config, mean_amplitude(bins, config));
    let mut rng = Pcg32::seed_from_u64(elapsed.to_bits() as u64);

    for (i, &raw) in bins.iter().enumerate() {
        let amp = scaled(raw, config);
        if amp <= SPAWN_THRESHOLD {
            continue;
        }
        let count = (amp * 10.0).floor() as u32;
        let hue = (i as f32 / n * 360.0 + elapsed * 60.0) % 360.0;
        let color = config.color_scheme.shade(hue, amp);
        let size = (1.0 + amp * 3.0) * boost;

        for _ in 0..count {
            let angle = rng.random_range(0.0..TAU);
            let distance = rng.random_range(0.0..amp * MAX_DISTANCE);
            surface.fill_circle(
                cx + angle.cos() * distance,
                cy + angle.sin() * distance,
                size,
                color,
                0.85,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_threshold_bins_spawn_nothing() {
        let mut drawn = Surface::new(64, 64);
        let mut reference = Surface::new(64, 64);
        let bins = vec![0.05f32; 16];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        draw(&mut drawn, &snapshot, &VisualConfig::default(), 0.7);
        reference.fade([0, 0, 0], FADE_ALPHA);
        assert_eq!(drawn.pixels(), reference.pixels());
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut drawn = Surface::new(64, 64);
        let mut reference = Surface::new(64, 64);
        let bins = vec![SPAWN_THRESHOLD; 8];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        draw(&mut drawn, &snapshot, &VisualConfig::default(), 0.3);
        reference.fade([0, 0, 0], FADE_ALPHA);
        assert_eq!(drawn.pixels(), reference.pixels());
    }

    #[test]
    fn loud_bins_scatter_particles() {
        let mut surface = Surface::new(128, 128);
        let bins = vec![1.0f32; 8];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        draw(&mut surface, &snapshot, &VisualConfig::default(), 0.4);
        assert!(surface.pixels().iter().any(|&b| b > 0 && b != 255));
    }

    #[test]
    fn identical_inputs_are_deterministic() {
        let bins = vec![0.8f32; 8];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        let config = VisualConfig::default();
        let mut a = Surface::new(64, 64);
        let mut b = Surface::new(64, 64);
        draw(&mut a, &snapshot, &config, 2.0);
        draw(&mut b, &snapshot, &config, 2.0);
        assert_eq!(a.pixels(), b.pixels());
    }
}
