//! Lightning bolts fired from strict spectral peaks. Peak detection
//! requires the amplitude to clear a fixed threshold and strictly exceed
//! both neighbors; edge bins have no full neighborhood and never qualify.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{scaled, Snapshot, VisualConfig};
use crate::render::surface::Surface;

const FADE_ALPHA: f32 = 0.30;
const BOLT_COLOR: [u8; 3] = [200, 220, 255];
const CORE_COLOR: [u8; 3] = [255, 255, 255];

/// Fraction of full scale a bin must exceed to count as a peak (100/255).
pub(crate) const PEAK_THRESHOLD: f32 = 100.0 / 255.0;

/// Segment count for the top-level bolt subdivision; halves per recursion.
const BOLT_SEGMENTS: i32 = 5;

/// Strict local maxima above the threshold. Ties with a neighbor are not
/// peaks, and the first/last bins are excluded.
pub(crate) fn find_peaks(bins: &[f32]) -> Vec<usize> {
    if bins.len() < 3 {
        return Vec::new();
    }
    (1..bins.len() - 1)
        .filter(|&i| bins[i] > PEAK_THRESHOLD && bins[i] > bins[i - 1] && bins[i] > bins[i + 1])
        .collect()
}

pub fn draw(surface: &mut Surface, snapshot: &Snapshot, config: &VisualConfig, elapsed: f32) {
    surface.fade([0, 0, 0], FADE_ALPHA);

    let amps: Vec<f32> = snapshot.bins.iter().map(|&b| scaled(b, config)).collect();
    let peaks = find_peaks(&amps);
    if peaks.is_empty() {
        return;
    }

    let width = surface.width() as f32;
    let height = surface.height() as f32;
    let mut rng = Pcg32::seed_from_u64(elapsed.to_bits() as u64);

    for &i in &peaks {
        let x = (i as f32 + 0.5) / amps.len() as f32 * width;
        let sway = rng.random_range(-0.15..0.15) * width;
        bolt(
            surface,
            x,
            0.0,
            (x + sway).clamp(0.0, width - 1.0),
            height - 1.0,
            BOLT_SEGMENTS,
            &mut rng,
        );
    }
}

/// Jittered lightning segment: displace the midpoint by bounded random
/// offsets and recurse into both halves with half the segment budget.
/// Segment counts at or below zero draw the straight remainder and return,
/// so a bad starting count cannot recurse.
pub(crate) fn bolt(
    surface: &mut Surface,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    segments: i32,
    rng: &mut Pcg32,
) {
    if segments <= 0 {
        surface.line(x0, y0, x1, y1, BOLT_COLOR, 0.9);
        surface.line(x0, y0, x1, y1, CORE_COLOR, 0.35);
        return;
    }
    let mx = (x0 + x1) / 2.0 + rng.random_range(-40.0..40.0);
    let my = (y0 + y1) / 2.0 + rng.random_range(-40.0..40.0);
    bolt(surface, x0, y0, mx, my, segments / 2, rng);
    bolt(surface, mx, my, x1, y1, segments / 2, rng);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &[f32]) -> Vec<f32> {
        raw.iter().map(|v| v / 255.0).collect()
    }

    #[test]
    fn strict_peaks_above_threshold() {
        let bins = norm(&[0.0, 50.0, 120.0, 40.0, 200.0, 190.0, 210.0, 30.0]);
        // 120, 200, and 210 each clear 100 and strictly exceed both
        // neighbors; 190 sits between two larger bins.
        assert_eq!(find_peaks(&bins), vec![2, 4, 6]);
    }

    #[test]
    fn ties_with_a_neighbor_are_not_peaks() {
        let bins = norm(&[0.0, 150.0, 150.0, 0.0]);
        assert!(find_peaks(&bins).is_empty());
    }

    #[test]
    fn edge_bins_never_qualify() {
        let bins = norm(&[250.0, 10.0, 10.0, 250.0]);
        assert!(find_peaks(&bins).is_empty());
    }

    #[test]
    fn sub_threshold_local_maxima_are_ignored() {
        let bins = norm(&[0.0, 90.0, 0.0]);
        assert!(find_peaks(&bins).is_empty());
    }

    #[test]
    fn short_inputs_yield_no_peaks() {
        assert!(find_peaks(&[]).is_empty());
        assert!(find_peaks(&[1.0, 1.0]).is_empty());
    }

    #[test]
    fn bolt_handles_non_positive_segment_counts() {
        let mut surface = Surface::new(32, 32);
        let mut rng = Pcg32::seed_from_u64(7);
        bolt(&mut surface, 0.0, 0.0, 31.0, 31.0, 0, &mut rng);
        bolt(&mut surface, 0.0, 0.0, 31.0, 31.0, -3, &mut rng);
        assert!(surface.pixels().iter().any(|&b| b > 0 && b != 255));
    }

    #[test]
    fn no_peaks_means_fade_only() {
        let mut surface = Surface::new(32, 32);
        let bins = vec![0.2f32; 16];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        draw(&mut surface, &snapshot, &VisualConfig::default(), 0.5);
        assert!(surface.pixels().chunks_exact(4).all(|p| p[0] == 0));
    }

    #[test]
    fn identical_inputs_draw_identical_bolts() {
        let bins = norm(&[0.0, 0.0, 180.0, 0.0, 0.0]);
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        let config = VisualConfig::default();
        let mut a = Surface::new(64, 64);
        let mut b = Surface::new(64, 64);
        draw(&mut a, &snapshot, &config, 1.25);
        draw(&mut b, &snapshot, &config, 1.25);
        assert_eq!(a.pixels(), b.pixels());
    }
}
