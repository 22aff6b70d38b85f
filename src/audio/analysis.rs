//! Offline spectral analysis: one Hann-windowed FFT per output frame,
//! per-bin peak normalization to 0-1, and a temporal EMA whose strength
//! comes from the visual configuration's smoothing setting.

use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};

use super::decode::AudioClip;

/// Transform window size. Yields `FFT_SIZE / 2` frequency bins; the
/// waveform snapshot carries the full window.
pub const FFT_SIZE: usize = 512;
pub const NUM_BINS: usize = FFT_SIZE / 2;

/// One render frame's analysis output.
#[derive(Clone, Debug)]
pub struct FrameBundle {
    /// Normalized amplitude per bin, 0.0-1.0. Length NUM_BINS for every
    /// frame of a run.
    pub bins: Vec<f32>,
    /// Time-domain window samples, clamped to [-1, 1]. Length FFT_SIZE.
    pub waveform: Vec<f32>,
    /// Frame time in seconds.
    pub time: f32,
}

/// Analyze a decoded clip into per-frame snapshots at the output frame
/// rate. `smoothing` is the 0-100 visual setting.
pub fn analyze(clip: &AudioClip, fps: u32, smoothing: u32) -> Vec<FrameBundle> {
    let total_frames = (clip.duration() * fps as f32).ceil() as usize;
    if total_frames == 0 {
        return Vec::new();
    }
    log::info!(
        "Analyzing {} frames at {} fps ({} bins per frame)",
        total_frames,
        fps,
        NUM_BINS
    );

    let samples_per_frame = clip.sample_rate as f32 / fps as f32;
    let hann = hann_window(FFT_SIZE);

    let mut raw: Vec<(Vec<f32>, Vec<f32>)> = (0..total_frames)
        .into_par_iter()
        .map(|frame_idx| {
            let center = (frame_idx as f32 * samples_per_frame) as usize;
            let start = center.saturating_sub(FFT_SIZE / 2);
            let end = (start + FFT_SIZE).min(clip.samples.len());
            let window = &clip.samples[start..end];

            let mut buffer: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); FFT_SIZE];
            for (i, &s) in window.iter().enumerate() {
                buffer[i] = Complex::new(s * hann[i], 0.0);
            }

            // Per-thread planner keeps this rayon-safe.
            let mut planner = FftPlanner::<f32>::new();
            planner.plan_fft_forward(FFT_SIZE).process(&mut buffer);

            let magnitudes: Vec<f32> = buffer[..NUM_BINS].iter().map(|c| c.norm()).collect();

            let mut waveform: Vec<f32> = window.iter().map(|s| s.clamp(-1.0, 1.0)).collect();
            waveform.resize(FFT_SIZE, 0.0);

            (magnitudes, waveform)
        })
        .collect();

    // Per-bin peak normalization across the whole clip.
    let mut peaks = vec![1e-10f32; NUM_BINS];
    for (magnitudes, _) in &raw {
        for (peak, &mag) in peaks.iter_mut().zip(magnitudes.iter()) {
            *peak = peak.max(mag);
        }
    }

    // Forward EMA. smoothing=0 passes frames through untouched; 100 is
    // heavily damped but never frozen.
    let alpha = 1.0 - (smoothing.min(100) as f32 / 100.0) * 0.9;
    let mut state = vec![0.0f32; NUM_BINS];
    let mut frames = Vec::with_capacity(total_frames);
    for (frame_idx, (magnitudes, waveform)) in raw.drain(..).enumerate() {
        let bins: Vec<f32> = magnitudes
            .iter()
            .zip(peaks.iter())
            .zip(state.iter_mut())
            .map(|((&mag, &peak), s)| {
                let normalized = (mag / peak).min(1.0);
                *s = alpha * normalized + (1.0 - alpha) * *s;
                *s
            })
            .collect();
        frames.push(FrameBundle {
            bins,
            waveform,
            time: frame_idx as f32 / fps as f32,
        });
    }
    frames
}

fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_clip(freq: f32, seconds: f32, sample_rate: u32) -> AudioClip {
        let count = (seconds * sample_rate as f32) as usize;
        let samples = (0..count)
            .map(|i| {
                (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin() * 0.8
            })
            .collect();
        AudioClip {
            samples,
            sample_rate,
        }
    }

    #[test]
    fn frame_count_matches_duration_and_fps() {
        let clip = sine_clip(440.0, 1.0, 8000);
        let frames = analyze(&clip, 30, 0);
        assert_eq!(frames.len(), 30);
        assert_eq!(frames[0].bins.len(), NUM_BINS);
        assert_eq!(frames[0].waveform.len(), FFT_SIZE);
    }

    #[test]
    fn bins_stay_normalized() {
        let clip = sine_clip(440.0, 0.5, 8000);
        for frame in analyze(&clip, 24, 50) {
            assert!(frame.bins.iter().all(|&b| (0.0..=1.0).contains(&b)));
            assert!(frame.waveform.iter().all(|&s| (-1.0..=1.0).contains(&s)));
        }
    }

    #[test]
    fn a_tone_concentrates_energy_in_its_bin() {
        let sample_rate = 8000u32;
        let clip = sine_clip(1000.0, 1.0, sample_rate);
        let frames = analyze(&clip, 10, 0);
        let mid = &frames[5];
        let expected_bin = (1000.0 / (sample_rate as f32 / FFT_SIZE as f32)).round() as usize;
        let (loudest, _) = mid
            .bins
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        assert!(
            (loudest as i32 - expected_bin as i32).abs() <= 1,
            "energy at bin {} rather than {}",
            loudest,
            expected_bin
        );
    }

    #[test]
    fn empty_clip_yields_no_frames() {
        let clip = AudioClip {
            samples: Vec::new(),
            sample_rate: 44100,
        };
        assert!(analyze(&clip, 30, 70).is_empty());
    }

    #[test]
    fn frame_times_advance_at_the_frame_rate() {
        let clip = sine_clip(200.0, 0.5, 8000);
        let frames = analyze(&clip, 20, 70);
        assert_eq!(frames[0].time, 0.0);
        assert!((frames[4].time - 0.2).abs() < 1e-6);
    }
}
