//! The procedural visual algorithm library.
//!
//! Every algorithm is a pure function of `(surface, snapshot, config,
//! elapsed)` that draws exactly one frame. Each fades the previous frame
//! with its own fixed low-alpha fill rather than clearing, so motion trails
//! persist. Randomized algorithms derive their stream from the frame's
//! elapsed time, keeping a frame reproducible from its inputs.

pub mod color;
pub mod electricity;
pub mod fire;
pub mod fractals;
pub mod milkdrop;
pub mod particles;
pub mod spectrum;
pub mod waveform;

use crate::render::surface::Surface;
use color::ColorScheme;

/// Immutable per-run visual settings, replaced wholesale on every engine
/// start and never mutated mid-run.
#[derive(Clone, Debug)]
pub struct VisualConfig {
    /// 0-100, scales amplitude response. 50 is unity gain.
    pub sensitivity: u32,
    pub color_scheme: ColorScheme,
    /// 0-100, temporal EMA applied at the analysis layer.
    pub smoothing: u32,
    /// Enables peak-triggered pulse boosts in amplitude-driven algorithms.
    pub beat_detection: bool,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            sensitivity: 50,
            color_scheme: ColorScheme::Rainbow,
            smoothing: 70,
            beat_detection: false,
        }
    }
}

impl VisualConfig {
    pub fn gain(&self) -> f32 {
        self.sensitivity.min(100) as f32 / 50.0
    }
}

/// One frame's worth of analysis data, borrowed from the spectral source
/// for the duration of a single draw call.
pub struct Snapshot<'a> {
    /// Normalized amplitude per frequency bin, 0.0-1.0, constant length
    /// within a run.
    pub bins: &'a [f32],
    /// Time-domain samples in [-1, 1]; only supplied to the waveform
    /// algorithm.
    pub waveform: Option<&'a [f32]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmId {
    Milkdrop,
    Fractals,
    Fire,
    Electricity,
    Particles,
    Waveform,
    Spectrum,
}

pub const ALL_ALGORITHMS: [AlgorithmId; 7] = [
    AlgorithmId::Milkdrop,
    AlgorithmId::Fractals,
    AlgorithmId::Fire,
    AlgorithmId::Electricity,
    AlgorithmId::Particles,
    AlgorithmId::Waveform,
    AlgorithmId::Spectrum,
];

impl AlgorithmId {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "milkdrop" => Some(Self::Milkdrop),
            "fractals" => Some(Self::Fractals),
            "fire" => Some(Self::Fire),
            "electricity" => Some(Self::Electricity),
            "particles" => Some(Self::Particles),
            "waveform" => Some(Self::Waveform),
            "spectrum" => Some(Self::Spectrum),
            _ => None,
        }
    }

    /// Resolve a requested algorithm name; unknown names fall back to the
    /// spectrum bar chart, which is always available.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown algorithm '{}', falling back to spectrum", name);
            Self::Spectrum
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Milkdrop => "milkdrop",
            Self::Fractals => "fractals",
            Self::Fire => "fire",
            Self::Electricity => "electricity",
            Self::Particles => "particles",
            Self::Waveform => "waveform",
            Self::Spectrum => "spectrum",
        }
    }

    pub fn needs_waveform(&self) -> bool {
        matches!(self, Self::Waveform)
    }
}

pub fn draw(
    id: AlgorithmId,
    surface: &mut Surface,
    snapshot: &Snapshot,
    config: &VisualConfig,
    elapsed: f32,
) {
    match id {
        AlgorithmId::Milkdrop => milkdrop::draw(surface, snapshot, config, elapsed),
        AlgorithmId::Fractals => fractals::draw(surface, snapshot, config, elapsed),
        AlgorithmId::Fire => fire::draw(surface, snapshot, config, elapsed),
        AlgorithmId::Electricity => electricity::draw(surface, snapshot, config, elapsed),
        AlgorithmId::Particles => particles::draw(surface, snapshot, config, elapsed),
        AlgorithmId::Waveform => waveform::draw(surface, snapshot, config, elapsed),
        AlgorithmId::Spectrum => spectrum::draw(surface, snapshot, config, elapsed),
    }
}

/// Sensitivity-scaled amplitude, clamped back to the normalized range.
pub(crate) fn scaled(raw: f32, config: &VisualConfig) -> f32 {
    (raw * config.gain()).clamp(0.0, 1.0)
}

pub(crate) fn mean_amplitude(bins: &[f32], config: &VisualConfig) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    bins.iter().map(|&b| scaled(b, config)).sum::<f32>() / bins.len() as f32
}

/// Pulse multiplier applied by amplitude-driven algorithms when beat
/// detection is enabled and the frame's mean energy spikes.
pub(crate) fn beat_boost(config: &VisualConfig, mean: f32) -> f32 {
    if config.beat_detection && mean > 0.6 {
        1.0 + (mean - 0.6) * 0.75
    } else {
        1.0
    }
}
