//! The render-loop state machine. The engine owns which scene draws and
//! when; the caller owns the surface, the spectral source, and the frame
//! clock. One `tick` per scheduled frame, strictly sequential.

use crate::audio::source::SpectralSource;
use crate::render::surface::Surface;
use crate::visual::{self, AlgorithmId, Snapshot, VisualConfig};

/// A higher-level draw routine layered over the base algorithm library.
/// Compositors receive the same per-frame arguments as plain algorithms.
pub trait Compositor {
    fn compose(
        &self,
        surface: &mut Surface,
        snapshot: &Snapshot,
        config: &VisualConfig,
        elapsed: f32,
    );

    fn needs_waveform(&self) -> bool {
        false
    }
}

enum Scene {
    Algorithm(AlgorithmId),
    Overlay(Box<dyn Compositor>),
}

struct Running {
    scene: Scene,
    config: VisualConfig,
    /// Wall-clock origin, captured on the first tick after start so elapsed
    /// time starts at zero regardless of when the host delivers frames.
    epoch: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    /// The active scene drew one frame.
    Drawn,
    /// Engine is stopped; nothing drawn.
    Idle,
    /// The spectral source is closed; the engine stopped itself and left
    /// the surface untouched. Not an error.
    Halted,
}

#[derive(Default)]
pub struct Engine {
    running: Option<Running>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or replace) a run with one of the seven visual algorithms.
    /// Any in-flight scene and config are discarded wholesale.
    pub fn start(&mut self, algorithm: AlgorithmId, config: VisualConfig) {
        log::info!("Render loop started: {}", algorithm.name());
        self.running = Some(Running {
            scene: Scene::Algorithm(algorithm),
            config,
            epoch: None,
        });
    }

    /// Begin (or replace) a run driven by an overlay compositor.
    pub fn start_overlay(&mut self, overlay: Box<dyn Compositor>, config: VisualConfig) {
        log::info!("Render loop started: overlay compositor");
        self.running = Some(Running {
            scene: Scene::Overlay(overlay),
            config,
            epoch: None,
        });
    }

    /// Cancel the run. Idempotent; no draw call can occur after this
    /// returns until the next `start`.
    pub fn stop(&mut self) {
        if self.running.take().is_some() {
            log::info!("Render loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Render one frame at wall-clock time `now` (seconds). The surface is
    /// borrowed for this call only.
    pub fn tick(
        &mut self,
        surface: &mut Surface,
        source: &dyn SpectralSource,
        now: f32,
    ) -> FrameResult {
        let Some(mut run) = self.running.take() else {
            return FrameResult::Idle;
        };

        // A closed source is teardown, not an error: stay stopped and leave
        // this frame untouched.
        let Some(bins) = source.frequency_snapshot() else {
            log::debug!("Spectral source closed; render loop halting");
            return FrameResult::Halted;
        };

        let needs_waveform = match &run.scene {
            Scene::Algorithm(id) => id.needs_waveform(),
            Scene::Overlay(overlay) => overlay.needs_waveform(),
        };
        let waveform = if needs_waveform {
            source.waveform_snapshot()
        } else {
            None
        };
        let snapshot = Snapshot { bins, waveform };

        let elapsed = now - *run.epoch.get_or_insert(now);
        match &run.scene {
            Scene::Algorithm(id) => visual::draw(*id, surface, &snapshot, &run.config, elapsed),
            Scene::Overlay(overlay) => overlay.compose(surface, &snapshot, &run.config, elapsed),
        }

        self.running = Some(run);
        FrameResult::Drawn
    }
}
