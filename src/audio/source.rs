//! The spectral frame source boundary between audio analysis and the
//! rendering engine. The engine polls, never owns: a source that returns
//! `None` is closed, which the engine treats as teardown rather than error.

use super::analysis::FrameBundle;

/// Read handle over per-frame audio state. Both calls are non-blocking and
/// return the most recent data for the source's current position, or `None`
/// once the source is closed/exhausted.
pub trait SpectralSource {
    fn frequency_snapshot(&self) -> Option<&[f32]>;
    fn waveform_snapshot(&self) -> Option<&[f32]>;
}

/// Precomputed source over an analyzed clip, stepped frame by frame by the
/// export loop. Past the final frame it reads as closed.
pub struct OfflineSource {
    frames: Vec<FrameBundle>,
    cursor: usize,
}

impl OfflineSource {
    pub fn new(frames: Vec<FrameBundle>) -> Self {
        Self { frames, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn seek(&mut self, frame_idx: usize) {
        self.cursor = frame_idx;
    }

    pub fn advance(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
    }

    fn current(&self) -> Option<&FrameBundle> {
        self.frames.get(self.cursor)
    }
}

impl SpectralSource for OfflineSource {
    fn frequency_snapshot(&self) -> Option<&[f32]> {
        self.current().map(|f| f.bins.as_slice())
    }

    fn waveform_snapshot(&self) -> Option<&[f32]> {
        self.current().map(|f| f.waveform.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(level: f32, time: f32) -> FrameBundle {
        FrameBundle {
            bins: vec![level; 4],
            waveform: vec![0.0; 8],
            time,
        }
    }

    #[test]
    fn reads_current_frame_until_exhausted() {
        let mut source = OfflineSource::new(vec![bundle(0.1, 0.0), bundle(0.9, 0.5)]);
        assert_eq!(source.frequency_snapshot().unwrap()[0], 0.1);
        source.advance();
        assert_eq!(source.frequency_snapshot().unwrap()[0], 0.9);
        assert_eq!(source.waveform_snapshot().unwrap().len(), 8);
        source.advance();
        assert!(source.frequency_snapshot().is_none());
        assert!(source.waveform_snapshot().is_none());
    }

    #[test]
    fn empty_source_reads_as_closed() {
        let source = OfflineSource::new(Vec::new());
        assert!(source.is_empty());
        assert!(source.frequency_snapshot().is_none());
    }

    #[test]
    fn seek_repositions_the_cursor() {
        let mut source = OfflineSource::new(vec![bundle(0.1, 0.0), bundle(0.2, 0.5)]);
        source.seek(1);
        assert_eq!(source.frequency_snapshot().unwrap()[0], 0.2);
        source.seek(0);
        assert_eq!(source.frequency_snapshot().unwrap()[0], 0.1);
    }
}
