//! Caption compositor: a low spectrum backdrop plus the caption active at
//! the current playback time, word-wrapped, centered, and drop-shadowed.

use crate::engine::Compositor;
use crate::render::surface::Surface;
use crate::render::text::TextOverlay;
use crate::subtitle::CaptionTimeline;
use crate::visual::{spectrum, Snapshot, VisualConfig};

const FADE_ALPHA: f32 = 0.40;
/// The backdrop bar chart never rises above this fraction of the surface.
const BACKDROP_HEIGHT_FRAC: f32 = 0.30;
const BACKDROP_ALPHA: f32 = 0.35;
/// Captions wrap to fit within this fraction of the surface width.
const TEXT_WIDTH_FRAC: f32 = 0.80;

pub struct LyricsOverlay {
    timeline: CaptionTimeline,
    text: Option<TextOverlay>,
}

impl LyricsOverlay {
    pub fn new(timeline: CaptionTimeline, text: Option<TextOverlay>) -> Self {
        if text.is_none() {
            log::warn!("Lyrics overlay running without a font; captions will not be drawn");
        }
        Self { timeline, text }
    }
}

impl Compositor for LyricsOverlay {
    fn compose(
        &self,
        surface: &mut Surface,
        snapshot: &Snapshot,
        config: &VisualConfig,
        elapsed: f32,
    ) {
        surface.fade([0, 0, 0], FADE_ALPHA);
        spectrum::draw_bars(surface, snapshot.bins, config, BACKDROP_HEIGHT_FRAC, BACKDROP_ALPHA);

        let Some(entry) = self.timeline.current_entry(elapsed) else {
            return;
        };
        let Some(text) = &self.text else {
            return;
        };

        let max_width = (surface.width() as f32 * TEXT_WIDTH_FRAC) as u32;
        let lines = wrap_text(&entry.text, max_width, |s| text.measure_width(s));

        let font_size = text.font_size() as i32;
        let line_spacing = (text.font_size() * 0.3) as i32;
        let total_height =
            lines.len() as i32 * font_size + lines.len().saturating_sub(1) as i32 * line_spacing;
        let mut y = (surface.height() as i32 - total_height) / 2;

        for line in &lines {
            let width = text.measure_width(line);
            let x = (surface.width() as i32 - width as i32) / 2;
            text.composite(surface, line, x + 2, y + 2, [0, 0, 0, 200]);
            text.composite(surface, line, x, y, [255, 255, 255, 255]);
            y += font_size + line_spacing;
        }
    }
}

/// Greedy word wrap against a measured pixel width. A single word wider
/// than the limit gets its own line rather than being split.
fn wrap_text<F: Fn(&str) -> u32>(text: &str, max_width: u32, measure: F) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitle;

    fn char_measure(s: &str) -> u32 {
        s.chars().count() as u32 * 10
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("hello world", 200, char_measure);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn long_text_wraps_at_the_width_limit() {
        let lines = wrap_text("one two three four five six", 100, char_measure);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(line.split_whitespace().count() >= 1);
            // Multi-word lines stay within the limit.
            if line.contains(' ') {
                assert!(char_measure(line) <= 100);
            }
        }
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap_text("a extraordinarily b", 80, char_measure);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn empty_text_produces_no_lines() {
        assert!(wrap_text("", 100, char_measure).is_empty());
        assert!(wrap_text("   ", 100, char_measure).is_empty());
    }

    #[test]
    fn backdrop_respects_the_height_cap() {
        let timeline = subtitle::parse("");
        let overlay = LyricsOverlay::new(timeline, None);
        let mut surface = Surface::new(64, 100);
        let bins = vec![1.0f32; 8];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        overlay.compose(&mut surface, &snapshot, &VisualConfig::default(), 0.0);

        // Everything above 30% from the bottom stays black.
        let pixels = surface.pixels();
        for y in 0..69u32 {
            for x in 0..64u32 {
                let idx = ((y * 64 + x) * 4) as usize;
                assert_eq!(&pixels[idx..idx + 3], &[0, 0, 0], "lit pixel at {},{}", x, y);
            }
        }
        let bottom = ((99u32 * 64 + 2) * 4) as usize;
        assert_ne!(&pixels[bottom..bottom + 3], &[0, 0, 0]);
    }

    #[test]
    fn no_active_caption_draws_backdrop_only_without_font_access() {
        // A timeline with no entry at t=10 must not touch the text path.
        let timeline = subtitle::parse("1\n00:00:00,000 --> 00:00:01,000\nhi\n");
        let overlay = LyricsOverlay::new(timeline, None);
        let mut surface = Surface::new(32, 32);
        let bins = vec![0.2f32; 8];
        let snapshot = Snapshot {
            bins: &bins,
            waveform: None,
        };
        overlay.compose(&mut surface, &snapshot, &VisualConfig::default(), 10.0);
    }
}
