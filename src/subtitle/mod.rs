pub mod srt;

pub use srt::{parse, CaptionEntry, CaptionTimeline};
