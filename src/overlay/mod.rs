//! Overlay compositors: draw routines that layer extra content (generated
//! imagery, captions) over the base visual algorithms.

pub mod images;
pub mod lyrics;

pub use images::{ImageOverlay, SourceImage};
pub use lyrics::LyricsOverlay;
