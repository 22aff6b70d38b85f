use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vibra", about = "Audio-reactive procedural music video generator")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG, AAC)
    pub input: Option<PathBuf>,

    /// Output video file
    #[arg(short, long, default_value = "output.mp4")]
    pub output: PathBuf,

    /// Render mode: visual, images, or lyrics
    #[arg(short, long, default_value = "visual")]
    pub mode: String,

    /// Visual algorithm (milkdrop, fractals, fire, electricity, particles,
    /// waveform, spectrum). Unknown names fall back to spectrum.
    #[arg(short, long, default_value = "spectrum")]
    pub algorithm: String,

    /// SRT subtitle file for lyrics mode
    #[arg(long)]
    pub srt: Option<PathBuf>,

    /// Directory of generated images (PNG/JPEG) for images mode
    #[arg(long)]
    pub images: Option<PathBuf>,

    /// Video width in pixels
    #[arg(long, default_value_t = 1920)]
    pub width: u32,

    /// Video height in pixels
    #[arg(long, default_value_t = 1080)]
    pub height: u32,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Amplitude sensitivity (0-100, 50 = unity)
    #[arg(long, default_value_t = 50)]
    pub sensitivity: u32,

    /// Color scheme: rainbow, monochrome, warm, cool, neon
    #[arg(long, default_value = "rainbow")]
    pub color_scheme: String,

    /// Temporal smoothing (0-100)
    #[arg(long, default_value_t = 70)]
    pub smoothing: u32,

    /// Enable beat-triggered pulse boosts
    #[arg(long)]
    pub beat_detection: bool,

    /// Font file for caption rendering
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Fetch the caption font from a URL
    #[arg(long)]
    pub font_url: Option<String>,

    /// Caption font size in pixels
    #[arg(long, default_value_t = 48.0)]
    pub font_size: f32,

    /// H.264 CRF quality (0-51, lower = better). Ignored when --bitrate is set.
    #[arg(long, default_value_t = 18)]
    pub crf: u32,

    /// Video bitrate (e.g. 2400k, 5M). When set, uses -b:v instead of -crf.
    #[arg(short, long)]
    pub bitrate: Option<String>,

    /// FFmpeg video codec
    #[arg(long, default_value = "libx264")]
    pub codec: String,

    /// FFmpeg pixel format
    #[arg(long, default_value = "yuv420p")]
    pub pix_fmt: String,

    /// Config file path (defaults to vibra.toml or the platform config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List available algorithms and exit
    #[arg(long)]
    pub list_algorithms: bool,
}
