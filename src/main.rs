mod audio;
mod cli;
mod config;
mod encode;
mod engine;
mod overlay;
mod render;
mod subtitle;
mod visual;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cli::Cli;
use encode::ffmpeg::{EncoderSettings, VideoEncoder};
use engine::{Engine, FrameResult};
use overlay::{ImageOverlay, LyricsOverlay};
use render::surface::Surface;
use render::text::TextOverlay;
use visual::{AlgorithmId, VisualConfig, ALL_ALGORITHMS};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect vibra.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("vibra.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("vibra").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("vibra").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.width == 1920 { cli.width = cfg.output.width; }
            if cli.height == 1080 { cli.height = cfg.output.height; }
            if cli.fps == 30 { cli.fps = cfg.output.fps; }
            if cli.crf == 18 { cli.crf = cfg.output.crf; }
            if cli.codec == "libx264" { cli.codec = cfg.output.codec; }
            if cli.sensitivity == 50 { cli.sensitivity = cfg.visual.sensitivity; }
            if cli.color_scheme == "rainbow" { cli.color_scheme = cfg.visual.color_scheme; }
            if cli.smoothing == 70 { cli.smoothing = cfg.visual.smoothing; }
            if !cli.beat_detection { cli.beat_detection = cfg.visual.beat_detection; }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    if cli.list_algorithms {
        println!("Available algorithms:");
        for id in ALL_ALGORITHMS {
            println!("  {}", id.name());
        }
        return Ok(());
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    log::info!("vibra - audio-reactive music video generator");
    log::info!("Input: {}", input.display());
    log::info!("Output: {}", cli.output.display());
    log::info!("Mode: {} / algorithm: {}", cli.mode, cli.algorithm);
    log::info!("Resolution: {}x{} @ {}fps", cli.width, cli.height, cli.fps);

    let visual_config = VisualConfig {
        sensitivity: cli.sensitivity.min(100),
        color_scheme: visual::color::ColorScheme::resolve(&cli.color_scheme),
        smoothing: cli.smoothing.min(100),
        beat_detection: cli.beat_detection,
    };

    // 1. Decode and analyze audio into per-frame snapshots
    log::info!("Decoding audio...");
    let clip = audio::decode::decode_audio(input)?;

    log::info!("Analyzing audio...");
    let frames = audio::analysis::analyze(&clip, cli.fps, visual_config.smoothing);
    let mut source = audio::source::OfflineSource::new(frames);
    let total_frames = source.len();
    log::info!("Total frames: {}, Duration: {:.1}s", total_frames, clip.duration());

    // 2. Arm the engine for the requested mode
    let mut engine = Engine::new();
    match cli.mode.as_str() {
        "lyrics" => {
            let timeline = match cli.srt.as_ref() {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read SRT file: {}", path.display()))?;
                    let timeline = subtitle::parse(&text);
                    log::info!("Parsed {} caption entries", timeline.len());
                    timeline
                }
                None => {
                    log::warn!("Lyrics mode without --srt; captions will be empty");
                    subtitle::CaptionTimeline::default()
                }
            };
            let text = TextOverlay::load(cli.font.as_deref(), cli.font_url.as_deref(), cli.font_size);
            engine.start_overlay(Box::new(LyricsOverlay::new(timeline, text)), visual_config);
        }
        "images" => {
            let overlay = match cli.images.as_ref() {
                Some(dir) => ImageOverlay::from_dir(dir)?,
                None => {
                    log::warn!("Images mode without --images; falling back to milkdrop");
                    ImageOverlay::new(Vec::new(), false)
                }
            };
            engine.start_overlay(Box::new(overlay), visual_config);
        }
        "visual" => {
            engine.start(AlgorithmId::resolve(&cli.algorithm), visual_config);
        }
        other => {
            log::warn!("Unknown mode '{}', using visual", other);
            engine.start(AlgorithmId::resolve(&cli.algorithm), visual_config);
        }
    }

    // 3. Export loop: one tick per output frame, piped to ffmpeg
    let mut surface = Surface::new(cli.width, cli.height);
    let mut encoder = VideoEncoder::spawn(&EncoderSettings {
        output: &cli.output,
        audio: input,
        width: cli.width,
        height: cli.height,
        fps: cli.fps,
        codec: &cli.codec,
        pix_fmt: &cli.pix_fmt,
        crf: cli.crf,
        bitrate: cli.bitrate.as_deref(),
    })?;

    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta} remaining)")
            .unwrap()
            .progress_chars("=>-"),
    );

    for frame_idx in 0..total_frames {
        source.seek(frame_idx);
        let now = frame_idx as f32 / cli.fps as f32;
        match engine.tick(&mut surface, &source, now) {
            FrameResult::Drawn => encoder.write_frame(surface.pixels())?,
            FrameResult::Halted | FrameResult::Idle => break,
        }
        pb.set_position(frame_idx as u64 + 1);
    }
    engine.stop();
    pb.finish_with_message("Rendering complete");

    log::info!("Finishing encoding...");
    encoder.finish()?;

    log::info!("Done! Output: {}", cli.output.display());
    Ok(())
}
