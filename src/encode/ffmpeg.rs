//! Export pipeline collaborator: a spawned ffmpeg child muxing raw RGBA
//! frames from stdin with the original audio track.

use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::{Context, Result};

pub struct EncoderSettings<'a> {
    pub output: &'a Path,
    pub audio: &'a Path,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub codec: &'a str,
    pub pix_fmt: &'a str,
    pub crf: u32,
    pub bitrate: Option<&'a str>,
}

pub struct VideoEncoder {
    child: Child,
    frame_bytes: usize,
}

impl VideoEncoder {
    pub fn spawn(settings: &EncoderSettings) -> Result<Self> {
        let mut args: Vec<String> = vec![
            "-y".into(),
            "-f".into(), "rawvideo".into(),
            "-pixel_format".into(), "rgba".into(),
            "-video_size".into(), format!("{}x{}", settings.width, settings.height),
            "-framerate".into(), settings.fps.to_string(),
            "-i".into(), "pipe:0".into(),
            "-i".into(), settings.audio.display().to_string(),
            "-c:v".into(), settings.codec.into(),
            "-pix_fmt".into(), settings.pix_fmt.into(),
        ];

        match settings.bitrate {
            Some(bitrate) => args.extend(["-b:v".into(), bitrate.into()]),
            None => args.extend([
                "-crf".into(),
                settings.crf.to_string(),
                "-preset".into(),
                "medium".into(),
            ]),
        }

        args.extend([
            "-c:a".into(), "aac".into(),
            "-b:a".into(), "192k".into(),
            "-shortest".into(),
            settings.output.display().to_string(),
        ]);

        let child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn ffmpeg. Is ffmpeg installed?")?;

        log::info!(
            "FFmpeg encoder started: {}x{} @ {}fps, codec={}",
            settings.width,
            settings.height,
            settings.fps,
            settings.codec
        );

        Ok(Self {
            child,
            frame_bytes: (settings.width * settings.height * 4) as usize,
        })
    }

    pub fn write_frame(&mut self, rgba: &[u8]) -> Result<()> {
        debug_assert_eq!(rgba.len(), self.frame_bytes);
        let stdin = self
            .child
            .stdin
            .as_mut()
            .context("FFmpeg stdin not available")?;
        stdin
            .write_all(rgba)
            .context("Failed to write frame to ffmpeg")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        // Dropping stdin signals EOF.
        drop(self.child.stdin.take());
        let output = self
            .child
            .wait_with_output()
            .context("Failed to wait for ffmpeg")?;
        if !output.status.success() {
            anyhow::bail!(
                "FFmpeg exited with error:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        log::info!("FFmpeg encoding complete");
        Ok(())
    }
}
