use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub visual: VisualSection,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_crf")]
    pub crf: u32,
    #[serde(default = "default_codec")]
    pub codec: String,
}

#[derive(Debug, Deserialize)]
pub struct VisualSection {
    #[serde(default = "default_sensitivity")]
    pub sensitivity: u32,
    #[serde(default = "default_scheme")]
    pub color_scheme: String,
    #[serde(default = "default_smoothing")]
    pub smoothing: u32,
    #[serde(default)]
    pub beat_detection: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            crf: default_crf(),
            codec: default_codec(),
        }
    }
}

impl Default for VisualSection {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
            color_scheme: default_scheme(),
            smoothing: default_smoothing(),
            beat_detection: false,
        }
    }
}

fn default_width() -> u32 { 1920 }
fn default_height() -> u32 { 1080 }
fn default_fps() -> u32 { 30 }
fn default_crf() -> u32 { 18 }
fn default_codec() -> String { "libx264".into() }
fn default_sensitivity() -> u32 { 50 }
fn default_scheme() -> String { "rainbow".into() }
fn default_smoothing() -> u32 { 70 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.output.width, 1920);
        assert_eq!(config.output.fps, 30);
        assert_eq!(config.visual.sensitivity, 50);
        assert!(!config.visual.beat_detection);
    }

    #[test]
    fn partial_sections_fill_in() {
        let config: Config = toml::from_str(
            "[visual]\nsensitivity = 80\ncolor_scheme = \"neon\"\n",
        )
        .unwrap();
        assert_eq!(config.visual.sensitivity, 80);
        assert_eq!(config.visual.color_scheme, "neon");
        assert_eq!(config.visual.smoothing, 70);
        assert_eq!(config.output.codec, "libx264");
    }
}
