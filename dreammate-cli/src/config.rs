//! Settings for the `dream-mate` binary.
//!
//! Read from `<config dir>/dream-mate/config.toml` unless `--config` names
//! another file. Every field has a default, so a partial file is fine and a
//! missing default file is not an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use dreammate::{CaptureOptions, DEFAULT_TYPING_DELAY, Exporter, ImageFormat, Rgb};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

const APP_DIR: &str = "dream-mate";
const CONFIG_FILE: &str = "config.toml";
const MAX_SCALE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frontend {
    #[default]
    Tui,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    #[default]
    Jpeg,
    Png,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Pixels per font pixel, 1 to 8.
    pub scale: u32,
    /// `#rrggbb` page color behind the card.
    pub background: String,
    pub format: ImageKind,
    /// JPEG quality, 1 to 100. Ignored for PNG.
    pub quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        let defaults = CaptureOptions::default();
        Self {
            scale: defaults.scale,
            background: defaults.background.to_string(),
            format: ImageKind::Jpeg,
            quality: 90,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub typing_delay_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    pub frontend: Frontend,
    pub image: ImageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            typing_delay_ms: DEFAULT_TYPING_DELAY.as_millis() as u64,
            export_dir: None,
            frontend: Frontend::default(),
            image: ImageConfig::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load `path`, or the default location when `path` is `None`.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    debug!("no config at {}, using defaults", path.display());
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Command line flags win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.plain {
            self.frontend = Frontend::Plain;
        }
        if let Some(ms) = cli.typing_delay_ms {
            self.typing_delay_ms = ms;
        }
        if let Some(dir) = &cli.export_dir {
            self.export_dir = Some(dir.clone());
        }
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn capture_options(&self) -> Result<CaptureOptions> {
        ensure!(
            (1..=MAX_SCALE).contains(&self.image.scale),
            "Invalid [image] scale {}, expected 1 to {MAX_SCALE}",
            self.image.scale
        );
        let background: Rgb = self
            .image
            .background
            .parse()
            .context("Invalid [image] background")?;
        let format = match self.image.format {
            ImageKind::Jpeg => ImageFormat::Jpeg {
                quality: self.image.quality.clamp(1, 100),
            },
            ImageKind::Png => ImageFormat::Png,
        };
        Ok(CaptureOptions::default()
            .with_scale(self.image.scale)
            .with_background(background)
            .with_format(format))
    }

    /// Exporter for the configured directory, created if missing.
    pub fn exporter(&self) -> Result<Exporter> {
        let Some(dir) = &self.export_dir else {
            return Ok(Exporter::default());
        };
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
        Ok(Exporter::new(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_match_the_journal() {
        let config = Config::default();
        assert_eq!(config.typing_delay(), DEFAULT_TYPING_DELAY);
        assert_eq!(config.frontend, Frontend::Tui);
        assert_eq!(config.capture_options().unwrap(), CaptureOptions::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml("frontend = \"plain\"\n\n[image]\nformat = \"png\"\n").unwrap();
        assert_eq!(config.frontend, Frontend::Plain);
        assert_eq!(config.typing_delay_ms, 1500);
        assert_eq!(config.image.scale, 2);
        assert_eq!(config.capture_options().unwrap().format, ImageFormat::Png);
    }

    #[test]
    fn unknown_frontend_is_rejected() {
        assert!(Config::from_toml("frontend = \"gui\"").is_err());
    }

    #[test]
    fn bad_background_is_reported() {
        let mut config = Config::default();
        config.image.background = "lavender".to_string();
        let err = config.capture_options().unwrap_err();
        assert!(err.to_string().contains("background"));
    }

    #[test]
    fn scale_out_of_range_is_rejected() {
        let mut config = Config::default();
        for scale in [0, MAX_SCALE + 1, u32::MAX / 4] {
            config.image.scale = scale;
            let err = config.capture_options().unwrap_err();
            assert!(err.to_string().contains("scale"), "{err}");
        }
        config.image.scale = MAX_SCALE;
        assert_eq!(config.capture_options().unwrap().scale, MAX_SCALE);
    }

    #[test]
    fn jpeg_quality_is_clamped() {
        let mut config = Config::default();
        config.image.quality = 0;
        assert_eq!(
            config.capture_options().unwrap().format,
            ImageFormat::Jpeg { quality: 1 }
        );
    }

    #[test]
    fn cli_overrides_file() {
        let cli = Cli::try_parse_from([
            "dream-mate",
            "--plain",
            "--typing-delay-ms",
            "0",
            "--export-dir",
            "out",
        ])
        .unwrap();
        let mut config = Config::default();
        config.apply_cli(&cli);
        assert_eq!(config.frontend, Frontend::Plain);
        assert_eq!(config.typing_delay(), Duration::ZERO);
        assert_eq!(config.export_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn toml_round_trip_omits_missing_export_dir() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(!text.contains("export_dir"));
        assert!(text.contains("[image]"));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "typing_delay_ms = 10\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.typing_delay_ms, 10);
    }

    #[test]
    fn exporter_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("journals").join("2026");
        let config = Config {
            export_dir: Some(target.clone()),
            ..Config::default()
        };
        let exporter = config.exporter().unwrap();
        assert!(target.is_dir());
        assert_eq!(exporter.dir(), target.as_path());
    }
}
