//! Render configuration snapshot.
//!
//! A [`RenderConfig`] is an immutable value handed to every render and encode call. Nothing in the
//! crate retains configuration between calls.

/// Color values and parsing.
pub mod color;

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{CountdownError, CountdownResult};
use color::Rgb8;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default font path.
pub const FONT_ENV: &str = "COUNTDOWN_FONT";
/// Environment variable overriding the default output directory.
pub const OUTPUT_DIR_ENV: &str = "COUNTDOWN_OUTPUT_DIR";

/// Visual style of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Digits plus a circular progress arc swept clockwise from the top.
    #[default]
    Arc,
    /// Digits only.
    PlainDigits,
}

/// Everything needed to render a countdown frame or video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Countdown length in whole seconds.
    pub duration_secs: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Font size in pixels.
    pub font_size: u32,
    /// Font file used for the readout. Unreadable fonts fall back to built-in glyphs.
    pub font_path: PathBuf,
    /// Readout color.
    pub text_color: Rgb8,
    /// Progress arc color.
    pub arc_color: Rgb8,
    /// Canvas fill color.
    pub background_color: Rgb8,
    /// Style variant.
    pub style: Style,
    /// Outer radius of the progress arc in pixels.
    pub arc_radius: u32,
    /// Stroke width of the progress arc in pixels.
    pub arc_width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1920,
            duration_secs: 15,
            fps: 30,
            font_size: 280,
            font_path: default_font_path(),
            text_color: Rgb8::WHITE,
            arc_color: Rgb8::WHITE,
            background_color: Rgb8::BLACK,
            style: Style::Arc,
            arc_radius: 700,
            arc_width: 60,
        }
    }
}

impl RenderConfig {
    /// Load a (possibly partial) JSON configuration; missing fields take their defaults.
    pub fn from_json_path(path: impl AsRef<Path>) -> CountdownResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            CountdownError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json_str(s: &str) -> CountdownResult<Self> {
        serde_json::from_str(s).map_err(|e| CountdownError::serde(e.to_string()))
    }

    /// Structural checks the core relies on: positive sizes, rates and durations.
    ///
    /// Caller-facing range limits live in [`ConfigBounds`] and are enforced by the
    /// input-collection layer, not here.
    pub fn validate(&self) -> CountdownResult<()> {
        Canvas::new(self.width, self.height)?;
        Fps::new(self.fps)?;
        if self.duration_secs == 0 {
            return Err(CountdownError::validation("duration_secs must be > 0"));
        }
        if self.font_size == 0 {
            return Err(CountdownError::validation("font_size must be > 0"));
        }
        if self.style == Style::Arc {
            if self.arc_radius == 0 {
                return Err(CountdownError::validation("arc_radius must be > 0"));
            }
            if self.arc_width == 0 {
                return Err(CountdownError::validation("arc_width must be > 0"));
            }
        }
        Ok(())
    }

    /// Canvas described by this configuration (unvalidated).
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Duration as floating-point seconds.
    pub fn duration_f64(&self) -> f64 {
        f64::from(self.duration_secs)
    }

    /// Default output file name, `countdown_{duration}s_{width}p.mp4`.
    pub fn default_output_file_name(&self) -> String {
        format!("countdown_{}s_{}p.mp4", self.duration_secs, self.width)
    }

    /// Default output path: [`Self::default_output_file_name`] inside `dir`.
    pub fn default_output_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(self.default_output_file_name())
    }
}

/// Default font path: `$COUNTDOWN_FONT`, else a platform font location.
pub fn default_font_path() -> PathBuf {
    if let Some(p) = std::env::var_os(FONT_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(p);
    }
    if cfg!(target_os = "macos") {
        PathBuf::from("/System/Library/Fonts/Poppins-Black.ttf")
    } else if cfg!(windows) {
        PathBuf::from(r"C:\Windows\Fonts\arialbd.ttf")
    } else {
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf")
    }
}

/// Default output directory: `$COUNTDOWN_OUTPUT_DIR`, else `$HOME/Downloads`, else `.`.
pub fn default_output_dir() -> PathBuf {
    if let Some(p) = std::env::var_os(OUTPUT_DIR_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(p);
    }
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    match home {
        Some(h) if !h.is_empty() => PathBuf::from(h).join("Downloads"),
        _ => PathBuf::from("."),
    }
}

/// Inclusive ranges accepted by the interactive input layer.
#[derive(Debug, Clone)]
pub struct ConfigBounds {
    /// Canvas width and height.
    pub dimension: RangeInclusive<u32>,
    /// Frames per second.
    pub fps: RangeInclusive<u32>,
    /// Countdown length in seconds.
    pub duration_secs: RangeInclusive<u32>,
    /// Font size in pixels.
    pub font_size: RangeInclusive<u32>,
    /// Arc radius in pixels.
    pub arc_radius: RangeInclusive<u32>,
    /// Arc stroke width in pixels.
    pub arc_width: RangeInclusive<u32>,
}

impl Default for ConfigBounds {
    fn default() -> Self {
        Self {
            dimension: 100..=3840,
            fps: 1..=60,
            duration_secs: 1..=3600,
            font_size: 10..=1000,
            arc_radius: 10..=1920,
            arc_width: 1..=100,
        }
    }
}

impl ConfigBounds {
    /// Check every numeric field of `cfg` against these bounds.
    pub fn check(&self, cfg: &RenderConfig) -> CountdownResult<()> {
        fn within(name: &str, v: u32, r: &RangeInclusive<u32>) -> CountdownResult<()> {
            if r.contains(&v) {
                Ok(())
            } else {
                Err(CountdownError::validation(format!(
                    "{name} {v} is outside {}..={}",
                    r.start(),
                    r.end()
                )))
            }
        }

        within("width", cfg.width, &self.dimension)?;
        within("height", cfg.height, &self.dimension)?;
        within("fps", cfg.fps, &self.fps)?;
        within("duration_secs", cfg.duration_secs, &self.duration_secs)?;
        within("font_size", cfg.font_size, &self.font_size)?;
        within("arc_radius", cfg.arc_radius, &self.arc_radius)?;
        within("arc_width", cfg.arc_width, &self.arc_width)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/config.rs"]
mod tests;
