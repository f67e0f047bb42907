use crate::foundation::error::{CountdownError, CountdownResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Absolute 0-based frame index on the countdown timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Integer frames-per-second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps(u32);

impl Fps {
    /// Create a validated FPS value.
    pub fn new(fps: u32) -> CountdownResult<Self> {
        if fps == 0 {
            return Err(CountdownError::validation("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    /// Frames per second as an integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        1.0 / self.as_f64()
    }

    /// Timestamp of frame `idx` in seconds (`idx / fps`).
    pub fn frame_time_secs(self, idx: FrameIndex) -> f64 {
        (idx.0 as f64) / self.as_f64()
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest edge the CPU rasterizer accepts.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> CountdownResult<Self> {
        if width == 0 || height == 0 {
            return Err(CountdownError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if width > Self::MAX_EDGE || height > Self::MAX_EDGE {
            return Err(CountdownError::validation(format!(
                "canvas width/height must be <= {}",
                Self::MAX_EDGE
            )));
        }
        Ok(Self { width, height })
    }

    /// Integer pixel center (`width / 2`, `height / 2`).
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width / 2), f64::from(self.height / 2))
    }

    /// Number of pixels on the canvas.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
