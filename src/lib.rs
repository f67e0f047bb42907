//! Countdown renders countdown-timer videos.
//!
//! Each frame shows the remaining time as `MM:SS`, optionally with a circular progress arc, and the
//! final seconds carry a beep track. The API is session-oriented:
//!
//! - Build and validate a [`RenderConfig`]
//! - Render single frames with [`FrameRenderer`] (or [`render_frame`] / [`render_preview`])
//! - Stream a whole countdown into a [`FrameSink`] with [`CountdownSession`], or straight to MP4 with
//!   [`render_to_mp4`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Beep track synthesis.
pub mod audio;
/// Render configuration.
pub mod config;
/// Encoding sinks.
pub mod encode;
/// CPU frame rendering.
pub mod render;
/// Session-oriented encoding API.
pub mod session;
/// Countdown timeline math.
pub mod timer;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex};
pub use crate::foundation::error::{CountdownError, CountdownResult};

pub use crate::audio::beep::{Beep, BeepPlan, beep_schedule, beep_waveform, synthesize_beep_track};
pub use crate::audio::pcm::AudioTrack;
pub use crate::config::color::Rgb8;
pub use crate::config::{
    ConfigBounds, RenderConfig, Style, default_font_path, default_output_dir,
};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::render::frame::FrameRgb;
pub use crate::render::renderer::{FrameRenderer, FrameState, render_frame, render_preview};
pub use crate::render::text::{FontFace, FontResolver};
pub use crate::session::{
    CountdownSession, EncodeOpts, EncodeProgress, EncodeStats, render_to_mp4,
};
pub use crate::timer::{
    arc_end_angle_deg, arc_progress, format_mmss, remaining_seconds, total_frames,
};
