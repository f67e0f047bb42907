//! Session-oriented encoding: render every frame of a countdown into a [`FrameSink`].

use crate::audio::beep::{BeepPlan, synthesize_beep_track};
use crate::audio::pcm::{TempFileGuard, temp_path};
use crate::config::RenderConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::frame::FrameRgb;
use crate::render::renderer::FrameRenderer;
use crate::render::text::FontFace;
use crate::timer::{frame_time_secs, progress_percent, total_frames};
use std::path::Path;

/// Options for [`CountdownSession::render_range`] and [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct EncodeOpts {
    /// Synthesize the beep track and hand it to the sink.
    pub enable_audio: bool,
    /// Replace an existing output file (MP4 output only).
    pub overwrite: bool,
    /// Beep parameters used when audio is enabled.
    pub beeps: BeepPlan,
}

impl Default for EncodeOpts {
    fn default() -> Self {
        Self {
            enable_audio: true,
            overwrite: true,
            beeps: BeepPlan::default(),
        }
    }
}

/// Progress report sent after each frame reaches the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeProgress {
    /// Frames written so far.
    pub frames_done: u64,
    /// Frames in the countdown.
    pub frames_total: u64,
    /// `frames_done * 100 / frames_total`, rounded down.
    pub percent: u8,
}

/// Statistics for a finished encode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Frames in the countdown.
    pub frames_total: u64,
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
    /// Samples in the beep track (0 when audio is disabled).
    pub audio_samples: u64,
}

/// Renders one countdown configuration, frame by frame.
///
/// The session owns a snapshot of the configuration; changing the caller's copy afterwards does not
/// affect an encode in progress.
pub struct CountdownSession {
    config: RenderConfig,
    opts: EncodeOpts,
    fps: Fps,
    frames_total: u64,
    renderer: FrameRenderer,
}

impl CountdownSession {
    /// Validate `config` and prepare a session.
    pub fn new(config: RenderConfig, opts: EncodeOpts) -> CountdownResult<Self> {
        config.validate()?;
        let fps = Fps::new(config.fps)?;
        let frames_total = total_frames(config.duration_secs, fps);
        Ok(Self {
            config,
            opts,
            fps,
            frames_total,
            renderer: FrameRenderer::new(),
        })
    }

    /// Configuration snapshot this session renders.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of frames in the countdown, `duration * fps`.
    pub fn frames_total(&self) -> u64 {
        self.frames_total
    }

    /// Glyph source the readout is drawn with. The font is loaded once and shared with rendering.
    pub fn font_face(&mut self) -> FontFace {
        self.renderer.font_face(&self.config)
    }

    /// Render frame `idx` (at `t = idx / fps`).
    pub fn render_frame(&mut self, idx: FrameIndex) -> CountdownResult<FrameRgb> {
        if idx.0 >= self.frames_total {
            return Err(CountdownError::validation(format!(
                "frame {} is outside the countdown (0..{})",
                idx.0, self.frames_total
            )));
        }
        let t = frame_time_secs(idx, self.fps);
        self.renderer.render(&self.config, t)
    }

    /// Render the frame at `fraction` (0..=1) of the countdown.
    pub fn render_preview(&mut self, fraction: f64) -> CountdownResult<FrameRgb> {
        self.renderer.render_preview(&self.config, fraction)
    }

    /// Render every frame into `sink` in order, calling `progress` after each one.
    ///
    /// When audio is enabled the beep track is synthesized first and passed to the sink as a
    /// temporary raw PCM file, removed once the sink has finished.
    #[tracing::instrument(skip_all, fields(frames = self.frames_total, audio = self.opts.enable_audio))]
    pub fn render_range(
        &mut self,
        sink: &mut dyn FrameSink,
        progress: &mut dyn FnMut(EncodeProgress),
    ) -> CountdownResult<EncodeStats> {
        let mut stats = EncodeStats {
            frames_total: self.frames_total,
            ..EncodeStats::default()
        };

        let mut audio_tmp = TempFileGuard(None);
        let audio = if self.opts.enable_audio {
            let track = synthesize_beep_track(self.config.duration_secs, &self.opts.beeps);
            let path = temp_path("countdown_beeps", "s16le");
            track.write_s16le(&path)?;
            audio_tmp.0 = Some(path.clone());
            stats.audio_samples = track.samples.len() as u64;
            Some(AudioInputConfig {
                path,
                sample_rate: track.sample_rate,
                channels: track.channels,
            })
        } else {
            None
        };

        sink.begin(SinkConfig {
            width: self.config.width,
            height: self.config.height,
            fps: self.fps,
            audio,
        })?;

        for f in 0..self.frames_total {
            let idx = FrameIndex(f);
            let frame = self.render_frame(idx)?;
            sink.push_frame(idx, &frame)?;
            stats.frames_rendered += 1;
            progress(EncodeProgress {
                frames_done: stats.frames_rendered,
                frames_total: self.frames_total,
                percent: progress_percent(stats.frames_rendered, self.frames_total),
            });
        }

        sink.end()?;
        drop(audio_tmp);

        tracing::info!(
            frames = stats.frames_rendered,
            audio_samples = stats.audio_samples,
            "countdown rendered"
        );
        Ok(stats)
    }
}

/// Encode `config` to an MP4 at `out_path` with the system `ffmpeg`.
#[tracing::instrument(skip_all, fields(out = %out_path.as_ref().display()))]
pub fn render_to_mp4(
    config: &RenderConfig,
    out_path: impl AsRef<Path>,
    opts: EncodeOpts,
    progress: &mut dyn FnMut(EncodeProgress),
) -> CountdownResult<EncodeStats> {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        overwrite: opts.overwrite,
        ..FfmpegSinkOpts::new(out_path.as_ref())
    });
    let mut session = CountdownSession::new(config.clone(), opts)?;
    session.render_range(&mut sink, progress)
}

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
