//! Countdown timeline math.
//!
//! Everything here is a pure function of `(t, duration, fps)`; the renderer and encoder call these
//! per frame and never keep their own countdown state.

use crate::foundation::core::{FrameIndex, Fps};

/// Angle (degrees) where the progress arc starts: straight up.
pub const ARC_START_DEG: f64 = -90.0;

/// Whole seconds shown on the readout at time `t`.
///
/// - `t == 0` shows the full `duration`.
/// - Inside the final frame interval (`t >= duration - 1/fps`) shows `0`.
/// - Otherwise shows `max(duration - 1 - floor(t), 0)`.
///
/// `duration` and `fps` must be non-zero.
pub fn remaining_seconds(t: f64, duration_secs: u32, fps: u32) -> u32 {
    let duration = f64::from(duration_secs);
    if t == 0.0 {
        return duration_secs;
    }
    if t >= duration - 1.0 / f64::from(fps) {
        return 0;
    }
    let elapsed = t.floor().max(0.0);
    (duration - 1.0 - elapsed).max(0.0) as u32
}

/// `MM:SS` readout for a number of whole seconds.
///
/// Minutes are not wrapped at 60, so an hour-long countdown starts at `60:00`.
pub fn format_mmss(remaining_secs: u32) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

/// Fraction of the countdown elapsed at `t` (`t / duration`).
pub fn arc_progress(t: f64, duration_secs: u32) -> f64 {
    t / f64::from(duration_secs)
}

/// End angle of the progress arc in degrees, `-90 + 360 * progress`.
pub fn arc_end_angle_deg(t: f64, duration_secs: u32) -> f64 {
    ARC_START_DEG + 360.0 * arc_progress(t, duration_secs)
}

/// Number of frames in a countdown, `duration * fps`.
pub fn total_frames(duration_secs: u32, fps: Fps) -> u64 {
    u64::from(duration_secs) * u64::from(fps.get())
}

/// Timestamp of a frame, `idx / fps`.
pub fn frame_time_secs(idx: FrameIndex, fps: Fps) -> f64 {
    fps.frame_time_secs(idx)
}

/// Integer progress percentage after `frames_done` of `frames_total` frames.
pub fn progress_percent(frames_done: u64, frames_total: u64) -> u8 {
    if frames_total == 0 {
        return 100;
    }
    ((frames_done.min(frames_total) * 100) / frames_total) as u8
}

#[cfg(test)]
#[path = "../tests/unit/timer/timer.rs"]
mod tests;
