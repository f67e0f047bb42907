use crate::audio::pcm::AudioTrack;
use std::f64::consts::TAU;

/// Sample rate of the synthesized beep track, in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Parameters of the countdown beep track.
#[derive(Clone, Debug, PartialEq)]
pub struct BeepPlan {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Length of each beep in seconds.
    pub beep_secs: f64,
    /// Tone of every beep except the last.
    pub freq_hz: f64,
    /// Tone of the beep in the final second.
    pub final_freq_hz: f64,
    /// Beeps sound during this many trailing seconds.
    pub window_secs: u32,
}

impl Default for BeepPlan {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            beep_secs: 0.1,
            freq_hz: 1000.0,
            final_freq_hz: 1500.0,
            window_secs: 10,
        }
    }
}

/// One scheduled beep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beep {
    /// Whole second (from the start of the countdown) the beep starts on.
    pub second: u32,
    /// Tone in Hz.
    pub freq_hz: f64,
}

impl BeepPlan {
    /// Samples per beep.
    pub fn beep_len(&self) -> usize {
        (f64::from(self.sample_rate) * self.beep_secs).round().max(0.0) as usize
    }

    /// Beeps for a countdown of `duration_secs`, in time order.
    ///
    /// One beep per second in `[max(0, duration - window), duration)`; the last one uses
    /// `final_freq_hz`.
    pub fn schedule(&self, duration_secs: u32) -> Vec<Beep> {
        let first = duration_secs.saturating_sub(self.window_secs);
        (first..duration_secs)
            .map(|second| Beep {
                second,
                freq_hz: if second + 1 == duration_secs {
                    self.final_freq_hz
                } else {
                    self.freq_hz
                },
            })
            .collect()
    }
}

/// Beep schedule with the default [`BeepPlan`].
pub fn beep_schedule(duration_secs: u32) -> Vec<Beep> {
    BeepPlan::default().schedule(duration_secs)
}

/// `len` samples of a full-scale sine: `round(32767 * sin(2π * freq * i / sample_rate))`.
pub fn beep_waveform(freq_hz: f64, sample_rate: u32, len: usize) -> Vec<i16> {
    let rate = f64::from(sample_rate);
    (0..len)
        .map(|i| {
            let v = (f64::from(i16::MAX) * (TAU * freq_hz * i as f64 / rate).sin()).round();
            v.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
        })
        .collect()
}

/// Mono track of `duration_secs` with the plan's beeps overlaid on silence.
///
/// Beeps that run past the end of the buffer are truncated; overlapping samples saturate.
pub fn synthesize_beep_track(duration_secs: u32, plan: &BeepPlan) -> AudioTrack {
    let rate = plan.sample_rate as usize;
    let mut samples = vec![0i16; duration_secs as usize * rate];
    let beep_len = plan.beep_len();

    for beep in plan.schedule(duration_secs) {
        let start = beep.second as usize * rate;
        if start >= samples.len() {
            break;
        }
        let wave = beep_waveform(beep.freq_hz, plan.sample_rate, beep_len);
        for (dst, s) in samples[start..].iter_mut().zip(wave) {
            *dst = dst.saturating_add(s);
        }
    }

    tracing::debug!(
        duration_secs,
        samples = samples.len(),
        "synthesized beep track"
    );
    AudioTrack::mono(plan.sample_rate, samples)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/beep.rs"]
mod tests;
