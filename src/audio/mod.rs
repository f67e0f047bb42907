//! Beep track synthesis and raw PCM output.

/// Countdown beep schedule and waveform synthesis.
pub mod beep;
/// Mono PCM tracks and their on-disk form.
pub mod pcm;
