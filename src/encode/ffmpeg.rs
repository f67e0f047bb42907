use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::frame::FrameRgb;
use std::ffi::OsString;
use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Replace the output file if it already exists.
    pub overwrite: bool,
    /// `ffmpeg` executable, looked up on `PATH` when not absolute.
    pub program: PathBuf,
}

impl FfmpegSinkOpts {
    /// Write an MP4 to `out_path` with `ffmpeg` from `PATH`, replacing any existing file.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            program: PathBuf::from("ffmpeg"),
        }
    }
}

/// MP4 sink backed by an `ffmpeg` child process.
///
/// Frames go to the child's stdin as `rgb24` rawvideo and come out as H.264 (`yuv420p`). When
/// `SinkConfig.audio` is set, the PCM file is muxed in as AAC and the output is cut to the shorter
/// stream. Dropping a sink that has not finished kills the child.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    proc: Option<EncoderProcess>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a sink; the child is spawned in `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            proc: None,
            cfg: None,
            last_idx: None,
        }
    }

    /// Output path this sink writes to.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> CountdownResult<()> {
        if self.proc.is_some() {
            return Err(CountdownError::encode("ffmpeg sink is already running"));
        }
        let args = ffmpeg_args(&cfg, &self.opts)?;

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(CountdownError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        tracing::debug!(
            program = %self.opts.program.display(),
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.get(),
            audio = cfg.audio.is_some(),
            "starting encoder"
        );
        self.proc = Some(EncoderProcess::spawn(&self.opts.program, &args)?);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> CountdownResult<()> {
        let (Some(cfg), Some(proc)) = (self.cfg.as_ref(), self.proc.as_mut()) else {
            return Err(CountdownError::encode("ffmpeg sink not started"));
        };
        if self.last_idx.is_some_and(|last| idx <= last) {
            return Err(CountdownError::encode(format!(
                "frame {} arrived after frame {}",
                idx.0,
                self.last_idx.map_or(0, |l| l.0)
            )));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(CountdownError::validation(format!(
                "frame is {}x{}, encoder expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let expected = cfg.width as usize * cfg.height as usize * FrameRgb::BYTES_PER_PIXEL;
        if frame.data.len() != expected {
            return Err(CountdownError::validation(format!(
                "frame holds {} bytes, expected {expected}",
                frame.data.len()
            )));
        }
        self.last_idx = Some(idx);

        if let Err(write_err) = proc.write(&frame.data) {
            // The child stopped reading; its stderr says why.
            let proc = self.proc.take();
            self.cfg = None;
            let detail = proc.map(EncoderProcess::abort).unwrap_or_default();
            return Err(CountdownError::encode(format!(
                "ffmpeg stopped accepting frames at frame {} ({write_err}){}",
                idx.0,
                stderr_suffix(&detail)
            )));
        }
        Ok(())
    }

    fn end(&mut self) -> CountdownResult<()> {
        let proc = self
            .proc
            .take()
            .ok_or_else(|| CountdownError::encode("ffmpeg sink not started"))?;
        self.cfg = None;

        let (status, stderr) = proc.finish()?;
        if !status.success() {
            return Err(CountdownError::encode(format!(
                "ffmpeg failed ({status}){}",
                stderr_suffix(&stderr)
            )));
        }
        tracing::debug!(out = %self.opts.out_path.display(), "encoder finished");
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(proc) = self.proc.take() {
            let stderr = proc.abort();
            tracing::debug!(%stderr, "encoder dropped before end");
        }
    }
}

/// A running `ffmpeg` with its stdin pipe and a thread collecting stderr.
struct EncoderProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl EncoderProcess {
    fn spawn(program: &Path, args: &[OsString]) -> CountdownResult<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CountdownError::encode(format!(
                    "'{}' not found; install ffmpeg or put it on PATH",
                    program.display()
                )),
                _ => CountdownError::encode(format!(
                    "could not start '{}': {e}",
                    program.display()
                )),
            })?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf)?;
                Ok(buf)
            })
        });
        let proc = Self {
            child,
            stdin,
            stderr,
        };
        if proc.stdin.is_none() || proc.stderr.is_none() {
            proc.abort();
            return Err(CountdownError::encode("ffmpeg pipes were not opened"));
        }
        Ok(proc)
    }

    fn write(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        match self.stdin.as_mut() {
            Some(stdin) => stdin.write_all(bytes),
            None => Err(std::io::ErrorKind::BrokenPipe.into()),
        }
    }

    /// Close stdin and wait for a clean exit.
    fn finish(mut self) -> CountdownResult<(ExitStatus, String)> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| CountdownError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        Ok((status, self.collect_stderr()))
    }

    /// Stop the child (killing it if it is still running) and return whatever it logged.
    fn abort(mut self) -> String {
        drop(self.stdin.take());
        if matches!(self.child.try_wait(), Ok(None)) {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
        self.collect_stderr()
    }

    fn collect_stderr(&mut self) -> String {
        let bytes = self
            .stderr
            .take()
            .and_then(|h| h.join().ok())
            .and_then(Result::ok)
            .unwrap_or_default();
        String::from_utf8_lossy(&bytes).trim().to_owned()
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Command line for encoding `cfg` into `opts.out_path`.
pub(crate) fn ffmpeg_args(
    cfg: &SinkConfig,
    opts: &FfmpegSinkOpts,
) -> CountdownResult<Vec<OsString>> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(CountdownError::validation(
            "video width and height must be non-zero",
        ));
    }
    // yuv420p subsamples chroma 2x2.
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(CountdownError::validation(format!(
            "MP4 output needs even dimensions, got {}x{}",
            cfg.width, cfg.height
        )));
    }

    let size = format!("{}x{}", cfg.width, cfg.height);
    let rate = cfg.fps.get().to_string();
    let mut args = os_args(&[
        if opts.overwrite { "-y" } else { "-n" },
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgb24",
        "-s",
        &size,
        "-r",
        &rate,
        "-i",
        "pipe:0",
    ]);

    if let Some(audio) = cfg.audio.as_ref() {
        if audio.sample_rate == 0 || audio.channels == 0 {
            return Err(CountdownError::validation(
                "audio input needs a non-zero sample rate and channel count",
            ));
        }
        let ar = audio.sample_rate.to_string();
        let ac = audio.channels.to_string();
        args.extend(os_args(&["-f", "s16le", "-ar", &ar, "-ac", &ac, "-i"]));
        args.push(audio.path.clone().into_os_string());
    }

    args.extend(os_args(&["-c:v", "libx264", "-pix_fmt", "yuv420p"]));
    if cfg.audio.is_some() {
        args.extend(os_args(&["-c:a", "aac", "-shortest"]));
    } else {
        args.push("-an".into());
    }
    args.extend(os_args(&["-movflags", "+faststart"]));
    args.push(opts.out_path.clone().into_os_string());
    Ok(args)
}

fn os_args(items: &[&str]) -> Vec<OsString> {
    items.iter().map(OsString::from).collect()
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> CountdownResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
