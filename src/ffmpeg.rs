use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    cell::RefCell,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::domain::{ConversionJob, Dimensions, VideoInfo};
use crate::error::{RepurpError, Result};

/// Environment variable naming an explicit FFmpeg binary
pub const FFMPEG_PATH_ENV: &str = "REPURP_FFMPEG_PATH";

/// How many trailing stderr lines a failure carries
const STDERR_TAIL_LINES: usize = 20;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Duration: (?P<duration>\d{2}:\d{2}:\d{2}\.\d{2})").unwrap());
static DIMENSIONS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Video:.*? (\d{2,5})x(\d{2,5})").unwrap());
static FPS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*fps").unwrap());

/// Runs the external transcoder with a prepared argument list.
///
/// Implementations block until the process exits and turn a nonzero
/// exit into `TranscoderFailed`.
pub trait Transcoder {
    fn run(&self, args: &[String]) -> Result<()>;
}

/// FFmpeg wrapper
pub struct FFmpeg {
    ffmpeg_path: PathBuf,
}

impl FFmpeg {
    /// Create new FFmpeg instance
    pub fn new() -> Result<Self> {
        let ffmpeg_path = Self::find_ffmpeg()?;
        Ok(Self { ffmpeg_path })
    }

    pub fn path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// Find the FFmpeg binary.
    ///
    /// Search priority (highest to lowest):
    /// 1. `REPURP_FFMPEG_PATH` environment variable
    /// 2. `ffmpeg` next to the repurp executable
    /// 3. System PATH
    fn find_ffmpeg() -> Result<PathBuf> {
        if let Ok(explicit_path) = std::env::var(FFMPEG_PATH_ENV) {
            let path = PathBuf::from(&explicit_path);
            if path.is_file() {
                tracing::info!("Using FFmpeg from {}: {}", FFMPEG_PATH_ENV, explicit_path);
                return Ok(path);
            }
            tracing::warn!("{} set but invalid: {}", FFMPEG_PATH_ENV, explicit_path);
            return Err(RepurpError::TranscoderNotFound);
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        if let Some(dir) = exe_dir {
            let bundled = if cfg!(windows) {
                dir.join("ffmpeg.exe")
            } else {
                dir.join("ffmpeg")
            };

            if bundled.is_file() {
                tracing::info!("Using bundled FFmpeg: {}", bundled.display());
                return Ok(bundled);
            }
        }

        match which::which("ffmpeg") {
            Ok(path) => {
                tracing::info!("Using FFmpeg from system PATH: {}", path.display());
                Ok(path)
            }
            Err(_) => Err(RepurpError::TranscoderNotFound),
        }
    }

    /// Get video information.
    ///
    /// `ffmpeg -i` without an output always exits nonzero, so the exit
    /// status is only consulted for a missing file.
    pub fn get_video_info(&self, video_path: &str) -> Result<VideoInfo> {
        let output = Command::new(&self.ffmpeg_path)
            .args(["-hide_banner", "-i", video_path])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(spawn_error)?;

        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success()
            && (stderr.contains("No such file") || stderr.contains("does not exist"))
        {
            return Err(RepurpError::MissingInput(video_path.to_string()));
        }

        Ok(parse_video_info(&stderr))
    }
}

impl Transcoder for FFmpeg {
    fn run(&self, args: &[String]) -> Result<()> {
        tracing::debug!("{} {}", self.ffmpeg_path.display(), args.join(" "));

        // stdin is closed so FFmpeg never waits on an overwrite prompt
        let output = Command::new(&self.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(spawn_error)?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(RepurpError::TranscoderFailed {
            code: output.status.code(),
            stderr: stderr_tail(&stderr),
        })
    }
}

/// Prints each command instead of running it
#[derive(Default)]
pub struct DryRun {
    commands: RefCell<Vec<Vec<String>>>,
}

impl DryRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands.borrow().clone()
    }
}

impl Transcoder for DryRun {
    fn run(&self, args: &[String]) -> Result<()> {
        tracing::debug!("dry run: ffmpeg {}", args.join(" "));
        self.commands.borrow_mut().push(args.to_vec());
        Ok(())
    }
}

fn spawn_error(e: std::io::Error) -> RepurpError {
    if e.kind() == ErrorKind::NotFound {
        RepurpError::TranscoderNotFound
    } else {
        RepurpError::Io(e)
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Scale to fit inside the target box, then center-pad to exactly fill it
pub fn build_filter(target: Dimensions) -> String {
    format!(
        "scale={t}:force_original_aspect_ratio=decrease,pad={t}:(ow-iw)/2:(oh-ih)/2,setsar=1",
        t = target
    )
}

/// FFmpeg arguments for one job, without the binary itself
pub fn build_args(job: &ConversionJob, overwrite: bool) -> Vec<String> {
    let codec = if job.extension.eq_ignore_ascii_case("webm") {
        "libvpx-vp9"
    } else {
        "libx264"
    };

    let mut args: Vec<String> = vec![
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-i".to_string(),
        job.input_path.to_string_lossy().to_string(),
        "-vf".to_string(),
        build_filter(job.target),
        "-c:v".to_string(),
        codec.to_string(),
        "-b:v".to_string(),
        job.bitrate.to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
    ];

    if let Some(max_duration) = job.max_duration {
        args.extend(["-t".to_string(), max_duration.to_string()]);
    }

    // -n makes FFmpeg fail instead of clobbering an existing rendition
    args.push(if overwrite { "-y" } else { "-n" }.to_string());
    args.push(job.output_path.to_string_lossy().to_string());

    args
}

pub fn parse_video_info(output: &str) -> VideoInfo {
    let duration = parse_duration(output);
    let duration_seconds = duration.as_deref().and_then(duration_to_seconds);

    VideoInfo {
        duration,
        duration_seconds,
        dimensions: parse_dimensions(output),
        fps: parse_fps(output),
    }
}

fn parse_duration(output: &str) -> Option<String> {
    DURATION_RE
        .captures(output)
        .map(|cap| cap["duration"].to_string())
}

fn parse_dimensions(output: &str) -> Option<(u32, u32)> {
    DIMENSIONS_RE.captures(output).and_then(|cap| {
        let width = cap.get(1)?.as_str().parse().ok()?;
        let height = cap.get(2)?.as_str().parse().ok()?;
        Some((width, height))
    })
}

fn parse_fps(output: &str) -> Option<f32> {
    FPS_RE
        .captures(output)
        .and_then(|cap| cap.get(1)?.as_str().parse().ok())
}

fn duration_to_seconds(duration: &str) -> Option<f64> {
    let parts: Vec<&str> = duration.split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = parts[2].parse().ok()?;

    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}
