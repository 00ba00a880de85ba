use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::catalog;
use crate::domain::{ConversionJob, Dimensions, FileMetadata, Platform, PlatformSpec, Style, VideoInfo};
use crate::error::RepurpError;
use crate::fs::{format_duration, format_size};

/// Print application header
pub fn print_header() {
    println!();
    println!(
        "{}",
        format!("  Repurp v{}", env!("CARGO_PKG_VERSION"))
            .bright_cyan()
            .bold()
    );
    println!("{}", "━".repeat(50).dimmed());
    println!();
}

/// Print the supported platforms and their styles
pub fn print_catalog() {
    println!("{}", "Platforms".bright_white().bold());
    println!("{}", "─".repeat(30).dimmed());

    for spec in catalog::all() {
        println!(
            "  {} {} {}",
            format!("{:<10}", spec.platform.name()).bright_cyan().bold(),
            format!("bitrate {}", spec.bitrate).bright_yellow(),
            format!("max {}", format_duration(spec.max_duration)).dimmed()
        );
        for (style, dims) in spec.styles {
            println!(
                "    {} {}x{}  {}",
                format!("{:<10}", style.name()).bright_white(),
                dims.width,
                dims.height,
                spec.job_label(*style).dimmed()
            );
        }
    }

    println!();
}

/// Print video information plus the duration caps that would trim it
pub fn print_video_info(meta: &FileMetadata, info: &VideoInfo) {
    println!("{}", "Video Information".bright_white().bold());
    println!("{}", "─".repeat(30).dimmed());

    println!("  {} {}", "File:".dimmed(), meta.path.bright_white());
    println!("  {} {}", "Size:".dimmed(), format_size(meta.size).bright_yellow());

    if !meta.mime_type.is_empty() {
        println!("  {} {}", "Type:".dimmed(), meta.mime_type.bright_white());
    }

    if let Some(duration) = &info.duration {
        println!("  {} {}", "Duration:".dimmed(), duration.bright_white());
    }

    if let Some((w, h)) = info.dimensions {
        println!(
            "  {} {}x{}",
            "Resolution:".dimmed(),
            w.to_string().bright_white(),
            h.to_string().bright_white()
        );
    }

    if let Some(fps) = info.fps {
        println!(
            "  {} {} fps",
            "Frame rate:".dimmed(),
            format!("{:.2}", fps).bright_white()
        );
    }

    println!();

    if let Some(seconds) = info.duration_seconds {
        let trimmed = trimmed_platforms(seconds);
        if !trimmed.is_empty() {
            println!("{}", "Duration Limits".bright_white().bold());
            println!("{}", "─".repeat(30).dimmed());
            for spec in trimmed {
                println!(
                    "  {} {} {}",
                    "⚠".bright_yellow(),
                    format!("{:<10}", spec.platform.name()).bright_white(),
                    format!("trimmed to {}", format_duration(spec.max_duration)).bright_yellow()
                );
            }
            println!();
        }
    }
}

/// Platforms whose duration cap is shorter than `seconds`
fn trimmed_platforms(seconds: f64) -> Vec<&'static PlatformSpec> {
    catalog::all()
        .iter()
        .filter(|spec| matches!(spec.max_duration, Some(max) if seconds > f64::from(max)))
        .collect()
}

/// Print one job before it runs
pub fn print_job(index: usize, total: usize, job: &ConversionJob) {
    println!(
        "{} {} {}: {} {} {}",
        "→".bright_blue(),
        format!("[{}/{}]", index, total).dimmed(),
        job.label.bright_white().bold(),
        format!("{}x{}", job.target.width, job.target.height).bright_cyan(),
        job.bitrate.bright_yellow(),
        format!("max {}", format_duration(job.max_duration)).dimmed()
    );
}

/// Print the command a dry run would have executed
pub fn print_command(args: &[String]) {
    println!("  {} ffmpeg {}", "$".dimmed(), args.join(" "));
}

/// Print rendered outputs
pub fn print_results(outputs: &BTreeMap<String, PathBuf>, elapsed: std::time::Duration, dry_run: bool) {
    println!();
    println!("{}", "━".repeat(50).dimmed());
    let title = if dry_run {
        "Dry run complete, nothing rendered."
    } else {
        "Rendering complete!"
    };
    println!("{} {}", "✓".bright_green().bold(), title.bright_green().bold());
    println!();

    for (label, path) in outputs {
        println!(
            "  {} {}",
            format!("{:<20}", label).dimmed(),
            path.display().to_string().bright_cyan()
        );
    }

    println!();
    println!("  {} {:.2}s", "Time:".dimmed(), elapsed.as_secs_f64());
    println!();
}

/// Print error message with actionable hints based on error type
pub fn print_error_with_hint(error: &RepurpError) {
    eprintln!();
    eprintln!(
        "{} {}",
        "✗".bright_red().bold(),
        error.to_string().bright_red()
    );
    eprintln!();

    let hint = match error {
        RepurpError::TranscoderNotFound => "💡 How to install FFmpeg:\n\
             \n\
             Windows:\n\
               • winget install Gyan.FFmpeg\n\
             \n\
             macOS:\n\
               • brew install ffmpeg\n\
             \n\
             Linux:\n\
               • sudo apt install ffmpeg  (Debian/Ubuntu)\n\
               • sudo dnf install ffmpeg  (Fedora)\n\
             \n\
             Or point REPURP_FFMPEG_PATH at an existing binary."
            .to_string(),
        RepurpError::UnsupportedPlatform(_) => {
            let names: Vec<&str> = Platform::ALL.iter().map(|p| p.name()).collect();
            format!("💡 Supported platforms: {}", names.join(", "))
        }
        RepurpError::UnsupportedStyle { platform, .. } => {
            match platform.parse::<Platform>() {
                Ok(platform) => {
                    let styles: Vec<&str> =
                        catalog::lookup(platform).styles().map(|s| s.name()).collect();
                    format!("💡 Styles for {}: {}", platform, styles.join(", "))
                }
                Err(_) => "💡 Run `repurp --list` to see every platform and style.".to_string(),
            }
        }
        RepurpError::MissingInput(path) => format!(
            "💡 Suggestions:\n\
             \n\
               • Check if the file path is correct: {}\n\
               • Make sure you have permission to access the file\n\
               • On Windows, use quotes around paths with spaces",
            path
        ),
        RepurpError::OutputExists(path) => format!(
            "💡 {} was rendered before.\n\
             \n\
               • Rerun with -y to overwrite it\n\
               • Or move it out of the output directory",
            path
        ),
        RepurpError::TranscoderFailed { .. } => "💡 Possible solutions:\n\
             \n\
               • Verify the input video plays and is not corrupted\n\
               • Check there is enough disk space\n\
               • Rerun with -v to see the exact FFmpeg command"
            .to_string(),
        RepurpError::Io(io_error) => format!(
            "💡 File system error:\n\
             \n\
               {}\n\
             \n\
               • Verify you have write permissions beside the input file",
            io_error
        ),
    };

    eprintln!("{}", hint.bright_blue());
    eprintln!();
}

// ============================================================================
// JSON Output
// ============================================================================

#[derive(Serialize)]
pub struct StyleJson {
    pub style: Style,
    pub label: String,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}

#[derive(Serialize)]
pub struct PlatformJson {
    pub platform: Platform,
    pub bitrate: &'static str,
    pub max_duration: Option<u32>,
    pub styles: Vec<StyleJson>,
}

impl From<&PlatformSpec> for PlatformJson {
    fn from(spec: &PlatformSpec) -> Self {
        Self {
            platform: spec.platform,
            bitrate: spec.bitrate,
            max_duration: spec.max_duration,
            styles: spec
                .styles
                .iter()
                .map(|(style, dims)| StyleJson {
                    style: *style,
                    label: spec.job_label(*style),
                    dimensions: *dims,
                })
                .collect(),
        }
    }
}

/// JSON output for video information
#[derive(Serialize)]
pub struct VideoInfoJson {
    #[serde(flatten)]
    pub file: FileMetadata,
    #[serde(flatten)]
    pub info: VideoInfo,
    pub trimmed_for: Vec<Platform>,
}

/// JSON output for a finished run
#[derive(Serialize)]
pub struct RunResultJson<'a> {
    pub success: bool,
    pub dry_run: bool,
    pub elapsed_seconds: f64,
    pub outputs: &'a BTreeMap<String, PathBuf>,
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

pub fn print_catalog_json() {
    let platforms: Vec<PlatformJson> = catalog::all().iter().map(PlatformJson::from).collect();
    print_json(&platforms);
}

pub fn print_video_info_json(meta: &FileMetadata, info: &VideoInfo) {
    let trimmed_for = info
        .duration_seconds
        .map(|s| trimmed_platforms(s).iter().map(|spec| spec.platform).collect())
        .unwrap_or_default();

    print_json(&VideoInfoJson {
        file: meta.clone(),
        info: info.clone(),
        trimmed_for,
    });
}

pub fn print_results_json(outputs: &BTreeMap<String, PathBuf>, elapsed: std::time::Duration, dry_run: bool) {
    print_json(&RunResultJson {
        success: true,
        dry_run,
        elapsed_seconds: elapsed.as_secs_f64(),
        outputs,
    });
}

/// Print an error as a JSON object on stderr
pub fn print_error_json(error: &RepurpError) {
    let value = serde_json::json!({ "success": false, "error": error.to_string() });
    eprintln!("{}", value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_platforms() {
        // 90s exceeds instagram (60) only
        let names: Vec<&str> = trimmed_platforms(90.0)
            .iter()
            .map(|spec| spec.platform.name())
            .collect();
        assert_eq!(names, vec!["instagram"]);

        assert!(trimmed_platforms(30.0).is_empty());
        // unbounded platforms never trim
        let long: Vec<Platform> = trimmed_platforms(10_000.0)
            .iter()
            .map(|spec| spec.platform)
            .collect();
        assert!(!long.contains(&Platform::Broadcast));
        assert_eq!(long.len(), 6);
    }

    #[test]
    fn test_platform_json_shape() {
        let json = serde_json::to_value(PlatformJson::from(catalog::lookup(Platform::Twitter))).unwrap();
        assert_eq!(json["platform"], "twitter");
        assert_eq!(json["bitrate"], "2M");
        assert_eq!(json["max_duration"], 140);
        assert_eq!(json["styles"][1]["style"], "square");
        assert_eq!(json["styles"][1]["label"], "twitter_square");
        assert_eq!(json["styles"][1]["width"], 720);
    }

    #[test]
    fn test_unbounded_duration_serializes_as_null() {
        let json = serde_json::to_value(PlatformJson::from(catalog::lookup(Platform::Vimeo))).unwrap();
        assert!(json["max_duration"].is_null());
        assert_eq!(json["styles"][0]["label"], "vimeo");
    }
}
