use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::RepurpError;

/// Publishing destination with its own output requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Twitter,
    Linkedin,
    Broadcast,
    Youtube,
    Facebook,
    Vimeo,
    Rumble,
}

impl Platform {
    /// Every platform, in catalog order
    pub const ALL: [Platform; 9] = [
        Platform::Instagram,
        Platform::Tiktok,
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Broadcast,
        Platform::Youtube,
        Platform::Facebook,
        Platform::Vimeo,
        Platform::Rumble,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Broadcast => "broadcast",
            Platform::Youtube => "youtube",
            Platform::Facebook => "facebook",
            Platform::Vimeo => "vimeo",
            Platform::Rumble => "rumble",
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = RepurpError;

    /// Exact, lower-case names only
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| RepurpError::UnsupportedPlatform(s.to_string()))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Named output variant. Which styles are valid depends on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Story,
    Post,
    Reel,
    Standard,
    Landscape,
    Square,
    Closeup,
    Shorts,
}

impl Style {
    pub const ALL: [Style; 8] = [
        Style::Story,
        Style::Post,
        Style::Reel,
        Style::Standard,
        Style::Landscape,
        Style::Square,
        Style::Closeup,
        Style::Shorts,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Style::Story => "story",
            Style::Post => "post",
            Style::Reel => "reel",
            Style::Standard => "standard",
            Style::Landscape => "landscape",
            Style::Square => "square",
            Style::Closeup => "closeup",
            Style::Shorts => "shorts",
        }
    }

    /// Parse a style name without checking it against any platform
    pub fn from_name(s: &str) -> Option<Self> {
        Style::ALL.into_iter().find(|style| style.name() == s)
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Target frame size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Renders as `W:H`, the form FFmpeg's scale and pad filters take
impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Output rules for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSpec {
    pub platform: Platform,
    pub styles: &'static [(Style, Dimensions)],
    pub bitrate: &'static str,
    /// Seconds; `None` means unbounded
    pub max_duration: Option<u32>,
}

impl PlatformSpec {
    pub fn styles(&self) -> impl Iterator<Item = Style> + '_ {
        self.styles.iter().map(|(style, _)| *style)
    }

    pub fn dimensions(&self, style: Style) -> Option<Dimensions> {
        self.styles
            .iter()
            .find(|(s, _)| *s == style)
            .map(|(_, dims)| *dims)
    }

    /// Resolve a style name within this platform
    pub fn resolve_style(&self, name: &str) -> Result<(Style, Dimensions), RepurpError> {
        Style::from_name(name)
            .and_then(|style| self.dimensions(style).map(|dims| (style, dims)))
            .ok_or_else(|| RepurpError::UnsupportedStyle {
                style: name.to_string(),
                platform: self.platform.name().to_string(),
            })
    }

    /// `<platform>` for single-style platforms, `<platform>_<style>` otherwise
    pub fn job_label(&self, style: Style) -> String {
        if self.styles.len() == 1 {
            self.platform.name().to_string()
        } else {
            format!("{}_{}", self.platform, style)
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Mp4,
    Mov,
    Webm,
    Avi,
    Mkv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Mov => "mov",
            OutputFormat::Webm => "webm",
            OutputFormat::Avi => "avi",
            OutputFormat::Mkv => "mkv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// One platform/style rendition of one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub platform: Platform,
    pub style: Style,
    pub label: String,
    pub target: Dimensions,
    pub bitrate: &'static str,
    pub max_duration: Option<u32>,
    pub output_path: PathBuf,
    /// Container extension of `output_path`
    pub extension: String,
}

/// Video information extracted from FFmpeg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub duration: Option<String>,
    pub duration_seconds: Option<f64>,
    pub dimensions: Option<(u32, u32)>,
    pub fps: Option<f32>,
}

/// File metadata information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    pub path: String,
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}
