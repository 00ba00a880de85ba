use clap::{Parser, ValueEnum};

use crate::domain::{OutputFormat, Platform};

#[derive(Parser, Debug)]
#[command(
    name = "repurp",
    author = "Repurp Team",
    version,
    about = "Repurpose one video into platform-ready renditions, powered by FFmpeg",
    long_about = "Repurp - Reformat a video for social and broadcast platforms.\n\n\
                  Renditions are written to an `output` directory beside the input.\n\n\
                  Examples:\n  \
                  repurp -i video.mp4 -p instagram -s story\n  \
                  repurp -i video.mp4 -b instagram tiktok\n  \
                  repurp -i video.mp4 -b\n  \
                  repurp --list"
)]
pub struct Cli {
    /// Input video file path
    #[arg(short, long, required_unless_present = "list")]
    pub input: Option<String>,

    /// Target platform (requires --style)
    #[arg(
        short,
        long,
        requires = "style",
        required_unless_present_any = ["batch", "list", "info"]
    )]
    pub platform: Option<String>,

    /// Style within the platform, e.g. story, post, landscape
    #[arg(short, long, requires = "platform")]
    pub style: Option<String>,

    /// Render every style of the given platforms (all platforms if none given)
    #[arg(short, long, num_args = 0.., value_name = "PLATFORM", conflicts_with_all = ["platform", "style"])]
    pub batch: Option<Vec<String>>,

    /// Output format (default: same as input)
    #[arg(short, long)]
    pub format: Option<FormatArg>,

    /// Overwrite existing renditions
    #[arg(short = 'y', long)]
    pub overwrite: bool,

    /// Print the FFmpeg commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// List supported platforms and styles
    #[arg(long, conflicts_with_all = ["platform", "style", "batch", "info"])]
    pub list: bool,

    /// Show video info and which platform limits apply, without converting
    #[arg(long, conflicts_with_all = ["platform", "style", "batch"])]
    pub info: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Mp4,
    Mov,
    Webm,
    Avi,
    Mkv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Mp4 => OutputFormat::Mp4,
            FormatArg::Mov => OutputFormat::Mov,
            FormatArg::Webm => OutputFormat::Webm,
            FormatArg::Avi => OutputFormat::Avi,
            FormatArg::Mkv => OutputFormat::Mkv,
        }
    }
}

/// What a parsed command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    Info { input: String },
    Single { input: String, platform: String, style: String },
    Batch { input: String, platforms: Vec<String> },
}

/// Options shared by every converting mode
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub format: Option<OutputFormat>,
    pub overwrite: bool,
    pub dry_run: bool,
    pub json: bool,
}

impl Cli {
    /// Resolve the validated flags into a mode; clap has already rejected
    /// incomplete or conflicting combinations.
    pub fn mode(&self) -> Mode {
        let input = self.input.clone().unwrap_or_default();

        if self.list {
            return Mode::List;
        }

        if self.info {
            return Mode::Info { input };
        }

        if let Some(platforms) = &self.batch {
            let platforms = if platforms.is_empty() {
                Platform::ALL.iter().map(|p| p.name().to_string()).collect()
            } else {
                platforms.clone()
            };
            return Mode::Batch { input, platforms };
        }

        Mode::Single {
            input,
            platform: self.platform.clone().unwrap_or_default(),
            style: self.style.clone().unwrap_or_default(),
        }
    }

    pub fn options(&self) -> RunOptions {
        RunOptions {
            format: self.format.map(|f| f.into()),
            overwrite: self.overwrite,
            dry_run: self.dry_run,
            json: self.json,
        }
    }
}
