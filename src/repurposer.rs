use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::domain::{ConversionJob, OutputFormat, PlatformSpec};
use crate::error::{RepurpError, Result};
use crate::ffmpeg::{build_args, Transcoder};
use crate::fs::{self, CreateDirAll, OutputDirectory};

/// Turns one input video into platform renditions, one transcoder run per style
pub struct Repurposer<T: Transcoder> {
    input_path: PathBuf,
    output_dir: PathBuf,
    transcoder: T,
    format: Option<OutputFormat>,
    overwrite: bool,
}

impl<T: Transcoder> Repurposer<T> {
    /// Bind to `input_path`, creating `output/` beside it
    pub fn new(input_path: impl Into<PathBuf>, transcoder: T) -> Result<Self> {
        Self::with_output_directory(input_path, transcoder, &CreateDirAll)
    }

    pub fn with_output_directory(
        input_path: impl Into<PathBuf>,
        transcoder: T,
        output_directory: &dyn OutputDirectory,
    ) -> Result<Self> {
        let input_path = input_path.into();
        let output_dir = fs::output_dir_for(&input_path);
        output_directory.ensure(&output_dir)?;

        Ok(Self {
            input_path,
            output_dir,
            transcoder,
            format: None,
            overwrite: false,
        })
    }

    /// Force a container instead of reusing the input's extension
    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        self.format = format;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn transcoder(&self) -> &T {
        &self.transcoder
    }

    pub fn get_spec(&self, platform: &str) -> Result<&'static PlatformSpec> {
        catalog::lookup_name(platform)
    }

    /// Resolve a platform/style pair into a job without running anything
    pub fn plan(&self, platform: &str, style: &str) -> Result<ConversionJob> {
        let spec = self.get_spec(platform)?;
        let (style, target) = spec.resolve_style(style)?;

        let label = spec.job_label(style);
        let extension = fs::output_extension(&self.input_path, self.format);
        let output_path =
            fs::generate_output_path(&self.input_path, &self.output_dir, &label, &extension);

        Ok(ConversionJob {
            input_path: self.input_path.clone(),
            platform: spec.platform,
            style,
            label,
            target,
            bitrate: spec.bitrate,
            max_duration: spec.max_duration,
            output_path,
            extension,
        })
    }

    /// Render one platform/style and return the output path
    pub fn convert(&self, platform: &str, style: &str) -> Result<PathBuf> {
        let job = self.plan(platform, style)?;
        self.run(job)
    }

    /// Render every style of each platform, stopping at the first failure.
    /// A platform named more than once is rendered once.
    pub fn batch_convert<S: AsRef<str>>(&self, platforms: &[S]) -> Result<BTreeMap<String, PathBuf>> {
        let mut outputs = BTreeMap::new();
        let mut seen = BTreeSet::new();

        for platform in platforms {
            let spec = self.get_spec(platform.as_ref())?;
            if !seen.insert(spec.platform) {
                tracing::debug!("Skipping repeated platform {}", spec.platform);
                continue;
            }
            for style in spec.styles() {
                let job = self.plan(spec.platform.name(), style.name())?;
                let label = job.label.clone();
                let output_path = self.run(job).map_err(|e| {
                    tracing::warn!(
                        transcoder = e.is_transcoder_failure(),
                        "Batch stopped at {} after {} completed output(s)",
                        label,
                        outputs.len()
                    );
                    e
                })?;
                outputs.insert(label, output_path);
            }
        }

        Ok(outputs)
    }

    fn run(&self, job: ConversionJob) -> Result<PathBuf> {
        if !self.overwrite && job.output_path.exists() {
            return Err(RepurpError::OutputExists(
                job.output_path.display().to_string(),
            ));
        }

        tracing::info!(
            platform = %job.platform,
            style = %job.style,
            "Rendering {} ({}, {}) -> {}",
            job.label,
            job.target,
            job.bitrate,
            job.output_path.display()
        );

        let args = build_args(&job, self.overwrite);
        self.transcoder.run(&args)?;

        Ok(job.output_path)
    }
}
