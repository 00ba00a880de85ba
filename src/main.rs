mod catalog;
mod cli;
mod domain;
mod error;
mod ffmpeg;
mod fs;
mod interactive;
mod output;
mod repurposer;

use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Mode, RunOptions};
use error::RepurpError;
use ffmpeg::{DryRun, FFmpeg, Transcoder};
use output::*;
use repurposer::Repurposer;

fn main() {
    // No arguments at all launches the wizard
    let is_interactive = std::env::args().len() == 1;

    let (mode, options) = if is_interactive {
        init_logging(false);
        match interactive::run_interactive() {
            Ok(Some(selection)) => selection,
            Ok(None) => std::process::exit(0),
            Err(e) => {
                print_error_with_hint(&e);
                interactive::wait_for_exit();
                std::process::exit(1);
            }
        }
    } else {
        let cli = Cli::parse();
        init_logging(cli.verbose);
        (cli.mode(), cli.options())
    };

    tracing::debug!(?mode, "starting");

    let result = run(mode, options);

    if let Err(e) = &result {
        if options.json {
            print_error_json(e);
        } else {
            print_error_with_hint(e);
        }
    }

    if is_interactive {
        interactive::wait_for_exit();
    }

    std::process::exit(exit_code(&result));
}

/// 0 on success, 1 for any error
fn exit_code(result: &error::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `-v`
fn init_logging(verbose: bool) {
    let default = if verbose { "repurp=debug" } else { "repurp=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(mode: Mode, options: RunOptions) -> error::Result<()> {
    match mode {
        Mode::List => {
            if options.json {
                print_catalog_json();
            } else {
                print_header();
                print_catalog();
            }
            Ok(())
        }
        Mode::Info { input } => run_info(&input, options.json),
        Mode::Single { input, platform, style } => {
            run_jobs(&input, &[(platform, Some(style))], options)
        }
        Mode::Batch { input, platforms } => {
            let requests: Vec<(String, Option<String>)> =
                platforms.into_iter().map(|p| (p, None)).collect();
            run_jobs(&input, &requests, options)
        }
    }
}

fn run_info(input: &str, json: bool) -> error::Result<()> {
    if !json {
        print_header();
    }

    let meta = fs::get_file_metadata(input)?;
    let ffmpeg = FFmpeg::new()?;
    tracing::debug!("probing with {}", ffmpeg.path().display());
    let info = ffmpeg.get_video_info(input)?;

    if json {
        print_video_info_json(&meta, &info);
    } else {
        print_video_info(&meta, &info);
    }

    Ok(())
}

/// Run single (`Some(style)`) or whole-platform (`None`) requests against one input
fn run_jobs(input: &str, requests: &[(String, Option<String>)], options: RunOptions) -> error::Result<()> {
    if !options.json {
        print_header();
    }

    // The core never checks its input; the CLI reports a missing file up front
    if !fs::file_exists(input) {
        return Err(RepurpError::MissingInput(input.to_string()));
    }

    let start_time = std::time::Instant::now();

    let outputs = if options.dry_run {
        let repurposer = Repurposer::new(input, DryRun::new())?
            .with_format(options.format)
            .with_overwrite(options.overwrite);
        let outputs = render(&repurposer, requests, options.json)?;
        if !options.json {
            for args in repurposer.transcoder().commands() {
                print_command(&args);
            }
        }
        outputs
    } else {
        let repurposer = Repurposer::new(input, FFmpeg::new()?)?
            .with_format(options.format)
            .with_overwrite(options.overwrite);
        render(&repurposer, requests, options.json)?
    };

    let elapsed = start_time.elapsed();

    if options.json {
        print_results_json(&outputs, elapsed, options.dry_run);
    } else {
        print_results(&outputs, elapsed, options.dry_run);
    }

    Ok(())
}

fn render<T: Transcoder>(
    repurposer: &Repurposer<T>,
    requests: &[(String, Option<String>)],
    quiet: bool,
) -> error::Result<BTreeMap<String, PathBuf>> {
    tracing::debug!("writing renditions to {}", repurposer.output_dir().display());

    match requests {
        [(platform, Some(style))] => {
            let job = repurposer.plan(platform, style)?;
            if !quiet {
                print_job(1, 1, &job);
            }
            let label = job.label.clone();
            let path = repurposer.convert(platform, style)?;
            Ok(BTreeMap::from([(label, path)]))
        }
        _ => {
            let platforms: Vec<&str> = requests.iter().map(|(p, _)| p.as_str()).collect();
            if !quiet {
                announce_batch(repurposer, &platforms);
            }
            repurposer.batch_convert(&platforms)
        }
    }
}

/// List the batch's jobs up front, stopping at the first name that would fail
fn announce_batch<T: Transcoder>(repurposer: &Repurposer<T>, platforms: &[&str]) {
    let jobs: Vec<_> = platforms
        .iter()
        .map_while(|name| repurposer.get_spec(name).ok())
        .flat_map(|spec| {
            spec.styles()
                .filter_map(|style| repurposer.plan(spec.platform.name(), style.name()).ok())
                .collect::<Vec<_>>()
        })
        .collect();

    let total = jobs.len();
    for (i, job) in jobs.iter().enumerate() {
        print_job(i + 1, total, job);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dry_json() -> RunOptions {
        RunOptions {
            format: None,
            overwrite: false,
            dry_run: true,
            json: true,
        }
    }

    #[test]
    fn test_missing_input_is_reported_before_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nonexistent.mp4");
        let missing = missing.to_string_lossy();

        let requests = [("tiktok".to_string(), Some("standard".to_string()))];
        let result = run_jobs(&missing, &requests, dry_json());
        assert!(matches!(result, Err(RepurpError::MissingInput(ref p)) if *p == missing));
        assert!(!tmp.path().join(fs::OUTPUT_DIR_NAME).exists());
        assert_eq!(exit_code(&result), 1);
    }

    #[test]
    fn test_dry_run_creates_output_dir_only() {
        let tmp = tempfile::tempdir().unwrap();
        let video = tmp.path().join("clip.mp4");
        std::fs::write(&video, b"").unwrap();

        let requests = [("tiktok".to_string(), None)];
        let result = run_jobs(&video.to_string_lossy(), &requests, dry_json());
        assert_eq!(exit_code(&result), 0);
        let output_dir = tmp.path().join(fs::OUTPUT_DIR_NAME);
        assert!(output_dir.is_dir());
        assert!(!output_dir.join("clip_tiktok.mp4").exists());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&Ok(())), 0);
        let unsupported = Err(RepurpError::UnsupportedPlatform("myspace".to_string()));
        assert_eq!(exit_code(&unsupported), 1);
        assert_eq!(exit_code(&Err(RepurpError::TranscoderNotFound)), 1);
    }
}
