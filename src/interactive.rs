use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use std::io::{self, Write};

use crate::catalog;
use crate::cli::{Mode, RunOptions};
use crate::domain::{Platform, PlatformSpec};
use crate::error::{RepurpError, Result};
use crate::fs::{self, format_duration};

/// Wait for user to press Enter before exiting, when someone is watching
pub fn wait_for_exit() {
    if !console::user_attended() {
        return;
    }

    println!();
    println!("{}", "Press Enter to exit...".dimmed());
    let _ = io::stdout().flush();
    let mut input = String::new();
    let _ = io::stdin().read_line(&mut input);
}

/// Run interactive mode - wizard picking input, platforms and styles.
/// Returns `None` when the user backs out.
pub fn run_interactive() -> Result<Option<(Mode, RunOptions)>> {
    print_interactive_header();

    let theme = ColorfulTheme::default();

    let input = prompt_input_path(&theme)?;
    if input.is_empty() {
        return Ok(None);
    }

    if !fs::file_exists(&input) {
        return Err(RepurpError::MissingInput(input));
    }

    println!("{} {}", "Selected:".dimmed(), input.bright_green());
    println!();

    let modes = vec![
        "Single platform and style",
        "Batch: every style of several platforms",
    ];
    let mode_idx = Select::with_theme(&theme)
        .with_prompt("What do you want to render?")
        .items(&modes)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    let mode = if mode_idx == 0 {
        let spec = prompt_platform(&theme)?;
        let style = prompt_style(&theme, spec)?;
        Mode::Single {
            input,
            platform: spec.platform.name().to_string(),
            style,
        }
    } else {
        let platforms = prompt_platforms(&theme)?;
        if platforms.is_empty() {
            println!("{}", "No platforms selected.".bright_yellow());
            return Ok(None);
        }
        Mode::Batch { input, platforms }
    };

    let overwrite = Confirm::with_theme(&theme)
        .with_prompt("Overwrite existing renditions?")
        .default(false)
        .interact()
        .map_err(prompt_error)?;

    let proceed = Confirm::with_theme(&theme)
        .with_prompt("Start rendering?")
        .default(true)
        .interact()
        .map_err(prompt_error)?;

    if !proceed {
        println!("{}", "Nothing rendered.".bright_yellow());
        return Ok(None);
    }

    println!();

    Ok(Some((
        mode,
        RunOptions {
            format: None,
            overwrite,
            dry_run: false,
            json: false,
        },
    )))
}

fn print_interactive_header() {
    println!();
    println!("{}", "━".repeat(50).dimmed());
    println!(
        "{}",
        format!("  Repurp v{} - Interactive Mode", env!("CARGO_PKG_VERSION"))
            .bright_cyan()
            .bold()
    );
    println!("{}", "━".repeat(50).dimmed());
    println!();
}

fn prompt_input_path(theme: &ColorfulTheme) -> Result<String> {
    println!("{}", "Drag & drop video file here or enter path:".bright_white());
    println!("{}", "(Press Enter without input to exit)".dimmed());
    println!();

    let input: String = Input::with_theme(theme)
        .with_prompt("Video path")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    // Terminals quote dropped paths
    Ok(input.trim().trim_matches('"').trim_matches('\'').to_string())
}

fn platform_item(spec: &PlatformSpec) -> String {
    let styles: Vec<&str> = spec.styles().map(|s| s.name()).collect();
    format!(
        "{:<10} {} | {} | max {}",
        spec.platform.name(),
        styles.join(", "),
        spec.bitrate,
        format_duration(spec.max_duration)
    )
}

fn prompt_platform(theme: &ColorfulTheme) -> Result<&'static PlatformSpec> {
    let items: Vec<String> = catalog::all().iter().map(platform_item).collect();
    let idx = Select::with_theme(theme)
        .with_prompt("Platform")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    Ok(catalog::lookup(Platform::ALL[idx]))
}

fn prompt_style(theme: &ColorfulTheme, spec: &PlatformSpec) -> Result<String> {
    let items: Vec<String> = spec
        .styles
        .iter()
        .map(|(style, dims)| format!("{:<10} {}x{}", style.name(), dims.width, dims.height))
        .collect();

    let idx = Select::with_theme(theme)
        .with_prompt("Style")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    Ok(spec.styles[idx].0.name().to_string())
}

fn prompt_platforms(theme: &ColorfulTheme) -> Result<Vec<String>> {
    let items: Vec<String> = catalog::all().iter().map(platform_item).collect();
    let chosen = MultiSelect::with_theme(theme)
        .with_prompt("Platforms (space to toggle, enter to confirm)")
        .items(&items)
        .interact()
        .map_err(prompt_error)?;

    Ok(chosen
        .into_iter()
        .map(|idx| Platform::ALL[idx].name().to_string())
        .collect())
}

fn prompt_error(e: dialoguer::Error) -> RepurpError {
    match e {
        dialoguer::Error::IO(io) => RepurpError::Io(io),
    }
}
