use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{FileMetadata, OutputFormat};
use crate::error::{RepurpError, Result};

/// Name of the directory renditions are written to, beside the input
pub const OUTPUT_DIR_NAME: &str = "output";

/// Makes sure an output directory exists before any job writes into it
pub trait OutputDirectory {
    fn ensure(&self, dir: &Path) -> Result<()>;
}

/// Creates the directory (and parents) on the real filesystem
pub struct CreateDirAll;

impl OutputDirectory for CreateDirAll {
    fn ensure(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        Ok(())
    }
}

/// `<input dir>/output`
pub fn output_dir_for(input: &Path) -> PathBuf {
    let parent = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    parent.join(OUTPUT_DIR_NAME)
}

/// Container extension for a rendition: the explicit format if any, else the input's own
pub fn output_extension(input: &Path, format: Option<OutputFormat>) -> String {
    match format {
        Some(format) => format.extension().to_string(),
        // Lowercased so codec selection sees `webm` for `clip.WEBM`
        None => input
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .unwrap_or("mp4")
            .to_ascii_lowercase(),
    }
}

/// `<output_dir>/<stem>_<label>.<extension>`
pub fn generate_output_path(input: &Path, output_dir: &Path, label: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    output_dir.join(format!("{}_{}.{}", stem, label, extension))
}

/// Check if file exists
pub fn file_exists(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Get metadata of a file from its path
pub fn get_file_metadata(path: &str) -> Result<FileMetadata> {
    let file_path = Path::new(path);

    if !file_path.exists() {
        return Err(RepurpError::MissingInput(path.to_string()));
    }

    let metadata = fs::metadata(path)?;
    let mime_type = infer::get_from_path(path)
        .ok()
        .flatten()
        .map(|m| m.mime_type().to_string())
        .unwrap_or_default();

    let file_name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string();

    Ok(FileMetadata {
        path: path.to_string(),
        file_name,
        mime_type,
        size: metadata.len(),
    })
}

/// Format bytes to human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a duration cap; `None` is unlimited
pub fn format_duration(seconds: Option<u32>) -> String {
    let Some(seconds) = seconds else {
        return "unlimited".to_string();
    };

    let minutes = seconds / 60;
    let secs = seconds % 60;

    match (minutes, secs) {
        (0, s) => format!("{}s", s),
        (m, 0) => format!("{}m", m),
        (m, s) => format!("{}m {}s", m, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(1073741824), "1.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "unlimited");
        assert_eq!(format_duration(Some(45)), "45s");
        assert_eq!(format_duration(Some(60)), "1m");
        assert_eq!(format_duration(Some(140)), "2m 20s");
        assert_eq!(format_duration(Some(600)), "10m");
    }

    #[test]
    fn test_output_dir_sits_beside_input() {
        assert_eq!(
            output_dir_for(Path::new("/videos/clip.mp4")),
            PathBuf::from("/videos/output")
        );
        assert_eq!(output_dir_for(Path::new("clip.mp4")), PathBuf::from("./output"));
    }

    #[test]
    fn test_output_extension() {
        assert_eq!(output_extension(Path::new("clip.mov"), None), "mov");
        assert_eq!(output_extension(Path::new("clip"), None), "mp4");
        assert_eq!(output_extension(Path::new("clip.WEBM"), None), "webm");
        assert_eq!(output_extension(Path::new("Clip.Mp4"), None), "mp4");
        assert_eq!(
            output_extension(Path::new("clip.mov"), Some(OutputFormat::Webm)),
            "webm"
        );
    }

    #[test]
    fn test_generate_output_path() {
        let dir = Path::new("/videos/output");
        assert_eq!(
            generate_output_path(Path::new("/videos/clip.mp4"), dir, "instagram_story", "mp4"),
            PathBuf::from("/videos/output/clip_instagram_story.mp4")
        );
        assert_eq!(
            generate_output_path(Path::new("/videos/clip.mp4"), dir, "tiktok", "mp4"),
            PathBuf::from("/videos/output/clip_tiktok.mp4")
        );
    }

    #[test]
    fn test_create_dir_all_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(OUTPUT_DIR_NAME);
        CreateDirAll.ensure(&dir).unwrap();
        CreateDirAll.ensure(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_get_file_metadata() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("clip.mp4");
        std::fs::write(&path, b"not really a video").unwrap();
        let path = path.to_string_lossy().to_string();

        let meta = get_file_metadata(&path).unwrap();
        assert_eq!(meta.file_name, "clip.mp4");
        assert_eq!(meta.size, 18);
        assert!(file_exists(&path));

        let missing = tmp.path().join("nope.mp4").to_string_lossy().to_string();
        assert!(matches!(
            get_file_metadata(&missing),
            Err(RepurpError::MissingInput(_))
        ));
    }
}
