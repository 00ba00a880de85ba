use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepurpError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Unsupported style {style} for platform {platform}")]
    UnsupportedStyle { style: String, platform: String },

    #[error("File not found: {0}")]
    MissingInput(String),

    #[error("Output already exists: {0}")]
    OutputExists(String),

    #[error("FFmpeg not found. Please install FFmpeg or set REPURP_FFMPEG_PATH.")]
    TranscoderNotFound,

    #[error("FFmpeg failed ({}): {stderr}", exit_label(.code))]
    TranscoderFailed { code: Option<i32>, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RepurpError {
    /// True for both a missing binary and a nonzero exit.
    pub fn is_transcoder_failure(&self) -> bool {
        matches!(
            self,
            RepurpError::TranscoderNotFound | RepurpError::TranscoderFailed { .. }
        )
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RepurpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = RepurpError::UnsupportedPlatform("myspace".to_string());
        assert_eq!(err.to_string(), "Unsupported platform: myspace");

        let err = RepurpError::UnsupportedStyle {
            style: "banner".to_string(),
            platform: "instagram".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported style banner for platform instagram"
        );
    }

    #[test]
    fn test_transcoder_failure_kinds() {
        let failed = RepurpError::TranscoderFailed {
            code: Some(1),
            stderr: "boom".to_string(),
        };
        assert!(failed.is_transcoder_failure());
        assert_eq!(failed.to_string(), "FFmpeg failed (exit code 1): boom");
        assert!(RepurpError::TranscoderNotFound.is_transcoder_failure());
        assert!(!RepurpError::MissingInput("a.mp4".to_string()).is_transcoder_failure());
        assert!(!RepurpError::OutputExists("a_tiktok.mp4".to_string()).is_transcoder_failure());
    }
}
