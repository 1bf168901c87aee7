//! Error handling for Havan
//!
//! Synthesis and markdown rendering are total and never produce these errors.
//! They come from file I/O, configuration and content lookup.

use thiserror::Error;

/// Result type alias for Havan operations
pub type Result<T> = std::result::Result<T, HavanError>;

/// Main error type for Havan operations
#[derive(Error, Debug)]
pub enum HavanError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Audio contains no samples")]
    EmptyAudio,

    // Configuration Errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Content Errors
    #[error("Paper not found: {slug}")]
    PaperNotFound { slug: String },

    #[error("Content error: {reason}")]
    ContentError { reason: String },

    // Session Errors
    #[error("Session error: {reason}")]
    SessionError { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HavanError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            HavanError::FileNotFound { .. } => "FILE_NOT_FOUND",
            HavanError::InvalidAudio { .. } => "INVALID_AUDIO",
            HavanError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            HavanError::EmptyAudio => "EMPTY_AUDIO",
            HavanError::InvalidConfig { .. } => "INVALID_CONFIG",
            HavanError::PaperNotFound { .. } => "PAPER_NOT_FOUND",
            HavanError::ContentError { .. } => "CONTENT_ERROR",
            HavanError::SessionError { .. } => "SESSION_ERROR",
            HavanError::Io(_) => "IO_ERROR",
            HavanError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HavanError::FileNotFound { .. }
                | HavanError::UnsupportedFormat { .. }
                | HavanError::InvalidConfig { .. }
                | HavanError::PaperNotFound { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            HavanError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            HavanError::InvalidAudio { .. } => vec![
                "Only WAV files are supported",
                "The file may be corrupted - try regenerating it with 'havan-cli synth'",
            ],
            HavanError::UnsupportedFormat { .. } => vec![
                "Supported bit depths: 16, 24, 32 (float)",
                "Export at the sample rate the audio was generated with",
            ],
            HavanError::InvalidConfig { .. } => vec![
                "Check the configuration file against the defaults",
                "Remove the --config flag to use built-in defaults",
            ],
            HavanError::PaperNotFound { .. } => vec![
                "Run 'havan-cli papers <library>' to list available slugs",
            ],
            HavanError::Serialization(_) => vec![
                "The JSON file is malformed - validate it with a JSON linter",
            ],
            _ => vec![],
        }
    }

    /// Map a failed read of `path`; only a missing file is `FileNotFound`
    pub(crate) fn read_failed(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => HavanError::FileNotFound {
                path: path.display().to_string(),
                source: Some(err),
            },
            _ => HavanError::Io(err),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        HavanError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn content(reason: impl Into<String>) -> Self {
        HavanError::ContentError {
            reason: reason.into(),
        }
    }
}
