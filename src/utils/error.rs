use thiserror::Error;

#[derive(Error, Debug)]
pub enum BigFileError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Read out of bounds: {requested} bytes at offset {pos} (file length {len})")]
    OutOfBounds { pos: u64, requested: u64, len: u64 },

    #[error("Failed to load chunk [{start}, {end}): {reason}")]
    ChunkLoadFailed { start: u64, end: u64, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Processor '{processor}' failed to initialize: {message}")]
    InitFailed { processor: String, message: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Format,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity. Never 0.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl BigFileError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BigFileError::IoError(_) | BigFileError::ChunkLoadFailed { .. } => ErrorCategory::Io,
            BigFileError::OutOfBounds { .. } => ErrorCategory::Format,
            BigFileError::ConfigError { .. } | BigFileError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            BigFileError::InitFailed { .. } | BigFileError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a chunk read can succeed on a second attempt
            BigFileError::ChunkLoadFailed { .. } => ErrorSeverity::Medium,
            BigFileError::IoError(_) | BigFileError::InitFailed { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BigFileError::IoError(e) => format!("Could not access the file: {}", e),
            BigFileError::OutOfBounds { pos, requested, len } => format!(
                "The file ended early: needed {} bytes at offset {} but the file is {} bytes long",
                requested, pos, len
            ),
            BigFileError::ChunkLoadFailed { start, end, .. } => {
                format!("Could not read bytes {}..{} of the file", start, end)
            }
            BigFileError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the file exists, is readable and is not being truncated",
            ErrorCategory::Format => {
                "Check that the file uses the expected record layout (try --allow-trailing or toggle --timestamps)"
            }
            ErrorCategory::Configuration => "Fix the command line flags or the TOML configuration file",
            ErrorCategory::Processing => "Re-run with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, BigFileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_format_error() {
        let err = BigFileError::OutOfBounds {
            pos: 10,
            requested: 4,
            len: 12,
        };
        assert_eq!(err.category(), ErrorCategory::Format);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("offset 10"));
    }

    #[test]
    fn test_chunk_load_failure_is_retryable() {
        let err = BigFileError::ChunkLoadFailed {
            start: 0,
            end: 16,
            reason: "boom".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_every_severity_exits_nonzero() {
        let errors = [
            BigFileError::IoError(std::io::Error::other("gone")),
            BigFileError::ChunkLoadFailed {
                start: 0,
                end: 1,
                reason: "eof".to_string(),
            },
            BigFileError::OutOfBounds {
                pos: 0,
                requested: 1,
                len: 0,
            },
            BigFileError::ConfigError {
                message: "bad".to_string(),
            },
            BigFileError::ProcessingError {
                message: "bad".to_string(),
            },
        ];
        for err in errors {
            assert_ne!(err.severity().exit_code(), 0, "{}", err);
        }
        assert_eq!(ErrorSeverity::High.exit_code(), 1);
        assert_eq!(ErrorSeverity::Medium.exit_code(), 2);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 3);
    }
}
