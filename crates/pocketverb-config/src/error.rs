//! Error types for configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A control value is non-finite or outside `[0, 1]`
    #[error("invalid control '{name}': {value} (expected 0.0..=1.0)")]
    InvalidControl {
        /// Control name as written in the file.
        name: &'static str,
        /// Offending value.
        value: f32,
    },

    /// The room name matches none of the six rooms
    #[error("unknown room: {0}")]
    UnknownRoom(String),

    /// Zero would lock the dither generator
    #[error("invalid dither seed: {0} (must be non-zero)")]
    InvalidSeed(u32),

    /// Block size outside the supported range
    #[error("invalid block size: {0} (expected 1..={max})", max = crate::MAX_BLOCK_SIZE)]
    InvalidBlockSize(usize),

    /// Tail length negative, non-finite or too long
    #[error("invalid tail length: {0}s (expected 0..={max}s)", max = crate::MAX_TAIL_SECONDS)]
    InvalidTail(f32),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_display_names_path() {
        let err = ConfigError::read_file("/a/verb.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/verb.toml"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn write_file_keeps_source() {
        let err = ConfigError::write_file("/out", mock_io_err());
        assert!(matches!(err, ConfigError::WriteFile { ref path, .. } if path == std::path::Path::new("/out")));
        assert!(err.source().is_some());
    }

    #[test]
    fn validation_messages() {
        let err = ConfigError::InvalidControl {
            name: "size",
            value: 1.5,
        };
        assert_eq!(err.to_string(), "invalid control 'size': 1.5 (expected 0.0..=1.0)");
        assert!(err.source().is_none());

        assert_eq!(
            ConfigError::UnknownRoom("cave".to_string()).to_string(),
            "unknown room: cave"
        );
        assert_eq!(
            ConfigError::InvalidSeed(0).to_string(),
            "invalid dither seed: 0 (must be non-zero)"
        );
        assert!(ConfigError::InvalidBlockSize(0).to_string().contains("1..=65536"));
        assert!(ConfigError::InvalidTail(-1.0).to_string().contains("-1s"));
    }
}
