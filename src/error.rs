use crate::format::Format;
use crate::validate::ValidationError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid format type: {tag}")]
    InvalidFormat { tag: String },

    #[error("File not found: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode {format} record for {}: {cause}", .path.display())]
    Encode {
        format: Format,
        path: PathBuf,
        cause: String,
    },

    #[error("Failed to decode {format} record from {}: {cause}", .path.display())]
    Decode {
        format: Format,
        path: PathBuf,
        cause: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Classify an I/O failure on `path`, keeping not-found apart from the rest.
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// I/O failure while creating or writing `path`; never classified as not-found.
    pub fn write(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// The underlying OS error, if this failure came from the filesystem.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            StoreError::NotFound { source, .. } | StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            StoreError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Stable identifier for the error class.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::InvalidFormat { .. } => "invalid_format",
            StoreError::NotFound { .. } => "not_found",
            StoreError::Io { .. } => "io_error",
            StoreError::Encode { .. } => "encoding_error",
            StoreError::Decode { .. } => "decoding_error",
            StoreError::Validation(_) => "validation_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
