use std::path::{Path, PathBuf};

/// Convenience result type used across confart.
pub type ConfartResult<T> = Result<T, ConfartError>;

/// Top-level error taxonomy used by every job and helper.
#[derive(thiserror::Error, Debug)]
pub enum ConfartError {
    /// A required imaging capability (fonts, rasterizer) is unavailable.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// A referenced input file does not exist.
    #[error("input not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The file exists but could not be decoded.
    #[error("failed to load '{}': {reason}", path.display())]
    Load {
        /// Offending file.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// The output could not be written.
    #[error("failed to write '{}': {reason}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Encoder or IO message.
        reason: String,
    },

    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when deserializing job configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConfartError {
    /// Build a [`ConfartError::MissingDependency`] value.
    pub fn missing_dependency(msg: impl Into<String>) -> Self {
        Self::MissingDependency(msg.into())
    }

    /// Build a [`ConfartError::MissingInput`] value.
    pub fn missing_input(path: impl AsRef<Path>) -> Self {
        Self::MissingInput(path.as_ref().to_path_buf())
    }

    /// Build a [`ConfartError::Load`] value.
    pub fn load(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::Load {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`ConfartError::Write`] value.
    pub fn write(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`ConfartError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ConfartError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether a batch job may substitute a placeholder and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingInput(_) | Self::Load { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
