//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while loading, saving, or validating `equi2cube.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config directory or file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File or directory that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for [`crate::Config`].
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// The config could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    /// A setting parsed but has an unusable value.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending setting, e.g. `render.rotation_degrees`.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
