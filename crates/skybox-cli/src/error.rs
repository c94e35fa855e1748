//! Errors surfaced by the `equi2cube` binary.

use std::path::PathBuf;

use skybox_config::ConfigError;
use skybox_cubemap::CubemapError;

/// Anything that stops a conversion. All of these end the process with status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Loading or validating the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The render was rejected or a face worker failed.
    #[error(transparent)]
    Cubemap(#[from] CubemapError),

    /// No platform config directory and no `--config` given.
    #[error("could not determine a config directory, pass --config <dir>")]
    NoConfigDir,

    /// The input panorama could not be opened or decoded.
    #[error("failed to read {path}: {source}")]
    Decode {
        /// Input path.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },

    /// An output directory could not be created.
    #[error("failed to create {path}: {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A face could not be encoded or written.
    #[error("failed to write {path}: {source}")]
    Encode {
        /// Output file path.
        path: PathBuf,
        /// Encoder error.
        #[source]
        source: image::ImageError,
    },
}
