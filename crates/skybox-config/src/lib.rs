//! Configuration for the equirectangular to cubemap converter.
//!
//! Settings persist to disk as a RON file, tolerate missing and unknown
//! fields, and can be overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, OutputConfig, OutputLayout, PreviewConfig, RenderConfig};
pub use error::ConfigError;
