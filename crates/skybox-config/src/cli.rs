//! Command-line argument parsing for `equi2cube`.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, OutputLayout};

/// `equi2cube` command-line arguments.
///
/// CLI values override settings loaded from `equi2cube.ron`.
#[derive(Parser, Debug)]
#[command(
    name = "equi2cube",
    about = "Convert an equirectangular panorama into six cubemap faces"
)]
pub struct CliArgs {
    /// Equirectangular input image (PNG or JPEG).
    pub input: PathBuf,

    /// Output directory.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Rotation about the vertical axis, in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub rotation: Option<f64>,

    /// Interpolation (nearest, linear, cubic, lanczos).
    #[arg(long)]
    pub interpolation: Option<String>,

    /// Maximum face width in pixels.
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Lanczos support radius (3 or 5).
    #[arg(long)]
    pub lanczos_radius: Option<u32>,

    /// Output layout.
    #[arg(long, value_enum)]
    pub layout: Option<OutputLayout>,

    /// Skip the preview pass.
    #[arg(long)]
    pub no_preview: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(degrees) = args.rotation {
            self.render.rotation_degrees = degrees;
        }
        if let Some(ref kind) = args.interpolation {
            self.render.interpolation = kind.clone();
        }
        if let Some(w) = args.max_width {
            self.render.max_face_width = Some(w);
        }
        if let Some(radius) = args.lanczos_radius {
            self.render.lanczos_radius = radius;
        }
        if let Some(layout) = args.layout {
            self.output.layout = layout;
        }
        if args.no_preview {
            self.preview.enabled = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "equi2cube",
            "pano.jpg",
            "--rotation",
            "-90",
            "--max-width",
            "512",
            "--layout",
            "cross",
            "--no-preview",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.render.rotation_degrees, -90.0);
        assert_eq!(config.render.max_face_width, Some(512));
        assert_eq!(config.output.layout, OutputLayout::Cross);
        assert!(!config.preview.enabled);
        // Non-overridden fields retain defaults
        assert_eq!(config.render.interpolation, "lanczos");
        assert_eq!(config.render.lanczos_radius, 5);
        assert_eq!(config.output.directory, PathBuf::from("cubemap"));
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs::parse_from(["equi2cube", "pano.png"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
        assert_eq!(args.input, PathBuf::from("pano.png"));
    }

    #[test]
    fn test_cli_string_overrides() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "equi2cube",
            "pano.png",
            "-o",
            "out",
            "--interpolation",
            "cubic",
            "--lanczos-radius",
            "3",
            "--log-level",
            "debug",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.render.interpolation, "cubic");
        assert_eq!(config.render.lanczos_radius, 3);
        assert_eq!(config.debug.log_level, "debug");
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(CliArgs::try_parse_from(["equi2cube"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_layout() {
        assert!(CliArgs::try_parse_from(["equi2cube", "a.png", "--layout", "strip"]).is_err());
    }
}
