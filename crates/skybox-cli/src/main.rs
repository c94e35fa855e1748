//! `equi2cube`: convert an equirectangular panorama into six cubemap faces.
//!
//! Configuration is loaded from `equi2cube.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p skybox-cli -- pano.jpg --output faces` to convert a file.

mod error;
mod export;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use skybox_config::{CliArgs, Config, OutputLayout};
use skybox_cubemap::{CancelToken, render_cubemap_progressive};
use tracing::{error, info};

use crate::error::CliError;
use crate::export::{FaceWriter, file_stem, render_settings};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("equi2cube: {e}");
            ExitCode::FAILURE
        }
    }
}

fn config_dir(args: &CliArgs) -> Result<PathBuf, CliError> {
    match &args.config {
        Some(dir) => Ok(dir.clone()),
        None => dirs::config_dir()
            .map(|dir| dir.join("equi2cube"))
            .ok_or(CliError::NoConfigDir),
    }
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let config_dir = config_dir(args)?;

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(args);

    let log_dir = config_dir.join("logs");
    skybox_log::init_logging(
        Some(&log_dir),
        cfg!(debug_assertions) || config.debug.log_to_file,
        Some(&config),
    );

    config.validate()?;
    let (settings, preview) = render_settings(&config)?;

    let source = image::open(&args.input)
        .map_err(|source| CliError::Decode {
            path: args.input.clone(),
            source,
        })?
        .to_rgba8();
    info!(
        input = %args.input.display(),
        width = source.width(),
        height = source.height(),
        interpolation = %settings.interpolation,
        "Loaded panorama"
    );

    let started = Instant::now();
    let mut writer = FaceWriter::new(&config.output.directory, file_stem(&args.input));
    let cancel = CancelToken::new();
    let mut write_error: Option<CliError> = None;

    let result = render_cubemap_progressive(&source, &settings, preview.as_ref(), &cancel, |update| {
        if write_error.is_some() {
            return;
        }
        if let Err(e) = writer.write(update) {
            write_error = Some(e);
            cancel.cancel();
        }
    });
    if let Some(e) = write_error {
        return Err(e);
    }
    let cubemap = result?;

    if config.output.layout == OutputLayout::Cross {
        let path = writer.write_cross(&cubemap)?;
        info!(path = %path.display(), "Wrote cross layout");
    }

    info!(
        directory = %config.output.directory.display(),
        face_size = cubemap.size(),
        files = writer.written(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Cubemap written"
    );
    Ok(())
}
