//! Turning configuration into render settings and rendered faces into files.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use skybox_config::Config;
use skybox_cubemap::{
    CubeFace, Cubemap, CubemapSettings, FaceUpdate, LanczosRadius, RenderStage, compose_cross,
    face_file_name,
};
use tracing::debug;

use crate::error::CliError;

/// Subdirectory of the output directory that receives preview faces.
pub const PREVIEW_DIR: &str = "preview";

/// Full and optional preview settings described by `config`.
///
/// Interpolation names and the Lanczos radius are parsed here, so a typo fails
/// before the input is decoded.
pub fn render_settings(
    config: &Config,
) -> Result<(CubemapSettings, Option<CubemapSettings>), CliError> {
    let rotation = config.render.rotation_radians();
    let lanczos_radius = LanczosRadius::try_from(config.render.lanczos_radius)?;

    let full = CubemapSettings {
        rotation,
        interpolation: config.render.interpolation.parse()?,
        max_width: config.render.max_face_width,
        lanczos_radius,
    };

    let preview = if config.preview.enabled {
        Some(CubemapSettings {
            interpolation: config.preview.interpolation.parse()?,
            max_width: Some(config.preview.max_width),
            lanczos_radius,
            ..CubemapSettings::preview(rotation)
        })
    } else {
        None
    };

    Ok((full, preview))
}

/// Base name for output files: the input file name up to its first dot.
///
/// `pano.v2.png` yields `pano`.
pub fn file_stem(input: &Path) -> String {
    input
        .file_name()
        .and_then(|name| name.to_string_lossy().split('.').next().map(str::to_owned))
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "cubemap".to_string())
}

/// Writes faces below one output directory as they arrive.
#[derive(Debug)]
pub struct FaceWriter {
    output_dir: PathBuf,
    stem: String,
    written: usize,
}

impl FaceWriter {
    pub fn new(output_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            stem: stem.into(),
            written: 0,
        }
    }

    /// Where a face of the given stage is stored.
    pub fn path_for(&self, face: CubeFace, stage: RenderStage) -> PathBuf {
        let name = face_file_name(&self.stem, face);
        match stage {
            RenderStage::Preview => self.output_dir.join(PREVIEW_DIR).join(name),
            RenderStage::Full => self.output_dir.join(name),
        }
    }

    /// Where the horizontal-cross sheet is stored.
    pub fn cross_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_cross.png", self.stem))
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write(&mut self, update: &FaceUpdate) -> Result<PathBuf, CliError> {
        let path = self.path_for(update.face, update.stage);
        self.save(&update.image, &path)?;
        debug!(face = %update.face, stage = ?update.stage, path = %path.display(), "face written");
        Ok(path)
    }

    pub fn write_cross(&mut self, cubemap: &Cubemap) -> Result<PathBuf, CliError> {
        let path = self.cross_path();
        self.save(&compose_cross(cubemap), &path)?;
        Ok(path)
    }

    fn save(&mut self, image: &RgbaImage, path: &Path) -> Result<(), CliError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| CliError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        image.save(path).map_err(|source| CliError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use skybox_cubemap::{CubemapError, Interpolation, render_cubemap};

    #[test]
    fn test_default_settings() {
        let (full, preview) = render_settings(&Config::default()).unwrap();
        assert_eq!(full, CubemapSettings::default());
        assert_eq!(preview, Some(CubemapSettings::preview(0.0)));
    }

    #[test]
    fn test_settings_follow_config() {
        let mut config = Config::default();
        config.render.rotation_degrees = 90.0;
        config.render.interpolation = "cubic".to_string();
        config.render.max_face_width = Some(64);
        config.render.lanczos_radius = 3;
        config.preview.interpolation = "nearest".to_string();
        config.preview.max_width = 16;

        let (full, preview) = render_settings(&config).unwrap();
        assert!((full.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(full.interpolation, Interpolation::Cubic);
        assert_eq!(full.max_width, Some(64));
        assert_eq!(full.lanczos_radius, LanczosRadius::Three);

        let preview = preview.unwrap();
        assert_eq!(preview.rotation, full.rotation);
        assert_eq!(preview.interpolation, Interpolation::Nearest);
        assert_eq!(preview.max_width, Some(16));
    }

    #[test]
    fn test_preview_disabled() {
        let mut config = Config::default();
        config.preview.enabled = false;
        config.preview.interpolation = "bogus".to_string();
        let (_, preview) = render_settings(&config).unwrap();
        assert!(preview.is_none());
    }

    #[test]
    fn test_unknown_interpolation_rejected() {
        let mut config = Config::default();
        config.render.interpolation = "sinc".to_string();
        let err = render_settings(&config).unwrap_err();
        assert!(matches!(
            err,
            CliError::Cubemap(CubemapError::UnknownInterpolation(ref s)) if s == "sinc"
        ));
    }

    #[test]
    fn test_unsupported_lanczos_radius_rejected() {
        let mut config = Config::default();
        config.render.lanczos_radius = 4;
        let err = render_settings(&config).unwrap_err();
        assert!(matches!(
            err,
            CliError::Cubemap(CubemapError::UnsupportedLanczosRadius(4))
        ));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("/photos/beach.jpg")), "beach");
        assert_eq!(file_stem(Path::new("pano.v2.png")), "pano");
        assert_eq!(file_stem(Path::new("dir.d/sky.hdr.jpg")), "sky");
        assert_eq!(file_stem(Path::new("noext")), "noext");
        assert_eq!(file_stem(Path::new(".hidden.png")), "cubemap");
        assert_eq!(file_stem(Path::new("/")), "cubemap");
    }

    #[test]
    fn test_paths() {
        let writer = FaceWriter::new("/out", "beach");
        assert_eq!(
            writer.path_for(CubeFace::PosX, RenderStage::Full),
            PathBuf::from("/out/beach_px.png")
        );
        assert_eq!(
            writer.path_for(CubeFace::NegY, RenderStage::Preview),
            PathBuf::from("/out/preview/beach_ny.png")
        );
        assert_eq!(writer.cross_path(), PathBuf::from("/out/beach_cross.png"));
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = FaceWriter::new(dir.path().join("faces"), "room");
        let image = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        let update = FaceUpdate {
            face: CubeFace::PosZ,
            stage: RenderStage::Preview,
            image: image.clone(),
        };

        let path = writer.write(&update).unwrap();
        assert_eq!(path, dir.path().join("faces/preview/room_pz.png"));
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, image);
        assert_eq!(writer.written(), 1);
    }

    #[test]
    fn test_write_cross() {
        let dir = tempfile::tempdir().unwrap();
        let source = RgbaImage::from_pixel(32, 16, Rgba([200, 100, 50, 255]));
        let settings = CubemapSettings {
            interpolation: Interpolation::Nearest,
            ..CubemapSettings::default()
        };
        let cubemap = render_cubemap(&source, &settings).unwrap();

        let mut writer = FaceWriter::new(dir.path(), "flat");
        let path = writer.write_cross(&cubemap).unwrap();
        let sheet = image::open(&path).unwrap().to_rgba8();
        assert_eq!(sheet.dimensions(), (32, 24));
        // Centre cell is pz.
        assert_eq!(*sheet.get_pixel(12, 12), Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let mut writer = FaceWriter::new(&blocker, "x");
        let update = FaceUpdate {
            face: CubeFace::NegX,
            stage: RenderStage::Full,
            image: RgbaImage::new(1, 1),
        };
        let err = writer.write(&update).unwrap_err();
        assert!(matches!(err, CliError::CreateDir { .. }));
        assert_eq!(writer.written(), 0);
    }
}
