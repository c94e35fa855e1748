//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "equi2cube.ron";

/// Top-level converter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Full-quality face rendering.
    pub render: RenderConfig,
    /// Low-resolution preview pass.
    pub preview: PreviewConfig,
    /// Where and how faces are written.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Settings for the full-quality render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Interpolation kind: `nearest`, `linear`, `cubic` or `lanczos`.
    pub interpolation: String,
    /// Rotation about the vertical axis, in degrees.
    pub rotation_degrees: f64,
    /// Upper bound on the face side in pixels (`None` = source width / 4).
    pub max_face_width: Option<u32>,
    /// Lanczos support radius, 3 or 5.
    pub lanczos_radius: u32,
}

/// Settings for the preview pass rendered before each full face.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Render and write previews.
    pub enabled: bool,
    /// Interpolation kind for previews.
    pub interpolation: String,
    /// Maximum preview face side in pixels.
    pub max_width: u32,
}

/// How rendered faces are laid out on disk.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputLayout {
    /// Six separate `<stem>_<face>.png` files.
    #[default]
    Faces,
    /// The six files plus a `<stem>_cross.png` horizontal cross.
    Cross,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory faces are written to.
    pub directory: PathBuf,
    /// File layout.
    pub layout: OutputLayout,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter (e.g., "debug", "info", "skybox_cubemap=trace").
    pub log_level: String,
    /// Also write JSON logs to the log directory.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            interpolation: "lanczos".to_string(),
            rotation_degrees: 0.0,
            max_face_width: None,
            lanczos_radius: 5,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interpolation: "linear".to_string(),
            max_width: 200,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("cubemap"),
            layout: OutputLayout::Faces,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl RenderConfig {
    /// Rotation in radians.
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `equi2cube.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Check numeric settings that parse but cannot be rendered.
    ///
    /// Interpolation names are checked by the renderer when they are parsed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.render.rotation_degrees.is_finite() {
            return Err(ConfigError::Invalid {
                field: "render.rotation_degrees",
                reason: format!("{} is not finite", self.render.rotation_degrees),
            });
        }
        if self.render.max_face_width == Some(0) {
            return Err(ConfigError::Invalid {
                field: "render.max_face_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.preview.enabled && self.preview.max_width == 0 {
            return Err(ConfigError::Invalid {
                field: "preview.max_width",
                reason: "must be at least 1 when previews are enabled".to_string(),
            });
        }
        Ok(())
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(ConfigError::Parse)
    }
}
