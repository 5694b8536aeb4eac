//! TOML configuration.
//!
//! Every section is optional; missing keys take the built-in values.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::builder::Defaults;
use crate::error::ConfigError;
use crate::scene::{
    AssetLoader, Camera, Catalogue, CatalogueLoader, FallbackLoader, FsAssetLoader,
};
use crate::session::Command;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "bim-configurator.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: Defaults,
    pub presets: Presets,
    pub assets: AssetsConfig,
    pub camera: Camera,
    pub logging: LoggingConfig,
}

/// Parameters used by the one-click "add wall" / "add floor" actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    pub wall: WallPreset,
    pub slab: SlabPreset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallPreset {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub height: f64,
    pub thickness: f64,
}

impl Default for WallPreset {
    fn default() -> Self {
        Self {
            start: Point3::origin(),
            end: Point3::new(5.0, 0.0, 0.0),
            height: 3.0,
            thickness: 0.2,
        }
    }
}

impl WallPreset {
    #[must_use]
    pub fn command(&self) -> Command {
        Command::AddWall {
            start: self.start,
            end: self.end,
            height: self.height,
            thickness: self.thickness,
            material: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlabPreset {
    pub width: f64,
    pub depth: f64,
    pub thickness: f64,
}

impl Default for SlabPreset {
    fn default() -> Self {
        Self {
            width: 5.0,
            depth: 5.0,
            thickness: 0.2,
        }
    }
}

impl SlabPreset {
    #[must_use]
    pub fn command(&self) -> Command {
        Command::AddSlab {
            width: self.width,
            depth: self.depth,
            thickness: self.thickness,
            material: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Searched first.
    pub primary: PathBuf,
    /// Searched when the primary root does not have the asset.
    pub secondary: PathBuf,
    /// When false, assets resolve from the catalogue without touching disk.
    pub verify_files: bool,
    pub catalogue: Catalogue,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            primary: PathBuf::from("public/models"),
            secondary: PathBuf::from("models"),
            verify_files: false,
            catalogue: Catalogue::default(),
        }
    }
}

impl AssetsConfig {
    #[must_use]
    pub fn loader(&self) -> Box<dyn AssetLoader> {
        if self.verify_files {
            Box::new(FallbackLoader {
                primary: FsAssetLoader::new(&self.primary, self.catalogue.clone()),
                secondary: FsAssetLoader::new(&self.secondary, self.catalogue.clone()),
            })
        } else {
            Box::new(CatalogueLoader {
                catalogue: self.catalogue.clone(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
    /// Log file for the terminal UI. Without it the UI logs nowhere.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "bim_configurator=info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(reason) = config.camera.problem() {
            return Err(ConfigError::InvalidCamera {
                path: path.to_path_buf(),
                reason,
            });
        }
        Ok(config)
    }
}

/// Loads `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, or the built-in
/// configuration.
///
/// An explicit `path` that cannot be read is an error; a missing default file
/// is not.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(Config::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::FileRead {
        path: path.clone(),
        source,
    })?;
    Config::parse(&content, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_gives_builtin_config() {
        let config = Config::parse("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.defaults.wall.thickness, 0.15);
        assert_eq!(config.presets.wall.end, Point3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let toml = r#"
            [defaults.wall]
            thickness = 0.2

            [camera]
            eye = [10.0, 5.0, 10.0]

            [[assets.catalogue]]
            name = "Bed"
            path = "bed.glb"
            size = [1.6, 0.5, 2.1]
        "#;
        let config = Config::parse(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.defaults.wall.thickness, 0.2);
        assert_eq!(config.defaults.wall.height, 2.5);
        assert_eq!(config.camera.eye, Point3::new(10.0, 5.0, 10.0));
        assert_eq!(config.camera.target, Point3::origin());
        assert_eq!(config.assets.catalogue.entries.len(), 1);
        assert_eq!(config.assets.catalogue.entries[0].name, "Bed");
    }

    #[test]
    fn malformed_toml_is_reported_with_path() {
        let err = Config::parse("[defaults.wall\nheight = 2", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn collapsed_camera_frustum_is_rejected() {
        let toml = "[camera]\nnear = 1.0\nfar = 1.0\n";
        let err = Config::parse(toml, Path::new("cam.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCamera { .. }));
        assert!(err.to_string().contains("near must be positive"));
    }

    #[test]
    fn top_down_camera_is_accepted() {
        let toml = "[camera]\neye = [0.0, 30.0, 0.0]\n";
        let config = Config::parse(toml, Path::new("plan.toml")).unwrap();
        assert_eq!(config.camera.eye, Point3::new(0.0, 30.0, 0.0));
    }

    #[test]
    fn load_config_reads_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[presets.slab]\nwidth = 8.0").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.presets.slab.width, 8.0);
        assert_eq!(config.presets.slab.depth, 5.0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/bim.toml")));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn presets_produce_add_commands() {
        let presets = Presets::default();
        assert!(matches!(
            presets.wall.command(),
            Command::AddWall { height, .. } if height == 3.0
        ));
        assert!(matches!(
            presets.slab.command(),
            Command::AddSlab { thickness, .. } if thickness == 0.2
        ));
    }
}
