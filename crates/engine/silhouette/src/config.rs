//! Pipeline configuration
//!
//! Stored as TOML. Every field has a default, so a partial file (or no
//! file at all) is valid:
//!
//! ```toml
//! data_dir = "data"
//! mesh = "greedy"
//!
//! [projection]
//! mode = "sweep"
//! intervals = 8
//! axis = "y"
//! tilt = [30.0, 0.0, 0.0]
//! rotation = [-15.0, 45.0, 0.0]
//! cull = "direction_tagged"
//! ray_resolution = 1.0
//! ```

use crate::mesh::MeshStrategy;
use crate::pipeline::ProjectionMode;
use crate::project::{CullStrategy, RotationAxis, MIN_RESOLUTION};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Names the config file to load
pub const CONFIG_ENV: &str = "SILHOUETTE_CONFIG";
/// Overrides `data_dir`
pub const DATA_ENV: &str = "SILHOUETTE_DATA";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root of `vox/`, `export/` and `test_data/vox/`
    pub data_dir: PathBuf,
    pub mesh: MeshStrategy,
    pub projection: ProjectionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            mesh: MeshStrategy::Greedy,
            projection: ProjectionConfig::default(),
        }
    }
}

/// Projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub mode: ProjectionMode,
    /// Sweep steps per full turn
    pub intervals: usize,
    pub axis: RotationAxis,
    /// Euler tilt in degrees applied before each sweep step
    pub tilt: Vec3,
    /// Euler angles in degrees for fixed projections
    pub rotation: Vec3,
    pub cull: CullStrategy,
    /// Ray spacing for the ray cast mode
    pub ray_resolution: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Sweep,
            intervals: 8,
            axis: RotationAxis::Y,
            tilt: Vec3::new(30.0, 0.0, 0.0),
            rotation: Vec3::new(-15.0, 45.0, 0.0),
            cull: CullStrategy::DirectionTagged,
            ray_resolution: 1.0,
        }
    }
}

impl PipelineConfig {
    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save as pretty TOML, creating parent directories if needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_err)
    }

    /// Builds a configuration from `SILHOUETTE_CONFIG` (a TOML file) and
    /// `SILHOUETTE_DATA`, falling back to defaults when they are unset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`PipelineConfig::from_env`] with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match lookup(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Let `SILHOUETTE_DATA` replace `data_dir` on an already loaded config
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_dir) = lookup(DATA_ENV) {
            self.data_dir = PathBuf::from(data_dir);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let projection = &self.projection;
        if projection.intervals == 0 {
            return Err(ConfigError::Invalid(
                "projection.intervals must be >= 1".into(),
            ));
        }
        let resolution = projection.ray_resolution;
        if !(resolution.is_finite() && resolution >= MIN_RESOLUTION) {
            return Err(ConfigError::Invalid(format!(
                "projection.ray_resolution must be at least {MIN_RESOLUTION}, got {resolution}"
            )));
        }
        if !(projection.tilt.is_finite() && projection.rotation.is_finite()) {
            return Err(ConfigError::Invalid(
                "projection angles must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Directory holding `<name>.vox` model files
    pub fn vox_dir(&self) -> PathBuf {
        self.data_dir.join("vox")
    }

    /// Directory holding fixture `.vox` files for tests
    pub fn test_vox_dir(&self) -> PathBuf {
        self.data_dir.join("test_data").join("vox")
    }

    /// Directory exports are written to
    pub fn export_dir(&self) -> PathBuf {
        self.data_dir.join("export")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.mesh, MeshStrategy::Greedy);
        assert_eq!(config.projection.intervals, 8);
        assert_eq!(config.projection.axis, RotationAxis::Y);
        assert_eq!(config.vox_dir(), Path::new("data").join("vox"));
        assert_eq!(config.test_vox_dir(), Path::new("data/test_data/vox"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            mesh = "per_cell"

            [projection]
            mode = "ray_cast"
            axis = "x"
            tilt = [0.0, 10.0, 0.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.mesh, MeshStrategy::PerCell);
        assert_eq!(config.projection.mode, ProjectionMode::RayCast);
        assert_eq!(config.projection.axis, RotationAxis::X);
        assert_eq!(config.projection.tilt, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(config.projection.intervals, 8);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        assert!(PipelineConfig::from_toml("mesh = \"marching\"").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PipelineConfig::default();
        config.projection.intervals = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = PipelineConfig::default();
        config.projection.ray_resolution = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.projection.ray_resolution = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        // a near-zero spacing would cast an unbounded number of rays
        config.projection.ray_resolution = 1e-6;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.projection.ray_resolution = MIN_RESOLUTION;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_then_load() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("silhouette.toml");
        let mut config = PipelineConfig::default();
        config.projection.cull = CullStrategy::GeometricNormal;
        config.projection.intervals = 3;
        config.save(&path).unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_lookup_overrides_data_dir() {
        let config = PipelineConfig::from_lookup(|key| match key {
            DATA_ENV => Some("/srv/voxels".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/voxels"));
        assert_eq!(config.export_dir(), PathBuf::from("/srv/voxels/export"));
    }

    #[test]
    fn test_data_env_applies_over_loaded_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("silhouette.toml");
        std::fs::write(&path, "data_dir = \"from_file\"\n").unwrap();

        let config = PipelineConfig::load(&path)
            .unwrap()
            .with_env_overrides(|key| match key {
                DATA_ENV => Some("/srv/voxels".into()),
                _ => None,
            });
        assert_eq!(config.data_dir, PathBuf::from("/srv/voxels"));

        let config = PipelineConfig::load(&path)
            .unwrap()
            .with_env_overrides(|_| None);
        assert_eq!(config.data_dir, PathBuf::from("from_file"));
    }

    #[test]
    fn test_lookup_missing_config_file() {
        let err = PipelineConfig::from_lookup(|key| match key {
            CONFIG_ENV => Some("/nonexistent/silhouette.toml".into()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
