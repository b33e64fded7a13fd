//! # Engine Configuration
//!
//! Terrain and streaming parameters. Everything here used to be a build-time
//! constant; it is now loaded from JSON so a world can be tuned without a
//! rebuild. Missing fields fall back to their defaults.
//!
//! ```json
//! { "terrain": { "seed": 7, "octaves": 5 }, "render_distance": 6 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for [`EngineConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but holds an unusable value.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Parameters of the procedural height field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Seed of the noise permutation table.
    pub seed: u32,
    /// Multiplier applied to world X/Z before sampling noise.
    pub scale: f32,
    /// Number of noise layers summed per sample.
    pub octaves: u32,
    /// Amplitude decay per octave.
    pub persistence: f32,
    /// Maximum height deviation from `base_height`, in voxels.
    pub height_multiplier: f32,
    /// World Y of the terrain surface where noise is zero.
    pub base_height: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            seed: 12345,
            scale: 0.05,
            octaves: 4,
            persistence: 0.5,
            height_multiplier: 20.0,
            base_height: 32,
        }
    }
}

/// Top-level configuration for the streaming engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Height field parameters.
    pub terrain: TerrainConfig,
    /// Radius, in chunks, of the spherical load region around the viewpoint.
    pub render_distance: i32,
    /// Maximum number of chunk meshes kept by the mesh cache.
    pub mesh_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            terrain: TerrainConfig::default(),
            render_distance: 4,
            mesh_cache_capacity: 4096,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that every field holds a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let terrain = &self.terrain;
        if terrain.octaves == 0 {
            return Err(ConfigError::Invalid {
                field: "terrain.octaves",
                reason: "must be at least 1",
            });
        }
        if !terrain.persistence.is_finite() || terrain.persistence <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "terrain.persistence",
                reason: "must be a positive finite number",
            });
        }
        if !terrain.scale.is_finite() || terrain.scale <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "terrain.scale",
                reason: "must be a positive finite number",
            });
        }
        if !terrain.height_multiplier.is_finite() {
            return Err(ConfigError::Invalid {
                field: "terrain.height_multiplier",
                reason: "must be finite",
            });
        }
        if self.render_distance < 0 {
            return Err(ConfigError::Invalid {
                field: "render_distance",
                reason: "must not be negative",
            });
        }
        if self.mesh_cache_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "mesh_cache_capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{ "terrain": { "seed": 7 }, "render_distance": 2 }"#)
                .unwrap();
        assert_eq!(config.terrain.seed, 7);
        assert_eq!(config.terrain.octaves, 4);
        assert_eq!(config.render_distance, 2);
        assert_eq!(config.mesh_cache_capacity, 4096);
    }

    #[test]
    fn test_rejects_zero_octaves() {
        let err = EngineConfig::from_json_str(r#"{ "terrain": { "octaves": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "terrain.octaves",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_render_distance() {
        let err = EngineConfig::from_json_str(r#"{ "render_distance": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json_str("{ render_distance: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load("/nonexistent/voxel-terrain.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
