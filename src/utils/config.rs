use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::algorithms::coordinates::CoordinateValidator;
use crate::core::{ReferenceLocation, DEFAULT_OPERATIONAL_RADIUS_M};

/// Top-level configuration for a registry and its transform engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorSystemConfig {
    pub registry: RegistryConfig,
    pub transform: TransformConfig,
}

/// Anchor registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Prefix of generated anchor identifiers (`{prefix}_{n}`)
    pub id_prefix: String,
    /// Upper bound on live anchors; `None` is unbounded
    pub max_anchors: Option<usize>,
    /// Attach geographic coordinates to anchors when a reference is set
    pub annotate_geographic: bool,
    /// Result of the AR capability probe
    pub ar_capable: bool,
}

/// Coordinate transform configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Reference location applied when the engine is built from config
    pub reference: Option<ReferenceLocation>,
    /// Reject out-of-range or non-finite reference locations
    pub validate_ranges: bool,
    /// Radius (meters) the flat-earth approximation is trusted for
    pub max_operational_radius_m: f64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            id_prefix: "anchor".to_string(),
            max_anchors: None,
            annotate_geographic: true,
            ar_capable: true,
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            reference: None,
            validate_ranges: true,
            max_operational_radius_m: DEFAULT_OPERATIONAL_RADIUS_M,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid value {value} for {parameter}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
}

impl AnchorSystemConfig {
    /// Check every parameter, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.registry.id_prefix;
        if prefix.is_empty()
            || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::InvalidParameter {
                parameter: "registry.id_prefix".to_string(),
                value: format!("{:?}", prefix),
                reason: "must be non-empty ASCII alphanumeric, '-' or '_'".to_string(),
            });
        }

        if self.registry.max_anchors == Some(0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "registry.max_anchors".to_string(),
                value: "0".to_string(),
                reason: "must allow at least one anchor".to_string(),
            });
        }

        let radius = self.transform.max_operational_radius_m;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "transform.max_operational_radius_m".to_string(),
                value: radius.to_string(),
                reason: "must be a positive finite distance".to_string(),
            });
        }

        if let Some(reference) = &self.transform.reference {
            if let Err(e) =
                CoordinateValidator::validate_geographic(reference.lat, reference.lng, reference.alt)
            {
                return Err(ConfigError::InvalidParameter {
                    parameter: "transform.reference".to_string(),
                    value: format!("({}, {}, {})", reference.lat, reference.lng, reference.alt),
                    reason: e.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Loads, validates and saves [`AnchorSystemConfig`] as JSON
pub struct ConfigurationManager {
    config: AnchorSystemConfig,
    config_file_path: Option<PathBuf>,
    is_modified: bool,
}

impl ConfigurationManager {
    pub fn new() -> Self {
        Self {
            config: AnchorSystemConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create a manager and load configuration from `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &AnchorSystemConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: AnchorSystemConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AnchorSystemConfig = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded anchor system config");

        self.config = config;
        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Write configuration as pretty JSON and remember the path
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.config)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}
