//! Configuration management for shape-graph.

mod sub_configs;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::graph_linking::KnnConfig;
use crate::source::shapenet::synset_for_category;

pub use sub_configs::{
    LoggingConfig, RenderConfig, SourceConfig, SourceKind, SyntheticShape,
};

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Accepted values for `logging.format`.
pub const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub knn: KnnConfig,
    pub source: SourceConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{SHAPE_GRAPH_ENV}.toml (environment-specific)
    /// 3. Environment variables with SHAPE_GRAPH_ prefix, `__` between levels
    ///    (e.g. `SHAPE_GRAPH_KNN__K=8`)
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var("SHAPE_GRAPH_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix("SHAPE_GRAPH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults for testing/development.
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| CoreError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> CoreResult<()> {
        if self.knn.k == 0 {
            return Err(CoreError::InvalidK { k: self.knn.k });
        }

        self.validate_source()?;

        if self.render.width == 0 || self.render.height == 0 {
            return Err(CoreError::ConfigError(
                "render.width and render.height must be greater than 0".into(),
            ));
        }

        if !(self.render.marker_radius > 0.0) {
            return Err(CoreError::ConfigError(
                "render.marker_radius must be greater than 0".into(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(CoreError::ConfigError(format!(
                "logging.level must be one of {:?}, got \"{}\"",
                LOG_LEVELS, self.logging.level
            )));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(CoreError::ConfigError(format!(
                "logging.format must be one of {:?}, got \"{}\"",
                LOG_FORMATS, self.logging.format
            )));
        }

        Ok(())
    }

    fn validate_source(&self) -> CoreResult<()> {
        match self.source.kind {
            SourceKind::ShapeNet => {
                if synset_for_category(&self.source.category).is_none() {
                    return Err(CoreError::ConfigError(format!(
                        "source.category \"{}\" is not a ShapeNet category",
                        self.source.category
                    )));
                }
            }
            SourceKind::File => {
                if self.source.path.is_none() {
                    return Err(CoreError::ConfigError(
                        "source.path is required when source.kind = \"file\"".into(),
                    ));
                }
            }
            SourceKind::Synthetic => {
                if self.source.synthetic_count == 0 {
                    return Err(CoreError::ConfigError(
                        "source.synthetic_count must be greater than 0".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}
