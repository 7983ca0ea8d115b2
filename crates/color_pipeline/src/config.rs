use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::{
    algorithms::SelectionPolicy,
    color::ColorLabel,
    error::{PipelineError, Result},
};

/// Tracker configuration, loadable from TOML or JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Colors enabled when the pipeline starts
    pub target_colors: Vec<ColorLabel>,
    /// Which contour's position gets published
    pub selection: SelectionPolicy,
    pub annotation: AnnotationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct AnnotationConfig {
    pub enabled: bool,
    /// RGB color of the drawn boxes
    pub color: [u8; 3],
    #[schemars(range(min = 1, max = 16))]
    pub thickness: u32,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: [0, 255, 0],
            thickness: 2,
        }
    }
}

impl TrackerConfig {
    /// Get the JSON schema for the configuration
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(TrackerConfig)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&fs::read_to_string(path_ref)?),
            Some("json") => Self::from_json(&fs::read_to_string(path_ref)?),
            _ => Err(PipelineError::UnsupportedConfigFormat),
        }
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Convert configuration to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
