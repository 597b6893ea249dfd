/// Conversion settings: defaults, RON config files and overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::emitter::{TableFormat, DEFAULT_JS_BINDING};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("unknown output format '{0}' (expected json, js or ron)")]
    UnknownFormat(String),
}

/// Input file name used when none is configured.
pub const DEFAULT_INPUT: &str = "周易卦爻辞.txt";
/// Output file name used when none is configured.
pub const DEFAULT_OUTPUT: &str = "yijing_data.json";

/// Settings for one conversion run.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```ron
/// (output: "yijing_data.js", format: Some(JsModule))
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Explicit format; inferred from `output` when `None`.
    pub format: Option<TableFormat>,
    pub js_binding: String,
    /// Print the first parsed figure after a successful run.
    pub sample: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: None,
            js_binding: DEFAULT_JS_BINDING.to_string(),
            sample: true,
        }
    }
}

impl ConvertConfig {
    /// Load settings from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ConvertConfig, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_ron(&contents)
    }

    /// Parse settings from a RON string.
    pub fn parse_ron(input: &str) -> Result<ConvertConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    /// Set the format from a user-facing name such as `js`.
    pub fn set_format_name(&mut self, name: &str) -> Result<(), ConfigError> {
        let format =
            TableFormat::from_name(name).ok_or_else(|| ConfigError::UnknownFormat(name.to_string()))?;
        self.format = Some(format);
        Ok(())
    }

    /// The format to emit: the explicit one, or whatever the output
    /// extension implies.
    pub fn resolved_format(&self) -> TableFormat {
        self.format
            .unwrap_or_else(|| TableFormat::from_path(&self.output))
    }
}
