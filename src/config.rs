//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields a usable configuration.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid runtime config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Filename handed to the compiler for `eval`/`exec` source text.
    pub eval_filename: String,
    pub compile_flags: u32,
    pub dont_inherit: bool,
    /// Size hint for the locals dict allocated per function call.
    pub locals_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            eval_filename: "<string>".to_string(),
            compile_flags: 0,
            dont_inherit: true,
            locals_capacity: 0,
        }
    }
}

impl RuntimeConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
