//! Configuration system
//!
//! File-backed configuration for tools built on the recreation subsystem.
//! The format is chosen by file extension: `.toml` or `.ron`.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents did not parse as the expected type
    #[error("config parse error in {path}: {message}")]
    Parse {
        /// Offending file
        path: String,
        /// Parser diagnostic
        message: String,
    },

    /// The value could not be serialized
    #[error("config serialize error: {0}")]
    Serialize(String),

    /// The path's extension is not a supported config format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Serializable configuration loadable from TOML or RON files
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load a configuration, picking the parser from the file extension
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let parse_error = |message: String| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        };
        match extension(path) {
            Some("toml") => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))
            }
            Some("ron") => {
                let contents = std::fs::read_to_string(path)?;
                ron::from_str(&contents).map_err(|e| parse_error(e.to_string()))
            }
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save the configuration, formatting per the file extension
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
