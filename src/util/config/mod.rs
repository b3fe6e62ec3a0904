//! Neve configuration system
//!
//! One RON document configures the whole pipeline. Every field has a
//! default, so an empty document `()` is a valid configuration.
//!
//! ```text
//! (
//!     log_level: Some(Debug),
//!     compiler: (
//!         optimizer: (fold_constants: false),
//!     ),
//!     vm: (stack_size: 64, echo_result: true),
//! )
//! ```
//!
//! # Usage
//!
//! ```rust
//! use neve::util::config::PipelineConfig;
//!
//! let config = PipelineConfig::from_ron_str("(vm: (stack_size: 32))").unwrap();
//! assert_eq!(config.vm.stack_size, 32);
//! assert!(config.compiler.optimizer.fold_constants);
//! ```

use crate::frontend::CompilerConfig;
use crate::util::logger::{self, LogLevel};
use crate::vm::VMConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "neve.ron";

/// Configuration of the whole compile-and-execute pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Install a `tracing` subscriber at this level when set
    #[serde(default)]
    pub log_level: Option<LogLevel>,
    /// Front end and optimizer settings
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Virtual machine settings
    #[serde(default)]
    pub vm: VMConfig,
}

impl PipelineConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Load `neve.ron` from a directory, falling back to defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Install the configured logger, if any
    pub fn init_logging(&self) {
        if let Some(level) = self.log_level {
            logger::init_with_level(level);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.vm.stack_size == 0 {
            return Err(ConfigError::Invalid(
                "vm.stack_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
