//! Configuration: built-in defaults, an optional YAML file, CLI overrides.
//!
//! Precedence is CLI flag > config file > default. Every field of the file
//! is optional:
//!
//! ```yaml
//! stylesheet: kashyyyk.css
//! gradient:
//!   start: black
//!   end: "#222233"
//!   width_px: 928
//! converter:
//!   command: pandoc
//!   reference_links: true
//!   check_status: true
//!   timeout_secs: 60
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use readmegen_pipe::{CommandLineError, Pandoc, PANDOC};
use readmegen_style::{Gradient, StyleError};
use serde::Deserialize;

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE: &str = "readmegen.yaml";

/// Default stylesheet filename.
pub const DEFAULT_STYLESHEET: &str = "kashyyyk.css";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Stylesheet name must be a relative file name, got '{0}'")]
    StylesheetName(String),

    #[error("Converter timeout must be at least one second")]
    ZeroTimeout,

    #[error(transparent)]
    Gradient(#[from] StyleError),

    #[error(transparent)]
    Converter(#[from] CommandLineError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Stylesheet filename, written into the working directory and
    /// referenced verbatim from the HTML.
    pub stylesheet: String,
    pub gradient: Gradient,
    pub converter: ConverterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stylesheet: DEFAULT_STYLESHEET.to_string(),
            gradient: Gradient::default(),
            converter: ConverterConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Command line, split with shell quoting rules.
    pub command: String,
    pub reference_links: bool,
    /// Treat a non-zero exit as a failed conversion.
    pub check_status: bool,
    /// Seconds before the converter is killed; at least 1 when set.
    pub timeout_secs: Option<u64>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            command: PANDOC.to_string(),
            reference_links: true,
            check_status: true,
            timeout_secs: None,
        }
    }
}

/// Values given on the command line. `None` leaves the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub stylesheet: Option<String>,
    pub converter: Option<String>,
    pub timeout_secs: Option<u64>,
    pub ignore_exit_status: bool,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given, else `dir/readmegen.yaml` if it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config file");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(stylesheet) = &overrides.stylesheet {
            self.stylesheet = stylesheet.clone();
        }
        if let Some(command) = &overrides.converter {
            self.converter.command = command.clone();
        }
        if overrides.timeout_secs.is_some() {
            self.converter.timeout_secs = overrides.timeout_secs;
        }
        if overrides.ignore_exit_status {
            self.converter.check_status = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.stylesheet.trim();
        if name.is_empty() || Path::new(name).is_absolute() {
            return Err(ConfigError::StylesheetName(self.stylesheet.clone()));
        }
        if self.converter.timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        self.gradient.validate()?;
        Ok(())
    }

    /// The converter described by this configuration.
    pub fn converter(&self) -> Result<Pandoc, ConfigError> {
        let settings = &self.converter;
        let mut pandoc = Pandoc::from_command(&settings.command)?;
        if !settings.reference_links {
            pandoc = pandoc.without_reference_links();
        }
        if !settings.check_status {
            pandoc = pandoc.ignore_status();
        }
        if let Some(secs) = settings.timeout_secs {
            pandoc = pandoc.with_timeout(Duration::from_secs(secs));
        }
        Ok(pandoc)
    }
}
