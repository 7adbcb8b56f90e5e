//! Stylesheet error types.
//!
//! Covers gradient validation, writing the stylesheet to disk, and parsing
//! an existing stylesheet back for inspection.

use std::io;
use std::path::PathBuf;

/// Error type for stylesheet construction, emission and inspection.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// A gradient prefix would not produce a complete declaration.
    #[error("Invalid gradient prefix '{prefix}': {reason}")]
    InvalidPrefix {
        /// The offending prefix template.
        prefix: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A gradient color cannot be embedded in a declaration.
    #[error("Invalid {role} color '{value}': {reason}")]
    InvalidColor {
        /// Which end of the gradient (`start` or `end`).
        role: &'static str,
        /// The offending color value.
        value: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A gradient with no prefixes would leave `body` without a background.
    #[error("Gradient needs at least one prefix")]
    NoPrefixes,

    /// The stylesheet file could not be created or written.
    #[error("Failed to write stylesheet {}: {source}", path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The stylesheet file could not be read.
    #[error("Failed to read stylesheet {}: {source}", path.display())]
    Read {
        /// Source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// CSS text could not be parsed.
    #[error("Failed to parse stylesheet at line {line}, column {column}: {message}")]
    Parse {
        /// 1-based line number.
        line: u32,
        /// 1-based column number.
        column: u32,
        /// Parser diagnostic.
        message: String,
    },

    /// The parsed rules do not have the expected `body`, `h1`, `h2` shape.
    #[error("Unexpected stylesheet layout: {0}")]
    Layout(String),
}

impl StyleError {
    pub(crate) fn prefix(prefix: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn color(role: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            role,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
