//! # readmegen - Kashyyyk Documentation Builder
//!
//! Writes the documentation stylesheet and converts `README.md` and
//! `license.txt` into HTML pages that link to it, using an external
//! converter (pandoc by default).
//!
//! The stylesheet itself comes from [`readmegen_style`] and the converter
//! invocation from [`readmegen_pipe`]; this crate adds configuration and the
//! command line.
//!
//! A missing converter is not an error: a warning is logged and no HTML is
//! produced. A converter that runs and fails makes the run exit non-zero.

pub mod cli;
pub mod config;
pub mod generate;

pub use cli::{Cli, Commands, Status};
pub use config::{Config, ConfigError, ConverterConfig, Overrides};
