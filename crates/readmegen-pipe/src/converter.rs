use crate::command::{run_checked, run_command, RunError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default converter command.
pub const PANDOC: &str = "pandoc";

/// One source document and the HTML file it becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Conversion {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Resolve both paths against `dir`. Absolute paths are kept.
    pub fn in_dir(&self, dir: &Path) -> Self {
        Self {
            input: dir.join(&self.input),
            output: dir.join(&self.output),
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to convert {}: {source}", input.display())]
pub struct ConvertError {
    pub input: PathBuf,
    #[source]
    pub source: RunError,
}

impl ConvertError {
    /// True when the converter binary itself is missing.
    pub fn is_tool_missing(&self) -> bool {
        self.source.is_not_found()
    }
}

#[derive(Debug, Error)]
pub enum CommandLineError {
    #[error("Failed to parse converter command '{command}': {source}")]
    Parse {
        command: String,
        #[source]
        source: shell_words::ParseError,
    },
    #[error("Converter command is empty")]
    Empty,
}

/// A tool that turns a document into HTML linked to a stylesheet.
pub trait Converter: Send + Sync {
    /// Name of the program, for diagnostics.
    fn program(&self) -> &str;

    /// Convert `job.input` into `job.output`, referencing `stylesheet`.
    ///
    /// `stylesheet` is written into the HTML as-is, so it is normally a
    /// filename relative to the output, not a filesystem path.
    fn convert(&self, job: &Conversion, stylesheet: &str) -> Result<(), ConvertError>;
}

/// The pandoc command line.
///
/// Produces `<program> [leading args] --reference-links <input> --css=<stylesheet> -o <output>`.
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: String,
    leading_args: Vec<String>,
    reference_links: bool,
    check_status: bool,
    timeout: Option<Duration>,
}

impl Default for Pandoc {
    fn default() -> Self {
        Self::new(PANDOC)
    }
}

impl Pandoc {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            reference_links: true,
            check_status: true,
            timeout: None,
        }
    }

    /// Build from a command string such as `"pandoc"` or
    /// `"docker run --rm -v .:/data pandoc/core"`, split with shell quoting
    /// rules. Everything after the first word is passed before the
    /// per-document arguments.
    pub fn from_command(command: &str) -> Result<Self, CommandLineError> {
        let parts = shell_words::split(command).map_err(|source| CommandLineError::Parse {
            command: command.to_string(),
            source,
        })?;
        let (program, rest) = parts.split_first().ok_or(CommandLineError::Empty)?;
        let mut pandoc = Self::new(program.clone());
        pandoc.leading_args = rest.to_vec();
        Ok(pandoc)
    }

    /// Emit inline links instead of reference-style links.
    pub fn without_reference_links(mut self) -> Self {
        self.reference_links = false;
        self
    }

    /// Don't inspect the exit status; only a launch failure is an error.
    pub fn ignore_status(mut self) -> Self {
        self.check_status = false;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Arguments for one conversion, excluding the program itself.
    pub fn args(&self, job: &Conversion, stylesheet: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();
        if self.reference_links {
            args.push("--reference-links".into());
        }
        args.push(job.input.clone().into_os_string());
        args.push(format!("--css={stylesheet}").into());
        args.push("-o".into());
        args.push(job.output.clone().into_os_string());
        args
    }
}

impl Converter for Pandoc {
    fn program(&self) -> &str {
        &self.program
    }

    fn convert(&self, job: &Conversion, stylesheet: &str) -> Result<(), ConvertError> {
        let args = self.args(job, stylesheet);
        let result = if self.check_status {
            run_checked(&self.program, &args, self.timeout)
        } else {
            run_command(&self.program, &args, self.timeout).map(|_| ())
        };
        result.map_err(|source| ConvertError {
            input: job.input.clone(),
            source,
        })
    }
}
