//! Command-line interface.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::{Config, Overrides};
use crate::generate::{check, emit_stylesheet, generate, render_stylesheet, stylesheet_path};

/// Generate the Kashyyyk documentation stylesheet and HTML pages.
///
/// With no command, behaves like `html`: the stylesheet is written, then
/// README.md and license.txt are converted to kashyyyk.html and
/// license.html.
#[derive(Debug, Parser)]
#[command(name = "readmegen", version)]
pub struct Cli {
    /// Config file (default: readmegen.yaml in --dir, if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the documents and receiving the output
    #[arg(short = 'C', long, global = true, default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    /// Stylesheet filename
    #[arg(long, global = true, value_name = "NAME")]
    pub stylesheet: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the stylesheet only
    Css {
        /// Print the stylesheet instead of writing it
        #[arg(long)]
        stdout: bool,
    },
    /// Write the stylesheet and convert the documents to HTML
    Html(HtmlArgs),
    /// Parse a stylesheet and verify its rules
    Check {
        /// Stylesheet to check (default: the configured stylesheet). An
        /// explicit file is checked without reading the config.
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Default, Args)]
pub struct HtmlArgs {
    /// Converter command line
    #[arg(long, value_name = "CMD")]
    pub converter: Option<String>,

    /// Kill the converter after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Don't treat a non-zero converter exit as a failure
    #[arg(long)]
    pub ignore_exit_status: bool,
}

/// How a run ended, short of a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// At least one document failed to convert.
    ConversionFailed,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Ok => ExitCode::SUCCESS,
            Status::ConversionFailed => ExitCode::FAILURE,
        }
    }
}

impl Cli {
    /// Default log filter directive for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }

    fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            stylesheet: self.stylesheet.clone(),
            ..Overrides::default()
        };
        if let Some(Commands::Html(html)) = &self.command {
            overrides.converter = html.converter.clone();
            overrides.timeout_secs = html.timeout;
            overrides.ignore_exit_status = html.ignore_exit_status;
        }
        overrides
    }

    /// Loads the effective configuration for this invocation.
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::discover(self.config.as_deref(), &self.dir)?;
        config.apply(&self.overrides());
        config.validate()?;
        Ok(config)
    }

    pub fn run(&self) -> anyhow::Result<Status> {
        if let Some(Commands::Check { file: Some(path) }) = &self.command {
            report_check(path)?;
            return Ok(Status::Ok);
        }

        let config = self.config()?;
        let default_html = Commands::Html(HtmlArgs::default());

        match self.command.as_ref().unwrap_or(&default_html) {
            Commands::Css { stdout: true } => {
                let mut out = io::stdout().lock();
                out.write_all(render_stylesheet(&config).as_bytes())
                    .context("writing stylesheet to stdout")?;
                out.flush()?;
            }
            Commands::Css { stdout: false } => {
                emit_stylesheet(&config, &self.dir)?;
            }
            Commands::Html(_) => {
                let converter = config.converter()?;
                let report = generate(&config, &self.dir, &converter)?;
                if !report.is_success() {
                    return Ok(Status::ConversionFailed);
                }
            }
            Commands::Check { file } => {
                let path = file
                    .clone()
                    .unwrap_or_else(|| stylesheet_path(&config, &self.dir));
                report_check(&path)?;
            }
        }
        Ok(Status::Ok)
    }
}

fn report_check(path: &Path) -> anyhow::Result<()> {
    let rules = check(path)?;
    let summary: Vec<String> = rules
        .iter()
        .map(|r| format!("{} ({})", r.selector, r.declarations.len()))
        .collect();
    println!("{}: ok, {}", path.display(), summary.join(", "));
    Ok(())
}
