use std::ffi::OsStr;
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use wait_timeout::ChildExt;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Command `{0}` was not found")]
    NotFound(String),
    #[error("Failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Command `{0}` timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("Command `{0}` failed with status {1}")]
    CommandFailed(String, ExitStatus),
}

impl RunError {
    /// True when the program could not be found at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RunError::NotFound(_))
    }
}

/// Run `program` with `args` and wait for it to exit.
///
/// Stdin is closed; stdout and stderr are inherited so the tool's own
/// diagnostics reach the terminal. The exit status is returned as-is, see
/// [`run_checked`] for the variant that treats failure as an error.
///
/// # Arguments
///
/// * `program` - Executable name (looked up on `PATH`) or path
/// * `args` - Arguments, passed without any shell interpretation
/// * `timeout` - Optional timeout; if exceeded, the process is killed
pub fn run_command<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    timeout: Option<Duration>,
) -> Result<ExitStatus, RunError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    tracing::debug!(program, args = ?cmd.get_args().collect::<Vec<_>>(), "spawning");

    let mut child = cmd.spawn().map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => RunError::NotFound(program.to_string()),
        _ => RunError::Launch {
            program: program.to_string(),
            source,
        },
    })?;

    let status = match timeout {
        Some(duration) => match child.wait_timeout(duration)? {
            Some(status) => status,
            None => {
                child.kill()?;
                child.wait()?;
                return Err(RunError::Timeout(program.to_string(), duration));
            }
        },
        None => child.wait()?,
    };

    tracing::debug!(program, %status, "exited");
    Ok(status)
}

/// Like [`run_command`], but a non-zero exit is a [`RunError::CommandFailed`].
pub fn run_checked<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    timeout: Option<Duration>,
) -> Result<(), RunError> {
    let status = run_command(program, args, timeout)?;
    if !status.success() {
        return Err(RunError::CommandFailed(program.to_string(), status));
    }
    Ok(())
}
