// src/exec/process.rs

//! Single shell process runner.
//!
//! Each call builds a private current-thread Tokio runtime and blocks on it,
//! so callers stay synchronous. Must not be called from inside another Tokio
//! runtime.

use std::future::Future;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::runtime::Builder;
use tracing::{debug, warn};

use super::CommandError;

/// Run `command` with stdout and stderr inherited from this process.
pub fn run_streaming(
    program: &str,
    command: &str,
    timeout: Option<Duration>,
) -> Result<(), CommandError> {
    let mut cmd = shell_command(program, command);
    cmd.stdout(Stdio::inherit());
    block_on(wait_streaming(cmd, program, timeout))?
}

/// Run `command` capturing stdout; stderr is inherited.
pub fn run_captured(
    program: &str,
    command: &str,
    timeout: Option<Duration>,
) -> Result<String, CommandError> {
    let mut cmd = shell_command(program, command);
    cmd.stdout(Stdio::piped());
    block_on(wait_captured(cmd, program, timeout))?
}

async fn wait_streaming(
    mut cmd: Command,
    program: &str,
    timeout: Option<Duration>,
) -> Result<(), CommandError> {
    let mut child = cmd.spawn().map_err(|source| CommandError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let status = match timeout {
        Some(limit) => {
            let waited = tokio::time::timeout(limit, child.wait()).await;
            match waited {
                Ok(status) => status.map_err(CommandError::Io)?,
                Err(_) => {
                    if let Err(e) = child.kill().await {
                        warn!(error = %e, "failed to kill timed out child process");
                    }
                    return Err(CommandError::TimedOut { after: limit });
                }
            }
        }
        None => child.wait().await.map_err(CommandError::Io)?,
    };

    check_status(status)
}

async fn wait_captured(
    mut cmd: Command,
    program: &str,
    timeout: Option<Duration>,
) -> Result<String, CommandError> {
    let child = cmd.spawn().map_err(|source| CommandError::Spawn {
        program: program.to_string(),
        source,
    })?;

    // On timeout the child is dropped and killed (kill_on_drop).
    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| CommandError::TimedOut { after: limit })?,
        None => child.wait_with_output().await,
    }
    .map_err(CommandError::Io)?;

    check_status(output.status)?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn shell_command(program: &str, command: &str) -> Command {
    debug!(program, command, "spawning shell command");
    let mut cmd = Command::new(program);
    cmd.arg("-c")
        .arg(command)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    cmd
}

fn block_on<F: Future>(future: F) -> Result<F::Output, CommandError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CommandError::Runtime)?;
    Ok(runtime.block_on(future))
}

fn check_status(status: ExitStatus) -> Result<(), CommandError> {
    if status.success() {
        return Ok(());
    }
    if let Some(code) = status.code() {
        return Err(CommandError::Exited { code });
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(CommandError::Signalled { signal });
        }
    }
    Err(CommandError::Exited { code: -1 })
}
