//! Hosting deploy hook.
//!
//! After the page is written the generator can hand off to the hosting
//! CLI (by default `firebase deploy --only hosting`). The command is split on
//! whitespace and no shell is involved, so quotes are passed through
//! literally and an argument cannot contain a space. Its output goes straight
//! to the terminal.

use std::error::Error;
use std::fmt;
use std::process::ExitStatus;
use std::time::Instant;
use tokio::process::Command;
use tracing::{error, info, instrument};

/// Why the deploy step did not succeed.
#[derive(Debug)]
pub enum DeployError {
    /// The configured command line was blank.
    EmptyCommand,
    /// The program could not be started.
    Spawn { program: String, source: std::io::Error },
    /// The program ran and exited unsuccessfully.
    Failed { program: String, status: ExitStatus },
}

impl fmt::Display for DeployError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::EmptyCommand => write!(f, "deploy command is empty"),
            DeployError::Spawn { program, source } => write!(f, "could not start {program}: {source}"),
            DeployError::Failed { program, status } => write!(f, "{program} exited with {status}"),
        }
    }
}

impl Error for DeployError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeployError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Run `command_line` and wait for it to finish.
#[instrument(level = "info")]
pub async fn run(command_line: &str) -> Result<(), DeployError> {
    let mut parts = command_line.split_whitespace();
    let program = parts.next().ok_or(DeployError::EmptyCommand)?.to_string();
    let args: Vec<&str> = parts.collect();

    let t0 = Instant::now();
    info!(%program, ?args, "Starting deploy");
    let status = Command::new(&program)
        .args(&args)
        .status()
        .await
        .map_err(|source| DeployError::Spawn {
            program: program.clone(),
            source,
        })?;

    let elapsed_ms = t0.elapsed().as_millis() as u64;
    if status.success() {
        info!(%program, elapsed_ms, "Deploy finished");
        Ok(())
    } else {
        error!(%program, %status, elapsed_ms, "Deploy command failed");
        Err(DeployError::Failed { program, status })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command() {
        assert!(run("true").await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_command() {
        assert!(matches!(run("false").await, Err(DeployError::Failed { .. })));
    }

    #[tokio::test]
    async fn test_missing_program() {
        assert!(matches!(
            run("definitely-not-a-deploy-tool --only hosting").await,
            Err(DeployError::Spawn { .. })
        ));
    }

    #[tokio::test]
    async fn test_quotes_are_not_interpreted() {
        // A shell would strip the quotes and succeed; here `test` compares `"x"` with `x`.
        assert!(matches!(run(r#"test "x" = x"#).await, Err(DeployError::Failed { .. })));
    }

    #[tokio::test]
    async fn test_blank_command() {
        assert!(matches!(run("   ").await, Err(DeployError::EmptyCommand)));
    }
}
