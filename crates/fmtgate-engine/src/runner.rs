//! Locating and running the formatter.

use std::path::PathBuf;

use fmtgate_core::{CommandLine, FmtgateError};
use tokio::process::Command;

/// Runs an assembled command line and reports its exit code.
///
/// A non-zero exit code is data, not an error; only failing to start the
/// tool is.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    /// Run `command` to completion and return its exit code.
    async fn run(&self, command: &CommandLine) -> Result<i32, FmtgateError>;
}

/// Runs `dotnet` from `PATH`, streaming its output to the job log.
#[derive(Debug, Clone)]
pub struct DotnetRunner {
    tool: String,
    working_dir: Option<PathBuf>,
}

impl Default for DotnetRunner {
    fn default() -> Self {
        Self::new("dotnet")
    }
}

impl DotnetRunner {
    /// Run `tool` (looked up on `PATH`) instead of `dotnet`.
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            working_dir: None,
        }
    }

    /// Run the tool from `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Resolve the tool to an executable path.
    ///
    /// # Errors
    ///
    /// Returns [`FmtgateError::ToolNotFound`] if it is not on `PATH`.
    pub fn locate(&self) -> Result<PathBuf, FmtgateError> {
        which::which(&self.tool).map_err(|e| FmtgateError::ToolNotFound {
            tool: self.tool.clone(),
            reason: e.to_string(),
        })
    }
}

impl ToolRunner for DotnetRunner {
    async fn run(&self, command: &CommandLine) -> Result<i32, FmtgateError> {
        let program = self.locate()?;
        log::info!("[command]{} {command}", program.display());

        let mut process = Command::new(&program);
        process.args(command.tokens());
        if let Some(dir) = &self.working_dir {
            process.current_dir(dir);
        }

        let status = process.status().await?;
        match status.code() {
            Some(code) => Ok(code),
            None => {
                log::warn!("{} was terminated by a signal", program.display());
                Ok(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_is_not_found() {
        let runner = DotnetRunner::new("fmtgate-definitely-not-installed");
        let err = runner.locate().unwrap_err();
        assert!(matches!(err, FmtgateError::ToolNotFound { ref tool, .. } if tool == "fmtgate-definitely-not-installed"));
    }

    #[tokio::test]
    async fn run_fails_fast_when_tool_missing() {
        let runner = DotnetRunner::new("fmtgate-definitely-not-installed");
        let cmd = CommandLine::from_tokens(vec!["format".into()]);
        assert!(matches!(
            runner.run(&cmd).await,
            Err(FmtgateError::ToolNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_returned_not_raised() {
        let runner = DotnetRunner::new("sh");
        let cmd = CommandLine::from_tokens(vec!["-c".into(), "exit 3".into()]);
        assert_eq!(runner.run(&cmd).await.unwrap(), 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let runner = DotnetRunner::new("sh").in_dir(dir.path());
        let cmd = CommandLine::from_tokens(vec!["-c".into(), "touch marker".into()]);
        assert_eq!(runner.run(&cmd).await.unwrap(), 0);
        assert!(dir.path().join("marker").exists());
    }
}
