//! One format run: scope, assemble, execute, detect.

use fmtgate_core::{ExecutionOutcome, FmtgateError, FormatOptions, ResolvedScope};
use fmtgate_github::{ChangedFileLister, EventKind};

use crate::command;
use crate::runner::ToolRunner;
use crate::scope;
use crate::status::WorkingTreeStatus;

/// Runs the formatter with its collaborators.
///
/// The engine holds no state between runs; each [`FormatEngine::format`]
/// call is independent.
#[derive(Debug, Clone)]
pub struct FormatEngine<L, R, S> {
    lister: L,
    runner: R,
    status: S,
}

impl<L, R, S> FormatEngine<L, R, S> {
    #[cfg(test)]
    pub(crate) fn runner(&self) -> &R {
        &self.runner
    }
}

impl<L, R, S> FormatEngine<L, R, S>
where
    L: ChangedFileLister,
    R: ToolRunner,
    S: WorkingTreeStatus,
{
    pub fn new(lister: L, runner: R, status: S) -> Self {
        Self {
            lister,
            runner,
            status,
        }
    }

    /// Format according to `options` and report whether anything changed.
    ///
    /// In check mode the formatter's exit code is the verdict. In apply mode
    /// the exit code is ignored and the working tree is inspected instead.
    /// When scoping yields no files the formatter is never started.
    ///
    /// # Errors
    ///
    /// Returns lister failures and [`FmtgateError::ToolNotFound`]. A non-zero
    /// exit code or a failing status query is not an error.
    pub async fn format(
        &self,
        options: &FormatOptions,
        event: &EventKind,
    ) -> Result<ExecutionOutcome, FmtgateError> {
        let scope = scope::resolve(options.only_changed_files, event, &self.lister).await?;
        if scope == ResolvedScope::ScopedEmpty {
            return Ok(ExecutionOutcome { has_changes: false });
        }

        let command = command::assemble(options, &scope);
        let exit_code = self.runner.run(&command).await?;

        let has_changes = if options.is_dry_run() {
            log::info!("dotnet format return code {exit_code}");
            exit_code != 0
        } else {
            self.working_tree_changed().await
        };
        Ok(ExecutionOutcome { has_changes })
    }

    async fn working_tree_changed(&self) -> bool {
        log::info!("Checking changed files");

        let report = self.status.status().await;
        if !report.stderr.is_empty() {
            log::error!(
                "Errors while checking git status for changed files. Error: {}",
                report.stderr.trim_end()
            );
        }

        if report.has_changes() {
            log::info!("Found changed files");
            true
        } else {
            log::info!("Did not find any changed files");
            false
        }
    }
}
