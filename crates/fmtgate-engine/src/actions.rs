//! The `check` and `fix` entry points.

use fmtgate_core::{ExecutionOutcome, FmtgateError, FormatMode, FormatOptions, InputSource};
use fmtgate_github::{ChangedFileLister, EventKind, OutputSink};

use crate::pipeline::FormatEngine;
use crate::report;
use crate::runner::ToolRunner;
use crate::status::WorkingTreeStatus;

/// Report whether formatting would change anything, without writing files.
///
/// `has-changes` is always published first. If the `fail-fast` input is
/// `"true"` and changes were found, the run then fails.
///
/// # Errors
///
/// Engine and output failures, plus [`FmtgateError::FormattingIssues`].
pub async fn check<I, L, R, S, O>(
    inputs: &I,
    event: &EventKind,
    engine: &FormatEngine<L, R, S>,
    sink: &mut O,
) -> Result<ExecutionOutcome, FmtgateError>
where
    I: InputSource,
    L: ChangedFileLister,
    R: ToolRunner,
    S: WorkingTreeStatus,
    O: OutputSink,
{
    let fail_fast = FormatOptions::fail_fast(inputs);
    let outcome = run(FormatMode::Check, inputs, event, engine, sink).await?;
    report::enforce(FormatMode::Check, outcome, fail_fast)
}

/// Format files in place and publish whether the working tree changed.
///
/// # Errors
///
/// Engine and output failures.
pub async fn fix<I, L, R, S, O>(
    inputs: &I,
    event: &EventKind,
    engine: &FormatEngine<L, R, S>,
    sink: &mut O,
) -> Result<ExecutionOutcome, FmtgateError>
where
    I: InputSource,
    L: ChangedFileLister,
    R: ToolRunner,
    S: WorkingTreeStatus,
    O: OutputSink,
{
    run(FormatMode::Apply, inputs, event, engine, sink).await
}

async fn run<I, L, R, S, O>(
    mode: FormatMode,
    inputs: &I,
    event: &EventKind,
    engine: &FormatEngine<L, R, S>,
    sink: &mut O,
) -> Result<ExecutionOutcome, FmtgateError>
where
    I: InputSource,
    L: ChangedFileLister,
    R: ToolRunner,
    S: WorkingTreeStatus,
    O: OutputSink,
{
    let options = FormatOptions::from_inputs(inputs).with_mode(mode);
    log::debug!("running {mode} with options {options:?}");

    let outcome = engine.format(&options, event).await?;
    report::publish(outcome, sink)?;
    Ok(outcome)
}
