//! Publishing the outcome.

use fmtgate_core::{ExecutionOutcome, FmtgateError, FormatMode};
use fmtgate_github::OutputSink;

/// Publish `has-changes` for `outcome`.
///
/// # Errors
///
/// Returns whatever the sink fails with.
pub fn publish(outcome: ExecutionOutcome, sink: &mut impl OutputSink) -> Result<(), FmtgateError> {
    sink.set_output(ExecutionOutcome::OUTPUT_NAME, outcome.output_value())?;
    log::info!("{}={}", ExecutionOutcome::OUTPUT_NAME, outcome.output_value());
    Ok(())
}

/// Turn a published outcome into the run's final result.
///
/// Only a check run with `fail_fast` set and changes found fails. Apply runs
/// never fail here.
///
/// # Errors
///
/// Returns [`FmtgateError::FormattingIssues`] in that one case.
///
/// # Examples
///
/// ```
/// use fmtgate_core::{ExecutionOutcome, FormatMode};
/// use fmtgate_engine::report::enforce;
///
/// let dirty = ExecutionOutcome { has_changes: true };
/// assert!(enforce(FormatMode::Check, dirty, true).is_err());
/// assert!(enforce(FormatMode::Check, dirty, false).is_ok());
/// assert!(enforce(FormatMode::Apply, dirty, true).is_ok());
/// ```
pub fn enforce(
    mode: FormatMode,
    outcome: ExecutionOutcome,
    fail_fast: bool,
) -> Result<ExecutionOutcome, FmtgateError> {
    match mode {
        FormatMode::Check if fail_fast && outcome.has_changes => {
            Err(FmtgateError::FormattingIssues)
        }
        _ => Ok(outcome),
    }
}
