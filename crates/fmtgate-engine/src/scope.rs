//! Decide which files a run covers.

use fmtgate_core::{FmtgateError, ResolvedScope};
use fmtgate_github::{ChangedFileLister, EventKind};

/// Whether changed-file scoping applies to this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeDecision {
    /// Scoping was not requested.
    Disabled,
    /// Scoping was requested and the event supports it.
    Eligible,
    /// Scoping was requested but the event has no pull request.
    Unsupported,
}

/// Pure eligibility check, without side effects.
///
/// # Examples
///
/// ```
/// use fmtgate_engine::scope::{decide, ScopeDecision};
/// use fmtgate_github::EventKind;
///
/// assert_eq!(decide(false, &EventKind::PullRequest), ScopeDecision::Disabled);
/// assert_eq!(decide(true, &EventKind::PullRequest), ScopeDecision::Eligible);
/// assert_eq!(decide(true, &EventKind::parse("push")), ScopeDecision::Unsupported);
/// ```
pub fn decide(only_changed_files: bool, event: &EventKind) -> ScopeDecision {
    if !only_changed_files {
        ScopeDecision::Disabled
    } else if event.supports_changed_files() {
        ScopeDecision::Eligible
    } else {
        ScopeDecision::Unsupported
    }
}

/// Resolve the scope for a run, asking `lister` only when scoping is eligible.
///
/// An unsupported event logs one warning and falls back to
/// [`ResolvedScope::NotScoped`].
///
/// # Errors
///
/// Propagates lister failures unchanged.
pub async fn resolve<L: ChangedFileLister>(
    only_changed_files: bool,
    event: &EventKind,
    lister: &L,
) -> Result<ResolvedScope, FmtgateError> {
    match decide(only_changed_files, event) {
        ScopeDecision::Disabled => Ok(ResolvedScope::NotScoped),
        ScopeDecision::Unsupported => {
            log::warn!(
                "Formatting only changed files is available on the issue_comment and pull_request events only"
            );
            Ok(ResolvedScope::NotScoped)
        }
        ScopeDecision::Eligible => {
            let scope = ResolvedScope::from_files(lister.changed_files().await?);
            log::info!("Checking {} files", scope.file_count());
            if scope == ResolvedScope::ScopedEmpty {
                log::debug!("No files found for formatting");
            }
            Ok(scope)
        }
    }
}
