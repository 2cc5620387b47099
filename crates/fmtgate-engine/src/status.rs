//! Working-tree status via git2.
//!
//! Produces the same shape as `git status --short`: one `XY path` line per
//! changed entry, untracked files as `??`, ignored files omitted.

use std::path::{Path, PathBuf};

use git2::{Repository, Status, StatusOptions};

/// Captured output of a status query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Short-format status lines.
    pub stdout: String,
    /// Anything that went wrong while querying.
    pub stderr: String,
}

impl StatusReport {
    /// `true` when the working tree has any reported change.
    pub fn has_changes(&self) -> bool {
        !self.stdout.is_empty()
    }
}

/// Query the versioned working tree for pending changes.
///
/// The query never fails outright; problems land in [`StatusReport::stderr`].
#[allow(async_fn_in_trait)]
pub trait WorkingTreeStatus {
    async fn status(&self) -> StatusReport;
}

/// Status of the repository containing `path`.
#[derive(Debug, Clone)]
pub struct GitStatus {
    path: PathBuf,
}

impl GitStatus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WorkingTreeStatus for GitStatus {
    async fn status(&self) -> StatusReport {
        let path = self.path.clone();
        match tokio::task::spawn_blocking(move || short_status(&path)).await {
            Ok(Ok(stdout)) => StatusReport {
                stdout,
                stderr: String::new(),
            },
            Ok(Err(e)) => StatusReport {
                stdout: String::new(),
                stderr: e.message().to_string(),
            },
            Err(e) => StatusReport {
                stdout: String::new(),
                stderr: format!("status query panicked: {e}"),
            },
        }
    }
}

/// Render the short status of the repository that contains `path`.
///
/// # Errors
///
/// Returns the git2 error if no repository is found or the index cannot be read.
pub fn short_status(path: &Path) -> Result<String, git2::Error> {
    let repo = Repository::discover(path)?;

    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .renames_head_to_index(true);

    let statuses = repo.statuses(Some(&mut opts))?;
    let mut out = String::new();
    for entry in statuses.iter() {
        let status = entry.status();
        if status.is_empty() || status.contains(Status::IGNORED) {
            continue;
        }
        let path = entry
            .head_to_index()
            .and_then(|d| d.new_file().path().map(|p| p.to_string_lossy().into_owned()))
            .or_else(|| entry.path().map(str::to_string))
            .unwrap_or_default();
        out.push_str(&status_code(status));
        out.push(' ');
        out.push_str(&path);
        out.push('\n');
    }
    Ok(out)
}

/// Two-letter `XY` code for a status entry.
fn status_code(status: Status) -> String {
    if status.contains(Status::CONFLICTED) {
        return "UU".into();
    }
    if status.contains(Status::WT_NEW) && !status.intersects(index_bits()) {
        return "??".into();
    }

    let index = if status.contains(Status::INDEX_NEW) {
        'A'
    } else if status.contains(Status::INDEX_MODIFIED) {
        'M'
    } else if status.contains(Status::INDEX_DELETED) {
        'D'
    } else if status.contains(Status::INDEX_RENAMED) {
        'R'
    } else if status.contains(Status::INDEX_TYPECHANGE) {
        'T'
    } else {
        ' '
    };

    let worktree = if status.contains(Status::WT_MODIFIED) {
        'M'
    } else if status.contains(Status::WT_DELETED) {
        'D'
    } else if status.contains(Status::WT_RENAMED) {
        'R'
    } else if status.contains(Status::WT_TYPECHANGE) {
        'T'
    } else {
        ' '
    };

    [index, worktree].iter().collect()
}

fn index_bits() -> Status {
    Status::INDEX_NEW
        | Status::INDEX_MODIFIED
        | Status::INDEX_DELETED
        | Status::INDEX_RENAMED
        | Status::INDEX_TYPECHANGE
}
