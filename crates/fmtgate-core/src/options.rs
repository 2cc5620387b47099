use crate::inputs::InputSource;
use crate::types::FormatMode;

/// Names of the action inputs read by fmtgate.
pub mod input_names {
    pub const ONLY_CHANGED_FILES: &str = "only-changed-files";
    pub const INCLUDE: &str = "include";
    pub const WORKSPACE: &str = "workspace";
    pub const WORKSPACE_IS_FOLDER: &str = "workspaceIsFolder";
    pub const EXCLUDE: &str = "exclude";
    pub const LOG_LEVEL: &str = "log-level";
    pub const FIX_WHITESPACE: &str = "fix-whitespace";
    pub const FIX_ANALYZERS_LEVEL: &str = "fix-analyzers-level";
    pub const FIX_STYLE_LEVEL: &str = "fix-style-level";
    pub const VERIFY_NO_CHANGES: &str = "verify-no-changes";
    pub const FAIL_FAST: &str = "fail-fast";
    pub const REPO_TOKEN: &str = "repo-token";
}

/// Typed configuration for a single format run.
///
/// Every optional string is `Some` only when its raw input was non-empty.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use fmtgate_core::FormatOptions;
///
/// let raw: HashMap<String, String> = [
///     ("workspace".to_string(), "src".to_string()),
///     ("exclude".to_string(), String::new()),
/// ]
/// .into();
/// let options = FormatOptions::from_inputs(&raw);
/// assert_eq!(options.workspace.as_deref(), Some("src"));
/// assert!(options.exclude.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Restrict formatting to files changed in the pull request.
    pub only_changed_files: bool,
    /// Project, solution or folder to format.
    pub workspace: Option<String>,
    /// Treat `workspace` as a folder (`-f`).
    pub workspace_is_folder: bool,
    /// `Some(true)` for check mode; unset means apply.
    pub dry_run: Option<bool>,
    /// Raw include input. Superseded by the changed-file list when scoping.
    pub include: Option<String>,
    /// Paths to exclude.
    pub exclude: Option<String>,
    /// Formatter verbosity, passed through unvalidated.
    pub log_level: Option<String>,
    /// Run whitespace fixes.
    pub fix_whitespace: bool,
    /// Severity for analyzer fixes.
    pub fix_analyzers_level: Option<String>,
    /// Severity for code style fixes.
    pub fix_style_level: Option<String>,
    /// Ask the formatter to fail if it would change anything.
    pub verify_no_changes: bool,
}

impl FormatOptions {
    /// Normalize raw inputs into options.
    ///
    /// Never fails: anything missing or unrecognized disables the feature.
    /// `workspaceIsFolder` and `fix-whitespace` are enabled by the literal
    /// `"false"`; every other boolean input is enabled by `"true"`.
    pub fn from_inputs(source: &impl InputSource) -> Self {
        use input_names::*;

        Self {
            only_changed_files: equals(source, ONLY_CHANGED_FILES, "true"),
            workspace: non_empty(source, WORKSPACE),
            // Inverted on purpose: these two inputs have always been read this way.
            workspace_is_folder: equals(source, WORKSPACE_IS_FOLDER, "false"),
            dry_run: None,
            include: non_empty(source, INCLUDE),
            exclude: non_empty(source, EXCLUDE),
            log_level: non_empty(source, LOG_LEVEL),
            fix_whitespace: equals(source, FIX_WHITESPACE, "false"),
            fix_analyzers_level: non_empty(source, FIX_ANALYZERS_LEVEL),
            fix_style_level: non_empty(source, FIX_STYLE_LEVEL),
            verify_no_changes: equals(source, VERIFY_NO_CHANGES, "true"),
        }
    }

    /// Set `dry_run` for the given entry point.
    pub fn with_mode(mut self, mode: FormatMode) -> Self {
        self.dry_run = Some(mode.is_dry_run());
        self
    }

    /// `true` when running in check mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    /// Whether the `fail-fast` input was set to `"true"`.
    pub fn fail_fast(source: &impl InputSource) -> bool {
        equals(source, input_names::FAIL_FAST, "true")
    }
}

fn equals(source: &impl InputSource, name: &str, literal: &str) -> bool {
    source.get(name).is_some_and(|value| value == literal)
}

fn non_empty(source: &impl InputSource, name: &str) -> Option<String> {
    source.get(name).filter(|value| !value.is_empty())
}
