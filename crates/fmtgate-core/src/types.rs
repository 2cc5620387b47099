use std::fmt;

/// Which entry point is running.
///
/// # Examples
///
/// ```
/// use fmtgate_core::FormatMode;
///
/// assert!(FormatMode::Check.is_dry_run());
/// assert!(!FormatMode::Apply.is_dry_run());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Report whether formatting would change files, without writing them.
    Check,
    /// Format files in place.
    Apply,
}

impl FormatMode {
    /// `true` for [`FormatMode::Check`].
    pub fn is_dry_run(self) -> bool {
        matches!(self, Self::Check)
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Apply => write!(f, "fix"),
        }
    }
}

/// Which files a run is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedScope {
    /// Format whatever the workspace covers.
    NotScoped,
    /// Format only these files, in the order the lister returned them.
    Scoped(Vec<String>),
    /// Scoping applied but the change touched no relevant files.
    ScopedEmpty,
}

impl ResolvedScope {
    /// Build a scope from a lister result, collapsing an empty list to
    /// [`ResolvedScope::ScopedEmpty`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fmtgate_core::ResolvedScope;
    ///
    /// assert_eq!(ResolvedScope::from_files(vec![]), ResolvedScope::ScopedEmpty);
    /// assert_eq!(
    ///     ResolvedScope::from_files(vec!["a.cs".into()]),
    ///     ResolvedScope::Scoped(vec!["a.cs".into()]),
    /// );
    /// ```
    pub fn from_files(files: Vec<String>) -> Self {
        let files: Vec<String> = files.into_iter().filter(|f| !f.is_empty()).collect();
        if files.is_empty() {
            Self::ScopedEmpty
        } else {
            Self::Scoped(files)
        }
    }

    /// The scoped file list, if any.
    pub fn files(&self) -> Option<&[String]> {
        match self {
            Self::Scoped(files) => Some(files),
            _ => None,
        }
    }

    /// Number of files the run is restricted to; zero unless scoped.
    pub fn file_count(&self) -> usize {
        self.files().map_or(0, <[String]>::len)
    }
}

/// An assembled formatter command line, excluding the executable itself.
///
/// Token order matters to the formatter's argument parser. A `CommandLine`
/// cannot be modified after construction.
///
/// # Examples
///
/// ```
/// use fmtgate_core::CommandLine;
///
/// let cmd = CommandLine::from_tokens(vec!["format".into(), "--check".into()]);
/// assert_eq!(cmd.tokens(), ["format", "--check"]);
/// assert_eq!(cmd.to_string(), "format --check");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Wrap an already-ordered token list.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// The tokens in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// `true` if `token` appears anywhere in the command line.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// The result of one format run.
///
/// # Examples
///
/// ```
/// use fmtgate_core::ExecutionOutcome;
///
/// let outcome = ExecutionOutcome { has_changes: true };
/// assert_eq!(outcome.output_value(), "true");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Whether formatting changed (or would change) anything.
    pub has_changes: bool,
}

impl ExecutionOutcome {
    /// Name of the published output.
    pub const OUTPUT_NAME: &'static str = "has-changes";

    /// The value published for [`Self::OUTPUT_NAME`].
    pub fn output_value(self) -> &'static str {
        if self.has_changes {
            "true"
        } else {
            "false"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_files_drops_blank_paths() {
        let scope = ResolvedScope::from_files(vec![String::new(), "src/A.cs".into()]);
        assert_eq!(scope.files(), Some(&["src/A.cs".to_string()][..]));
    }

    #[test]
    fn from_files_all_blank_is_empty() {
        let scope = ResolvedScope::from_files(vec![String::new()]);
        assert_eq!(scope, ResolvedScope::ScopedEmpty);
        assert!(scope.files().is_none());
    }

    #[test]
    fn not_scoped_has_no_files() {
        assert!(ResolvedScope::NotScoped.files().is_none());
        assert_eq!(ResolvedScope::NotScoped.file_count(), 0);
    }

    #[test]
    fn file_count_ignores_blank_paths() {
        let scope = ResolvedScope::from_files(vec!["a.cs".into(), String::new(), "b.cs".into()]);
        assert_eq!(scope.file_count(), 2);
    }

    #[test]
    fn command_line_contains() {
        let cmd = CommandLine::from_tokens(vec!["format".into(), "-f".into(), "src".into()]);
        assert!(cmd.contains("-f"));
        assert!(!cmd.contains("--check"));
        assert_eq!(cmd.tokens().len(), 3);
    }

    #[test]
    fn outcome_values() {
        assert_eq!(ExecutionOutcome { has_changes: false }.output_value(), "false");
        assert_eq!(ExecutionOutcome::OUTPUT_NAME, "has-changes");
    }

    #[test]
    fn mode_display_matches_subcommands() {
        assert_eq!(FormatMode::Check.to_string(), "check");
        assert_eq!(FormatMode::Apply.to_string(), "fix");
    }
}
