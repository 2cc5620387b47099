use std::path::PathBuf;

/// Errors that can occur during a format run.
///
/// Library crates use this type directly; the binary converts to a
/// `miette::Report` at the boundary.
///
/// # Examples
///
/// ```
/// use fmtgate_core::FmtgateError;
///
/// let err = FmtgateError::Config("missing repository".into());
/// assert!(err.to_string().contains("missing repository"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FmtgateError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API failure while listing pull request files.
    #[error("GitHub error: {0}")]
    GitHub(String),

    /// The formatter executable could not be located.
    #[error("unable to locate executable file: {tool} ({reason})")]
    ToolNotFound {
        /// Name that was looked up on `PATH`.
        tool: String,
        /// Why the lookup failed.
        reason: String,
    },

    /// The check found formatting changes and fail-fast was requested.
    #[error("Formatting issues found")]
    FormattingIssues,

    /// JSON deserialization failure (event payloads).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure (input files).
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FmtgateError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = FmtgateError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn formatting_issues_message_is_stable() {
        assert_eq!(
            FmtgateError::FormattingIssues.to_string(),
            "Formatting issues found"
        );
    }

    #[test]
    fn tool_not_found_names_the_tool() {
        let err = FmtgateError::ToolNotFound {
            tool: "dotnet".into(),
            reason: "not on PATH".into(),
        };
        assert!(err.to_string().contains("dotnet"));
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = FmtgateError::FileNotFound(PathBuf::from("/tmp/event.json"));
        assert!(err.to_string().contains("/tmp/event.json"));
    }
}
