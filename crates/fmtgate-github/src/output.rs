//! Step outputs.

use std::io::Write;
use std::path::PathBuf;

use fmtgate_core::FmtgateError;

const DELIMITER: &str = "ghadelimiter_fmtgate";

/// Somewhere to publish named step outputs.
pub trait OutputSink {
    /// Publish `value` under `name`.
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), FmtgateError>;
}

/// Collects outputs in memory.
impl OutputSink for Vec<(String, String)> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), FmtgateError> {
        self.push((name.to_string(), value.to_string()));
        Ok(())
    }
}

/// Publishes outputs the way the Actions runner expects them.
///
/// Appends to the `$GITHUB_OUTPUT` file when the runner provides one, and
/// falls back to the legacy `::set-output` command on stdout otherwise.
#[derive(Debug, Clone, Default)]
pub struct ActionOutput {
    file: Option<PathBuf>,
}

impl ActionOutput {
    /// Use `$GITHUB_OUTPUT` if set.
    pub fn from_env() -> Self {
        let file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        Self { file }
    }

    /// Append outputs to `path`.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }
}

impl OutputSink for ActionOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), FmtgateError> {
        match &self.file {
            Some(path) => {
                let entry = file_entry(name, value)?;
                let mut file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                file.write_all(entry.as_bytes())?;
            }
            None => {
                println!();
                println!("::set-output name={name}::{}", crate::logging::escape_data(value));
            }
        }
        Ok(())
    }
}

/// One `$GITHUB_OUTPUT` entry. Multi-line values use the heredoc form.
///
/// # Errors
///
/// Returns [`FmtgateError::Config`] if a value would collide with the delimiter.
///
/// # Examples
///
/// ```
/// use fmtgate_github::output::file_entry;
///
/// assert_eq!(file_entry("has-changes", "true").unwrap(), "has-changes=true\n");
/// ```
pub fn file_entry(name: &str, value: &str) -> Result<String, FmtgateError> {
    if !value.contains('\n') && !value.contains('\r') {
        return Ok(format!("{name}={value}\n"));
    }
    if name.contains(DELIMITER) || value.contains(DELIMITER) {
        return Err(FmtgateError::Config(format!(
            "output '{name}' must not contain the delimiter {DELIMITER}"
        )));
    }
    Ok(format!("{name}<<{DELIMITER}\n{value}\n{DELIMITER}\n"))
}
