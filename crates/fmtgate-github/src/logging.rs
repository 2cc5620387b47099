//! Log records rendered as workflow commands.
//!
//! Warnings and errors become `::warning::` / `::error::` annotations, debug
//! records become `::debug::` lines the runner hides unless step debugging is
//! on, and info records are printed as-is.

use std::io::Write;

use fmtgate_core::FmtgateError;
use log::{Level, LevelFilter};

/// Environment variable overriding the default filter (`env_logger` syntax).
pub const LOG_ENV: &str = "FMTGATE_LOG";

/// Install the global logger, writing to stdout.
///
/// # Errors
///
/// Returns [`FmtgateError::Config`] if a logger is already installed.
pub fn init() -> Result<(), FmtgateError> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("fmtgate", LevelFilter::Debug)
        .parse_env(LOG_ENV)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(buf, "{}", render(record.level(), &record.args().to_string()))
        })
        .try_init()
        .map_err(|e| FmtgateError::Config(format!("failed to install logger: {e}")))
}

/// Render one message for `level`.
///
/// # Examples
///
/// ```
/// use fmtgate_github::logging::render;
/// use log::Level;
///
/// assert_eq!(render(Level::Warn, "careful"), "::warning::careful");
/// assert_eq!(render(Level::Info, "plain"), "plain");
/// ```
pub fn render(level: Level, message: &str) -> String {
    let command = match level {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Debug | Level::Trace => "debug",
        Level::Info => return message.to_string(),
    };
    format!("::{command}::{}", escape_data(message))
}

/// Escape a workflow command payload.
///
/// # Examples
///
/// ```
/// use fmtgate_github::logging::escape_data;
///
/// assert_eq!(escape_data("50%\nmore"), "50%25%0Amore");
/// ```
pub fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_and_debug_commands() {
        assert_eq!(render(Level::Error, "boom"), "::error::boom");
        assert_eq!(render(Level::Debug, "detail"), "::debug::detail");
        assert_eq!(render(Level::Trace, "detail"), "::debug::detail");
    }

    #[test]
    fn info_is_not_escaped() {
        assert_eq!(render(Level::Info, "100% done"), "100% done");
    }

    #[test]
    fn multiline_annotation_stays_on_one_line() {
        let line = render(Level::Error, "first\r\nsecond");
        assert_eq!(line, "::error::first%0D%0Asecond");
        assert!(!line.contains('\n'));
    }
}
