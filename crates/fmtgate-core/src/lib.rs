//! Core types, input handling, and error handling for fmtgate.
//!
//! This crate provides the shared foundation used by the other fmtgate crates:
//! - [`FmtgateError`] — unified error type using `thiserror`
//! - [`InputSource`] — string-keyed action inputs from the environment or a TOML file
//! - [`FormatOptions`] — the typed configuration threaded through a format run
//! - Shared types: [`FormatMode`], [`ResolvedScope`], [`CommandLine`], [`ExecutionOutcome`]

mod error;
pub mod inputs;
mod options;
mod types;

pub use error::FmtgateError;
pub use inputs::{EnvInputs, InputSource, LayeredInputs, TomlInputs};
pub use options::{input_names, FormatOptions};
pub use types::{CommandLine, ExecutionOutcome, FormatMode, ResolvedScope};

/// A convenience `Result` type for fmtgate operations.
pub type Result<T> = std::result::Result<T, FmtgateError>;
