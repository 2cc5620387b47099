//! The format orchestration engine.
//!
//! Resolves file scoping, assembles the `dotnet format` command line, runs it,
//! decides whether anything changed, and reports the outcome.

pub mod actions;
pub mod command;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod scope;
pub mod status;

pub use actions::{check, fix};
pub use pipeline::FormatEngine;
pub use runner::{DotnetRunner, ToolRunner};
pub use status::{GitStatus, StatusReport, WorkingTreeStatus};
