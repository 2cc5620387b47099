//! GitHub Actions runtime glue for fmtgate.
//!
//! Reads the triggering event, lists pull request files through the REST API,
//! publishes step outputs, and renders log records as workflow commands.

pub mod context;
pub mod logging;
pub mod output;
pub mod pulls;

pub use context::{EventContext, EventKind, RepoRef};
pub use output::{ActionOutput, OutputSink};
pub use pulls::{ChangedFileLister, PullRequestFiles};
