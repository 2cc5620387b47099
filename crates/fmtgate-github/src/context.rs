//! The event that triggered the workflow run.

use std::fmt;
use std::path::Path;

use fmtgate_core::FmtgateError;

/// Category of the triggering event.
///
/// The set of event names is open; anything fmtgate does not treat specially
/// is kept verbatim in [`EventKind::Other`].
///
/// # Examples
///
/// ```
/// use fmtgate_github::EventKind;
///
/// assert_eq!(EventKind::parse("pull_request"), EventKind::PullRequest);
/// assert!(EventKind::parse("issue_comment").supports_changed_files());
/// assert!(!EventKind::parse("push").supports_changed_files());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `issue_comment`
    IssueComment,
    /// `pull_request`
    PullRequest,
    /// Any other event name.
    Other(String),
}

impl EventKind {
    /// Classify a `GITHUB_EVENT_NAME` value.
    pub fn parse(name: &str) -> Self {
        match name {
            "issue_comment" => Self::IssueComment,
            "pull_request" => Self::PullRequest,
            other => Self::Other(other.to_string()),
        }
    }

    /// The event name as the runner reports it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::IssueComment => "issue_comment",
            Self::PullRequest => "pull_request",
            Self::Other(name) => name,
        }
    }

    /// Whether the event carries a pull request whose files can be listed.
    pub fn supports_changed_files(&self) -> bool {
        matches!(self, Self::IssueComment | Self::PullRequest)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `owner/repo` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns [`FmtgateError::Config`] if either half is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use fmtgate_github::RepoRef;
    ///
    /// let repo = RepoRef::parse("dotnet/format").unwrap();
    /// assert_eq!(repo.owner, "dotnet");
    /// assert_eq!(repo.repo, "format");
    /// assert!(RepoRef::parse("format").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, FmtgateError> {
        match value.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(FmtgateError::Config(format!(
                "invalid repository '{value}', expected owner/repo"
            ))),
        }
    }
}

/// Everything fmtgate needs to know about the triggering event.
///
/// Only the event name is needed by every run. A malformed repository or
/// payload is recorded in `unresolved` and left unset, and only surfaces if
/// a pull request lookup needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    /// The event category.
    pub event: EventKind,
    /// Repository the workflow runs in.
    pub repository: Option<RepoRef>,
    /// Issue or pull request number from the event payload.
    pub issue_number: Option<u64>,
    /// REST API base URL, for GitHub Enterprise Server.
    pub api_url: Option<String>,
    /// Why `repository` or `issue_number` could not be read.
    pub unresolved: Vec<String>,
}

impl EventContext {
    /// Read the context from the runner's environment.
    ///
    /// A missing `GITHUB_EVENT_PATH` file is treated as an empty payload; an
    /// unreadable or non-JSON one is recorded in `unresolved`.
    pub fn from_env() -> Self {
        let event_name = std::env::var("GITHUB_EVENT_NAME").unwrap_or_default();
        let repository = std::env::var("GITHUB_REPOSITORY").ok();
        let mut unresolved = Vec::new();
        let payload = match std::env::var("GITHUB_EVENT_PATH") {
            Ok(path) if !path.is_empty() => match load_payload(Path::new(&path)) {
                Ok(payload) => payload,
                Err(e) => {
                    unresolved.push(format!("event payload {path}: {e}"));
                    None
                }
            },
            _ => None,
        };
        let mut context = Self::from_parts(&event_name, repository.as_deref(), payload.as_ref());
        for problem in &unresolved {
            log::debug!("{problem}");
        }
        context.unresolved.extend(unresolved);
        context.api_url = std::env::var("GITHUB_API_URL")
            .ok()
            .filter(|url| !url.is_empty());
        context
    }

    /// Assemble a context from already-read values.
    ///
    /// A malformed `repository` is left unset and noted in `unresolved`.
    pub fn from_parts(
        event_name: &str,
        repository: Option<&str>,
        payload: Option<&serde_json::Value>,
    ) -> Self {
        let mut unresolved = Vec::new();
        let repository = match repository {
            Some(value) if !value.is_empty() => match RepoRef::parse(value) {
                Ok(repo) => Some(repo),
                Err(e) => {
                    unresolved.push(e.to_string());
                    None
                }
            },
            _ => None,
        };
        for problem in &unresolved {
            log::debug!("{problem}");
        }
        Self {
            event: EventKind::parse(event_name),
            repository,
            issue_number: payload.and_then(issue_number),
            api_url: None,
            unresolved,
        }
    }
}

/// Read the event payload JSON at `path`, or `None` if the file does not exist.
///
/// # Errors
///
/// Returns [`FmtgateError::Io`] if the file exists but cannot be read, or
/// [`FmtgateError::Serialization`] if it is not JSON.
pub fn load_payload(path: &Path) -> Result<Option<serde_json::Value>, FmtgateError> {
    if !path.exists() {
        log::debug!("GITHUB_EVENT_PATH {} does not exist", path.display());
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// The issue or pull request number, checked in that order, then the
/// payload's top-level `number`.
fn issue_number(payload: &serde_json::Value) -> Option<u64> {
    ["issue", "pull_request"]
        .iter()
        .find_map(|key| payload.get(key))
        .unwrap_or(payload)
        .get("number")
        .and_then(serde_json::Value::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_events_keep_their_name() {
        let kind = EventKind::parse("workflow_dispatch");
        assert_eq!(kind, EventKind::Other("workflow_dispatch".into()));
        assert_eq!(kind.to_string(), "workflow_dispatch");
        assert!(!kind.supports_changed_files());
    }

    #[test]
    fn pull_request_payload_number() {
        let payload = serde_json::json!({ "pull_request": { "number": 17 } });
        let ctx = EventContext::from_parts("pull_request", Some("o/r"), Some(&payload));
        assert_eq!(ctx.issue_number, Some(17));
        assert_eq!(
            ctx.repository,
            Some(RepoRef {
                owner: "o".into(),
                repo: "r".into()
            })
        );
    }

    #[test]
    fn issue_comment_prefers_issue_number() {
        let payload = serde_json::json!({
            "issue": { "number": 5 },
            "comment": { "id": 99 },
        });
        let ctx = EventContext::from_parts("issue_comment", None, Some(&payload));
        assert_eq!(ctx.event, EventKind::IssueComment);
        assert_eq!(ctx.issue_number, Some(5));
        assert!(ctx.repository.is_none());
    }

    #[test]
    fn top_level_number_is_fallback() {
        let payload = serde_json::json!({ "number": 8, "action": "opened" });
        let ctx = EventContext::from_parts("pull_request", None, Some(&payload));
        assert_eq!(ctx.issue_number, Some(8));
    }

    #[test]
    fn missing_payload_has_no_number() {
        let ctx = EventContext::from_parts("push", None, None);
        assert!(ctx.issue_number.is_none());
    }

    #[test]
    fn malformed_repository_is_deferred() {
        let ctx = EventContext::from_parts("push", Some("no-slash"), None);
        assert_eq!(ctx.event, EventKind::Other("push".into()));
        assert!(ctx.repository.is_none());
        assert_eq!(ctx.unresolved.len(), 1);
        assert!(ctx.unresolved[0].contains("no-slash"));

        let ctx = EventContext::from_parts("push", Some(""), None);
        assert!(ctx.repository.is_none());
        assert!(ctx.unresolved.is_empty());
    }

    #[test]
    fn load_payload_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let payload = load_payload(&dir.path().join("event.json")).unwrap();
        assert!(payload.is_none());
    }

    #[test]
    fn load_payload_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, r#"{"pull_request":{"number":3}}"#).unwrap();
        let payload = load_payload(&path).unwrap().unwrap();
        assert_eq!(issue_number(&payload), Some(3));
    }

    #[test]
    fn load_payload_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_payload(&path),
            Err(FmtgateError::Serialization(_))
        ));
    }
}
