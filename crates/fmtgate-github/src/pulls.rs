//! Pull request file listing through the GitHub REST API.

use std::future::Future;

use fmtgate_core::FmtgateError;
use serde::{Deserialize, Serialize};

use crate::context::{EventContext, RepoRef};

/// Files the REST API returns per page at most.
const PER_PAGE: u8 = 100;

/// Extensions `dotnet format` can act on, matched case-sensitively.
pub const SOURCE_EXTENSIONS: &[&str] = &["cs", "vb"];

/// Source of the files changed by the pull request under review.
#[allow(async_fn_in_trait)]
pub trait ChangedFileLister {
    /// Paths changed by the current pull request, in API order.
    ///
    /// An empty list is a valid answer.
    async fn changed_files(&self) -> Result<Vec<String>, FmtgateError>;
}

/// Lists pull request files with octocrab.
///
/// Nothing is validated up front: a missing token, repository or pull
/// request number only fails once [`ChangedFileLister::changed_files`] is
/// called, so runs that never scope don't need them.
///
/// # Examples
///
/// ```
/// use fmtgate_github::{EventContext, PullRequestFiles};
///
/// let ctx = EventContext::from_parts("pull_request", Some("octo/app"), None);
/// let _lister = PullRequestFiles::new(None, &ctx);
/// ```
#[derive(Debug, Clone)]
pub struct PullRequestFiles {
    token: Option<String>,
    repository: Option<RepoRef>,
    number: Option<u64>,
    api_url: Option<String>,
    unresolved: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PullFile {
    filename: String,
    status: String,
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

impl PullRequestFiles {
    /// Create a lister for the pull request in `context`.
    pub fn new(token: Option<String>, context: &EventContext) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            repository: context.repository.clone(),
            number: context.issue_number,
            api_url: context.api_url.clone(),
            unresolved: context.unresolved.clone(),
        }
    }

    fn client(&self) -> Result<octocrab::Octocrab, FmtgateError> {
        let Some(token) = &self.token else {
            return Err(FmtgateError::Config(
                "no GitHub token available. Set the repo-token input or GITHUB_TOKEN".into(),
            ));
        };
        let mut builder = octocrab::Octocrab::builder().personal_token(token.clone());
        if let Some(url) = &self.api_url {
            builder = builder
                .base_uri(url.as_str())
                .map_err(|e| FmtgateError::Config(format!("invalid GITHUB_API_URL '{url}': {e}")))?;
        }
        builder
            .build()
            .map_err(|e| FmtgateError::GitHub(format!("failed to create GitHub client: {e}")))
    }

    /// A configuration error for a missing value, with whatever was
    /// recorded about why it is missing.
    fn missing(&self, what: &str) -> FmtgateError {
        if self.unresolved.is_empty() {
            FmtgateError::Config(what.to_string())
        } else {
            FmtgateError::Config(format!("{what} ({})", self.unresolved.join("; ")))
        }
    }
}

impl ChangedFileLister for PullRequestFiles {
    async fn changed_files(&self) -> Result<Vec<String>, FmtgateError> {
        let Some(repo) = &self.repository else {
            return Err(self.missing("GITHUB_REPOSITORY is not set"));
        };
        let Some(number) = self.number else {
            return Err(self.missing("the event payload does not reference a pull request"));
        };
        let client = self.client()?;
        let route = format!("/repos/{}/{}/pulls/{number}/files", repo.owner, repo.repo);

        let client = &client;
        let route = route.as_str();
        let files = collect_pages(move |page| async move {
            let params = PageParams {
                per_page: PER_PAGE,
                page,
            };
            let batch: Vec<PullFile> = client
                .get(route, Some(&params))
                .await
                .map_err(|e| FmtgateError::GitHub(format!("failed to list pull request files: {e}")))?;
            Ok::<_, FmtgateError>(batch)
        })
        .await?;

        log::debug!(
            "pull request #{number} touches {} files before filtering",
            files.len()
        );
        Ok(relevant_files(files))
    }
}

/// Fetch pages starting at 1 until one comes back short of [`PER_PAGE`].
async fn collect_pages<F, Fut>(mut fetch: F) -> Result<Vec<PullFile>, FmtgateError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<PullFile>, FmtgateError>>,
{
    let mut files = Vec::new();
    let mut page = 1;
    loop {
        let batch = fetch(page).await?;
        let done = batch.len() < usize::from(PER_PAGE);
        files.extend(batch);
        if done {
            return Ok(files);
        }
        page += 1;
    }
}

/// Drop removed files and files the formatter does not handle.
fn relevant_files(files: Vec<PullFile>) -> Vec<String> {
    files
        .into_iter()
        .filter(|f| f.status != "removed")
        .filter(|f| is_source_file(&f.filename))
        .map(|f| f.filename)
        .collect()
}

fn is_source_file(path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use super::*;

    fn file(name: &str, status: &str) -> PullFile {
        PullFile {
            filename: name.into(),
            status: status.into(),
        }
    }

    fn page_of(page: u32, len: usize) -> Vec<PullFile> {
        (0..len)
            .map(|i| file(&format!("p{page}/F{i}.cs"), "modified"))
            .collect()
    }

    /// Serves `sizes[page - 1]` files per page, recording each request.
    async fn fetch_sizes(sizes: &[usize]) -> (Vec<PullFile>, Vec<u32>) {
        let mut requested = Vec::new();
        let files = collect_pages(|page| {
            requested.push(page);
            let len = sizes.get(page as usize - 1).copied().unwrap_or(0);
            ready(Ok(page_of(page, len)))
        })
        .await
        .unwrap();
        (files, requested)
    }

    #[tokio::test]
    async fn pages_until_short_page() {
        let (files, requested) = fetch_sizes(&[100, 100, 37]).await;
        assert_eq!(requested, [1, 2, 3]);
        assert_eq!(files.len(), 237);
        assert_eq!(files[0].filename, "p1/F0.cs");
        assert_eq!(files[100].filename, "p2/F0.cs");
        assert_eq!(files[236].filename, "p3/F36.cs");
    }

    #[tokio::test]
    async fn full_page_is_followed_by_empty_page() {
        let (files, requested) = fetch_sizes(&[100, 0]).await;
        assert_eq!(requested, [1, 2]);
        assert_eq!(files.len(), 100);
    }

    #[tokio::test]
    async fn empty_first_page_stops() {
        let (files, requested) = fetch_sizes(&[]).await;
        assert_eq!(requested, [1]);
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn page_error_is_propagated() {
        let result = collect_pages(|page| {
            ready(if page == 1 {
                Ok(page_of(1, 100))
            } else {
                Err(FmtgateError::GitHub("rate limited".into()))
            })
        })
        .await;
        assert!(matches!(result, Err(FmtgateError::GitHub(_))));
    }

    #[test]
    fn removed_files_are_skipped() {
        let files = vec![file("src/A.cs", "removed"), file("src/B.cs", "modified")];
        assert_eq!(relevant_files(files), vec!["src/B.cs"]);
    }

    #[test]
    fn non_source_files_are_skipped() {
        let files = vec![
            file("README.md", "modified"),
            file("src/Program.cs", "added"),
            file("src/Module.vb", "renamed"),
            file("Makefile", "added"),
        ];
        assert_eq!(
            relevant_files(files),
            vec!["src/Program.cs", "src/Module.vb"]
        );
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let files = vec![file("src/Legacy.VB", "modified"), file("src/Old.CS", "added")];
        assert!(relevant_files(files).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let files = vec![
            file("z.cs", "modified"),
            file("a.cs", "modified"),
            file("m.cs", "added"),
        ];
        assert_eq!(relevant_files(files), vec!["z.cs", "a.cs", "m.cs"]);
    }

    #[test]
    fn pull_file_deserializes_api_shape() {
        let json = r#"[{"sha":"abc","filename":"src/A.cs","status":"modified","additions":1}]"#;
        let files: Vec<PullFile> = serde_json::from_str(json).unwrap();
        assert_eq!(files[0].filename, "src/A.cs");
        assert_eq!(files[0].status, "modified");
    }

    #[test]
    fn empty_token_is_treated_as_missing() {
        let ctx = EventContext::from_parts("pull_request", Some("o/r"), None);
        let lister = PullRequestFiles::new(Some(String::new()), &ctx);
        assert!(matches!(lister.client(), Err(FmtgateError::Config(_))));
    }

    #[tokio::test]
    async fn missing_pull_request_number_fails_before_network() {
        let ctx = EventContext::from_parts("pull_request", Some("o/r"), None);
        let lister = PullRequestFiles::new(Some("token".into()), &ctx);
        let err = lister.changed_files().await.unwrap_err();
        assert!(err.to_string().contains("pull request"));
    }

    #[tokio::test]
    async fn missing_repository_fails_before_network() {
        let payload = serde_json::json!({ "number": 4 });
        let ctx = EventContext::from_parts("pull_request", None, Some(&payload));
        let lister = PullRequestFiles::new(Some("token".into()), &ctx);
        let err = lister.changed_files().await.unwrap_err();
        assert!(err.to_string().contains("GITHUB_REPOSITORY"));
    }

    #[tokio::test]
    async fn malformed_repository_surfaces_when_listing() {
        let payload = serde_json::json!({ "number": 4 });
        let ctx = EventContext::from_parts("pull_request", Some("noslash"), Some(&payload));
        let lister = PullRequestFiles::new(Some("token".into()), &ctx);
        let err = lister.changed_files().await.unwrap_err();
        assert!(matches!(err, FmtgateError::Config(_)));
        assert!(err.to_string().contains("invalid repository 'noslash'"));
    }
}
