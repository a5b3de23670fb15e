// src/scan/check.rs
// =============================================================================
// Resolves every snippet found in the docs and reports which ones load.
//
// Each snippet is one contents API call, run through the same load path as
// the loader (fetch, decode, slice). Calls run concurrently, a few at a time:
// the API is rate limited for unauthenticated clients and there is no retry.
// =============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use url::Url;

use crate::github::ContentSource;
use crate::snippet::{load_snippet, SnippetRequest};

/// How many contents API calls may be in flight at once.
const MAX_IN_FLIGHT: usize = 8;

/// A snippet usage and the document it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetUsage {
    pub file: PathBuf,
    pub request: SnippetRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SnippetStatus {
    /// Loaded; `lines` is the number of lines that would be displayed.
    Ok { lines: usize },
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetCheckResult {
    pub file: String,
    pub url: String,
    #[serde(flatten)]
    pub status: SnippetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SnippetCheckResult {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, SnippetStatus::Ok { .. })
    }
}

// Loads every usage, at most MAX_IN_FLIGHT at a time.
//
// Parameters:
//   source: contents API (shared by the concurrent loads)
//   api_base: root of the contents API
//   usages: snippets found by the docs scanner
//
// Returns: one result per usage, in input order. Failures become
// SnippetStatus::Failed with the error message; nothing is retried.
pub async fn check_snippets<S>(
    source: Arc<S>,
    api_base: &Url,
    usages: Vec<SnippetUsage>,
) -> Vec<SnippetCheckResult>
where
    S: ContentSource + ?Sized,
{
    let checks = usages.into_iter().map(|usage| {
        let source = Arc::clone(&source);
        async move { check_single_snippet(source.as_ref(), api_base, usage).await }
    });

    stream::iter(checks).buffered(MAX_IN_FLIGHT).collect().await
}

async fn check_single_snippet<S>(
    source: &S,
    api_base: &Url,
    usage: SnippetUsage,
) -> SnippetCheckResult
where
    S: ContentSource + ?Sized,
{
    let url = usage.request.contents_url(api_base).to_string();
    let file = usage.file.display().to_string();

    match load_snippet(source, api_base, &usage.request).await {
        Ok(text) => SnippetCheckResult {
            file,
            url,
            status: SnippetStatus::Ok {
                lines: text.split('\n').count(),
            },
            message: None,
        },
        Err(error) => {
            tracing::warn!(%error, %url, file = %file, "snippet failed to load");
            SnippetCheckResult {
                file,
                url,
                status: SnippetStatus::Failed,
                message: Some(error.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Contents, FetchError};
    use crate::snippet::LineRange;
    use async_trait::async_trait;

    struct OneFile;

    #[async_trait]
    impl ContentSource for OneFile {
        async fn fetch(&self, url: &Url) -> Result<Contents, FetchError> {
            if url.path().ends_with("/contents/src/a.rs") {
                Ok(Contents::from_text("1\n2\n3\n4\n5"))
            } else {
                Err(FetchError::Status { status: 404 })
            }
        }
    }

    fn usage(path: &str, lines: LineRange) -> SnippetUsage {
        SnippetUsage {
            file: PathBuf::from("docs/intro.md"),
            request: SnippetRequest::new("acme", "lib", path, "rust").with_lines(lines),
        }
    }

    #[tokio::test]
    async fn test_check_snippets_reports_each_usage() {
        let api_base = Url::parse("https://api.github.com").unwrap();
        let usages = vec![
            usage("src/a.rs", LineRange::new(2, Some(3))),
            usage("src/missing.rs", LineRange::full()),
            usage("src/a.rs", LineRange::full()),
        ];

        let results = check_snippets(Arc::new(OneFile), &api_base, usages).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].status, SnippetStatus::Ok { lines: 2 });
        assert!(!results[1].is_ok());
        assert_eq!(results[1].message.as_deref(), Some("HTTP 404"));
        assert_eq!(
            results[1].url,
            "https://api.github.com/repos/acme/lib/contents/src/missing.rs?ref=master"
        );
        assert_eq!(results[2].status, SnippetStatus::Ok { lines: 5 });
    }

    #[test]
    fn test_result_json_shape() {
        let result = SnippetCheckResult {
            file: "docs/intro.md".to_string(),
            url: "https://api.github.com/x".to_string(),
            status: SnippetStatus::Ok { lines: 3 },
            message: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["lines"], 3);
        assert!(json.get("message").is_none());
    }
}
