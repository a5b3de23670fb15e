// src/scan/mod.rs
// =============================================================================
// Scans a documentation tree for snippet usages and checks that they load.
//
// - markdown: pulls <GithubCode .../> usages out of one document
// - check: resolves usages against the contents API and reports results
//
// The walk honours .gitignore (node_modules, build output) and only reads
// .md / .mdx files.
// =============================================================================

mod check;
mod markdown;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ignore::WalkBuilder;

pub use check::{check_snippets, SnippetCheckResult, SnippetStatus, SnippetUsage};
pub use markdown::extract_snippet_requests;

const DOC_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Collects every snippet usage under `root`, ordered by file path and then
/// by position in the file.
pub fn find_snippet_usages(root: &Path) -> Result<Vec<SnippetUsage>> {
    if !root.exists() {
        anyhow::bail!("docs directory {} does not exist", root.display());
    }

    let mut files = Vec::new();
    for entry in WalkBuilder::new(root).build() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        let is_doc = entry.file_type().is_some_and(|ft| ft.is_file())
            && entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| DOC_EXTENSIONS.contains(&ext));
        if is_doc {
            files.push(entry.into_path());
        }
    }
    files.sort();

    let mut usages = Vec::new();
    for file in files {
        let markdown = fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let requests = extract_snippet_requests(&markdown);
        tracing::debug!(file = %file.display(), count = requests.len(), "scanned document");
        usages.extend(requests.into_iter().map(|request| SnippetUsage {
            file: file.clone(),
            request,
        }));
    }

    Ok(usages)
}
