// src/snippet/request.rs
// =============================================================================
// The identifying parameters of a remote line-range code display.
//
// A SnippetRequest names exactly one file on GitHub (owner, repo, branch,
// path) plus the lines of it to show and the language to highlight them as.
// Only the first group decides what gets fetched; `language` is styling.
// =============================================================================

use url::Url;

/// Branch used when a request does not name one.
pub const DEFAULT_BRANCH: &str = "master";

/// Inclusive, 1-based line range. `end: None` means "to the end of the file".
///
/// `start <= end` is assumed, not validated. An inverted range simply selects
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl LineRange {
    pub const fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// The whole file.
    pub const fn full() -> Self {
        Self::new(1, None)
    }

    pub const fn is_full(&self) -> bool {
        self.start <= 1 && self.end.is_none()
    }
}

impl Default for LineRange {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetRequest {
    owner: String,
    repository: String,
    branch: String,
    file_path: String,
    language: String,
    lines: LineRange,
}

impl SnippetRequest {
    /// Creates a request for the whole file on the default branch.
    ///
    /// A leading `/` on `file_path` is dropped so `"/src/a.rs"` and
    /// `"src/a.rs"` name the same file.
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        file_path: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        let file_path: String = file_path.into();
        Self {
            owner: owner.into(),
            repository: repository.into(),
            branch: DEFAULT_BRANCH.to_string(),
            file_path: file_path.trim_start_matches('/').to_string(),
            language: language.into(),
            lines: LineRange::full(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_lines(mut self, lines: LineRange) -> Self {
        self.lines = lines;
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn lines(&self) -> LineRange {
        self.lines
    }

    /// True when switching from `self` to `other` needs a new network call.
    pub fn needs_refetch(&self, other: &SnippetRequest) -> bool {
        self.owner != other.owner
            || self.repository != other.repository
            || self.branch != other.branch
            || self.file_path != other.file_path
            || self.lines != other.lines
    }

    /// Builds `{api_base}/repos/{owner}/{repo}/contents/{path}?ref={branch}`.
    ///
    /// Each path component is pushed as its own segment so reserved
    /// characters in file names get percent-encoded.
    pub fn contents_url(&self, api_base: &Url) -> Url {
        let mut url = api_base.clone();
        // cannot-be-a-base URLs (mailto: and friends) never reach here: the
        // config layer only accepts http(s) bases
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repository.as_str(), "contents"])
                .extend(self.file_path.split('/').filter(|part| !part.is_empty()));
        }
        url.query_pairs_mut().clear().append_pair("ref", &self.branch);
        url
    }
}
