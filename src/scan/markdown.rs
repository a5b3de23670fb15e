// src/scan/markdown.rs
// =============================================================================
// Finds <GithubCode .../> usages in Markdown and MDX documents.
//
// pulldown-cmark splits the document into events; JSX components show up as
// raw HTML events (both block and inline). Those are gathered and handed to
// scraper, which parses the attributes. Anything inside code fences arrives as
// text and is ignored, so documentation *about* the component is not picked up.
//
// HTML parsing lowercases names, so the component is matched as `githubcode`
// and `filePath` / `startLine` / `endLine` as `filepath` / `startline` /
// `endline`. JSX expression values like `startLine={3}` arrive as "{3}".
// Padded expressions (`{ 3 }`) and string expressions (`{"main"}`) are not
// valid raw HTML, so they are rewritten before the Markdown parser sees them.
// =============================================================================

use std::borrow::Cow;
use std::sync::OnceLock;

use pulldown_cmark::{Event, Parser};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::snippet::{LineRange, SnippetRequest};

const COMPONENT_TAG: &str = "githubcode";

/// Extracts every complete snippet usage from `markdown`, in document order.
///
/// Usages missing `owner`, `repo` or `filePath`, or with a line number that
/// does not parse, are skipped with a warning.
pub fn extract_snippet_requests(markdown: &str) -> Vec<SnippetRequest> {
    let markdown = squeeze_jsx_braces(markdown);
    let mut raw_html = String::new();
    for event in Parser::new(&markdown) {
        if let Event::Html(html) = event {
            raw_html.push_str(&html);
        }
    }

    if raw_html.is_empty() {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(&raw_html);
    let selector = Selector::parse(COMPONENT_TAG).expect("component selector is valid");

    fragment
        .select(&selector)
        .filter_map(|element| match request_from_element(element) {
            Ok(request) => Some(request),
            Err(reason) => {
                tracing::warn!(tag = %element.html(), reason, "skipping snippet usage");
                None
            }
        })
        .collect()
}

fn request_from_element(element: ElementRef<'_>) -> Result<SnippetRequest, &'static str> {
    let attr = |name: &str| element.value().attr(name).map(clean_value);

    let owner = attr("owner").filter(|v| !v.is_empty()).ok_or("missing owner")?;
    let repo = attr("repo").filter(|v| !v.is_empty()).ok_or("missing repo")?;
    let file_path = attr("filepath")
        .filter(|v| !v.is_empty())
        .ok_or("missing filePath")?;
    let language = attr("language").unwrap_or_default();

    let start: usize = match attr("startline") {
        Some(v) => v.parse().map_err(|_| "startLine is not a number")?,
        None => 1,
    };
    let end: Option<usize> = match attr("endline") {
        Some(v) => Some(v.parse().map_err(|_| "endLine is not a number")?),
        None => None,
    };

    let mut request = SnippetRequest::new(owner, repo, file_path, language)
        .with_lines(LineRange::new(start, end));
    if let Some(branch) = attr("branch").filter(|v| !v.is_empty()) {
        request = request.with_branch(branch);
    }
    Ok(request)
}

// Rewrites JSX expressions into something CommonMark accepts as a raw HTML
// attribute value:
//   branch={ "main" }    -> branch="main"
//   startLine={ 3 }      -> startLine={3}
fn squeeze_jsx_braces(markdown: &str) -> Cow<'_, str> {
    static STRING_EXPR: OnceLock<Regex> = OnceLock::new();
    static PADDED_EXPR: OnceLock<Regex> = OnceLock::new();
    let string_expr = STRING_EXPR.get_or_init(|| {
        Regex::new(r#"=\{\s*["'`]([^"'`{}]*)["'`]\s*\}"#).expect("string pattern is valid")
    });
    let padded_expr = PADDED_EXPR
        .get_or_init(|| Regex::new(r"\{\s*([^{}]*?)\s*\}").expect("brace pattern is valid"));

    match string_expr.replace_all(markdown, "=\"$1\"") {
        Cow::Borrowed(_) => padded_expr.replace_all(markdown, "{$1}"),
        Cow::Owned(quoted) => Cow::Owned(padded_expr.replace_all(&quoted, "{$1}").into_owned()),
    }
}

// Strips JSX expression braces, quotes inside them, and the '/' that an
// unquoted value swallows from a trailing "/>".
fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_end_matches('/')
        .trim_matches(|c: char| c == '{' || c == '}')
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_block_usage() {
        let markdown = r#"
# Example

import GithubCode from '@site/src/components/GithubCode';

<GithubCode owner="acme" repo="lib" branch="main" filePath="src/a.rs" language="rust" startLine={3} endLine={5} />

Some text after.
"#;
        let requests = extract_snippet_requests(markdown);
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.owner(), "acme");
        assert_eq!(request.repository(), "lib");
        assert_eq!(request.branch(), "main");
        assert_eq!(request.file_path(), "src/a.rs");
        assert_eq!(request.language(), "rust");
        assert_eq!(request.lines(), LineRange::new(3, Some(5)));
    }

    #[test]
    fn test_defaults_when_attributes_missing() {
        let markdown = "<GithubCode owner=\"acme\" repo=\"lib\" filePath=\"README.md\" />\n";
        let requests = extract_snippet_requests(markdown);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].branch(), "master");
        assert_eq!(requests[0].language(), "");
        assert_eq!(requests[0].lines(), LineRange::full());
    }

    #[test]
    fn test_unquoted_value_before_self_close() {
        let markdown =
            "<GithubCode owner=\"acme\" repo=\"lib\" filePath=\"a.rs\" endLine={4}/>\n";
        let requests = extract_snippet_requests(markdown);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].lines(), LineRange::new(1, Some(4)));
    }

    #[test]
    fn test_multiple_usages_in_order() {
        let markdown = r#"
<GithubCode owner="acme" repo="lib" filePath="a.rs" language="rust" />

Between.

<GithubCode owner="acme" repo="lib" filePath="b.rs" language="rust" />
"#;
        let paths: Vec<String> = extract_snippet_requests(markdown)
            .iter()
            .map(|r| r.file_path().to_string())
            .collect();
        assert_eq!(paths, vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_skip_code_fences() {
        let markdown = r#"
```jsx
<GithubCode owner="acme" repo="lib" filePath="a.rs" />
```
"#;
        assert!(extract_snippet_requests(markdown).is_empty());
    }

    #[test]
    fn test_skip_incomplete_usage() {
        let markdown = "<GithubCode owner=\"acme\" filePath=\"a.rs\" />\n";
        assert!(extract_snippet_requests(markdown).is_empty());
    }

    #[test]
    fn test_spaced_jsx_braces() {
        let markdown = "<GithubCode owner=\"acme\" repo=\"lib\" filePath=\"src/a.rs\" startLine={ 3 } endLine={ 5 } />\n";
        let requests = extract_snippet_requests(markdown);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].lines(), LineRange::new(3, Some(5)));
    }

    #[test]
    fn test_spaced_jsx_string_expression() {
        let markdown =
            "<GithubCode owner=\"acme\" repo=\"lib\" filePath=\"a.rs\" branch={ \"main\" } />\n";
        let requests = extract_snippet_requests(markdown);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].branch(), "main");
    }

    #[test]
    fn test_squeeze_jsx_braces() {
        assert_eq!(squeeze_jsx_braces("a={ 3 } b={4}"), "a={3} b={4}");
        assert_eq!(squeeze_jsx_braces("branch={ 'dev' }"), "branch=\"dev\"");
        assert_eq!(squeeze_jsx_braces("c={\n  5\n}"), "c={5}");
    }

    #[test]
    fn test_clean_value() {
        assert_eq!(clean_value("{3}"), "3");
        assert_eq!(clean_value("{5}/"), "5");
        assert_eq!(clean_value("{\"main\"}"), "main");
        assert_eq!(clean_value("rust"), "rust");
    }
}
