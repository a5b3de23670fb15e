// src/github/blob.rs
// =============================================================================
// Turns a GitHub "blob" link into a SnippetRequest.
//
// Supported formats:
//   - https://github.com/owner/repo/blob/branch/path/to/file.rs
//   - https://github.com/owner/repo/blob/branch/path/to/file.rs#L3
//   - https://github.com/owner/repo/blob/branch/path/to/file.rs#L3-L5
//   - https://github.com/owner/repo/blob/branch/path/to/file.rs#L3C5-L5C10
//     (column anchors are dropped; snippets are whole lines)
//   - github.com/owner/repo.git/blob/... (scheme and .git are optional)
//
// A branch containing '/' cannot be told apart from the path in a blob link;
// the first segment after `blob` is always taken as the branch.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use percent_encoding::percent_decode_str;
use url::Url;

use crate::snippet::{LineRange, SnippetRequest};

// Parses a blob link into a request.
//
// Parameters:
//   link: the GitHub URL, with or without scheme
//   language: highlighter language; blob links do not carry one
//
// Returns: a SnippetRequest with the link's owner, repo, branch and path, and
// the fragment's line range (the whole file when there is none).
pub fn parse_blob_url(link: &str, language: &str) -> Result<SnippetRequest> {
    let with_scheme = if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{link}")
    };
    let url = Url::parse(&with_scheme).with_context(|| format!("invalid URL '{link}'"))?;

    match url.host_str() {
        Some("github.com") | Some("www.github.com") => {}
        _ => return Err(anyhow!("Not a GitHub URL: {}", link)),
    }

    let parts: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    // owner / repo / "blob" / branch / path...
    if parts.len() < 5 || parts[2] != "blob" {
        return Err(anyhow!(
            "Expected https://github.com/<owner>/<repo>/blob/<branch>/<path>, got {}",
            link
        ));
    }

    let owner = parts[0];
    let repo = parts[1].trim_end_matches(".git");
    let branch = parts[3];
    let path = parts[4..].join("/");
    // Url keeps segments percent-encoded and the contents URL builder encodes
    // again, so decode here to avoid "%2520"
    let path = percent_decode_str(&path).decode_utf8_lossy().into_owned();

    let lines = match url.fragment() {
        Some(fragment) if !fragment.is_empty() => parse_line_fragment(fragment)
            .with_context(|| format!("invalid line anchor '#{fragment}'"))?,
        _ => LineRange::full(),
    };

    Ok(SnippetRequest::new(owner, repo, path, language)
        .with_branch(branch)
        .with_lines(lines))
}

// Parses "L3" or "L3-L5" (GitHub's own anchors). "L3-5" is accepted too.
fn parse_line_fragment(fragment: &str) -> Result<LineRange> {
    let (start, end) = match fragment.split_once('-') {
        Some((start, end)) => (start, Some(end)),
        None => (fragment, None),
    };

    let start = parse_line_number(start)?;
    match end {
        // a single-line anchor highlights exactly that line
        None => Ok(LineRange::new(start, Some(start))),
        Some(end) => Ok(LineRange::new(start, Some(parse_line_number(end)?))),
    }
}

fn parse_line_number(part: &str) -> Result<usize> {
    let line = part.strip_prefix('L').unwrap_or(part);
    // "L3C5": the column after 'C' is ignored
    let digits = line.split_once('C').map_or(line, |(line, _)| line);
    let n: usize = digits.parse()?;
    if n == 0 {
        return Err(anyhow!("line numbers start at 1"));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blob_url() {
        let request =
            parse_blob_url("https://github.com/noir-lang/noir/blob/master/Cargo.toml", "toml")
                .unwrap();
        assert_eq!(request.owner(), "noir-lang");
        assert_eq!(request.repository(), "noir");
        assert_eq!(request.branch(), "master");
        assert_eq!(request.file_path(), "Cargo.toml");
        assert_eq!(request.language(), "toml");
        assert_eq!(request.lines(), LineRange::full());
    }

    #[test]
    fn test_parse_blob_url_with_range() {
        let request =
            parse_blob_url("github.com/acme/lib.git/blob/main/src/a.rs#L3-L5", "rust").unwrap();
        assert_eq!(request.repository(), "lib");
        assert_eq!(request.branch(), "main");
        assert_eq!(request.file_path(), "src/a.rs");
        assert_eq!(request.lines(), LineRange::new(3, Some(5)));
    }

    #[test]
    fn test_parse_blob_url_single_line() {
        let request =
            parse_blob_url("https://github.com/acme/lib/blob/main/src/a.rs#L7", "rust").unwrap();
        assert_eq!(request.lines(), LineRange::new(7, Some(7)));
    }

    #[test]
    fn test_parse_blob_url_column_anchors() {
        let request =
            parse_blob_url("https://github.com/acme/lib/blob/main/src/a.rs#L3C5-L5C10", "rust")
                .unwrap();
        assert_eq!(request.lines(), LineRange::new(3, Some(5)));

        let request =
            parse_blob_url("https://github.com/acme/lib/blob/main/src/a.rs#L8C2", "rust").unwrap();
        assert_eq!(request.lines(), LineRange::new(8, Some(8)));
    }

    #[test]
    fn test_parse_blob_url_decodes_path() {
        let request =
            parse_blob_url("https://github.com/acme/lib/blob/main/my%20dir/a.rs", "rust").unwrap();
        assert_eq!(request.file_path(), "my dir/a.rs");
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(parse_blob_url("https://gitlab.com/user/repo/blob/main/a.rs", "rust").is_err());
        assert!(parse_blob_url("https://github.com/user/repo", "rust").is_err());
        assert!(parse_blob_url("https://github.com/user/repo/tree/main/src", "rust").is_err());
        assert!(parse_blob_url("https://github.com/a/b/blob/main/a.rs#L0", "rust").is_err());
        assert!(parse_blob_url("https://github.com/a/b/blob/main/a.rs#LC5", "rust").is_err());
    }
}
