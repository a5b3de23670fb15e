// src/github/mod.rs
// =============================================================================
// Everything that talks to or about GitHub:
// - fetch: the contents API client and the base64 decode
// - blob: parsing github.com/<owner>/<repo>/blob/... links
// =============================================================================

mod blob;
mod fetch;

pub use blob::parse_blob_url;
pub use fetch::{decode_contents, ContentSource, Contents, FetchError, GitHubClient};
