// src/snippet/mod.rs
// =============================================================================
// Snippet requests and the loader that resolves them.
//
// - request: SnippetRequest, LineRange and the contents API URL
// - lines: selecting a 1-based, inclusive line range
// - loader: fetch, decode, slice and hand off to the highlighter
// =============================================================================

mod lines;
mod loader;
mod request;

pub use lines::select_lines;
pub use loader::{load_snippet, LoadState, SnippetLoader};
pub use request::{LineRange, SnippetRequest, DEFAULT_BRANCH};
