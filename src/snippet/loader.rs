// src/snippet/loader.rs
// =============================================================================
// The Snippet Loader: keeps one SnippetRequest and the text loaded for it.
//
// How it works:
// 1. set_request() compares the new request with the current one
// 2. If only the language changed, nothing is fetched; render() restyles
// 3. Otherwise the display slot is cleared, the generation is bumped and a
//    tokio task fetches, decodes and slices the file
// 4. The task writes the slot only if its generation is still the latest,
//    so a slow response for an old request never overwrites a newer one
//
// Failures never leave this module: they are logged once, with the URL, and
// the slot stays empty.
// =============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use url::Url;

use crate::github::{decode_contents, ContentSource, FetchError};
use crate::render::{HighlightResult, Highlighter};

use super::lines::select_lines;
use super::request::SnippetRequest;

// Fetches, decodes and slices one snippet. Shared by the loader and the docs
// scanner.
//
// Parameters:
//   source: where the contents API response comes from
//   api_base: root of the contents API, e.g. https://api.github.com
//   request: which file, branch and line range
//
// Returns: the selected lines joined with '\n', or the first FetchError hit
// while fetching or decoding.
pub async fn load_snippet<S>(
    source: &S,
    api_base: &Url,
    request: &SnippetRequest,
) -> Result<String, FetchError>
where
    S: ContentSource + ?Sized,
{
    let url = request.contents_url(api_base);
    let contents = source.fetch(&url).await?;
    let text = decode_contents(&contents)?;
    Ok(select_lines(&text, request.lines()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded: initial state, fetch in flight, or fetch failed.
    Empty,
    Loaded,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    text: Option<String>,
}

pub struct SnippetLoader<S> {
    source: Arc<S>,
    api_base: Url,
    highlighter: Highlighter,
    request: Option<SnippetRequest>,
    slot: Arc<Mutex<Slot>>,
}

impl<S> std::fmt::Debug for SnippetLoader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("SnippetLoader")
            .field("api_base", &self.api_base.as_str())
            .field("request", &self.request)
            .field("generation", &slot.generation)
            .field("loaded", &slot.text.is_some())
            .finish()
    }
}

impl<S> SnippetLoader<S>
where
    S: ContentSource + 'static,
{
    pub fn new(source: S, api_base: Url, highlighter: Highlighter) -> Self {
        Self {
            source: Arc::new(source),
            api_base,
            highlighter,
            request: None,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn request(&self) -> Option<&SnippetRequest> {
        self.request.as_ref()
    }

    /// Generation of the latest fetch; 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    pub fn state(&self) -> LoadState {
        if self.slot.lock().text.is_some() {
            LoadState::Loaded
        } else {
            LoadState::Empty
        }
    }

    /// The display text, empty while nothing is loaded.
    pub fn text(&self) -> String {
        self.slot.lock().text.clone().unwrap_or_default()
    }

    // Points the loader at `request`.
    //
    // Parameters:
    //   request: the snippet to show next
    //
    // Returns: the spawned fetch task when a fetch was needed, None when the
    // change was language-only (or no change at all). Awaiting the handle is
    // optional; the task never returns an error.
    //
    // Outside a tokio runtime the fetch cannot be spawned: that is logged like
    // a failed fetch and the loader stays empty.
    pub fn set_request(&mut self, request: SnippetRequest) -> Option<JoinHandle<()>> {
        let refetch = self
            .request
            .as_ref()
            .map_or(true, |current| current.needs_refetch(&request));

        if !refetch {
            if self.request.as_ref().map(SnippetRequest::language) != Some(request.language()) {
                tracing::debug!(language = request.language(), "language changed, restyling");
            }
            self.request = Some(request);
            return None;
        }

        let generation = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.text = None;
            slot.generation
        };
        self.request = Some(request.clone());

        let url = request.contents_url(&self.api_base);
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(error) => {
                tracing::error!(%error, %url, "no tokio runtime, snippet not fetched");
                return None;
            }
        };

        let source = Arc::clone(&self.source);
        let slot = Arc::clone(&self.slot);
        let api_base = self.api_base.clone();

        Some(runtime.spawn(async move {
            match load_snippet(source.as_ref(), &api_base, &request).await {
                Ok(text) => {
                    let mut slot = slot.lock();
                    if slot.generation == generation {
                        tracing::debug!(%url, generation, lines = text.split('\n').count(), "snippet loaded");
                        slot.text = Some(text);
                    } else {
                        tracing::debug!(
                            %url,
                            generation,
                            latest = slot.generation,
                            "discarding stale snippet response"
                        );
                    }
                }
                Err(error) => {
                    tracing::error!(%error, %url, "Failed to fetch GitHub code");
                }
            }
        }))
    }

    /// Highlights the loaded text with the current request's language.
    ///
    /// `None` while the loader is empty.
    pub fn render(&self) -> Option<HighlightResult> {
        let request = self.request.as_ref()?;
        let text = self.slot.lock().text.clone()?;
        Some(self.highlighter.highlight(&text, request.language()))
    }
}
