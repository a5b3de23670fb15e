// src/lib.rs
// =============================================================================
// Fetch a line range of a file hosted on GitHub and render it
// syntax-highlighted.
//
// Modules:
// - snippet: SnippetRequest and the SnippetLoader (fetch, decode, slice)
// - github: contents API client and blob link parsing
// - render: highlighter, output formats, page layout with consent banner
// - scan: finds and checks snippet usages in a docs tree
// - config: defaults, TOML file, environment overrides
// =============================================================================

pub mod config;
pub mod github;
pub mod render;
pub mod scan;
pub mod snippet;

use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("github_snippet=debug,info")
        } else {
            EnvFilter::new("github_snippet=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
