// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
//   github-snippet show <owner> <repo> <path> [--branch] [--start-line] ...
//   github-snippet url <github blob link> [--language] ...
//   github-snippet scan <docs dir> [--json]
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use github_snippet::render::OutputFormat;
use github_snippet::snippet::DEFAULT_BRANCH;

#[derive(Parser, Debug)]
#[command(
    name = "github-snippet",
    version,
    about = "Show a syntax-highlighted line range of a file hosted on GitHub",
    long_about = "github-snippet fetches a file through the GitHub contents API, keeps the \
                  requested lines and prints them highlighted. It can also scan a docs tree \
                  for <GithubCode /> usages and check that every one of them still loads."
)]
pub struct Cli {
    /// TOML configuration file (api_base, user_agent, token, timeout_secs, theme)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a line range of a file
    ///
    /// Example: github-snippet show noir-lang noir Cargo.toml --language toml --end-line 10
    Show {
        /// Repository owner (user or organisation)
        owner: String,

        /// Repository name
        repo: String,

        /// Path of the file inside the repository
        file_path: String,

        /// Branch, tag or commit to read from
        #[arg(long, default_value = DEFAULT_BRANCH)]
        branch: String,

        /// First line to show (1-based)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        start_line: u64,

        /// Last line to show (inclusive); defaults to the end of the file
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        end_line: Option<u64>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Show a file from a GitHub link, e.g. https://github.com/o/r/blob/main/src/a.rs#L3-L5
    Url {
        /// github.com blob link, optionally with a #L<start>-L<end> anchor
        link: String,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Find <GithubCode /> usages in Markdown/MDX docs and check that each loads
    ///
    /// Exit status is 1 when any snippet fails to load.
    Scan {
        /// Docs directory to scan
        docs_dir: PathBuf,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct DisplayArgs {
    /// Language to highlight as (grammar name or file extension)
    #[arg(long, default_value = "")]
    pub language: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Ansi)]
    pub format: OutputFormat,

    /// Wrap HTML output in a standalone page (implies --format html)
    #[arg(long)]
    pub page: bool,
}
