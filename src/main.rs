// src/main.rs
// =============================================================================
// Entry point of the github-snippet CLI.
//
// What happens here:
// 1. Parse command-line arguments and load the configuration
// 2. Dispatch to the subcommand handler
// 3. Print the rendered snippet or the scan report
// 4. Exit with 0 (success), 1 (snippet empty / snippets failed) or 2 (error)
// =============================================================================

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use github_snippet::config::Config;
use github_snippet::github::{parse_blob_url, GitHubClient};
use github_snippet::render::{self, Highlighter, Layout, OutputFormat};
use github_snippet::scan::{self, SnippetCheckResult, SnippetStatus};
use github_snippet::snippet::{LineRange, SnippetLoader, SnippetRequest};

use cli::{Cli, Commands, DisplayArgs};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    github_snippet::init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Show {
            owner,
            repo,
            file_path,
            branch,
            start_line,
            end_line,
            display,
        } => {
            let lines = LineRange::new(to_line(start_line)?, end_line.map(to_line).transpose()?);
            let request = SnippetRequest::new(owner, repo, file_path, display.language.clone())
                .with_branch(branch)
                .with_lines(lines);
            handle_show(&config, request, &display).await
        }
        Commands::Url { link, display } => {
            let request = parse_blob_url(&link, &display.language)?;
            handle_show(&config, request, &display).await
        }
        Commands::Scan { docs_dir, json } => handle_scan(&config, &docs_dir, json).await,
    }
}

fn to_line(n: u64) -> Result<usize> {
    Ok(usize::try_from(n)?)
}

// Loads one snippet through the loader and prints it.
//
// A failed fetch has already been logged by the loader; here it only shows
// up as an empty view and exit status 1.
async fn handle_show(config: &Config, request: SnippetRequest, display: &DisplayArgs) -> Result<i32> {
    let client = GitHubClient::new(config)?;
    let highlighter = Highlighter::new(&config.theme);
    let title = request.file_path().to_string();

    let mut loader = SnippetLoader::new(client, config.api_base_url()?, highlighter);
    if let Some(fetch) = loader.set_request(request) {
        fetch.await?;
    }

    let Some(result) = loader.render() else {
        return Ok(1);
    };

    let format = if display.page {
        OutputFormat::Html
    } else {
        display.format
    };
    let mut output = render::render(&result, format)?;
    if display.page {
        output = Layout::new(title).compose(&output);
    }

    println!("{}", output);
    Ok(0)
}

async fn handle_scan(config: &Config, docs_dir: &std::path::Path, json: bool) -> Result<i32> {
    let usages = scan::find_snippet_usages(docs_dir)?;

    if usages.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("No snippet usages found in {}", docs_dir.display());
        }
        return Ok(0);
    }

    if !json {
        println!("Checking {} snippet(s) in {}\n", usages.len(), docs_dir.display());
    }

    let client = Arc::new(GitHubClient::new(config)?);
    let results = scan::check_snippets(client, &config.api_base_url()?, usages).await;

    print_results(&results, json)?;

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    Ok(if failed > 0 { 1 } else { 0 })
}

fn print_results(results: &[SnippetCheckResult], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_table(results);
    }
    Ok(())
}

fn print_table(results: &[SnippetCheckResult]) {
    println!("{:<30} {:<60} {:<10} {}", "FILE", "URL", "STATUS", "MESSAGE");
    println!("{}", "=".repeat(110));

    for result in results {
        let status = match result.status {
            SnippetStatus::Ok { lines } => format!("OK ({lines})"),
            SnippetStatus::Failed => "FAILED".to_string(),
        };
        println!(
            "{:<30} {:<60} {:<10} {}",
            truncate(&result.file, 30),
            truncate(&result.url, 60),
            status,
            result.message.as_deref().unwrap_or("")
        );
    }

    let ok_count = results.iter().filter(|r| r.is_ok()).count();
    println!();
    println!("Summary:");
    println!("   OK:     {}", ok_count);
    println!("   Failed: {}", results.len() - ok_count);
    println!("   Total:  {}", results.len());
}

// Keeps the tail of long values, which is the part that tells rows apart.
fn truncate(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        return value.to_string();
    }
    let tail: String = value.chars().skip(count - (width - 3)).collect();
    format!("...{tail}")
}
