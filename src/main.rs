// src/main.rs
// =============================================================================
// This is the entry point of our application.
//
// What happens here:
// 1. Load configuration from the environment
// 2. Parse command-line arguments using clap
// 3. Either start the HTTP API (serve) or crawl one site (scan)
// 4. Exit with proper code (0 = all images OK, 1 = some need fixing, 2 = error)
// =============================================================================

mod checker;       // src/checker/ - alt text rules and HTML extraction
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - environment configuration
mod crawl;         // src/crawl/ - fetching and walking the site
mod error;         // src/error.rs - error types
mod logging;       // src/logging.rs - tracing setup
mod server;        // src/server/ - HTTP API

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;

use checker::{AltStatus, ImageFinding};
use cli::{Cli, Commands};
use config::Config;
use crawl::{crawl_stream, CrawlEvent, CrawlRequest, Crawler, PageFetcher};

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
    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, port } => handle_serve(config, bind, port).await,
        Commands::Scan { website_url, max_depth, json, stream } => {
            // Logs go to stderr so stdout stays clean for --json
            logging::init_cli_logger(&config.log_level);
            let max_depth = max_depth.unwrap_or(config.max_depth);
            let fetcher = PageFetcher::new(config.fetch_timeout())?;

            if stream {
                handle_stream_scan(fetcher, &website_url, max_depth, json).await
            } else {
                handle_scan(fetcher, &website_url, max_depth, json).await
            }
        }
    }
}

// Handles the 'serve' subcommand
async fn handle_serve(config: Config, bind: Option<String>, port: Option<u16>) -> Result<i32> {
    logging::init_server_logger(&config.log_dir, &config.log_level)
        .with_context(|| format!("could not open log file in {}", config.log_dir.display()))?;

    // Flags win over the environment
    let bind = bind.unwrap_or(config.bind_address.clone());
    let port = port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", bind, port))?;

    let state = server::AppState {
        fetcher: PageFetcher::new(config.fetch_timeout())?,
        max_depth: config.max_depth,
    };

    server::start_server(addr, state).await?;
    Ok(0)
}

// Handles the 'scan' subcommand: crawl everything, then print
async fn handle_scan(
    fetcher: PageFetcher,
    website_url: &str,
    max_depth: usize,
    json: bool,
) -> Result<i32> {
    // Validate before printing anything
    let request = CrawlRequest::new(website_url, max_depth)?;

    if !json {
        println!("🔍 Scanning website: {}", request.seed());
        println!("📊 Max crawl depth: {}", request.max_depth());
    }

    let mut crawler = Crawler::new(request, fetcher);
    let findings = crawler.collect_findings().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        println!(
            "📄 Crawled {} page(s), skipped {} external link(s)\n",
            crawler.visited().len(),
            crawler.external_links().len()
        );
        print_table(&findings);
    }

    Ok(exit_code(&findings))
}

// Handles 'scan --stream': print each image the moment it's checked
//
// With --json every finding is one JSON object per line.
async fn handle_stream_scan(
    fetcher: PageFetcher,
    website_url: &str,
    max_depth: usize,
    json: bool,
) -> Result<i32> {
    let mut events = Box::pin(crawl_stream(fetcher, website_url, max_depth)?);
    let mut findings = Vec::new();

    // Keep every finding so the summary and exit code can be worked out
    while let Some(event) = events.next().await {
        match event {
            CrawlEvent::Finding(finding) => {
                if json {
                    println!("{}", serde_json::to_string(&finding)?);
                } else {
                    print_row(&finding);
                }
                findings.push(finding);
            }
            CrawlEvent::Done => {
                if !json {
                    println!();
                    print_summary(&findings);
                }
            }
        }
    }

    Ok(exit_code(&findings))
}

// 0 when every image is fine, 1 when at least one needs fixing
fn exit_code(findings: &[ImageFinding]) -> i32 {
    if findings.iter().any(ImageFinding::needs_fix) {
        1
    } else {
        0
    }
}

fn print_table(findings: &[ImageFinding]) {
    println!("{:<50} {:<12} {:<30} {}", "IMAGE", "STATUS", "ALT TEXT", "SUGGESTION");
    println!("{}", "=".repeat(120));

    for finding in findings {
        print_row(finding);
    }

    println!();
    print_summary(findings);
}

fn print_row(finding: &ImageFinding) {
    let status = match finding.status {
        AltStatus::Ok => "✅ OK",
        AltStatus::NeedsFix => "❌ NEEDS FIX",
    };
    println!(
        "{:<50} {:<12} {:<30} {}",
        truncate(&finding.image_url, 47),
        status,
        truncate(&finding.alt_text, 27),
        finding.suggestion
    );
}

fn print_summary(findings: &[ImageFinding]) {
    let needs_fix = findings.iter().filter(|f| f.needs_fix()).count();

    println!("📊 Summary:");
    println!("   ✅ OK: {}", findings.len() - needs_fix);
    println!("   ❌ Needs fix: {}", needs_fix);
    println!("   📋 Total images: {}", findings.len());
}

// Shortens long text for the table, on a char boundary
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
