// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - serve: run the HTTP API (for a frontend or other services)
// - scan:  crawl one site right now and print the results
//
// Anything not given on the command line comes from the environment (see
// config.rs), so flags here are Options that override the config.
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "alt-checker",
    version,
    about = "Crawl a website and check every image for missing or poor alt text",
    long_about = "alt-checker follows same-site links from a starting page, looks at every \
                  <img> it finds, and flags alt text that is missing, too short, or just \
                  repeats the filename. Run it once with `scan`, or start the HTTP API with `serve`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API (GET /check and GET /stream)
    ///
    /// Example: alt-checker serve --port 8000
    Serve {
        /// Address to bind (default: $ALT_CHECKER_BIND or 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (default: $ALT_CHECKER_PORT or 8000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Crawl a website and report on its images
    ///
    /// Example: alt-checker scan https://example.com --max-depth 1
    Scan {
        /// Website URL to scan (must start with http or https)
        website_url: String,

        /// Maximum number of link hops from the starting page
        ///
        /// 0 = only the starting page
        /// 1 = the starting page and the pages it links to
        /// (default: $ALT_CHECKER_MAX_DEPTH or 2)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Print each image as soon as it's checked instead of waiting
        /// for the whole crawl
        #[arg(long)]
        stream: bool,
    },
}
