// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a seed URL
// - Same-host restriction (doesn't crawl external sites)
// - Configurable depth limit
// - Every page fetched at most once per crawl
// - Two ways to get results: all at once (batch) or one by one (stream)
//
// Submodules:
// - scope: which links we may follow
// - fetch: downloading pages with a timeout
// - traversal: the walk itself, plus the batch and stream entry points
// =============================================================================

mod fetch;
mod scope;
mod traversal;

pub use fetch::PageFetcher;
pub use traversal::{crawl_batch, crawl_stream, CrawlEvent, CrawlRequest, Crawler};
