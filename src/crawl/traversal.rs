// src/crawl/traversal.rs
// =============================================================================
// This module walks a website depth-first and produces image findings.
//
// How it works:
// 1. Start with the seed URL on a stack at depth 0
// 2. Pop a page; skip it if it's too deep or already visited
// 3. Mark it visited, then fetch it
// 4. Turn every <img> on the page into a finding
// 5. Push the page's same-site links (depth + 1) in reverse, so the first
//    link on the page is the next one visited
// 6. Repeat until the stack is empty
//
// Using an explicit stack instead of recursion lets the crawler stop after
// any page and hand its findings to the caller. That's what makes the
// streaming mode possible: the same walk drives both batch and stream.
//
// Each Crawler owns its visited set. Two crawls never share one, even when
// they run at the same time on the same server.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use futures::stream::{self, Stream};
use tracing::{debug, info};
use url::Url;

use super::fetch::PageFetcher;
use super::scope::OriginScope;
use crate::checker::{evaluate_image, extract_markup, ImageFinding};
use crate::error::CrawlError;

// What a crawl was asked to do
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    seed: Url,
    max_depth: usize,
    scope: OriginScope,
}

impl CrawlRequest {
    // Validates the seed URL
    //
    // Only absolute http/https URLs with a host are accepted. Nothing is
    // fetched if this fails.
    pub fn new(seed: &str, max_depth: usize) -> Result<Self, CrawlError> {
        let seed = Url::parse(seed)
            .map_err(|e| CrawlError::InvalidInput(format!("'{}': {}", seed, e)))?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(CrawlError::InvalidInput(format!(
                "'{}': URL must start with http or https",
                seed
            )));
        }
        let scope = OriginScope::from_seed(&seed)
            .ok_or_else(|| CrawlError::InvalidInput(format!("'{}': URL has no host", seed)))?;

        Ok(Self {
            seed,
            max_depth,
            scope,
        })
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

// A page waiting on the stack
#[derive(Debug)]
struct PageVisit {
    url: Url,
    depth: usize,
}

// What the streaming crawl yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    Finding(ImageFinding),
    /// The walk is finished; nothing follows this
    Done,
}

// One crawl in progress
pub struct Crawler {
    request: CrawlRequest,
    fetcher: PageFetcher,
    visited: HashSet<String>,
    stack: Vec<PageVisit>,
    pending: VecDeque<ImageFinding>,
    external_links: Vec<Url>,
}

impl Crawler {
    pub fn new(request: CrawlRequest, fetcher: PageFetcher) -> Self {
        let stack = vec![PageVisit {
            url: request.seed().clone(),
            depth: 0,
        }];

        Self {
            request,
            fetcher,
            visited: HashSet::new(),
            stack,
            pending: VecDeque::new(),
            external_links: Vec::new(),
        }
    }

    // Advances the walk until the next finding is ready
    //
    // Returns None once every reachable page has been visited. Findings
    // from one page are handed out before the next page is fetched.
    pub async fn next_finding(&mut self) -> Option<ImageFinding> {
        loop {
            // Hand out what the last page produced before fetching more
            if let Some(finding) = self.pending.pop_front() {
                return Some(finding);
            }

            // An empty stack means the walk is over
            let visit = self.stack.pop()?;
            self.visit(visit).await;
        }
    }

    // Runs the walk to the end and returns every finding in visit order
    //
    // The crawler is left in place afterwards, so callers can still read
    // visited() and external_links() for a summary.
    pub async fn collect_findings(&mut self) -> Vec<ImageFinding> {
        let mut findings = Vec::new();
        while let Some(finding) = self.next_finding().await {
            findings.push(finding);
        }
        findings
    }

    /// Normalized URLs of every page this crawl has fetched (or tried to)
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// http(s) links seen on crawled pages that point at other sites
    pub fn external_links(&self) -> &[Url] {
        &self.external_links
    }

    async fn visit(&mut self, visit: PageVisit) {
        // Too many hops from the seed
        if visit.depth > self.request.max_depth() {
            return;
        }

        let mut url = visit.url;
        // #section links point at the same document
        url.set_fragment(None);

        // Mark before fetching so a link back to this page is never followed
        if !self.visited.insert(url.to_string()) {
            return;
        }

        info!(url = %url, depth = visit.depth, "Crawling page");

        // None covers timeouts, HTTP errors and non-HTML pages alike. The
        // fetcher has already logged which one it was.
        let Some(html) = self.fetcher.fetch(&url).await else {
            return;
        };

        let markup = extract_markup(&html, &url);

        // Every image becomes a finding, in document order
        for image in markup.images {
            self.pending.push_back(evaluate_image(&url, image));
        }

        // Same-site links get followed, other websites are only noted down
        let mut followed = Vec::new();
        for link in markup.links {
            if self.request.scope.contains(&link) {
                followed.push(link);
            } else if is_web_link(&link) {
                debug!(from = %url, link = %link, "Not following external link");
                self.external_links.push(link);
            } else {
                // mailto:, tel:, javascript: and the like
                debug!(from = %url, link = %link, "Skipping non-web link");
            }
        }

        // Reverse so the first link in the document is popped first
        for link in followed.into_iter().rev() {
            self.stack.push(PageVisit {
                url: link,
                depth: visit.depth + 1,
            });
        }
    }
}

// Only http and https links count as other websites
fn is_web_link(link: &Url) -> bool {
    matches!(link.scheme(), "http" | "https")
}

// Crawls the whole site and returns every finding in visit order
//
// Fails only if the seed URL is invalid. Pages that can't be fetched are
// logged and skipped.
pub async fn crawl_batch(
    fetcher: &PageFetcher,
    seed: &str,
    max_depth: usize,
) -> Result<Vec<ImageFinding>, CrawlError> {
    // A bad seed fails here, before anything is fetched
    let request = CrawlRequest::new(seed, max_depth)?;
    let mut crawler = Crawler::new(request, fetcher.clone());

    let findings = crawler.collect_findings().await;

    info!(
        seed = seed,
        pages = crawler.visited().len(),
        images = findings.len(),
        "Crawl finished"
    );

    Ok(findings)
}

// Crawls the site lazily, yielding each finding as soon as it exists
//
// The seed is validated up front, so a bad URL is an error *before* the
// stream starts. The stream ends with CrawlEvent::Done.
//
// Nothing is fetched until the stream is polled, and the crawler only moves
// forward when the consumer asks for the next item. A consumer that stops
// reading simply leaves the rest of the site uncrawled; there is no separate
// cancel call.
pub fn crawl_stream(
    fetcher: PageFetcher,
    seed: &str,
    max_depth: usize,
) -> Result<impl Stream<Item = CrawlEvent>, CrawlError> {
    let request = CrawlRequest::new(seed, max_depth)?;
    let crawler = Crawler::new(request, fetcher);

    Ok(stream::unfold(Some(crawler), |state| async move {
        // The state is None only after Done has gone out
        let Some(mut crawler) = state else {
            return None;
        };

        match crawler.next_finding().await {
            Some(finding) => Some((CrawlEvent::Finding(finding), Some(crawler))),
            None => {
                info!(pages = crawler.visited().len(), "Streaming crawl finished");
                Some((CrawlEvent::Done, None))
            }
        }
    }))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec as a stack?
//    - push() adds to the end, pop() takes from the end: last in, first out
//    - That gives depth-first order: we finish one branch before the next
//    - A VecDeque used as a queue would give breadth-first order instead
//
// 2. What does HashSet::insert return?
//    - true if the value was new, false if it was already there
//    - So one call both checks "seen before?" and marks it seen
//
// 3. What is stream::unfold?
//    - Builds a Stream from a starting state and an async step function
//    - Each step returns Some((item, next_state)) or None to end the stream
//    - Here the state is Option<Crawler>: None after we've sent Done
//
// 4. What is let-else?
//    - `let Some(x) = value else { return ...; };`
//    - Binds x if the pattern matches, otherwise runs the else block
// -----------------------------------------------------------------------------
