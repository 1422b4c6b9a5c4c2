// src/checker/html.rs
// =============================================================================
// This module pulls images and links out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser), so broken markup still
//   parses into *something* instead of failing
//
// We also use the `url` crate to resolve relative src/href values against
// the page URL, exactly like a browser does.
//
// Everything comes back in document order. The crawler relies on that: it
// reports images in the order they appear and follows links in the order
// they appear.
// =============================================================================

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

// Selectors are constant and known to be valid, so parse them once
static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("static selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

// One <img> element as written in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// The raw src attribute (never empty)
    pub src: String,
    /// The raw alt attribute, or "" when the attribute is missing
    pub alt: String,
}

// Everything the crawler needs from one page
#[derive(Debug, Default)]
pub struct PageMarkup {
    pub images: Vec<ImageRef>,
    /// Absolute URLs of every <a href>, same-origin or not
    pub links: Vec<Url>,
}

// Extracts images and links from HTML content
//
// Parameters:
//   html: the page body
//   page_url: the URL the page was fetched from (base for relative links)
//
// Example:
//   html = "<img src='a.png' alt='x'><a href='/docs'>Docs</a>"
//   page_url = "https://example.com/page"
//   images = [ImageRef { src: "a.png", alt: "x" }]
//   links  = ["https://example.com/docs"]
//
// The parsed document is dropped before we return, so callers can hold the
// result across an .await (scraper's Html is not Send).
pub fn extract_markup(html: &str, page_url: &Url) -> PageMarkup {
    let document = Html::parse_document(html);

    // Images: keep the raw src and alt, resolving happens later
    let images = document
        .select(&IMG_SELECTOR)
        .filter_map(|element| {
            let src = element.value().attr("src").unwrap_or("");
            // Images without a source produce no finding at all
            if src.is_empty() {
                return None;
            }
            Some(ImageRef {
                src: src.to_string(),
                alt: element.value().attr("alt").unwrap_or("").to_string(),
            })
        })
        .collect();

    // Links: resolve against the page, drop hrefs that don't form a URL
    let links = document
        .select(&LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| page_url.join(href).ok())
        .collect();

    PageMarkup { images, links }
}

// Resolves an image src against the page it was found on
//
// If the join fails (a src the url crate refuses to parse) we keep the raw
// value so the finding still points at what the page actually contains.
pub fn resolve_image_url(page_url: &Url, src: &str) -> String {
    match page_url.join(src) {
        Ok(url) => url.to_string(),
        Err(_) => src.to_string(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Lazy?
//    - once_cell::sync::Lazy runs its closure the first time the value is used
//    - After that every caller shares the same Selector
//    - It's the usual way to hold a "constant" that needs code to build
//
// 2. What is filter_map?
//    - It's map + filter in one step
//    - Return Some(x) to keep x, None to drop the item
//    - Great for "parse and skip what doesn't parse"
//
// 3. Why does join() handle absolute URLs too?
//    - Url::join follows the same rules as a browser resolving an href
//    - "https://other.com/x" joined onto anything is just that URL
//    - "../up" and "/root" are resolved relative to the page
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.com/blog/post.html").unwrap()
    }

    #[test]
    fn test_images_in_document_order() {
        let html = r#"
            <img src="/a.png" alt="first image">
            <p><img src="b.jpg"></p>
            <img src="c.gif" alt="">
        "#;
        let markup = extract_markup(html, &page());
        assert_eq!(
            markup.images,
            vec![
                ImageRef { src: "/a.png".into(), alt: "first image".into() },
                ImageRef { src: "b.jpg".into(), alt: "".into() },
                ImageRef { src: "c.gif".into(), alt: "".into() },
            ]
        );
    }

    #[test]
    fn test_skips_images_without_src() {
        let html = r#"<img alt="no source"><img src="" alt="empty"><img src="x.png" alt="ok">"#;
        let markup = extract_markup(html, &page());
        assert_eq!(markup.images.len(), 1);
        assert_eq!(markup.images[0].src, "x.png");
    }

    #[test]
    fn test_resolves_links() {
        let html = r#"
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
            <a href="https://other.com/x">Other</a>
            <a>No href</a>
        "#;
        let markup = extract_markup(html, &page());
        let links: Vec<String> = markup.links.iter().map(Url::to_string).collect();
        assert_eq!(
            links,
            vec![
                "https://example.com/docs",
                "https://example.com/about",
                "https://other.com/x",
            ]
        );
    }

    #[test]
    fn test_keeps_non_http_links_for_the_scoper() {
        let html = r#"<a href="mailto:test@example.com">Email</a>"#;
        let markup = extract_markup(html, &page());
        assert_eq!(markup.links.len(), 1);
        assert_eq!(markup.links[0].scheme(), "mailto");
    }

    #[test]
    fn test_resolve_image_url() {
        assert_eq!(
            resolve_image_url(&page(), "img/cat.png"),
            "https://example.com/blog/img/cat.png"
        );
        assert_eq!(
            resolve_image_url(&page(), "https://cdn.example.net/x.png"),
            "https://cdn.example.net/x.png"
        );
    }
}
