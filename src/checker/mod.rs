// src/checker/mod.rs
// =============================================================================
// This module contains all alt text checking logic.
//
// Submodules:
// - html: Pulls images and links out of a page
// - classify: Decides if an image's alt text is OK or needs a fix
// - suggest: Proposes better alt text
// - finding: The record we report for every image
//
// None of this touches the network. The crawler fetches pages and feeds
// them through here.
// =============================================================================

mod classify;
mod finding;
mod html;
mod suggest;

pub use finding::{evaluate_image, AltStatus, ImageFinding};
pub use html::extract_markup;

// The filename of an image without its directory or extension
//
// Examples:
//   "/img/team-photo.final.jpg" -> "team-photo"
//   "logo.png"                  -> "logo"
//   "https://cdn.x/a/b?v=2"     -> "b?v=2"
fn filename_stem(src: &str) -> &str {
    let last_segment = src.rsplit('/').next().unwrap_or(src);
    last_segment.split('.').next().unwrap_or(last_segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_stem() {
        assert_eq!(filename_stem("/img/team-photo.final.jpg"), "team-photo");
        assert_eq!(filename_stem("logo.png"), "logo");
        assert_eq!(filename_stem("no_extension"), "no_extension");
        assert_eq!(filename_stem("/dir/"), "");
    }
}
