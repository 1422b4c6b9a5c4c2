// src/checker/classify.rs
// =============================================================================
// Decides whether an image's alt text is good enough.
//
// Rules are checked in a fixed order and the first one that matches wins:
// 1. empty or whitespace-only alt            -> NeedsFix
// 2. fewer than two words                    -> NeedsFix
// 3. the filename already contains the alt   -> NeedsFix
// 4. alt looks like a bare filename token    -> NeedsFix
// 5. anything else                           -> Ok
//
// Keep the order. Some inputs match more than one rule and the audit output
// should always name the same outcome for the same input.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

use super::finding::AltStatus;
use super::filename_stem;

// Letters, digits, hyphen and underscore only: "IMG_2041", "hero-image"
static FILENAME_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("static regex"));

// Classifies alt text for the image at `src`
//
// Example:
//   classify_alt("car", "/img/car.jpg")              -> NeedsFix
//   classify_alt("a red sports car", "/img/car.jpg") -> Ok
pub fn classify_alt(alt: &str, src: &str) -> AltStatus {
    // 1. nothing there
    if alt.trim().is_empty() {
        return AltStatus::NeedsFix;
    }

    // 2. one word
    if alt.split_whitespace().count() < 2 {
        return AltStatus::NeedsFix;
    }

    // 3. restates the filename (case-insensitive substring)
    let stem = filename_stem(src).to_lowercase();
    if stem.contains(&alt.to_lowercase()) {
        return AltStatus::NeedsFix;
    }

    // 4. looks like a filename itself
    if FILENAME_LIKE.is_match(alt) {
        return AltStatus::NeedsFix;
    }

    AltStatus::Ok
}
