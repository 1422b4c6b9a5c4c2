// src/checker/suggest.rs
// =============================================================================
// Proposes replacement alt text for an image.
//
// The suggestion is built from the filename and the existing alt text only.
// First matching rule wins:
// 1. alt is empty            -> "Image showing {filename with spaces}"
// 2. filename has "logo"     -> "Company logo"
// 3. filename has "banner"   -> "Promotional banner"
// 4. alt has <= 2 words      -> "More descriptive text needed for '{alt}'"
// 5. otherwise               -> "Looks okay"
//
// Note that rule 1 runs before the logo rule, so an empty alt on logo.png
// gives "Image showing logo", not "Company logo".
// =============================================================================

use super::filename_stem;

pub fn suggest_alt(alt: &str, src: &str) -> String {
    let stem = filename_stem(src);

    if alt.is_empty() {
        let readable = stem.replace(['-', '_'], " ");
        return format!("Image showing {}", readable);
    }

    let lowered = stem.to_lowercase();
    if lowered.contains("logo") {
        return "Company logo".to_string();
    }
    if lowered.contains("banner") {
        return "Promotional banner".to_string();
    }

    if alt.split_whitespace().count() <= 2 {
        return format!("More descriptive text needed for '{}'", alt);
    }

    "Looks okay".to_string()
}
