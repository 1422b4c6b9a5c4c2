// src/checker/finding.rs
// =============================================================================
// The result of checking one image on one page.
//
// A finding is created once and never changed afterwards. The crawler hands
// it to the caller either in a Vec (batch) or one at a time (stream).
//
// Rust concepts:
// - Enums: To represent the two possible verdicts
// - serde: To turn findings into JSON for the API and --json output
// =============================================================================

use serde::{Deserialize, Serialize};
use url::Url;

use super::classify::classify_alt;
use super::html::{resolve_image_url, ImageRef};
use super::suggest::suggest_alt;

// The verdict on an image's alt text
//
// The JSON values ("OK" / "Needs Fix") are what existing API clients expect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltStatus {
    /// Alt text is descriptive enough
    #[serde(rename = "OK")]
    Ok,
    /// Alt text is missing, too short, or just repeats the filename
    #[serde(rename = "Needs Fix")]
    NeedsFix,
}

// One evaluated image occurrence on one visited page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFinding {
    /// The page the image was found on
    pub page_url: String,
    /// The image source resolved against page_url
    pub image_url: String,
    /// The alt attribute as written ("" when missing)
    pub alt_text: String,
    pub status: AltStatus,
    pub suggestion: String,
}

impl ImageFinding {
    pub fn needs_fix(&self) -> bool {
        self.status == AltStatus::NeedsFix
    }
}

// Classifies one image and builds its finding
//
// Classification and suggestion both look at the *raw* src attribute; only
// the reported image_url is resolved.
pub fn evaluate_image(page_url: &Url, image: ImageRef) -> ImageFinding {
    let status = classify_alt(&image.alt, &image.src);
    let suggestion = suggest_alt(&image.alt, &image.src);

    ImageFinding {
        page_url: page_url.to_string(),
        image_url: resolve_image_url(page_url, &image.src),
        alt_text: image.alt,
        status,
        suggestion,
    }
}
