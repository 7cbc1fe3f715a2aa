//! Stylesheet fetch and font-face extraction (made by FontLab https://www.fontlab.com/)

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::remote::RemoteSource;

static FACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)/\*\s*([^*]+?)\s*\*/\s*@font-face\s*\{([^}]+)\}").expect("face regex")
});
static WEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"font-weight:\s*(\d+)").expect("weight regex"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"font-style:\s*(\w+)").expect("style regex"));
static SRC_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"src:\s*url\(([^)]+)\)").expect("src url regex"));

/// Style variant of one font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceStyle {
    Normal,
    Italic,
}

/// Source format of one font face, derived from its URL extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceFormat {
    Woff2,
    Woff,
    Ttf,
}

/// One `@font-face` variant extracted from a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    pub subset: String,
    pub weight: u16,
    pub style: FaceStyle,
    pub url: String,
    pub format: FaceFormat,
}

/// Everything extracted from one family's stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFontData {
    /// Canonical family name the stylesheet was fetched for.
    pub family: String,
    /// Parsed faces, in order of appearance in the stylesheet.
    pub fonts: Vec<FontFace>,
    /// Every `src: url(...)` argument in the body, deduplicated, first-seen
    /// order. May be non-empty while `fonts` is empty.
    pub all_urls: Vec<String>,
}

impl ResolvedFontData {
    /// Deterministic preview pick: the regular woff2 face if present, then
    /// any woff2 face, then the first parsed face, then the first raw URL.
    pub fn preview_url(&self) -> Option<&str> {
        self.fonts
            .iter()
            .find(|f| {
                f.format == FaceFormat::Woff2 && f.weight == 400 && f.style == FaceStyle::Normal
            })
            .or_else(|| self.fonts.iter().find(|f| f.format == FaceFormat::Woff2))
            .or_else(|| self.fonts.first())
            .map(|f| f.url.as_str())
            .or_else(|| self.all_urls.first().map(String::as_str))
    }
}

/// Build the stylesheet request URL for a family: weights 400 and 700,
/// display swap, spaces encoded as `+`.
pub fn css_request_url(base: &str, family: &str) -> String {
    format!(
        "{base}?family={}:wght@400;700&display=swap",
        family.replace(' ', "+")
    )
}

/// Classify a source URL by extension. Anything that is neither woff2 nor
/// woff maps to ttf.
pub fn face_format(url: &str) -> FaceFormat {
    if url.contains(".woff2") {
        FaceFormat::Woff2
    } else if url.contains(".woff") {
        FaceFormat::Woff
    } else {
        FaceFormat::Ttf
    }
}

/// Extract face records from a stylesheet body.
///
/// Each `/* subset */ @font-face { ... }` pair yields one record; a block
/// without a `src: url(...)` is skipped. Nothing in here fails; partial
/// stylesheets produce partial results.
pub fn parse_font_faces(body: &str) -> Vec<FontFace> {
    let mut faces = Vec::new();

    for caps in FACE_RE.captures_iter(body) {
        let subset = caps[1].trim().to_string();
        let block = &caps[2];

        let url = match SRC_URL_RE.captures(block) {
            Some(src) => src[1].to_string(),
            None => continue,
        };

        let weight = WEIGHT_RE
            .captures(block)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(400);

        let style = match STYLE_RE.captures(block) {
            Some(c) if c[1].eq_ignore_ascii_case("italic") => FaceStyle::Italic,
            _ => FaceStyle::Normal,
        };

        let format = face_format(&url);
        faces.push(FontFace {
            subset,
            weight,
            style,
            url,
            format,
        });
    }

    faces
}

/// Collect every `src: url(...)` argument in the body, deduplicated,
/// first-seen order. Scans the whole body, not only recognized face blocks.
pub fn collect_source_urls(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for caps in SRC_URL_RE.captures_iter(body) {
        let url = caps[1].to_string();
        if seen.insert(url.clone()) {
            urls.push(url);
        }
    }

    urls
}

/// Fetch one family's stylesheet and extract its face records.
///
/// `family` must already be the canonical catalog name; transport and status
/// errors are the only failure mode.
pub fn fetch_font_faces(source: &dyn RemoteSource, family: &str) -> Result<ResolvedFontData> {
    let body = source.stylesheet(family)?;
    Ok(ResolvedFontData {
        family: family.to_string(),
        fonts: parse_font_faces(&body),
        all_urls: collect_source_urls(&body),
    })
}
