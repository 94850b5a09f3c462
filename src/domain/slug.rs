//! Canonical page identifiers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Substituted when normalization leaves nothing behind
pub const FALLBACK_SLUG: &str = "untitled";

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"))
}

/// Filesystem- and URL-safe identifier.
/// Format: lowercase ASCII alphanumerics separated by single hyphens (e.g., "insulin-lispro")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Slug(String);

impl Slug {
    /// Accept a string only if it is already canonical
    pub fn parse(s: &str) -> Option<Self> {
        let canonical = !s.is_empty()
            && !s.starts_with('-')
            && !s.ends_with('-')
            && !s.contains("--")
            && s
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        canonical.then(|| Self(s.to_string()))
    }

    /// Get the slug as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when normalization produced the fallback value
    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_SLUG
    }

    /// Human-readable name derived from the slug ("insulin-lispro" → "Insulin Lispro")
    pub fn display_name(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut prev_letter = false;
        for ch in self.0.chars() {
            let ch = if ch == '-' { ' ' } else { ch };
            if ch.is_ascii_alphabetic() {
                out.push(if prev_letter { ch } else { ch.to_ascii_uppercase() });
                prev_letter = true;
            } else {
                out.push(ch);
                prev_letter = false;
            }
        }
        out
    }
}

impl TryFrom<String> for Slug {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("not a canonical slug: {:?}", value))
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize arbitrary text into a [`Slug`]. Never fails.
pub fn slugify(text: &str) -> Slug {
    let ascii: String = text
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let hyphenated = separator_runs().replace_all(&ascii, "-");
    let trimmed = hyphenated.trim_matches('-');

    if trimmed.is_empty() {
        Slug(FALLBACK_SLUG.to_string())
    } else {
        Slug(trimmed.to_string())
    }
}
