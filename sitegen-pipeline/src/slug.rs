//! Slug helpers
//!
//! A project's slug comes from the prompt that created it. Accents are folded
//! away, anything that is not an ASCII word character becomes a separator or
//! disappears, and the result is capped at [`MAX_SLUG_LEN`] characters.

use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

pub const MAX_SLUG_LEN: usize = 50;

/// Length of the random suffix appended on collision
pub const SUFFIX_LEN: usize = 6;

/// Length of the random slug used when the prompt leaves nothing usable
const FALLBACK_LEN: usize = 8;

/// Derive a URL-safe base slug from free text
///
/// `"Meu Site de Café!"` becomes `"meu-site-de-cafe"`. Text with no usable
/// characters yields a short random slug instead of an empty one.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    for c in kept.trim().chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    // Only ASCII is left, so byte and char lengths agree
    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        random_hex(FALLBACK_LEN)
    } else {
        slug.to_string()
    }
}

/// Append a short random suffix to a slug that is already taken
pub fn with_suffix(base: &str) -> String {
    format!("{}-{}", base, random_hex(SUFFIX_LEN))
}

fn random_hex(len: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}
