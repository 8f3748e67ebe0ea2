//! ASCII slugs for tolerant string comparison

use unicode_normalization::UnicodeNormalization;

/// Convert a string to a lowercase ASCII slug.
///
/// Accents are stripped through NFKD decomposition (anything still non-ASCII
/// is dropped), characters other than `[a-z0-9_]`, whitespace and `-` are
/// removed, runs of whitespace and dashes become a single `-`, and leading or
/// trailing `-`/`_` are trimmed.
pub fn slugify(value: &str) -> String {
    let ascii: String = value
        .nfkd()
        .filter(char::is_ascii)
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_ascii_whitespace())
        .collect();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c == '-' || c.is_ascii_whitespace() {
            pending_dash = true;
            continue;
        }
        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }
        slug.push(c);
    }
    if pending_dash {
        slug.push('-');
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}
