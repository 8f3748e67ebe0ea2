//! Name Expander
//!
//! Cleans up song titles and credits so a search against another catalog has
//! a better chance of hitting, and proposes alternative title strings.
//!
//! Everything here is pure string work on [`Song`] values.

use once_cell::sync::Lazy;
use regex::Regex;
use songmap_common::{Item, Song};

/// Descriptor suffixes added by video uploads, removed from titles
const DESCRIPTOR_SUFFIXES: [&str; 4] = [
    " (Lyrics)",
    " (Official Video)",
    " (Visualization)",
    " (Music Visualization)",
];

/// `(ft. X)`, `(feat. X)`, `(featuring X)`; captures X
static FEATURING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\((?:ft|featuring|feat)\b\.?\s*([^)]*)\)").expect("featuring pattern is valid")
});

/// Upload-style `<artist> - <title>`
static UPLOAD_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*?)\s+-\s+(.+)").expect("upload title pattern is valid"));

/// Author separators split into individual credits
const AUTHOR_SEPARATORS: [&str; 2] = [" & ", " / "];

/// Normalise name and credits of a song.
///
/// Credits are extracted from the original title before it is cleaned, so an
/// upload title `Artist - Title` yields name `Title` and gains `Artist`.
pub fn expand_song(song: &Song) -> Song {
    let mut authors = song.authors().to_vec();
    for credit in extract_credits(song) {
        if !authors.contains(&credit) {
            authors.push(credit);
        }
    }
    song.with_authors(authors).renamed(normalize_name(song.name()))
}

/// Strip descriptor suffixes and reduce `<left> - <right>` to `<right>`
pub fn normalize_name(name: &str) -> String {
    let mut cleaned = name.to_string();
    for suffix in DESCRIPTOR_SUFFIXES {
        cleaned = cleaned.replace(suffix, "");
    }

    if let Some(title) = UPLOAD_TITLE.captures(&cleaned).and_then(|c| c.get(2)) {
        cleaned = title.as_str().to_string();
    }

    cleaned.trim().to_string()
}

/// Credits hidden in the title or joined inside author strings.
///
/// Returned in discovery order (featuring, upload artist, split authors),
/// without duplicates. Original authors are not included.
pub fn extract_credits(song: &Song) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |credit: &str| {
        let credit = credit.trim();
        if !credit.is_empty() && !found.iter().any(|c| c == credit) {
            found.push(credit.to_string());
        }
    };

    if let Some(featured) = FEATURING.captures(song.name()).and_then(|c| c.get(1)) {
        push(featured.as_str());
    }

    if let Some(artist) = UPLOAD_TITLE.captures(song.name()).and_then(|c| c.get(1)) {
        push(artist.as_str());
    }

    for author in song.authors() {
        if !AUTHOR_SEPARATORS.iter().any(|sep| author.contains(sep)) {
            continue;
        }
        let mut parts = vec![author.as_str()];
        for sep in AUTHOR_SEPARATORS {
            parts = parts.into_iter().flat_map(|p| p.split(sep)).collect();
        }
        for part in parts {
            push(part);
        }
    }

    found.retain(|credit| !song.authors().contains(credit));
    found
}

/// Alternative titles built from parenthetical groups.
///
/// For `Song (Remix)(Live)` this yields, in order:
/// `Song (Remix) (Live)`, `Song`, `Song (Remix)`, `Song (Live)`.
/// A name without a complete `(...)` group yields only itself.
pub fn name_variants(name: &str) -> Vec<String> {
    let spaced = name.replace(")(", ") (").trim().to_string();

    let mut groups: Vec<&str> = Vec::new();
    let mut base = String::new();
    let mut rest = spaced.as_str();
    loop {
        let Some(open) = rest.find('(') else {
            base.push_str(rest);
            break;
        };
        let Some(close) = rest[open..].find(')').map(|offset| open + offset) else {
            base.push_str(rest);
            break;
        };
        base.push_str(&rest[..open]);
        base.push(' ');
        groups.push(&rest[open..=close]);
        rest = &rest[close + 1..];
    }
    let base = base.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut variants = vec![spaced.clone()];
    let mut add = |candidate: String| {
        let candidate = candidate.trim().to_string();
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    };

    if !groups.is_empty() {
        add(base.clone());
        for group in &groups {
            add(format!("{} {}", base, group));
        }
    }

    variants
}
