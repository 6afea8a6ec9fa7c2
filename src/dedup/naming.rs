//! Candidate-name synthesis

use indexmap::IndexSet;

/// Fallback for entries that somehow collected no candidates
const PLACEHOLDER_NAME: &str = "subSchema";

/// Synthesize one identifier from a set of candidate names
///
/// A single candidate is used verbatim. Several are merged: a shared
/// "Schema" suffix is stripped when every candidate carries it, stems are
/// deduplicated case-insensitively in encounter order, the first three are
/// title-cased and joined with "And", the first character is lowered again,
/// and the suffix reattached. Entries at different fingerprints may still
/// synthesize the same name; that collision is accepted.
pub(crate) fn name_from_candidates(candidates: &IndexSet<String>) -> String {
    let Some(first) = candidates.first() else {
        return PLACEHOLDER_NAME.to_string();
    };
    if candidates.len() == 1 {
        return first.clone();
    }

    let all_suffixed = candidates.iter().all(|name| name.ends_with("Schema"));
    let bases: Vec<&str> = candidates
        .iter()
        .map(|name| {
            if all_suffixed {
                name.strip_suffix("Schema").unwrap_or(name)
            } else {
                name.as_str()
            }
        })
        .collect();

    let mut seen = IndexSet::new();
    let mut stems: Vec<&str> = Vec::new();
    for base in &bases {
        if seen.insert(base.to_lowercase()) {
            stems.push(base);
        }
    }

    let combined = stems
        .iter()
        .take(3)
        .map(|stem| capitalize(stem))
        .collect::<Vec<_>>()
        .join("And");

    let merged = lower_first(&combined);
    if all_suffixed {
        format!("{merged}Schema")
    } else {
        merged
    }
}

/// Lower-case the first character only
pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Upper-case the first character only
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
