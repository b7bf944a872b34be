use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Lower-cases, strips punctuation, and collapses whitespace so bank
/// spellings like "NETFLIX.COM *4829" and "Netflix" become comparable.
pub fn normalize_merchant(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !normalized.is_empty() {
                normalized.push(' ');
            }
            pending_space = false;
            normalized.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    normalized
}

fn token_set(normalized: &str) -> BTreeSet<&str> {
    normalized.split_whitespace().collect()
}

/// Jaccard similarity over whitespace tokens of two normalized names.
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let tokens_a = token_set(a);
    let tokens_b = token_set(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f64 / union as f64
}

/// Name criterion used by the transaction matcher: substring containment in
/// either direction (aggregator names carry store numbers and suffixes), or
/// token-Jaccard at or above `threshold`.
pub fn names_match(merchant: &str, variant: &str, threshold: f64) -> bool {
    let a = normalize_merchant(merchant);
    let b = normalize_merchant(variant);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a) || token_jaccard(&a, &b) >= threshold
}

/// Fuzzy similarity used by candidate dedup, where a looser edit-distance
/// measure works better than exact token overlap.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = normalize_merchant(a);
    let b = normalize_merchant(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(&a, &b)
}
