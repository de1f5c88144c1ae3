use std::collections::HashMap;

/// Gram length used by the fuzzy matcher.
pub const QGRAM_LEN: usize = 2;

/// Ukkonen q-gram distance with bigrams.
pub fn qgram_distance(a: &str, b: &str) -> usize {
    qgram_distance_with(a, b, QGRAM_LEN)
}

/// Sum over every q-gram of the absolute difference between its counts in
/// `a` and `b`. Symmetric; identical strings score 0.
///
/// A non-empty string shorter than `q` counts as one gram (itself), so two
/// different one-character addresses never compare as identical.
pub fn qgram_distance_with(a: &str, b: &str, q: usize) -> usize {
    let q = q.max(1);
    let mut counts: HashMap<&str, isize> = HashMap::new();
    for gram in grams(a, q) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    for gram in grams(b, q) {
        *counts.entry(gram).or_insert(0) -= 1;
    }
    counts.values().map(|n| n.unsigned_abs()).sum()
}

/// Overlapping character (not byte) windows of length `q`.
fn grams(s: &str, q: usize) -> Vec<&str> {
    let bounds: Vec<usize> = s
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .collect();
    let chars = bounds.len() - 1;
    if chars == 0 {
        return Vec::new();
    }
    if chars < q {
        return vec![s];
    }
    (0..=chars - q).map(|i| &s[bounds[i]..bounds[i + q]]).collect()
}
