//! Locale-aware name collation.
//!
//! Municipality names follow the Swedish alphabet, where å, ä and ö come
//! after z. A byte-wise comparison would interleave them with ASCII, so the
//! `name` sort key compares collation keys built here instead.

use std::cmp::Ordering;

/// Collation weight for a single lowercase character.
///
/// ASCII letters keep their scalar value; å/ä/ö are pushed past 'z' in
/// alphabet order. Other accented letters fold to their base letter, which
/// matches how upstream data spells the handful of names that carry them.
fn weight(c: char) -> u32 {
    match c {
        'å' => 'z' as u32 + 1,
        'ä' => 'z' as u32 + 2,
        'ö' => 'z' as u32 + 3,
        'é' | 'è' | 'ê' => 'e' as u32,
        'ü' => 'u' as u32,
        _ => c as u32,
    }
}

/// Compare two names in Swedish alphabet order, case-insensitively.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let left = a.chars().flat_map(char::to_lowercase).map(weight);
    let right = b.chars().flat_map(char::to_lowercase).map(weight);
    left.cmp(right)
}
