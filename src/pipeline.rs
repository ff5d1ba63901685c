//! Tag filtering and presentation-order shuffling.
//!
//! Both stages copy; the input sequence is never mutated. Shuffle runs
//! after filtering and is re-rolled on every fetch, so order varies per
//! session. Callers wanting stable order simply skip it.

use rand::Rng;

use crate::models::MediaItem;

/// Sentinel tag meaning "no filtering".
pub const TAG_ALL: &str = "all";

/// Keeps items carrying `selected_tag` (case-sensitive exact match).
/// [`TAG_ALL`] is the identity.
pub fn filter_by_tag(items: &[MediaItem], selected_tag: &str) -> Vec<MediaItem> {
    if selected_tag == TAG_ALL {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.has_tag(selected_tag))
        .cloned()
        .collect()
}

/// Fisher–Yates permutation of a copy of `items`.
///
/// Walks indices from the last down to 1, swapping each with a uniformly
/// random index in `[0, i]`, so every permutation is equally likely. The
/// generator is a parameter so tests can seed it.
pub fn shuffled<R: Rng + ?Sized>(items: &[MediaItem], rng: &mut R) -> Vec<MediaItem> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}
