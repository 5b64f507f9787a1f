//! Combining catalog books and news items into one page order.
//!
//! Two layouts are supported and the caller always names one:
//!
//! - [`MergePolicy::Interleave`]: two books, one news item, two books, one
//!   news item, ... with any leftover news appended at the end.
//! - [`MergePolicy::Sandwich`]: the first two news items on top, then every
//!   book, then the remaining news. With fewer than two news items the news
//!   simply follows the books.
//!
//! Both keep the relative order of each input and drop nothing.

use clap::ValueEnum;

/// How many owned items go between two external items in the interleaved layout.
pub const OWNED_PER_EXTERNAL: usize = 2;

/// How many external items the sandwich layout puts on top.
pub const SANDWICH_HEAD: usize = 2;

/// Page ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergePolicy {
    /// Two owned items, then one external item, repeating.
    Interleave,
    /// Two external items, all owned items, remaining external items.
    Sandwich,
}

/// Merge `owned` and `external` according to `policy`.
pub fn merge<T>(policy: MergePolicy, owned: Vec<T>, external: Vec<T>) -> Vec<T> {
    match policy {
        MergePolicy::Interleave => interleave(owned, external),
        MergePolicy::Sandwich => sandwich(owned, external),
    }
}

/// Insert one external item after every [`OWNED_PER_EXTERNAL`] owned items.
pub fn interleave<T>(owned: Vec<T>, external: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(owned.len() + external.len());
    let mut external = external.into_iter();

    for (i, item) in owned.into_iter().enumerate() {
        merged.push(item);
        if (i + 1) % OWNED_PER_EXTERNAL == 0 {
            if let Some(news) = external.next() {
                merged.push(news);
            }
        }
    }
    merged.extend(external);
    merged
}

/// Put the first [`SANDWICH_HEAD`] external items before all owned items.
pub fn sandwich<T>(owned: Vec<T>, mut external: Vec<T>) -> Vec<T> {
    if external.len() < SANDWICH_HEAD {
        let mut merged = owned;
        merged.extend(external);
        return merged;
    }

    let tail = external.split_off(SANDWICH_HEAD);
    let mut merged = external;
    merged.extend(owned);
    merged.extend(tail);
    merged
}
