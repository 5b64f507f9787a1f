//! Content sources for the digest page.
//!
//! | Source | Module | Method | Yields |
//! |--------|--------|--------|--------|
//! | eBooxly JSON listing | [`catalog`] | `serde_json` | owned books |
//! | eBooxly HTML pages | [`pages`] | `scraper` heuristics | owned books |
//! | Google News search | [`news`] | `feed-rs` RSS/Atom | external news |
//!
//! Every module pairs a pure `extract_*`/`parse_*` function over a fetched
//! body with an async `fetch_*` wrapper. The wrappers never fail: a source
//! that cannot be reached or understood is logged and contributes an empty
//! list, so the page is always rendered with whatever was collected.

pub mod catalog;
pub mod news;
pub mod pages;
