//! Arabic cultural news from Google News.
//!
//! Google News exposes search results as RSS 2.0. The feed is parsed with
//! `feed-rs`, so Atom and RSS 1.0 feeds can be plugged in without code
//! changes.
//!
//! Entries have no usable artwork, so each news item gets a thematic stock
//! image through [`PickImage`].

use crate::config::{
    FALLBACK_IMG, NEWS_AUTHOR, NEWS_LOCALE, NEWS_QUERY, NEWS_SEARCH_URL, NEWS_SOURCE, NEWS_TAG,
    THEMATIC_IMAGES,
};
use crate::fetcher::{Fetch, FetchError};
use crate::images::PickImage;
use crate::models::{ContentItem, ItemFields};
use crate::utils::{absolute_http_only, clean_html, collapse_whitespace};
use feed_rs::model::{Entry, Link};
use feed_rs::parser;
use itertools::Itertools;
use std::iter;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// One raw feed entry before it becomes a [`ContentItem`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Raw description/summary, possibly containing markup.
    pub description: String,
}

impl From<Entry> for FeedEntry {
    fn from(entry: Entry) -> Self {
        let link = entry
            .links
            .iter()
            .find(|l| is_alternate(l))
            .map(|l| l.href.clone())
            .unwrap_or_default();
        let description = entry
            .summary
            .map(|t| t.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();
        FeedEntry {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            link,
            description,
        }
    }
}

/// Links without `rel`, or with `rel="alternate"`, point at the story itself.
fn is_alternate(link: &Link) -> bool {
    link.rel.as_deref().is_none_or(|rel| rel == "alternate")
}

/// Google News search URL for the configured query and locale.
pub fn search_url() -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        NEWS_SEARCH_URL,
        iter::once(("q", NEWS_QUERY)).chain(NEWS_LOCALE),
    )
}

/// Fetch the feed and turn it into at most `limit` external items.
///
/// Never fails: any error is logged and yields an empty list.
#[instrument(level = "info", skip(fetcher, picker))]
pub async fn fetch_news<F: Fetch, P: PickImage>(
    fetcher: &F,
    feed_url: &str,
    limit: usize,
    picker: &mut P,
) -> Vec<ContentItem> {
    info!("Reading cultural news feed");
    let xml = match fetcher.get_text(feed_url).await {
        Ok(xml) => xml,
        Err(e) => {
            warn!(error = %e, "News feed fetch failed");
            return Vec::new();
        }
    };

    match parse_feed(&xml) {
        Ok(entries) => {
            let items = extract_news(entries, limit, picker);
            info!(count = items.len(), "News items extracted");
            items
        }
        Err(e) => {
            warn!(error = %e, "News feed could not be parsed");
            Vec::new()
        }
    }
}

/// Convert parsed entries into external items.
///
/// Entries without a title or without an absolute http(s) link are skipped,
/// as are repeated titles. Only the kept items draw an image from `picker`.
pub fn extract_news<P: PickImage>(
    entries: Vec<FeedEntry>,
    limit: usize,
    picker: &mut P,
) -> Vec<ContentItem> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let title = collapse_whitespace(&entry.title);
            let Some(link) = absolute_http_only(&entry.link) else {
                debug!(%title, link = %entry.link, "Skipping entry without a usable link");
                return None;
            };
            (!title.is_empty()).then_some((title, link, entry.description))
        })
        .unique_by(|(title, _, _)| title.clone())
        .take(limit)
        .filter_map(|(title, link, description)| {
            ContentItem::external(ItemFields {
                title,
                link,
                image: picker.pick(&THEMATIC_IMAGES, FALLBACK_IMG).to_string(),
                author: NEWS_AUTHOR.to_string(),
                tag: NEWS_TAG.to_string(),
                description: clean_html(&description),
                source: NEWS_SOURCE.to_string(),
            })
        })
        .collect()
}

/// Parse an RSS or Atom document into raw entries, in feed order.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, FetchError> {
    let feed = parser::parse(xml.as_bytes())
        .map_err(|e| FetchError::Payload(format!("feed parse error: {e}")))?;
    Ok(feed.entries.into_iter().map(FeedEntry::from).collect())
}
