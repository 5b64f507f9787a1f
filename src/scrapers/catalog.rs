//! eBooxly catalog reader (JSON listing).
//!
//! The site renders its listing pages from static JSON files such as
//! `books_pages/page-1.json`. Reading that file directly is more reliable than
//! scraping the rendered HTML.
//!
//! # Payload shape
//!
//! Either a bare array of books or an object with an `items` array. Each book
//! may carry `title`, `author`, `image`, `categories` and the slug parts
//! `letter`, `author_slug`, `title_slug`. Book pages live at
//! `{site}/authors/{letter}/{author_slug}/{title_slug}.html`, which is how a
//! link is rebuilt when the entry has no `url`/`link` of its own.

use crate::config::{DEFAULT_BOOK_TAG, FALLBACK_IMG, OWNED_SOURCE, UNKNOWN_AUTHOR};
use crate::fetcher::{Fetch, FetchError};
use crate::models::{ContentItem, ItemFields};
use crate::utils::{absolute_on_site, truncate_for_log};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    List(Vec<Value>),
    Wrapped {
        #[serde(default)]
        items: Vec<Value>,
    },
}

/// One entry of the listing. Every field is optional in practice.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogBook {
    title: Option<String>,
    author: Option<String>,
    image: Option<String>,
    url: Option<String>,
    link: Option<String>,
    letter: Option<String>,
    author_slug: Option<String>,
    title_slug: Option<String>,
    categories: Option<String>,
}

/// Fetch the listing and turn it into at most `limit` owned items.
///
/// Never fails: transport errors, bad statuses and malformed payloads are
/// logged and yield an empty list.
#[instrument(level = "info", skip(fetcher))]
pub async fn fetch_catalog<F: Fetch>(
    fetcher: &F,
    site: &str,
    api_url: &str,
    limit: usize,
) -> Vec<ContentItem> {
    info!("Reading eBooxly catalog");
    let body = match fetcher.get_text(api_url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Catalog fetch failed");
            return Vec::new();
        }
    };

    match extract_catalog(&body, site, limit) {
        Ok(items) => {
            info!(count = items.len(), "Catalog books extracted");
            items
        }
        Err(e) => {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 200),
                "Catalog payload rejected"
            );
            Vec::new()
        }
    }
}

/// Parse a listing body into owned items.
pub fn extract_catalog(body: &str, site: &str, limit: usize) -> Result<Vec<ContentItem>, FetchError> {
    let entries = match serde_json::from_str::<CatalogPayload>(body)? {
        CatalogPayload::List(items) | CatalogPayload::Wrapped { items } => items,
    };

    let mut books = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        if books.len() >= limit {
            break;
        }
        let book: CatalogBook = match serde_json::from_value(entry) {
            Ok(book) => book,
            Err(e) => {
                debug!(index, error = %e, "Skipping malformed catalog entry");
                continue;
            }
        };
        match book_to_item(book, site) {
            Some(item) => books.push(item),
            None => debug!(index, "Skipping catalog entry without title"),
        }
    }
    Ok(books)
}

fn book_to_item(book: CatalogBook, site: &str) -> Option<ContentItem> {
    let link = match non_blank(book.url).or(non_blank(book.link)) {
        Some(direct) => absolute_on_site(site, &direct),
        None => book_url(
            site,
            &non_blank(book.letter).unwrap_or_else(|| "a".to_string()),
            &non_blank(book.author_slug).unwrap_or_else(|| "unknown".to_string()),
            &non_blank(book.title_slug).unwrap_or_else(|| "unknown".to_string()),
        ),
    };

    let image = non_blank(book.image)
        .map(|img| absolute_on_site(site, &img))
        .unwrap_or_else(|| FALLBACK_IMG.to_string());

    ContentItem::owned(ItemFields {
        title: book.title.unwrap_or_default(),
        link,
        image,
        author: non_blank(book.author).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        tag: first_category(book.categories.as_deref()),
        description: String::new(),
        source: OWNED_SOURCE.to_string(),
    })
}

/// Canonical book page URL built from its slug parts.
pub fn book_url(site: &str, letter: &str, author_slug: &str, title_slug: &str) -> String {
    format!(
        "{}/authors/{letter}/{author_slug}/{title_slug}.html",
        site.trim_end_matches('/')
    )
}

/// First segment of a hyphen-delimited category list.
fn first_category(categories: Option<&str>) -> String {
    categories
        .and_then(|c| c.split('-').next())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_BOOK_TAG)
        .to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::testing::StubFetcher;

    const SITE: &str = "https://ebooxly.com";

    #[test]
    fn test_wrapped_payload() {
        let body = r#"{"items": [
            {"title": "الخيميائي", "author": "باولو كويلو", "image": "/imgs/covers/alchemist.jpg",
             "letter": "b", "author_slug": "paulo-coelho", "title_slug": "alchemist",
             "categories": "روايات - أدب عالمي"}
        ]}"#;
        let items = extract_catalog(body, SITE, 8).unwrap();
        assert_eq!(items.len(), 1);
        let book = &items[0];
        assert_eq!(book.title, "الخيميائي");
        assert_eq!(book.author, "باولو كويلو");
        assert_eq!(
            book.link,
            "https://ebooxly.com/authors/b/paulo-coelho/alchemist.html"
        );
        assert_eq!(book.image, "https://ebooxly.com/imgs/covers/alchemist.jpg");
        assert_eq!(book.tag, "روايات");
        assert_eq!(book.source, "eBooxly");
        assert!(book.is_mine);
    }

    #[test]
    fn test_bare_list_with_defaults() {
        let body = r#"[{"title": "كتاب بلا بيانات"}]"#;
        let items = extract_catalog(body, SITE, 8).unwrap();
        assert_eq!(items.len(), 1);
        let book = &items[0];
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.image, FALLBACK_IMG);
        assert_eq!(book.tag, DEFAULT_BOOK_TAG);
        assert_eq!(book.link, "https://ebooxly.com/authors/a/unknown/unknown.html");
    }

    #[test]
    fn test_direct_link_preferred() {
        let body = r#"[{"title": "T", "url": "/books/t.html", "letter": "x"},
                      {"title": "U", "link": "https://other.example/u"}]"#;
        let items = extract_catalog(body, SITE, 8).unwrap();
        assert_eq!(items[0].link, "https://ebooxly.com/books/t.html");
        assert_eq!(items[1].link, "https://other.example/u");
    }

    #[test]
    fn test_untitled_and_malformed_entries_dropped() {
        let body = r#"[{"title": ""}, {"author": "x"}, {"title": 42}, "junk", {"title": "ok"}]"#;
        let items = extract_catalog(body, SITE, 8).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "ok");
        assert!(items.iter().all(|i| !i.title.is_empty() && !i.link.is_empty()));
    }

    #[test]
    fn test_limit_enforced() {
        let entries: Vec<String> = (0..20).map(|i| format!(r#"{{"title": "book {i}"}}"#)).collect();
        let body = format!("[{}]", entries.join(","));
        let items = extract_catalog(&body, SITE, 8).unwrap();
        assert_eq!(items.len(), 8);
        assert_eq!(items[7].title, "book 7");
    }

    #[test]
    fn test_object_without_items_is_empty() {
        let items = extract_catalog(r#"{"page": 1}"#, SITE, 8).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_unexpected_shape_is_payload_error() {
        assert!(matches!(
            extract_catalog(r#""just a string""#, SITE, 8),
            Err(FetchError::Payload(_))
        ));
        assert!(extract_catalog("<html>", SITE, 8).is_err());
    }

    #[test]
    fn test_first_category() {
        assert_eq!(first_category(Some(" تاريخ - سياسة")), "تاريخ");
        assert_eq!(first_category(Some("")), DEFAULT_BOOK_TAG);
        assert_eq!(first_category(None), DEFAULT_BOOK_TAG);
    }

    #[tokio::test]
    async fn test_fetch_catalog_degrades_to_empty() {
        let stub = StubFetcher::default().with("https://bad", "not json");
        assert!(fetch_catalog(&stub, SITE, "https://bad", 8).await.is_empty());
        assert!(fetch_catalog(&stub, SITE, "https://missing", 8).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_catalog_ok() {
        let stub = StubFetcher::default().with("https://api", r#"[{"title": "A"}, {"title": "B"}]"#);
        let items = fetch_catalog(&stub, SITE, "https://api", 8).await;
        assert_eq!(items.len(), 2);
    }
}
