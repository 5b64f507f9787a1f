//! eBooxly HTML page scraper.
//!
//! Used when the catalog is read from rendered pages rather than the JSON
//! listing. The pages have no stable markup for books, so candidates are
//! picked heuristically:
//!
//! 1. links inside headings (`h1`–`h4`), or every link when the page has no
//!    heading links at all;
//! 2. visible text of at least [`MIN_TITLE_CHARS`] characters;
//! 3. no navigation/footer label from [`LINK_BLACKLIST`];
//! 4. a title not already taken earlier in the run;
//! 5. when the source has a keyword, a link path containing it.

use crate::config::{FALLBACK_IMG, LINK_BLACKLIST, OWNED_SOURCE, UNKNOWN_AUTHOR};
use crate::fetcher::{Fetch, FetchError};
use crate::models::{ContentItem, ItemFields};
use crate::utils::{absolute_http_url, collapse_whitespace};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Shortest link text accepted as a title.
pub const MIN_TITLE_CHARS: usize = 4;

static HEADING_LINKS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1 a[href], h2 a[href], h3 a[href], h4 a[href]").expect("valid selector")
});
static ALL_LINKS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));
static IMAGES: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").expect("valid selector"));

/// One owned page to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    pub url: String,
    /// Required fragment of the link path, if any.
    pub keyword: Option<String>,
    /// Maximum items taken from this page.
    pub limit: usize,
    /// Tag shown on the cards from this page.
    pub tag: String,
}

/// Scrape every source in order, sharing one seen-title set across them.
///
/// A page that cannot be fetched contributes nothing; the others still run.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn fetch_pages<F: Fetch>(fetcher: &F, sources: &[PageSource]) -> Vec<ContentItem> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for source in sources {
        let found = match fetcher.get_text(&source.url).await {
            Ok(html) => match extract_links(&html, source, &mut seen) {
                Ok(found) => found,
                Err(e) => {
                    warn!(url = %source.url, error = %e, "Page extraction failed");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(url = %source.url, error = %e, "Page fetch failed");
                Vec::new()
            }
        };
        info!(url = %source.url, count = found.len(), "Scraped owned page");
        items.extend(found);
    }

    items
}

/// Extract up to `source.limit` owned items from one page.
///
/// Titles accepted here are added to `seen`; titles already in `seen` are
/// skipped.
pub fn extract_links(
    html: &str,
    source: &PageSource,
    seen: &mut HashSet<String>,
) -> Result<Vec<ContentItem>, FetchError> {
    let base = Url::parse(&source.url)
        .map_err(|e| FetchError::Payload(format!("bad page url {}: {e}", source.url)))?;
    let document = Html::parse_document(html);

    let mut candidates: Vec<ElementRef> = document.select(&HEADING_LINKS).collect();
    if candidates.is_empty() {
        debug!("No heading links; falling back to every link");
        candidates = document.select(&ALL_LINKS).collect();
    }

    let mut items = Vec::new();
    for anchor in candidates {
        if items.len() >= source.limit {
            break;
        }

        let title = collapse_whitespace(&anchor.text().collect::<String>());
        if title.chars().count() < MIN_TITLE_CHARS || is_blacklisted(&title) || seen.contains(&title) {
            continue;
        }

        let Some(link) = anchor
            .value()
            .attr("href")
            .and_then(|href| absolute_http_url(&base, href))
        else {
            continue;
        };
        if let Some(keyword) = &source.keyword {
            if !link_path_contains(&link, keyword) {
                continue;
            }
        }

        let image = anchor
            .select(&IMAGES)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| absolute_http_url(&base, src))
            .unwrap_or_else(|| FALLBACK_IMG.to_string());

        let item = ContentItem::owned(ItemFields {
            title: title.clone(),
            link,
            image,
            author: UNKNOWN_AUTHOR.to_string(),
            tag: source.tag.clone(),
            description: String::new(),
            source: OWNED_SOURCE.to_string(),
        });
        if let Some(item) = item {
            seen.insert(title);
            items.push(item);
        }
    }

    Ok(items)
}

/// Whether `title` contains a navigation/footer label (case-insensitive).
pub fn is_blacklisted(title: &str) -> bool {
    let lower = title.to_lowercase();
    LINK_BLACKLIST
        .iter()
        .any(|term| lower.contains(&term.to_lowercase()))
}

fn link_path_contains(link: &str, keyword: &str) -> bool {
    Url::parse(link)
        .map(|u| u.path().contains(keyword))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::testing::StubFetcher;

    fn source(url: &str, keyword: Option<&str>, limit: usize) -> PageSource {
        PageSource {
            url: url.to_string(),
            keyword: keyword.map(str::to_string),
            limit,
            tag: "جديد المكتبة".to_string(),
        }
    }

    const HOME: &str = r#"
        <html><body>
          <nav><a href="/">الرئيسية</a><a href="/categories/index.html">التصنيفات</a></nav>
          <h2><a href="/authors/n/naguib-mahfouz/midaq-alley.html"><img src="/imgs/covers/midaq.jpg">زقاق المدق</a></h2>
          <h2><a href="/authors/t/tayeb-salih/season.html">موسم الهجرة إلى الشمال</a></h2>
          <h3><a href="/authors/n/naguib-mahfouz/midaq-alley-2.html">زقاق المدق</a></h3>
          <h3><a href="/x.html">قصير</a></h3>
          <h3><a href="/y.html">abc</a></h3>
          <h3><a href="javascript:void(0)">رابط بلا وجهة</a></h3>
          <h4><a href="/pages/contact.html">اتصل بنا الآن</a></h4>
          <footer><a href="/pages/privacy.html">الخصوصية</a></footer>
        </body></html>"#;

    #[test]
    fn test_heading_links_extracted() {
        let mut seen = HashSet::new();
        let items = extract_links(HOME, &source("https://ebooxly.com", None, 10), &mut seen).unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["زقاق المدق", "موسم الهجرة إلى الشمال", "قصير"]);
        assert_eq!(
            items[0].link,
            "https://ebooxly.com/authors/n/naguib-mahfouz/midaq-alley.html"
        );
        assert_eq!(items[0].image, "https://ebooxly.com/imgs/covers/midaq.jpg");
        assert_eq!(items[1].image, FALLBACK_IMG);
        assert!(items.iter().all(|i| i.is_mine && i.tag == "جديد المكتبة"));
    }

    #[test]
    fn test_no_duplicate_titles_and_no_blacklisted() {
        let mut seen = HashSet::new();
        let items = extract_links(HOME, &source("https://ebooxly.com", None, 10), &mut seen).unwrap();
        let unique: HashSet<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(unique.len(), items.len());
        assert!(items.iter().all(|i| !is_blacklisted(&i.title)));
        assert!(items.iter().all(|i| i.title.chars().count() >= MIN_TITLE_CHARS));
        assert!(items.iter().all(|i| !i.title.is_empty() && !i.link.is_empty()));
    }

    #[test]
    fn test_seen_titles_carry_across_calls() {
        let mut seen = HashSet::new();
        let first = extract_links(HOME, &source("https://ebooxly.com", None, 10), &mut seen).unwrap();
        let second = extract_links(HOME, &source("https://ebooxly.com", None, 10), &mut seen).unwrap();
        assert_eq!(first.len(), 3);
        assert!(second.is_empty());
    }

    #[test]
    fn test_fallback_to_all_links() {
        let html = r#"<ul>
            <li><a href="/authors/a/ahmed-khaled-tawfik/index.html">أحمد خالد توفيق</a></li>
            <li><a href="/categories/novels.html">روايات عربية</a></li>
            <li><a href="/authors/a/ahmed-mourad/index.html">أحمد مراد</a></li>
        </ul>"#;
        let mut seen = HashSet::new();
        let src = source("https://ebooxly.com/authors/index.html", Some("/authors/"), 10);
        let items = extract_links(html, &src, &mut seen).unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["أحمد خالد توفيق", "أحمد مراد"]);
    }

    #[test]
    fn test_limit_enforced() {
        let html: String = (0..30)
            .map(|i| format!(r#"<h2><a href="/b/{i}.html">كتاب رقم {i}</a></h2>"#))
            .collect();
        let mut seen = HashSet::new();
        let items = extract_links(&html, &source("https://ebooxly.com", None, 6), &mut seen).unwrap();
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn test_bad_base_url_is_error() {
        let mut seen = HashSet::new();
        assert!(extract_links(HOME, &source("not a url", None, 4), &mut seen).is_err());
    }

    #[test]
    fn test_is_blacklisted() {
        assert!(is_blacklisted("Contact Us"));
        assert!(is_blacklisted("سياسة الخصوصية"));
        assert!(!is_blacklisted("ثلاثية غرناطة"));
    }

    #[test]
    fn test_blacklist_spares_titles_sharing_a_word() {
        assert!(!is_blacklisted("سياسة الشرق الأوسط"));
        assert!(!is_blacklisted("Homer's Odyssey"));
        assert!(!is_blacklisted("About a Boy"));
        assert!(!is_blacklisted("المزيد من الحكايات"));

        let html = r#"<h2><a href="/b/1.html">سياسة الشرق الأوسط</a></h2>
            <h2><a href="/b/2.html">Homer's Odyssey</a></h2>
            <h2><a href="/pages/about.html">About Us</a></h2>"#;
        let mut seen = HashSet::new();
        let items = extract_links(html, &source("https://ebooxly.com", None, 10), &mut seen).unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["سياسة الشرق الأوسط", "Homer's Odyssey"]);
    }

    #[tokio::test]
    async fn test_fetch_pages_skips_failed_source() {
        let stub = StubFetcher::default().with("https://ebooxly.com", HOME);
        let sources = vec![
            source("https://ebooxly.com/missing.html", None, 4),
            source("https://ebooxly.com", None, 2),
        ];
        let items = fetch_pages(&stub, &sources).await;
        assert_eq!(items.len(), 2);
    }
}
