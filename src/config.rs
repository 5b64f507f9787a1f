//! Site constants and run configuration.
//!
//! Everything the scrapers and the renderer need to know about eBooxly and
//! the news feed lives here as constants. The few choices that have to be
//! made explicitly per run (which merge policy, which catalog strategy,
//! where to write, whether to deploy) are collected into a [`RunConfig`]
//! built from the command line.

use crate::cli::Cli;
use crate::merge::MergePolicy;
use clap::ValueEnum;
use std::path::PathBuf;

/// Public root of the owned site.
pub const MY_SITE_URL: &str = "https://ebooxly.com";

/// JSON data source backing the catalog's first listing page.
pub const MY_API_URL: &str = "https://ebooxly.com/books_pages/page-1.json?v=1";

/// Google News search endpoint (without query parameters).
pub const NEWS_SEARCH_URL: &str = "https://news.google.com/rss/search";

/// Search terms: books, novels, culture, literature.
pub const NEWS_QUERY: &str = "كتب روايات ثقافة أدب";

/// Locale parameters appended to the news search.
pub const NEWS_LOCALE: [(&str, &str); 3] = [("hl", "ar"), ("gl", "EG"), ("ceid", "EG:ar")];

/// Number of catalog books kept per run.
pub const CATALOG_LIMIT: usize = 8;

/// Number of news entries kept per run.
pub const NEWS_LIMIT: usize = 4;

/// Image used for owned items without a usable cover.
pub const FALLBACK_IMG: &str = "https://ebooxly.com/imgs/book.png";

/// Library, open book, reading, book pile, pen and paper, cover close-up.
pub const THEMATIC_IMAGES: [&str; 6] = [
    "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?auto=format&fit=crop&w=600&q=80",
    "https://images.unsplash.com/photo-1507842217121-ad5596e65d31?auto=format&fit=crop&w=600&q=80",
    "https://images.unsplash.com/photo-1524995997946-a1c2e315a42f?auto=format&fit=crop&w=600&q=80",
    "https://images.unsplash.com/photo-1512820790803-83ca734da794?auto=format&fit=crop&w=600&q=80",
    "https://images.unsplash.com/photo-1457369804613-52c61a468e7d?auto=format&fit=crop&w=600&q=80",
    "https://images.unsplash.com/photo-1519682337058-a5ca051231de?auto=format&fit=crop&w=600&q=80",
];

pub const SEO_DESC: &str =
    "اكتشف أحدث الكتب العربية والأخبار الثقافية. مكتبة eBooxly تجمع لك جديد الأدب والمعرفة.";
pub const SEO_KEYWORDS: &str = "كتب, تحميل كتب, روايات, ثقافة, أخبار الأدب, ebooxly, pdf";

/// "Unknown author".
pub const UNKNOWN_AUTHOR: &str = "مؤلف غير معروف";
/// "General books".
pub const DEFAULT_BOOK_TAG: &str = "كتب عامة";
/// "Cultural news".
pub const NEWS_AUTHOR: &str = "أخبار ثقافية";
/// "Culture & literature".
pub const NEWS_TAG: &str = "ثقافة وأدب";

pub const OWNED_SOURCE: &str = "eBooxly";
pub const NEWS_SOURCE: &str = "Google News";

/// Navigation and footer labels that are never book titles.
///
/// Matched as case-insensitive substrings, so each entry is a whole label
/// rather than a single common word.
pub const LINK_BLACKLIST: [&str; 17] = [
    "الرئيسية",
    "التصنيفات",
    "المؤلفون",
    "من نحن",
    "اتصل بنا",
    "الخصوصية",
    "شروط الاستخدام",
    "تسجيل الدخول",
    "اقرأ المزيد",
    "عرض المزيد",
    "home page",
    "about us",
    "contact us",
    "privacy policy",
    "login",
    "categories",
    "read more",
];

pub const DEFAULT_OUTPUT_FILE: &str = "public/index.html";
pub const DEFAULT_DEPLOY_COMMAND: &str = "firebase deploy --only hosting";

/// Where owned items come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogStrategy {
    /// Read the site's JSON listing.
    Api,
    /// Scrape the home page and author index pages.
    Pages,
}

/// Owned HTML pages scraped by [`CatalogStrategy::Pages`].
///
/// The author index only yields links that point below `/authors/`, so
/// category and footer links on that page are ignored.
pub fn owned_pages() -> Vec<crate::scrapers::pages::PageSource> {
    use crate::scrapers::pages::PageSource;
    vec![
        PageSource {
            url: MY_SITE_URL.to_string(),
            keyword: None,
            limit: 6,
            tag: "جديد المكتبة".to_string(),
        },
        PageSource {
            url: format!("{MY_SITE_URL}/authors/index.html"),
            keyword: Some("/authors/".to_string()),
            limit: 4,
            tag: "مؤلفون".to_string(),
        },
    ]
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub merge_policy: MergePolicy,
    pub catalog: CatalogStrategy,
    pub output_file: PathBuf,
    pub deploy_command: Option<String>,
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            merge_policy: cli.merge_policy,
            catalog: cli.catalog,
            output_file: PathBuf::from(&cli.output),
            deploy_command: cli.deploy.then(|| cli.deploy_command.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn deploy_command_only_when_enabled() {
        let cli = Cli::parse_from(["ebooxly_digest"]);
        let config = RunConfig::from(&cli);
        assert!(config.deploy_command.is_none());
        assert_eq!(config.output_file, PathBuf::from(DEFAULT_OUTPUT_FILE));

        let cli = Cli::parse_from(["ebooxly_digest", "--deploy"]);
        let config = RunConfig::from(&cli);
        assert_eq!(config.deploy_command.as_deref(), Some(DEFAULT_DEPLOY_COMMAND));
    }

    #[test]
    fn author_pages_are_keyword_filtered() {
        let pages = owned_pages();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].keyword.is_none());
        assert_eq!(pages[1].keyword.as_deref(), Some("/authors/"));
    }
}
