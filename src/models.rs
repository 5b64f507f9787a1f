//! Data models flowing through the digest pipeline.
//!
//! - [`ContentItem`]: one card on the page, either a catalog book or a news entry
//! - [`PageMeta`]: page-level values the renderer needs besides the items
//!
//! Items are built once by the scrapers and never modified afterwards.

/// One card on the generated page.
///
/// Construct through [`ContentItem::owned`] or [`ContentItem::external`];
/// both refuse an empty title or link, so every item that exists is
/// renderable. `is_mine` decides the card style and image fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Display title.
    pub title: String,
    /// Absolute URL the card points to.
    pub link: String,
    /// Absolute cover or illustration URL.
    pub image: String,
    /// Display author, or a placeholder.
    pub author: String,
    /// Short category label.
    pub tag: String,
    /// Plain-text teaser, empty for catalog books.
    pub description: String,
    /// Provenance label, e.g. `"eBooxly"` or `"Google News"`.
    pub source: String,
    /// `true` for books from the owned site.
    pub is_mine: bool,
}

/// Fields shared by both constructors.
#[derive(Debug, Default)]
pub struct ItemFields {
    pub title: String,
    pub link: String,
    pub image: String,
    pub author: String,
    pub tag: String,
    pub description: String,
    pub source: String,
}

impl ContentItem {
    /// Build an owned (catalog) item. Returns `None` if title or link is blank.
    pub fn owned(fields: ItemFields) -> Option<Self> {
        Self::build(fields, true)
    }

    /// Build an external (news) item. Returns `None` if title or link is blank.
    pub fn external(fields: ItemFields) -> Option<Self> {
        Self::build(fields, false)
    }

    fn build(fields: ItemFields, is_mine: bool) -> Option<Self> {
        let title = fields.title.trim();
        let link = fields.link.trim();
        if title.is_empty() || link.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            link: link.to_string(),
            image: fields.image,
            author: fields.author,
            tag: fields.tag,
            description: fields.description,
            source: fields.source,
            is_mine,
        })
    }
}

/// Page-level render parameters.
#[derive(Debug, Clone)]
pub struct PageMeta {
    /// Update stamp shown under the heading, `YYYY/MM/DD`.
    pub updated: String,
    /// Copyright year in the footer.
    pub year: i32,
    pub seo_description: String,
    pub seo_keywords: String,
}

impl PageMeta {
    /// Metadata stamped with the current local date.
    pub fn now() -> Self {
        use chrono::{Datelike, Local};
        let now = Local::now();
        Self {
            updated: now.format("%Y/%m/%d").to_string(),
            year: now.year(),
            seo_description: crate::config::SEO_DESC.to_string(),
            seo_keywords: crate::config::SEO_KEYWORDS.to_string(),
        }
    }
}
