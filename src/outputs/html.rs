//! Static page rendering.
//!
//! The page is an askama template (`templates/index.html`), so every item
//! field is HTML-escaped on the way in. The stylesheet and the schema.org
//! JSON-LD block are fixed strings injected verbatim.
//!
//! Card styling follows `is_mine`: catalog books get the green `is-book`
//! frame and fall back to the bookstore's generic cover when their image
//! fails to load; news items get the amber `is-news` frame and a thematic
//! stock image as fallback.

use crate::config::{FALLBACK_IMG, MY_SITE_URL, THEMATIC_IMAGES};
use crate::images::PickImage;
use crate::models::{ContentItem, PageMeta};
use askama::Template;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const PAGE_CSS: &str = r#"
:root{
    --bg: #f5fcfb; --card: #ffffff; --text: #1f2937;
    --brand: #2fae6b; --accent: #ffbf00; --line: #e5e7eb;
    --shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
}
body{margin:0;padding:0;background:var(--bg);color:var(--text);font-family:'Tajawal', sans-serif;}
a{color:inherit;text-decoration:none;transition:.2s}
.container{max-width:1100px;margin:0 auto;padding:0 15px}

nav {
    background:#ffffffcc; backdrop-filter:blur(6px);
    border-bottom:2px solid var(--accent);
    padding:.75rem 1rem; position:sticky; top:0; z-index:50;
    display:flex; justify-content:space-between; align-items:center;
    box-shadow: 0 4px 15px rgba(0,0,0,0.05);
}
.logo { display:flex; align-items:center; gap:.5rem; font-weight:800; font-size:1.3rem; color:#1f2937; }
.logo span { background:var(--brand); color:#fff; padding:.2rem .5rem; border-radius:.5rem; }
.nav-links a { font-weight:700; color:#1f2937; margin-left:15px; font-size:0.95rem; }
.nav-links a:hover { color:var(--brand); }

.page-head { text-align:center; padding:20px 0; border-bottom:1px solid var(--line); margin-bottom:20px; }
.page-head h2 { margin:0; color:var(--brand); }
.page-head span { color:#888; font-size:0.9rem; }

.grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
    gap: 20px; margin-bottom: 40px;
}

.book-card {
    background: var(--card); border: 1px solid var(--line);
    border-radius: 8px; overflow: hidden; box-shadow: var(--shadow);
    display: flex; flex-direction: column; transition: transform 0.2s;
    position: relative;
}
.book-card:hover { transform: translateY(-5px); border-color:var(--brand); }

.is-news { border-top: 4px solid var(--accent); }
.is-book { border-top: 4px solid var(--brand); }

.card-img {
    height: 280px; width: 100%; overflow: hidden; background: #f3f4f6; position: relative;
}
.card-img img {
    width: 100%; height: 100%; object-fit: cover; transition: transform 0.3s;
}
.is-book .card-img img { object-fit: contain; padding: 10px; }
.is-news .card-img img { object-fit: cover; }
.book-card:hover img { transform: scale(1.05); }

.card-body { padding: 15px; flex-grow: 1; display: flex; flex-direction: column; }

.card-tag {
    font-size: 0.7rem; color: #fff; padding: 3px 8px;
    border-radius: 10px; width: fit-content; margin-bottom: 8px; font-weight: bold;
}
.tag-news { background: var(--accent); color: #000; }
.tag-book { background: var(--brand); }

.card-title { font-size: 1rem; font-weight: 700; margin: 0 0 5px 0; line-height: 1.4; }
.card-sub { font-size: 0.85rem; color: #64748b; margin-bottom: 10px; }
.card-desc { font-size: 0.8rem; color: #475569; margin: 0; line-height: 1.5; }

footer { background: #fff; border-top: 1px solid var(--line); padding: 30px; text-align: center; margin-top: auto; }
.f-links a { margin: 0 10px; color: var(--brand); font-weight: 700; font-size: 0.9rem; }
.copyright { margin-top:15px; color:#888; font-size:0.8rem; }

@media (max-width: 600px) {
    .grid { grid-template-columns: 1fr 1fr; gap: 10px; }
    .card-img { height: 200px; }
}
"#;

/// One card as the template sees it.
#[derive(Debug)]
struct CardView<'a> {
    title: &'a str,
    link: &'a str,
    image: &'a str,
    author: &'a str,
    tag: &'a str,
    description: &'a str,
    source: &'a str,
    card_class: &'static str,
    tag_class: &'static str,
    error_image: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    css: &'static str,
    json_ld: String,
    meta: &'a PageMeta,
    cards: Vec<CardView<'a>>,
}

/// schema.org description of the site, serialized once per render.
fn library_json_ld() -> String {
    serde_json::json!({
        "@context": "https://schema.org",
        "@type": "Library",
        "name": "eBooxly",
        "url": MY_SITE_URL,
        "logo": format!("{MY_SITE_URL}/imgs/logo.png"),
    })
    .to_string()
}

/// Render the full page for `items` in the given order.
///
/// Output is a pure function of the inputs and of what `picker` returns.
#[instrument(level = "info", skip_all, fields(items = items.len()))]
pub fn render_page<P: PickImage>(
    items: &[ContentItem],
    meta: &PageMeta,
    picker: &mut P,
) -> Result<String, askama::Error> {
    let cards = items
        .iter()
        .map(|item| {
            let (card_class, tag_class, error_image) = if item.is_mine {
                ("is-book", "tag-book", FALLBACK_IMG)
            } else {
                ("is-news", "tag-news", picker.pick(&THEMATIC_IMAGES, FALLBACK_IMG))
            };
            CardView {
                title: &item.title,
                link: &item.link,
                image: &item.image,
                author: &item.author,
                tag: &item.tag,
                description: &item.description,
                source: &item.source,
                card_class,
                tag_class,
                error_image,
            }
        })
        .collect();

    let page = IndexTemplate {
        css: PAGE_CSS,
        json_ld: library_json_ld(),
        meta,
        cards,
    };
    let html = page.render()?;
    info!(bytes = html.len(), "Rendered page");
    Ok(html)
}

/// Write the page, creating its parent directory when missing.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_page(html: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, html).await?;
    info!(bytes = html.len(), "Wrote page");
    Ok(())
}
