//! Small text and URL helpers shared by the scrapers.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<.*?>").expect("valid tag regex"));

/// Maximum teaser length, in characters, before the ellipsis.
pub const TEASER_CHARS: usize = 100;

/// Strip markup from a feed description and cut it to a short teaser.
///
/// Returns an empty string for blank input. Otherwise the tag-stripped,
/// whitespace-collapsed text is cut to [`TEASER_CHARS`] characters and
/// `"..."` is appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_html("<b>Hi</b> there"), "Hi there...");
/// assert_eq!(clean_html(""), "");
/// ```
pub fn clean_html(raw_html: &str) -> String {
    if raw_html.trim().is_empty() {
        return String::new();
    }
    let stripped = TAG_RE.replace_all(raw_html, " ").replace("&nbsp;", " ");
    let text = collapse_whitespace(&stripped);
    let cut: String = text.chars().take(TEASER_CHARS).collect();
    format!("{cut}...")
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters and `"…(+N bytes)"` is appended,
/// where `N` counts the bytes left out.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Resolve `href` against `base`, keeping only http(s) results.
///
/// `javascript:`, `mailto:` and unparsable values give `None`.
pub fn absolute_http_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let resolved = base.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Parse `raw` as an absolute http(s) URL.
///
/// Relative paths, other schemes and unparsable values give `None`.
pub fn absolute_http_only(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Make a possibly site-relative asset path absolute on `site`.
///
/// Values that already start with `http` are returned unchanged; anything
/// else is joined onto the site root with its leading slashes removed.
pub fn absolute_on_site(site: &str, path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{}/{}", site.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
