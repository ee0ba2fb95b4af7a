//! Readable-text extraction
//!
//! Pulls article text out of raw HTML. Four strategies run in order,
//! from most precise to most permissive, and the first one that yields
//! enough cleaned text wins:
//!
//! 1. **semantic** - `<article>`, `<main>`, `[role="main"]`
//! 2. **content-class** - common content container classes/ids
//! 3. **density** - the block element whose paragraph children carry
//!    the most text
//! 4. **full-page** - whole `<body>` with script/nav/footer noise removed
//!
//! The winning strategy is logged per page, which is the operator's
//! signal for diagnosing pages that extract poorly.

use chrono::{DateTime, FixedOffset, NaiveDate};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

/// An extraction attempt must produce at least this much cleaned text to
/// count. Shorter yields are usually cookie banners or link farms.
pub const MIN_CONTENT_CHARS: usize = 300;

const SEMANTIC_SELECTORS: &[&str] = &["article", "main", "[role='main']"];

const CONTENT_CLASS_SELECTORS: &[&str] = &[
    ".post-content",
    ".article-content",
    ".entry-content",
    ".article-body",
    ".story-body",
    ".content-body",
    "#article-body",
    "#content",
    ".prose",
];

const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form", "iframe",
];

type Strategy = fn(&Html) -> Option<String>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("semantic", extract_semantic),
    ("content-class", extract_content_class),
    ("density", extract_density),
    ("full-page", extract_full_page),
];

/// Text and metadata extracted from one page
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub title: Option<String>,
    pub text: String,
    pub published: Option<DateTime<FixedOffset>>,
    /// Name of the strategy that produced `text`
    pub strategy: &'static str,
}

/// Run the extraction cascade against a fetched page.
///
/// Returns `None` when no strategy yields at least [`MIN_CONTENT_CHARS`]
/// of cleaned text.
pub fn extract_page(url: &str, html: &str) -> Option<ExtractedPage> {
    let document = Html::parse_document(html);
    let title = extract_title(&document);
    let published = extract_publish_date(&document);

    for &(name, strategy) in STRATEGIES {
        match strategy(&document) {
            Some(text) => {
                info!(url = %url, strategy = name, chars = text.len(), "Content extracted");
                return Some(ExtractedPage {
                    title,
                    text,
                    published,
                    strategy: name,
                });
            }
            None => debug!(url = %url, strategy = name, "Extractor produced no usable text"),
        }
    }

    info!(url = %url, "All extraction strategies failed");
    None
}

fn extract_semantic(document: &Html) -> Option<String> {
    first_selector_match(document, SEMANTIC_SELECTORS)
}

fn extract_content_class(document: &Html) -> Option<String> {
    first_selector_match(document, CONTENT_CLASS_SELECTORS)
}

/// Readability-style fallback: score every block container by the text
/// carried in its direct `<p>` children and extract the densest one.
fn extract_density(document: &Html) -> Option<String> {
    let candidate_selector = Selector::parse("div, section, article").ok()?;

    let mut best_score = 0usize;
    let mut best_element: Option<ElementRef> = None;

    for element in document.select(&candidate_selector) {
        let score: usize = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "p")
            .map(|paragraph| paragraph.text().map(str::len).sum::<usize>())
            .sum();

        if score > best_score {
            best_score = score;
            best_element = Some(element);
        }
    }

    let element = best_element?;
    accept(clean_text(&element.text().collect::<Vec<_>>().join(" ")))
}

/// Last resort: all body text minus known noise elements.
fn extract_full_page(document: &Html) -> Option<String> {
    let body_selector = Selector::parse("body").ok()?;
    let body = document.select(&body_selector).next()?;

    let mut collected = String::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let in_noise = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NOISE_TAGS.contains(&element.name()))
        });
        if !in_noise {
            collected.push_str(text);
            collected.push(' ');
        }
    }

    accept(clean_text(&collected))
}

fn first_selector_match(document: &Html, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                if let Some(text) =
                    accept(clean_text(&element.text().collect::<Vec<_>>().join(" ")))
                {
                    return Some(text);
                }
            }
        }
    }
    None
}

fn extract_title(document: &Html) -> Option<String> {
    for selector_str in ["title", "meta[property='og:title']", "h1"] {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let Some(element) = document.select(&selector).next() else {
            continue;
        };
        let raw = if selector_str.starts_with("meta") {
            element.value().attr("content").unwrap_or("").to_string()
        } else {
            element.text().collect::<Vec<_>>().join(" ")
        };
        let title = clean_text(&raw);
        if !title.is_empty() {
            return Some(title);
        }
    }
    None
}

fn extract_publish_date(document: &Html) -> Option<DateTime<FixedOffset>> {
    let candidates = [
        ("meta[property='article:published_time']", "content"),
        ("meta[name='date']", "content"),
        ("time[datetime]", "datetime"),
    ];

    for (selector_str, attr) in candidates {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let Some(value) = document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr(attr))
        else {
            continue;
        };
        let value = value.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed);
        }
        // Plenty of sites publish a bare date
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Some(midnight.and_utc().fixed_offset());
            }
        }
    }
    None
}

/// Normalize whitespace the same way regardless of source markup.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn accept(text: String) -> Option<String> {
    if text.len() >= MIN_CONTENT_CHARS {
        Some(text)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILLER: &str = "The report walks through the findings in detail, laying out the \
        methodology, the data collected over the course of the study, and the conclusions the \
        team drew from it. Several independent reviewers checked the numbers and agreed with \
        the overall picture, though they flagged a handful of caveats worth keeping in mind \
        when interpreting the results.";

    fn article_page() -> String {
        format!(
            r#"<!DOCTYPE html>
            <html>
            <head>
                <title>Study Results | Example News</title>
                <meta property="article:published_time" content="2024-03-01T08:30:00+00:00">
            </head>
            <body>
                <nav>Home News Sports Weather Subscribe</nav>
                <article><h1>Study Results</h1><p>{FILLER}</p></article>
                <footer>Copyright Example News</footer>
            </body>
            </html>"#
        )
    }

    #[test]
    fn test_semantic_strategy_wins() {
        let page = extract_page("https://example.com/a", &article_page()).unwrap();
        assert_eq!(page.strategy, "semantic");
        assert!(page.text.contains("methodology"));
        assert!(!page.text.contains("Subscribe"));
        assert!(!page.text.contains("Copyright"));
    }

    #[test]
    fn test_title_and_date_extracted() {
        let page = extract_page("https://example.com/a", &article_page()).unwrap();
        assert_eq!(page.title.as_deref(), Some("Study Results | Example News"));
        let published = page.published.unwrap();
        assert_eq!(published.to_rfc3339(), "2024-03-01T08:30:00+00:00");
    }

    #[test]
    fn test_content_class_strategy() {
        let html = format!(
            r#"<html><body>
                <div class="sidebar">Related links</div>
                <div class="entry-content"><p>{FILLER}</p></div>
            </body></html>"#
        );
        let page = extract_page("https://example.com/b", &html).unwrap();
        assert_eq!(page.strategy, "content-class");
        assert!(page.text.contains("methodology"));
    }

    #[test]
    fn test_density_strategy() {
        let html = format!(
            r#"<html><body>
                <div><p>Short teaser.</p></div>
                <div><p>{FILLER}</p><p>{FILLER}</p></div>
            </body></html>"#
        );
        let page = extract_page("https://example.com/c", &html).unwrap();
        assert_eq!(page.strategy, "density");
        assert!(!page.text.contains("Short teaser"));
    }

    #[test]
    fn test_full_page_strategy_drops_noise() {
        let html = format!(
            r#"<html><body>
                <script>var tracking = true;</script>
                <span>{FILLER}</span>
            </body></html>"#
        );
        let page = extract_page("https://example.com/d", &html).unwrap();
        assert_eq!(page.strategy, "full-page");
        assert!(!page.text.contains("tracking"));
    }

    #[test]
    fn test_short_page_rejected() {
        let html = "<html><body><article><p>Too short.</p></article></body></html>";
        assert!(extract_page("https://example.com/e", html).is_none());
    }

    #[test]
    fn test_og_title_fallback() {
        let html = format!(
            r#"<html>
            <head><meta property="og:title" content="Shared Headline"></head>
            <body><article><p>{FILLER}</p></article></body>
            </html>"#
        );
        let page = extract_page("https://example.com/f", &html).unwrap();
        assert_eq!(page.title.as_deref(), Some("Shared Headline"));
    }

    #[test]
    fn test_bare_date_parsed() {
        let html = format!(
            r#"<html>
            <head><meta name="date" content="2023-11-20"></head>
            <body><article><p>{FILLER}</p></article></body>
            </html>"#
        );
        let page = extract_page("https://example.com/g", &html).unwrap();
        assert!(page.published.unwrap().to_rfc3339().starts_with("2023-11-20"));
    }
}
